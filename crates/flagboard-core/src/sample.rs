//! Builtin sample catalog
//!
//! Six flags from a video-processing pipeline. Used when no catalog file is
//! configured, and as the fixture for pipeline tests.

use chrono::NaiveDate;

use crate::flag::{Environment, FlagRecord, FlagType, Rollout};

/// Returns the builtin sample flags in catalog order.
pub fn sample_flags() -> Vec<FlagRecord> {
    vec![
        record(
            1,
            "video_compression_v2",
            "Video Compression V2",
            "Enhanced video compression algorithm with improved quality",
            true,
            Environment::Production,
            "john.doe",
            ((2024, 9, 15), (2024, 9, 18)),
            FlagType::Release,
            &["performance", "video"],
            85,
        ),
        record(
            2,
            "adaptive_bitrate",
            "Adaptive Bitrate Streaming",
            "Dynamically adjust video quality based on network conditions",
            false,
            Environment::Staging,
            "jane.smith",
            ((2024, 9, 10), (2024, 9, 17)),
            FlagType::Experiment,
            &["streaming", "performance"],
            25,
        ),
        record(
            3,
            "h265_encoding",
            "H.265 Encoding Support",
            "Enable H.265/HEVC encoding for better compression",
            true,
            Environment::Production,
            "mike.wilson",
            ((2024, 9, 5), (2024, 9, 16)),
            FlagType::Feature,
            &["codec", "compression"],
            100,
        ),
        record(
            4,
            "gpu_acceleration",
            "GPU Acceleration",
            "Use GPU for hardware-accelerated video encoding",
            true,
            Environment::Production,
            "sarah.johnson",
            ((2024, 8, 28), (2024, 9, 12)),
            FlagType::Performance,
            &["gpu", "acceleration"],
            60,
        ),
        record(
            5,
            "realtime_preview",
            "Real-time Preview",
            "Show real-time preview during video processing",
            false,
            Environment::Development,
            "alex.brown",
            ((2024, 9, 1), (2024, 9, 14)),
            FlagType::Ui,
            &["preview", "ui"],
            10,
        ),
        record(
            6,
            "batch_processing",
            "Batch Processing",
            "Process multiple videos simultaneously",
            true,
            Environment::Production,
            "chris.davis",
            ((2024, 8, 20), (2024, 9, 10)),
            FlagType::Feature,
            &["batch", "processing"],
            75,
        ),
    ]
}

type Ymd = (i32, u32, u32);

#[allow(clippy::too_many_arguments)]
fn record(
    id: u64,
    name: &str,
    display_name: &str,
    description: &str,
    enabled: bool,
    environment: Environment,
    created_by: &str,
    (created_at, last_modified): (Ymd, Ymd),
    flag_type: FlagType,
    tags: &[&str],
    rollout: u8,
) -> FlagRecord {
    FlagRecord {
        id,
        name: name.to_string(),
        display_name: display_name.to_string(),
        description: description.to_string(),
        enabled,
        environment,
        created_by: created_by.to_string(),
        created_at: date(created_at),
        last_modified: date(last_modified),
        flag_type,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        rollout: Rollout::clamped(rollout),
    }
}

fn date((y, m, d): Ymd) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}
