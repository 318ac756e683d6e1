use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Percent;

/// One reading plus the wall-clock time it was taken.
///
/// Serializes as `{"cpu": 12.5, "ram": 48.1, "timestamp": 1760000000.123}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    #[serde(rename = "cpu")]
    pub cpu_percent: Percent,

    #[serde(rename = "ram")]
    pub ram_percent: Percent,

    /// seconds since the unix epoch
    pub timestamp: f64,
}

impl MetricsSnapshot {
    pub fn now(cpu_percent: Percent, ram_percent: Percent) -> Self {
        Self {
            cpu_percent,
            ram_percent,
            timestamp: unix_timestamp(OffsetDateTime::now_utc()),
        }
    }
}

fn unix_timestamp(datetime: OffsetDateTime) -> f64 {
    datetime.unix_timestamp_nanos() as f64 / 1_000_000_000.0
}
