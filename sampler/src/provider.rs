use std::time::Duration;

use sysinfo::System;

use crate::{MetricsUnavailable, Percent};

/// Raw utilization figures, before they are stamped with a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub cpu_percent: Percent,
    pub ram_percent: Percent,
}

/// Source of CPU and memory utilization.
///
/// Implementations may block for up to `window` (plus whatever the OS
/// query itself costs) and must not keep state between calls that would
/// let one reading influence another.
pub trait MetricsProvider: Send + Sync {
    fn read(&self, window: Duration) -> Result<Reading, MetricsUnavailable>;

    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Reads the host through the `sysinfo` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct SysinfoProvider;

/// `window`, raised to the shortest interval over which the OS reports a
/// meaningful CPU usage.
pub fn effective_window(window: Duration) -> Duration {
    window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL)
}

impl MetricsProvider for SysinfoProvider {
    fn read(&self, window: Duration) -> Result<Reading, MetricsUnavailable> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(MetricsUnavailable::UnsupportedPlatform(
                std::env::consts::OS,
            ));
        }

        let mut system = System::new();

        // usage is derived from the difference between two refreshes
        system.refresh_cpu_usage();
        if system.cpus().is_empty() {
            return Err(MetricsUnavailable::NoCpus);
        }
        std::thread::sleep(effective_window(window));
        system.refresh_cpu_usage();

        let cpu_percent = Percent::new(f64::from(system.global_cpu_usage())).map_err(|source| {
            MetricsUnavailable::InvalidReading {
                what: "cpu",
                source,
            }
        })?;

        system.refresh_memory();
        let total = system.total_memory();
        if total == 0 {
            return Err(MetricsUnavailable::NoMemory);
        }
        let used = total.saturating_sub(system.available_memory());
        let ram_percent =
            Percent::from_ratio(used, total).map_err(|source| MetricsUnavailable::InvalidReading {
                what: "ram",
                source,
            })?;

        Ok(Reading {
            cpu_percent,
            ram_percent,
        })
    }

    fn name(&self) -> &'static str {
        "sysinfo"
    }
}
