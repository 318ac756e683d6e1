mod error;
mod percent;
mod provider;
mod snapshot;

use std::{sync::Arc, time::Duration};

pub use error::MetricsUnavailable;
pub use percent::{Percent, PercentError};
pub use provider::{MetricsProvider, Reading, SysinfoProvider, effective_window};
pub use snapshot::MetricsSnapshot;

/// How long CPU busy time is measured for each sample.
///
/// Longer windows smooth out spikes but make `/metrics` slower to answer.
pub const DEFAULT_SAMPLE_WINDOW: Duration = Duration::from_millis(500);

/// Takes [`MetricsSnapshot`]s from a [`MetricsProvider`].
///
/// Cheap to clone. Every call to [`Sampler::sample`] is independent, so one
/// `Sampler` can be shared by any number of concurrent requests.
#[derive(Clone)]
pub struct Sampler {
    provider: Arc<dyn MetricsProvider>,
    window: Duration,
}

impl Sampler {
    pub fn new(provider: impl MetricsProvider + 'static, window: Duration) -> Self {
        Self {
            provider: Arc::new(provider),
            window,
        }
    }

    pub fn sysinfo(window: Duration) -> Self {
        Self::new(SysinfoProvider, window)
    }

    /// Blocks the calling thread for the sampling window.
    pub fn sample(&self) -> Result<MetricsSnapshot, MetricsUnavailable> {
        let Reading {
            cpu_percent,
            ram_percent,
        } = self
            .provider
            .read(self.window)
            .inspect_err(|_e| {
                #[cfg(feature = "tracing")]
                tracing::warn!(provider = self.provider.name(), "{:?}", _e);
            })?;

        #[cfg(feature = "tracing")]
        tracing::debug!(%cpu_percent, %ram_percent, "sampled");

        Ok(MetricsSnapshot::now(cpu_percent, ram_percent))
    }
}

impl std::fmt::Debug for Sampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sampler")
            .field("provider", &self.provider.name())
            .field("window", &self.window)
            .finish()
    }
}
