use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use sampler::{MetricsProvider, MetricsUnavailable, Percent, Reading};

fn reading(cpu: f64, ram: f64) -> Reading {
    Reading {
        cpu_percent: Percent::new(cpu).expect("cpu in range"),
        ram_percent: Percent::new(ram).expect("ram in range"),
    }
}

/// Always reports the same figures.
pub struct Fixed(pub f64, pub f64);

impl MetricsProvider for Fixed {
    fn read(&self, _window: Duration) -> Result<Reading, MetricsUnavailable> {
        Ok(reading(self.0, self.1))
    }
}

/// Always fails, like a platform without a metrics facility.
pub struct Failing;

impl MetricsProvider for Failing {
    fn read(&self, _window: Duration) -> Result<Reading, MetricsUnavailable> {
        Err(MetricsUnavailable::Provider("permission denied".into()))
    }
}

/// Panics inside the blocking sample task.
pub struct Panicking;

impl MetricsProvider for Panicking {
    fn read(&self, _window: Duration) -> Result<Reading, MetricsUnavailable> {
        panic!("metrics provider blew up")
    }
}

/// Fails the first `n` reads, then behaves like [`Fixed`].
pub struct FailFirst {
    pub n: usize,
    pub then: Fixed,
    calls: AtomicUsize,
}

impl FailFirst {
    pub fn new(n: usize, then: Fixed) -> Self {
        Self {
            n,
            then,
            calls: AtomicUsize::new(0),
        }
    }
}

impl MetricsProvider for FailFirst {
    fn read(&self, window: Duration) -> Result<Reading, MetricsUnavailable> {
        match self.calls.fetch_add(1, Ordering::SeqCst) < self.n {
            true => Failing.read(window),
            false => self.then.read(window),
        }
    }
}

/// Sleeps for the window, then reports `cpu == ram == call number`, so
/// every reading is distinct and its two halves belong together.
#[derive(Default)]
pub struct Counting {
    calls: AtomicUsize,
}

impl MetricsProvider for Counting {
    fn read(&self, window: Duration) -> Result<Reading, MetricsUnavailable> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) as f64;
        std::thread::sleep(window);
        Ok(reading(n, n))
    }
}
