//! Inputs the detector samples: container metrics and time.

use super::position::ScrollMetrics;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// A scrollable container (the window or an element).
pub trait ScrollTarget {
    fn metrics(&self) -> ScrollMetrics;
}

/// Millisecond clock.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Target whose metrics are set by the owner. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct ManualScrollTarget {
    metrics: Rc<Cell<ScrollMetrics>>,
}

impl ManualScrollTarget {
    pub fn new(metrics: ScrollMetrics) -> Self {
        Self {
            metrics: Rc::new(Cell::new(metrics)),
        }
    }

    pub fn set(&self, metrics: ScrollMetrics) {
        self.metrics.set(metrics);
    }

    pub fn get(&self) -> ScrollMetrics {
        self.metrics.get()
    }
}

impl ScrollTarget for ManualScrollTarget {
    fn metrics(&self) -> ScrollMetrics {
        self.metrics.get()
    }
}

/// Clock advanced by the owner. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, now_ms: f64) {
        self.now_ms.set(now_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now_ms.get()
    }
}

/// Monotonic wall clock measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}
