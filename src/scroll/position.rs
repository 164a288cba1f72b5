use serde::{Deserialize, Serialize};

/// Tunables for scroll sampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollDetectionConfig {
    /// Percentage of the scrollable distance counted as "near bottom".
    pub threshold: f64,
    /// Frame interval in milliseconds.
    pub debounce_ms: u64,
    /// Velocity ceiling in pixels per second.
    pub max_velocity: f64,
}

impl Default for ScrollDetectionConfig {
    fn default() -> Self {
        Self {
            threshold: 85.0,
            debounce_ms: 16,
            max_velocity: 10_000.0,
        }
    }
}

/// Raw measurements read from a scroll container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_top: f64, scroll_height: f64, client_height: f64) -> Self {
        Self {
            scroll_top: sanitize(scroll_top),
            scroll_height: sanitize(scroll_height),
            client_height: sanitize(client_height),
        }
    }

    /// Distance that can actually be scrolled.
    pub fn scrollable(&self) -> f64 {
        (self.scroll_height - self.client_height).max(0.0)
    }
}

/// Derived scroll state for one sampled frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollPosition {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
    pub scroll_percentage: f64,
    pub is_near_bottom: bool,
    /// Milliseconds on the detector's clock.
    pub last_scroll_time: f64,
    /// Pixels per second, never above the configured maximum.
    pub scroll_velocity: f64,
}

/// The previous sample a velocity is measured against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScrollSample {
    pub(crate) scroll_top: f64,
    pub(crate) time_ms: f64,
}

/// Percentage of the scrollable distance covered, clamped to 0-100.
///
/// A container without overflow is always fully scrolled.
pub fn scroll_percentage(metrics: &ScrollMetrics) -> f64 {
    if metrics.scroll_height <= metrics.client_height {
        return 100.0;
    }
    let pct = 100.0 * metrics.scroll_top / (metrics.scroll_height - metrics.client_height);
    if pct.is_finite() {
        pct.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

pub(crate) fn scroll_velocity(
    previous: Option<ScrollSample>,
    current: ScrollSample,
    max_velocity: f64,
) -> f64 {
    let Some(previous) = previous else {
        return 0.0;
    };
    let elapsed_secs = (current.time_ms - previous.time_ms) / 1000.0;
    if !(elapsed_secs > 0.0) {
        return 0.0;
    }
    let velocity = (current.scroll_top - previous.scroll_top).abs() / elapsed_secs;
    velocity.clamp(0.0, max_velocity.max(0.0))
}

pub(crate) fn compute_position(
    metrics: ScrollMetrics,
    now_ms: f64,
    previous: Option<ScrollSample>,
    config: &ScrollDetectionConfig,
) -> ScrollPosition {
    let scroll_percentage = scroll_percentage(&metrics);
    let current = ScrollSample {
        scroll_top: metrics.scroll_top,
        time_ms: now_ms,
    };
    ScrollPosition {
        scroll_top: metrics.scroll_top,
        scroll_height: metrics.scroll_height,
        client_height: metrics.client_height,
        scroll_percentage,
        is_near_bottom: scroll_percentage >= config.threshold,
        last_scroll_time: now_ms,
        scroll_velocity: scroll_velocity(previous, current, config.max_velocity),
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
