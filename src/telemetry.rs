//! Rough performance telemetry for a scrolling session.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;
use tracing::debug;

/// Frames kept for the fps estimate.
const FPS_WINDOW: usize = 60;
/// Fps below which the session is considered sluggish.
const MIN_ACCEPTABLE_FPS: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceConfig {
    pub target_fps: f64,
    pub max_memory_mb: f64,
    pub cleanup_interval_ms: u64,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            target_fps: 60.0,
            max_memory_mb: 100.0,
            cleanup_interval_ms: 30_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub fps: f64,
    /// Milliseconds between the two most recent frames.
    pub render_time: f64,
    /// Milliseconds spent in the most recent generation batch.
    pub text_generation_time: f64,
    /// Estimated text footprint in megabytes.
    pub memory_usage: f64,
    pub scroll_event_count: u64,
    pub last_cleanup_time: f64,
}

#[derive(Debug, Clone)]
pub struct PerformanceTracker {
    config: PerformanceConfig,
    frame_times: VecDeque<f64>,
    metrics: PerformanceMetrics,
}

impl PerformanceTracker {
    pub fn new(config: PerformanceConfig) -> Self {
        Self {
            config,
            frame_times: VecDeque::with_capacity(FPS_WINDOW),
            metrics: PerformanceMetrics {
                fps: config.target_fps,
                ..PerformanceMetrics::default()
            },
        }
    }

    pub fn metrics(&self) -> PerformanceMetrics {
        self.metrics
    }

    pub fn record_scroll_event(&mut self) {
        self.metrics.scroll_event_count += 1;
    }

    pub fn record_frame(&mut self, now_ms: f64) {
        if self.frame_times.len() == FPS_WINDOW {
            self.frame_times.pop_front();
        }
        if let Some(previous) = self.frame_times.back() {
            self.metrics.render_time = (now_ms - previous).max(0.0);
        }
        self.frame_times.push_back(now_ms);

        if let (Some(first), Some(last)) = (self.frame_times.front(), self.frame_times.back()) {
            let span_ms = last - first;
            if span_ms > 0.0 {
                let intervals = (self.frame_times.len() - 1) as f64;
                self.metrics.fps = intervals * 1000.0 / span_ms;
            }
        }
    }

    pub fn record_generation(&mut self, elapsed: Duration) {
        self.metrics.text_generation_time = elapsed.as_secs_f64() * 1000.0;
    }

    /// Update the memory estimate from the bytes of text currently held.
    pub fn record_text_bytes(&mut self, bytes: usize) {
        self.metrics.memory_usage = bytes as f64 / (1024.0 * 1024.0);
    }

    pub fn is_performant(&self) -> bool {
        self.metrics.fps >= MIN_ACCEPTABLE_FPS && self.metrics.memory_usage < self.config.max_memory_mb
    }

    /// Drop the frame window and stamp the cleanup time.
    pub fn cleanup(&mut self, now_ms: f64) {
        self.frame_times.clear();
        self.metrics.last_cleanup_time = now_ms;
        debug!(now_ms, "Performance window cleaned up");
    }

    /// Run `cleanup` once the configured interval has passed.
    pub fn maybe_cleanup(&mut self, now_ms: f64) -> bool {
        let due = now_ms - self.metrics.last_cleanup_time >= self.config.cleanup_interval_ms as f64;
        if due {
            self.cleanup(now_ms);
        }
        due
    }
}
