use super::frame::{FrameGate, FrameHandle, FrameScheduler};
use super::position::{compute_position, scroll_percentage, ScrollDetectionConfig, ScrollPosition, ScrollSample};
use super::source::{Clock, ScrollTarget};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, trace, warn};

/// Subscriber callback. Returned errors are logged and dropped.
pub type ScrollCallback = Box<dyn FnMut(&ScrollPosition) -> anyhow::Result<()>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Counters for what the detector has processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectorStats {
    /// Raw scroll events delivered while listening.
    pub raw_events: u64,
    /// Frames that produced a position.
    pub frames: u64,
    /// Subscriber invocations that returned an error or panicked.
    pub failed_callbacks: u64,
}

/// Samples a scroll target and fans positions out to subscribers, at most once
/// per animation frame.
pub struct ScrollDetector {
    config: ScrollDetectionConfig,
    target: Box<dyn ScrollTarget>,
    clock: Box<dyn Clock>,
    frames: Box<dyn FrameScheduler>,
    gate: FrameGate,
    subscribers: Vec<(SubscriptionId, ScrollCallback)>,
    next_subscription: u64,
    listening: bool,
    started: bool,
    last_sample: Option<ScrollSample>,
    last_position: ScrollPosition,
    stats: DetectorStats,
}

impl std::fmt::Debug for ScrollDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollDetector")
            .field("config", &self.config)
            .field("subscribers", &self.subscribers.len())
            .field("listening", &self.listening)
            .field("started", &self.started)
            .field("frame_pending", &self.gate.is_pending())
            .field("last_position", &self.last_position)
            .finish()
    }
}

impl ScrollDetector {
    pub fn new(
        config: ScrollDetectionConfig,
        target: Box<dyn ScrollTarget>,
        clock: Box<dyn Clock>,
        frames: Box<dyn FrameScheduler>,
    ) -> Self {
        Self {
            config,
            target,
            clock,
            frames,
            gate: FrameGate::default(),
            subscribers: Vec::new(),
            next_subscription: 0,
            listening: false,
            started: false,
            last_sample: None,
            last_position: ScrollPosition::default(),
            stats: DetectorStats::default(),
        }
    }

    pub fn config(&self) -> &ScrollDetectionConfig {
        &self.config
    }

    pub fn stats(&self) -> DetectorStats {
        self.stats
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Sample the target now. Velocity is measured against the previous sample,
    /// which is only replaced once the clock has moved forward.
    pub fn current_position(&mut self) -> ScrollPosition {
        let metrics = self.target.metrics();
        let now_ms = self.clock.now_ms();
        let position = compute_position(metrics, now_ms, self.last_sample, &self.config);
        if self.last_sample.is_none_or(|previous| now_ms > previous.time_ms) {
            self.last_sample = Some(ScrollSample {
                scroll_top: metrics.scroll_top,
                time_ms: now_ms,
            });
        }
        self.last_position = position;
        position
    }

    pub fn last_position(&self) -> ScrollPosition {
        self.last_position
    }

    pub fn velocity(&self) -> f64 {
        self.last_position.scroll_velocity
    }

    /// One-shot check that leaves the velocity sample untouched.
    pub fn is_near_bottom(&self, threshold: Option<f64>) -> bool {
        let threshold = threshold.unwrap_or(self.config.threshold);
        scroll_percentage(&self.target.metrics()) >= threshold
    }

    /// Register a subscriber, attaching the scroll listener if needed.
    pub fn on_scroll<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ScrollPosition) -> anyhow::Result<()> + 'static,
    {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.subscribers.push((id, Box::new(callback)));
        debug!(?id, subscribers = self.subscribers.len(), "Scroll subscriber added");
        self.attach();
        id
    }

    /// Remove a subscriber. The listener is detached once nobody is left,
    /// unless the detector was started explicitly.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        let removed = self.subscribers.len() != before;
        if removed {
            debug!(?id, subscribers = self.subscribers.len(), "Scroll subscriber removed");
            if self.subscribers.is_empty() && !self.started {
                self.detach();
            }
        }
        removed
    }

    pub fn start(&mut self) {
        self.started = true;
        self.attach();
    }

    /// Detach the listener and drop any pending frame. Subscribers stay
    /// registered and resume after `start` or a new subscription.
    pub fn stop(&mut self) {
        self.started = false;
        self.detach();
    }

    /// Raw scroll event from the host. Returns whether a frame was requested.
    pub fn handle_scroll_event(&mut self) -> bool {
        if !self.listening {
            trace!("Scroll event ignored; listener detached");
            return false;
        }
        self.stats.raw_events += 1;
        self.gate.schedule(self.frames.as_mut())
    }

    /// Frame callback from the host. Computes and broadcasts one position.
    pub fn on_animation_frame(&mut self, handle: FrameHandle) -> Option<ScrollPosition> {
        if !self.gate.fire(handle) {
            trace!(?handle, "Ignoring stale frame");
            return None;
        }
        let position = self.current_position();
        self.stats.frames += 1;
        trace!(
            pct = position.scroll_percentage,
            velocity = position.scroll_velocity,
            near_bottom = position.is_near_bottom,
            "Scroll frame sampled"
        );
        self.notify(&position);
        Some(position)
    }

    fn notify(&mut self, position: &ScrollPosition) {
        for (id, callback) in self.subscribers.iter_mut() {
            match panic::catch_unwind(AssertUnwindSafe(|| callback(position))) {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    self.stats.failed_callbacks += 1;
                    warn!(?id, "Scroll subscriber failed: {err:#}");
                }
                Err(_) => {
                    self.stats.failed_callbacks += 1;
                    warn!(?id, "Scroll subscriber panicked");
                }
            }
        }
    }

    fn attach(&mut self) {
        if !self.listening {
            self.listening = true;
            debug!("Scroll listener attached");
        }
    }

    fn detach(&mut self) {
        if self.listening {
            self.listening = false;
            debug!("Scroll listener detached");
        }
        if self.gate.cancel(self.frames.as_mut()) {
            debug!("Cancelled pending scroll frame");
        }
    }
}
