//! Scroll sampling, velocity tracking and per-frame notification.
//!
//! The detector never talks to a windowing system directly. Hosts implement
//! [`ScrollTarget`], [`Clock`] and [`FrameScheduler`], forward raw scroll
//! events to [`ScrollDetector::handle_scroll_event`] and fire granted frames
//! through [`ScrollDetector::on_animation_frame`].

mod detector;
mod frame;
mod position;
mod source;

pub use detector::{DetectorStats, ScrollCallback, ScrollDetector, SubscriptionId};
pub use frame::{FrameGate, FrameHandle, FrameScheduler, ManualFrameScheduler};
pub use position::{ScrollDetectionConfig, ScrollMetrics, ScrollPosition, scroll_percentage};
pub use source::{Clock, ManualClock, ManualScrollTarget, ScrollTarget, SystemClock};
