//! Deterministic scroll session driver.
//!
//! A [`Session`] plays the host's part: it owns the manual scroll target,
//! clock and frame queue, feeds recorded scroll deltas into the detector, and
//! runs the feed's deferred generation tick at the start of every frame.

use crate::config::AppConfig;
use crate::feed::{GenerateRequest, LoremFeed};
use crate::scroll::{
    ManualClock, ManualFrameScheduler, ManualScrollTarget, ScrollDetector, ScrollMetrics,
    ScrollPosition, SubscriptionId,
};
use crate::telemetry::{PerformanceMetrics, PerformanceTracker};
use crate::text_generator::LoremText;
use crate::viewport::{
    VisibleRange, calculate_visible_range, estimate_content_height, on_screen_range,
};
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fs;
use std::path::Path;
use std::rc::Rc;
use tracing::{debug, info, trace};

/// Largest trace accepted from a file or synthesized from a duration.
pub const MAX_TRACE_SAMPLES: usize = 1_000_000;

/// One recorded wheel/touch movement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceSample {
    pub time_ms: f64,
    pub delta_y: f64,
}

/// Scroll input ordered by time. Serialized as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScrollTrace {
    samples: Vec<TraceSample>,
}

impl ScrollTrace {
    pub fn new(mut samples: Vec<TraceSample>) -> Self {
        samples.sort_by(|a, b| a.time_ms.total_cmp(&b.time_ms));
        Self { samples }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scroll trace {}", path.display()))?;
        let samples: Vec<TraceSample> = serde_json::from_str(&data)
            .with_context(|| format!("Invalid scroll trace {}", path.display()))?;
        if samples.len() > MAX_TRACE_SAMPLES {
            return Err(anyhow!(
                "Scroll trace {} has {} samples; the limit is {MAX_TRACE_SAMPLES}",
                path.display(),
                samples.len()
            ));
        }
        if let Some(bad) = samples
            .iter()
            .find(|s| !s.time_ms.is_finite() || !s.delta_y.is_finite())
        {
            return Err(anyhow!("Scroll trace sample {bad:?} is not finite"));
        }
        info!(path = %path.display(), samples = samples.len(), "Loaded scroll trace");
        Ok(Self::new(samples))
    }

    /// Constant-speed downward scroll sampled every `interval_ms`.
    pub fn synthetic(seconds: f64, speed_px_per_sec: f64, interval_ms: f64) -> Result<Self> {
        let interval_ms = if interval_ms > 0.0 { interval_ms } else { 16.0 };
        let total_ms = (seconds.max(0.0) * 1000.0).floor();
        let count = (total_ms / interval_ms).floor();
        if !count.is_finite() || count > MAX_TRACE_SAMPLES as f64 {
            return Err(anyhow!(
                "{seconds} s at {interval_ms} ms per sample exceeds {MAX_TRACE_SAMPLES} samples"
            ));
        }
        let count = count as usize;
        let delta_y = speed_px_per_sec * interval_ms / 1000.0;
        let samples = (1..=count)
            .map(|i| TraceSample {
                time_ms: i as f64 * interval_ms,
                delta_y,
            })
            .collect();
        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[TraceSample] {
        &self.samples
    }

    pub fn duration_ms(&self) -> f64 {
        self.samples.last().map_or(0.0, |s| s.time_ms)
    }
}

/// Everything a finished session produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub texts: Vec<LoremText>,
    /// Positions delivered to the feed subscriber.
    pub notifications: u64,
    /// Notifications that arrived near the bottom.
    pub near_bottom_notifications: u64,
    pub batches: usize,
    pub frames: u64,
    pub raw_events: u64,
    pub failed_callbacks: u64,
    pub final_position: ScrollPosition,
    /// Render window, padded by the viewport buffer.
    pub visible_range: Option<VisibleRange>,
    /// Paragraphs that pass the visibility threshold.
    pub on_screen: Option<VisibleRange>,
    pub metrics: PerformanceMetrics,
    pub performant: bool,
}

pub struct Session {
    config: AppConfig,
    detector: ScrollDetector,
    target: ManualScrollTarget,
    clock: ManualClock,
    frames: ManualFrameScheduler,
    feed: Rc<RefCell<LoremFeed>>,
    tracker: PerformanceTracker,
    notifications: Rc<Cell<u64>>,
    near_bottom: Rc<Cell<u64>>,
    subscription: Option<SubscriptionId>,
    batches: usize,
    now_ms: f64,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("detector", &self.detector)
            .field("batches", &self.batches)
            .field("now_ms", &self.now_ms)
            .finish()
    }
}

impl Session {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let feed = LoremFeed::new(config.generation_config(), config.min_generation_count)?;
        let content_height =
            estimate_content_height(feed.texts().iter().map(|t| t.content.as_str()));
        let target = ManualScrollTarget::new(ScrollMetrics::new(
            0.0,
            content_height,
            config.viewport_client_height,
        ));
        let clock = ManualClock::new();
        let frames = ManualFrameScheduler::new();
        let detector = ScrollDetector::new(
            config.scroll_config(),
            Box::new(target.clone()),
            Box::new(clock.clone()),
            Box::new(frames.clone()),
        );

        let mut session = Self {
            config: config.clone(),
            detector,
            target,
            clock,
            frames,
            feed: Rc::new(RefCell::new(feed)),
            tracker: PerformanceTracker::new(config.performance_config()),
            notifications: Rc::new(Cell::new(0)),
            near_bottom: Rc::new(Cell::new(0)),
            subscription: None,
            batches: 0,
            now_ms: 0.0,
        };
        session.subscribe_feed();
        Ok(session)
    }

    fn subscribe_feed(&mut self) {
        let feed = Rc::clone(&self.feed);
        let notifications = Rc::clone(&self.notifications);
        let near_bottom = Rc::clone(&self.near_bottom);
        let count = self.config.scroll_generation_count;
        let id = self.detector.on_scroll(move |position| {
            notifications.set(notifications.get() + 1);
            let mut feed = feed
                .try_borrow_mut()
                .map_err(|_| anyhow!("Feed is busy"))?;
            if feed.generator().should_generate(position) {
                near_bottom.set(near_bottom.get() + 1);
                if let GenerateRequest::Scheduled(batch) = feed.generate_more(count) {
                    debug!(batch, pct = position.scroll_percentage, "Near bottom; more text requested");
                }
            }
            Ok(())
        });
        self.subscription = Some(id);
    }

    pub fn texts(&self) -> Vec<LoremText> {
        self.feed.borrow().texts().to_vec()
    }

    pub fn is_generating(&self) -> bool {
        self.feed.borrow().is_generating()
    }

    /// The "load more" action: asks for `button_generation_count` paragraphs.
    pub fn load_more(&mut self) -> GenerateRequest {
        let count = self.config.button_generation_count;
        self.feed.borrow_mut().generate_more(count)
    }

    /// Replay `trace`, then flush any batch still in flight.
    pub fn replay(&mut self, trace: &ScrollTrace) -> Result<()> {
        let frame_ms = self.detector.config().debounce_ms.max(1) as f64;
        let samples = trace.samples();
        let end_ms = trace.duration_ms();
        let mut next = 0;
        info!(
            samples = samples.len(),
            duration_ms = end_ms,
            frame_ms,
            "Replaying scroll trace"
        );

        while next < samples.len() {
            self.run_generation_tick()?;
            while let Some(sample) = samples.get(next).filter(|s| s.time_ms <= self.now_ms) {
                self.scroll_by(sample.delta_y);
                next += 1;
            }
            self.fire_frames();
            self.now_ms += frame_ms;

            // Nothing queued: skip to the frame that will see the next sample.
            if self.frames.queued_len() == 0 && !self.is_generating() {
                if let Some(sample) = samples.get(next) {
                    let boundary = (sample.time_ms / frame_ms).ceil() * frame_ms;
                    if boundary > self.now_ms {
                        trace!(from = self.now_ms, to = boundary, "Skipping idle frames");
                        self.now_ms = boundary;
                    }
                }
            }
        }
        self.run_generation_tick()?;
        Ok(())
    }

    fn scroll_by(&mut self, delta_y: f64) {
        let metrics = self.target.get();
        let scroll_top = (metrics.scroll_top + delta_y).clamp(0.0, metrics.scrollable());
        self.target.set(ScrollMetrics::new(
            scroll_top,
            metrics.scroll_height,
            metrics.client_height,
        ));
        trace!(delta_y, scroll_top, "Scroll event");
        self.tracker.record_scroll_event();
        self.detector.handle_scroll_event();
    }

    fn fire_frames(&mut self) {
        let queued = self.frames.take_queued();
        if queued.is_empty() {
            return;
        }
        self.clock.set(self.now_ms);
        for handle in queued {
            self.detector.on_animation_frame(handle);
        }
        self.tracker.record_frame(self.now_ms);
        self.tracker.maybe_cleanup(self.now_ms);
    }

    /// Run the deferred batch and grow the scroll height to fit it.
    fn run_generation_tick(&mut self) -> Result<()> {
        let mut feed = self.feed.borrow_mut();
        let Some(batch) = feed.run_pending()? else {
            return Ok(());
        };
        self.batches += 1;
        self.tracker.record_generation(batch.elapsed);
        let texts = feed.texts();
        self.tracker
            .record_text_bytes(texts.iter().map(|t| t.content.len()).sum());
        let content_height = estimate_content_height(texts.iter().map(|t| t.content.as_str()));
        let metrics = self.target.get();
        self.target.set(ScrollMetrics::new(
            metrics.scroll_top,
            content_height,
            metrics.client_height,
        ));
        debug!(
            appended = batch.appended,
            content_height,
            now_ms = self.now_ms,
            "Content height updated"
        );
        Ok(())
    }

    /// Tear down the subscription and build the report.
    pub fn finish(mut self) -> SessionReport {
        if let Some(id) = self.subscription.take() {
            self.detector.unsubscribe(id);
        }
        self.detector.stop();

        let stats = self.detector.stats();
        let final_position = self.detector.last_position();
        let texts = self.texts();
        let viewport = self.config.viewport_config();
        let scroll_top = self.target.get().scroll_top;
        let visible_range = calculate_visible_range(
            texts.len(),
            scroll_top,
            viewport.client_height,
            viewport.item_height,
            viewport.buffer_size,
        );
        let on_screen = on_screen_range(
            texts.len(),
            scroll_top,
            viewport.client_height,
            viewport.item_height,
            viewport.visibility_threshold,
        );
        let report = SessionReport {
            notifications: self.notifications.get(),
            near_bottom_notifications: self.near_bottom.get(),
            batches: self.batches,
            frames: stats.frames,
            raw_events: stats.raw_events,
            failed_callbacks: stats.failed_callbacks,
            final_position,
            visible_range,
            on_screen,
            metrics: self.tracker.metrics(),
            performant: self.tracker.is_performant(),
            texts,
        };
        info!(
            paragraphs = report.texts.len(),
            batches = report.batches,
            frames = report.frames,
            raw_events = report.raw_events,
            "Session finished"
        );
        report
    }
}

/// Build a session from `config`, replay `trace`, and report.
pub fn run_session(config: &AppConfig, trace: &ScrollTrace) -> Result<SessionReport> {
    let mut session = Session::new(config)?;
    session.replay(trace)?;
    Ok(session.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text_generator::TextKind;

    fn config() -> AppConfig {
        AppConfig {
            max_paragraphs: 40,
            ..AppConfig::default()
        }
    }

    #[test]
    fn synthetic_trace_has_constant_deltas() {
        let trace = ScrollTrace::synthetic(1.0, 1200.0, 16.0).expect("trace");
        assert_eq!(trace.samples().len(), 62);
        assert!(trace.samples().iter().all(|s| (s.delta_y - 19.2).abs() < 1e-9));
        assert_eq!(trace.duration_ms(), 62.0 * 16.0);
    }

    #[test]
    fn oversized_synthetic_trace_is_rejected() {
        assert!(ScrollTrace::synthetic(1e12, 1200.0, 16.0).is_err());
        assert!(ScrollTrace::synthetic(f64::INFINITY, 1200.0, 16.0).is_err());
    }

    #[test]
    fn sparse_trace_skips_idle_frames() {
        let trace = ScrollTrace::new(vec![
            TraceSample {
                time_ms: 0.0,
                delta_y: 10.0,
            },
            TraceSample {
                time_ms: 1e9,
                delta_y: 10.0,
            },
            TraceSample {
                time_ms: 1e12,
                delta_y: 10.0,
            },
        ]);
        let started = std::time::Instant::now();
        let report = run_session(&config(), &trace).expect("session");
        assert!(started.elapsed().as_secs() < 5, "idle stretches must not be stepped");
        assert_eq!(report.raw_events, 3);
        assert_eq!(report.frames, 3);
        assert_eq!(report.final_position.last_scroll_time, 1e12);
    }

    #[test]
    fn trace_loads_from_json_and_sorts() {
        let dir = std::env::temp_dir().join(format!("lorem-scroll-trace-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("trace.json");
        fs::write(
            &path,
            r#"[{"time_ms": 40.0, "delta_y": 5.0}, {"time_ms": 10.0, "delta_y": 30.0}]"#,
        )
        .expect("write trace");
        let trace = ScrollTrace::load(&path).expect("load trace");
        assert_eq!(trace.samples()[0].time_ms, 10.0);
        assert_eq!(trace.samples()[1].delta_y, 5.0);

        fs::write(&path, "{not json").expect("write bad trace");
        assert!(ScrollTrace::load(&path).is_err());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn no_input_keeps_only_the_original() {
        let report = run_session(&config(), &ScrollTrace::default()).expect("session");
        assert_eq!(report.texts.len(), 1);
        assert_eq!(report.texts[0].kind, TextKind::Original);
        assert_eq!(report.frames, 0);
        assert_eq!(report.batches, 0);
    }

    #[test]
    fn short_content_is_near_bottom_and_grows() {
        let trace = ScrollTrace::new(vec![TraceSample {
            time_ms: 5.0,
            delta_y: 10.0,
        }]);
        let report = run_session(&config(), &trace).expect("session");
        assert_eq!(report.frames, 1);
        assert_eq!(report.near_bottom_notifications, 1);
        assert_eq!(report.batches, 1);
        assert_eq!(report.texts.len(), 3, "original plus one scroll batch");
    }

    #[test]
    fn events_within_one_frame_coalesce() {
        let trace = ScrollTrace::new(
            (0..5)
                .map(|i| TraceSample {
                    time_ms: 1.0 + i as f64,
                    delta_y: 3.0,
                })
                .collect(),
        );
        let report = run_session(&config(), &trace).expect("session");
        assert_eq!(report.raw_events, 5);
        assert_eq!(report.frames, 1);
        assert_eq!(report.notifications, 1);
    }

    #[test]
    fn long_scroll_appends_gapless_paragraphs() {
        let trace = ScrollTrace::synthetic(5.0, 1200.0, 16.0).expect("trace");
        let report = run_session(&config(), &trace).expect("session");
        assert!(report.batches > 1, "expected several batches");
        assert!(report.texts.len() <= 41, "budget caps generated paragraphs");
        for (idx, text) in report.texts.iter().enumerate() {
            assert_eq!(text.position, idx);
            assert_eq!(text.paragraph_index, idx + 1);
        }
        assert!(report.final_position.scroll_top > 0.0);
        assert_eq!(report.failed_callbacks, 0);
        let rendered = report.visible_range.expect("render window");
        let on_screen = report.on_screen.expect("on-screen paragraphs");
        assert!(rendered.contains(on_screen.start) && rendered.contains(on_screen.end));
    }

    #[test]
    fn in_flight_batch_absorbs_repeat_requests() {
        let trace = ScrollTrace::synthetic(2.0, 4000.0, 16.0).expect("trace");
        let report = run_session(&config(), &trace).expect("session");
        assert!(report.near_bottom_notifications >= report.batches as u64);
        let generated = report.texts.len() - 1;
        assert_eq!(generated, report.batches * 2, "every batch is exactly one request");
    }

    #[test]
    fn load_more_is_single_flight() {
        let mut session = Session::new(&config()).expect("session");
        assert_eq!(session.load_more(), GenerateRequest::Scheduled(3));
        assert!(session.is_generating());
        assert_eq!(session.load_more(), GenerateRequest::AlreadyGenerating);
        session.replay(&ScrollTrace::default()).expect("flush");
        assert!(!session.is_generating());
        assert_eq!(session.texts().len(), 4);
    }

    #[test]
    fn finish_cancels_pending_frame() {
        let mut session = Session::new(&config()).expect("session");
        session.scroll_by(5.0);
        assert_eq!(session.frames.queued_len(), 1);
        let frames = session.frames.clone();
        let report = session.finish();
        assert_eq!(frames.queued_len(), 0);
        assert_eq!(frames.cancelled_count(), 1);
        assert_eq!(report.frames, 0);
    }
}
