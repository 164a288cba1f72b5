//! Viewport estimation utilities.
//!
//! Paragraph heights are approximated from character counts rather than
//! measured, which keeps the math deterministic and lets the session build a
//! plausible scroll height without a layout engine.

use serde::{Deserialize, Serialize};

/// Approximate characters that fit on one rendered line.
pub const CHARS_PER_LINE: usize = 80;
/// Approximate line height in pixels.
pub const LINE_HEIGHT_PX: f64 = 20.0;
/// Floor for any paragraph's estimated height.
pub const MIN_TEXT_HEIGHT_PX: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Items rendered beyond each edge of the viewport.
    pub buffer_size: usize,
    /// Estimated item height in pixels.
    pub item_height: f64,
    /// Fraction of an item that must be on screen to count as visible.
    pub visibility_threshold: f64,
    /// Height of the scroll container.
    pub client_height: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            buffer_size: 2,
            item_height: 120.0,
            visibility_threshold: 0.1,
            client_height: 800.0,
        }
    }
}

/// Inclusive index range of items worth rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize,
}

impl VisibleRange {
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, idx: usize) -> bool {
        (self.start..=self.end).contains(&idx)
    }
}

/// Items to render for a list of `len` fixed-height items, padded by `buffer`
/// on both sides. `None` when the list is empty.
pub fn calculate_visible_range(
    len: usize,
    scroll_top: f64,
    container_height: f64,
    item_height: f64,
    buffer: usize,
) -> Option<VisibleRange> {
    if len == 0 {
        return None;
    }
    let item_height = if item_height.is_finite() && item_height > 0.0 {
        item_height
    } else {
        1.0
    };
    let first_visible = (scroll_top.max(0.0) / item_height).floor() as usize;
    let start = first_visible.saturating_sub(buffer).min(len - 1);
    let visible_count = (container_height.max(0.0) / item_height).ceil() as usize;
    let end = start
        .saturating_add(visible_count)
        .saturating_add(buffer.saturating_mul(2))
        .min(len - 1);
    Some(VisibleRange { start, end })
}

/// Items at least `visibility_threshold` on screen, as a fraction of their
/// own height. Items merely touching an edge never count. `None` when nothing
/// qualifies.
pub fn on_screen_range(
    len: usize,
    scroll_top: f64,
    container_height: f64,
    item_height: f64,
    visibility_threshold: f64,
) -> Option<VisibleRange> {
    if len == 0 {
        return None;
    }
    let item_height = if item_height.is_finite() && item_height > 0.0 {
        item_height
    } else {
        1.0
    };
    let threshold = if visibility_threshold.is_finite() {
        visibility_threshold.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let top = scroll_top.max(0.0);
    let bottom = top + container_height.max(0.0);
    let first = (top / item_height).floor() as usize;
    let last = ((bottom / item_height).ceil() as usize).min(len);

    let visible = |idx: usize| {
        let item_top = idx as f64 * item_height;
        let overlap = bottom.min(item_top + item_height) - top.max(item_top);
        let fraction = overlap.max(0.0) / item_height;
        fraction > 0.0 && fraction >= threshold
    };
    let start = (first..last).find(|idx| visible(*idx))?;
    let end = (start..last).rev().find(|idx| visible(*idx))?;
    Some(VisibleRange { start, end })
}

/// Rough rendered height of a paragraph in pixels.
pub fn estimate_text_height(text: &str) -> f64 {
    let chars = text.chars().count();
    let lines = chars.div_ceil(CHARS_PER_LINE);
    (lines as f64 * LINE_HEIGHT_PX).max(MIN_TEXT_HEIGHT_PX)
}

/// Total estimated height of a sequence of paragraphs.
pub fn estimate_content_height<'a>(texts: impl IntoIterator<Item = &'a str>) -> f64 {
    texts.into_iter().map(estimate_text_height).sum()
}
