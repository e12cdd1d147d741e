//! Scroll-triggered text reveal.
//!
//! A [`RevealText`] splits its text into segments (words or letters) and
//! animates each one from a blurred, transparent, offset state to its resting
//! state once the element first intersects the viewport. Segment `i` starts
//! its transition `i * delay` after visibility flips; visibility never flips
//! back.

use std::{rc::Rc, time::Duration};

use crate::{
    dom::{Document, ElementId, IntersectionEntry, ObserverGuard},
    html::{classes, escape},
};

/// Fraction of the element that must be visible before the reveal fires.
pub const VISIBILITY_THRESHOLD: f32 = 0.1;
pub const DEFAULT_SEGMENT_DELAY_MS: u64 = 50;
pub const HIDDEN_BLUR_PX: u32 = 10;
pub const HIDDEN_OFFSET_PX: i32 = 20;
pub const TRANSITION: &str = "all 0.5s ease-out";
const NBSP: char = '\u{00A0}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SegmentMode {
    #[default]
    Words,
    Letters,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealDirection {
    #[default]
    Top,
    Bottom,
}

impl RevealDirection {
    fn hidden_offset_px(self) -> i32 {
        match self {
            Self::Top => -HIDDEN_OFFSET_PX,
            Self::Bottom => HIDDEN_OFFSET_PX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealOptions {
    pub delay_ms: u64,
    pub mode: SegmentMode,
    pub direction: RevealDirection,
    pub class: String,
    pub style: String,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_SEGMENT_DELAY_MS,
            mode: SegmentMode::Words,
            direction: RevealDirection::Top,
            class: String::new(),
            style: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentStyle {
    pub blur_px: u32,
    pub opacity: f32,
    pub translate_y_px: i32,
    pub transition_delay: Duration,
}

impl SegmentStyle {
    /// Style of segment `index` for the given visibility. Pure.
    pub fn for_segment(
        visible: bool,
        index: usize,
        delay_ms: u64,
        direction: RevealDirection,
    ) -> Self {
        let transition_delay = Duration::from_millis(delay_ms.saturating_mul(index as u64));
        if visible {
            Self {
                blur_px: 0,
                opacity: 1.0,
                translate_y_px: 0,
                transition_delay,
            }
        } else {
            Self {
                blur_px: HIDDEN_BLUR_PX,
                opacity: 0.0,
                translate_y_px: direction.hidden_offset_px(),
                transition_delay,
            }
        }
    }

    pub fn to_css(&self) -> String {
        format!(
            "display:inline-block;filter:blur({}px);opacity:{};transform:translateY({}px);transition:{TRANSITION} {}ms",
            self.blur_px,
            self.opacity,
            self.translate_y_px,
            self.transition_delay.as_millis()
        )
    }
}

/// Splits `text` the way the reveal animates it.
pub fn split_segments(text: &str, mode: SegmentMode) -> Vec<String> {
    match mode {
        SegmentMode::Words => text.split(' ').map(str::to_string).collect(),
        SegmentMode::Letters => text.chars().map(String::from).collect(),
    }
}

/// Memoizes the last segmentation keyed on `(text, mode)`.
#[derive(Debug, Default)]
pub struct SegmentCache {
    key: Option<(String, SegmentMode)>,
    segments: Rc<[String]>,
    computations: usize,
}

impl SegmentCache {
    pub fn segments(&mut self, text: &str, mode: SegmentMode) -> Rc<[String]> {
        let hit = matches!(&self.key, Some((cached, cached_mode)) if cached == text && *cached_mode == mode);
        if !hit {
            self.segments = split_segments(text, mode).into();
            self.key = Some((text.to_string(), mode));
            self.computations += 1;
        }
        Rc::clone(&self.segments)
    }

    pub fn computations(&self) -> usize {
        self.computations
    }
}

pub struct RevealText {
    element: ElementId,
    text: String,
    options: RevealOptions,
    visible: bool,
    cache: SegmentCache,
    observer: Option<ObserverGuard>,
}

impl RevealText {
    pub fn new(element: ElementId, text: impl Into<String>, options: RevealOptions) -> Self {
        Self {
            element,
            text: text.into(),
            options,
            visible: false,
            cache: SegmentCache::default(),
            observer: None,
        }
    }

    pub fn element(&self) -> &ElementId {
        &self.element
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &RevealOptions {
        &self.options
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_observing(&self) -> bool {
        self.observer.is_some()
    }

    /// Registers the single viewport watcher for this element. No-op once
    /// visible or when already watching.
    pub fn mount(&mut self, document: &Document) {
        if self.visible || self.observer.is_some() {
            return;
        }
        self.observer = Some(document.observe(self.element.clone()));
    }

    /// Releases the viewport watcher whatever the visibility state.
    pub fn unmount(&mut self) {
        self.observer = None;
    }

    /// Returns true when this entry made the text visible.
    pub fn on_intersection(&mut self, entry: &IntersectionEntry) -> bool {
        if self.visible || self.observer.is_none() || entry.target != self.element {
            return false;
        }
        if entry.intersection_ratio < VISIBILITY_THRESHOLD {
            return false;
        }
        self.visible = true;
        self.observer = None;
        true
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_mode(&mut self, mode: SegmentMode) {
        self.options.mode = mode;
    }

    pub fn segments(&mut self) -> Rc<[String]> {
        self.cache.segments(&self.text, self.options.mode)
    }

    pub fn segment_computations(&self) -> usize {
        self.cache.computations()
    }

    pub fn segment_style(&self, index: usize) -> SegmentStyle {
        SegmentStyle::for_segment(
            self.visible,
            index,
            self.options.delay_ms,
            self.options.direction,
        )
    }

    /// Transition start offsets, relative to the moment visibility flips.
    pub fn transition_schedule(&mut self) -> Vec<Duration> {
        let count = self.segments().len();
        (0..count)
            .map(|index| self.segment_style(index).transition_delay)
            .collect()
    }

    /// Segment text as displayed; words carry a trailing no-break space
    /// except the last one.
    pub fn display_segments(&mut self) -> Vec<String> {
        let segments = self.segments();
        let last = segments.len().saturating_sub(1);
        segments
            .iter()
            .enumerate()
            .map(|(index, segment)| {
                let mut shown = segment.clone();
                if self.options.mode == SegmentMode::Words && index < last {
                    shown.push(NBSP);
                }
                shown
            })
            .collect()
    }

    pub fn render(&mut self) -> String {
        let class = classes(["inline-flex flex-wrap", self.options.class.as_str()]);
        let mut out = format!(
            r#"<p id="{}" class="{}" style="{}" data-reveal data-threshold="{VISIBILITY_THRESHOLD}" data-visible="{}">"#,
            escape(self.element.as_str()),
            escape(&class),
            escape(&self.options.style),
            self.visible,
        );
        for (index, segment) in self.display_segments().into_iter().enumerate() {
            let style = self.segment_style(index);
            out.push_str(&format!(
                r#"<span data-segment="{index}" data-hidden-offset="{}" style="{}">{}</span>"#,
                self.options.direction.hidden_offset_px(),
                style.to_css(),
                escape(&segment)
            ));
        }
        out.push_str("</p>");
        out
    }
}

#[cfg(test)]
#[path = "tests/reveal_tests.rs"]
mod tests;
