// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segmented control state and tap resolution.

use alloc::vec::Vec;

use kurbo::Rect;
use smallvec::SmallVec;

use crate::section::{ImageId, Section, SegmentTitle};

/// How segment widths are derived.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SegmentWidthStyle {
    /// Every segment gets the same width: the control width split evenly, or
    /// the widest measured segment if that is larger.
    Fixed,
    /// Each segment is as wide as its measured content.
    #[default]
    Dynamic,
}

/// Configuration for a [`SegmentedControl`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentedControlConfig {
    /// Width derivation.
    pub width_style: SegmentWidthStyle,
    /// Whether taps may change the selection.
    pub touch_enabled: bool,
    /// Whether a tap-driven change is animated.
    pub animate_user_selection: bool,
    /// Whether dynamic segments share leftover width so they fill the control.
    pub stretch_segments: bool,
    /// Horizontal padding added to each measured width, `(left, right)`.
    pub segment_padding: (f64, f64),
}

impl Default for SegmentedControlConfig {
    fn default() -> Self {
        Self {
            width_style: SegmentWidthStyle::Dynamic,
            touch_enabled: true,
            animate_user_selection: true,
            stretch_segments: true,
            segment_padding: (5.0, 5.0),
        }
    }
}

/// Result of [`SegmentedControl::tap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    /// The tap hit no segment, or touch is disabled.
    Ignored,
    /// The tap hit the segment that was already selected.
    Reselected(usize),
    /// The selection changed to this segment ("value changed").
    Changed(usize),
}

/// Headless state of a segmented tab control.
///
/// The control knows its sections, the selected segment, and the segment
/// geometry along its horizontal axis. Measuring text and images and drawing
/// are the host's job: the host passes measured content widths to
/// [`SegmentedControl::layout`].
///
/// Selection can change two ways. [`SegmentedControl::set_selected_index`] is a
/// display-only update used when something else (a pager) drives the
/// selection; it never reports a change. [`SegmentedControl::tap`] is the user
/// path and reports [`TapOutcome::Changed`] when the selection moves.
#[derive(Clone, Debug)]
pub struct SegmentedControl {
    config: SegmentedControlConfig,
    sections: Vec<Section>,
    selected: Option<usize>,
    selection_animated: bool,
    width: f64,
    segment_width: f64,
    segment_widths: SmallVec<[f64; 8]>,
    scroll_offset: f64,
}

impl Default for SegmentedControl {
    fn default() -> Self {
        Self::new(SegmentedControlConfig::default())
    }
}

impl SegmentedControl {
    /// Creates a control without sections, with segment 0 selected.
    #[must_use]
    pub fn new(config: SegmentedControlConfig) -> Self {
        Self {
            config,
            sections: Vec::new(),
            selected: Some(0),
            selection_animated: false,
            width: 0.0,
            segment_width: 0.0,
            segment_widths: SmallVec::new(),
            scroll_offset: 0.0,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SegmentedControlConfig {
        &self.config
    }

    /// Mutable access to the configuration. Call [`SegmentedControl::layout`]
    /// afterwards if width settings changed.
    pub fn config_mut(&mut self) -> &mut SegmentedControlConfig {
        &mut self.config
    }

    /// Replaces the sections. Segment geometry is cleared until the next
    /// layout, and a selection beyond the new sections is dropped.
    pub fn set_sections(&mut self, sections: Vec<Section>) {
        self.sections = sections;
        self.segment_widths.clear();
        self.segment_width = 0.0;
        if self.selected.is_some_and(|i| i >= self.sections.len()) {
            tracing::debug!(target: "understory_segmented_control", "selection cleared by new sections");
            self.selected = None;
        }
    }

    /// The sections.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// The selected segment, or `None` for no segment.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Whether the most recent selection change was animated.
    #[must_use]
    pub fn selection_animated(&self) -> bool {
        self.selection_animated
    }

    /// Sets the selected segment for display only.
    ///
    /// Never reports a change. Setting the current index again only updates
    /// the animation flag.
    pub fn set_selected_index(&mut self, index: Option<usize>, animated: bool) {
        self.selected = index;
        self.selection_animated = animated;
        if index.is_some() {
            self.scroll_to_selected();
        }
    }

    /// The title to display for segment `index`.
    #[must_use]
    pub fn display_title(&self, index: usize) -> Option<SegmentTitle<'_>> {
        let section = self.sections.get(index)?;
        Some(match &section.attributed_title {
            Some(attributed) => SegmentTitle::Attributed(attributed),
            None => SegmentTitle::Plain(&section.title),
        })
    }

    /// The image to display for segment `index`, honoring selection.
    #[must_use]
    pub fn display_image(&self, index: usize) -> Option<ImageId> {
        let section = self.sections.get(index)?;
        if self.selected == Some(index) {
            section.selected_image.or(section.image)
        } else {
            section.image
        }
    }

    /// Computes segment geometry for a control `width` wide.
    ///
    /// `measured` holds the content width of each segment, in section order;
    /// missing entries count as zero. Padding from the configuration is added
    /// to each.
    pub fn layout(&mut self, width: f64, measured: &[f64]) {
        self.width = width;
        let count = self.sections.len();
        let (left, right) = self.config.segment_padding;
        let padded = (0..count).map(|i| measured.get(i).copied().unwrap_or(0.0) + left + right);

        self.segment_widths.clear();
        self.segment_width = 0.0;
        if count == 0 {
            return;
        }
        match self.config.width_style {
            SegmentWidthStyle::Fixed => {
                self.segment_width = padded.fold(width / count as f64, f64::max);
            }
            SegmentWidthStyle::Dynamic => {
                self.segment_widths.extend(padded);
                let total: f64 = self.segment_widths.iter().sum();
                if self.config.stretch_segments && total < width {
                    let extra = (width - total) / count as f64;
                    for w in &mut self.segment_widths {
                        *w += extra;
                    }
                }
            }
        }
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_scroll_offset());
    }

    /// Width of every segment laid end to end.
    #[must_use]
    pub fn total_width(&self) -> f64 {
        match self.config.width_style {
            SegmentWidthStyle::Fixed => self.segment_width * self.sections.len() as f64,
            SegmentWidthStyle::Dynamic => self.segment_widths.iter().sum(),
        }
    }

    /// Horizontal span of segment `index` in content coordinates.
    #[must_use]
    pub fn segment_rect(&self, index: usize, height: f64) -> Option<Rect> {
        if index >= self.sections.len() {
            return None;
        }
        let (x, w) = match self.config.width_style {
            SegmentWidthStyle::Fixed => (self.segment_width * index as f64, self.segment_width),
            SegmentWidthStyle::Dynamic => {
                let w = *self.segment_widths.get(index)?;
                (self.segment_widths[..index].iter().sum(), w)
            }
        };
        Some(Rect::new(x, 0.0, x + w, height))
    }

    /// How far the segments are scrolled when they overflow the control.
    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Scrolls the segments, clamped to the overflow.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset.clamp(0.0, self.max_scroll_offset());
    }

    fn max_scroll_offset(&self) -> f64 {
        (self.total_width() - self.width).max(0.0)
    }

    /// Centers the selected segment when the segments overflow.
    fn scroll_to_selected(&mut self) {
        let Some(rect) = self.selected.and_then(|i| self.segment_rect(i, 0.0)) else {
            return;
        };
        let centered = rect.center().x - self.width * 0.5;
        self.set_scroll_offset(centered);
    }

    /// Resolves a tap at `x`, in control coordinates.
    ///
    /// A tap on the selected segment is [`TapOutcome::Reselected`] even when
    /// touch is disabled. Otherwise, if touch is enabled and `x` falls on a
    /// segment, that segment becomes selected (animated per
    /// [`SegmentedControlConfig::animate_user_selection`]).
    pub fn tap(&mut self, x: f64) -> TapOutcome {
        let Some(segment) = self.segment_at(x + self.scroll_offset) else {
            return TapOutcome::Ignored;
        };
        if self.selected == Some(segment) {
            return TapOutcome::Reselected(segment);
        }
        if segment >= self.sections.len() || !self.config.touch_enabled {
            return TapOutcome::Ignored;
        }
        self.set_selected_index(Some(segment), self.config.animate_user_selection);
        tracing::debug!(target: "understory_segmented_control", segment, "segment tapped");
        TapOutcome::Changed(segment)
    }

    fn segment_at(&self, x: f64) -> Option<usize> {
        if x.is_nan() || x < 0.0 {
            return None;
        }
        match self.config.width_style {
            SegmentWidthStyle::Fixed => {
                if self.segment_width <= 0.0 {
                    return None;
                }
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "Truncation of a non-negative ratio is the intended floor"
                )]
                let segment = (x / self.segment_width) as usize;
                Some(segment)
            }
            SegmentWidthStyle::Dynamic => {
                let mut left = x;
                let mut segment = 0;
                for w in &self.segment_widths {
                    left -= w;
                    if left <= 0.0 {
                        break;
                    }
                    segment += 1;
                }
                Some(segment)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::{AttributedTitle, TitleStyle};
    use alloc::vec;

    fn control(style: SegmentWidthStyle, titles: &[&str]) -> SegmentedControl {
        let mut control = SegmentedControl::new(SegmentedControlConfig {
            width_style: style,
            segment_padding: (0.0, 0.0),
            ..SegmentedControlConfig::default()
        });
        control.set_sections(titles.iter().map(|t| Section::titled(*t)).collect());
        control
    }

    #[test]
    fn fixed_taps_split_evenly() {
        let mut control = control(SegmentWidthStyle::Fixed, &["a", "b", "c", "d"]);
        control.layout(400.0, &[]);
        assert_eq!(control.total_width(), 400.0);
        assert_eq!(control.tap(10.0), TapOutcome::Reselected(0));
        assert_eq!(control.tap(250.0), TapOutcome::Changed(2));
        assert_eq!(control.selected_index(), Some(2));
        assert!(control.selection_animated());
        assert_eq!(control.tap(399.0), TapOutcome::Changed(3));
        assert_eq!(control.tap(400.0), TapOutcome::Ignored, "past the last segment");
    }

    #[test]
    fn fixed_width_grows_to_widest_measurement() {
        let mut control = control(SegmentWidthStyle::Fixed, &["a", "b"]);
        control.layout(100.0, &[30.0, 80.0]);
        assert_eq!(control.segment_rect(1, 10.0), Some(Rect::new(80.0, 0.0, 160.0, 10.0)));
        assert_eq!(control.total_width(), 160.0);
    }

    #[test]
    fn dynamic_widths_stretch_to_fill() {
        let mut control = control(SegmentWidthStyle::Dynamic, &["a", "bb", "ccc"]);
        control.layout(120.0, &[10.0, 20.0, 30.0]);
        // 60 spare points, 20 per segment.
        assert_eq!(control.segment_rect(0, 1.0), Some(Rect::new(0.0, 0.0, 30.0, 1.0)));
        assert_eq!(control.segment_rect(2, 1.0), Some(Rect::new(70.0, 0.0, 120.0, 1.0)));
        assert_eq!(control.tap(30.0), TapOutcome::Reselected(0), "boundary belongs to the left");
        assert_eq!(control.tap(31.0), TapOutcome::Changed(1));
        assert_eq!(control.tap(119.0), TapOutcome::Changed(2));
    }

    #[test]
    fn dynamic_without_stretch_keeps_measurements() {
        let mut control = control(SegmentWidthStyle::Dynamic, &["a", "b"]);
        control.config_mut().stretch_segments = false;
        control.config_mut().segment_padding = (5.0, 5.0);
        control.layout(200.0, &[10.0, 20.0]);
        assert_eq!(control.total_width(), 50.0);
        assert_eq!(control.tap(60.0), TapOutcome::Ignored);
    }

    #[test]
    fn programmatic_selection_is_display_only() {
        let mut control = control(SegmentWidthStyle::Fixed, &["a", "b", "c"]);
        control.layout(300.0, &[]);
        control.set_selected_index(Some(1), true);
        assert_eq!(control.selected_index(), Some(1));
        assert!(control.selection_animated());
        control.set_selected_index(Some(1), false);
        assert_eq!(control.selected_index(), Some(1));
        assert!(!control.selection_animated());
        assert_eq!(control.tap(150.0), TapOutcome::Reselected(1));
        control.set_selected_index(None, false);
        assert_eq!(control.selected_index(), None);
        assert_eq!(control.tap(150.0), TapOutcome::Changed(1));
    }

    #[test]
    fn disabled_touch_ignores_changes_but_reports_reselection() {
        let mut control = control(SegmentWidthStyle::Fixed, &["a", "b"]);
        control.config_mut().touch_enabled = false;
        control.layout(100.0, &[]);
        assert_eq!(control.tap(75.0), TapOutcome::Ignored);
        assert_eq!(control.tap(25.0), TapOutcome::Reselected(0));
        assert_eq!(control.selected_index(), Some(0));
    }

    #[test]
    fn overflowing_segments_scroll_to_the_selection() {
        let mut control = control(SegmentWidthStyle::Dynamic, &["a", "b", "c", "d"]);
        control.layout(100.0, &[50.0, 50.0, 50.0, 50.0]);
        assert_eq!(control.total_width(), 200.0);
        control.set_selected_index(Some(2), false);
        // Segment 2 spans 100..150; centering puts its middle at 50.
        assert_eq!(control.scroll_offset(), 75.0);
        control.set_selected_index(Some(3), false);
        assert_eq!(control.scroll_offset(), 100.0, "clamped to the overflow");
        assert_eq!(control.tap(10.0), TapOutcome::Changed(2));
    }

    #[test]
    fn attributed_titles_and_selected_images_win() {
        let mut control = SegmentedControl::default();
        control.set_sections(vec![
            Section {
                title: "plain".into(),
                attributed_title: Some(AttributedTitle::new("Bold", TitleStyle::BOLD)),
                image: Some(ImageId(1)),
                selected_image: Some(ImageId(2)),
            },
            Section {
                image: Some(ImageId(3)),
                ..Section::titled("second")
            },
        ]);
        assert_eq!(control.display_title(0).map(|t| t.text()), Some("Bold"));
        assert_eq!(control.display_title(1), Some(SegmentTitle::Plain("second")));
        assert_eq!(control.display_image(0), Some(ImageId(2)));
        assert_eq!(control.display_image(1), Some(ImageId(3)));
        control.set_selected_index(Some(1), false);
        assert_eq!(control.display_image(0), Some(ImageId(1)));
        assert_eq!(control.display_image(1), Some(ImageId(3)));
        assert_eq!(control.display_title(2), None);
    }

    #[test]
    fn shrinking_sections_drops_stale_selection() {
        let mut control = control(SegmentWidthStyle::Fixed, &["a", "b", "c"]);
        control.set_selected_index(Some(2), false);
        control.set_sections(vec![Section::titled("only")]);
        assert_eq!(control.selected_index(), None);
    }
}
