// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segment content: titles, attributed titles, and image handles.

use alloc::string::String;

/// Opaque handle to an image owned by the host's renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u64);

bitflags::bitflags! {
    /// Text styling applied to an [`AttributedTitle`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TitleStyle: u8 {
        /// Bold weight.
        const BOLD = 1 << 0;
        /// Italic slant.
        const ITALIC = 1 << 1;
        /// Underlined.
        const UNDERLINE = 1 << 2;
        /// Struck through.
        const STRIKETHROUGH = 1 << 3;
    }
}

/// A title with styling, shown instead of the plain title when present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributedTitle {
    /// The text.
    pub text: String,
    /// Styling for the whole run.
    pub style: TitleStyle,
}

impl AttributedTitle {
    /// Creates an attributed title.
    pub fn new(text: impl Into<String>, style: TitleStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Content of one segment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Section {
    /// Plain title.
    pub title: String,
    /// Overrides `title` for display when set.
    pub attributed_title: Option<AttributedTitle>,
    /// Image shown while the segment is not selected.
    pub image: Option<ImageId>,
    /// Image shown while the segment is selected; falls back to `image`.
    pub selected_image: Option<ImageId>,
}

impl Section {
    /// A section with only a plain title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// What a segment should display as its title.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentTitle<'a> {
    /// The plain title.
    Plain(&'a str),
    /// The attributed override.
    Attributed(&'a AttributedTitle),
}

impl<'a> SegmentTitle<'a> {
    /// The text regardless of styling.
    #[must_use]
    pub fn text(&self) -> &'a str {
        match *self {
            Self::Plain(text) => text,
            Self::Attributed(title) => &title.text,
        }
    }
}
