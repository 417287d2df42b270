// Copyright 2025 the Ridgeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene elements and their presentation attributes.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{BezPath, Point, Rect, Vec2};
use peniko::Brush;

/// Stable identity for an element in a [`crate::Scene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl ElementId {
    /// Creates an id from a raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl core::fmt::Display for ElementId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the anchor point.
    #[default]
    Start,
    /// Text is centered on the anchor point.
    Middle,
    /// Text ends at the anchor point.
    End,
}

/// Unshaped text content.
#[derive(Clone, Debug, PartialEq)]
pub struct TextContent {
    /// Text string.
    pub text: String,
    /// Anchor position in the parent's coordinate space.
    pub pos: Point,
    /// Font size in scene units.
    pub font_size: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical shift in `em` units, applied after `pos`.
    pub dy_em: f64,
}

impl TextContent {
    /// Creates start-anchored text with no vertical shift.
    pub fn new(pos: Point, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pos,
            font_size: 10.0,
            anchor: TextAnchor::Start,
            dy_em: 0.0,
        }
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the horizontal anchor.
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the vertical shift in `em` units.
    pub fn with_dy_em(mut self, dy_em: f64) -> Self {
        self.dy_em = dy_em;
        self
    }
}

/// What an element is.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementKind {
    /// A container whose children are drawn in order.
    Group,
    /// A container whose children are never drawn directly (only referenced).
    Defs,
    /// A container whose children define a visibility mask.
    ClipPath,
    /// An axis-aligned rectangle.
    Rect(Rect),
    /// A Bézier path.
    Path(BezPath),
    /// A reference that re-draws the target element's geometry.
    Use(ElementId),
    /// A text run.
    Text(TextContent),
}

impl ElementKind {
    /// Returns `true` for kinds that may hold children.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Group | Self::Defs | Self::ClipPath)
    }
}

/// A fill or stroke paint.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Paint {
    /// Inherit from the parent (the attribute is not set).
    #[default]
    Inherit,
    /// Explicitly paint nothing.
    None,
    /// Paint with a brush.
    Brush(Brush),
}

impl Paint {
    /// Convenience for a brush paint.
    pub fn brush(brush: impl Into<Brush>) -> Self {
        Self::Brush(brush.into())
    }
}

/// Stroke dash pattern with a single on/off length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dash {
    /// Dash (and gap) length in scene units.
    pub array: f64,
    /// Dash offset in scene units.
    pub offset: f64,
}

/// A node in the scene tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    /// Stable identity.
    pub id: ElementId,
    /// Parent element (`None` only for the root).
    pub parent: Option<ElementId>,
    /// Children in paint order.
    pub children: Vec<ElementId>,
    /// Element kind and geometry.
    pub kind: ElementKind,
    /// Translation applied to this element (and its subtree).
    pub translate: Vec2,
    /// Fill paint.
    pub fill: Paint,
    /// Fill opacity in `[0, 1]`; `None` leaves it unset.
    pub fill_opacity: Option<f64>,
    /// Stroke paint.
    pub stroke: Paint,
    /// Stroke width; `None` leaves it unset.
    pub stroke_width: Option<f64>,
    /// Optional stroke dash pattern.
    pub dash: Option<Dash>,
    /// Optional clip path element masking this element.
    pub clip: Option<ElementId>,
}

impl Element {
    pub(crate) fn new(id: ElementId, parent: Option<ElementId>, kind: ElementKind) -> Self {
        Self {
            id,
            parent,
            children: Vec::new(),
            kind,
            translate: Vec2::ZERO,
            fill: Paint::Inherit,
            fill_opacity: None,
            stroke: Paint::Inherit,
            stroke_width: None,
            dash: None,
            clip: None,
        }
    }

    /// Returns the referenced element for [`ElementKind::Use`].
    pub fn href(&self) -> Option<ElementId> {
        match self.kind {
            ElementKind::Use(target) => Some(target),
            _ => None,
        }
    }
}
