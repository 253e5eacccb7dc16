// Copyright 2026 the Keyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render plan: an ordered sequence of visual elements for one layout.

use alloc::string::String;
use alloc::vec::Vec;

use keyline_core::curve::CurvePart;
use keyline_core::navigator::NavigatorPin;
use keyline_core::timeline::{Layout, Timeline};
use kurbo::{BezPath, Rect, Size};

use crate::element::{ElementKey, ElementPart};
use crate::style::{Rgba, TimelineStyle};

/// Stroke and fill of a path element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    /// Stroke color, or `None` for no stroke.
    pub stroke: Option<Rgba>,
    /// Stroke width in view units.
    pub stroke_width: f64,
    /// Fill color, or `None` for no fill.
    pub fill: Option<Rgba>,
}

impl Paint {
    /// Stroke only.
    #[must_use]
    pub const fn stroke(color: Rgba, width: f64) -> Self {
        Self {
            stroke: Some(color),
            stroke_width: width,
            fill: None,
        }
    }

    /// Stroke and fill.
    #[must_use]
    pub const fn stroke_and_fill(stroke: Rgba, width: f64, fill: Rgba) -> Self {
        Self {
            stroke: Some(stroke),
            stroke_width: width,
            fill: Some(fill),
        }
    }

    /// Paint of one curve part of an axis drawn in `axis_color`.
    #[must_use]
    pub fn for_curve_part(style: &TimelineStyle, part: CurvePart, axis_color: Rgba) -> Self {
        match part {
            CurvePart::Spline => Self::stroke(axis_color, style.curve_width),
            CurvePart::Handles => Self::stroke(style.handle_color, style.handle_width),
            CurvePart::HandleTips => {
                Self::stroke_and_fill(style.handle_color, style.handle_width, style.tip_fill)
            }
            CurvePart::Markers => Self::stroke_and_fill(
                axis_color,
                style.marker_outline_width,
                style.marker_fill,
            ),
        }
    }
}

/// What a render item draws.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderContent {
    /// A stroked and/or filled path.
    Path {
        /// Geometry in view space.
        path: BezPath,
        /// Stroke and fill.
        paint: Paint,
    },
    /// A navigator label.
    Label {
        /// Display name of the node.
        text: String,
        /// Label slot after navigator pinning.
        rect: Rect,
        /// Text color.
        color: Rgba,
    },
}

/// One persistent visual element of the plan.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderItem {
    /// Stable identity of the element.
    pub key: ElementKey,
    /// What to draw.
    pub content: RenderContent,
}

/// An ordered list of visual elements for one layout.
///
/// Items are back to front: for every axis row in navigator order the
/// spline, handle lines, handle tips, and markers, followed by the labels of
/// all rows, so the pinned navigator stays above the curves.
#[derive(Clone, Debug, Default)]
pub struct RenderPlan {
    /// Scrollable extent of the layout: navigator, rows, and curves.
    pub content_size: Size,
    /// Background color.
    pub background: Option<Rgba>,
    /// Items in back-to-front order.
    pub items: Vec<RenderItem>,
}

impl RenderPlan {
    /// Creates an empty render plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the plan for the latest `layout` of `timeline`.
    #[must_use]
    pub fn build(
        timeline: &Timeline,
        layout: &Layout,
        style: &TimelineStyle,
        pin: NavigatorPin,
    ) -> Self {
        let mut plan = Self::new();
        plan.build_into(timeline, layout, style, pin);
        plan
    }

    /// Like [`build`](Self::build), but reuses the plan's buffer.
    pub fn build_into(
        &mut self,
        timeline: &Timeline,
        layout: &Layout,
        style: &TimelineStyle,
        pin: NavigatorPin,
    ) {
        self.clear();
        self.background = Some(style.background);

        for (n, (row, curve)) in layout.axis_rows().enumerate() {
            let color = style.axis_color(n);
            let slot = row.node.index();
            for part in CurvePart::ALL {
                self.items.push(RenderItem {
                    key: ElementKey::curve(slot, part),
                    content: RenderContent::Path {
                        path: curve.geometry.part(part).clone(),
                        paint: Paint::for_curve_part(style, part, color),
                    },
                });
            }
        }

        for row in layout.rows() {
            let slot = row.node.index();
            self.items.push(RenderItem {
                key: ElementKey::label(slot),
                content: RenderContent::Label {
                    text: String::from(timeline.name_at(slot)),
                    rect: pin.apply(row.label),
                    color: style.label_color,
                },
            });
        }

        self.content_size = layout.view_size();
    }

    /// Clears the plan for reuse.
    pub fn clear(&mut self) {
        self.items.clear();
        self.background = None;
        self.content_size = Size::ZERO;
    }

    /// Returns the item with the given key.
    #[must_use]
    pub fn item(&self, key: ElementKey) -> Option<&RenderItem> {
        self.items.iter().find(|item| item.key == key)
    }

    /// Iterates over the path items.
    pub fn paths(&self) -> impl Iterator<Item = (ElementKey, &BezPath, &Paint)> {
        self.items.iter().filter_map(|item| match &item.content {
            RenderContent::Path { path, paint } => Some((item.key, path, paint)),
            RenderContent::Label { .. } => None,
        })
    }

    /// Iterates over the label items.
    pub fn labels(&self) -> impl Iterator<Item = (ElementKey, &str, Rect)> {
        self.items.iter().filter_map(|item| match &item.content {
            RenderContent::Label { text, rect, .. } => Some((item.key, text.as_str(), *rect)),
            RenderContent::Path { .. } => None,
        })
    }
}

/// Returns the parts that change when a node's label changed or its curve was
/// rebuilt, for presenters that update elements one by one.
#[must_use]
pub fn parts_for(curve_changed: bool, label_changed: bool) -> &'static [ElementPart] {
    const CURVES: [ElementPart; 4] = [
        ElementPart::Curve(CurvePart::Spline),
        ElementPart::Curve(CurvePart::Handles),
        ElementPart::Curve(CurvePart::HandleTips),
        ElementPart::Curve(CurvePart::Markers),
    ];
    match (curve_changed, label_changed) {
        (true, true) => &ElementPart::ALL,
        (true, false) => &CURVES,
        (false, true) => &[ElementPart::Label],
        (false, false) => &[],
    }
}
