// Copyright 2026 the Keyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG host adapter.
//!
//! [`SvgPresenter`] implements [`Presenter`] the way a retained-mode toolkit
//! integration would: it owns one persistent element per [`ElementKey`] and
//! only rewrites the elements a layout pass reports as changed. The current
//! element set can be written out as a standalone SVG document at any time.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::io::{self, Write};

use keyline_core::backend::Presenter;
use keyline_core::curve::CurvePart;
use keyline_core::navigator::NavigatorPin;
use keyline_core::timeline::{Layout, LayoutChanges, Row, Timeline};
use keyline_render::{ElementKey, ElementPart, Paint, Rgba, TimelineStyle, parts_for};
use kurbo::{Rect, Size};

/// Counters of the most recent [`Presenter::apply`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApplyStats {
    /// Elements created or rewritten.
    pub written: u32,
    /// Elements released.
    pub released: u32,
}

/// A [`Presenter`] that maintains SVG elements.
#[derive(Debug)]
pub struct SvgPresenter {
    style: TimelineStyle,
    pin: NavigatorPin,
    labels_pin: Option<NavigatorPin>,
    elements: HashMap<ElementKey, String>,
    order: Vec<ElementKey>,
    size: Size,
    stats: ApplyStats,
}

impl SvgPresenter {
    /// Creates a presenter with the given style and no navigator pin.
    #[must_use]
    pub fn new(style: TimelineStyle) -> Self {
        Self {
            style,
            pin: NavigatorPin::NONE,
            labels_pin: None,
            elements: HashMap::new(),
            order: Vec::new(),
            size: Size::ZERO,
            stats: ApplyStats::default(),
        }
    }

    /// Sets the navigator pin.
    ///
    /// The next [`apply`](Presenter::apply) rewrites every label if the pin
    /// differs from the one the labels were last written with.
    pub fn set_pin(&mut self, pin: NavigatorPin) {
        self.pin = pin;
    }

    /// Number of live elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Returns the SVG markup of one element.
    #[must_use]
    pub fn element(&self, key: ElementKey) -> Option<&str> {
        self.elements.get(&key).map(String::as_str)
    }

    /// Counters of the most recent apply.
    #[must_use]
    pub fn stats(&self) -> ApplyStats {
        self.stats
    }

    /// Writes a standalone SVG document with all elements, back to front.
    pub fn write_document(&self, writer: &mut dyn Write) -> io::Result<()> {
        let (w, h) = (self.size.width.ceil(), self.size.height.ceil());
        writeln!(
            writer,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        )?;
        writeln!(
            writer,
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            css_color(self.style.background)
        )?;
        for key in &self.order {
            if let Some(element) = self.elements.get(key) {
                writeln!(writer, "  {element}")?;
            }
        }
        writeln!(writer, "</svg>")
    }

    /// Returns the document as a string.
    #[must_use]
    pub fn to_document(&self) -> String {
        let mut out = Vec::new();
        // Writing to a Vec cannot fail.
        let _ = self.write_document(&mut out);
        String::from_utf8_lossy(&out).into_owned()
    }

    fn write_row(
        &mut self,
        timeline: &Timeline,
        row: &Row,
        color: Option<Rgba>,
        parts: &[ElementPart],
    ) {
        let slot = row.node.index();
        for &part in parts {
            let key = ElementKey::new(slot, part);
            let markup = match (part, &row.curve, color) {
                (ElementPart::Curve(part), Some(curve), Some(color)) => path_element(
                    key,
                    &curve.geometry.part(part).to_svg(),
                    &Paint::for_curve_part(&self.style, part, color),
                ),
                (ElementPart::Curve(_), _, _) => continue,
                (ElementPart::Label, _, _) => label_element(
                    key,
                    timeline.name_at(slot),
                    self.pin.apply(row.label),
                    self.style.label_color,
                ),
            };
            self.elements.insert(key, markup);
            self.stats.written += 1;
        }
    }
}

impl Presenter for SvgPresenter {
    fn apply(&mut self, timeline: &Timeline, layout: &Layout, changes: &LayoutChanges) {
        self.stats = ApplyStats::default();

        // Removals before additions: a recycled slot shows up in both lists.
        for &slot in &changes.removed {
            for key in ElementKey::all_for_slot(slot) {
                if self.elements.remove(&key).is_some() {
                    self.stats.released += 1;
                }
            }
        }

        // Axis colors follow navigator order, so structure changes recolor
        // every axis.
        let recolor = changes.topology_changed;
        let repin = self.labels_pin != Some(self.pin);
        let mut axis_n = 0;
        self.order.clear();
        let mut labels = Vec::with_capacity(layout.rows().len());
        for row in layout.rows() {
            let slot = row.node.index();
            let color = row.curve.as_ref().map(|_| {
                let color = self.style.axis_color(axis_n);
                axis_n += 1;
                color
            });
            let curve_changed = color.is_some()
                && (recolor
                    || changes.curves.contains(&slot)
                    || !self.elements.contains_key(&ElementKey::curve(slot, CurvePart::Spline)));
            let label_changed = repin
                || changes.labels.contains(&slot)
                || !self.elements.contains_key(&ElementKey::label(slot));
            self.write_row(timeline, row, color, parts_for(curve_changed, label_changed));

            if color.is_some() {
                self.order
                    .extend(CurvePart::ALL.map(|part| ElementKey::curve(slot, part)));
            }
            labels.push(ElementKey::label(slot));
        }
        self.order.extend(labels);
        self.labels_pin = Some(self.pin);
        self.size = layout.view_size();
    }
}

fn css_color(c: Rgba) -> String {
    let [r, g, b, _] = c.to_rgba8();
    format!("#{r:02x}{g:02x}{b:02x}")
}

fn paint_attrs(paint: &Paint) -> String {
    let mut attrs = String::new();
    match paint.fill {
        Some(fill) => {
            let _ = write!(attrs, r#" fill="{}""#, css_color(fill));
            if fill.a < 1.0 {
                let _ = write!(attrs, r#" fill-opacity="{}""#, fill.a);
            }
        }
        None => attrs.push_str(r#" fill="none""#),
    }
    if let Some(stroke) = paint.stroke {
        let _ = write!(
            attrs,
            r#" stroke="{}" stroke-width="{}""#,
            css_color(stroke),
            paint.stroke_width
        );
        if stroke.a < 1.0 {
            let _ = write!(attrs, r#" stroke-opacity="{}""#, stroke.a);
        }
    }
    attrs
}

fn element_id(key: ElementKey) -> String {
    match key.part {
        ElementPart::Curve(CurvePart::Spline) => format!("n{}-spline", key.slot),
        ElementPart::Curve(CurvePart::Handles) => format!("n{}-handles", key.slot),
        ElementPart::Curve(CurvePart::HandleTips) => format!("n{}-tips", key.slot),
        ElementPart::Curve(CurvePart::Markers) => format!("n{}-markers", key.slot),
        ElementPart::Label => format!("n{}-label", key.slot),
    }
}

fn path_element(key: ElementKey, data: &str, paint: &Paint) -> String {
    format!(
        r#"<path id="{}" d="{data}"{}/>"#,
        element_id(key),
        paint_attrs(paint)
    )
}

fn label_element(key: ElementKey, text: &str, rect: Rect, color: Rgba) -> String {
    format!(
        r#"<text id="{}" x="{}" y="{}" font-size="12" dominant-baseline="middle" fill="{}">{}</text>"#,
        element_id(key),
        rect.x0,
        rect.center().y,
        css_color(color),
        escape(text)
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
