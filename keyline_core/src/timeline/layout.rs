// Copyright 2026 the Keyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout passes and change tracking.
//!
//! A pass walks the hierarchy in pre-order and assigns every node one
//! navigator row:
//!
//! 1. **Collection**: padding above, a label indented by
//!    `level * indent + padding`, then the label height and padding again.
//! 2. **Groups** of that collection, in order: a group label, then one
//!    `row_height` row per axis, with the axis curve geometry rebuilt at that
//!    row.
//! 3. **Child collections**, in order, at `level + 1`.
//!
//! Dirty channels are drained at the start of the pass. Curve geometry is
//! only rebuilt for axes whose keyframes changed or whose mapping moved; the
//! rest is carried over from the previous [`Layout`]. The result is reported
//! as [`LayoutChanges`], using raw slot indices like the `*_at()` accessors
//! on [`Timeline`].

use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use super::id::{INVALID, NodeId, NodeKind};
use super::store::Timeline;
use crate::curve::{AxisGeometry, MarkerRadii};
use crate::dirty;
use crate::mapping::CurveMapping;
#[cfg(feature = "trace-rich")]
use crate::trace::RowPlacement;
use crate::trace::{LayoutBeginEvent, LayoutEndEvent, Tracer};

/// Fixed navigator metrics, in view units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutMetrics {
    /// Space above and below a collection label, and the base label indent.
    pub padding: f64,
    /// Extra label indent per nesting level.
    pub indent: f64,
    /// Height of a collection label.
    pub label_height: f64,
    /// Height of a group label row.
    pub group_label_height: f64,
    /// Width of the navigator label slot left of the curves.
    pub navigator_width: f64,
    /// Radius of the sample marker circles.
    pub marker_radius: f64,
    /// Radius of the handle tip circles.
    pub tip_radius: f64,
}

impl LayoutMetrics {
    /// The stock navigator metrics.
    pub const DEFAULT: Self = Self {
        padding: 8.0,
        indent: 24.0,
        label_height: 20.0,
        group_label_height: 20.0,
        navigator_width: 180.0,
        marker_radius: MarkerRadii::DEFAULT.marker,
        tip_radius: MarkerRadii::DEFAULT.tip,
    };

    /// Returns the circle radii used by the curve builder.
    #[inline]
    #[must_use]
    pub const fn radii(&self) -> MarkerRadii {
        MarkerRadii {
            marker: self.marker_radius,
            tip: self.tip_radius,
        }
    }
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Inputs of a layout pass.
///
/// Any change to these between two passes counts as an invalidation, so
/// [`Timeline::layout_if_needed`] runs a pass for it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
    /// Top-left corner of the first row.
    pub start: Point,
    /// Width of every row.
    pub row_width: f64,
    /// Height of every axis row.
    pub row_height: f64,
    /// View units per unit of time.
    pub scale_x: f64,
    /// View units per unit of value.
    pub scale_y: f64,
    /// Navigator metrics.
    pub metrics: LayoutMetrics,
}

impl LayoutParams {
    /// The stock layout inputs.
    pub const DEFAULT: Self = Self {
        start: Point::ZERO,
        row_width: 800.0,
        row_height: 120.0,
        scale_x: 90.0,
        scale_y: 50.0,
        metrics: LayoutMetrics::DEFAULT,
    };

    /// View x of time 0 on every axis row.
    #[must_use]
    pub fn curve_origin_x(&self) -> f64 {
        self.start.x + self.metrics.navigator_width + self.metrics.padding
    }

    /// Returns a horizontal scale that fits `max_time` into `width`, leaving
    /// `margin` on both sides.
    ///
    /// Degenerate time ranges (zero, negative, or smaller than `1e-5`) fall
    /// back to a scale of `1.0`.
    #[must_use]
    pub fn fit_scale_x(width: f64, margin: f64, max_time: f64) -> f64 {
        if max_time > 1e-5 {
            (width - margin - margin) / max_time
        } else {
            1.0
        }
    }
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Curve placement and geometry of an axis row.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisCurve {
    /// Logical to view mapping of this row.
    pub mapping: CurveMapping,
    /// The four paths of the axis.
    pub geometry: AxisGeometry,
}

/// One navigator row.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    /// The node this row belongs to.
    pub node: NodeId,
    /// What kind of node it is.
    pub kind: NodeKind,
    /// Nesting level of the owning collection.
    pub level: u16,
    /// Full-width band covered by the row.
    pub frame: Rect,
    /// Label slot inside the navigator, before pinning.
    pub label: Rect,
    /// Curve data, present on axis rows only.
    pub curve: Option<AxisCurve>,
}

/// The result of the latest layout pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    rows: Vec<Row>,
    row_of_slot: Vec<u32>,
    content_size: Size,
    view_size: Size,
    pass_index: u64,
}

impl Layout {
    /// Rows in navigator order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Width (`scale_x * max_time`) and height (largest `y` reached) of the
    /// laid out content.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Extent of everything the layout draws, from the view origin.
    ///
    /// The width covers the row bands and the curves up to the latest
    /// keyframe (`curve_origin_x + content width`), whichever reaches
    /// further. This is the size of the scrollable view.
    #[must_use]
    pub fn view_size(&self) -> Size {
        self.view_size
    }

    /// Index of the pass that produced this layout (0 before the first
    /// pass).
    #[must_use]
    pub fn pass_index(&self) -> u64 {
        self.pass_index
    }

    /// Returns the row of the node at raw slot `idx`, if it was laid out.
    #[must_use]
    pub fn row_at(&self, idx: u32) -> Option<&Row> {
        let row = *self.row_of_slot.get(idx as usize)?;
        (row != INVALID).then(|| &self.rows[row as usize])
    }

    /// Returns the row of a node, if it was laid out.
    ///
    /// Unlike [`row_at`](Self::row_at), a recycled slot does not match an
    /// old handle.
    #[must_use]
    pub fn row(&self, node: impl Into<NodeId>) -> Option<&Row> {
        let node = node.into();
        self.row_at(node.idx).filter(|row| row.node == node)
    }

    /// Iterates over the axis rows in navigator order.
    pub fn axis_rows(&self) -> impl Iterator<Item = (&Row, &AxisCurve)> {
        self.rows
            .iter()
            .filter_map(|row| row.curve.as_ref().map(|curve| (row, curve)))
    }
}

/// The set of changes produced by a single layout pass.
///
/// Index lists hold raw slot indices. `curves` and `labels` are in navigator
/// order; `added` and `removed` are in mutation order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutChanges {
    /// Axes whose curve geometry was rebuilt.
    pub curves: Vec<u32>,
    /// Nodes whose label text or label slot changed.
    pub labels: Vec<u32>,
    /// Nodes added since the previous pass.
    pub added: Vec<u32>,
    /// Nodes removed since the previous pass.
    pub removed: Vec<u32>,
    /// Whether nodes were created or removed.
    pub topology_changed: bool,
    /// Whether the pass ran with different [`LayoutParams`] than the
    /// previous one, which may move every row.
    pub params_changed: bool,
    /// Content size after the pass.
    pub content_size: Size,
    /// Whether the content size differs from the previous pass.
    pub content_size_changed: bool,
    /// Whether the host asked for an animated transition.
    pub animated: bool,
}

impl LayoutChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.curves.clear();
        self.labels.clear();
        self.added.clear();
        self.removed.clear();
        self.topology_changed = false;
        self.params_changed = false;
        self.content_size = Size::ZERO;
        self.content_size_changed = false;
        self.animated = false;
    }

    /// Returns whether the pass changed nothing a presenter would see.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
            && self.labels.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
            && !self.topology_changed
            && !self.params_changed
            && !self.content_size_changed
    }
}

/// What a previous pass produced for one slot.
struct PreviousRow {
    node: NodeId,
    label: Rect,
    curve: Option<AxisCurve>,
}

/// Scratch state of one pass.
struct Pass<'a> {
    params: &'a LayoutParams,
    rebuild_all: bool,
    previous: Vec<Option<PreviousRow>>,
    keyframes_dirty: Vec<bool>,
    label_dirty: Vec<bool>,
    rows: Vec<Row>,
    curves: Vec<u32>,
    labels: Vec<u32>,
}

impl Pass<'_> {
    fn push(&mut self, row: Row) {
        let idx = row.node.idx as usize;
        let label_changed = self.label_dirty[idx]
            || !matches!(
                &self.previous[idx],
                Some(prev) if prev.node == row.node && prev.label == row.label
            );
        if label_changed {
            self.labels.push(row.node.idx);
        }
        self.rows.push(row);
    }

    /// Returns the previous geometry of an axis when it can be reused as is.
    fn reusable_curve(&mut self, node: NodeId, mapping: &CurveMapping) -> Option<AxisCurve> {
        let idx = node.idx as usize;
        if self.rebuild_all || self.keyframes_dirty[idx] {
            return None;
        }
        let prev = self.previous[idx].as_mut()?;
        if prev.node != node {
            return None;
        }
        prev.curve.take().filter(|curve| curve.mapping == *mapping)
    }
}

impl Timeline {
    /// Runs a layout pass and returns what changed.
    ///
    /// `animated` is passed through to [`LayoutChanges::animated`] so the
    /// presenter can transition paths instead of replacing them.
    pub fn update_layout(&mut self, params: &LayoutParams, animated: bool) -> LayoutChanges {
        self.update_layout_traced(params, animated, &mut Tracer::none())
    }

    /// Like [`update_layout`](Self::update_layout), with trace events.
    pub fn update_layout_traced(
        &mut self,
        params: &LayoutParams,
        animated: bool,
        tracer: &mut Tracer<'_>,
    ) -> LayoutChanges {
        let mut changes = LayoutChanges::default();
        self.update_layout_into(params, animated, tracer, &mut changes);
        changes
    }

    /// Runs a pass only when the model was mutated or `params` differ from
    /// the previous pass.
    pub fn layout_if_needed(
        &mut self,
        params: &LayoutParams,
        animated: bool,
    ) -> Option<LayoutChanges> {
        let params_changed = self.last_params.as_ref() != Some(params);
        (self.layout_dirty || params_changed).then(|| self.update_layout(params, animated))
    }

    /// Returns the result of the latest pass.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Like [`update_layout_traced`](Self::update_layout_traced), but reuses
    /// a caller-provided buffer.
    pub fn update_layout_into(
        &mut self,
        params: &LayoutParams,
        animated: bool,
        tracer: &mut Tracer<'_>,
        changes: &mut LayoutChanges,
    ) {
        changes.clear();
        self.pass_index += 1;
        let pass_index = self.pass_index;
        let params_changed = self.last_params.as_ref() != Some(params);

        tracer.layout_begin(&LayoutBeginEvent {
            pass_index,
            model_dirty: self.layout_dirty,
            params_changed,
            animated,
        });

        // Drain channels.
        let len = self.len as usize;
        let mut keyframes_dirty = vec![false; len];
        for idx in self.dirty.drain(dirty::KEYFRAMES).deterministic().run() {
            keyframes_dirty[idx as usize] = true;
        }
        let mut label_dirty = vec![false; len];
        for idx in self.dirty.drain(dirty::LABEL).deterministic().run() {
            label_dirty[idx as usize] = true;
        }
        // Structural changes are picked up by the full walk below.
        let _: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();
        changes.topology_changed = core::mem::take(&mut self.topology_dirty);
        changes.params_changed = params_changed;

        let old = core::mem::take(&mut self.layout);
        let mut previous: Vec<Option<PreviousRow>> = Vec::new();
        previous.resize_with(len, || None);
        for row in old.rows {
            // Rows of slots freed since the previous pass may be out of range.
            if let Some(slot) = previous.get_mut(row.node.idx as usize) {
                *slot = Some(PreviousRow {
                    node: row.node,
                    label: row.label,
                    curve: row.curve,
                });
            }
        }

        let mut pass = Pass {
            params,
            rebuild_all: params_changed,
            previous,
            keyframes_dirty,
            label_dirty,
            rows: Vec::with_capacity(self.node_count()),
            curves: Vec::new(),
            labels: Vec::new(),
        };

        let mut y = params.start.y;
        for &root in &self.roots {
            y = self.place_collection(&mut pass, root, 0, y);
        }

        let content_size = Size::new(params.scale_x * self.max_time(), y);
        let curves_end = params.curve_origin_x() + content_size.width;
        let view_size = Size::new(curves_end.max(params.start.x + params.row_width), y);
        let mut row_of_slot = vec![INVALID; len];
        for (i, row) in pass.rows.iter().enumerate() {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "row count is bounded by the u32 slot space"
            )]
            let i = i as u32;
            row_of_slot[row.node.idx as usize] = i;
        }

        changes.curves = pass.curves;
        changes.labels = pass.labels;
        changes.content_size = content_size;
        changes.content_size_changed = old.pass_index == 0 || old.content_size != content_size;
        changes.animated = animated;
        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);

        self.layout = Layout {
            rows: pass.rows,
            row_of_slot,
            content_size,
            view_size,
            pass_index,
        };
        self.last_params = Some(*params);
        self.layout_dirty = false;

        #[cfg(feature = "trace-rich")]
        if tracer.is_active() {
            let placements: Vec<RowPlacement> = self
                .layout
                .rows
                .iter()
                .map(|row| RowPlacement {
                    node_index: row.node.idx,
                    kind: row.kind,
                    level: row.level,
                    y: row.frame.y0,
                    height: row.frame.height(),
                })
                .collect();
            tracer.row_placements(pass_index, &placements);
            tracer.curves_changed(pass_index, &changes.curves);
        }

        if tracer.is_active() {
            tracer.layout_end(&LayoutEndEvent {
                pass_index,
                rows: count(self.layout.rows.len()),
                axes: count(self.layout.axis_rows().count()),
                content_width: content_size.width,
                content_height: content_size.height,
                curves_changed: count(changes.curves.len()),
                added: count(changes.added.len()),
                removed: count(changes.removed.len()),
            });
        }
    }

    fn place_collection(&self, pass: &mut Pass<'_>, idx: u32, level: u16, mut y: f64) -> f64 {
        let params = pass.params;
        let m = &params.metrics;
        let top = y;
        y += m.padding;
        let label = label_rect(params, level_indent(m, level), y, m.label_height);
        y += m.label_height + m.padding;
        pass.push(Row {
            node: self.node_at(idx),
            kind: NodeKind::Collection,
            level,
            frame: Rect::new(params.start.x, top, params.start.x + params.row_width, y),
            label,
            curve: None,
        });

        // Groups first, then child collections, each in insertion order.
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            if self.kind[child as usize] == NodeKind::Group {
                y = self.place_group(pass, child, level, y);
            }
            child = self.next_sibling[child as usize];
        }
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            if self.kind[child as usize] == NodeKind::Collection {
                y = self.place_collection(pass, child, level.saturating_add(1), y);
            }
            child = self.next_sibling[child as usize];
        }
        y
    }

    fn place_group(&self, pass: &mut Pass<'_>, idx: u32, level: u16, mut y: f64) -> f64 {
        let params = pass.params;
        let m = &params.metrics;
        let indent = level_indent(m, level) + m.indent;
        let height = m.group_label_height;
        pass.push(Row {
            node: self.node_at(idx),
            kind: NodeKind::Group,
            level,
            frame: Rect::new(
                params.start.x,
                y,
                params.start.x + params.row_width,
                y + height,
            ),
            label: label_rect(params, indent, y, height),
            curve: None,
        });
        y += height;

        let mut axis = self.first_child[idx as usize];
        while axis != INVALID {
            y = self.place_axis(pass, axis, level, y);
            axis = self.next_sibling[axis as usize];
        }
        y
    }

    fn place_axis(&self, pass: &mut Pass<'_>, idx: u32, level: u16, y: f64) -> f64 {
        let params = pass.params;
        let m = &params.metrics;
        let node = self.node_at(idx);
        let mapping = CurveMapping::new(
            Point::new(params.curve_origin_x(), y + params.row_height * 0.5),
            params.scale_x,
            params.scale_y,
        );
        let curve = match pass.reusable_curve(node, &mapping) {
            Some(curve) => curve,
            None => {
                pass.curves.push(idx);
                let keyframes = &self.keyframes[idx as usize];
                AxisCurve {
                    geometry: AxisGeometry::build(keyframes, &mapping, m.radii()),
                    mapping,
                }
            }
        };
        let indent = level_indent(m, level) + m.indent + m.indent;
        pass.push(Row {
            node,
            kind: NodeKind::Axis,
            level,
            frame: Rect::new(
                params.start.x,
                y,
                params.start.x + params.row_width,
                y + params.row_height,
            ),
            label: label_rect(params, indent, y, params.row_height),
            curve: Some(curve),
        });
        y + params.row_height
    }
}

/// Label slot from `indent` to the navigator's right edge.
fn label_rect(params: &LayoutParams, indent: f64, y: f64, height: f64) -> Rect {
    let x0 = params.start.x + indent;
    let x1 = (params.start.x + params.metrics.navigator_width).max(x0);
    Rect::new(x0, y, x1, y + height)
}

fn level_indent(m: &LayoutMetrics, level: u16) -> f64 {
    f64::from(level) * m.indent + m.padding
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use core::cell::Cell;

    use super::*;
    use crate::geometry::TimePoint;
    use crate::timeline::{AxisId, CollectionId};

    struct Sample {
        root: CollectionId,
        child: CollectionId,
        a: AxisId,
        b: AxisId,
        c: AxisId,
    }

    /// `Root{G1[a, b], Child{G2[c]}}`, each axis with two keyframes.
    fn sample(tl: &mut Timeline) -> Sample {
        let root = tl.create_collection(None, "Root");
        let g1 = tl.create_group(root, "G1");
        let a = tl.create_axis(g1, "a");
        let b = tl.create_axis(g1, "b");
        let child = tl.create_collection(Some(root), "Child");
        let g2 = tl.create_group(child, "G2");
        let c = tl.create_axis(g2, "c");
        for axis in [a, b, c] {
            tl.add_point(axis, TimePoint::new(0.0, 0.0));
            tl.add_point(axis, TimePoint::new(2.0, 1.0));
        }
        Sample {
            root,
            child,
            a,
            b,
            c,
        }
    }

    fn names(tl: &Timeline) -> Vec<&str> {
        tl.layout()
            .rows()
            .iter()
            .map(|row| tl.name(row.node))
            .collect()
    }

    #[test]
    fn rows_follow_pre_order() {
        let mut tl = Timeline::new();
        let _ = sample(&mut tl);
        tl.update_layout(&LayoutParams::DEFAULT, false);
        assert_eq!(names(&tl), ["Root", "G1", "a", "b", "Child", "G2", "c"]);
    }

    #[test]
    fn groups_precede_child_collections_regardless_of_creation_order() {
        let mut tl = Timeline::new();
        let root = tl.create_collection(None, "Root");
        let _ = tl.create_collection(Some(root), "Child");
        let g = tl.create_group(root, "G");
        let _ = tl.create_axis(g, "a");
        tl.update_layout(&LayoutParams::DEFAULT, false);
        assert_eq!(names(&tl), ["Root", "G", "a", "Child"]);
    }

    #[test]
    fn vertical_positions_and_content_size() {
        let mut tl = Timeline::new();
        let s = sample(&mut tl);
        let params = LayoutParams {
            start: Point::new(0.0, 10.0),
            row_width: 500.0,
            row_height: 40.0,
            scale_x: 30.0,
            scale_y: 10.0,
            metrics: LayoutMetrics::DEFAULT,
        };
        let changes = tl.update_layout(&params, false);
        let layout = tl.layout();

        // Root: 10 + 8 padding, label 20, padding 8.
        let root = layout.row(s.root).expect("root row");
        assert_eq!(root.label.y0, 18.0);
        assert_eq!(root.label.x0, 8.0);
        assert_eq!(root.frame.y1, 46.0);
        // G1 label 46..66, a 66..106, b 106..146.
        let a = layout.row(s.a).expect("a row");
        assert_eq!(a.frame.y0, 66.0);
        assert_eq!(a.frame.width(), 500.0);
        let b = layout.row(s.b).expect("b row");
        assert_eq!(b.frame.y0, 106.0);
        // Child at level 1: 146 + 8.
        let child = layout.row(s.child).expect("child row");
        assert_eq!(child.level, 1);
        assert_eq!(child.label.y0, 154.0);
        assert_eq!(child.label.x0, 32.0);
        // Child label ends at 182, G2 182..202, c 202..242.
        let c = layout.row(s.c).expect("c row");
        assert_eq!(c.frame.y0, 202.0);

        assert_eq!(layout.content_size(), Size::new(60.0, 242.0));
        assert_eq!(changes.content_size, layout.content_size());
        assert!(changes.content_size_changed);
    }

    #[test]
    fn axis_curves_are_mapped_into_their_row() {
        let mut tl = Timeline::new();
        let s = sample(&mut tl);
        tl.update_layout(&LayoutParams::DEFAULT, false);
        let row = tl.layout().row(s.b).expect("b row");
        let curve = row.curve.as_ref().expect("axis curve");
        let m = LayoutMetrics::DEFAULT;
        assert_eq!(
            curve.mapping.offset,
            Point::new(m.navigator_width + m.padding, row.frame.center().y)
        );
        assert_eq!(
            curve.geometry,
            AxisGeometry::build(tl.keyframes(s.b), &curve.mapping, m.radii())
        );
    }

    #[test]
    fn second_pass_is_identical_and_quiet() {
        let mut tl = Timeline::new();
        let _ = sample(&mut tl);
        let first = tl.update_layout(&LayoutParams::DEFAULT, false);
        assert_eq!(first.curves.len(), 3);
        assert_eq!(first.added.len(), 7);
        let snapshot = tl.layout().clone();

        let second = tl.update_layout(&LayoutParams::DEFAULT, false);
        assert_eq!(tl.layout().rows(), snapshot.rows());
        assert_eq!(tl.layout().content_size(), snapshot.content_size());
        assert!(second.is_empty(), "unexpected changes: {second:?}");
    }

    #[test]
    fn keyframe_edit_rebuilds_only_that_axis() {
        let mut tl = Timeline::new();
        let s = sample(&mut tl);
        tl.update_layout(&LayoutParams::DEFAULT, false);

        tl.add_point(s.b, TimePoint::new(1.0, -1.0));
        let changes = tl.update_layout(&LayoutParams::DEFAULT, true);
        assert_eq!(changes.curves, [s.b.index()]);
        assert!(changes.animated);
        assert!(!changes.topology_changed);
    }

    #[test]
    fn params_change_rebuilds_everything() {
        let mut tl = Timeline::new();
        let _ = sample(&mut tl);
        let params = LayoutParams::DEFAULT;
        tl.update_layout(&params, false);
        assert!(tl.layout_if_needed(&params, false).is_none());

        let zoomed = LayoutParams {
            scale_x: params.scale_x * 2.0,
            ..params
        };
        let changes = tl.layout_if_needed(&zoomed, false).expect("params changed");
        assert_eq!(changes.curves.len(), 3);
        assert!(changes.content_size_changed);
        assert!(changes.params_changed, "scale changed");

        let quiet = tl.update_layout(&zoomed, false);
        assert!(!quiet.params_changed, "same params as last pass");
    }

    #[test]
    fn origin_shift_reports_params_change() {
        let mut tl = Timeline::new();
        let _ = sample(&mut tl);
        let params = LayoutParams::DEFAULT;
        tl.update_layout(&params, false);

        let shifted = LayoutParams {
            start: Point::new(100.0, 0.0),
            ..params
        };
        let changes = tl.update_layout(&shifted, false);
        assert!(changes.params_changed, "start moved");
        assert!(!changes.content_size_changed);
        assert!(!changes.is_empty());
        assert_eq!(tl.layout().rows()[0].frame.x0, 100.0);
    }

    #[test]
    fn view_size_covers_long_curves() {
        let mut tl = Timeline::new();
        let s = sample(&mut tl);
        tl.add_point(s.a, TimePoint::new(20.0, 0.0));
        let params = LayoutParams::DEFAULT;
        tl.update_layout(&params, false);

        let layout = tl.layout();
        assert_eq!(layout.content_size().width, 1800.0);
        // navigator 180 + padding 8 + 20 s at 90 per second.
        assert_eq!(layout.view_size().width, 1988.0);
        assert_eq!(layout.view_size().height, layout.content_size().height);
    }

    #[test]
    fn short_timeline_view_spans_rows() {
        let mut tl = Timeline::new();
        let _ = sample(&mut tl);
        let params = LayoutParams::DEFAULT;
        tl.update_layout(&params, false);
        assert_eq!(tl.layout().view_size().width, params.row_width);
    }

    #[test]
    fn layout_if_needed_runs_after_mutation() {
        let mut tl = Timeline::new();
        let s = sample(&mut tl);
        let params = LayoutParams::DEFAULT;
        assert!(tl.layout_if_needed(&params, false).is_some());
        assert!(!tl.needs_layout());
        tl.set_name(s.a, "alpha");
        assert!(tl.needs_layout());
        let changes = tl.layout_if_needed(&params, false).expect("mutated");
        assert_eq!(changes.labels, [s.a.index()]);
        assert!(changes.curves.is_empty());
    }

    #[test]
    fn one_request_per_dirty_period() {
        let count = Rc::new(Cell::new(0_u32));
        let seen = Rc::clone(&count);
        let mut tl = Timeline::new();
        tl.set_invalidator(Box::new(move || seen.set(seen.get() + 1)));

        let s = sample(&mut tl);
        assert_eq!(count.get(), 1);
        tl.update_layout(&LayoutParams::DEFAULT, false);

        for i in 0..5 {
            tl.add_point(s.c, TimePoint::new(f64::from(i) + 3.0, 0.0));
        }
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn removal_reports_subtree_and_shrinks_width() {
        let mut tl = Timeline::new();
        let s = sample(&mut tl);
        tl.add_point(s.c, TimePoint::new(10.0, 0.0));
        let params = LayoutParams::DEFAULT;
        tl.update_layout(&params, false);
        assert_eq!(tl.layout().content_size().width, params.scale_x * 10.0);

        tl.remove_collection(s.child);
        let changes = tl.update_layout(&params, false);
        assert_eq!(changes.removed.len(), 3);
        assert!(changes.removed.contains(&s.c.index()));
        assert!(changes.topology_changed);
        assert_eq!(tl.layout().content_size().width, params.scale_x * 2.0);
        assert!(tl.layout().row(s.c).is_none());
        assert_eq!(names(&tl), ["Root", "G1", "a", "b"]);
    }

    #[test]
    fn clear_reports_each_slot_once() {
        let mut tl = Timeline::new();
        let _ = sample(&mut tl);
        let params = LayoutParams::DEFAULT;
        tl.update_layout(&params, false);
        let mut before: Vec<u32> = tl.layout().rows().iter().map(|r| r.node.index()).collect();
        before.sort_unstable();

        tl.clear();
        let changes = tl.update_layout(&params, false);
        let mut removed = changes.removed.clone();
        removed.sort_unstable();
        assert_eq!(removed, before, "every slot exactly once");
        assert!(changes.topology_changed);
        assert!(changes.curves.is_empty());
        assert!(tl.layout().rows().is_empty());
        assert_eq!(tl.node_count(), 0);
    }

    #[test]
    fn recycled_slot_is_laid_out_fresh() {
        let mut tl = Timeline::new();
        let s = sample(&mut tl);
        tl.update_layout(&LayoutParams::DEFAULT, false);

        let g = tl.axis_group(s.a);
        tl.remove_axis(s.a);
        let a2 = tl.create_axis(g, "a2");
        assert_eq!(a2.index(), s.a.index());
        let changes = tl.update_layout(&LayoutParams::DEFAULT, false);
        assert!(changes.curves.contains(&a2.index()));
        assert!(changes.removed.contains(&s.a.index()));
        assert!(changes.added.contains(&a2.index()));
        assert!(tl.layout().row(s.a).is_none());
        assert!(tl.layout().row(a2).is_some());
    }

    #[test]
    fn empty_timeline_has_empty_layout() {
        let mut tl = Timeline::new();
        let params = LayoutParams {
            start: Point::new(5.0, 7.0),
            ..LayoutParams::DEFAULT
        };
        tl.update_layout(&params, false);
        assert!(tl.layout().rows().is_empty());
        assert_eq!(tl.layout().content_size(), Size::new(0.0, 7.0));
    }

    #[test]
    fn fit_scale_falls_back_for_degenerate_range() {
        assert_eq!(LayoutParams::fit_scale_x(240.0, 20.0, 4.0), 50.0);
        assert_eq!(LayoutParams::fit_scale_x(240.0, 20.0, 0.0), 1.0);
    }
}
