// Copyright 2026 the Keyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial damage tracking for partial redraws.

use alloc::vec::Vec;

use keyline_core::navigator::NavigatorPin;
use keyline_core::timeline::{Layout, LayoutChanges};
use kurbo::Rect;

/// A region of the view that needs redrawing.
///
/// Hosts that repaint by rectangle can use this to only redraw the rows a
/// layout pass touched.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DamageRegion {
    /// The entire view needs redrawing.
    #[default]
    Full,
    /// A list of rectangles in view space that need redrawing.
    Rects(Vec<Rect>),
    /// Nothing changed; the previous frame can be reused.
    None,
}

impl DamageRegion {
    /// Computes the damage of one layout pass.
    ///
    /// Nodes created or removed, new layout params, and a changed content
    /// size move rows around, so they damage everything. Otherwise the rows
    /// with rebuilt curves are damaged out to the end of the view, along with
    /// the pinned label slots of relabeled rows.
    #[must_use]
    pub fn from_changes(layout: &Layout, changes: &LayoutChanges, pin: NavigatorPin) -> Self {
        if changes.topology_changed || changes.params_changed || changes.content_size_changed {
            return Self::Full;
        }
        let view_width = layout.view_size().width;
        let mut rects = Vec::new();
        for &slot in &changes.curves {
            if let Some(row) = layout.row_at(slot) {
                let f = row.frame;
                rects.push(Rect::new(f.x0, f.y0, f.x1.max(view_width), f.y1));
            }
        }
        for &slot in &changes.labels {
            if let Some(row) = layout.row_at(slot) {
                rects.push(pin.apply(row.label));
            }
        }
        if rects.is_empty() {
            Self::None
        } else {
            Self::Rects(rects)
        }
    }

    /// Returns `true` if no region needs redrawing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the smallest rectangle covering the damage, given the full
    /// view bounds.
    #[must_use]
    pub fn bounds(&self, view: Rect) -> Option<Rect> {
        match self {
            Self::Full => Some(view),
            Self::Rects(rects) => rects.iter().copied().reduce(|a, b| a.union(b)),
            Self::None => None,
        }
    }

    /// Merges another damage region into this one.
    pub fn merge(&mut self, other: &Self) {
        match (&*self, other) {
            (Self::Full, _) | (_, Self::Full) => *self = Self::Full,
            (Self::None, _) => *self = other.clone(),
            (_, Self::None) => {}
            (Self::Rects(a), Self::Rects(b)) => {
                let mut merged = a.clone();
                merged.extend_from_slice(b);
                *self = Self::Rects(merged);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use keyline_core::geometry::TimePoint;
    use keyline_core::timeline::{LayoutParams, Timeline};

    use super::*;

    #[test]
    fn first_pass_is_full() {
        let mut tl = Timeline::new();
        let _ = tl.create_collection(None, "Root");
        let changes = tl.update_layout(&LayoutParams::DEFAULT, false);
        assert_eq!(
            DamageRegion::from_changes(tl.layout(), &changes, NavigatorPin::NONE),
            DamageRegion::Full
        );
    }

    #[test]
    fn keyframe_edit_damages_its_row() {
        let mut tl = Timeline::new();
        let root = tl.create_collection(None, "Root");
        let g = tl.create_group(root, "G");
        let a = tl.create_axis(g, "a");
        let _b = tl.create_axis(g, "b");
        tl.add_point(a, TimePoint::new(4.0, 0.0));
        tl.update_layout(&LayoutParams::DEFAULT, false);

        tl.add_point(a, TimePoint::new(1.0, 1.0));
        let changes = tl.update_layout(&LayoutParams::DEFAULT, false);
        let damage = DamageRegion::from_changes(tl.layout(), &changes, NavigatorPin::NONE);
        let row = tl.layout().row(a).expect("axis row");
        assert_eq!(damage, DamageRegion::Rects(alloc::vec![row.frame]));
    }

    #[test]
    fn long_curve_damage_reaches_its_tail() {
        let mut tl = Timeline::new();
        let root = tl.create_collection(None, "Root");
        let g = tl.create_group(root, "G");
        let a = tl.create_axis(g, "a");
        tl.add_point(a, TimePoint::new(0.0, 0.0));
        tl.add_point(a, TimePoint::new(20.0, 0.0));
        tl.update_layout(&LayoutParams::DEFAULT, false);

        tl.set_point(a, 0, TimePoint::new(0.0, 1.0));
        let changes = tl.update_layout(&LayoutParams::DEFAULT, false);
        let damage = DamageRegion::from_changes(tl.layout(), &changes, NavigatorPin::NONE);
        let row = tl.layout().row(a).expect("axis row");
        assert_eq!(
            damage,
            DamageRegion::Rects(alloc::vec![Rect::new(
                row.frame.x0,
                row.frame.y0,
                1988.0,
                row.frame.y1
            )])
        );
    }

    #[test]
    fn moved_origin_damages_everything() {
        let mut tl = Timeline::new();
        let root = tl.create_collection(None, "Root");
        let g = tl.create_group(root, "G");
        let a = tl.create_axis(g, "a");
        tl.add_point(a, TimePoint::new(2.0, 0.0));
        tl.update_layout(&LayoutParams::DEFAULT, false);

        let shifted = LayoutParams {
            start: kurbo::Point::new(100.0, 0.0),
            ..LayoutParams::DEFAULT
        };
        let changes = tl.update_layout(&shifted, false);
        assert!(
            !changes.topology_changed && !changes.content_size_changed,
            "only the params moved"
        );
        let damage = DamageRegion::from_changes(tl.layout(), &changes, NavigatorPin::NONE);
        assert_eq!(damage, DamageRegion::Full);
    }

    #[test]
    fn quiet_pass_is_empty() {
        let mut tl = Timeline::new();
        let _ = tl.create_collection(None, "Root");
        tl.update_layout(&LayoutParams::DEFAULT, false);
        let changes = tl.update_layout(&LayoutParams::DEFAULT, false);
        let damage = DamageRegion::from_changes(tl.layout(), &changes, NavigatorPin::NONE);
        assert!(damage.is_empty());
        assert_eq!(damage.bounds(Rect::new(0.0, 0.0, 10.0, 10.0)), None);
    }

    #[test]
    fn merge_rules() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 5.0, 30.0, 15.0);
        let mut damage = DamageRegion::None;
        damage.merge(&DamageRegion::Rects(alloc::vec![a]));
        damage.merge(&DamageRegion::Rects(alloc::vec![b]));
        assert_eq!(
            damage.bounds(Rect::ZERO),
            Some(Rect::new(0.0, 0.0, 30.0, 15.0))
        );
        damage.merge(&DamageRegion::Full);
        assert_eq!(damage, DamageRegion::Full);
    }
}
