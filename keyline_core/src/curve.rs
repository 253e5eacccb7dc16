// Copyright 2026 the Keyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renderable geometry for one axis.
//!
//! An axis produces four independent paths, one per visual element:
//!
//! | part | content | minimum keyframes |
//! |---|---|---|
//! | [`spline`](AxisGeometry::spline) | one cubic Bézier chain through every sample | 2 |
//! | [`handles`](AxisGeometry::handles) | two line segments per sample, to each control point | 2 |
//! | [`handle_tips`](AxisGeometry::handle_tips) | a circle at every control point | 2 |
//! | [`markers`](AxisGeometry::markers) | a circle at every sample | 1 |
//!
//! Below the minimum a part is an empty path. None of the parts depends on
//! another, so they can be rebuilt in any order.

use kurbo::{BezPath, Circle, Shape as _};

use crate::geometry::Keyframe;
use crate::mapping::CurveMapping;

/// Flattening tolerance used when emitting circles as Bézier segments.
const CIRCLE_TOLERANCE: f64 = 0.1;

/// Fixed radii of the circular parts, in view units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerRadii {
    /// Radius of a sample marker.
    pub marker: f64,
    /// Radius of a handle tip.
    pub tip: f64,
}

impl MarkerRadii {
    /// Default radii.
    pub const DEFAULT: Self = Self {
        marker: 4.5,
        tip: 3.0,
    };
}

impl Default for MarkerRadii {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Identifies one of the four paths of an axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CurvePart {
    /// The Bézier spline itself.
    Spline,
    /// Lines from each sample to its control points.
    Handles,
    /// Circles at the control points.
    HandleTips,
    /// Circles at the samples.
    Markers,
}

impl CurvePart {
    /// All parts in back-to-front drawing order.
    pub const ALL: [Self; 4] = [Self::Spline, Self::Handles, Self::HandleTips, Self::Markers];
}

/// The four view-space paths of one axis.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisGeometry {
    /// Cubic spline through all samples.
    pub spline: BezPath,
    /// Disconnected handle lines.
    pub handles: BezPath,
    /// Handle tip circles.
    pub handle_tips: BezPath,
    /// Sample marker circles.
    pub markers: BezPath,
}

impl AxisGeometry {
    /// Builds all four paths for `keyframes` under `mapping`.
    #[must_use]
    pub fn build(keyframes: &[Keyframe], mapping: &CurveMapping, radii: MarkerRadii) -> Self {
        Self {
            spline: spline_path(keyframes, mapping),
            handles: handle_path(keyframes, mapping),
            handle_tips: handle_tip_path(keyframes, mapping, radii.tip),
            markers: marker_path(keyframes, mapping, radii.marker),
        }
    }

    /// Returns the path for `part`.
    #[must_use]
    pub fn part(&self, part: CurvePart) -> &BezPath {
        match part {
            CurvePart::Spline => &self.spline,
            CurvePart::Handles => &self.handles,
            CurvePart::HandleTips => &self.handle_tips,
            CurvePart::Markers => &self.markers,
        }
    }
}

/// Cubic Bézier chain; segment `i` uses the outgoing control of keyframe `i`
/// and the incoming control of keyframe `i + 1`.
#[must_use]
pub fn spline_path(keyframes: &[Keyframe], mapping: &CurveMapping) -> BezPath {
    let mut path = BezPath::new();
    if keyframes.len() < 2 {
        return path;
    }
    path.move_to(mapping.map(keyframes[0].point));
    for pair in keyframes.windows(2) {
        let (previous, current) = (&pair[0], &pair[1]);
        path.curve_to(
            mapping.map(previous.global_control2()),
            mapping.map(current.global_control1()),
            mapping.map(current.point),
        );
    }
    path
}

/// Two separate line segments per keyframe, from the sample to each control.
#[must_use]
pub fn handle_path(keyframes: &[Keyframe], mapping: &CurveMapping) -> BezPath {
    let mut path = BezPath::new();
    if keyframes.len() < 2 {
        return path;
    }
    for keyframe in keyframes {
        let point = mapping.map(keyframe.point);
        path.move_to(point);
        path.line_to(mapping.map(keyframe.global_control1()));
        path.move_to(point);
        path.line_to(mapping.map(keyframe.global_control2()));
    }
    path
}

/// Circles of `radius` centered on both control points of every keyframe.
#[must_use]
pub fn handle_tip_path(keyframes: &[Keyframe], mapping: &CurveMapping, radius: f64) -> BezPath {
    let mut path = BezPath::new();
    if keyframes.len() < 2 {
        return path;
    }
    for keyframe in keyframes {
        push_circle(&mut path, mapping.map(keyframe.global_control1()), radius);
        push_circle(&mut path, mapping.map(keyframe.global_control2()), radius);
    }
    path
}

/// Circles of `radius` centered on every sample, including a lone one.
#[must_use]
pub fn marker_path(keyframes: &[Keyframe], mapping: &CurveMapping, radius: f64) -> BezPath {
    let mut path = BezPath::new();
    for keyframe in keyframes {
        push_circle(&mut path, mapping.map(keyframe.point), radius);
    }
    path
}

fn push_circle(path: &mut BezPath, center: kurbo::Point, radius: f64) {
    path.extend(Circle::new(center, radius).path_elements(CIRCLE_TOLERANCE));
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use kurbo::{PathEl, Point, Shape as _};

    use super::*;
    use crate::geometry::TimePoint;
    use crate::tangent::reset_control_points;

    fn mapping() -> CurveMapping {
        CurveMapping::new(Point::new(10.0, 50.0), 20.0, 10.0)
    }

    fn solved(points: &[(f64, f64)]) -> Vec<Keyframe> {
        let mut k: Vec<_> = points.iter().map(|&(x, y)| Keyframe::at(x, y)).collect();
        reset_control_points(&mut k);
        k
    }

    fn move_count(path: &BezPath) -> usize {
        path.elements()
            .iter()
            .filter(|el| matches!(el, PathEl::MoveTo(_)))
            .count()
    }

    #[test]
    fn empty_input_gives_empty_geometry() {
        let g = AxisGeometry::build(&[], &mapping(), MarkerRadii::DEFAULT);
        assert_eq!(g, AxisGeometry::default());
    }

    #[test]
    fn single_keyframe_only_has_a_marker() {
        let g = AxisGeometry::build(&solved(&[(1.0, 1.0)]), &mapping(), MarkerRadii::DEFAULT);
        assert!(g.spline.elements().is_empty());
        assert!(g.handles.elements().is_empty());
        assert!(g.handle_tips.elements().is_empty());
        assert_eq!(move_count(&g.markers), 1);
    }

    #[test]
    fn spline_uses_neighbor_controls() {
        let k = solved(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        let m = mapping();
        let path = spline_path(&k, &m);
        let els = path.elements();
        assert_eq!(els.len(), 3);
        assert_eq!(els[0], PathEl::MoveTo(m.map(k[0].point)));
        assert_eq!(
            els[1],
            PathEl::CurveTo(
                m.map(k[0].global_control2()),
                m.map(k[1].global_control1()),
                m.map(k[1].point),
            )
        );
        assert_eq!(
            els[2],
            PathEl::CurveTo(
                m.map(k[1].global_control2()),
                m.map(k[2].global_control1()),
                m.map(k[2].point),
            )
        );
    }

    #[test]
    fn handles_are_disconnected_lines() {
        let k = solved(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        let m = mapping();
        let path = handle_path(&k, &m);
        assert_eq!(move_count(&path), 6);
        assert_eq!(path.elements()[0], PathEl::MoveTo(m.map(k[0].point)));
        assert_eq!(
            path.elements()[1],
            PathEl::LineTo(m.map(k[0].global_control1()))
        );
    }

    #[test]
    fn tips_and_markers_are_centered_circles() {
        let k = solved(&[(0.0, 0.0), (1.0, 1.0)]);
        let m = mapping();
        let radii = MarkerRadii { marker: 4.5, tip: 3.0 };
        let g = AxisGeometry::build(&k, &m, radii);

        assert_eq!(move_count(&g.handle_tips), 4);
        assert_eq!(move_count(&g.markers), 2);

        let bbox = marker_path(&k[..1], &m, radii.marker).bounding_box();
        let center = m.map(k[0].point);
        // Arcs are approximated within the flattening tolerance.
        assert!((bbox.center().x - center.x).abs() < 0.25);
        assert!((bbox.center().y - center.y).abs() < 0.25);
        assert!((bbox.width() - 9.0).abs() < 0.25, "width {}", bbox.width());
    }

    #[test]
    fn part_lookup_matches_fields() {
        let k = vec![Keyframe::new(TimePoint::new(0.0, 0.0)), Keyframe::at(1.0, 0.0)];
        let g = AxisGeometry::build(&k, &mapping(), MarkerRadii::DEFAULT);
        assert_eq!(g.part(CurvePart::Spline), &g.spline);
        assert_eq!(g.part(CurvePart::Markers), &g.markers);
    }
}
