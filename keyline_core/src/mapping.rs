// Copyright 2026 the Keyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Curve space to view space mapping.
//!
//! View space has its origin at the top left with y growing downward, so the
//! value axis is flipped: larger values map to smaller view y.

use kurbo::Point;

use crate::geometry::TimePoint;

/// Maps `point` to view space.
///
/// `x' = offset.x + x * scale_x`, `y' = offset.y - y * scale_y`. Inputs are
/// assumed finite; no rounding is applied.
#[inline]
#[must_use]
pub fn to_view_space(point: TimePoint, offset: Point, scale_x: f64, scale_y: f64) -> Point {
    Point::new(offset.x + point.x * scale_x, offset.y - point.y * scale_y)
}

/// A fixed mapping for one curve row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveMapping {
    /// View-space position of logical `(0, 0)`.
    pub offset: Point,
    /// View units per time unit.
    pub scale_x: f64,
    /// View units per value unit.
    pub scale_y: f64,
}

impl CurveMapping {
    /// Creates a mapping.
    #[inline]
    #[must_use]
    pub const fn new(offset: Point, scale_x: f64, scale_y: f64) -> Self {
        Self {
            offset,
            scale_x,
            scale_y,
        }
    }

    /// Maps a logical point to view space.
    #[inline]
    #[must_use]
    pub fn map(&self, point: TimePoint) -> Point {
        to_view_space(point, self.offset, self.scale_x, self.scale_y)
    }

    /// Maps a view-space position back to curve space.
    ///
    /// Used to turn a dragged marker position into a keyframe point. Scales
    /// must be non-zero.
    #[inline]
    #[must_use]
    pub fn unmap(&self, view: Point) -> TimePoint {
        TimePoint::new(
            (view.x - self.offset.x) / self.scale_x,
            (self.offset.y - view.y) / self.scale_y,
        )
    }
}
