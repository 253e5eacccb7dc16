// Copyright 2026 the Keyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Logical curve-space points and keyframe records.
//!
//! [`TimePoint`] lives in curve space: `x` is time, `y` is the animated value.
//! It is kept separate from [`kurbo::Point`], which always denotes a
//! view-space position produced by the [`mapping`](crate::mapping) module.

use core::ops::{Add, Div, Mul, Neg, Sub};

/// Vectors at or below this length normalize to `(1, 0)`.
pub const NORMALIZE_EPSILON: f64 = 1e-5;

/// A point (or offset vector) in logical curve space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TimePoint {
    /// Time.
    pub x: f64,
    /// Value.
    pub y: f64,
}

impl TimePoint {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a point from its components.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length of the vector from the origin.
    #[inline]
    #[must_use]
    pub fn length(self) -> f64 {
        libm::sqrt(self.x * self.x + self.y * self.y)
    }

    /// Returns the unit vector with the same direction.
    ///
    /// Vectors no longer than [`NORMALIZE_EPSILON`] yield `(1, 0)`, so the
    /// result is always finite.
    #[must_use]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if libm::fabs(len) <= NORMALIZE_EPSILON {
            return Self::new(1.0, 0.0);
        }
        Self::new(self.x / len, self.y / len)
    }

    /// Converts to a [`kurbo::Vec2`] without any mapping.
    #[inline]
    #[must_use]
    pub const fn to_vec2(self) -> kurbo::Vec2 {
        kurbo::Vec2::new(self.x, self.y)
    }
}

impl From<(f64, f64)> for TimePoint {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<kurbo::Vec2> for TimePoint {
    #[inline]
    fn from(v: kurbo::Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl Add for TimePoint {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for TimePoint {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for TimePoint {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for TimePoint {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for TimePoint {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// One sample of an axis plus its two Bézier tangent offsets.
///
/// The offsets are local: the absolute control points are
/// `point + tangent_offset1` and `point + tangent_offset2`. The first offset
/// shapes the incoming segment, the second the outgoing one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    /// Sample position.
    pub point: TimePoint,
    /// Offset to the incoming control point.
    pub tangent_offset1: TimePoint,
    /// Offset to the outgoing control point.
    pub tangent_offset2: TimePoint,
}

impl Keyframe {
    /// Incoming offset used before any tangent solve.
    pub const DEFAULT_OFFSET1: TimePoint = TimePoint::new(-0.5, 0.0);
    /// Outgoing offset used before any tangent solve.
    pub const DEFAULT_OFFSET2: TimePoint = TimePoint::new(0.5, 0.0);

    /// Creates a keyframe at `point` with the default horizontal offsets.
    #[inline]
    #[must_use]
    pub const fn new(point: TimePoint) -> Self {
        Self {
            point,
            tangent_offset1: Self::DEFAULT_OFFSET1,
            tangent_offset2: Self::DEFAULT_OFFSET2,
        }
    }

    /// Shorthand for `Keyframe::new(TimePoint::new(x, y))`.
    #[inline]
    #[must_use]
    pub const fn at(x: f64, y: f64) -> Self {
        Self::new(TimePoint::new(x, y))
    }

    /// Absolute incoming control point.
    #[inline]
    #[must_use]
    pub fn global_control1(&self) -> TimePoint {
        self.point + self.tangent_offset1
    }

    /// Absolute outgoing control point.
    #[inline]
    #[must_use]
    pub fn global_control2(&self) -> TimePoint {
        self.point + self.tangent_offset2
    }
}

impl From<TimePoint> for Keyframe {
    #[inline]
    fn from(point: TimePoint) -> Self {
        Self::new(point)
    }
}
