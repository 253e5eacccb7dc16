// Copyright 2026 the Keyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Automatic tangent solver.
//!
//! Tangents are finite-difference estimates from the neighbors of each
//! keyframe (Catmull-Rom family), scaled by [`SMOOTHING`] times the distance
//! to the neighbor on that side. Both offsets of a keyframe are collinear, so
//! adjacent Bézier segments join with a continuous first derivative.
//!
//! - One keyframe gets unit-length horizontal handles.
//! - The first and last keyframes point their handles along the chord to
//!   their only neighbor.
//! - Interior keyframes point along `next - previous`.

use crate::geometry::{Keyframe, TimePoint};

/// Fraction of the neighbor distance used as handle length.
pub const SMOOTHING: f64 = 0.33;

/// Recomputes every tangent offset in `keyframes` from the sample points.
///
/// Existing offsets are discarded, so calling this twice yields the same
/// result. Keyframes must already be sorted by time.
pub fn reset_control_points(keyframes: &mut [Keyframe]) {
    let n = keyframes.len();
    match n {
        0 => {}
        1 => {
            keyframes[0].tangent_offset1 = TimePoint::new(-1.0, 0.0);
            keyframes[0].tangent_offset2 = TimePoint::new(1.0, 0.0);
        }
        _ => {
            let first = endpoint_vector(keyframes[0].point, keyframes[1].point);
            keyframes[0].tangent_offset1 = -first;
            keyframes[0].tangent_offset2 = first;

            for i in 1..n - 1 {
                let previous = keyframes[i - 1].point;
                let current = keyframes[i].point;
                let next = keyframes[i + 1].point;

                let direction = (next - previous).normalized();
                keyframes[i].tangent_offset1 =
                    -direction * (current - previous).length() * SMOOTHING;
                keyframes[i].tangent_offset2 = direction * (current - next).length() * SMOOTHING;
            }

            let last = endpoint_vector(keyframes[n - 2].point, keyframes[n - 1].point);
            keyframes[n - 1].tangent_offset1 = -last;
            keyframes[n - 1].tangent_offset2 = last;
        }
    }
}

/// Handle vector for an endpoint: the chord `to - from`, shortened.
fn endpoint_vector(from: TimePoint, to: TimePoint) -> TimePoint {
    let direction = to - from;
    direction.normalized() * direction.length() * SMOOTHING
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: TimePoint, b: TimePoint) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    fn keys(points: &[(f64, f64)]) -> Vec<Keyframe> {
        points.iter().map(|&(x, y)| Keyframe::at(x, y)).collect()
    }

    #[test]
    fn empty_is_noop() {
        let mut none: Vec<Keyframe> = Vec::new();
        reset_control_points(&mut none);
        assert!(none.is_empty());
    }

    #[test]
    fn single_keyframe_gets_unit_handles() {
        for y in [-3.0, 0.0, 42.0] {
            let mut one = vec![Keyframe::at(7.0, y)];
            reset_control_points(&mut one);
            assert_eq!(one[0].tangent_offset1, TimePoint::new(-1.0, 0.0));
            assert_eq!(one[0].tangent_offset2, TimePoint::new(1.0, 0.0));
        }
    }

    #[test]
    fn endpoints_are_symmetric_chords() {
        let mut k = keys(&[(0.0, 0.1), (1.0, 1.0), (2.0, -0.6)]);
        reset_control_points(&mut k);

        assert_eq!(k[0].tangent_offset1, -k[0].tangent_offset2);
        let chord = TimePoint::new(1.0, 0.9) * SMOOTHING;
        assert!(close(k[0].tangent_offset2, chord), "got {:?}", k[0]);

        let last = TimePoint::new(1.0, -1.6) * SMOOTHING;
        assert!(close(k[2].tangent_offset2, last), "got {:?}", k[2]);
        assert!(close(k[2].tangent_offset1, -last), "got {:?}", k[2]);
    }

    #[test]
    fn interior_handles_scale_with_neighbor_distance() {
        let mut k = keys(&[(0.0, 0.1), (1.0, 1.0), (2.0, -0.6)]);
        reset_control_points(&mut k);

        let left = k[1].tangent_offset1.length();
        let right = k[1].tangent_offset2.length();
        let d_prev = (k[1].point - k[0].point).length();
        let d_next = (k[1].point - k[2].point).length();
        assert!((left - d_prev * SMOOTHING).abs() < EPS, "left {left}");
        assert!((right - d_next * SMOOTHING).abs() < EPS, "right {right}");
        assert!((left - right).abs() > 0.01, "unequal neighbor spacing");

        // Both handles lie on the line through next - previous.
        let dir = (k[2].point - k[0].point).normalized();
        let cross1 = k[1].tangent_offset1.x * dir.y - k[1].tangent_offset1.y * dir.x;
        let cross2 = k[1].tangent_offset2.x * dir.y - k[1].tangent_offset2.y * dir.x;
        assert!(cross1.abs() < EPS && cross2.abs() < EPS, "collinear handles");
    }

    #[test]
    fn joins_are_first_derivative_continuous() {
        let mut k = keys(&[(0.0, 0.1), (1.0, 1.5), (2.0, -0.6), (3.0, 0.4), (4.0, 0.9)]);
        reset_control_points(&mut k);

        for i in 1..k.len() - 1 {
            // Incoming derivative at the join is 3 * (p - c1), outgoing is
            // 3 * (c2 - p); they must point the same way.
            let incoming = k[i].point - k[i].global_control1();
            let outgoing = k[i].global_control2() - k[i].point;
            let cross = incoming.x * outgoing.y - incoming.y * outgoing.x;
            let dot = incoming.x * outgoing.x + incoming.y * outgoing.y;
            assert!(cross.abs() < EPS, "join {i} bends");
            assert!(dot > 0.0, "join {i} reverses");
        }
    }

    #[test]
    fn solving_is_idempotent() {
        let mut k = keys(&[(0.0, 0.55), (1.0, -0.01), (2.0, 0.4), (3.0, -0.2)]);
        reset_control_points(&mut k);
        let first = k.clone();
        k[1].tangent_offset1 = TimePoint::new(9.0, 9.0);
        reset_control_points(&mut k);
        assert_eq!(k, first);
    }

    #[test]
    fn coincident_neighbors_stay_finite() {
        let mut k = keys(&[(1.0, 1.0), (1.0, 1.0), (1.0, 1.0)]);
        reset_control_points(&mut k);
        for key in &k {
            assert!(key.tangent_offset1.x.is_finite() && key.tangent_offset1.y.is_finite());
            assert!(key.tangent_offset2.x.is_finite() && key.tangent_offset2.y.is_finite());
        }
    }
}
