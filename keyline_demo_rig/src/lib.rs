// Copyright 2026 the Keyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sample skeleton rig and keyframe animation for the keyline demos.

#![no_std]

extern crate alloc;

use alloc::format;
use alloc::vec::Vec;

use keyline_core::geometry::TimePoint;
use keyline_core::timeline::{AxisId, CollectionId, Timeline};

/// Keyframe values of the x, y, and z axes of every group, at times 0 to 4.
pub const AXIS_SAMPLES: [(&str, [f64; 5]); 3] = [
    ("x", [0.1, 1.5, -0.6, 0.4, 0.9]),
    ("y", [0.55, -0.01, 0.4, -0.2, 0.35]),
    ("z", [0.95, 0.2, -0.1, -0.3, 0.15]),
];

/// Handles of a built rig.
#[derive(Clone, Debug)]
pub struct Rig {
    /// The `Root` collection.
    pub root: CollectionId,
    /// Every axis in navigator order.
    pub axes: Vec<AxisId>,
}

/// Adds the sample skeleton to `timeline` and solves its tangents.
///
/// The hierarchy is `Root` (Position, Rotation) with two legs
/// (`Hip` / `Leg` / `Foot`) and a `Torso` carrying two arms
/// (`Shoulder` / `Arm` / `Hand`) and a `Head`. Every collection below the root
/// has a single Rotation group.
pub fn build_rig(timeline: &mut Timeline) -> Rig {
    let root = timeline.create_collection(None, "Root");
    add_group(timeline, root, "Position");
    add_group(timeline, root, "Rotation");

    for side in ["left", "right"] {
        chain(timeline, root, ["Hip", "Leg", "Foot"], side);
    }
    let torso = timeline.create_collection(Some(root), "Torso");
    add_group(timeline, torso, "Rotation");
    for side in ["left", "right"] {
        chain(timeline, torso, ["Shoulder", "Arm", "Hand"], side);
    }
    let head = timeline.create_collection(Some(torso), "Head");
    add_group(timeline, head, "Rotation");

    let axes = all_axes(timeline);
    for &axis in &axes {
        timeline.reset_control_points(axis);
    }
    Rig { root, axes }
}

fn add_group(timeline: &mut Timeline, collection: CollectionId, name: &str) {
    let group = timeline.create_group(collection, name);
    for (axis_name, values) in AXIS_SAMPLES {
        let axis = timeline.create_axis(group, axis_name);
        for (t, value) in values.into_iter().enumerate() {
            timeline.add_point(axis, TimePoint::new(t as f64, value));
        }
    }
}

fn chain(timeline: &mut Timeline, parent: CollectionId, names: [&str; 3], side: &str) {
    let mut parent = parent;
    for name in names {
        let collection = timeline.create_collection(Some(parent), format!("{name} {side}"));
        add_group(timeline, collection, "Rotation");
        parent = collection;
    }
}

/// Returns every axis of `timeline` in navigator order.
pub fn all_axes(timeline: &Timeline) -> Vec<AxisId> {
    let mut out = Vec::new();
    for root in timeline.roots() {
        collect_axes(timeline, root, &mut out);
    }
    out
}

fn collect_axes(timeline: &Timeline, collection: CollectionId, out: &mut Vec<AxisId>) {
    for group in timeline.groups(collection) {
        out.extend(timeline.axes(group));
    }
    for child in timeline.child_collections(collection) {
        collect_axes(timeline, child, out);
    }
}

/// Moves every keyframe value of every axis for a single frame.
///
/// Values stay in `-1.0..=1.0` and depend only on `t` (elapsed seconds) and
/// the keyframe's position, so repeated runs are identical. Keyframe times are
/// left unchanged and tangents are re-solved afterwards; lay the timeline out
/// with `animated = true` to let the host transition.
pub fn animate_axes(timeline: &mut Timeline, t: f64) {
    for (a, axis) in all_axes(timeline).into_iter().enumerate() {
        let speed = 0.7 + a as f64 * 0.13;
        let phase = a as f64 * 0.5;
        for i in 0..timeline.keyframes(axis).len() {
            let x = timeline.keyframes(axis)[i].point.x;
            let y = libm::sin(t * speed + phase + i as f64 * 1.3);
            timeline.set_point(axis, i, TimePoint::new(x, y));
        }
        timeline.reset_control_points(axis);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rig_has_expected_shape() {
        let mut tl = Timeline::new();
        let rig = build_rig(&mut tl);
        // 15 collections, 16 groups, 48 axes.
        assert_eq!(tl.node_count(), 79);
        assert_eq!(rig.axes.len(), 48);
        assert_eq!(tl.name(rig.root), "Root");
        assert_eq!(tl.groups(rig.root).count(), 2);

        let children: Vec<&str> = tl
            .child_collections(rig.root)
            .map(|c| tl.name(c))
            .collect();
        assert_eq!(children, ["Hip left", "Hip right", "Torso"]);
        assert!((tl.max_time() - 4.0).abs() < 1e-12, "max_time");
    }

    #[test]
    fn rig_tangents_are_solved() {
        let mut tl = Timeline::new();
        let rig = build_rig(&mut tl);
        let keys = tl.keyframes(rig.axes[0]);
        assert_eq!(keys.len(), 5);
        // Interior handles point back and forward in time.
        assert!(keys[1].tangent_offset2.x > 0.0, "outgoing offset");
        assert!(keys[1].tangent_offset1.x < 0.0, "incoming offset");
    }

    #[test]
    fn animation_is_deterministic_and_bounded() {
        let mut a = Timeline::new();
        let mut b = Timeline::new();
        let rig = build_rig(&mut a);
        build_rig(&mut b);
        animate_axes(&mut a, 1.25);
        animate_axes(&mut b, 1.25);
        for &axis in &rig.axes {
            assert_eq!(a.keyframes(axis), b.keyframes(axis));
            for (i, k) in a.keyframes(axis).iter().enumerate() {
                assert!((-1.0..=1.0).contains(&k.point.y), "value out of range");
                assert!((k.point.x - i as f64).abs() < 1e-12, "time moved");
            }
        }
    }

    #[test]
    fn animation_marks_layout_dirty() {
        let mut tl = Timeline::new();
        build_rig(&mut tl);
        tl.update_layout(&keyline_core::timeline::LayoutParams::DEFAULT, false);
        assert!(!tl.needs_layout());
        animate_axes(&mut tl, 0.5);
        assert!(tl.needs_layout());
        let changes = tl.update_layout(&keyline_core::timeline::LayoutParams::DEFAULT, true);
        assert_eq!(changes.curves.len(), 48);
        assert!(changes.animated);
    }
}
