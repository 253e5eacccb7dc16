// Copyright 2026 the Keyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.

use alloc::vec::Vec;
use core::marker::PhantomData;

use super::id::{AxisId, CollectionId, GroupId, INVALID, NodeId, NodeKind};
use super::store::Timeline;

/// Converts a live node handle into one of the typed handles.
pub trait FromNode: Sized {
    /// The kind of node this handle refers to.
    const KIND: NodeKind;

    /// Wraps an untyped handle already known to be of [`Self::KIND`].
    fn from_node(node: NodeId) -> Self;
}

impl FromNode for CollectionId {
    const KIND: NodeKind = NodeKind::Collection;

    fn from_node(node: NodeId) -> Self {
        Self(node)
    }
}

impl FromNode for GroupId {
    const KIND: NodeKind = NodeKind::Group;

    fn from_node(node: NodeId) -> Self {
        Self(node)
    }
}

impl FromNode for AxisId {
    const KIND: NodeKind = NodeKind::Axis;

    fn from_node(node: NodeId) -> Self {
        Self(node)
    }
}

/// An iterator over the direct children of a node that are of kind `T`.
///
/// Created by [`Timeline::groups`], [`Timeline::child_collections`], and
/// [`Timeline::axes`]. Children are yielded in insertion order.
#[derive(Debug)]
pub struct Children<'a, T> {
    timeline: &'a Timeline,
    current: u32,
    _kind: PhantomData<T>,
}

impl<'a, T> Children<'a, T> {
    pub(crate) fn new(timeline: &'a Timeline, first: u32) -> Self {
        Self {
            timeline,
            current: first,
            _kind: PhantomData,
        }
    }
}

impl<T: FromNode> Iterator for Children<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        while self.current != INVALID {
            let idx = self.current;
            self.current = self.timeline.next_sibling[idx as usize];
            if self.timeline.kind[idx as usize] == T::KIND {
                return Some(T::from_node(NodeId {
                    idx,
                    generation: self.timeline.generation[idx as usize],
                }));
            }
        }
        None
    }
}

impl Timeline {
    /// Collects the subtree rooted at `idx` in post-order (children first).
    pub(crate) fn collect_post_order(&self, idx: u32, out: &mut Vec<u32>) {
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            self.collect_post_order(child, out);
            child = self.next_sibling[child as usize];
        }
        out.push(idx);
    }

    /// Calls `visit` for every node of the subtree rooted at `node`, children
    /// before their parent.
    ///
    /// Every descendant is visited exactly once. This is the order in which
    /// removal detaches nodes, so hosts can mirror it when tearing down
    /// their own visual elements.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn visit_post_order(&self, node: impl Into<NodeId>, mut visit: impl FnMut(NodeId)) {
        let node = node.into();
        self.validate(node);
        let mut order = Vec::new();
        self.collect_post_order(node.idx, &mut order);
        for idx in order {
            visit(NodeId {
                idx,
                generation: self.generation[idx as usize],
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn children_are_filtered_by_kind_and_ordered() {
        let mut tl = Timeline::new();
        let root = tl.create_collection(None, "Root");
        let child_a = tl.create_collection(Some(root), "A");
        let g1 = tl.create_group(root, "Position");
        let child_b = tl.create_collection(Some(root), "B");
        let g2 = tl.create_group(root, "Rotation");

        let groups: Vec<GroupId> = tl.groups(root).collect();
        assert_eq!(groups, [g1, g2]);
        let children: Vec<CollectionId> = tl.child_collections(root).collect();
        assert_eq!(children, [child_a, child_b]);
    }

    #[test]
    fn post_order_visits_each_descendant_once() {
        let mut tl = Timeline::new();
        let root = tl.create_collection(None, "Root");
        let g = tl.create_group(root, "G");
        let a = tl.create_axis(g, "a");
        let b = tl.create_axis(g, "b");
        let child = tl.create_collection(Some(root), "Child");
        let g2 = tl.create_group(child, "G2");
        let c = tl.create_axis(g2, "c");

        let mut seen = Vec::new();
        tl.visit_post_order(root, |n| seen.push(n));
        assert_eq!(
            seen,
            [
                a.node(),
                b.node(),
                g.node(),
                c.node(),
                g2.node(),
                child.node(),
                root.node()
            ]
        );
    }
}
