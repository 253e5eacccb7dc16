// Copyright 2026 the Keyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays hierarchy storage with allocation, topology, and keyframe
//! management.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::Cell;
use core::fmt;

use understory_dirty::{CycleHandling, DirtyTracker};

use super::id::{AxisId, CollectionId, GroupId, INVALID, NodeId, NodeKind};
use super::layout::{Layout, LayoutParams};
use super::traverse::Children;
use crate::backend::Invalidator;
use crate::dirty;
use crate::geometry::{Keyframe, TimePoint};
use crate::tangent;

/// Struct-of-arrays storage for the collection, group, and axis hierarchy.
///
/// Nodes are addressed by typed handles ([`CollectionId`], [`GroupId`],
/// [`AxisId`]). Internally, each node occupies a slot in parallel arrays.
/// Removed nodes are recycled via a free list, and generation counters
/// prevent stale handle access.
///
/// Every mutation marks the affected node dirty and, on the first mutation
/// after a layout pass, asks the installed [`Invalidator`] for a new pass.
pub struct Timeline {
    // -- Topology --
    pub(crate) kind: Vec<NodeKind>,
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,
    pub(crate) roots: Vec<u32>,

    // -- Content (set by callers) --
    pub(crate) name: Vec<String>,
    pub(crate) keyframes: Vec<Vec<Keyframe>>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,
    pub(crate) topology_dirty: bool,
    pub(crate) layout_dirty: bool,
    invalidator: Option<Box<dyn Invalidator>>,

    // -- Caches --
    max_time: Cell<Option<f64>>,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,

    // -- Layout (written by update_layout) --
    pub(crate) layout: Layout,
    pub(crate) last_params: Option<LayoutParams>,
    pub(crate) pass_index: u64,
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("len", &self.len)
            .field("live", &self.node_count())
            .field("roots", &self.roots)
            .field("layout_dirty", &self.layout_dirty)
            .field("has_invalidator", &self.invalidator.is_some())
            .field("pass_index", &self.pass_index)
            .finish_non_exhaustive()
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    /// Creates an empty timeline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            kind: Vec::new(),
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            roots: Vec::new(),
            name: Vec::new(),
            keyframes: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            topology_dirty: false,
            layout_dirty: false,
            invalidator: None,
            max_time: Cell::new(None),
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
            layout: Layout::default(),
            last_params: None,
            pass_index: 0,
        }
    }

    /// Installs the host's deferred layout hook.
    ///
    /// If the timeline is already dirty, the new invalidator is asked for a
    /// pass right away so the pending mutations are not lost.
    pub fn set_invalidator(&mut self, invalidator: Box<dyn Invalidator>) {
        self.invalidator = Some(invalidator);
        if self.layout_dirty {
            if let Some(inv) = &mut self.invalidator {
                inv.request_layout();
            }
        }
    }

    /// Removes the host's deferred layout hook, returning it.
    pub fn take_invalidator(&mut self) -> Option<Box<dyn Invalidator>> {
        self.invalidator.take()
    }

    /// Returns whether a mutation happened since the last layout pass.
    #[must_use]
    pub fn needs_layout(&self) -> bool {
        self.layout_dirty
    }

    // -- Allocation API --

    /// Creates a collection, either as a new root (`parent == None`) or as
    /// the last child collection of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is stale.
    pub fn create_collection(
        &mut self,
        parent: Option<CollectionId>,
        name: impl Into<String>,
    ) -> CollectionId {
        if let Some(p) = parent {
            self.validate(p.0);
        }
        let node = self.allocate(NodeKind::Collection, name.into());
        match parent {
            Some(p) => self.append_child(p.0.idx, node.idx),
            None => {
                self.roots.push(node.idx);
                self.dirty.mark(node.idx, dirty::TOPOLOGY);
            }
        }
        self.invalidate_layout();
        CollectionId(node)
    }

    /// Creates a group as the last group of `collection`.
    ///
    /// # Panics
    ///
    /// Panics if `collection` is stale.
    pub fn create_group(&mut self, collection: CollectionId, name: impl Into<String>) -> GroupId {
        self.validate(collection.0);
        let node = self.allocate(NodeKind::Group, name.into());
        self.append_child(collection.0.idx, node.idx);
        self.invalidate_layout();
        GroupId(node)
    }

    /// Creates an empty axis as the last axis of `group`.
    ///
    /// # Panics
    ///
    /// Panics if `group` is stale.
    pub fn create_axis(&mut self, group: GroupId, name: impl Into<String>) -> AxisId {
        self.validate(group.0);
        let node = self.allocate(NodeKind::Axis, name.into());
        self.append_child(group.0.idx, node.idx);
        self.dirty.mark(node.idx, dirty::KEYFRAMES);
        self.invalidate_layout();
        AxisId(node)
    }

    /// Removes a collection and everything below it.
    ///
    /// Descendants are detached children-first, each exactly once.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn remove_collection(&mut self, collection: CollectionId) {
        self.validate(collection.0);
        self.remove_subtree(collection.0.idx);
    }

    /// Removes a group and its axes.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn remove_group(&mut self, group: GroupId) {
        self.validate(group.0);
        self.remove_subtree(group.0.idx);
    }

    /// Removes an axis.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn remove_axis(&mut self, axis: AxisId) {
        self.validate(axis.0);
        self.remove_subtree(axis.0.idx);
    }

    /// Removes every root collection and its subtree.
    pub fn clear(&mut self) {
        while let Some(&root) = self.roots.last() {
            self.remove_subtree(root);
        }
    }

    /// Returns whether the given handle refers to a live node.
    #[must_use]
    pub fn is_alive(&self, node: impl Into<NodeId>) -> bool {
        let node = node.into();
        (node.idx < self.len)
            && self.generation[node.idx as usize] == node.generation
            && !self.free_list.contains(&node.idx)
    }

    /// Returns the number of live nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    // -- Topology queries --

    /// Returns the root collections in insertion order.
    pub fn roots(&self) -> impl ExactSizeIterator<Item = CollectionId> + '_ {
        self.roots.iter().map(|&idx| CollectionId(self.node_at(idx)))
    }

    /// Returns the groups of a collection in insertion order.
    #[must_use]
    pub fn groups(&self, collection: CollectionId) -> Children<'_, GroupId> {
        self.validate(collection.0);
        Children::new(self, self.first_child[collection.0.idx as usize])
    }

    /// Returns the child collections of a collection in insertion order.
    #[must_use]
    pub fn child_collections(&self, collection: CollectionId) -> Children<'_, CollectionId> {
        self.validate(collection.0);
        Children::new(self, self.first_child[collection.0.idx as usize])
    }

    /// Returns the axes of a group in insertion order.
    #[must_use]
    pub fn axes(&self, group: GroupId) -> Children<'_, AxisId> {
        self.validate(group.0);
        Children::new(self, self.first_child[group.0.idx as usize])
    }

    /// Returns the parent collection, or `None` for a root.
    #[must_use]
    pub fn parent_collection(&self, collection: CollectionId) -> Option<CollectionId> {
        self.validate(collection.0);
        let p = self.parent[collection.0.idx as usize];
        (p != INVALID).then(|| CollectionId(self.node_at(p)))
    }

    /// Returns the collection owning a group.
    #[must_use]
    pub fn group_collection(&self, group: GroupId) -> CollectionId {
        self.validate(group.0);
        CollectionId(self.node_at(self.parent[group.0.idx as usize]))
    }

    /// Returns the group owning an axis.
    #[must_use]
    pub fn axis_group(&self, axis: AxisId) -> GroupId {
        self.validate(axis.0);
        GroupId(self.node_at(self.parent[axis.0.idx as usize]))
    }

    /// Returns the nesting depth of a collection (0 for roots).
    #[must_use]
    pub fn level(&self, collection: CollectionId) -> u16 {
        self.validate(collection.0);
        let mut level = 0_u16;
        let mut p = self.parent[collection.0.idx as usize];
        while p != INVALID {
            level = level.saturating_add(1);
            p = self.parent[p as usize];
        }
        level
    }

    /// Returns what kind of node a handle refers to.
    #[must_use]
    pub fn kind(&self, node: impl Into<NodeId>) -> NodeKind {
        let node = node.into();
        self.validate(node);
        self.kind[node.idx as usize]
    }

    // -- Names --

    /// Returns the display name of a node.
    #[must_use]
    pub fn name(&self, node: impl Into<NodeId>) -> &str {
        let node = node.into();
        self.validate(node);
        &self.name[node.idx as usize]
    }

    /// Renames a node.
    pub fn set_name(&mut self, node: impl Into<NodeId>, name: impl Into<String>) {
        let node = node.into();
        self.validate(node);
        self.name[node.idx as usize] = name.into();
        self.dirty.mark(node.idx, dirty::LABEL);
        self.invalidate_layout();
    }

    /// Returns the display name at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn name_at(&self, idx: u32) -> &str {
        self.check_slot(idx);
        &self.name[idx as usize]
    }

    // -- Keyframes --

    /// Returns the keyframes of an axis, sorted by ascending time.
    #[must_use]
    pub fn keyframes(&self, axis: AxisId) -> &[Keyframe] {
        self.validate(axis.0);
        &self.keyframes[axis.0.idx as usize]
    }

    /// Returns the keyframes at raw slot `idx` (empty for non-axis slots).
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn keyframes_at(&self, idx: u32) -> &[Keyframe] {
        self.check_slot(idx);
        &self.keyframes[idx as usize]
    }

    /// Inserts a keyframe with default tangent offsets, keeping the axis
    /// sorted by time, and returns its index.
    ///
    /// The record goes before the first existing record whose time is greater
    /// than or equal to `point.x`. Tangents are not re-solved; call
    /// [`reset_control_points`](Self::reset_control_points) for that.
    pub fn add_point(&mut self, axis: AxisId, point: TimePoint) -> usize {
        self.insert_keyframe(axis, Keyframe::new(point))
    }

    /// Inserts a full keyframe record, keeping the axis sorted by time, and
    /// returns its index.
    pub fn insert_keyframe(&mut self, axis: AxisId, keyframe: Keyframe) -> usize {
        self.validate(axis.0);
        let frames = &mut self.keyframes[axis.0.idx as usize];
        let at = sorted_position(frames, keyframe.point.x);
        frames.insert(at, keyframe);
        if let Some(t) = self.max_time.get() {
            self.max_time.set(Some(t.max(keyframe.point.x)));
        }
        self.keyframes_changed(axis.0.idx);
        at
    }

    /// Moves the keyframe at `index` to `point` and returns its new index.
    ///
    /// The record keeps its tangent offsets and is re-sorted by time.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or `index` is out of range.
    pub fn set_point(&mut self, axis: AxisId, index: usize, point: TimePoint) -> usize {
        self.validate(axis.0);
        let frames = &mut self.keyframes[axis.0.idx as usize];
        assert!(
            index < frames.len(),
            "keyframe index {index} out of range (len {})",
            frames.len()
        );
        let mut keyframe = frames.remove(index);
        let moved_in_time = keyframe.point.x != point.x;
        keyframe.point = point;
        let at = sorted_position(frames, point.x);
        frames.insert(at, keyframe);
        if moved_in_time {
            self.max_time.set(None);
        }
        self.keyframes_changed(axis.0.idx);
        at
    }

    /// Removes and returns the keyframe at `index`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or `index` is out of range.
    pub fn remove_point(&mut self, axis: AxisId, index: usize) -> Keyframe {
        self.validate(axis.0);
        let frames = &mut self.keyframes[axis.0.idx as usize];
        assert!(
            index < frames.len(),
            "keyframe index {index} out of range (len {})",
            frames.len()
        );
        let removed = frames.remove(index);
        self.max_time.set(None);
        self.keyframes_changed(axis.0.idx);
        removed
    }

    /// Replaces the tangent offsets of the keyframe at `index`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or `index` is out of range.
    pub fn set_keyframe_offsets(
        &mut self,
        axis: AxisId,
        index: usize,
        offset1: TimePoint,
        offset2: TimePoint,
    ) {
        self.validate(axis.0);
        let frames = &mut self.keyframes[axis.0.idx as usize];
        assert!(
            index < frames.len(),
            "keyframe index {index} out of range (len {})",
            frames.len()
        );
        frames[index].tangent_offset1 = offset1;
        frames[index].tangent_offset2 = offset2;
        self.keyframes_changed(axis.0.idx);
    }

    /// Re-solves the tangent offsets of every keyframe of an axis.
    pub fn reset_control_points(&mut self, axis: AxisId) {
        self.validate(axis.0);
        tangent::reset_control_points(&mut self.keyframes[axis.0.idx as usize]);
        self.keyframes_changed(axis.0.idx);
    }

    /// Re-solves the tangent offsets of every axis in the timeline.
    pub fn reset_all_control_points(&mut self) {
        let mut nodes = Vec::new();
        for &root in &self.roots {
            self.collect_post_order(root, &mut nodes);
        }
        for idx in nodes {
            if self.kind[idx as usize] == NodeKind::Axis {
                tangent::reset_control_points(&mut self.keyframes[idx as usize]);
                self.dirty.mark(idx, dirty::KEYFRAMES);
            }
        }
        self.invalidate_layout();
    }

    /// Returns the largest keyframe time over all axes, or `0.0` when the
    /// timeline holds no keyframes.
    ///
    /// The value is cached. Inserts raise the cached value in place; removing
    /// keyframes or nodes and moving a keyframe in time drop it. Value and
    /// tangent edits keep it.
    #[must_use]
    pub fn max_time(&self) -> f64 {
        if let Some(t) = self.max_time.get() {
            return t;
        }
        let t = self
            .keyframes
            .iter()
            .filter_map(|frames| frames.last())
            .map(|k| k.point.x)
            .reduce(f64::max)
            .unwrap_or(0.0);
        self.max_time.set(Some(t));
        t
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, node: NodeId) {
        assert!(
            node.idx < self.len && self.generation[node.idx as usize] == node.generation,
            "stale NodeId: {node:?} (current gen: {})",
            if node.idx < self.len {
                self.generation[node.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    fn check_slot(&self, idx: u32) {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
    }

    pub(crate) fn node_at(&self, idx: u32) -> NodeId {
        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    fn allocate(&mut self, kind: NodeKind, name: String) -> NodeId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Generation was already bumped on removal.
            self.kind[idx as usize] = kind;
            self.parent[idx as usize] = INVALID;
            self.first_child[idx as usize] = INVALID;
            self.next_sibling[idx as usize] = INVALID;
            self.prev_sibling[idx as usize] = INVALID;
            self.name[idx as usize] = name;
            self.keyframes[idx as usize].clear();
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.kind.push(kind);
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.name.push(name);
            self.keyframes.push(Vec::new());
            self.generation.push(0);
            idx
        };

        self.topology_dirty = true;
        self.pending_added.push(idx);
        self.node_at(idx)
    }

    /// Links `c` as the last child of `p`.
    fn append_child(&mut self, p: u32, c: u32) {
        self.parent[c as usize] = p;
        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Removes `idx` from its parent's child list without touching dirty state.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            self.first_child[p as usize] = next;
        }
        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }

    fn remove_subtree(&mut self, idx: u32) {
        let mut order = Vec::new();
        self.collect_post_order(idx, &mut order);

        let p = self.parent[idx as usize];
        if p != INVALID {
            self.unlink_from_parent(idx);
            self.dirty.mark(p, dirty::TOPOLOGY);
        } else {
            self.roots.retain(|&r| r != idx);
        }

        for slot in order {
            self.free_slot(slot);
        }
        self.topology_dirty = true;
        self.max_time.set(None);
        self.invalidate_layout();
    }

    fn free_slot(&mut self, idx: u32) {
        self.dirty.remove_key(idx);

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;
        self.parent[idx as usize] = INVALID;
        self.first_child[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.name[idx as usize].clear();
        self.keyframes[idx as usize].clear();
        self.free_list.push(idx);

        // A node created and removed between two passes was never presented.
        if let Some(pos) = self.pending_added.iter().position(|&a| a == idx) {
            self.pending_added.swap_remove(pos);
        } else {
            self.pending_removed.push(idx);
        }
    }

    fn keyframes_changed(&mut self, idx: u32) {
        self.dirty.mark(idx, dirty::KEYFRAMES);
        self.invalidate_layout();
    }

    /// Flags the layout stale, requesting a pass on the clean to dirty edge.
    fn invalidate_layout(&mut self) {
        if self.layout_dirty {
            return;
        }
        self.layout_dirty = true;
        if let Some(inv) = &mut self.invalidator {
            inv.request_layout();
        }
    }
}

/// Index of the first record whose time is `>= x`, or the length if none.
fn sorted_position(frames: &[Keyframe], x: f64) -> usize {
    frames
        .iter()
        .position(|k| k.point.x >= x)
        .unwrap_or(frames.len())
}
