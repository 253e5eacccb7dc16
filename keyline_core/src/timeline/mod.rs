// Copyright 2026 the Keyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timeline hierarchy and layout.
//!
//! A [`Timeline`] is an ordered forest of *collections*. Each collection owns
//! an ordered list of *groups* and an ordered list of child collections; each
//! group owns an ordered list of *axes*; each axis owns keyframe records
//! sorted by time. Every node has:
//!
//! - An identity ([`CollectionId`], [`GroupId`], [`AxisId`]), a typed
//!   generational handle that becomes stale when the node is removed.
//! - Topology, as parent, first-child, and sibling links.
//! - A display name, and for axes the keyframes.
//!
//! Nodes are stored in struct-of-arrays layout with index-based handles.
//!
//! # Invalidation
//!
//! Mutations mark the node dirty on a [`dirty`](crate::dirty) channel and set
//! a single "layout needed" flag. The flag going from clean to dirty is the
//! only moment the installed [`Invalidator`](crate::backend::Invalidator) is
//! called, so any number of edits between two frames costs one request.
//!
//! # Layout
//!
//! [`Timeline::update_layout`] turns the tree into navigator [`Row`]s, in
//! pre-order: collection label, its groups (each followed by its axes), then
//! its child collections. Each pass also returns [`LayoutChanges`], listing
//! the rebuilt curves and the nodes added or removed since the previous pass.

mod id;
mod layout;
mod store;
mod traverse;

pub use id::{AxisId, CollectionId, GroupId, INVALID, NodeId, NodeKind};
pub use layout::{AxisCurve, Layout, LayoutChanges, LayoutMetrics, LayoutParams, Row};
pub use store::Timeline;
pub use traverse::{Children, FromNode};
