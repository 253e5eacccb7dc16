// Copyright 2026 the Keyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node identity types.

use core::fmt;

/// Sentinel value indicating "no node" in index fields.
pub const INVALID: u32 = u32::MAX;

/// What a node slot holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Named tree node owning groups and child collections.
    Collection,
    /// Named bundle of axes.
    Group,
    /// One animated scalar curve.
    Axis,
}

/// An untyped handle to a node in a [`Timeline`](super::Timeline).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after a node is removed and the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    /// Slot index into the timeline's arrays.
    pub(crate) idx: u32,
    /// Generation counter; must match the timeline's generation for this slot.
    pub(crate) generation: u32,
}

impl NodeId {
    /// Returns the raw slot index.
    ///
    /// Slot indices are what [`LayoutChanges`](super::LayoutChanges) reports,
    /// so presenters can key their visual elements by them.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}@gen{})", self.idx, self.generation)
    }
}

macro_rules! typed_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) NodeId);

        impl $name {
            /// Returns the untyped handle.
            #[inline]
            #[must_use]
            pub const fn node(self) -> NodeId {
                self.0
            }

            /// Returns the raw slot index.
            #[inline]
            #[must_use]
            pub const fn index(self) -> u32 {
                self.0.idx
            }
        }

        impl From<$name> for NodeId {
            #[inline]
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

typed_id!(
    /// A handle to a collection node.
    CollectionId
);

typed_id!(
    /// A handle to a group node.
    GroupId
);

typed_id!(
    /// A handle to an axis node.
    AxisId
);
