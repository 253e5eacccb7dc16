// Copyright 2026 the Keyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable keys for persistent visual elements.

use core::fmt;

use keyline_core::curve::CurvePart;

/// Which visual element of a node a key names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementPart {
    /// One of the four curve paths of an axis.
    Curve(CurvePart),
    /// The navigator label of any node.
    Label,
}

impl ElementPart {
    /// Every part a node can own, in drawing order.
    pub const ALL: [Self; 5] = [
        Self::Curve(CurvePart::Spline),
        Self::Curve(CurvePart::Handles),
        Self::Curve(CurvePart::HandleTips),
        Self::Curve(CurvePart::Markers),
        Self::Label,
    ];
}

/// Identifies one persistent visual element across layout passes.
///
/// A host keeps one native element (a shape layer, an SVG node) per key and
/// updates it in place. Keys are built from raw node slot indices, so when a
/// slot shows up in [`LayoutChanges::removed`] every key of that slot must be
/// released.
///
/// [`LayoutChanges::removed`]: keyline_core::timeline::LayoutChanges::removed
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementKey {
    /// Raw slot index of the node.
    pub slot: u32,
    /// The element of that node.
    pub part: ElementPart,
}

impl ElementKey {
    /// Creates a key.
    #[must_use]
    pub const fn new(slot: u32, part: ElementPart) -> Self {
        Self { slot, part }
    }

    /// Key of a curve path.
    #[must_use]
    pub const fn curve(slot: u32, part: CurvePart) -> Self {
        Self::new(slot, ElementPart::Curve(part))
    }

    /// Key of a navigator label.
    #[must_use]
    pub const fn label(slot: u32) -> Self {
        Self::new(slot, ElementPart::Label)
    }

    /// Every key a slot may own.
    pub fn all_for_slot(slot: u32) -> impl Iterator<Item = Self> {
        ElementPart::ALL.into_iter().map(move |part| Self::new(slot, part))
    }
}

impl fmt::Debug for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.part {
            ElementPart::Curve(part) => write!(f, "ElementKey({}:{part:?})", self.slot),
            ElementPart::Label => write!(f, "ElementKey({}:Label)", self.slot),
        }
    }
}
