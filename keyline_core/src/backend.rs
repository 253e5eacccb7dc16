// Copyright 2026 the Keyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contract for UI integrations.
//!
//! Keyline never draws and never owns a view. A host integration (a native
//! widget, a canvas, an SVG writer) provides the following pieces:
//!
//! - **Invalidator**: Implements [`Invalidator`] so the timeline can ask for
//!   a deferred layout pass. The request is coalesced: it is made once when
//!   the model goes from clean to dirty, no matter how many mutations follow
//!   before the pass runs.
//!
//! - **Viewport**: Implements [`Viewport`] to report the scroll offset and
//!   visible size, from which the [navigator pin](crate::navigator) is
//!   computed.
//!
//! - **Presenter**: Implements [`Presenter`] to keep one persistent visual
//!   element per generated path in sync with the latest [`Layout`].
//!
//! # Crate boundaries
//!
//! `keyline_core` owns the model, layout, and this contract module. Host
//! crates depend on `keyline_core` (and usually `keyline_render` for styling)
//! and wire them together in their frame or event loop.

use kurbo::{Size, Vec2};

use crate::timeline::{Layout, LayoutChanges, Timeline};

/// Receives deferred layout requests from a [`Timeline`].
///
/// Install one with [`Timeline::set_invalidator`]. Closures implement this
/// trait, so `timeline.set_invalidator(Box::new(|| view.set_needs_layout()))`
/// style wiring works directly.
pub trait Invalidator {
    /// Schedules a layout pass for the next frame.
    ///
    /// Must not call back into the timeline.
    fn request_layout(&mut self);
}

impl<F: FnMut()> Invalidator for F {
    fn request_layout(&mut self) {
        self();
    }
}

/// Scroll state of the host view.
pub trait Viewport {
    /// Current scroll offset of the content, in view units.
    fn scroll_offset(&self) -> Vec2;

    /// Size of the visible area, in view units.
    fn viewport_size(&self) -> Size;
}

/// Applies a finished layout pass to a host presentation tree.
///
/// # Frame loop pseudocode
///
/// ```rust,ignore
/// fn on_frame() {
///     // Mutate: edits issued since the last frame already marked the
///     // timeline dirty and requested this frame.
///     timeline.add_point(axis, TimePoint::new(5.0, 0.2));
///
///     // Lay out: only runs when something changed.
///     if let Some(changes) = timeline.layout_if_needed(&params, false) {
///         presenter.apply(&timeline, timeline.layout(), &changes);
///     }
/// }
/// ```
pub trait Presenter {
    /// Applies `changes` to the backing presentation tree, reading current
    /// rows and geometry from `layout`.
    fn apply(&mut self, timeline: &Timeline, layout: &Layout, changes: &LayoutChanges);
}
