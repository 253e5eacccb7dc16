// Copyright 2026 the Keyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for layout passes.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! layout engine calls at each stage. All method bodies default to no-ops, so
//! implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`): gates [`RowPlacement`] events and the
//!   per-pass list of rebuilt curves.

#[cfg(feature = "trace-rich")]
use crate::timeline::NodeKind;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a layout pass starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutBeginEvent {
    /// Monotonic pass counter.
    pub pass_index: u64,
    /// Whether the model was mutated since the previous pass.
    pub model_dirty: bool,
    /// Whether the layout parameters differ from the previous pass.
    pub params_changed: bool,
    /// Whether the host asked for an animated transition.
    pub animated: bool,
}

/// Emitted when a layout pass finishes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutEndEvent {
    /// Monotonic pass counter.
    pub pass_index: u64,
    /// Number of navigator rows produced.
    pub rows: u32,
    /// Number of axis rows among them.
    pub axes: u32,
    /// Content width in view units.
    pub content_width: f64,
    /// Content height in view units.
    pub content_height: f64,
    /// Number of axes whose geometry changed.
    pub curves_changed: u32,
    /// Number of nodes added since the previous pass.
    pub added: u32,
    /// Number of nodes removed since the previous pass.
    pub removed: u32,
}

/// Position of one navigator row (requires `trace-rich`).
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowPlacement {
    /// Raw slot index of the node.
    pub node_index: u32,
    /// Row kind.
    pub kind: NodeKind,
    /// Nesting level of the owning collection.
    pub level: u16,
    /// Top edge in view units.
    pub y: f64,
    /// Row height in view units.
    pub height: f64,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from layout passes.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a layout pass starts.
    fn on_layout_begin(&mut self, e: &LayoutBeginEvent) {
        _ = e;
    }

    /// Called when a layout pass finishes.
    fn on_layout_end(&mut self, e: &LayoutEndEvent) {
        _ = e;
    }

    /// Called with every row placed by a pass (requires `trace-rich`).
    #[cfg(feature = "trace-rich")]
    fn on_row_placements(&mut self, pass_index: u64, rows: &[RowPlacement]) {
        _ = (pass_index, rows);
    }

    /// Called with the axis slots whose geometry changed (requires
    /// `trace-rich`).
    #[cfg(feature = "trace-rich")]
    fn on_curves_changed(&mut self, pass_index: u64, axes: &[u32]) {
        _ = (pass_index, axes);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Whether events reach a sink. Lets callers skip building rich payloads.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        #[cfg(feature = "trace")]
        {
            self.sink.is_some()
        }
        #[cfg(not(feature = "trace"))]
        {
            false
        }
    }

    /// Emits a [`LayoutBeginEvent`].
    #[inline]
    pub fn layout_begin(&mut self, e: &LayoutBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_layout_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LayoutEndEvent`].
    #[inline]
    pub fn layout_end(&mut self, e: &LayoutEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_layout_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits row placements (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn row_placements(&mut self, pass_index: u64, rows: &[RowPlacement]) {
        if let Some(s) = &mut self.sink {
            s.on_row_placements(pass_index, rows);
        }
    }

    /// Emits the changed curve list (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn curves_changed(&mut self, pass_index: u64, axes: &[u32]) {
        if let Some(s) = &mut self.sink {
            s.on_curves_changed(pass_index, axes);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_begin() -> LayoutBeginEvent {
        LayoutBeginEvent {
            pass_index: 3,
            model_dirty: true,
            params_changed: false,
            animated: false,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_layout_begin(&sample_begin());
        sink.on_layout_end(&LayoutEndEvent {
            pass_index: 3,
            rows: 0,
            axes: 0,
            content_width: 0.0,
            content_height: 0.0,
            curves_changed: 0,
            added: 0,
            removed: 0,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        assert!(!tracer.is_active());
        tracer.layout_begin(&sample_begin());
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            passes: Vec<u64>,
        }
        impl TraceSink for RecordingSink {
            fn on_layout_begin(&mut self, e: &LayoutBeginEvent) {
                self.passes.push(e.pass_index);
            }
        }

        let mut sink = RecordingSink { passes: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        assert!(tracer.is_active());
        tracer.layout_begin(&sample_begin());
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.passes, &[3]);
    }
}
