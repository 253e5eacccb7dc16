// Copyright 2026 the Keyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core model, tangent solver, and layout engine for keyframe curve editors.
//!
//! `keyline_core` provides the data structures and geometry behind a
//! hierarchical timeline editor: a tree of named collections, groups, and
//! axes holding sparse keyframe records, turned into navigator rows and
//! renderable Bézier geometry. It is `no_std` compatible (with `alloc`) and
//! uses array-based struct-of-arrays storage with generational handles.
//!
//! # Architecture
//!
//! The crate is organized around a layout pass that the host drives once per
//! frame (or whenever it was asked to):
//!
//! ```text
//!   Host mutation (create_*, add_point, set_point, ...)
//!       │
//!       ▼
//!   Timeline (dirty channels) ──► Invalidator::request_layout()  (once)
//!                                           │
//!                 ┌─────────────────────────┘
//!                 ▼
//!   Timeline::update_layout() ──► Layout + LayoutChanges ──► Presenter::apply()
//! ```
//!
//! **[`geometry`]**: [`TimePoint`](geometry::TimePoint) and
//! [`Keyframe`](geometry::Keyframe) value types.
//!
//! **[`tangent`]**: Automatic tangent solver (Catmull-Rom family, scaled by
//! a third of the neighbor distance).
//!
//! **[`mapping`]**: Logical `(time, value)` to view-space mapping with a
//! flipped y axis.
//!
//! **[`curve`]**: Builds spline, handle, handle-tip, and marker paths for one
//! axis.
//!
//! **[`timeline`]**: Struct-of-arrays hierarchy store with typed generational
//! handles, the recursive layout engine, and change reporting.
//!
//! **[`dirty`]**: Dirty-tracking channels via `understory_dirty`.
//!
//! **[`navigator`]**: Horizontal pinning of the navigator panel during
//! scroll.
//!
//! **[`backend`]**: The [`Presenter`](backend::Presenter),
//! [`Invalidator`](backend::Invalidator), and [`Viewport`](backend::Viewport)
//! traits that host integrations implement.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! layout instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-row
//!   placement and per-axis curve events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod curve;
pub mod dirty;
pub mod geometry;
pub mod mapping;
pub mod navigator;
pub mod tangent;
pub mod timeline;
pub mod trace;
