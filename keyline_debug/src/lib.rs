// Copyright 2026 the Keyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, snapshots, and SVG output for keyline
//! diagnostics.
//!
//! This crate provides [`TraceSink`](keyline_core::trace::TraceSink)
//! implementations and a reference host adapter for development and
//! post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`snapshot`]: JSON dumps of a timeline's rows and curve geometry.
//! - [`svg::SvgPresenter`]: a [`Presenter`](keyline_core::backend::Presenter)
//!   that keeps one SVG element per visual element and writes SVG documents.

pub mod pretty;
pub mod recorder;
pub mod snapshot;
pub mod svg;
