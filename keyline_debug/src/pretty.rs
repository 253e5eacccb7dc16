// Copyright 2026 the Keyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use keyline_core::timeline::NodeKind;
use keyline_core::trace::{LayoutBeginEvent, LayoutEndEvent, RowPlacement, TraceSink};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    verbose: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            verbose: false,
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            verbose: false,
        }
    }

    /// Also prints one line per placed row.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn kind_name(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Collection => "collection",
        NodeKind::Group => "group",
        NodeKind::Axis => "axis",
    }
}

fn flag(set: bool, name: &str) -> &str {
    if set { name } else { "-" }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_layout_begin(&mut self, e: &LayoutBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[layout:begin] pass={} {} {} {}",
            e.pass_index,
            flag(e.model_dirty, "model"),
            flag(e.params_changed, "params"),
            flag(e.animated, "animated"),
        );
    }

    fn on_layout_end(&mut self, e: &LayoutEndEvent) {
        let _ = writeln!(
            self.writer,
            "[layout:end] pass={} rows={} axes={} size={:.1}x{:.1} curves={} +{} -{}",
            e.pass_index,
            e.rows,
            e.axes,
            e.content_width,
            e.content_height,
            e.curves_changed,
            e.added,
            e.removed,
        );
    }

    fn on_row_placements(&mut self, pass_index: u64, rows: &[RowPlacement]) {
        if !self.verbose {
            let _ = writeln!(self.writer, "[rows] pass={pass_index} count={}", rows.len());
            return;
        }
        for row in rows {
            let _ = writeln!(
                self.writer,
                "[row] pass={pass_index} slot={} {}@{} y={:.1} h={:.1}",
                row.node_index,
                kind_name(row.kind),
                row.level,
                row.y,
                row.height,
            );
        }
    }

    fn on_curves_changed(&mut self, pass_index: u64, axes: &[u32]) {
        let _ = writeln!(self.writer, "[curves] pass={pass_index} slots={axes:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_print_layout_end() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_layout_end(&LayoutEndEvent {
            pass_index: 2,
            rows: 7,
            axes: 3,
            content_width: 180.0,
            content_height: 242.0,
            curves_changed: 1,
            added: 0,
            removed: 0,
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.contains("[layout:end]"), "got: {output}");
        assert!(output.contains("rows=7"), "got: {output}");
        assert!(output.contains("size=180.0x242.0"), "got: {output}");
    }

    #[test]
    fn verbose_prints_each_row() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new()).verbose(true);
        let rows = [
            RowPlacement {
                node_index: 0,
                kind: NodeKind::Collection,
                level: 0,
                y: 0.0,
                height: 36.0,
            },
            RowPlacement {
                node_index: 2,
                kind: NodeKind::Axis,
                level: 0,
                y: 56.0,
                height: 120.0,
            },
        ];
        sink.on_row_placements(1, &rows);
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(output.lines().count(), 2, "got: {output}");
        assert!(output.contains("slot=2 axis@0 y=56.0"), "got: {output}");
    }
}
