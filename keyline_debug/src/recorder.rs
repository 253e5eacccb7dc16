// Copyright 2026 the Keyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Rich events ([`on_row_placements`](TraceSink::on_row_placements),
//! [`on_curves_changed`](TraceSink::on_curves_changed)) store only the count.

use keyline_core::trace::{LayoutBeginEvent, LayoutEndEvent, RowPlacement, TraceSink};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_LAYOUT_BEGIN: u8 = 1;
const TAG_LAYOUT_END: u8 = 2;
const TAG_ROW_PLACEMENTS_COUNT: u8 = 3;
const TAG_CURVES_CHANGED_COUNT: u8 = 4;

const FLAG_MODEL_DIRTY: u8 = 1 << 0;
const FLAG_PARAMS_CHANGED: u8 = 1 << 1;
const FLAG_ANIMATED: u8 = 1 << 2;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_count(&mut self, len: usize) {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "counts capped at u32::MAX for recording"
        )]
        self.write_u32(len.min(u32::MAX as usize) as u32);
    }
}

impl TraceSink for RecorderSink {
    fn on_layout_begin(&mut self, e: &LayoutBeginEvent) {
        self.write_u8(TAG_LAYOUT_BEGIN);
        self.write_u64(e.pass_index);
        let mut flags = 0;
        if e.model_dirty {
            flags |= FLAG_MODEL_DIRTY;
        }
        if e.params_changed {
            flags |= FLAG_PARAMS_CHANGED;
        }
        if e.animated {
            flags |= FLAG_ANIMATED;
        }
        self.write_u8(flags);
    }

    fn on_layout_end(&mut self, e: &LayoutEndEvent) {
        self.write_u8(TAG_LAYOUT_END);
        self.write_u64(e.pass_index);
        self.write_u32(e.rows);
        self.write_u32(e.axes);
        self.write_f64(e.content_width);
        self.write_f64(e.content_height);
        self.write_u32(e.curves_changed);
        self.write_u32(e.added);
        self.write_u32(e.removed);
    }

    fn on_row_placements(&mut self, pass_index: u64, rows: &[RowPlacement]) {
        self.write_u8(TAG_ROW_PLACEMENTS_COUNT);
        self.write_u64(pass_index);
        self.write_count(rows.len());
    }

    fn on_curves_changed(&mut self, pass_index: u64, axes: &[u32]) {
        self.write_u8(TAG_CURVES_CHANGED_COUNT);
        self.write_u64(pass_index);
        self.write_count(axes.len());
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`LayoutBeginEvent`].
    LayoutBegin(LayoutBeginEvent),
    /// A [`LayoutEndEvent`].
    LayoutEnd(LayoutEndEvent),
    /// Row count of a pass.
    RowPlacementsCount {
        /// Pass counter.
        pass_index: u64,
        /// Number of rows placed.
        count: u32,
    },
    /// Rebuilt curve count of a pass.
    CurvesChangedCount {
        /// Pass counter.
        pass_index: u64,
        /// Number of axes whose geometry was rebuilt.
        count: u32,
    },
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.read_u64().map(f64::from_bits)
    }

    fn decode_layout_begin(&mut self) -> Option<RecordedEvent> {
        let pass_index = self.read_u64()?;
        let flags = self.read_u8()?;
        Some(RecordedEvent::LayoutBegin(LayoutBeginEvent {
            pass_index,
            model_dirty: flags & FLAG_MODEL_DIRTY != 0,
            params_changed: flags & FLAG_PARAMS_CHANGED != 0,
            animated: flags & FLAG_ANIMATED != 0,
        }))
    }

    fn decode_layout_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::LayoutEnd(LayoutEndEvent {
            pass_index: self.read_u64()?,
            rows: self.read_u32()?,
            axes: self.read_u32()?,
            content_width: self.read_f64()?,
            content_height: self.read_f64()?,
            curves_changed: self.read_u32()?,
            added: self.read_u32()?,
            removed: self.read_u32()?,
        }))
    }

    fn decode_count(&mut self) -> Option<(u64, u32)> {
        let pass_index = self.read_u64()?;
        let count = self.read_u32()?;
        Some((pass_index, count))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_LAYOUT_BEGIN => self.decode_layout_begin(),
            TAG_LAYOUT_END => self.decode_layout_end(),
            TAG_ROW_PLACEMENTS_COUNT => self
                .decode_count()
                .map(|(pass_index, count)| RecordedEvent::RowPlacementsCount { pass_index, count }),
            TAG_CURVES_CHANGED_COUNT => self
                .decode_count()
                .map(|(pass_index, count)| RecordedEvent::CurvesChangedCount { pass_index, count }),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
