// Copyright 2026 the Keyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON snapshots of a laid out timeline.
//!
//! [`layout_json`] captures every row of the latest [`Layout`] together with
//! its node's name and, for axes, the keyframes and the SVG path data of the
//! four curve parts. Snapshots are meant for diffing layouts between runs,
//! not for reloading.

use std::io::{self, Write};

use serde_json::{Value, json};

use keyline_core::curve::CurvePart;
use keyline_core::timeline::{Layout, NodeKind, Timeline};
use kurbo::Rect;

/// Builds the JSON snapshot of `layout`.
#[must_use]
pub fn layout_json(timeline: &Timeline, layout: &Layout) -> Value {
    let rows: Vec<Value> = layout
        .rows()
        .iter()
        .map(|row| {
            let slot = row.node.index();
            let mut entry = json!({
                "slot": slot,
                "generation": row.node.generation(),
                "kind": kind_name(row.kind),
                "name": timeline.name_at(slot),
                "level": row.level,
                "frame": rect_json(row.frame),
                "label": rect_json(row.label),
            });
            if let Some(curve) = &row.curve {
                let keyframes: Vec<Value> = timeline
                    .keyframes_at(slot)
                    .iter()
                    .map(|k| {
                        json!({
                            "x": k.point.x,
                            "y": k.point.y,
                            "offset1": [k.tangent_offset1.x, k.tangent_offset1.y],
                            "offset2": [k.tangent_offset2.x, k.tangent_offset2.y],
                        })
                    })
                    .collect();
                let mut paths = serde_json::Map::new();
                for part in CurvePart::ALL {
                    paths.insert(
                        part_name(part).to_owned(),
                        Value::String(curve.geometry.part(part).to_svg()),
                    );
                }
                entry["offset"] = json!([curve.mapping.offset.x, curve.mapping.offset.y]);
                entry["keyframes"] = Value::Array(keyframes);
                entry["paths"] = Value::Object(paths);
            }
            entry
        })
        .collect();

    let size = layout.content_size();
    let view = layout.view_size();
    json!({
        "pass": layout.pass_index(),
        "content_size": [size.width, size.height],
        "view_size": [view.width, view.height],
        "max_time": timeline.max_time(),
        "rows": rows,
    })
}

/// Writes the pretty-printed JSON snapshot of `layout` to `writer`.
pub fn write_layout_json(
    timeline: &Timeline,
    layout: &Layout,
    writer: &mut dyn Write,
) -> io::Result<()> {
    let value = layout_json(timeline, layout);
    serde_json::to_writer_pretty(&mut *writer, &value).map_err(io::Error::from)?;
    writeln!(writer)
}

fn rect_json(r: Rect) -> Value {
    json!([r.x0, r.y0, r.x1, r.y1])
}

fn kind_name(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Collection => "collection",
        NodeKind::Group => "group",
        NodeKind::Axis => "axis",
    }
}

fn part_name(part: CurvePart) -> &'static str {
    match part {
        CurvePart::Spline => "spline",
        CurvePart::Handles => "handles",
        CurvePart::HandleTips => "handle_tips",
        CurvePart::Markers => "markers",
    }
}
