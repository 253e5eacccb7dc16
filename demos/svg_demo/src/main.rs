// Copyright 2026 the Keyline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drives the layout pipeline over the sample rig without a UI toolkit.
//!
//! Builds the rig, runs a traced layout pass, then animates a few ticks the
//! way a host frame loop would: mutate, check `needs_layout`, apply the changes
//! to an [`SvgPresenter`](keyline_debug::svg::SvgPresenter). Events go to a
//! [`PrettyPrintSink`](keyline_debug::pretty::PrettyPrintSink) on stdout and a
//! [`RecorderSink`](keyline_debug::recorder::RecorderSink). The final frame is
//! written to `timeline.svg` and `layout.json`.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use keyline_core::backend::Presenter;
use keyline_core::navigator::NavigatorPin;
use keyline_core::timeline::{LayoutParams, Timeline};
use keyline_core::trace::{LayoutBeginEvent, LayoutEndEvent, RowPlacement, TraceSink, Tracer};
use keyline_debug::pretty::PrettyPrintSink;
use keyline_debug::recorder::{RecorderSink, decode};
use keyline_debug::snapshot::write_layout_json;
use keyline_debug::svg::SvgPresenter;
use keyline_demo_rig::{animate_axes, build_rig};
use keyline_render::{Appearance, DamageRegion, RenderPlan, TimelineStyle};
use kurbo::{Point, Rect};

const TICKS: u32 = 4;
/// Seconds between animation ticks.
const TICK_INTERVAL: f64 = 0.5;

/// Forwards every event to both sinks.
struct Tee<'a> {
    pretty: &'a mut PrettyPrintSink,
    recorder: &'a mut RecorderSink,
}

impl TraceSink for Tee<'_> {
    fn on_layout_begin(&mut self, e: &LayoutBeginEvent) {
        self.pretty.on_layout_begin(e);
        self.recorder.on_layout_begin(e);
    }

    fn on_layout_end(&mut self, e: &LayoutEndEvent) {
        self.pretty.on_layout_end(e);
        self.recorder.on_layout_end(e);
    }

    fn on_row_placements(&mut self, pass_index: u64, rows: &[RowPlacement]) {
        self.pretty.on_row_placements(pass_index, rows);
        self.recorder.on_row_placements(pass_index, rows);
    }

    fn on_curves_changed(&mut self, pass_index: u64, axes: &[u32]) {
        self.pretty.on_curves_changed(pass_index, axes);
        self.recorder.on_curves_changed(pass_index, axes);
    }
}

fn main() -> io::Result<()> {
    let mut pretty = PrettyPrintSink::new(Box::new(io::stdout()));
    let mut recorder = RecorderSink::new();

    let style = TimelineStyle::for_appearance(Appearance::Light);
    let mut presenter = SvgPresenter::new(style);
    let mut timeline = Timeline::new();
    build_rig(&mut timeline);

    let mut params = LayoutParams::DEFAULT;
    params.scale_x = LayoutParams::fit_scale_x(
        params.row_width - params.metrics.navigator_width,
        params.metrics.padding,
        timeline.max_time(),
    );

    // -- initial pass ------------------------------------------------------
    let changes = {
        let mut tee = Tee {
            pretty: &mut pretty,
            recorder: &mut recorder,
        };
        let mut tracer = Tracer::new(&mut tee);
        timeline.update_layout_traced(&params, false, &mut tracer)
    };
    presenter.apply(&timeline, timeline.layout(), &changes);
    let plan = RenderPlan::build(&timeline, timeline.layout(), &style, NavigatorPin::NONE);
    println!(
        "initial: {} rows, {} paths, {} labels, {} elements",
        timeline.layout().rows().len(),
        plan.paths().count(),
        plan.labels().count(),
        presenter.element_count(),
    );

    // -- animation ticks ---------------------------------------------------
    for tick in 1..=TICKS {
        animate_axes(&mut timeline, f64::from(tick) * TICK_INTERVAL);

        if !timeline.needs_layout() {
            continue;
        }
        let changes = {
            let mut tee = Tee {
                pretty: &mut pretty,
                recorder: &mut recorder,
            };
            let mut tracer = Tracer::new(&mut tee);
            timeline.update_layout_traced(&params, true, &mut tracer)
        };

        presenter.apply(&timeline, timeline.layout(), &changes);
        let damage = DamageRegion::from_changes(timeline.layout(), &changes, NavigatorPin::NONE);
        let view = Rect::from_origin_size(Point::ZERO, timeline.layout().view_size());
        println!(
            "tick {tick}: {} curves rebuilt, {} elements written, damage {:?}",
            changes.curves.len(),
            presenter.stats().written,
            damage.bounds(view),
        );
    }

    // A frame with no mutation needs no pass.
    if let Some(changes) = timeline.layout_if_needed(&params, false) {
        println!("unexpected pass: {} curves", changes.curves.len());
    }

    // -- outputs -----------------------------------------------------------
    let events = decode(recorder.as_bytes()).count();
    println!("recorded {events} events ({} bytes)", recorder.as_bytes().len());

    let mut svg = BufWriter::new(File::create("timeline.svg")?);
    presenter.write_document(&mut svg)?;
    svg.flush()?;

    let mut json = BufWriter::new(File::create("layout.json")?);
    write_layout_json(&timeline, timeline.layout(), &mut json)?;
    json.flush()?;

    println!("Wrote timeline.svg and layout.json ({TICKS} ticks)");
    Ok(())
}
