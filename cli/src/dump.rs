use clap::ArgMatches;
use itertools::Itertools;

use xtrace_proto::profiler::{XEvent, XLine, XPlane, space_for_path, x_event};
use xtrace_wire::XtraceResult;
use xtrace_wire::anyhow::ensure;

use crate::format::dur_ps;

pub fn handle(matches: &ArgMatches) -> XtraceResult<()> {
    let path = matches.value_of("trace").unwrap();
    let space = space_for_path(path)?;
    info!("loaded {} planes from {}", space.planes.len(), path);

    for error in &space.errors {
        println!("ERROR {error}");
    }
    for warning in &space.warnings {
        println!("WARNING {warning}");
    }

    let wanted = matches.value_of("plane");
    if let Some(name) = wanted {
        ensure!(space.find_plane(name).is_some(), "no plane named {:?} in the trace", name);
    }
    for plane in space.planes.iter().filter(|p| wanted.is_none_or(|n| p.name == n)) {
        render_plane(plane, matches.is_present("full"));
    }
    Ok(())
}

fn render_plane(plane: &XPlane, full: bool) {
    println!(
        "Plane #{} {:?}: {} lines, {} event kinds, {} stat kinds",
        plane.id,
        plane.name,
        plane.lines.len(),
        plane.event_metadata.len(),
        plane.stat_metadata.len()
    );
    for stat in &plane.stats {
        let name = plane.stat_name(stat.metadata_id).unwrap_or("?");
        println!("  stat {}: {}", name, stat.value_display(plane));
    }
    for line in &plane.lines {
        render_line(plane, line, full);
    }
}

fn render_line(plane: &XPlane, line: &XLine, full: bool) {
    let name = if line.display_name.is_empty() { &line.name } else { &line.display_name };
    println!(
        "  Line #{} {:?}: starts at {} ns, spans {}, {} events",
        line.id,
        name,
        line.timestamp_ns,
        dur_ps(line.span_ps()),
        line.events.len()
    );
    if full {
        for event in &line.events {
            render_event(plane, event);
        }
    }
}

fn render_event(plane: &XPlane, event: &XEvent) {
    let name = plane.event_name(event.metadata_id).unwrap_or("?");
    let timing = match event.data {
        Some(x_event::Data::NumOccurrences(n)) => {
            format!("{} x{} for {}", name, n, dur_ps(event.duration_ps))
        }
        _ => format!("+{} {} for {}", dur_ps(event.offset_ps()), name, dur_ps(event.duration_ps)),
    };
    let stats = event
        .stats
        .iter()
        .map(|s| {
            format!("{}={}", plane.stat_name(s.metadata_id).unwrap_or("?"), s.value_display(plane))
        })
        .join(" ");
    if stats.is_empty() {
        println!("    {timing}");
    } else {
        println!("    {timing} [{stats}]");
    }
}
