// src/utils/trace_dump.rs
use std::fmt::Write;

use crate::extractors::TraceEvent;

/// Renders the segmentation trace as one annotated line per event,
/// for checking where each work was cut.
pub fn render_trace(source: &str, events: &[TraceEvent]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# segmentation trace for {}", source);
    let _ = writeln!(out, "# {} events", events.len());

    let mut sorted: Vec<&TraceEvent> = events.iter().collect();
    sorted.sort_by_key(|event| event_line(event)); // Sort by position

    for event in sorted {
        let (line, kind, detail) = match event {
            TraceEvent::ContentsStart { line } => (*line, "contents-start", String::new()),
            TraceEvent::TitleListed { line, title } => (*line, "title", title.clone()),
            TraceEvent::ContentsEnd { line } => (*line, "contents-end", String::new()),
            TraceEvent::Marker { line, title } => (*line, "marker", title.clone()),
            TraceEvent::Boundary { line } => (*line, "boundary", String::new()),
        };
        if detail.is_empty() {
            let _ = writeln!(out, "{:>7}  {}", line, kind);
        } else {
            let _ = writeln!(out, "{:>7}  {:<14} {}", line, kind, detail);
        }
    }

    out
}

fn event_line(event: &TraceEvent) -> usize {
    match event {
        TraceEvent::ContentsStart { line }
        | TraceEvent::TitleListed { line, .. }
        | TraceEvent::ContentsEnd { line }
        | TraceEvent::Marker { line, .. }
        | TraceEvent::Boundary { line } => *line,
    }
}
