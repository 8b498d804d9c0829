// src/extractors/records.rs

use super::segmenter::SegmentedWorks;
use crate::anthology::models::WorkRecord;

/// Joins each title's lines with `\n` and sorts the records by title (code-point order).
pub fn assemble(works: &SegmentedWorks) -> Vec<WorkRecord> {
    let mut records: Vec<WorkRecord> = works
        .iter()
        .map(|(title, lines)| WorkRecord {
            title: title.to_string(),
            content: lines.join("\n"),
        })
        .collect();
    records.sort_by(|a, b| a.title.cmp(&b.title));
    records
}

/// Titles from the contents block that never received a single line, in contents order.
pub fn missing_titles(titles: &[String], works: &SegmentedWorks) -> Vec<String> {
    titles
        .iter()
        .filter(|title| !works.contains(title))
        .cloned()
        .collect()
}
