// src/extractors/segmenter.rs

use std::collections::{HashMap, HashSet};

use super::lines::LineCursor;
use super::{ExtractionConfig, TraceEvent};
use crate::utils::error::ExtractError;

/// Raw body lines grouped by title, in the order titles were first seen.
#[derive(Debug, Clone, Default)]
pub struct SegmentedWorks {
    entries: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl SegmentedWorks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line to a title's content, creating the entry on first use.
    pub fn push_line(&mut self, title: &str, line: String) {
        let slot = match self.index.get(title) {
            Some(&slot) => slot,
            None => {
                self.entries.push((title.to_string(), Vec::new()));
                self.index.insert(title.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        self.entries[slot].1.push(line);
    }

    #[cfg(test)]
    pub fn get(&self, title: &str) -> Option<&[String]> {
        self.index.get(title).map(|&slot| self.entries[slot].1.as_slice())
    }

    pub fn contains(&self, title: &str) -> bool {
        self.index.contains_key(title)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(title, lines)| (title.as_str(), lines.as_slice()))
    }
}

/// Result of the body pass.
#[derive(Debug, Clone)]
pub struct Segmentation {
    pub works: SegmentedWorks,
    /// Whether the editorial boundary cut the pass short.
    pub stopped_at_boundary: bool,
}

pub struct ContentSegmenter<'a> {
    config: &'a ExtractionConfig,
}

impl<'a> ContentSegmenter<'a> {
    pub fn new(config: &'a ExtractionConfig) -> Self {
        Self { config }
    }

    /// Attributes every remaining line to the most recent headline marker.
    ///
    /// A line is a marker only when it names a title *other* than the current
    /// one. The body's first headline equals `titles[0]`, so it is kept as the
    /// first line of the first work. Lines are stored untrimmed.
    pub fn segment<I>(
        &self,
        titles: &[String],
        cursor: &mut LineCursor<I>,
        trace: &mut Vec<TraceEvent>,
    ) -> Result<Segmentation, ExtractError>
    where
        I: Iterator<Item = String>,
    {
        let mut current: &str = titles.first().ok_or(ExtractError::EmptyTitleList)?;
        let title_set: HashSet<&str> = titles.iter().map(String::as_str).collect();
        let mut works = SegmentedWorks::new();

        while let Some(line) = cursor.next() {
            let line_number = cursor.consumed();
            let stripped = line.trim();

            if stripped == self.config.boundary_marker {
                tracing::debug!("Editorial boundary at line {}, stopping", line_number);
                trace.push(TraceEvent::Boundary { line: line_number });
                return Ok(Segmentation { works, stopped_at_boundary: true });
            }

            if let Some(&title) = title_set.get(stripped) {
                if title != current {
                    tracing::trace!("Line {}: switching from '{}' to '{}'", line_number, current, title);
                    trace.push(TraceEvent::Marker { line: line_number, title: title.to_string() });
                    current = title;
                    continue;
                }
            }

            works.push_line(current, line);
        }

        tracing::debug!("Reached end of input without an editorial boundary");
        Ok(Segmentation { works, stopped_at_boundary: false })
    }
}
