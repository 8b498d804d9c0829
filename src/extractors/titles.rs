// src/extractors/titles.rs

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use super::lines::LineCursor;
use super::{ExtractionConfig, TraceEvent};
use crate::utils::error::ExtractError;

// --- Title Conversions (Lazy Static) ---
// Table-of-contents spellings that differ from the headline printed above the work itself.
static TITLE_CONVERSIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("THE TRAGEDY OF ANTONY AND CLEOPATRA", "ANTONY AND CLEOPATRA"),
        ("THE LIFE OF KING HENRY THE FIFTH", "THE LIFE OF KING HENRY V"),
        ("THE TWO NOBLE KINSMEN", "THE TWO NOBLE KINSMEN:"),
        ("TWELFTH NIGHT; OR, WHAT YOU WILL", "TWELFTH NIGHT: OR, WHAT YOU WILL"),
        ("THE TRAGEDY OF OTHELLO, MOOR OF VENICE", "OTHELLO, THE MOOR OF VENICE"),
        ("THE TRAGEDY OF MACBETH", "MACBETH"),
    ])
});

/// Maps a trimmed contents entry to the spelling used by its body headline.
pub fn canonical_title(entry: &str) -> String {
    TITLE_CONVERSIONS
        .get(entry)
        .map_or_else(|| entry.to_string(), |mapped| mapped.to_string())
}

pub struct TitleExtractor<'a> {
    config: &'a ExtractionConfig,
}

impl<'a> TitleExtractor<'a> {
    pub fn new(config: &'a ExtractionConfig) -> Self {
        Self { config }
    }

    /// Reads the contents block and returns canonical titles in listed order.
    ///
    /// The block ends at the first line repeating an already listed title. That
    /// line is only peeked, so it is the first line the segmenter sees.
    pub fn extract<I>(
        &self,
        cursor: &mut LineCursor<I>,
        trace: &mut Vec<TraceEvent>,
    ) -> Result<Vec<String>, ExtractError>
    where
        I: Iterator<Item = String>,
    {
        let mut titles: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut in_contents = false;

        loop {
            let line_number = cursor.next_line_number();
            let line = match cursor.peek() {
                Some(raw) => raw.trim().to_string(),
                None => {
                    tracing::error!("Input ended inside the contents block after {} lines", cursor.consumed());
                    return Err(ExtractError::UnterminatedContents { lines_read: cursor.consumed() });
                }
            };

            if line.is_empty() {
                cursor.next();
                continue;
            }

            if line == self.config.contents_marker {
                if !in_contents {
                    tracing::debug!("Contents block starts at line {}", line_number);
                    trace.push(TraceEvent::ContentsStart { line: line_number });
                }
                in_contents = true;
                cursor.next();
                continue;
            }

            if seen.contains(&line) {
                tracing::debug!("Contents block ends at line {} ('{}' repeats)", line_number, line);
                trace.push(TraceEvent::ContentsEnd { line: line_number });
                return Ok(titles);
            }

            if in_contents {
                let title = canonical_title(&line);
                if title != line {
                    tracing::trace!("Normalized contents entry '{}' to '{}'", line, title);
                    // A repeat in either spelling ends the block.
                    seen.insert(line.clone());
                }
                trace.push(TraceEvent::TitleListed { line: line_number, title: title.clone() });
                seen.insert(title.clone());
                titles.push(title);
            }
            cursor.next();
        }
    }
}
