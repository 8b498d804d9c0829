// src/extractors/mod.rs
pub mod lines;
pub mod records;
pub mod segmenter;
pub mod titles;

use std::collections::BTreeMap;

use crate::anthology::models::WorkRecord;
use crate::utils::error::ExtractError;
use lines::LineCursor;
use segmenter::ContentSegmenter;
use titles::TitleExtractor;

/// Line that opens the table of contents.
pub const CONTENTS_MARKER: &str = "Contents";

/// Line that opens the appended editorial material; nothing after it belongs to a work.
pub const EDITORIAL_BOUNDARY: &str = "* CONTENT NOTE (added in 2017) *";

/// Literal markers and policy knobs shared by both extraction phases.
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    pub contents_marker: String,
    pub boundary_marker: String,
    /// Fail instead of silently accepting titles that never received content.
    pub strict: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            contents_marker: CONTENTS_MARKER.to_string(),
            boundary_marker: EDITORIAL_BOUNDARY.to_string(),
            strict: false,
        }
    }
}

/// Notable points of the single pass, with 1-based line numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    ContentsStart { line: usize },
    TitleListed { line: usize, title: String },
    ContentsEnd { line: usize },
    Marker { line: usize, title: String },
    Boundary { line: usize },
}

/// Everything one run over the anthology produces.
#[derive(Debug, Clone)]
pub struct ExtractedCatalog {
    /// Canonical titles in table-of-contents order.
    pub titles: Vec<String>,
    /// Works sorted by title.
    pub records: Vec<WorkRecord>,
    pub content_lines: BTreeMap<String, usize>,
    pub missing_titles: Vec<String>,
    pub stopped_at_boundary: bool,
    pub lines_read: usize,
    pub trace: Vec<TraceEvent>,
}

pub struct AnthologyExtractor {
    config: ExtractionConfig,
}

impl AnthologyExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Runs title extraction, segmentation and assembly over one shared cursor.
    pub fn extract<I>(&self, lines: I) -> Result<ExtractedCatalog, ExtractError>
    where
        I: Iterator<Item = String>,
    {
        let mut cursor = LineCursor::new(lines);
        let mut trace = Vec::new();

        let titles = TitleExtractor::new(&self.config).extract(&mut cursor, &mut trace)?;
        tracing::debug!("Extracted {} titles from the contents block", titles.len());

        let segmentation = ContentSegmenter::new(&self.config).segment(&titles, &mut cursor, &mut trace)?;

        if segmentation.works.is_empty() {
            tracing::warn!("No body lines were attributed to any title");
        } else {
            tracing::debug!("Collected content for {} of {} titles", segmentation.works.len(), titles.len());
        }

        let missing_titles = records::missing_titles(&titles, &segmentation.works);
        if !missing_titles.is_empty() {
            if self.config.strict {
                return Err(ExtractError::IncompleteCatalog(missing_titles));
            }
            tracing::warn!("{} titles received no content: {:?}", missing_titles.len(), missing_titles);
        }

        let content_lines = segmentation
            .works
            .iter()
            .map(|(title, lines)| (title.to_string(), lines.len()))
            .collect();
        let records = records::assemble(&segmentation.works);

        Ok(ExtractedCatalog {
            titles,
            records,
            content_lines,
            missing_titles,
            stopped_at_boundary: segmentation.stopped_at_boundary,
            lines_read: cursor.consumed(),
            trace,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> impl Iterator<Item = String> + '_ {
        text.lines().map(str::to_string)
    }

    const SMALL_ANTHOLOGY: &str = "\
Project front matter

Contents

THE TRAGEDY OF MACBETH
ZEBRA
APPLE

MACBETH
When shall we three meet again
ZEBRA
Stripes.
APPLE
  A red one.
MACBETH
Out, damned spot!
* CONTENT NOTE (added in 2017) *
Editorial remarks
ZEBRA
";

    #[test]
    fn test_end_to_end_catalog() {
        let extractor = AnthologyExtractor::new(ExtractionConfig::default());
        let catalog = extractor.extract(lines(SMALL_ANTHOLOGY)).expect("extraction should succeed");

        assert_eq!(catalog.titles, vec!["MACBETH", "ZEBRA", "APPLE"]);
        let titles: Vec<&str> = catalog.records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["APPLE", "MACBETH", "ZEBRA"]);

        assert_eq!(catalog.records[0].content, "  A red one.");
        assert_eq!(
            catalog.records[1].content,
            "MACBETH\nWhen shall we three meet again\nOut, damned spot!"
        );
        assert_eq!(catalog.records[2].content, "Stripes.");
        assert!(catalog.stopped_at_boundary);
        assert!(catalog.missing_titles.is_empty());
        assert_eq!(catalog.content_lines.get("MACBETH"), Some(&3));
    }

    #[test]
    fn test_editorial_section_is_never_attributed() {
        let extractor = AnthologyExtractor::new(ExtractionConfig::default());
        let catalog = extractor.extract(lines(SMALL_ANTHOLOGY)).unwrap();
        for record in &catalog.records {
            assert!(!record.content.contains("CONTENT NOTE"));
            assert!(!record.content.contains("Editorial remarks"));
        }
        assert!(catalog.trace.contains(&TraceEvent::Boundary { line: 17 }));
    }

    #[test]
    fn test_single_work_keeps_repeated_headlines() {
        // With one title there is never a *different* title, so no line is a marker.
        let text = "Contents\nHAMLET\nHAMLET\nHAMLET\nTo be.\nHAMLET\nor not.\n* CONTENT NOTE (added in 2017) *\nignored";
        let catalog = AnthologyExtractor::new(ExtractionConfig::default())
            .extract(lines(text))
            .unwrap();
        assert_eq!(catalog.titles, vec!["HAMLET"]);
        assert_eq!(catalog.records.len(), 1);
        assert_eq!(catalog.records[0].content, "HAMLET\nHAMLET\nTo be.\nHAMLET\nor not.");
        assert_eq!(catalog.lines_read, 8);
    }

    #[test]
    fn test_normalized_title_matches_body_headline() {
        let text = "Contents\nHAMLET\nTHE TRAGEDY OF MACBETH\n\nHAMLET\nTo be.\nMACBETH\nThunder.\n";
        let catalog = AnthologyExtractor::new(ExtractionConfig::default())
            .extract(lines(text))
            .unwrap();
        assert_eq!(catalog.titles, vec!["HAMLET", "MACBETH"]);
        assert_eq!(catalog.records[0].title, "HAMLET");
        assert_eq!(catalog.records[0].content, "HAMLET\nTo be.");
        assert_eq!(catalog.records[1].title, "MACBETH");
        assert_eq!(catalog.records[1].content, "Thunder.");
        assert!(catalog.trace.contains(&TraceEvent::Marker { line: 7, title: "MACBETH".to_string() }));
    }

    #[test]
    fn test_unterminated_contents_emits_nothing() {
        let extractor = AnthologyExtractor::new(ExtractionConfig::default());
        let result = extractor.extract(lines("Contents\nHAMLET\nMACBETH\n"));
        assert!(matches!(result, Err(ExtractError::UnterminatedContents { lines_read: 3 })));
    }

    #[test]
    fn test_missing_marker_is_silent_by_default() {
        // ZEBRA's headline never recurs, so its text lands under APPLE.
        let text = "Contents\nAPPLE\nZEBRA\nAPPLE\nfruit\nstripes\n";
        let extractor = AnthologyExtractor::new(ExtractionConfig::default());
        let catalog = extractor.extract(lines(text)).unwrap();
        assert_eq!(catalog.records.len(), 1);
        assert_eq!(catalog.records[0].content, "APPLE\nfruit\nstripes");
        assert_eq!(catalog.missing_titles, vec!["ZEBRA"]);
        assert!(!catalog.stopped_at_boundary);
    }

    #[test]
    fn test_strict_mode_rejects_missing_titles() {
        let text = "Contents\nAPPLE\nZEBRA\nAPPLE\nfruit\n";
        let config = ExtractionConfig {
            strict: true,
            ..ExtractionConfig::default()
        };
        let result = AnthologyExtractor::new(config).extract(lines(text));
        match result {
            Err(ExtractError::IncompleteCatalog(missing)) => assert_eq!(missing, vec!["ZEBRA"]),
            other => panic!("expected IncompleteCatalog, got {:?}", other),
        }
    }
}
