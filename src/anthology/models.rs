// src/anthology/models.rs
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One work of the anthology as written to the output catalog.
/// The field names are the output contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkRecord {
    pub title: String,
    pub content: String,
}

/// Summary written next to the works catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogMetadata {
    pub source: String,
    pub title_count: usize,
    pub work_count: usize,
    pub titles: Vec<String>,
    pub missing_titles: Vec<String>,
    pub content_lines: BTreeMap<String, usize>,
    pub stopped_at_boundary: bool,
    pub lines_read: usize,
    pub extraction_timestamp: String, // RFC 3339
}
