//! Search command implementation.

use crate::cli::OutputFormat;
use lineisam_core::{IndexConfig, SearchHit, Searcher};
use serde::Serialize;
use std::path::Path;

/// Search result, as printed in JSON form.
#[derive(Debug, Serialize)]
pub struct SearchOutput {
    /// Key that was looked up.
    pub key: String,
    /// Whether a record was found.
    pub found: bool,
    /// Record number in the index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u64>,
    /// Offset of the line in the data file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    /// The matching line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
    /// Index keys read during the search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_reads: Option<u32>,
}

impl SearchOutput {
    fn new(key: &str, hit: Option<&SearchHit>) -> Self {
        Self {
            key: key.to_string(),
            found: hit.is_some(),
            position: hit.map(|h| h.index.position),
            offset: hit.map(|h| h.index.offset),
            line: hit.map(|h| String::from_utf8_lossy(&h.line).into_owned()),
            key_reads: hit.map(|h| h.index.key_reads),
        }
    }
}

/// Looks up `key` and prints the matching line or `Record not found`.
pub fn run(
    data: &Path,
    index: &Path,
    key_length: usize,
    key: &str,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let searcher = Searcher::open(IndexConfig::new(key_length), index)?;
    let hit = searcher.find_in_file(key.as_bytes(), data)?;

    match format {
        OutputFormat::Json => {
            let output = SearchOutput::new(key, hit.as_ref());
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => match hit {
            Some(hit) => println!("{}", String::from_utf8_lossy(&hit.line)),
            None => println!("Record not found"),
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineisam_core::IndexHit;

    #[test]
    fn json_for_hit() {
        let hit = SearchHit {
            index: IndexHit {
                position: 1,
                offset: 8,
                key_reads: 1,
            },
            line: b"banana,2".to_vec(),
        };
        let json = serde_json::to_value(SearchOutput::new("banana", Some(&hit))).unwrap();
        assert_eq!(json["found"], true);
        assert_eq!(json["offset"], 8);
        assert_eq!(json["line"], "banana,2");
    }

    #[test]
    fn json_for_miss_omits_hit_fields() {
        let json = serde_json::to_value(SearchOutput::new("grape ", None)).unwrap();
        assert_eq!(json["found"], false);
        assert!(json.get("line").is_none());
        assert!(json.get("offset").is_none());
    }
}
