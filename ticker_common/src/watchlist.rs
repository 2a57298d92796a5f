//! The user's instrument watch-list and file parsing.
//!
//! The watch-list file holds one instrument per line: the code, optionally
//! followed by two extra whitespace-separated tokens. A line with exactly
//! three tokens attaches the second and third as a metadata pair; any other
//! token count keeps only the code. Codes are not validated — whatever the
//! file says is sent to the quote endpoint as-is.
use std::collections::HashMap;
use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::error::TickerError;

/// One line of the watch-list file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchEntry {
    /// Instrument code (e.g., `sh000001`).
    pub code: String,
    /// Optional metadata pair from a three-token line.
    pub extra: Option<(String, String)>,
}

/// Ordered collection of watched instruments.
///
/// Codes keep their first-seen file order and stay unique; a duplicate line
/// only overwrites the metadata mapping for that code.
#[derive(Debug, Clone, Default)]
pub struct Watchlist {
    codes: Vec<String>,
    extras: HashMap<String, Option<(String, String)>>,
}

impl Watchlist {
    /// Parses a watch-list from a buffered reader.
    ///
    /// Blank lines (empty or whitespace-only) are skipped silently. Only an
    /// I/O failure while reading is an error.
    pub fn parse_from_file<R: BufRead>(reader: R) -> Result<Self, TickerError> {
        let mut list = Watchlist::default();

        for line_result in reader.lines() {
            let line = line_result.map_err(TickerError::Io)?;
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() {
                continue;
            }

            let tokens: Vec<&str> = trimmed_line.split_whitespace().collect();
            let extra = if tokens.len() == 3 {
                Some((tokens[1].to_string(), tokens[2].to_string()))
            } else {
                None
            };
            list.insert(WatchEntry {
                code: tokens[0].to_string(),
                extra,
            });
        }
        Ok(list)
    }

    /// Adds an entry, keeping the code list unique and ordered by first
    /// appearance. A repeated code only updates its metadata mapping.
    pub fn insert(&mut self, entry: WatchEntry) {
        if !self.extras.contains_key(&entry.code) {
            self.codes.push(entry.code.clone());
        }
        self.extras.insert(entry.code, entry.extra);
    }

    /// Comma-joined code list for the batched quote request, in file order.
    pub fn query(&self) -> String {
        self.codes.join(",")
    }

    /// Metadata pair attached to `code`, if its line had three tokens.
    pub fn extra(&self, code: &str) -> Option<&(String, String)> {
        self.extras.get(code).and_then(|extra| extra.as_ref())
    }

    /// Watched codes in first-seen order.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Number of watched instruments.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// `true` if the watch-list holds no codes.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(input: &str) -> Watchlist {
        Watchlist::parse_from_file(Cursor::new(input)).unwrap()
    }

    #[test]
    fn three_token_line_populates_extra() {
        let list = parse("sh600519 cost 1580.00\n");
        assert_eq!(list.len(), 1);
        assert_eq!(
            list.extra("sh600519"),
            Some(&("cost".to_string(), "1580.00".to_string()))
        );
    }

    #[test]
    fn other_token_counts_keep_only_the_code() {
        let list = parse("sh000001\nsz399001 note\nsh600000 a b c\n");
        assert_eq!(list.query(), "sh000001,sz399001,sh600000");
        assert_eq!(list.codes()[0], "sh000001");
        assert_eq!(list.extra("sh000001"), None);
        assert_eq!(list.extra("sz399001"), None);
        assert_eq!(list.extra("sh600000"), None);
    }

    #[test]
    fn blank_and_whitespace_lines_are_skipped() {
        let list = parse("\nsh000001\n   \n\t\nsz399001\n\n");
        assert_eq!(list.len(), 2);
        assert_eq!(list.query(), "sh000001,sz399001");
    }

    #[test]
    fn query_joins_codes_in_file_order() {
        let list = parse("sh000001 a b\nsh600000\n");
        assert_eq!(list.query(), "sh000001,sh600000");
    }

    #[test]
    fn duplicate_codes_collapse_to_first_position() {
        let list = parse("sh000001\nsz399001\nsh000001 x y\n");
        assert_eq!(list.query(), "sh000001,sz399001");
        // The later line still wins the metadata mapping.
        assert_eq!(
            list.extra("sh000001"),
            Some(&("x".to_string(), "y".to_string()))
        );
    }

    #[test]
    fn empty_input_yields_empty_list() {
        let list = parse("");
        assert!(list.is_empty());
        assert_eq!(list.query(), "");
    }
}
