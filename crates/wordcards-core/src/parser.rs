// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Parser for the delimited-text vocabulary file.
//!
//! Each line has the form `word, meaning[, example]`. Only the first two
//! commas separate fields, so examples can contain commas. Malformed lines
//! are dropped rather than reported.

use crate::types::record::NewRecord;

/// Parse the contents of a vocabulary file.
///
/// The first line is treated as a header and skipped iff it contains the
/// string `word` (case-insensitive).
pub fn parse_vocabulary(text: &str) -> Vec<NewRecord> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.lines().peekable();
    if let Some(first) = lines.peek() {
        if is_header(first) {
            lines.next();
        }
    }
    lines
        .filter_map(|line| match Line::read(line) {
            Line::Entry(record) => Some(record),
            Line::Blank | Line::Malformed => None,
        })
        .collect()
}

fn is_header(line: &str) -> bool {
    line.to_lowercase().contains("word")
}

enum Line {
    /// A line with at least a word and a meaning.
    Entry(NewRecord),
    /// An empty or whitespace-only line.
    Blank,
    /// A line with fewer than two fields.
    Malformed,
}

impl Line {
    fn read(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Line::Blank;
        }
        let mut parts = line.splitn(3, ',');
        let word = parts.next().unwrap_or_default().trim();
        let Some(meaning) = parts.next() else {
            return Line::Malformed;
        };
        let example = parts
            .next()
            .map(|e| e.trim().trim_matches('"'))
            .unwrap_or_default();
        Line::Entry(NewRecord::new(word, meaning.trim(), example))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string() {
        assert!(parse_vocabulary("").is_empty());
    }

    #[test]
    fn test_whitespace_string() {
        assert!(parse_vocabulary("\n\n  \n").is_empty());
    }

    #[test]
    fn test_header_and_optional_example() {
        let input = "word,meaning\napple,蘋果\nbanana,香蕉,A yellow fruit";
        let records = parse_vocabulary(input);
        assert_eq!(
            records,
            vec![
                NewRecord::new("apple", "蘋果", ""),
                NewRecord::new("banana", "香蕉", "A yellow fruit"),
            ]
        );
    }

    #[test]
    fn test_no_header() {
        let input = "apple,蘋果\nbanana,香蕉";
        let records = parse_vocabulary(input);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].word, "apple");
    }

    #[test]
    fn test_header_detection_is_case_insensitive() {
        let records = parse_vocabulary("Word,Meaning,Example\ncat,貓");
        assert_eq!(records, vec![NewRecord::new("cat", "貓", "")]);
    }

    #[test]
    fn test_header_only_checked_on_first_line() {
        let records = parse_vocabulary("cat,貓\nword,字");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].word, "word");
    }

    #[test]
    fn test_malformed_lines_dropped() {
        let input = "apple,蘋果\njust-a-word\n\nbanana,香蕉";
        let records = parse_vocabulary(input);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].word, "banana");
    }

    #[test]
    fn test_example_keeps_commas_and_loses_quotes() {
        let records = parse_vocabulary("run, 跑 , \"I run, you run.\"");
        assert_eq!(
            records,
            vec![NewRecord::new("run", "跑", "I run, you run.")]
        );
    }

    #[test]
    fn test_byte_order_mark() {
        let records = parse_vocabulary("\u{feff}word,meaning\ncat,貓\r\ndog,狗\r\n");
        assert_eq!(
            records,
            vec![NewRecord::new("cat", "貓", ""), NewRecord::new("dog", "狗", "")]
        );
    }

    #[test]
    fn test_empty_meaning_is_kept() {
        let records = parse_vocabulary("cat,");
        assert_eq!(records, vec![NewRecord::new("cat", "", "")]);
    }
}
