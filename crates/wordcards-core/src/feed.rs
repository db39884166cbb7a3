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

//! The remote dictionary feed: a JSON array of `{ "word": ..., "trans": [...] }`.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::Fallible;
use crate::types::record::NewRecord;
use crate::types::record::VocabRecord;

#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct FeedEntry {
    pub word: String,
    #[serde(default)]
    pub trans: Vec<String>,
}

/// Characters in feed meanings that get replaced before storage.
const SUBSTITUTIONS: &[(char, &str)] = &[
    ('；', "; "),
    ('，', ", "),
    ('：', ": "),
    ('（', "("),
    ('）', ")"),
    ('\u{3000}', " "),
];

pub fn parse_feed(body: &str) -> Fallible<Vec<FeedEntry>> {
    Ok(serde_json::from_str(body)?)
}

/// Join the translations of an entry and normalize punctuation and spacing.
pub fn normalize_meaning(trans: &[String]) -> String {
    let joined = trans
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("; ");
    let mut replaced = String::with_capacity(joined.len());
    for ch in joined.chars() {
        match SUBSTITUTIONS.iter().find(|(from, _)| *from == ch) {
            Some((_, to)) => replaced.push_str(to),
            None => replaced.push(ch),
        }
    }
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The records a feed would add to a store holding `existing`. Words are
/// compared case-insensitively, against the store and within the feed.
pub fn plan_additions(existing: &[VocabRecord], entries: &[FeedEntry]) -> Vec<NewRecord> {
    let mut seen: HashSet<String> = existing
        .iter()
        .map(|r| r.word.trim().to_lowercase())
        .collect();
    let mut additions = Vec::new();
    for entry in entries {
        let word = entry.word.trim();
        if word.is_empty() {
            continue;
        }
        if !seen.insert(word.to_lowercase()) {
            continue;
        }
        additions.push(NewRecord::new(word, normalize_meaning(&entry.trans), ""));
    }
    additions
}
