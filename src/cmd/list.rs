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

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use serde::Serialize;
use wordcards_core::error::Fallible;
use wordcards_core::store::WordStore;
use wordcards_core::types::record::Status;
use wordcards_core::types::record::VocabRecord;

use crate::collection::Collection;

#[derive(ValueEnum, Clone, Copy, PartialEq, Debug)]
pub enum ListFormat {
    /// One word per line, tab-separated.
    Text,
    /// A JSON document.
    Json,
}

impl Display for ListFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ListFormat::Text => write!(f, "text"),
            ListFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, PartialEq, Debug)]
pub enum StatusFilter {
    New,
    Mastered,
}

impl From<StatusFilter> for Status {
    fn from(value: StatusFilter) -> Self {
        match value {
            StatusFilter::New => Status::New,
            StatusFilter::Mastered => Status::Mastered,
        }
    }
}

#[derive(Serialize)]
struct Listing<'a> {
    total: usize,
    words: &'a [VocabRecord],
}

pub fn list_words(
    directory: Option<String>,
    status: Option<StatusFilter>,
    format: ListFormat,
) -> Fallible<()> {
    let mut collection = Collection::new(directory)?;
    collection.seed_if_empty()?;
    let records = collection.db.select_all(status.map(Status::from))?;
    print!("{}", render_words(&records, format)?);
    Ok(())
}

fn render_words(records: &[VocabRecord], format: ListFormat) -> Fallible<String> {
    match format {
        ListFormat::Text => {
            let mut out = format!("Total words: {}\n", records.len());
            for r in records {
                out.push_str(&format!(
                    "{}\t{}\t{}\t{}\t{}\n",
                    r.id, r.word, r.meaning, r.example, r.status
                ));
            }
            Ok(out)
        }
        ListFormat::Json => {
            let listing = Listing {
                total: records.len(),
                words: records,
            };
            let mut out = serde_json::to_string_pretty(&listing)?;
            out.push('\n');
            Ok(out)
        }
    }
}
