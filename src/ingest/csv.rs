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

use std::fs::read_to_string;
use std::io::ErrorKind;
use std::path::Path;

use wordcards_core::parser::parse_vocabulary;
use wordcards_core::store::WordStore;

use crate::ingest::IngestError;

/// Replace the contents of the store with the words in the file at `path`.
///
/// The store is left untouched if the file is missing or has no usable lines.
/// Returns the number of words loaded.
pub fn import_csv(store: &mut impl WordStore, path: &Path) -> Result<usize, IngestError> {
    let text = match read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(IngestError::SourceMissing(path.to_path_buf()));
        }
        Err(e) => {
            return Err(IngestError::Unreadable {
                path: path.to_path_buf(),
                message: e.to_string(),
            });
        }
    };
    let records = parse_vocabulary(&text);
    if records.is_empty() {
        return Err(IngestError::SourceEmpty(path.to_path_buf()));
    }
    store.replace_all(&records)?;
    log::info!("Loaded {} words from {}", records.len(), path.display());
    Ok(records.len())
}
