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

use wordcards_core::feed::FeedEntry;
use wordcards_core::feed::parse_feed;
use wordcards_core::feed::plan_additions;
use wordcards_core::store::WordStore;

use crate::ingest::IngestError;

/// Download and parse the word feed at `url`.
pub async fn fetch_feed(url: &str) -> Result<Vec<FeedEntry>, IngestError> {
    log::debug!("Downloading word feed from {url}");
    let response = reqwest::get(url)
        .await
        .map_err(|e| IngestError::Transport(e.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(IngestError::Transport(format!("server responded with {status}")));
    }
    let body = response
        .text()
        .await
        .map_err(|e| IngestError::Transport(e.to_string()))?;
    let entries = parse_feed(&body)
        .map_err(|e| IngestError::Transport(format!("unexpected feed contents: {}", e.message())))?;
    log::debug!("Feed has {} entries", entries.len());
    Ok(entries)
}

/// Append the feed words the store does not have yet. Each insert stands on
/// its own, so a failure part-way keeps the words added before it.
///
/// Returns the number of words added.
pub fn apply_feed(store: &mut impl WordStore, entries: &[FeedEntry]) -> Result<usize, IngestError> {
    let existing = store.select_all(None)?;
    let additions = plan_additions(&existing, entries);
    for record in &additions {
        store.insert(record)?;
    }
    log::info!(
        "Added {} new words from the feed ({} entries)",
        additions.len(),
        entries.len()
    );
    Ok(additions.len())
}
