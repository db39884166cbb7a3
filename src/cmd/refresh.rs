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

//! The non-interactive data refresh commands.

use std::path::PathBuf;

use wordcards_core::error::Fallible;
use wordcards_core::error::fail;

use crate::collection::Collection;
use crate::ingest::csv::import_csv;
use crate::ingest::feed::apply_feed;
use crate::ingest::feed::fetch_feed;

/// Replace the collection's words with the contents of the vocabulary file.
pub fn import_collection(directory: Option<String>, csv: Option<String>) -> Fallible<()> {
    let mut collection = Collection::new(directory)?;
    let path: PathBuf = match csv {
        Some(path) => PathBuf::from(path),
        None => collection.csv_path(),
    };
    let count = import_csv(&mut collection.db, &path)?;
    println!("Loaded {count} words from {}.", path.display());
    Ok(())
}

/// Add the words from the feed that the collection does not have yet.
pub async fn download_collection(directory: Option<String>, url: Option<String>) -> Fallible<()> {
    let mut collection = Collection::new(directory)?;
    let Some(url) = url.or_else(|| collection.config.feed_url.clone()) else {
        return fail("no feed URL given. Pass --url or set feed_url in wordcards.toml.");
    };
    let entries = fetch_feed(&url).await?;
    let added = apply_feed(&mut collection.db, &entries)?;
    println!("Added {added} new words.");
    Ok(())
}
