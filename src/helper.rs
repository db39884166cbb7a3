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

//! Helpers shared by the test modules.

use std::fs::write;
use std::path::PathBuf;

use tempfile::tempdir;
use wordcards_core::error::Fallible;

/// Create an empty directory that outlives the test.
pub fn create_tmp_directory() -> Fallible<PathBuf> {
    let dir = tempdir()?.keep();
    Ok(dir.canonicalize()?)
}

/// Create a collection directory whose `vocabulary.csv` holds `csv`.
pub fn create_tmp_collection(csv: &str) -> Fallible<PathBuf> {
    let dir = create_tmp_directory()?;
    write(dir.join("vocabulary.csv"), csv)?;
    Ok(dir)
}

/// Five words with distinct meanings.
pub const FIVE_WORDS: &str = "word,meaning,example\n\
cat,貓,The cat sleeps.\n\
dog,狗\n\
sun,太陽\n\
moon,月亮\n\
star,星星\n";
