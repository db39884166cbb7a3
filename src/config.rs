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

use serde::Deserialize;
use wordcards_core::error::ErrorReport;
use wordcards_core::error::Fallible;

/// Name of the optional configuration file in the collection directory.
pub const CONFIG_FILE: &str = "wordcards.toml";

/// Settings read from `wordcards.toml`. Every key is optional.
#[derive(Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Database file name, relative to the collection directory.
    pub database: String,
    /// Vocabulary file name, relative to the collection directory.
    pub csv: String,
    /// URL of the JSON word feed.
    pub feed_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: "wordcards.db".to_string(),
            csv: "vocabulary.csv".to_string(),
            feed_url: None,
        }
    }
}

impl Config {
    /// Load the configuration for a collection, falling back to the defaults
    /// when there is no configuration file.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE);
        let text = match read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No {CONFIG_FILE} found, using defaults");
                return Ok(Config::default());
            }
            Err(e) => return Err(e.into()),
        };
        let config: Config = toml::from_str(&text)
            .map_err(|e| ErrorReport::new(format!("Failed to parse {CONFIG_FILE}: {e}")))?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}
