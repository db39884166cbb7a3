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

use std::env::current_dir;
use std::path::PathBuf;

use wordcards_core::error::Fallible;
use wordcards_core::error::fail;
use wordcards_core::store::WordStore;

use crate::config::Config;
use crate::db::Database;
use crate::ingest::IngestError;
use crate::ingest::csv::import_csv;

/// A collection directory: the word database, the vocabulary file, and the
/// optional configuration file.
pub struct Collection {
    pub directory: PathBuf,
    pub config: Config,
    pub db: Database,
}

impl Collection {
    /// Open the collection in `directory`, or the current directory, creating
    /// the database table if needed.
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        if !directory.exists() {
            return fail("directory does not exist.");
        }
        let directory = directory.canonicalize()?;
        let config = Config::load(&directory)?;
        let mut db = Database::open(&directory.join(&config.database))?;
        db.create_schema_if_absent()?;
        Ok(Self {
            directory,
            config,
            db,
        })
    }

    pub fn csv_path(&self) -> PathBuf {
        self.directory.join(&self.config.csv)
    }

    /// Load the vocabulary file if the database has no words yet. A missing
    /// or empty file is not an error here: the user can add words later.
    pub fn seed_if_empty(&mut self) -> Fallible<()> {
        if self.db.count_all()? > 0 {
            return Ok(());
        }
        let path = self.csv_path();
        match import_csv(&mut self.db, &path) {
            Ok(_) => Ok(()),
            Err(IngestError::SourceMissing(_)) | Err(IngestError::SourceEmpty(_)) => {
                log::warn!("No words loaded: {} has no usable entries", path.display());
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
