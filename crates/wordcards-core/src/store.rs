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

//! The persistence contract the review and quiz sessions are written against.

use crate::error::Fallible;
use crate::error::fail;
use crate::types::record::NewRecord;
use crate::types::record::RecordId;
use crate::types::record::Status;
use crate::types::record::VocabRecord;

pub trait WordStore {
    /// Create the backing table if it does not exist yet.
    fn create_schema_if_absent(&mut self) -> Fallible<()>;

    /// Total number of records, regardless of status.
    fn count_all(&self) -> Fallible<usize>;

    /// All records, optionally restricted to one status, ordered by id.
    fn select_all(&self, status: Option<Status>) -> Fallible<Vec<VocabRecord>>;

    /// Delete every record and insert `records` with status [`Status::New`].
    fn replace_all(&mut self, records: &[NewRecord]) -> Fallible<()>;

    /// Append a single record with status [`Status::New`].
    fn insert(&mut self, record: &NewRecord) -> Fallible<RecordId>;

    /// Set the status of one record. Fails if the id is unknown.
    fn update_status(&mut self, id: RecordId, status: Status) -> Fallible<()>;
}

/// A [`WordStore`] that lives in memory. Ids are never reused, like the
/// SQLite store.
#[derive(Default)]
pub struct MemoryStore {
    records: Vec<VocabRecord>,
    next_id: RecordId,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
            writes: 0,
        }
    }

    pub fn with_records(records: &[NewRecord]) -> Self {
        let mut store = Self::new();
        for record in records {
            store.push(record);
        }
        store
    }

    /// Number of `update_status` calls that changed a record.
    pub fn status_writes(&self) -> usize {
        self.writes
    }

    fn push(&mut self, record: &NewRecord) -> RecordId {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.records.push(VocabRecord {
            id,
            word: record.word.clone(),
            meaning: record.meaning.clone(),
            example: record.example.clone(),
            status: Status::New,
        });
        id
    }
}

impl WordStore for MemoryStore {
    fn create_schema_if_absent(&mut self) -> Fallible<()> {
        Ok(())
    }

    fn count_all(&self) -> Fallible<usize> {
        Ok(self.records.len())
    }

    fn select_all(&self, status: Option<Status>) -> Fallible<Vec<VocabRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .cloned()
            .collect())
    }

    fn replace_all(&mut self, records: &[NewRecord]) -> Fallible<()> {
        self.records.clear();
        for record in records {
            self.push(record);
        }
        Ok(())
    }

    fn insert(&mut self, record: &NewRecord) -> Fallible<RecordId> {
        Ok(self.push(record))
    }

    fn update_status(&mut self, id: RecordId, status: Status) -> Fallible<()> {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.status = status;
                self.writes += 1;
                Ok(())
            }
            None => fail(format!("no word with id {id}")),
        }
    }
}
