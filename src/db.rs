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

use std::path::Path;

use rusqlite::Connection;
use rusqlite::params;
use wordcards_core::error::ErrorReport;
use wordcards_core::error::Fallible;
use wordcards_core::error::fail;
use wordcards_core::store::WordStore;
use wordcards_core::types::record::NewRecord;
use wordcards_core::types::record::RecordId;
use wordcards_core::types::record::Status;
use wordcards_core::types::record::VocabRecord;

// Columns are nullable so databases written by older versions still load.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS vocab (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    word TEXT,
    meaning TEXT,
    example TEXT,
    status INTEGER DEFAULT 0
);
";

/// The SQLite word store.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Fallible<Self> {
        log::debug!("Opening database at {}", path.display());
        let conn = Connection::open(path).map_err(db_error)?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub fn in_memory() -> Fallible<Self> {
        let conn = Connection::open_in_memory().map_err(db_error)?;
        Ok(Self { conn })
    }
}

impl WordStore for Database {
    fn create_schema_if_absent(&mut self) -> Fallible<()> {
        self.conn.execute_batch(SCHEMA).map_err(db_error)
    }

    fn count_all(&self) -> Fallible<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT count(*) FROM vocab", [], |row| row.get(0))
            .map_err(db_error)?;
        Ok(count as usize)
    }

    fn select_all(&self, status: Option<Status>) -> Fallible<Vec<VocabRecord>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, word, meaning, example, status FROM vocab \
                 WHERE ?1 IS NULL OR status = ?1 ORDER BY id",
            )
            .map_err(db_error)?;
        let rows = stmt
            .query_map([status.map(Status::as_i64)], |row| {
                Ok((
                    row.get::<_, RecordId>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, Option<i64>>(4)?,
                ))
            })
            .map_err(db_error)?;
        let mut records = Vec::new();
        for row in rows {
            let (id, word, meaning, example, status) = row.map_err(db_error)?;
            records.push(VocabRecord {
                id,
                word: word.unwrap_or_default(),
                meaning: meaning.unwrap_or_default(),
                example: example.unwrap_or_default(),
                status: Status::try_from(status.unwrap_or(0))?,
            });
        }
        Ok(records)
    }

    fn replace_all(&mut self, records: &[NewRecord]) -> Fallible<()> {
        let tx = self.conn.transaction().map_err(db_error)?;
        tx.execute("DELETE FROM vocab", []).map_err(db_error)?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO vocab (word, meaning, example, status) VALUES (?1, ?2, ?3, ?4)",
                )
                .map_err(db_error)?;
            for record in records {
                stmt.execute(params![
                    record.word,
                    record.meaning,
                    record.example,
                    Status::New.as_i64()
                ])
                .map_err(db_error)?;
            }
        }
        tx.commit().map_err(db_error)?;
        log::debug!("Replaced vocabulary with {} words", records.len());
        Ok(())
    }

    fn insert(&mut self, record: &NewRecord) -> Fallible<RecordId> {
        self.conn
            .execute(
                "INSERT INTO vocab (word, meaning, example, status) VALUES (?1, ?2, ?3, ?4)",
                params![
                    record.word,
                    record.meaning,
                    record.example,
                    Status::New.as_i64()
                ],
            )
            .map_err(db_error)?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_status(&mut self, id: RecordId, status: Status) -> Fallible<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE vocab SET status = ?1 WHERE id = ?2",
                params![status.as_i64(), id],
            )
            .map_err(db_error)?;
        if changed == 0 {
            return fail(format!("no word with id {id}"));
        }
        Ok(())
    }
}

fn db_error(e: rusqlite::Error) -> ErrorReport {
    ErrorReport::new(format!("database error: {e}"))
}
