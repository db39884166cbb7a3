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

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;

/// Identifier assigned by the store when a record is created.
pub type RecordId = i64;

/// Review status of a word. Stored as an integer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    New,
    Mastered,
}

impl Status {
    pub fn as_i64(self) -> i64 {
        match self {
            Status::New => 0,
            Status::Mastered => 1,
        }
    }
}

impl TryFrom<i64> for Status {
    type Error = ErrorReport;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Status::New),
            1 => Ok(Status::Mastered),
            _ => Err(ErrorReport::new(format!("invalid word status: {value}"))),
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::New => write!(f, "new"),
            Status::Mastered => write!(f, "mastered"),
        }
    }
}

/// A vocabulary entry as it exists in the store.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct VocabRecord {
    pub id: RecordId,
    pub word: String,
    pub meaning: String,
    pub example: String,
    pub status: Status,
}

/// A vocabulary entry that has not been stored yet. Always inserted as
/// [`Status::New`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NewRecord {
    pub word: String,
    pub meaning: String,
    pub example: String,
}

impl NewRecord {
    pub fn new(
        word: impl Into<String>,
        meaning: impl Into<String>,
        example: impl Into<String>,
    ) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
            example: example.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_integer() {
        assert_eq!(Status::try_from(0), Ok(Status::New));
        assert_eq!(Status::try_from(1), Ok(Status::Mastered));
        assert!(Status::try_from(2).is_err());
        assert!(Status::try_from(-1).is_err());
    }

    #[test]
    fn test_status_to_integer() {
        assert_eq!(Status::New.as_i64(), 0);
        assert_eq!(Status::Mastered.as_i64(), 1);
    }

    #[test]
    fn test_serialize_record() -> Result<(), serde_json::Error> {
        let record = VocabRecord {
            id: 3,
            word: "cat".to_string(),
            meaning: "貓".to_string(),
            example: String::new(),
            status: Status::Mastered,
        };
        let json = serde_json::to_string(&record)?;
        assert_eq!(
            json,
            r#"{"id":3,"word":"cat","meaning":"貓","example":"","status":"mastered"}"#
        );
        Ok(())
    }
}
