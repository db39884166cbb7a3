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

//! Filling the word store from the vocabulary file or the remote feed.

pub mod csv;
pub mod feed;

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;
use std::path::PathBuf;

use wordcards_core::error::ErrorReport;

#[derive(Debug)]
pub enum IngestError {
    /// The vocabulary file does not exist.
    SourceMissing(PathBuf),
    /// The vocabulary file has no usable lines.
    SourceEmpty(PathBuf),
    /// The vocabulary file exists but could not be read.
    Unreadable { path: PathBuf, message: String },
    /// The feed could not be fetched or parsed.
    Transport(String),
    /// The store rejected a read or write.
    Store(ErrorReport),
}

impl Display for IngestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestError::SourceMissing(path) => {
                write!(f, "vocabulary file not found: {}", path.display())
            }
            IngestError::SourceEmpty(path) => {
                write!(f, "vocabulary file has no words: {}", path.display())
            }
            IngestError::Unreadable { path, message } => {
                write!(f, "failed to read {}: {message}", path.display())
            }
            IngestError::Transport(message) => write!(f, "failed to download words: {message}"),
            IngestError::Store(report) => write!(f, "{}", report.message()),
        }
    }
}

impl Error for IngestError {}

impl From<ErrorReport> for IngestError {
    fn from(value: ErrorReport) -> Self {
        IngestError::Store(value)
    }
}

impl From<IngestError> for ErrorReport {
    fn from(value: IngestError) -> Self {
        match value {
            IngestError::Store(report) => report,
            other => ErrorReport::new(other.to_string()),
        }
    }
}
