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

//! wordcards-core: Core library for the wordcards vocabulary trainer.
//!
//! This library is free of I/O and provides:
//! - Vocabulary records and the `WordStore` persistence contract
//! - Parsing of the delimited-text vocabulary file and the JSON word feed
//! - The flashcard review and matching quiz state machines

pub mod error;
pub mod feed;
pub mod parser;
pub mod quiz;
pub mod review;
pub mod rng;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use error::{ErrorReport, Fallible, fail};
pub use quiz::{MatchingQuiz, QuizResult, StartRound};
pub use review::{ReviewSession, ReviewState};
pub use store::{MemoryStore, WordStore};
pub use types::record::{NewRecord, RecordId, Status, VocabRecord};
pub use types::timestamp::Timestamp;
