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

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use tokio::sync::oneshot::Sender;
use wordcards_core::error::ErrorReport;
use wordcards_core::error::Fallible;
use wordcards_core::quiz::MatchingQuiz;
use wordcards_core::review::ReviewSession;
use wordcards_core::rng::TinyRng;

use crate::db::Database;

#[derive(Clone)]
pub struct ServerState {
    pub csv_path: PathBuf,
    pub feed_url: Option<String>,
    pub mutable: Arc<Mutex<MutableState>>,
    pub shutdown_tx: Arc<Mutex<Option<Sender<()>>>>,
}

pub struct MutableState {
    pub db: Database,
    pub rng: TinyRng,
    pub review: ReviewSession,
    pub quiz: MatchingQuiz,
    /// Message shown once on the next page load.
    pub flash: Option<Flash>,
}

pub enum Flash {
    Info(String),
    Error(String),
}

impl ServerState {
    pub fn lock(&self) -> Fallible<MutexGuard<'_, MutableState>> {
        self.mutable
            .lock()
            .map_err(|_| ErrorReport::new("session state is poisoned"))
    }

    /// Stop the server. Does nothing if it is already stopping.
    pub fn shutdown(&self) {
        if let Ok(mut tx) = self.shutdown_tx.lock() {
            if let Some(tx) = tx.take() {
                let _ = tx.send(());
            }
        }
    }
}
