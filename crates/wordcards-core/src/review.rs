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

//! Flashcard review: show one unmastered word at a time, reveal its meaning,
//! and record whether the user has mastered it.

use crate::error::Fallible;
use crate::error::fail;
use crate::rng::TinyRng;
use crate::store::WordStore;
use crate::types::record::Status;
use crate::types::record::VocabRecord;
use crate::types::timestamp::Timestamp;

#[derive(Clone, PartialEq, Debug)]
pub enum ReviewState {
    /// No card is active. The next `start_card` picks one.
    Idle,
    /// A card is on screen.
    Card {
        record: VocabRecord,
        revealed: bool,
    },
    /// Every word is mastered.
    Complete,
}

/// Counts kept for the end-of-session summary.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ReviewTally {
    pub answered: usize,
    pub mastered: usize,
}

pub struct ReviewSession {
    state: ReviewState,
    tally: ReviewTally,
    started_at: Timestamp,
}

impl ReviewSession {
    pub fn new(started_at: Timestamp) -> Self {
        Self {
            state: ReviewState::Idle,
            tally: ReviewTally::default(),
            started_at,
        }
    }

    pub fn state(&self) -> &ReviewState {
        &self.state
    }

    pub fn tally(&self) -> ReviewTally {
        self.tally
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    /// The active card, if any.
    pub fn card(&self) -> Option<&VocabRecord> {
        match &self.state {
            ReviewState::Card { record, .. } => Some(record),
            _ => None,
        }
    }

    pub fn is_revealed(&self) -> bool {
        matches!(self.state, ReviewState::Card { revealed: true, .. })
    }

    /// Pick a random unmastered word. Moves to [`ReviewState::Complete`] if
    /// there is none. Starting from `Complete` begins a new pass with a
    /// fresh tally.
    pub fn start_card(&mut self, store: &impl WordStore, rng: &mut TinyRng) -> Fallible<()> {
        if let ReviewState::Card { .. } = self.state {
            return fail("a card is already being reviewed");
        }
        let mut candidates = store.select_all(Some(Status::New))?;
        if self.state == ReviewState::Complete {
            self.tally = ReviewTally::default();
        }
        self.state = match rng.index(candidates.len()) {
            Some(idx) => {
                let record = candidates.swap_remove(idx);
                log::debug!("Showing card for word {}", record.id);
                ReviewState::Card {
                    record,
                    revealed: false,
                }
            }
            None => ReviewState::Complete,
        };
        Ok(())
    }

    pub fn reveal(&mut self) -> Fallible<()> {
        match &mut self.state {
            ReviewState::Card { revealed, .. } if !*revealed => {
                *revealed = true;
                Ok(())
            }
            ReviewState::Card { .. } => fail("the card is already revealed"),
            _ => fail("there is no card to reveal"),
        }
    }

    /// Put the card aside without changing its status.
    pub fn mark_unfamiliar(&mut self) -> Fallible<()> {
        self.revealed_card()?;
        self.state = ReviewState::Idle;
        self.tally.answered += 1;
        Ok(())
    }

    /// Mark the card's word as mastered in the store.
    pub fn mark_mastered(&mut self, store: &mut impl WordStore) -> Fallible<()> {
        let id = self.revealed_card()?.id;
        store.update_status(id, Status::Mastered)?;
        log::debug!("Word {id} marked as mastered");
        self.state = ReviewState::Idle;
        self.tally.answered += 1;
        self.tally.mastered += 1;
        Ok(())
    }

    /// Drop the active card, if any, so the next `start_card` re-reads the store.
    /// A finished pass also loses its tally.
    pub fn reset(&mut self) {
        if self.state == ReviewState::Complete {
            self.tally = ReviewTally::default();
        }
        self.state = ReviewState::Idle;
    }

    fn revealed_card(&self) -> Fallible<&VocabRecord> {
        match &self.state {
            ReviewState::Card {
                record,
                revealed: true,
            } => Ok(record),
            ReviewState::Card { .. } => fail("the card must be revealed first"),
            _ => fail("there is no card to answer"),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::store::MemoryStore;
    use crate::types::record::NewRecord;

    fn session() -> ReviewSession {
        let ndt = NaiveDateTime::parse_from_str("2025-01-01T09:00:00", "%Y-%m-%dT%H:%M:%S")
            .unwrap();
        ReviewSession::new(Timestamp::new(ndt))
    }

    fn store() -> MemoryStore {
        MemoryStore::with_records(&[
            NewRecord::new("cat", "貓", ""),
            NewRecord::new("dog", "狗", "The dog barks."),
            NewRecord::new("sun", "太陽", ""),
        ])
    }

    #[test]
    fn test_initial_state() {
        let session = session();
        assert_eq!(session.state(), &ReviewState::Idle);
        assert_eq!(session.card(), None);
    }

    #[test]
    fn test_empty_store_is_complete() -> Fallible<()> {
        let store = MemoryStore::new();
        let mut session = session();
        session.start_card(&store, &mut TinyRng::from_seed(0))?;
        assert_eq!(session.state(), &ReviewState::Complete);
        Ok(())
    }

    #[test]
    fn test_never_shows_mastered_words() -> Fallible<()> {
        let mut store = store();
        let cat = store.select_all(None)?[0].id;
        store.update_status(cat, Status::Mastered)?;
        for seed in 0..100 {
            let mut session = session();
            session.start_card(&store, &mut TinyRng::from_seed(seed))?;
            let card = session.card().unwrap();
            assert_ne!(card.id, cat);
            assert_eq!(card.status, Status::New);
        }
        Ok(())
    }

    #[test]
    fn test_reveal_then_master() -> Fallible<()> {
        let mut store = store();
        let mut rng = TinyRng::from_seed(3);
        let mut session = session();
        session.start_card(&store, &mut rng)?;
        assert!(!session.is_revealed());
        session.reveal()?;
        assert!(session.is_revealed());
        let id = session.card().unwrap().id;
        session.mark_mastered(&mut store)?;
        assert_eq!(session.state(), &ReviewState::Idle);
        assert_eq!(store.status_writes(), 1);
        let mastered = store.select_all(Some(Status::Mastered))?;
        assert_eq!(mastered.len(), 1);
        assert_eq!(mastered[0].id, id);
        Ok(())
    }

    #[test]
    fn test_mastered_word_is_excluded_afterwards() -> Fallible<()> {
        let mut store = store();
        let mut rng = TinyRng::from_seed(11);
        let mut session = session();
        session.start_card(&store, &mut rng)?;
        session.reveal()?;
        let id = session.card().unwrap().id;
        session.mark_mastered(&mut store)?;
        for _ in 0..50 {
            session.start_card(&store, &mut rng)?;
            assert_ne!(session.card().unwrap().id, id);
            session.reveal()?;
            session.mark_unfamiliar()?;
        }
        Ok(())
    }

    #[test]
    fn test_unfamiliar_leaves_status_alone() -> Fallible<()> {
        let store = store();
        let mut session = session();
        session.start_card(&store, &mut TinyRng::from_seed(5))?;
        session.reveal()?;
        session.mark_unfamiliar()?;
        assert_eq!(session.state(), &ReviewState::Idle);
        assert_eq!(store.status_writes(), 0);
        assert_eq!(store.select_all(Some(Status::New))?.len(), 3);
        assert_eq!(
            session.tally(),
            ReviewTally {
                answered: 1,
                mastered: 0
            }
        );
        Ok(())
    }

    #[test]
    fn test_mastering_everything_completes() -> Fallible<()> {
        let mut store = store();
        let mut rng = TinyRng::from_seed(9);
        let mut session = session();
        for _ in 0..3 {
            session.start_card(&store, &mut rng)?;
            session.reveal()?;
            session.mark_mastered(&mut store)?;
        }
        session.start_card(&store, &mut rng)?;
        assert_eq!(session.state(), &ReviewState::Complete);
        assert_eq!(session.tally().mastered, 3);
        Ok(())
    }

    #[test]
    fn test_answer_before_reveal_is_rejected() -> Fallible<()> {
        let mut store = store();
        let mut session = session();
        session.start_card(&store, &mut TinyRng::from_seed(1))?;
        let before = session.state().clone();
        assert!(session.mark_mastered(&mut store).is_err());
        assert!(session.mark_unfamiliar().is_err());
        assert_eq!(session.state(), &before);
        assert_eq!(store.status_writes(), 0);
        Ok(())
    }

    #[test]
    fn test_invalid_transitions_from_idle() {
        let mut store = store();
        let mut session = session();
        assert!(session.reveal().is_err());
        assert!(session.mark_unfamiliar().is_err());
        assert!(session.mark_mastered(&mut store).is_err());
        assert_eq!(session.state(), &ReviewState::Idle);
    }

    #[test]
    fn test_start_card_does_not_replace_active_card() -> Fallible<()> {
        let store = store();
        let mut rng = TinyRng::from_seed(2);
        let mut session = session();
        session.start_card(&store, &mut rng)?;
        let before = session.state().clone();
        assert!(session.start_card(&store, &mut rng).is_err());
        assert_eq!(session.state(), &before);
        Ok(())
    }

    #[test]
    fn test_double_reveal_is_rejected() -> Fallible<()> {
        let store = store();
        let mut session = session();
        session.start_card(&store, &mut TinyRng::from_seed(4))?;
        session.reveal()?;
        assert!(session.reveal().is_err());
        assert!(session.is_revealed());
        Ok(())
    }

    #[test]
    fn test_failed_store_write_keeps_card() -> Fallible<()> {
        let mut store = store();
        let mut session = session();
        session.start_card(&store, &mut TinyRng::from_seed(6))?;
        session.reveal()?;
        let before = session.state().clone();
        // Replacing the data invalidates the card's id.
        store.replace_all(&[NewRecord::new("moon", "月亮", "")])?;
        assert!(session.mark_mastered(&mut store).is_err());
        assert_eq!(session.state(), &before);
        assert_eq!(session.tally().answered, 0);
        Ok(())
    }

    #[test]
    fn test_reset_after_completion() -> Fallible<()> {
        let mut store = MemoryStore::new();
        let mut rng = TinyRng::from_seed(0);
        let mut session = session();
        session.start_card(&store, &mut rng)?;
        assert_eq!(session.state(), &ReviewState::Complete);
        store.replace_all(&[NewRecord::new("moon", "月亮", "")])?;
        session.reset();
        session.start_card(&store, &mut rng)?;
        assert_eq!(session.card().map(|r| r.word.as_str()), Some("moon"));
        Ok(())
    }

    #[test]
    fn test_new_pass_clears_tally() -> Fallible<()> {
        let mut store = MemoryStore::with_records(&[NewRecord::new("cat", "貓", "")]);
        let mut rng = TinyRng::from_seed(0);
        let mut session = session();
        session.start_card(&store, &mut rng)?;
        session.reveal()?;
        session.mark_mastered(&mut store)?;
        session.start_card(&store, &mut rng)?;
        assert_eq!(session.state(), &ReviewState::Complete);
        assert_eq!(session.tally().mastered, 1);

        store.insert(&NewRecord::new("dog", "狗", ""))?;
        session.start_card(&store, &mut rng)?;
        assert_eq!(session.card().map(|r| r.word.as_str()), Some("dog"));
        assert_eq!(session.tally(), ReviewTally::default());
        Ok(())
    }

    #[test]
    fn test_reset_mid_pass_keeps_tally() -> Fallible<()> {
        let mut store = MemoryStore::with_records(&[
            NewRecord::new("cat", "貓", ""),
            NewRecord::new("dog", "狗", ""),
        ]);
        let mut rng = TinyRng::from_seed(0);
        let mut session = session();
        session.start_card(&store, &mut rng)?;
        session.reveal()?;
        session.mark_mastered(&mut store)?;
        session.start_card(&store, &mut rng)?;
        session.reset();
        assert_eq!(session.state(), &ReviewState::Idle);
        assert_eq!(session.tally().answered, 1);
        Ok(())
    }
}
