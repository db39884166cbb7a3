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

//! The matching quiz: five words, their five meanings in random order, one
//! pick per word.
//!
//! A round is frozen once submitted. Submitting again re-scores the same
//! picks. Only `new_round` discards it.
//!
//! Each option is meant to be used once. An option picked for more than one
//! word scores for none of them, whichever order the words are shown in.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::rng::TinyRng;
use crate::rng::sample;
use crate::rng::shuffle;
use crate::store::WordStore;
use crate::types::record::VocabRecord;

/// Number of words in a round.
pub const ROUND_SIZE: usize = 5;

/// The first entry of every option pool. Never a correct answer.
pub const PLACEHOLDER: &str = "Choose a meaning...";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StartRound {
    Started,
    /// The store has fewer than [`ROUND_SIZE`] words.
    InsufficientData { available: usize },
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct ItemOutcome {
    pub word: String,
    pub chosen: Option<String>,
    pub correct: String,
    pub is_correct: bool,
    /// The pick was also chosen for another word in the round.
    pub is_duplicate: bool,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    pub outcomes: Vec<ItemOutcome>,
}

impl QuizResult {
    pub fn is_perfect(&self) -> bool {
        self.score == self.total
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct QuizRound {
    items: Vec<VocabRecord>,
    correct_pairs: HashMap<String, String>,
    option_pool: Vec<String>,
    selections: HashMap<String, String>,
    submitted: bool,
}

impl QuizRound {
    fn new(items: Vec<VocabRecord>, rng: &mut TinyRng) -> Self {
        let correct_pairs = items
            .iter()
            .map(|r| (r.word.clone(), r.meaning.clone()))
            .collect();
        let meanings = items.iter().map(|r| r.meaning.clone()).collect();
        let mut option_pool = vec![PLACEHOLDER.to_string()];
        option_pool.extend(shuffle(meanings, rng));
        Self {
            items,
            correct_pairs,
            option_pool,
            selections: HashMap::new(),
            submitted: false,
        }
    }

    pub fn items(&self) -> &[VocabRecord] {
        &self.items
    }

    /// The placeholder followed by the shuffled meanings.
    pub fn option_pool(&self) -> &[String] {
        &self.option_pool
    }

    /// The current pick for `word`, if any.
    pub fn selection(&self, word: &str) -> Option<&str> {
        self.selections.get(word).map(String::as_str)
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Score the current picks.
    pub fn evaluate(&self) -> QuizResult {
        let mut uses: HashMap<&str, usize> = HashMap::new();
        for item in &self.items {
            if let Some(chosen) = self.selections.get(&item.word) {
                *uses.entry(chosen.as_str()).or_default() += 1;
            }
        }
        let outcomes: Vec<ItemOutcome> = self
            .items
            .iter()
            .map(|item| {
                let correct = self
                    .correct_pairs
                    .get(&item.word)
                    .cloned()
                    .unwrap_or_default();
                let chosen = self.selections.get(&item.word).cloned();
                let is_duplicate = chosen
                    .as_deref()
                    .is_some_and(|c| uses.get(c).copied().unwrap_or(0) > 1);
                let is_correct = !is_duplicate && chosen.as_deref() == Some(correct.as_str());
                ItemOutcome {
                    word: item.word.clone(),
                    chosen,
                    correct,
                    is_correct,
                    is_duplicate,
                }
            })
            .collect();
        QuizResult {
            score: outcomes.iter().filter(|o| o.is_correct).count(),
            total: outcomes.len(),
            outcomes,
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum QuizState {
    NoRound,
    Active(QuizRound),
}

pub struct MatchingQuiz {
    state: QuizState,
}

impl Default for MatchingQuiz {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchingQuiz {
    pub fn new() -> Self {
        Self {
            state: QuizState::NoRound,
        }
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn round(&self) -> Option<&QuizRound> {
        match &self.state {
            QuizState::Active(round) => Some(round),
            QuizState::NoRound => None,
        }
    }

    pub fn start_round(
        &mut self,
        store: &impl WordStore,
        rng: &mut TinyRng,
    ) -> Fallible<StartRound> {
        if let QuizState::Active(_) = self.state {
            return fail("a round is already in progress");
        }
        let available = store.count_all()?;
        if available < ROUND_SIZE {
            return Ok(StartRound::InsufficientData { available });
        }
        let words = store.select_all(None)?;
        if words.len() < ROUND_SIZE {
            return Ok(StartRound::InsufficientData {
                available: words.len(),
            });
        }
        let items = sample(words, ROUND_SIZE, rng);
        log::debug!(
            "Starting quiz round with words {:?}",
            items.iter().map(|r| r.id).collect::<Vec<_>>()
        );
        self.state = QuizState::Active(QuizRound::new(items, rng));
        Ok(StartRound::Started)
    }

    /// Record the pick for `word`. Picking the placeholder clears it.
    pub fn select_answer(&mut self, word: &str, choice: &str) -> Fallible<()> {
        self.select_answers(&[(word, choice)])
    }

    /// Record several picks at once. Every pair is checked before any is
    /// applied, so a rejected pair leaves the round as it was.
    pub fn select_answers(&mut self, picks: &[(&str, &str)]) -> Fallible<()> {
        let round = match &mut self.state {
            QuizState::Active(round) => round,
            QuizState::NoRound => return fail("there is no round in progress"),
        };
        if round.submitted {
            return fail("the round has already been submitted");
        }
        for (word, choice) in picks {
            if !round.correct_pairs.contains_key(*word) {
                return fail(format!("'{word}' is not part of this round"));
            }
            if !round.option_pool.iter().any(|o| o == choice) {
                return fail(format!("'{choice}' is not one of the options"));
            }
        }
        for (word, choice) in picks {
            if *choice == PLACEHOLDER {
                round.selections.remove(*word);
            } else {
                round.selections.insert(word.to_string(), choice.to_string());
            }
        }
        Ok(())
    }

    /// Score the round and freeze it.
    pub fn submit(&mut self) -> Fallible<QuizResult> {
        match &mut self.state {
            QuizState::Active(round) => {
                round.submitted = true;
                let result = round.evaluate();
                log::debug!("Quiz round scored {}/{}", result.score, result.total);
                Ok(result)
            }
            QuizState::NoRound => fail("there is no round to submit"),
        }
    }

    /// Discard the current round and its picks.
    pub fn new_round(&mut self) {
        self.state = QuizState::NoRound;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::store::MemoryStore;
    use crate::types::record::NewRecord;

    fn five_words() -> MemoryStore {
        MemoryStore::with_records(&[
            NewRecord::new("cat", "貓", ""),
            NewRecord::new("dog", "狗", ""),
            NewRecord::new("sun", "太陽", ""),
            NewRecord::new("moon", "月亮", ""),
            NewRecord::new("star", "星星", ""),
        ])
    }

    fn started(seed: u64) -> Fallible<MatchingQuiz> {
        let mut quiz = MatchingQuiz::new();
        let outcome = quiz.start_round(&five_words(), &mut TinyRng::from_seed(seed))?;
        assert_eq!(outcome, StartRound::Started);
        Ok(quiz)
    }

    #[test]
    fn test_four_words_is_insufficient() -> Fallible<()> {
        let store = MemoryStore::with_records(&[
            NewRecord::new("cat", "貓", ""),
            NewRecord::new("dog", "狗", ""),
            NewRecord::new("sun", "太陽", ""),
            NewRecord::new("moon", "月亮", ""),
        ]);
        let mut quiz = MatchingQuiz::new();
        let outcome = quiz.start_round(&store, &mut TinyRng::from_seed(0))?;
        assert_eq!(outcome, StartRound::InsufficientData { available: 4 });
        assert_eq!(quiz.state(), &QuizState::NoRound);
        Ok(())
    }

    #[test]
    fn test_round_covers_all_five_words() -> Fallible<()> {
        for seed in 0..30 {
            let quiz = started(seed)?;
            let round = quiz.round().unwrap();
            assert_eq!(round.items().len(), 5);
            let words: HashSet<&str> = round.items().iter().map(|r| r.word.as_str()).collect();
            assert_eq!(
                words,
                HashSet::from(["cat", "dog", "sun", "moon", "star"])
            );
            assert_eq!(round.option_pool().len(), 6);
            assert_eq!(round.option_pool()[0], PLACEHOLDER);
            let meanings: HashSet<&str> =
                round.option_pool()[1..].iter().map(String::as_str).collect();
            assert_eq!(
                meanings,
                HashSet::from(["貓", "狗", "太陽", "月亮", "星星"])
            );
            assert!(!round.is_submitted());
        }
        Ok(())
    }

    #[test]
    fn test_round_samples_distinct_words_from_larger_store() -> Fallible<()> {
        let records: Vec<NewRecord> = (0..12)
            .map(|i| NewRecord::new(format!("w{i}"), format!("m{i}"), ""))
            .collect();
        let store = MemoryStore::with_records(&records);
        let mut quiz = MatchingQuiz::new();
        quiz.start_round(&store, &mut TinyRng::from_seed(17))?;
        let round = quiz.round().unwrap();
        let ids: HashSet<i64> = round.items().iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), ROUND_SIZE);
        Ok(())
    }

    #[test]
    fn test_scoring() -> Fallible<()> {
        let mut quiz = started(1)?;
        quiz.select_answer("cat", "貓")?;
        quiz.select_answer("dog", "太陽")?;
        quiz.select_answer("sun", "太陽")?;
        quiz.select_answer("moon", "月亮")?;
        quiz.select_answer("star", "星星")?;
        let result = quiz.submit()?;
        assert_eq!(result.score, 3);
        assert_eq!(result.total, 5);
        assert!(!result.is_perfect());
        let wrong: HashSet<&str> = result
            .outcomes
            .iter()
            .filter(|o| !o.is_correct)
            .map(|o| o.word.as_str())
            .collect();
        assert_eq!(wrong, HashSet::from(["dog", "sun"]));
        let duplicates: HashSet<&str> = result
            .outcomes
            .iter()
            .filter(|o| o.is_duplicate)
            .map(|o| o.word.as_str())
            .collect();
        assert_eq!(duplicates, HashSet::from(["dog", "sun"]));
        Ok(())
    }

    #[test]
    fn test_shared_pick_never_scores_in_any_order() -> Fallible<()> {
        for seed in 0..30 {
            let mut quiz = started(seed)?;
            quiz.select_answer("sun", "太陽")?;
            quiz.select_answer("dog", "太陽")?;
            let result = quiz.submit()?;
            assert_eq!(result.score, 0);
        }
        Ok(())
    }

    #[test]
    fn test_batch_selection_is_all_or_nothing() -> Fallible<()> {
        let mut quiz = started(11)?;
        quiz.select_answer("star", "星星")?;
        let before = quiz.state().clone();
        assert!(
            quiz.select_answers(&[("cat", "貓"), ("moon", "bogus")])
                .is_err()
        );
        assert_eq!(quiz.state(), &before);
        assert_eq!(quiz.round().unwrap().selection("cat"), None);
        quiz.select_answers(&[("cat", "貓"), ("star", PLACEHOLDER)])?;
        let round = quiz.round().unwrap();
        assert_eq!(round.selection("cat"), Some("貓"));
        assert_eq!(round.selection("star"), None);
        Ok(())
    }

    #[test]
    fn test_submit_is_idempotent() -> Fallible<()> {
        let mut quiz = started(2)?;
        quiz.select_answer("cat", "貓")?;
        quiz.select_answer("dog", "月亮")?;
        let first = quiz.submit()?;
        let items_before = quiz.round().unwrap().items().to_vec();
        let second = quiz.submit()?;
        assert_eq!(first, second);
        assert_eq!(first.score, 1);
        assert_eq!(quiz.round().unwrap().items(), items_before.as_slice());
        Ok(())
    }

    #[test]
    fn test_submitted_round_is_frozen() -> Fallible<()> {
        let mut quiz = started(3)?;
        quiz.select_answer("cat", "貓")?;
        quiz.submit()?;
        assert!(quiz.select_answer("dog", "狗").is_err());
        assert!(quiz.round().unwrap().is_submitted());
        assert_eq!(quiz.round().unwrap().selection("dog"), None);
        Ok(())
    }

    #[test]
    fn test_unanswered_never_scores() -> Fallible<()> {
        let mut quiz = started(4)?;
        quiz.select_answer("cat", "貓")?;
        quiz.select_answer("cat", PLACEHOLDER)?;
        let result = quiz.submit()?;
        assert_eq!(result.score, 0);
        assert!(result.outcomes.iter().all(|o| o.chosen.is_none()));
        Ok(())
    }

    #[test]
    fn test_perfect_round() -> Fallible<()> {
        let mut quiz = started(5)?;
        for (word, meaning) in [
            ("cat", "貓"),
            ("dog", "狗"),
            ("sun", "太陽"),
            ("moon", "月亮"),
            ("star", "星星"),
        ] {
            quiz.select_answer(word, meaning)?;
        }
        assert!(quiz.submit()?.is_perfect());
        Ok(())
    }

    #[test]
    fn test_selection_overwrites() -> Fallible<()> {
        let mut quiz = started(6)?;
        quiz.select_answer("cat", "狗")?;
        quiz.select_answer("cat", "貓")?;
        assert_eq!(quiz.round().unwrap().selection("cat"), Some("貓"));
        assert_eq!(quiz.submit()?.score, 1);
        Ok(())
    }

    #[test]
    fn test_rejects_unknown_word_and_option() -> Fallible<()> {
        let mut quiz = started(7)?;
        assert!(quiz.select_answer("comet", "貓").is_err());
        assert!(quiz.select_answer("cat", "彗星").is_err());
        assert_eq!(quiz.round().unwrap().selection("cat"), None);
        Ok(())
    }

    #[test]
    fn test_no_round_transitions() {
        let mut quiz = MatchingQuiz::new();
        assert!(quiz.submit().is_err());
        assert!(quiz.select_answer("cat", "貓").is_err());
        assert_eq!(quiz.state(), &QuizState::NoRound);
    }

    #[test]
    fn test_start_round_twice_is_rejected() -> Fallible<()> {
        let mut quiz = started(8)?;
        let before = quiz.state().clone();
        assert!(
            quiz.start_round(&five_words(), &mut TinyRng::from_seed(9))
                .is_err()
        );
        assert_eq!(quiz.state(), &before);
        Ok(())
    }

    #[test]
    fn test_new_round_discards_selections() -> Fallible<()> {
        let store = five_words();
        let mut rng = TinyRng::from_seed(10);
        let mut quiz = MatchingQuiz::new();
        quiz.start_round(&store, &mut rng)?;
        quiz.select_answer("cat", "貓")?;
        quiz.submit()?;
        quiz.new_round();
        assert_eq!(quiz.state(), &QuizState::NoRound);
        quiz.start_round(&store, &mut rng)?;
        let round = quiz.round().unwrap();
        assert!(!round.is_submitted());
        for item in round.items() {
            assert_eq!(round.selection(&item.word), None);
        }
        assert_eq!(round.option_pool().len(), 6);
        Ok(())
    }

    #[test]
    fn test_duplicate_meanings_are_indistinguishable() -> Fallible<()> {
        let store = MemoryStore::with_records(&[
            NewRecord::new("big", "大", ""),
            NewRecord::new("large", "大", ""),
            NewRecord::new("sun", "太陽", ""),
            NewRecord::new("moon", "月亮", ""),
            NewRecord::new("star", "星星", ""),
        ]);
        let mut quiz = MatchingQuiz::new();
        quiz.start_round(&store, &mut TinyRng::from_seed(12))?;
        let pool = quiz.round().unwrap().option_pool();
        assert_eq!(pool.iter().filter(|o| o.as_str() == "大").count(), 2);
        quiz.select_answer("big", "大")?;
        quiz.select_answer("large", "大")?;
        // Two identical options picked once each still count as a shared pick.
        assert_eq!(quiz.submit()?.score, 0);
        Ok(())
    }
}
