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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;
use wordcards_core::error::ErrorReport;
use wordcards_core::error::Fallible;
use wordcards_core::quiz::PLACEHOLDER;
use wordcards_core::quiz::QuizRound;
use wordcards_core::quiz::QuizState;
use wordcards_core::quiz::StartRound;
use wordcards_core::review::ReviewSession;
use wordcards_core::review::ReviewState;
use wordcards_core::store::WordStore;
use wordcards_core::types::record::Status;
use wordcards_core::types::record::VocabRecord;
use wordcards_core::types::timestamp::Timestamp;

use crate::cmd::serve::state::MutableState;
use crate::cmd::serve::state::ServerState;
use crate::cmd::serve::template::flash_banner;
use crate::cmd::serve::template::page_template;

pub async fn menu_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    respond(render_menu(&state))
}

pub async fn review_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    respond(render_review(&state))
}

pub async fn quiz_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    respond(render_quiz(&state))
}

pub async fn words_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    respond(render_words(&state))
}

pub async fn refresh_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    respond(render_refresh(&state))
}

pub fn respond(body: Fallible<Markup>) -> (StatusCode, Html<String>) {
    match body {
        Ok(body) => (StatusCode::OK, Html(page_template(body).into_string())),
        Err(e) => {
            log::error!("{e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(page_template(error_page(&e)).into_string()),
            )
        }
    }
}

fn error_page(e: &ErrorReport) -> Markup {
    html! {
        h1 { "Something went wrong" }
        div.flash.error { (e.message()) }
    }
}

fn render_menu(state: &ServerState) -> Fallible<Markup> {
    let mut m = state.lock()?;
    let total = m.db.count_all()?;
    let new = m.db.select_all(Some(Status::New))?.len();
    let flash = m.flash.take();
    Ok(html! {
        (flash_banner(flash))
        h1 { "wordcards" }
        div.stats {
            div.stat {
                div.label { "Words" }
                div.value { (total) }
            }
            div.stat {
                div.label { "To learn" }
                div.value { (new) }
            }
            div.stat {
                div.label { "Mastered" }
                div.value { (total - new) }
            }
        }
        ul {
            li { a href="/review" { "Flashcards" } ": reveal each word's meaning and mark the ones you know." }
            li { a href="/quiz" { "Matching" } ": match five words to their meanings." }
            li { a href="/words" { "Word list" } }
            li { a href="/refresh" { "Refresh data" } ": reload the vocabulary file or download new words." }
        }
        form action="/" method="post" {
            input id="shutdown" type="submit" name="action" value="Shutdown" title="Stop the server.";
        }
    })
}

fn render_review(state: &ServerState) -> Fallible<Markup> {
    let mut guard = state.lock()?;
    let m: &mut MutableState = &mut guard;
    if matches!(m.review.state(), ReviewState::Idle) {
        m.review.start_card(&m.db, &mut m.rng)?;
    }
    let flash = m.flash.take();
    let body = match m.review.state() {
        ReviewState::Card { record, revealed } => render_card(record, *revealed),
        ReviewState::Complete => render_completion(&m.review),
        // `start_card` never leaves the session idle.
        ReviewState::Idle => html! {},
    };
    Ok(html! {
        (flash_banner(flash))
        h1 { "Flashcards" }
        (body)
    })
}

fn render_card(record: &VocabRecord, revealed: bool) -> Markup {
    let controls = if revealed {
        html! {
            div.controls {
                form action="/review" method="post" {
                    input id="unfamiliar" type="submit" name="action" value="Unfamiliar" title="Keep this word in the deck.";
                }
                form action="/review" method="post" {
                    input.primary id="mastered" type="submit" name="action" value="Mastered" title="Stop showing this word.";
                }
            }
        }
    } else {
        html! {
            div.controls {
                form action="/review" method="post" {
                    input.primary id="reveal" type="submit" name="action" value="Reveal" title="Show the meaning.";
                }
            }
        }
    };
    html! {
        div.card {
            h2 { (record.word) }
            @if revealed {
                div.meaning { (record.meaning) }
                @if record.example.is_empty() {
                    div.example { "(no example)" }
                } @else {
                    div.example { (record.example) }
                }
            }
        }
        (controls)
    }
}

fn render_completion(review: &ReviewSession) -> Markup {
    let tally = review.tally();
    let elapsed = review.started_at().seconds_until(Timestamp::now());
    let pace = if tally.answered == 0 {
        0.0
    } else {
        elapsed as f64 / tally.answered as f64
    };
    html! {
        div.finished {
            h2 { "All words mastered!" }
            p { "To practise again, reload the vocabulary file from the refresh page." }
            table {
                tbody {
                    tr { td.key { "Cards answered" } td.val { (tally.answered) } }
                    tr { td.key { "Words mastered" } td.val { (tally.mastered) } }
                    tr { td.key { "Pace (s/card)" } td.val { (format!("{pace:.2}")) } }
                }
            }
        }
    }
}

fn render_quiz(state: &ServerState) -> Fallible<Markup> {
    let mut guard = state.lock()?;
    let m: &mut MutableState = &mut guard;
    if matches!(m.quiz.state(), QuizState::NoRound) {
        if let StartRound::InsufficientData { available } =
            m.quiz.start_round(&m.db, &mut m.rng)?
        {
            let flash = m.flash.take();
            return Ok(html! {
                (flash_banner(flash))
                h1 { "Matching" }
                div.flash.error {
                    "Not enough words to play (there are " (available) "). Add at least 5 words first."
                }
            });
        }
    }
    let flash = m.flash.take();
    let body = match m.quiz.round() {
        Some(round) => render_round(round),
        None => html! {},
    };
    Ok(html! {
        (flash_banner(flash))
        h1 { "Matching" }
        (body)
    })
}

fn render_round(round: &QuizRound) -> Markup {
    let submitted = round.is_submitted();
    let form = html! {
        form action="/quiz" method="post" {
            @for (idx, item) in round.items().iter().enumerate() {
                div.quiz-item {
                    label for=(format!("answer-{idx}")) { strong { (item.word) } }
                    select id=(format!("answer-{idx}")) name=(format!("answer-{idx}")) disabled[submitted] {
                        @for choice in round.option_pool() {
                            @let selected = match round.selection(&item.word) {
                                Some(current) => current == choice,
                                None => choice == PLACEHOLDER,
                            };
                            option value=(choice) selected[selected] { (choice) }
                        }
                    }
                }
            }
            @if !submitted {
                input.primary id="submit" type="submit" name="action" value="Submit" title="Check your answers.";
            }
        }
    };
    if !submitted {
        return form;
    }
    let result = round.evaluate();
    html! {
        (form)
        div.results {
            h2 { "Score: " (result.score) " / " (result.total) }
            @if result.is_perfect() {
                p.outcome.correct { "Perfect score!" }
            }
            ul {
                @for outcome in &result.outcomes {
                    @if outcome.is_correct {
                        li.outcome.correct { "✓ " (outcome.word) }
                    } @else if outcome.is_duplicate {
                        li.outcome.wrong { "✗ " (outcome.word) " (answer used twice; correct: " (outcome.correct) ")" }
                    } @else {
                        li.outcome.wrong { "✗ " (outcome.word) " (answer: " (outcome.correct) ")" }
                    }
                }
            }
        }
        form action="/quiz" method="post" {
            input.primary id="new-round" type="submit" name="action" value="New round" title="Play again with new words.";
        }
    }
}

fn render_words(state: &ServerState) -> Fallible<Markup> {
    let m = state.lock()?;
    let records = m.db.select_all(None)?;
    Ok(html! {
        h1 { "Word list" }
        div.stats {
            div.stat {
                div.label { "Total words" }
                div.value { (records.len()) }
            }
        }
        table {
            thead {
                tr { th { "#" } th { "Word" } th { "Meaning" } th { "Example" } th { "Status" } }
            }
            tbody {
                @for record in &records {
                    tr {
                        td { (record.id) }
                        td { (record.word) }
                        td { (record.meaning) }
                        td { (record.example) }
                        td { (record.status.to_string()) }
                    }
                }
            }
        }
    })
}

fn render_refresh(state: &ServerState) -> Fallible<Markup> {
    let mut m = state.lock()?;
    let flash = m.flash.take();
    Ok(html! {
        (flash_banner(flash))
        h1 { "Refresh data" }
        p {
            "Reloading replaces every word with the contents of "
            code { (state.csv_path.display().to_string()) }
            " and marks them all as new."
        }
        form action="/refresh" method="post" {
            input.primary id="reload" type="submit" name="action" value="Reload" title="Reload the vocabulary file.";
        }
        @match &state.feed_url {
            Some(url) => {
                p {
                    "Downloading adds the words from "
                    code { (url) }
                    " that are not in the list yet."
                }
                form action="/refresh" method="post" {
                    input id="download" type="submit" name="action" value="Download" title="Download new words.";
                }
            },
            None => p { "No word feed is configured. Set " code { "feed_url" } " in wordcards.toml to enable downloads." },
        }
    })
}
