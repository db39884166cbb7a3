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

use std::collections::HashMap;

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use maud::html;
use serde::Deserialize;
use wordcards_core::error::Fallible;
use wordcards_core::error::fail;
use wordcards_core::review::ReviewState;

use crate::cmd::serve::get::respond;
use crate::cmd::serve::state::Flash;
use crate::cmd::serve::state::MutableState;
use crate::cmd::serve::state::ServerState;
use crate::ingest::csv::import_csv;
use crate::ingest::feed::apply_feed;
use crate::ingest::feed::fetch_feed;

#[derive(Deserialize)]
pub struct ActionForm {
    action: String,
}

pub async fn menu_post_handler(
    State(state): State<ServerState>,
    Form(form): Form<ActionForm>,
) -> Response {
    match form.action.as_str() {
        "Shutdown" => {
            state.shutdown();
            respond(Ok(html! {
                h1 { "Goodbye" }
                p { "The server has stopped. You can close this tab." }
            }))
            .into_response()
        }
        other => (StatusCode::BAD_REQUEST, Html(format!("Unknown action: {other}"))).into_response(),
    }
}

pub async fn review_post_handler(
    State(state): State<ServerState>,
    Form(form): Form<ActionForm>,
) -> Response {
    let outcome = state.lock().map(|mut guard| {
        let m: &mut MutableState = &mut guard;
        let result = match form.action.as_str() {
            "Reveal" => m.review.reveal(),
            "Unfamiliar" => m.review.mark_unfamiliar(),
            "Mastered" => m
                .review
                .mark_mastered(&mut m.db)
                .map(|_| m.flash = Some(Flash::Info("Marked as mastered.".to_string()))),
            other => fail(format!("Unknown action: {other}")),
        };
        if let Err(e) = result {
            m.flash = Some(Flash::Error(e.message().to_string()));
        }
    });
    redirect_or_error(outcome, "/review")
}

pub async fn quiz_post_handler(
    State(state): State<ServerState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let outcome = state.lock().map(|mut guard| {
        let m: &mut MutableState = &mut guard;
        let result = match form.get("action").map(String::as_str) {
            Some("Submit") => submit_answers(m, &form),
            Some("New round") => {
                m.quiz.new_round();
                Ok(())
            }
            Some(other) => fail(format!("Unknown action: {other}")),
            None => fail("No action given"),
        };
        if let Err(e) = result {
            m.flash = Some(Flash::Error(e.message().to_string()));
        }
    });
    redirect_or_error(outcome, "/quiz")
}

/// Apply the picks from the form, then score the round. Picks are ignored
/// once the round has been submitted. A rejected pick leaves the round
/// untouched.
fn submit_answers(m: &mut MutableState, form: &HashMap<String, String>) -> Fallible<()> {
    let words: Vec<String> = match m.quiz.round() {
        Some(round) if !round.is_submitted() => {
            round.items().iter().map(|r| r.word.clone()).collect()
        }
        Some(_) => Vec::new(),
        None => return fail("There is no round to submit."),
    };
    let picks: Vec<(&str, &str)> = words
        .iter()
        .enumerate()
        .filter_map(|(idx, word)| {
            form.get(&format!("answer-{idx}"))
                .map(|choice| (word.as_str(), choice.as_str()))
        })
        .collect();
    if !picks.is_empty() {
        m.quiz.select_answers(&picks)?;
    }
    m.quiz.submit()?;
    Ok(())
}

pub async fn refresh_post_handler(
    State(state): State<ServerState>,
    Form(form): Form<ActionForm>,
) -> Response {
    match form.action.as_str() {
        "Reload" => {
            let outcome = state.lock().map(|mut guard| {
                let m: &mut MutableState = &mut guard;
                m.flash = Some(match import_csv(&mut m.db, &state.csv_path) {
                    Ok(count) => {
                        // Card ids from before the reload no longer exist.
                        m.review.reset();
                        Flash::Info(format!("Loaded {count} words."))
                    }
                    Err(e) => Flash::Error(e.to_string()),
                });
            });
            redirect_or_error(outcome, "/refresh")
        }
        "Download" => {
            let fetched = match &state.feed_url {
                Some(url) => fetch_feed(url).await,
                None => {
                    let outcome = state.lock().map(|mut m| {
                        m.flash = Some(Flash::Error("No feed URL is configured.".to_string()));
                    });
                    return redirect_or_error(outcome, "/refresh");
                }
            };
            let outcome = state.lock().map(|mut guard| {
                let m: &mut MutableState = &mut guard;
                let applied = fetched.and_then(|entries| apply_feed(&mut m.db, &entries));
                m.flash = Some(match applied {
                    Ok(added) => {
                        if matches!(m.review.state(), ReviewState::Complete) {
                            m.review.reset();
                        }
                        Flash::Info(format!("Added {added} new words."))
                    }
                    Err(e) => Flash::Error(e.to_string()),
                });
            });
            redirect_or_error(outcome, "/refresh")
        }
        other => (StatusCode::BAD_REQUEST, Html(format!("Unknown action: {other}"))).into_response(),
    }
}

fn redirect_or_error(outcome: Fallible<()>, to: &str) -> Response {
    match outcome {
        Ok(()) => Redirect::to(to).into_response(),
        Err(e) => respond(Err(e)).into_response(),
    }
}
