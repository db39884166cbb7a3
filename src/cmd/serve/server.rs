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

use std::sync::Arc;
use std::sync::Mutex;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::select;
use tokio::signal;
use tokio::sync::oneshot::Receiver;
use tokio::sync::oneshot::channel;
use wordcards_core::error::Fallible;
use wordcards_core::quiz::MatchingQuiz;
use wordcards_core::review::ReviewSession;
use wordcards_core::rng::TinyRng;
use wordcards_core::types::timestamp::Timestamp;

use crate::cmd::serve::get::menu_handler;
use crate::cmd::serve::get::quiz_handler;
use crate::cmd::serve::get::refresh_handler;
use crate::cmd::serve::get::review_handler;
use crate::cmd::serve::get::words_handler;
use crate::cmd::serve::post::menu_post_handler;
use crate::cmd::serve::post::quiz_post_handler;
use crate::cmd::serve::post::refresh_post_handler;
use crate::cmd::serve::post::review_post_handler;
use crate::cmd::serve::state::MutableState;
use crate::cmd::serve::state::ServerState;
use crate::collection::Collection;
use crate::utils::CACHE_CONTROL_IMMUTABLE;
use crate::utils::clock_seed;

pub struct ServerConfig {
    pub directory: Option<String>,
    pub host: String,
    pub port: u16,
    pub session_started_at: Timestamp,
    /// Overrides the feed URL from the configuration file.
    pub feed_url: Option<String>,
    /// Seed for card and quiz randomness. Taken from the clock if absent.
    pub seed: Option<u64>,
}

pub async fn start_server(config: ServerConfig) -> Fallible<()> {
    let mut collection = Collection::new(config.directory)?;
    collection.seed_if_empty()?;
    let csv_path = collection.csv_path();
    let Collection {
        config: collection_config,
        db,
        ..
    } = collection;

    // Create shutdown channel
    let (shutdown_tx, shutdown_rx) = channel();

    let state = ServerState {
        csv_path,
        feed_url: config.feed_url.or(collection_config.feed_url),
        mutable: Arc::new(Mutex::new(MutableState {
            db,
            rng: TinyRng::from_seed(config.seed.unwrap_or_else(clock_seed)),
            review: ReviewSession::new(config.session_started_at),
            quiz: MatchingQuiz::new(),
            flash: None,
        })),
        shutdown_tx: Arc::new(Mutex::new(Some(shutdown_tx))),
    };
    let app = Router::new();
    let app = app.route("/", get(menu_handler));
    let app = app.route("/", post(menu_post_handler));
    let app = app.route("/review", get(review_handler));
    let app = app.route("/review", post(review_post_handler));
    let app = app.route("/quiz", get(quiz_handler));
    let app = app.route("/quiz", post(quiz_post_handler));
    let app = app.route("/words", get(words_handler));
    let app = app.route("/refresh", get(refresh_handler));
    let app = app.route("/refresh", post(refresh_post_handler));
    let app = app.route("/style.css", get(style_handler));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("{}:{}", config.host, config.port);

    // Start the server with graceful shutdown on Ctrl+C or the shutdown button.
    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_rx))
        .await?;
    Ok(())
}

async fn style_handler() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, CACHE_CONTROL_IMMUTABLE),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}

async fn shutdown_signal(shutdown_rx: Receiver<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    let shutdown = async {
        shutdown_rx.await.ok();
    };

    select! {
        _ = ctrl_c => {
            log::debug!("Received Ctrl+C, shutting down gracefully");
        },
        _ = shutdown => {
            log::debug!("Received shutdown signal, shutting down gracefully");
        },
    }
}
