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

use std::process::exit;

use clap::Parser;
use tokio::spawn;
use wordcards_core::error::Fallible;
use wordcards_core::types::timestamp::Timestamp;

use crate::cmd::list::ListFormat;
use crate::cmd::list::StatusFilter;
use crate::cmd::list::list_words;
use crate::cmd::refresh::download_collection;
use crate::cmd::refresh::import_collection;
use crate::cmd::serve::server::ServerConfig;
use crate::cmd::serve::server::start_server;
use crate::utils::wait_for_server;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Practise through a web interface: flashcards, matching, word list and data refresh.
    Serve {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// The host address to bind to. Default is 127.0.0.1.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// The port to use for the web server. Default is 8000.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Whether to open the browser automatically. Default is true.
        #[arg(long)]
        open_browser: Option<bool>,
        /// URL of the JSON word feed. Overrides `feed_url` in wordcards.toml.
        #[arg(long)]
        feed_url: Option<String>,
    },
    /// Print the words in a collection.
    List {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Only print words with this status.
        #[arg(long)]
        status: Option<StatusFilter>,
        /// Which output format to use.
        #[arg(long, default_value_t = ListFormat::Text)]
        format: ListFormat,
    },
    /// Replace all words with the contents of the vocabulary file.
    Import {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Path to the vocabulary file. By default, the file named in wordcards.toml is used.
        #[arg(long)]
        csv: Option<String>,
    },
    /// Add new words from the JSON word feed.
    Download {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// URL of the feed. By default, `feed_url` from wordcards.toml is used.
        #[arg(long)]
        url: Option<String>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Serve {
            directory,
            host,
            port,
            open_browser,
            feed_url,
        } => {
            if open_browser.unwrap_or(true) {
                // Start a separate task to open the browser once the server is up.
                let browser_host = host.clone();
                spawn(async move {
                    match wait_for_server(&browser_host, port).await {
                        Ok(_) => {
                            let _ = open::that(format!("http://{browser_host}:{port}/"));
                        }
                        Err(e) => {
                            eprintln!("Failed to connect to server: {e}");
                            exit(-1)
                        }
                    }
                });
            }
            let config = ServerConfig {
                directory,
                host,
                port,
                session_started_at: Timestamp::now(),
                feed_url,
                seed: None,
            };
            start_server(config).await
        }
        Command::List {
            directory,
            status,
            format,
        } => list_words(directory, status, format),
        Command::Import { directory, csv } => import_collection(directory, csv),
        Command::Download { directory, url } => download_collection(directory, url).await,
    }
}
