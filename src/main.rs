// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout Map terminal client
//!
//! Logs jogging and biking sessions at map locations and keeps them in a
//! file-backed store between runs.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_map::{
    config::Config,
    console::{self, Command, ConsoleMap, ConsoleView},
    controller::App,
    db::FileStore,
    platform::FixedPosition,
    runtime,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Structured JSON logs go to stderr; stdout is the user interface
    init_logging();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        key = %config.storage_key,
        "Starting Workout Map"
    );

    let store = FileStore::open(&config.data_dir).context("Failed to open data directory")?;
    let position = FixedPosition::new(config.home_position);

    let app = App::new(
        &config,
        ConsoleMap::new(std::io::stdout()),
        ConsoleView::new(std::io::stdout()),
        store,
    );

    let (sender, events) = mpsc::unbounded_channel();
    let timers = sender.downgrade();

    println!("{}", console::HELP);

    // Reader owns the only strong sender; the loop stops once it is gone.
    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read input");
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match console::parse_command(&line) {
                Ok(Command::Events(batch)) => {
                    for event in batch {
                        if sender.send(event).is_err() {
                            return;
                        }
                    }
                }
                Ok(Command::Help) => println!("{}", console::HELP),
                Ok(Command::Quit) => break,
                Err(e) => eprintln!("{e}"),
            }
        }
    });

    let app = runtime::run(app, &position, events, timers).await;
    reader.await.context("Input reader panicked")?;

    let count = app.exercises().len();
    let (_, _, store) = app.into_parts();
    tracing::info!(count, dir = %store.dir().display(), "Workout Map stopped");
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("workout_map=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
