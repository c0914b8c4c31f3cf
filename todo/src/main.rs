//! Terminal todo list.
//!
//! Reads commands from stdin, one per line; see `help` inside the shell.
//! Logs go to stderr so they never interleave with the listing.

use std::io;
use todo_store::{Shell, TodoConfig, TodoStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = TodoConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    tracing::info!(
        first_id = config.first_id,
        max_feedback_actions = config.max_feedback_actions,
        "Starting todo shell"
    );

    let store = TodoStore::with_config(config.environment(), config.store_config());
    let stdout = io::stdout();
    let mut shell = Shell::new(store, stdout.lock());
    shell.run(io::stdin().lock())?;

    let stats = shell.store().stats();
    tracing::info!(
        total = stats.total,
        completed = stats.completed,
        "Session ended, list discarded"
    );
    Ok(())
}
