//! Line-oriented terminal front end for [`TodoStore`].
//!
//! Each input line becomes an [`Intent`]. Mutating intents go to the store,
//! then the listing is rendered again from a fresh snapshot. Lines that do
//! not start with a command word are submitted as new todo text, the same
//! way pressing Enter in an input box would.

use crate::render;
use crate::store::TodoStore;
use crate::types::{ParseTodoIdError, TodoId};
use std::io::{BufRead, Write};
use thiserror::Error;

const HELP: &str = "\
Commands:
  <text> | add <text>   add a todo
  toggle <id>           mark a todo done / not done
  delete <id> | rm <id> remove a todo
  list                  show the list
  json                  show the list as JSON
  help                  show this help
  quit | exit           leave";

/// Errors raised while reading or answering a line
#[derive(Debug, Error)]
pub enum ShellError {
    /// A command that needs an id was given none
    #[error("`{command}` needs a todo id, e.g. `{command} 3`")]
    MissingId {
        /// Command word as typed
        command: String,
    },

    /// The id argument did not parse
    #[error(transparent)]
    InvalidId(#[from] ParseTodoIdError),

    /// Reading input or writing output failed
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// JSON rendering failed
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ShellError {
    /// Whether the shell can report this error and keep going
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::MissingId { .. } | Self::InvalidId(_))
    }
}

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Add a todo with this raw text
    Submit(String),
    /// Toggle a todo
    Toggle(TodoId),
    /// Delete a todo
    Delete(TodoId),
    /// Print the listing
    List,
    /// Print the listing as JSON
    Json,
    /// Print usage
    Help,
    /// Stop reading input
    Quit,
}

/// Parse one input line
///
/// # Errors
///
/// Returns [`ShellError::MissingId`] or [`ShellError::InvalidId`] when
/// `toggle`/`delete` are given a missing or malformed id.
pub fn parse_line(line: &str) -> Result<Intent, ShellError> {
    let trimmed = line.trim_start();
    let (word, rest) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));

    let intent = match word.to_ascii_lowercase().as_str() {
        "add" => Intent::Submit(rest.to_string()),
        "toggle" => Intent::Toggle(parse_id(word, rest)?),
        "delete" | "rm" => Intent::Delete(parse_id(word, rest)?),
        "list" | "ls" if rest.trim().is_empty() => Intent::List,
        "json" if rest.trim().is_empty() => Intent::Json,
        "help" if rest.trim().is_empty() => Intent::Help,
        "quit" | "exit" if rest.trim().is_empty() => Intent::Quit,
        _ => Intent::Submit(line.to_string()),
    };
    Ok(intent)
}

fn parse_id(command: &str, arg: &str) -> Result<TodoId, ShellError> {
    if arg.trim().is_empty() {
        return Err(ShellError::MissingId {
            command: command.to_string(),
        });
    }
    Ok(arg.parse::<TodoId>()?)
}

/// Whether the read loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line
    Continue,
    /// Stop
    Quit,
}

/// Interactive shell over a store and an output sink
#[derive(Debug)]
pub struct Shell<W: Write> {
    store: TodoStore,
    out: W,
    prompt: bool,
}

impl<W: Write> Shell<W> {
    /// Shell writing to `out`, printing a `> ` prompt before each line
    pub const fn new(store: TodoStore, out: W) -> Self {
        Self {
            store,
            out,
            prompt: true,
        }
    }

    /// Turn the prompt off (for piped input and tests)
    #[must_use]
    pub const fn without_prompt(mut self) -> Self {
        self.prompt = false;
        self
    }

    /// The store behind the shell
    pub const fn store(&self) -> &TodoStore {
        &self.store
    }

    /// Give back the store and the output sink
    pub fn into_parts(self) -> (TodoStore, W) {
        (self.store, self.out)
    }

    /// Read lines until end of input or `quit`
    ///
    /// Bad commands are reported on the output and do not stop the loop.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Io`] or [`ShellError::Json`] if the terminal
    /// cannot be read or written.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<(), ShellError> {
        self.print_listing()?;
        let mut lines = input.lines();
        loop {
            if self.prompt {
                write!(self.out, "> ")?;
                self.out.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;

            let flow = match parse_line(&line).and_then(|intent| self.handle(intent)) {
                Ok(flow) => flow,
                Err(error) if error.is_recoverable() => {
                    tracing::debug!(%error, "Rejected shell input");
                    writeln!(self.out, "error: {error}")?;
                    Flow::Continue
                },
                Err(error) => return Err(error),
            };
            if flow == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Apply one intent and render the result
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Io`] or [`ShellError::Json`] if output fails.
    pub fn handle(&mut self, intent: Intent) -> Result<Flow, ShellError> {
        match intent {
            Intent::Submit(text) => {
                if let Some(id) = self.store.add(&text) {
                    writeln!(self.out, "Added {id}")?;
                    self.print_listing()?;
                }
            },
            Intent::Toggle(id) => {
                if self.store.toggle(id) {
                    self.print_listing()?;
                }
            },
            Intent::Delete(id) => {
                if self.store.delete(id) {
                    self.print_listing()?;
                }
            },
            Intent::List => self.print_listing()?,
            Intent::Json => {
                let json = render::render_json(&self.store.snapshot())?;
                writeln!(self.out, "{json}")?;
            },
            Intent::Help => writeln!(self.out, "{HELP}")?,
            Intent::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn print_listing(&mut self) -> Result<(), ShellError> {
        for line in render::render(&self.store.snapshot()) {
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }
}
