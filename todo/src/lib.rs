//! In-memory todo list with a completion-partitioned view.
//!
//! Items are kept in the order they were added. Reads derive a display
//! order on every call: open items first, completed items after, each group
//! in insertion order. Blank text and unknown ids are silently ignored.
//!
//! The crate is layered the same way as the rest of the workspace:
//!
//! - [`types`]: `TodoItem`, `TodoState`, `TodoAction` and friends
//! - [`reducer`]: `TodoReducer`, the only code that mutates `TodoState`
//! - [`store`]: `TodoStore`, intent-shaped methods over the runtime store
//! - [`render`] and [`shell`]: a small terminal front end
//! - [`config`]: environment-driven setup for the binary
//!
//! # Quick Start
//!
//! ```
//! use todo_store::{TodoStats, TodoStore};
//!
//! let mut store = TodoStore::new();
//! let milk = store.add("Buy milk").unwrap();
//! let book = store.add("Read a book").unwrap();
//! let gym = store.add("Exercise").unwrap();
//!
//! store.toggle(milk);
//! store.toggle(book);
//! let order: Vec<_> = store.derived_view().iter().map(|t| t.id).collect();
//! assert_eq!(order, vec![gym, milk, book]);
//!
//! store.delete(gym);
//! assert_eq!(store.stats(), TodoStats { total: 2, completed: 2, active: 0 });
//! ```
//!
//! Callers that own their state can drive the reducer directly:
//!
//! ```
//! use todo_core::reducer::Reducer;
//! use todo_store::{TodoAction, TodoEnvironment, TodoReducer, TodoState};
//!
//! let env = TodoEnvironment::default();
//! let mut state = TodoState::new();
//! TodoReducer::new().reduce(&mut state, TodoAction::AddTodo { text: " Walk ".into() }, &env);
//! assert_eq!(state.items()[0].text, "Walk");
//! ```

pub mod config;
pub mod reducer;
pub mod render;
pub mod shell;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::{ConfigError, TodoConfig};
pub use reducer::{TodoEnvironment, TodoReducer};
pub use shell::{Intent, Shell, ShellError};
pub use store::TodoStore;
pub use types::{
    InvalidTodoState, TodoAction, TodoId, TodoItem, TodoSnapshot, TodoState, TodoStats,
};
