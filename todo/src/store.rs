//! `TodoStore`: the entry point a presentation layer talks to.
//!
//! Wraps the runtime [`Store`] with intent-shaped methods. Each mutation runs
//! to completion before returning; reads always see a fully applied state.

use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{TodoAction, TodoId, TodoItem, TodoSnapshot, TodoState, TodoStats};
use todo_runtime::{Store, StoreConfig, StoreError};

/// Runtime store specialised to the todo list
pub type TodoRuntime = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// In-memory todo list
///
/// # Example
///
/// ```
/// use todo_store::TodoStore;
///
/// let mut store = TodoStore::new();
/// let milk = store.add("Buy milk").unwrap();
/// assert_eq!(store.add("   "), None);
/// store.add("Read a book");
/// store.toggle(milk);
///
/// let view: Vec<_> = store.derived_view().into_iter().map(|t| t.text).collect();
/// assert_eq!(view, vec!["Read a book", "Buy milk"]);
/// assert_eq!(store.stats().active, 1);
/// ```
#[derive(Debug)]
pub struct TodoStore {
    runtime: TodoRuntime,
}

impl TodoStore {
    /// Empty store with a sequential id generator starting at 1
    #[must_use]
    pub fn new() -> Self {
        Self::with_environment(TodoEnvironment::default())
    }

    /// Empty store using the given environment
    #[must_use]
    pub fn with_environment(environment: TodoEnvironment) -> Self {
        Self::with_config(environment, StoreConfig::default())
    }

    /// Empty store with explicit runtime configuration
    #[must_use]
    pub fn with_config(environment: TodoEnvironment, config: StoreConfig) -> Self {
        Self {
            runtime: Store::with_config(TodoState::new(), TodoReducer::new(), environment, config),
        }
    }

    /// Send a raw action, for callers that replay events or build their own intents
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`] from the runtime. [`TodoReducer`] returns no
    /// `Effect::Send`, so every todo action reduces exactly once and the
    /// feedback limit in [`StoreConfig`] is never reached.
    pub fn send(&mut self, action: TodoAction) -> Result<usize, StoreError> {
        self.runtime.send(action)
    }

    fn dispatch(&mut self, action: TodoAction) {
        if let Err(error) = self.runtime.send(action) {
            tracing::error!(%error, "Todo action failed");
        }
    }

    /// Add a todo
    ///
    /// Returns the id of the new item, or `None` if the trimmed text was
    /// empty and nothing was added.
    pub fn add(&mut self, raw_text: &str) -> Option<TodoId> {
        let before = self.state().count();
        self.dispatch(TodoAction::AddTodo {
            text: raw_text.to_string(),
        });
        let state = self.state();
        if state.count() > before {
            state.items().last().map(|t| t.id)
        } else {
            None
        }
    }

    /// Flip the completion flag of a todo
    ///
    /// Returns false if no todo has this id; the store is left unchanged.
    pub fn toggle(&mut self, id: TodoId) -> bool {
        let known = self.state().exists(id);
        if known {
            self.dispatch(TodoAction::ToggleTodo { id });
        }
        known
    }

    /// Delete a todo
    ///
    /// Returns false if no todo has this id; the store is left unchanged.
    pub fn delete(&mut self, id: TodoId) -> bool {
        let known = self.state().exists(id);
        if known {
            self.dispatch(TodoAction::DeleteTodo { id });
        }
        known
    }

    /// Items in display order, see [`TodoState::derived_view`]
    #[must_use]
    pub fn derived_view(&self) -> Vec<TodoItem> {
        self.state().derived_view()
    }

    /// Aggregate counts
    #[must_use]
    pub fn stats(&self) -> TodoStats {
        self.state().stats()
    }

    /// Derived view and counts in one payload
    #[must_use]
    pub fn snapshot(&self) -> TodoSnapshot {
        self.state().snapshot()
    }

    /// Borrow the underlying state
    #[must_use]
    pub const fn state(&self) -> &TodoState {
        self.runtime.state_ref()
    }

    /// Consume the store, returning its state
    #[must_use]
    pub fn into_state(self) -> TodoState {
        self.runtime.into_state()
    }
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_returns_new_id() {
        let mut store = TodoStore::new();
        assert_eq!(store.add("a"), Some(TodoId::new(1)));
        assert_eq!(store.add("b"), Some(TodoId::new(2)));
    }

    #[test]
    fn add_blank_returns_none() {
        let mut store = TodoStore::new();
        assert_eq!(store.add(""), None);
        assert_eq!(store.add("  \t "), None);
        assert_eq!(store.stats().total, 0);
    }

    #[test]
    fn toggle_and_delete_report_unknown_ids() {
        let mut store = TodoStore::new();
        let id = store.add("a");
        assert_eq!(id, Some(TodoId::new(1)));

        assert!(!store.toggle(TodoId::new(5)));
        assert!(!store.delete(TodoId::new(5)));
        assert!(store.toggle(TodoId::new(1)));
        assert!(store.delete(TodoId::new(1)));
        assert!(!store.delete(TodoId::new(1)));
    }

    #[test]
    fn send_replays_events() {
        let mut store = TodoStore::new();
        let result = store.send(TodoAction::TodoAdded {
            id: TodoId::new(9),
            text: "from log".to_string(),
        });

        assert_eq!(result, Ok(1));
        assert!(store.state().exists(TodoId::new(9)));
    }

    #[test]
    fn send_then_delete_never_reissues_replayed_id() {
        let mut store = TodoStore::new();
        let replayed = TodoId::new(2);
        let sent = store.send(TodoAction::TodoAdded {
            id: replayed,
            text: "from log".to_string(),
        });
        assert_eq!(sent, Ok(1));
        assert!(store.delete(replayed));

        let a = store.add("a");
        let b = store.add("b");

        assert_eq!(a, Some(TodoId::new(3)));
        assert_eq!(b, Some(TodoId::new(4)));
    }

    #[test]
    fn tightest_feedback_limit_is_enough() {
        let mut store = TodoStore::with_config(TodoEnvironment::default(), StoreConfig::new(1));

        for action in [
            TodoAction::AddTodo { text: "a".into() },
            TodoAction::ToggleTodo { id: TodoId::new(1) },
            TodoAction::AddTodo { text: "b".into() },
            TodoAction::DeleteTodo { id: TodoId::new(1) },
            TodoAction::ToggleTodo { id: TodoId::new(7) },
        ] {
            assert_eq!(store.send(action), Ok(1));
        }
        assert_eq!(store.stats().total, 1);
    }
}
