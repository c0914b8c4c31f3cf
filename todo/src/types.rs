//! Domain types for the todo store.
//!
//! A todo list is an ordered collection of items that can be added, toggled
//! between done and not done, and deleted. Storage order is insertion order;
//! the order shown to users is derived from it on every read.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Unique identifier for a todo item
///
/// Ids are allocated from a monotonic counter and never reused within a
/// session. They display as `#<n>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// Wraps a raw id value
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Error returned when text cannot be read as a [`TodoId`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid todo id `{0}`")]
pub struct ParseTodoIdError(String);

impl FromStr for TodoId {
    type Err = ParseTodoIdError;

    /// Accepts `7` as well as `#7`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ParseTodoIdError(s.to_string()))
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier
    pub id: TodoId,
    /// What needs doing, trimmed and never empty
    pub text: String,
    /// Whether the todo is done
    pub completed: bool,
}

impl TodoItem {
    /// Creates a new, not yet completed, todo item
    #[must_use]
    pub const fn new(id: TodoId, text: String) -> Self {
        Self {
            id,
            text,
            completed: false,
        }
    }
}

/// Aggregate counts over the whole collection
///
/// `active + completed == total` always holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoStats {
    /// Number of items
    pub total: usize,
    /// Number of completed items
    pub completed: usize,
    /// Number of items still to do
    pub active: usize,
}

/// Read-only render payload: the derived view plus its counts
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoSnapshot {
    /// Items in display order
    pub items: Vec<TodoItem>,
    /// Counts over `items`
    pub stats: TodoStats,
}

/// Why a list of items was refused as a [`TodoState`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidTodoState {
    /// Two items share an id
    #[error("todo id {id} appears more than once")]
    DuplicateId {
        /// The repeated id
        id: TodoId,
    },

    /// An item's text is empty after trimming
    #[error("todo {id} has blank text")]
    BlankText {
        /// The offending item
        id: TodoId,
    },

    /// An item's text has surrounding whitespace
    #[error("todo {id} has untrimmed text")]
    UntrimmedText {
        /// The offending item
        id: TodoId,
    },
}

/// State of the todo list
///
/// Items are kept in insertion order. The collection can only be changed
/// through [`crate::TodoReducer`], which keeps ids unique and texts
/// non-empty. Deserializing goes through [`TryFrom<Vec<TodoItem>>`], which
/// holds loaded items to the same rules.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TodoItem>", into = "Vec<TodoItem>")]
pub struct TodoState {
    items: Vec<TodoItem>,
}

impl TryFrom<Vec<TodoItem>> for TodoState {
    type Error = InvalidTodoState;

    fn try_from(items: Vec<TodoItem>) -> Result<Self, Self::Error> {
        let mut seen = std::collections::HashSet::with_capacity(items.len());
        for item in &items {
            let id = item.id;
            if !seen.insert(id) {
                return Err(InvalidTodoState::DuplicateId { id });
            }
            let trimmed = item.text.trim();
            if trimmed.is_empty() {
                return Err(InvalidTodoState::BlankText { id });
            }
            if trimmed.len() != item.text.len() {
                return Err(InvalidTodoState::UntrimmedText { id });
            }
        }
        Ok(Self { items })
    }
}

impl From<TodoState> for Vec<TodoItem> {
    fn from(state: TodoState) -> Self {
        state.items
    }
}

impl TodoState {
    /// Creates a new empty todo state
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// All items in storage (insertion) order
    #[must_use]
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no todos
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|t| t.completed).count()
    }

    /// Returns the number of todos not yet completed
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.count() - self.completed_count()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|t| t.id == id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn exists(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Items in display order
    ///
    /// Every open item comes before every completed one. Inside each group
    /// items keep their storage order. Built with two passes over storage
    /// order on each call; nothing is cached.
    #[must_use]
    pub fn derived_view(&self) -> Vec<TodoItem> {
        let mut view = Vec::with_capacity(self.items.len());
        view.extend(self.items.iter().filter(|t| !t.completed).cloned());
        view.extend(self.items.iter().filter(|t| t.completed).cloned());
        view
    }

    /// Aggregate counts
    #[must_use]
    pub fn stats(&self) -> TodoStats {
        let total = self.count();
        let completed = self.completed_count();
        TodoStats {
            total,
            completed,
            active: total - completed,
        }
    }

    /// Derived view and counts in one payload
    #[must_use]
    pub fn snapshot(&self) -> TodoSnapshot {
        TodoSnapshot {
            items: self.derived_view(),
            stats: self.stats(),
        }
    }

    pub(crate) fn push(&mut self, item: TodoItem) {
        self.items.push(item);
    }

    pub(crate) fn set_completed(&mut self, id: TodoId, completed: bool) -> bool {
        match self.items.iter_mut().find(|t| t.id == id) {
            Some(item) => {
                item.completed = completed;
                true
            },
            None => false,
        }
    }

    pub(crate) fn remove(&mut self, id: TodoId) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        self.items.len() != before
    }
}

/// Actions representing commands and events for todos
///
/// Commands carry user intent and may be rejected as no-ops. Events record
/// what happened and are applied as-is, so a list of events can be replayed
/// onto an empty state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    // ========== Commands ==========
    /// Command: Add a todo with the given raw text
    AddTodo {
        /// Text as typed; trimmed before use
        text: String,
    },

    /// Command: Flip the completion flag of a todo
    ToggleTodo {
        /// Todo to toggle
        id: TodoId,
    },

    /// Command: Delete a todo
    DeleteTodo {
        /// Todo to delete
        id: TodoId,
    },

    // ========== Events ==========
    /// Event: Todo was added
    TodoAdded {
        /// Allocated identifier
        id: TodoId,
        /// Trimmed text
        text: String,
    },

    /// Event: Todo completion flag changed
    TodoToggled {
        /// Todo identifier
        id: TodoId,
        /// New value of the flag
        completed: bool,
    },

    /// Event: Todo was deleted
    TodoDeleted {
        /// Todo identifier
        id: TodoId,
    },
}

impl TodoAction {
    /// Returns true for commands
    #[must_use]
    pub const fn is_command(&self) -> bool {
        matches!(
            self,
            Self::AddTodo { .. } | Self::ToggleTodo { .. } | Self::DeleteTodo { .. }
        )
    }

    /// Returns true for events
    #[must_use]
    pub const fn is_event(&self) -> bool {
        !self.is_command()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(items: &[(u64, &str, bool)]) -> TodoState {
        let mut state = TodoState::new();
        for &(id, text, completed) in items {
            let mut item = TodoItem::new(TodoId::new(id), text.to_string());
            item.completed = completed;
            state.push(item);
        }
        state
    }

    fn texts(items: &[TodoItem]) -> Vec<&str> {
        items.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn todo_id_display() {
        assert_eq!(TodoId::new(42).to_string(), "#42");
    }

    #[test]
    fn todo_id_parse() {
        assert_eq!("7".parse::<TodoId>(), Ok(TodoId::new(7)));
        assert_eq!("#7".parse::<TodoId>(), Ok(TodoId::new(7)));
        assert_eq!(" 12 ".parse::<TodoId>(), Ok(TodoId::new(12)));
        assert!("seven".parse::<TodoId>().is_err());
        assert!("#".parse::<TodoId>().is_err());
        assert!("-1".parse::<TodoId>().is_err());
    }

    #[test]
    fn todo_item_new() {
        let item = TodoItem::new(TodoId::new(1), "Test todo".to_string());

        assert_eq!(item.id, TodoId::new(1));
        assert_eq!(item.text, "Test todo");
        assert!(!item.completed);
    }

    #[test]
    fn todo_state_count() {
        let state = state_with(&[(1, "a", false), (2, "b", true), (3, "c", true)]);

        assert_eq!(state.count(), 3);
        assert_eq!(state.completed_count(), 2);
        assert_eq!(state.active_count(), 1);
        assert_eq!(
            state.stats(),
            TodoStats {
                total: 3,
                completed: 2,
                active: 1
            }
        );
    }

    #[test]
    fn empty_state() {
        let state = TodoState::new();
        assert!(state.is_empty());
        assert!(state.derived_view().is_empty());
        assert_eq!(state.stats(), TodoStats::default());
    }

    #[test]
    fn derived_view_partitions_stably() {
        let state = state_with(&[
            (1, "a", true),
            (2, "b", false),
            (3, "c", true),
            (4, "d", false),
            (5, "e", false),
        ]);

        assert_eq!(texts(&state.derived_view()), vec!["b", "d", "e", "a", "c"]);
        // Storage order is untouched
        assert_eq!(texts(state.items()), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn set_completed_and_remove_report_misses() {
        let mut state = state_with(&[(1, "a", false)]);

        assert!(state.set_completed(TodoId::new(1), true));
        assert!(!state.set_completed(TodoId::new(9), true));
        assert!(!state.remove(TodoId::new(9)));
        assert!(state.remove(TodoId::new(1)));
        assert!(state.is_empty());
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let state = state_with(&[(1, "Buy milk", false)]);
        let json = serde_json::to_value(state.snapshot()).unwrap_or_default();

        assert_eq!(
            json,
            serde_json::json!({
                "items": [{"id": 1, "text": "Buy milk", "completed": false}],
                "stats": {"total": 1, "completed": 0, "active": 1}
            })
        );
    }

    #[test]
    fn state_round_trips_as_item_list() {
        let state = state_with(&[(1, "a", true), (4, "b", false)]);
        let json = serde_json::to_string(&state).unwrap_or_default();
        assert!(json.starts_with('['));

        let loaded: Result<TodoState, _> = serde_json::from_str(&json);
        assert_eq!(loaded.ok(), Some(state));
    }

    #[test]
    fn loading_rejects_duplicate_ids_and_bad_text() {
        let duplicate = r#"[
            {"id": 1, "text": "first", "completed": false},
            {"id": 1, "text": "dup", "completed": false}
        ]"#;
        let err = serde_json::from_str::<TodoState>(duplicate)
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default();
        assert!(err.contains("todo id #1 appears more than once"), "{err}");

        let blank = r#"[{"id": 2, "text": "  ", "completed": false}]"#;
        assert!(serde_json::from_str::<TodoState>(blank).is_err());

        let untrimmed = vec![TodoItem::new(TodoId::new(3), " pad ".to_string())];
        assert_eq!(
            TodoState::try_from(untrimmed),
            Err(InvalidTodoState::UntrimmedText { id: TodoId::new(3) })
        );
        assert_eq!(
            TodoState::try_from(vec![TodoItem::new(TodoId::new(3), String::new())]),
            Err(InvalidTodoState::BlankText { id: TodoId::new(3) })
        );
    }

    #[test]
    fn todo_action_is_command() {
        let action = TodoAction::AddTodo {
            text: "Test".to_string(),
        };
        assert!(action.is_command());
        assert!(!action.is_event());
    }

    #[test]
    fn todo_action_is_event() {
        let action = TodoAction::TodoToggled {
            id: TodoId::new(1),
            completed: true,
        };
        assert!(action.is_event());
        assert!(!action.is_command());
    }
}
