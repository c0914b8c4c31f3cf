//! Reducer logic for the todo list.
//!
//! Commands are checked against current state, turned into events, and the
//! events applied. A command that would change nothing (blank text, unknown
//! id) is dropped as a no-op: the list has no failure path to report it on.

use crate::types::{TodoAction, TodoId, TodoItem, TodoState};
use std::sync::Arc;
use todo_core::{
    SmallVec,
    effect::Effect,
    environment::{IdGenerator, SequentialIds},
    reducer::Reducer,
};

/// How many ids an add may draw before giving up on collisions
pub const MAX_ID_ATTEMPTS: usize = 16;

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Source of fresh todo ids
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }
}

impl Default for TodoEnvironment {
    fn default() -> Self {
        Self::new(Arc::new(SequentialIds::new()))
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment").finish_non_exhaustive()
    }
}

/// Reducer for the todo list
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Trimmed text, or `None` if nothing is left
    fn effective_text(raw: &str) -> Option<&str> {
        let text = raw.trim();
        (!text.is_empty()).then_some(text)
    }

    /// Draws ids until one is free in `state`
    fn allocate_id(state: &TodoState, env: &TodoEnvironment) -> Option<TodoId> {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let id = TodoId::new(env.ids.next_id());
            if !state.exists(id) {
                return Some(id);
            }
            tracing::warn!(%id, attempt, "Id generator returned an id already in use");
        }
        None
    }

    /// Applies an event to state
    ///
    /// Added ids are reported back to the id generator so a replayed id is
    /// never drawn again, even after its item is deleted.
    fn apply_event(state: &mut TodoState, action: &TodoAction, env: &TodoEnvironment) {
        match action {
            TodoAction::TodoAdded { id, text } => {
                if state.exists(*id) {
                    tracing::warn!(%id, "Ignoring TodoAdded for an id already in use");
                    return;
                }
                let Some(text) = Self::effective_text(text) else {
                    tracing::warn!(%id, "Ignoring TodoAdded with blank text");
                    return;
                };
                env.ids.observe(id.get());
                state.push(TodoItem::new(*id, text.to_string()));
            },
            TodoAction::TodoToggled { id, completed } => {
                if !state.set_completed(*id, *completed) {
                    tracing::debug!(%id, "Ignoring TodoToggled for unknown todo");
                }
            },
            TodoAction::TodoDeleted { id } => {
                if !state.remove(*id) {
                    tracing::debug!(%id, "Ignoring TodoDeleted for unknown todo");
                }
            },
            // Commands are not applied to state
            TodoAction::AddTodo { .. }
            | TodoAction::ToggleTodo { .. }
            | TodoAction::DeleteTodo { .. } => {},
        }
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            TodoAction::AddTodo { text } => {
                let Some(text) = Self::effective_text(&text) else {
                    tracing::debug!("Ignoring todo with blank text");
                    return SmallVec::new();
                };

                let Some(id) = Self::allocate_id(state, env) else {
                    tracing::error!(
                        attempts = MAX_ID_ATTEMPTS,
                        "Could not allocate a free todo id, dropping add"
                    );
                    return SmallVec::new();
                };

                let event = TodoAction::TodoAdded {
                    id,
                    text: text.to_string(),
                };
                Self::apply_event(state, &event, env);
                tracing::debug!(%id, "Todo added");

                SmallVec::new()
            },

            TodoAction::ToggleTodo { id } => {
                let Some(todo) = state.get(id) else {
                    tracing::debug!(%id, "Ignoring toggle of unknown todo");
                    return SmallVec::new();
                };

                let event = TodoAction::TodoToggled {
                    id,
                    completed: !todo.completed,
                };
                Self::apply_event(state, &event, env);

                SmallVec::new()
            },

            TodoAction::DeleteTodo { id } => {
                if !state.exists(id) {
                    tracing::debug!(%id, "Ignoring delete of unknown todo");
                    return SmallVec::new();
                }

                Self::apply_event(state, &TodoAction::TodoDeleted { id }, env);

                SmallVec::new()
            },

            // ========== Events ==========
            TodoAction::TodoAdded { .. }
            | TodoAction::TodoToggled { .. }
            | TodoAction::TodoDeleted { .. } => {
                // Replayed events are applied without re-validation
                Self::apply_event(state, &action, env);
                SmallVec::new()
            },
        }
    }
}
