//! # Todo Testing
//!
//! Testing utilities and helpers for the todo store crates.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A Given-When-Then builder for reducer tests
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use todo_testing::{ReducerTest, ScriptedIds, assertions};
//!
//! ReducerTest::new(TodoReducer::new())
//!     .with_env(TodoEnvironment::new(Arc::new(ScriptedIds::new([7]))))
//!     .given_state(TodoState::new())
//!     .when_action(TodoAction::AddTodo { text: "Buy milk".into() })
//!     .then_state(|state| assert_eq!(state.count(), 1))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

use todo_core::environment::IdGenerator;


/// Mock implementations of Environment traits
pub mod mocks {
    use super::IdGenerator;
    use std::collections::VecDeque;
    use std::sync::{Mutex, PoisonError};

    /// Id generator that replays a fixed script
    ///
    /// Hands out the scripted ids in order, duplicates included, which makes
    /// it possible to provoke id collisions deliberately. Once the script
    /// runs out it continues counting up from the largest id seen so far.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_testing::mocks::ScriptedIds;
    /// use todo_core::environment::IdGenerator;
    ///
    /// let ids = ScriptedIds::new([4, 4]);
    /// assert_eq!(ids.next_id(), 4);
    /// assert_eq!(ids.next_id(), 4);
    /// assert_eq!(ids.next_id(), 5);
    /// assert_eq!(ids.draws(), 3);
    /// ```
    #[derive(Debug, Default)]
    pub struct ScriptedIds {
        inner: Mutex<Script>,
    }

    #[derive(Debug, Default)]
    struct Script {
        pending: VecDeque<u64>,
        highest: u64,
        draws: usize,
    }

    impl ScriptedIds {
        /// Create a generator that replays `ids` first
        #[must_use]
        pub fn new(ids: impl IntoIterator<Item = u64>) -> Self {
            Self {
                inner: Mutex::new(Script {
                    pending: ids.into_iter().collect(),
                    highest: 0,
                    draws: 0,
                }),
            }
        }

        /// Total number of ids handed out so far
        #[must_use]
        pub fn draws(&self) -> usize {
            self.inner.lock().unwrap_or_else(PoisonError::into_inner).draws
        }
    }

    impl IdGenerator for ScriptedIds {
        fn next_id(&self) -> u64 {
            let mut script = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            script.draws += 1;
            let id = match script.pending.pop_front() {
                Some(id) => id,
                None => script.highest.saturating_add(1),
            };
            script.highest = script.highest.max(id);
            id
        }

        fn observe(&self, id: u64) {
            let mut script = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            script.highest = script.highest.max(id);
        }
    }
}

// Re-export commonly used items
pub use mocks::ScriptedIds;
pub use reducer_test::{ReducerTest, assertions};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_ids_replay_then_count_up() {
        let ids = ScriptedIds::new([3, 9, 2]);
        assert_eq!(ids.next_id(), 3);
        assert_eq!(ids.next_id(), 9);
        assert_eq!(ids.next_id(), 2);
        assert_eq!(ids.next_id(), 10);
        assert_eq!(ids.draws(), 4);
    }

    #[test]
    fn observed_ids_raise_the_fallback_count() {
        let ids = ScriptedIds::new([2]);
        ids.observe(20);
        assert_eq!(ids.next_id(), 2);
        assert_eq!(ids.next_id(), 21);
        assert_eq!(ids.draws(), 2);
    }

    #[test]
    fn empty_script_starts_at_one() {
        let ids = ScriptedIds::default();
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
    }
}
