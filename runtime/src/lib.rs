//! # Todo Runtime
//!
//! Runtime implementation for the todo store.
//!
//! This crate provides the [`Store`] that owns state, runs a reducer for each
//! action and executes the effects the reducer returns.
//!
//! ## Core Components
//!
//! - **Store**: Owns the state and coordinates reducer execution
//! - **Effect Executor**: Walks effect descriptions and feeds actions back
//! - **Feedback Queue**: Actions produced by `Effect::Send`, reduced in FIFO order
//!
//! Everything runs synchronously on the caller's thread. A call to
//! [`Store::send`] returns only after the action and every action it fed
//! back have been reduced, so readers never see intermediate state.
//!
//! ## Example
//!
//! ```ignore
//! use todo_runtime::Store;
//!
//! let mut store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething)?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field);
//! ```

use std::collections::VecDeque;
use todo_core::{effect::Effect, reducer::Reducer};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Effects kept feeding actions back past the configured limit
        ///
        /// Every action reduced before the limit was hit stays applied.
        #[error("Effect feedback exceeded {limit} actions")]
        FeedbackLimitExceeded {
            /// Configured maximum number of fed-back actions
            limit: usize,
        },
    }
}

pub use error::StoreError;

/// Default cap on actions fed back by effects during one [`Store::send`]
pub const DEFAULT_MAX_FEEDBACK_ACTIONS: usize = 64;

/// Configuration for Store behavior
///
/// # Example
///
/// ```
/// use todo_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_max_feedback_actions(8);
/// assert_eq!(config.max_feedback_actions, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of actions effects may feed back for a single `send`
    pub max_feedback_actions: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(max_feedback_actions: usize) -> Self {
        Self {
            max_feedback_actions,
        }
    }

    /// Set the feedback limit
    #[must_use]
    pub const fn with_max_feedback_actions(mut self, limit: usize) -> Self {
        self.max_feedback_actions = limit;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FEEDBACK_ACTIONS)
    }
}

/// Store module - The runtime for reducers
mod store {
    use super::{Effect, Reducer, StoreConfig, StoreError, VecDeque};

    /// The Store - owns state and runs the reducer
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    ///
    /// The store is the sole owner of its state. Mutation happens only via
    /// [`Store::send`], which takes `&mut self`, so the borrow checker rules
    /// out concurrent mutation by construction.
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: S,
        reducer: R,
        environment: E,
        config: StoreConfig,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        #[must_use]
        pub const fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            Self {
                state: initial_state,
                reducer,
                environment,
                config,
            }
        }

        /// Send an action to the store
        ///
        /// Reduces `action`, then executes the returned effects. Actions
        /// produced by `Effect::Send` are queued and reduced in order until
        /// the queue drains.
        ///
        /// # Returns
        ///
        /// The number of actions reduced, including `action` itself.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::FeedbackLimitExceeded`] if effects feed back
        /// more than `max_feedback_actions` actions. The remaining queued
        /// actions are discarded.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub fn send(&mut self, action: A) -> Result<usize, StoreError> {
            let mut queue = VecDeque::from([action]);
            let mut reduced = 0usize;

            while let Some(action) = queue.pop_front() {
                if reduced > self.config.max_feedback_actions {
                    tracing::warn!(
                        limit = self.config.max_feedback_actions,
                        dropped = queue.len() + 1,
                        "Effect feedback limit exceeded"
                    );
                    return Err(StoreError::FeedbackLimitExceeded {
                        limit: self.config.max_feedback_actions,
                    });
                }

                let span = tracing::debug_span!("reducer_execution", step = reduced);
                let _enter = span.enter();

                let effects = self.reducer.reduce(&mut self.state, action, &self.environment);
                reduced += 1;
                tracing::trace!("Reducer completed, returned {} effects", effects.len());

                for effect in effects {
                    Self::execute_effect(effect, &mut queue);
                }
            }

            tracing::debug!(reduced, "Action processing completed");
            Ok(reduced)
        }

        /// Walk an effect depth-first, queueing every action it sends
        fn execute_effect(effect: Effect<A>, queue: &mut VecDeque<A>) {
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                },
                Effect::Send(action) => {
                    tracing::trace!("Effect::Send queued an action");
                    queue.push_back(action);
                },
                Effect::Sequential(effects) => {
                    tracing::trace!("Executing Effect::Sequential ({} effects)", effects.len());
                    for effect in effects {
                        Self::execute_effect(effect, queue);
                    }
                },
            }
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let open = store.state(|s| s.items.len());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            f(&self.state)
        }

        /// Borrow the current state
        #[must_use]
        pub const fn state_ref(&self) -> &S {
            &self.state
        }

        /// Consume the store, returning its state
        #[must_use]
        pub fn into_state(self) -> S {
            self.state
        }

        /// Borrow the injected environment
        #[must_use]
        pub const fn environment(&self) -> &E {
            &self.environment
        }

        /// The configuration this store runs with
        #[must_use]
        pub const fn config(&self) -> StoreConfig {
            self.config
        }
    }

    impl<S, A, E, R> std::fmt::Debug for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        S: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Store")
                .field("state", &self.state)
                .field("config", &self.config)
                .finish_non_exhaustive()
        }
    }
}

pub use store::Store;

#[cfg(test)]
mod tests {
    use super::*;
    use todo_core::{SmallVec, smallvec};

    #[derive(Debug, Default)]
    struct Log {
        seen: Vec<u32>,
    }

    struct Echo;

    impl Reducer for Echo {
        type State = Log;
        type Action = u32;
        type Environment = ();

        fn reduce(&self, state: &mut Log, action: u32, _env: &()) -> SmallVec<[Effect<u32>; 4]> {
            state.seen.push(action);
            smallvec![Effect::None]
        }
    }

    #[test]
    fn send_reduces_single_action() {
        let mut store = Store::new(Log::default(), Echo, ());
        assert_eq!(store.send(7), Ok(1));
        assert_eq!(store.state(|s| s.seen.clone()), vec![7]);
    }

    #[test]
    fn default_config() {
        let store = Store::new(Log::default(), Echo, ());
        assert_eq!(store.config().max_feedback_actions, DEFAULT_MAX_FEEDBACK_ACTIONS);
    }

    #[test]
    fn into_state_returns_owned_state() {
        let mut store = Store::new(Log::default(), Echo, ());
        let _ = store.send(1);
        let _ = store.send(2);
        assert_eq!(store.into_state().seen, vec![1, 2]);
    }

    #[test]
    fn error_display() {
        let err = StoreError::FeedbackLimitExceeded { limit: 3 };
        assert_eq!(err.to_string(), "Effect feedback exceeded 3 actions");
    }
}
