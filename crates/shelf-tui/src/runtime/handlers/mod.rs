//! Effect handlers for the TUI runtime.
//!
//! This module contains the implementation of side effects triggered by the reducer.
//! These functions perform I/O and async tasks. They do NOT mutate state directly.
//!
//! ## Pure Async Pattern
//!
//! Handlers are pure async functions that return `UiEvent`. The runtime spawns
//! them with `spawn_task` and forwards the result to the inbox wrapped in a
//! `TaskCompleted` event.

pub mod auth;
pub mod catalog;

pub use auth::*;
pub use catalog::*;
