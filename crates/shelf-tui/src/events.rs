//! UI event types.
//!
//! Everything the reducer reacts to: terminal input, the frame tick, and the
//! results of async tasks delivered through the runtime inbox.

use shelf_core::api::ApiError;
use shelf_core::catalog::Product;
use shelf_core::session::Session;

use crate::common::{TaskCompleted, TaskKind};

#[derive(Debug)]
pub enum UiEvent {
    /// First event after the runtime starts.
    Started,

    /// Periodic tick (drives spinners and session expiry checks).
    Tick,

    /// Raw terminal input.
    Terminal(crossterm::event::Event),

    /// An async task finished; the boxed event is its result.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    /// Result of validating the restored session with the server.
    SessionChecked(Result<(), ApiError>),

    /// Result of a credentials exchange.
    SignedIn(Result<Session, ApiError>),

    /// Result of a product list fetch.
    ProductsLoaded(Result<Vec<Product>, ApiError>),

    /// Result of a create or update.
    ProductSaved(Result<(), ApiError>),

    /// Result of a delete.
    ProductDeleted(Result<(), ApiError>),

    /// Writing the session file failed.
    SessionPersistFailed(String),
}
