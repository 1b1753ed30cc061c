//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! Network effects carry the `TaskId` the reducer allocated for them, so the
//! in-flight guard is decided before anything is spawned.

use shelf_core::catalog::ProductPayload;
use shelf_core::session::Session;

use crate::common::TaskId;

/// Effects returned by the reducer for the runtime to execute.
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Ask the server whether the restored token is still valid.
    CheckSession { task: TaskId, token: String },

    /// Exchange credentials for a session.
    SignIn {
        task: TaskId,
        identifier: String,
        secret: String,
    },

    /// Fetch the full product list.
    FetchProducts { task: TaskId, token: String },

    /// Create a product (the server assigns its id).
    CreateProduct {
        task: TaskId,
        token: String,
        payload: ProductPayload,
    },

    /// Replace an existing product.
    UpdateProduct {
        task: TaskId,
        token: String,
        id: String,
        payload: ProductPayload,
    },

    /// Delete a product.
    DeleteProduct {
        task: TaskId,
        token: String,
        id: String,
    },

    /// Write the session file.
    PersistSession { session: Session },

    /// Remove the session file.
    ClearSession,

    /// Remember the identifier in config.toml.
    PersistIdentifier { identifier: String },
}

// Credentials and tokens stay out of debug output.
impl std::fmt::Debug for UiEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UiEffect::Quit => write!(f, "Quit"),
            UiEffect::CheckSession { task, .. } => write!(f, "CheckSession({task:?})"),
            UiEffect::SignIn {
                task, identifier, ..
            } => write!(f, "SignIn({task:?}, {identifier})"),
            UiEffect::FetchProducts { task, .. } => write!(f, "FetchProducts({task:?})"),
            UiEffect::CreateProduct { task, payload, .. } => {
                write!(f, "CreateProduct({task:?}, {payload:?})")
            }
            UiEffect::UpdateProduct {
                task, id, payload, ..
            } => write!(f, "UpdateProduct({task:?}, {id}, {payload:?})"),
            UiEffect::DeleteProduct { task, id, .. } => {
                write!(f, "DeleteProduct({task:?}, {id})")
            }
            UiEffect::PersistSession { session } => {
                write!(f, "PersistSession({})", session.identifier)
            }
            UiEffect::ClearSession => write!(f, "ClearSession"),
            UiEffect::PersistIdentifier { identifier } => {
                write!(f, "PersistIdentifier({identifier})")
            }
        }
    }
}
