//! Auth feature slice: login view, session lifecycle.

mod render;
mod state;
mod update;

pub use render::{LOGIN_HINTS, render_login_view};
pub use state::{AuthPhase, AuthState, LoginField, LoginForm};
pub use update::{
    SessionCheckOutcome, handle_login_key, handle_session_checked, handle_signed_in,
    start_session_check,
};
