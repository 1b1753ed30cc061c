//! Status line feature slice.
//!
//! The bottom bar shows the current notice (errors and confirmations) or,
//! when there is none, the key hints for the active view.

mod render;
mod state;

pub use render::render_status_line;
pub use state::{Notice, NoticeKind};
