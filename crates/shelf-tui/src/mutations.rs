//! Cross-slice state mutations returned by overlay and feature handlers.

use crate::statusline::Notice;

#[derive(Debug)]
pub enum StateMutation {
    SetNotice(Notice),
}
