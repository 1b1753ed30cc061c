/// Category of a status-bar message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Bad credentials or expired session.
    Auth,
    /// Product list retrieval failed.
    Fetch,
    /// Create, update, or delete failed.
    Mutation,
    /// Buffer could not be submitted as typed.
    Validation,
    Info,
}

impl NoticeKind {
    pub fn is_error(self) -> bool {
        !matches!(self, NoticeKind::Info)
    }
}

/// One-line message shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, text)
    }
}
