//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── auth: AuthState        (session, login form)
//! │   ├── catalog: CatalogState  (last fetched product list, selection)
//! │   ├── notice: Option<Notice> (status bar message)
//! │   ├── task_seq: TaskSeq      (async task id generator)
//! │   └── tasks: Tasks           (in-flight guard per operation)
//! └── overlay: Option<Overlay>   (product form or delete confirmation)
//! ```
//!
//! State is split between `TuiState` and `Option<Overlay>` so overlay handlers
//! can hold `&mut Overlay` and `&TuiState` at the same time. Holding at most
//! one overlay makes the modal states mutually exclusive.

use shelf_core::session::Session;

use crate::auth::AuthState;
use crate::catalog::CatalogState;
use crate::common::{TaskId, TaskKind, TaskSeq, Tasks};
use crate::effects::UiEffect;
use crate::mutations::StateMutation;
use crate::overlays::{ModalMode, Overlay};
use crate::statusline::Notice;

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

/// Which modal, if any, currently holds the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState<'a> {
    Closed,
    OpenCreate,
    OpenEdit(&'a str),
    OpenDelete(&'a str),
}

impl AppState {
    pub fn new(server: String, restored: Option<Session>, last_identifier: Option<String>) -> Self {
        Self {
            tui: TuiState::new(server, restored, last_identifier),
            overlay: None,
        }
    }

    pub fn modal(&self) -> ModalState<'_> {
        match &self.overlay {
            None => ModalState::Closed,
            Some(Overlay::ProductForm(form)) => match form.mode {
                ModalMode::Create => ModalState::OpenCreate,
                ModalMode::Edit => ModalState::OpenEdit(form.draft.id.as_deref().unwrap_or("")),
            },
            Some(Overlay::DeleteConfirm(confirm)) => ModalState::OpenDelete(&confirm.product.id),
        }
    }
}

/// TUI application state (non-overlay).
pub struct TuiState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Server the console talks to (header display only).
    pub server: String,
    pub auth: AuthState,
    pub catalog: CatalogState,
    /// Current status bar message.
    pub notice: Option<Notice>,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new(server: String, restored: Option<Session>, last_identifier: Option<String>) -> Self {
        Self {
            should_quit: false,
            server,
            auth: AuthState::new(restored, last_identifier),
            catalog: CatalogState::default(),
            notice: None,
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            spinner_frame: 0,
        }
    }

    /// Starts a task unless one of the same kind is outstanding.
    pub fn start_task(&mut self, kind: TaskKind) -> Option<TaskId> {
        self.tasks.try_start(&mut self.task_seq, kind)
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn apply(&mut self, mutation: StateMutation) {
        match mutation {
            StateMutation::SetNotice(notice) => self.notice = Some(notice),
        }
    }

    /// Requests a product list fetch.
    ///
    /// With `supersede`, any outstanding fetch is replaced so the result
    /// reflects the latest server state; otherwise a running fetch wins.
    pub fn refresh_products(&mut self, supersede: bool) -> Option<UiEffect> {
        let token = self.auth.token()?.to_string();
        let task = if supersede {
            self.tasks.restart(&mut self.task_seq, TaskKind::ProductList)
        } else {
            self.start_task(TaskKind::ProductList)?
        };
        Some(UiEffect::FetchProducts { task, token })
    }
}
