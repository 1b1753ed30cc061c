//! Overlay modules for the TUI.
//!
//! Overlays are modal UI components that temporarily take over keyboard input.
//! Each overlay is self-contained: it owns its state, key handler, and render function.
//!
//! ## Module Structure
//!
//! - `product_form.rs`: Create / edit form over a `ProductDraft`
//! - `delete_confirm.rs`: Delete confirmation for one product
//! - `render_utils.rs`: Shared rendering utilities for overlays
//!
//! Overlay handlers only see `&TuiState`, so they cannot allocate task ids.
//! Instead they return [`OverlayEffect`]s, which the root reducer turns into
//! task-bound [`UiEffect`](crate::effects::UiEffect)s.

pub mod delete_confirm;
pub mod product_form;
pub mod render_utils;

use crossterm::event::KeyEvent;
pub use delete_confirm::DeleteConfirmState;
pub use product_form::{FormFocus, ModalMode, ProductFormState};
use ratatui::Frame;
use ratatui::layout::Rect;
use shelf_core::catalog::{Product, ProductPayload};

use crate::common::Tasks;
use crate::mutations::StateMutation;
use crate::state::TuiState;

/// Requests to open a new overlay.
#[derive(Debug)]
pub enum OverlayRequest {
    CreateProduct,
    EditProduct(Product),
    DeleteProduct(Product),
}

/// Network work an overlay asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEffect {
    /// Create (`id` is `None`) or update a product.
    SaveProduct {
        mode: ModalMode,
        id: Option<String>,
        payload: ProductPayload,
    },
    DeleteProduct {
        id: String,
    },
}

/// Transition returned by overlay key handlers.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub mutations: Vec<StateMutation>,
    pub effects: Vec<OverlayEffect>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            mutations: Vec::new(),
            effects: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    #[must_use]
    pub fn with_mutations(mut self, mutations: Vec<StateMutation>) -> Self {
        self.mutations = mutations;
        self
    }

    #[must_use]
    pub fn with_effects(mut self, effects: Vec<OverlayEffect>) -> Self {
        self.effects = effects;
        self
    }
}

#[derive(Debug)]
pub enum Overlay {
    ProductForm(ProductFormState),
    DeleteConfirm(DeleteConfirmState),
}

impl Overlay {
    pub fn open(request: OverlayRequest) -> Self {
        match request {
            OverlayRequest::CreateProduct => Overlay::ProductForm(ProductFormState::open_create()),
            OverlayRequest::EditProduct(product) => {
                Overlay::ProductForm(ProductFormState::open_edit(&product))
            }
            OverlayRequest::DeleteProduct(product) => {
                Overlay::DeleteConfirm(DeleteConfirmState::open(product))
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, tasks: &Tasks) {
        match self {
            Overlay::ProductForm(form) => form.render(frame, area, tasks.product_save.is_running()),
            Overlay::DeleteConfirm(confirm) => {
                confirm.render(frame, area, tasks.product_delete.is_running());
            }
        }
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::ProductForm(form) => form.handle_key(tui, key),
            Overlay::DeleteConfirm(confirm) => confirm.handle_key(tui, key),
        }
    }

    /// Shows a failed request inside the overlay so it stays visible next to the form.
    pub fn set_error(&mut self, message: String) {
        match self {
            Overlay::ProductForm(form) => form.error = Some(message),
            Overlay::DeleteConfirm(confirm) => confirm.error = Some(message),
        }
    }
}

/// Extension trait for `Option<Overlay>` providing convenience render helpers.
pub trait OverlayExt {
    /// Renders the overlay if one is active.
    fn render(&self, frame: &mut Frame, area: Rect, tasks: &Tasks);
}

impl OverlayExt for Option<Overlay> {
    fn render(&self, frame: &mut Frame, area: Rect, tasks: &Tasks) {
        if let Some(overlay) = self {
            overlay.render(frame, area, tasks);
        }
    }
}
