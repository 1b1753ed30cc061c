//! Product list reducer.

use crossterm::event::{KeyCode, KeyEvent};
use shelf_core::api::ApiError;
use shelf_core::catalog::Product;
use tracing::{debug, warn};

use crate::effects::UiEffect;
use crate::overlays::OverlayRequest;
use crate::state::TuiState;
use crate::statusline::{Notice, NoticeKind};

/// What a list-view key asks the root reducer to do.
#[derive(Debug, Default)]
pub struct ListAction {
    pub effects: Vec<UiEffect>,
    pub open: Option<OverlayRequest>,
    pub logout: bool,
}

impl ListAction {
    fn effects(effects: Vec<UiEffect>) -> Self {
        Self {
            effects,
            ..Self::default()
        }
    }

    fn open(request: OverlayRequest) -> Self {
        Self {
            open: Some(request),
            ..Self::default()
        }
    }
}

/// Handles a key while the product table is shown.
pub fn handle_list_key(tui: &mut TuiState, key: KeyEvent) -> ListAction {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => ListAction::effects(vec![UiEffect::Quit]),
        KeyCode::Up | KeyCode::Char('k') => {
            tui.catalog.select_prev();
            ListAction::default()
        }
        KeyCode::Down | KeyCode::Char('j') => {
            tui.catalog.select_next();
            ListAction::default()
        }
        KeyCode::Char('r') => match tui.refresh_products(false) {
            Some(effect) => ListAction::effects(vec![effect]),
            None => {
                debug!("refresh already in flight");
                ListAction::default()
            }
        },
        KeyCode::Char('n') => ListAction::open(OverlayRequest::CreateProduct),
        KeyCode::Char('e') | KeyCode::Enter => match tui.catalog.selected_product() {
            Some(product) => ListAction::open(OverlayRequest::EditProduct(product.clone())),
            None => ListAction::default(),
        },
        KeyCode::Char('d') | KeyCode::Delete => match tui.catalog.selected_product() {
            Some(product) => ListAction::open(OverlayRequest::DeleteProduct(product.clone())),
            None => ListAction::default(),
        },
        KeyCode::Char('L') => ListAction {
            logout: true,
            ..ListAction::default()
        },
        _ => ListAction::default(),
    }
}

/// Applies a product list fetch result that was not rejected as unauthorized.
///
/// A failed fetch keeps the previous list.
pub fn handle_products_loaded(tui: &mut TuiState, result: Result<Vec<Product>, ApiError>) {
    match result {
        Ok(products) => {
            debug!(count = products.len(), "product list replaced");
            tui.catalog.replace(products);
        }
        Err(err) => {
            warn!(error = %err, "product list fetch failed");
            tui.set_notice(Notice::new(NoticeKind::Fetch, err.message));
        }
    }
}
