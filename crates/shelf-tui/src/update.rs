//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! This is the single source of truth for how events modify state.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use shelf_core::api::ApiError;
use tracing::{info, warn};

use crate::auth::{self, SessionCheckOutcome};
use crate::catalog;
use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::mutations::StateMutation;
use crate::overlays::{ModalMode, Overlay, OverlayEffect, OverlayTransition, OverlayUpdate};
use crate::state::{AppState, TuiState};
use crate::statusline::{Notice, NoticeKind};

const SESSION_EXPIRED: &str = "Session expired; sign in again";

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Started => auth::start_session_check(&mut app.tui),
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            if app.tui.auth.is_signed_in()
                && app.tui.auth.session.as_ref().is_some_and(|s| s.is_expired())
            {
                info!("session expired");
                return end_session(app, Notice::new(NoticeKind::Auth, SESSION_EXPIRED));
            }
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskCompleted { kind, completed } => {
            if app.tui.tasks.state_mut(kind).finish_if_active(completed.id) {
                update(app, *completed.result)
            } else {
                vec![]
            }
        }
        UiEvent::SessionChecked(result) => {
            let (effects, outcome) = auth::handle_session_checked(&mut app.tui, result);
            if outcome == SessionCheckOutcome::Valid
                && let Some(identifier) = app.tui.auth.identifier()
            {
                let text = format!("Welcome back, {identifier}");
                app.tui.set_notice(Notice::info(text));
            }
            effects
        }
        UiEvent::SignedIn(result) => auth::handle_signed_in(&mut app.tui, result),
        UiEvent::ProductsLoaded(result) => match result {
            Err(err) if err.is_unauthorized() => session_rejected(app, &err),
            result => {
                catalog::handle_products_loaded(&mut app.tui, result);
                vec![]
            }
        },
        UiEvent::ProductSaved(result) => handle_mutation_result(app, result, "Product saved"),
        UiEvent::ProductDeleted(result) => handle_mutation_result(app, result, "Product deleted"),
        UiEvent::SessionPersistFailed(message) => {
            app.tui.set_notice(Notice::new(
                NoticeKind::Auth,
                format!("Signed in, but the session was not saved: {message}"),
            ));
            vec![]
        }
    }
}

/// Shared handling for create, update, and delete results.
///
/// Success refreshes the list and closes the modal. Failure keeps the modal
/// and its buffer so the user can correct and resubmit.
fn handle_mutation_result(
    app: &mut AppState,
    result: Result<(), ApiError>,
    success: &str,
) -> Vec<UiEffect> {
    match result {
        Ok(()) => {
            info!("{success}");
            let effects = app.tui.refresh_products(true).into_iter().collect();
            app.overlay = None;
            app.tui.set_notice(Notice::info(success));
            effects
        }
        Err(err) if err.is_unauthorized() => session_rejected(app, &err),
        Err(err) => {
            warn!(error = %err, "catalog change failed");
            if let Some(overlay) = app.overlay.as_mut() {
                overlay.set_error(err.message.clone());
            }
            app.tui.set_notice(Notice::new(NoticeKind::Mutation, err.message));
            vec![]
        }
    }
}

fn session_rejected(app: &mut AppState, err: &ApiError) -> Vec<UiEffect> {
    warn!(error = %err, "server rejected session");
    end_session(app, Notice::new(NoticeKind::Auth, SESSION_EXPIRED))
}

/// Drops the session and everything loaded under it.
fn end_session(app: &mut AppState, notice: Notice) -> Vec<UiEffect> {
    app.overlay = None;
    app.tui.auth.sign_out();
    app.tui.catalog.clear();
    app.tui.tasks.clear_all();
    app.tui.set_notice(notice);
    vec![UiEffect::ClearSession]
}

fn apply_mutations(tui: &mut TuiState, mutations: Vec<StateMutation>) {
    for mutation in mutations {
        tui.apply(mutation);
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.kind != KeyEventKind::Press {
        return vec![];
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }

    if let Some(overlay) = app.overlay.as_mut() {
        let mut update = overlay.handle_key(&app.tui, key);
        apply_mutations(&mut app.tui, std::mem::take(&mut update.mutations));
        return apply_overlay_update(app, update);
    }

    if !app.tui.auth.is_signed_in() {
        return auth::handle_login_key(&mut app.tui, key);
    }

    // Any list key replaces a stale notice.
    app.tui.notice = None;
    let action = catalog::handle_list_key(&mut app.tui, key);
    if action.logout {
        info!("signed out");
        return end_session(app, Notice::info("Signed out"));
    }
    if let Some(request) = action.open {
        app.overlay = Some(Overlay::open(request));
    }
    action.effects
}

fn apply_overlay_update(app: &mut AppState, update: OverlayUpdate) -> Vec<UiEffect> {
    let effects = update
        .effects
        .into_iter()
        .filter_map(|effect| dispatch_overlay_effect(&mut app.tui, effect))
        .collect();

    if let OverlayTransition::Close = update.transition {
        app.overlay = None;
    }
    effects
}

/// Binds an overlay request to a task, or drops it while one is outstanding.
fn dispatch_overlay_effect(tui: &mut TuiState, effect: OverlayEffect) -> Option<UiEffect> {
    let token = tui.auth.token()?.to_string();

    match effect {
        OverlayEffect::SaveProduct { mode, id, payload } => {
            let id = match (mode, id) {
                (ModalMode::Create, _) => None,
                (ModalMode::Edit, Some(id)) => Some(id),
                (ModalMode::Edit, None) => {
                    warn!("edit submitted without a product id");
                    return None;
                }
            };
            let task = tui.start_task(TaskKind::ProductSave)?;
            tui.notice = None;
            Some(match id {
                None => UiEffect::CreateProduct {
                    task,
                    token,
                    payload,
                },
                Some(id) => UiEffect::UpdateProduct {
                    task,
                    token,
                    id,
                    payload,
                },
            })
        }
        OverlayEffect::DeleteProduct { id } => {
            let task = tui.start_task(TaskKind::ProductDelete)?;
            tui.notice = None;
            Some(UiEffect::DeleteProduct { task, token, id })
        }
    }
}

#[cfg(test)]
mod tests {
    use shelf_core::api::ApiErrorKind;
    use shelf_core::catalog::Product;
    use shelf_core::session::Session;

    use super::*;
    use crate::common::{TaskCompleted, TaskId};
    use crate::state::ModalState;

    fn press(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new_with_kind(
            code,
            KeyModifiers::NONE,
            KeyEventKind::Press,
        )))
    }

    fn ctrl(c: char) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new_with_kind(
            KeyCode::Char(c),
            KeyModifiers::CONTROL,
            KeyEventKind::Press,
        )))
    }

    fn session(expires: u64) -> Session {
        Session {
            token: "tok".to_string(),
            expires,
            identifier: "admin".to_string(),
        }
    }

    fn product(id: &str, title: &str) -> Product {
        Product {
            id: id.to_string(),
            title: title.to_string(),
            origin_price: 10.0,
            price: 8.0,
            images_url: vec!["http://img/a.png".to_string()],
            ..Product::default()
        }
    }

    fn signed_in_app(products: Vec<Product>) -> AppState {
        let mut app = AppState::new("http://localhost".to_string(), None, None);
        app.tui.auth.establish(session(u64::MAX));
        app.tui.catalog.replace(products);
        app
    }

    fn complete(app: &mut AppState, kind: TaskKind, id: TaskId, result: UiEvent) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::TaskCompleted {
                kind,
                completed: TaskCompleted {
                    id,
                    result: Box::new(result),
                },
            },
        )
    }

    fn form(app: &mut AppState) -> &mut crate::overlays::ProductFormState {
        match app.overlay.as_mut() {
            Some(Overlay::ProductForm(form)) => form,
            other => panic!("expected product form, got {other:?}"),
        }
    }

    #[test]
    fn test_create_flow_refreshes_once_and_closes() {
        let mut app = signed_in_app(vec![]);

        update(&mut app, press(KeyCode::Char('n')));
        assert_eq!(app.modal(), ModalState::OpenCreate);

        let draft = &mut form(&mut app).draft;
        draft.title = "T".to_string();
        draft.origin_price = "10".to_string();
        draft.price = "20".to_string();

        let effects = update(&mut app, ctrl('s'));
        let [UiEffect::CreateProduct { task, payload, .. }] = effects.as_slice() else {
            panic!("expected one create, got {effects:?}");
        };
        assert!((payload.origin_price - 10.0).abs() < f64::EPSILON);
        assert!((payload.price - 20.0).abs() < f64::EPSILON);
        assert!(payload.id.is_none());
        let task = *task;

        // Still open until the server answers.
        assert_eq!(app.modal(), ModalState::OpenCreate);

        let effects = complete(&mut app, TaskKind::ProductSave, task, UiEvent::ProductSaved(Ok(())));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::FetchProducts { .. }]
        ));
        assert_eq!(app.modal(), ModalState::Closed);
    }

    #[test]
    fn test_delete_flow() {
        let mut app = signed_in_app(vec![product("p1", "Tea"), product("p2", "Coffee")]);

        update(&mut app, press(KeyCode::Char('d')));
        assert_eq!(app.modal(), ModalState::OpenDelete("p1"));

        let effects = update(&mut app, press(KeyCode::Char('y')));
        let [UiEffect::DeleteProduct { task, id, .. }] = effects.as_slice() else {
            panic!("expected one delete, got {effects:?}");
        };
        assert_eq!(id, "p1");
        let task = *task;

        let effects = complete(
            &mut app,
            TaskKind::ProductDelete,
            task,
            UiEvent::ProductDeleted(Ok(())),
        );
        let [UiEffect::FetchProducts { task: fetch, .. }] = effects.as_slice() else {
            panic!("expected one refresh, got {effects:?}");
        };
        let fetch = *fetch;
        assert_eq!(app.modal(), ModalState::Closed);

        complete(
            &mut app,
            TaskKind::ProductList,
            fetch,
            UiEvent::ProductsLoaded(Ok(vec![product("p2", "Coffee")])),
        );
        assert!(app.tui.catalog.products.iter().all(|p| p.id != "p1"));
    }

    #[test]
    fn test_failed_update_keeps_modal_and_buffer() {
        let mut app = signed_in_app(vec![product("p1", "Tea")]);

        update(&mut app, press(KeyCode::Char('e')));
        assert_eq!(app.modal(), ModalState::OpenEdit("p1"));
        form(&mut app).draft.title = "Green tea".to_string();
        let before = form(&mut app).draft.clone();

        let effects = update(&mut app, press(KeyCode::Enter));
        let [UiEffect::UpdateProduct { task, id, .. }] = effects.as_slice() else {
            panic!("expected one update, got {effects:?}");
        };
        assert_eq!(id, "p1");
        let task = *task;

        let effects = complete(
            &mut app,
            TaskKind::ProductSave,
            task,
            UiEvent::ProductSaved(Err(ApiError::new(
                ApiErrorKind::HttpStatus,
                "HTTP 400: title taken",
            ))),
        );

        assert!(effects.is_empty());
        assert_eq!(app.modal(), ModalState::OpenEdit("p1"));
        assert_eq!(form(&mut app).draft, before);
        assert_eq!(form(&mut app).error.as_deref(), Some("HTTP 400: title taken"));
        assert_eq!(
            app.tui.notice.as_ref().map(|n| n.kind),
            Some(NoticeKind::Mutation)
        );
        assert!(!app.tui.tasks.product_list.is_running());
    }

    #[test]
    fn test_save_result_lands_on_the_form_that_sent_it() {
        let mut app = signed_in_app(vec![product("p1", "Tea")]);
        update(&mut app, press(KeyCode::Char('e')));
        let effects = update(&mut app, ctrl('s'));
        let [UiEffect::UpdateProduct { task, .. }] = effects.as_slice() else {
            panic!("expected one update, got {effects:?}");
        };
        let task = *task;

        // Esc waits for the answer, and list keys still go to the form.
        update(&mut app, press(KeyCode::Esc));
        update(&mut app, press(KeyCode::Char('n')));
        assert_eq!(app.modal(), ModalState::OpenEdit("p1"));
        assert_eq!(form(&mut app).draft.title, "Tean");

        let effects = complete(&mut app, TaskKind::ProductSave, task, UiEvent::ProductSaved(Ok(())));
        assert!(matches!(effects.as_slice(), [UiEffect::FetchProducts { .. }]));
        assert_eq!(app.modal(), ModalState::Closed);

        // With nothing pending the next modal opens and is left alone.
        update(&mut app, press(KeyCode::Char('n')));
        assert_eq!(app.modal(), ModalState::OpenCreate);
        update(&mut app, press(KeyCode::Char('Z')));
        assert_eq!(form(&mut app).draft.title, "Z");
    }

    #[test]
    fn test_delete_failure_stays_on_its_confirmation() {
        let mut app = signed_in_app(vec![product("p1", "Tea")]);
        update(&mut app, press(KeyCode::Char('d')));
        let effects = update(&mut app, press(KeyCode::Char('y')));
        let [UiEffect::DeleteProduct { task, .. }] = effects.as_slice() else {
            panic!("expected one delete, got {effects:?}");
        };
        let task = *task;

        update(&mut app, press(KeyCode::Esc));
        update(&mut app, press(KeyCode::Char('e')));
        assert_eq!(app.modal(), ModalState::OpenDelete("p1"));

        complete(
            &mut app,
            TaskKind::ProductDelete,
            task,
            UiEvent::ProductDeleted(Err(ApiError::new(
                ApiErrorKind::HttpStatus,
                "HTTP 500: delete failed",
            ))),
        );

        let Some(Overlay::DeleteConfirm(confirm)) = app.overlay.as_ref() else {
            panic!("expected delete confirmation, got {:?}", app.overlay);
        };
        assert_eq!(confirm.error.as_deref(), Some("HTTP 500: delete failed"));

        // Once the request is settled, cancel works again.
        update(&mut app, press(KeyCode::Esc));
        assert_eq!(app.modal(), ModalState::Closed);
    }

    #[test]
    fn test_second_submit_while_saving_emits_nothing() {
        let mut app = signed_in_app(vec![product("p1", "Tea")]);
        update(&mut app, press(KeyCode::Char('e')));

        let first = update(&mut app, ctrl('s'));
        assert_eq!(first.len(), 1);

        let second = update(&mut app, ctrl('s'));
        assert!(second.is_empty());
    }

    #[test]
    fn test_non_numeric_price_is_rejected_locally() {
        let mut app = signed_in_app(vec![]);
        update(&mut app, press(KeyCode::Char('n')));
        let draft = &mut form(&mut app).draft;
        draft.origin_price = "10".to_string();
        draft.price = "ten".to_string();

        let effects = update(&mut app, ctrl('s'));

        assert!(effects.is_empty());
        assert_eq!(
            app.tui.notice,
            Some(Notice::new(NoticeKind::Validation, "Price must be a number"))
        );
        assert!(!app.tui.tasks.product_save.is_running());
    }

    #[test]
    fn test_open_modal_swallows_list_keys() {
        let mut app = signed_in_app(vec![product("p1", "Tea")]);
        update(&mut app, press(KeyCode::Char('e')));

        update(&mut app, press(KeyCode::Char('d')));
        update(&mut app, press(KeyCode::Char('n')));

        assert_eq!(app.modal(), ModalState::OpenEdit("p1"));
        assert_eq!(form(&mut app).draft.title, "Teadn");
    }

    #[test]
    fn test_cancel_discards_buffer() {
        let mut app = signed_in_app(vec![product("p1", "Tea")]);
        update(&mut app, press(KeyCode::Char('e')));
        update(&mut app, press(KeyCode::Char('x')));

        let effects = update(&mut app, press(KeyCode::Esc));

        assert!(effects.is_empty());
        assert_eq!(app.modal(), ModalState::Closed);
        assert_eq!(app.tui.catalog.products[0].title, "Tea");
    }

    #[test]
    fn test_superseded_fetch_result_is_dropped() {
        let mut app = signed_in_app(vec![product("p1", "Tea")]);

        let effects = update(&mut app, press(KeyCode::Char('r')));
        let [UiEffect::FetchProducts { task: stale, .. }] = effects.as_slice() else {
            panic!("expected refresh");
        };
        let stale = *stale;
        let Some(UiEffect::FetchProducts { task: fresh, .. }) = app.tui.refresh_products(true)
        else {
            panic!("expected superseding refresh");
        };

        complete(
            &mut app,
            TaskKind::ProductList,
            stale,
            UiEvent::ProductsLoaded(Ok(vec![])),
        );
        assert_eq!(app.tui.catalog.products.len(), 1);

        complete(
            &mut app,
            TaskKind::ProductList,
            fresh,
            UiEvent::ProductsLoaded(Ok(vec![product("p2", "Coffee")])),
        );
        assert_eq!(app.tui.catalog.products[0].id, "p2");
    }

    #[test]
    fn test_expired_session_signs_out_on_tick() {
        let mut app = signed_in_app(vec![product("p1", "Tea")]);
        app.tui.auth.session = Some(session(1));
        update(&mut app, press(KeyCode::Char('n')));

        let effects = update(&mut app, UiEvent::Tick);

        assert!(matches!(effects.as_slice(), [UiEffect::ClearSession]));
        assert!(!app.tui.auth.is_signed_in());
        assert_eq!(app.modal(), ModalState::Closed);
        assert!(app.tui.catalog.products.is_empty());
        assert_eq!(
            app.tui.notice.as_ref().map(|n| n.kind),
            Some(NoticeKind::Auth)
        );
    }

    #[test]
    fn test_unauthorized_fetch_ends_session() {
        let mut app = signed_in_app(vec![product("p1", "Tea")]);
        let Some(UiEffect::FetchProducts { task, .. }) = app.tui.refresh_products(false) else {
            panic!("expected refresh");
        };

        let effects = complete(
            &mut app,
            TaskKind::ProductList,
            task,
            UiEvent::ProductsLoaded(Err(ApiError::new(ApiErrorKind::Unauthorized, "HTTP 401"))),
        );

        assert!(matches!(effects.as_slice(), [UiEffect::ClearSession]));
        assert!(app.tui.auth.session.is_none());
        assert!(app.tui.catalog.products.is_empty());
    }

    #[test]
    fn test_startup_check_then_fetch() {
        let mut app = AppState::new("http://localhost".to_string(), Some(session(u64::MAX)), None);

        let effects = update(&mut app, UiEvent::Started);
        let [UiEffect::CheckSession { task, token }] = effects.as_slice() else {
            panic!("expected session check, got {effects:?}");
        };
        assert_eq!(token, "tok");
        let task = *task;

        let effects = complete(
            &mut app,
            TaskKind::SessionCheck,
            task,
            UiEvent::SessionChecked(Ok(())),
        );

        assert!(app.tui.auth.is_signed_in());
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::FetchProducts { .. }]
        ));
    }

    #[test]
    fn test_logout_clears_everything() {
        let mut app = signed_in_app(vec![product("p1", "Tea")]);

        let effects = update(&mut app, press(KeyCode::Char('L')));

        assert!(matches!(effects.as_slice(), [UiEffect::ClearSession]));
        assert!(!app.tui.auth.is_signed_in());
        assert!(app.tui.catalog.products.is_empty());
        assert_eq!(app.tui.notice, Some(Notice::info("Signed out")));
    }

    #[test]
    fn test_ctrl_c_quits_from_any_view() {
        let mut app = signed_in_app(vec![]);
        update(&mut app, press(KeyCode::Char('n')));

        let effects = update(&mut app, ctrl('c'));

        assert!(matches!(effects.as_slice(), [UiEffect::Quit]));
    }
}
