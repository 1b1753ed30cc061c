//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui Frame, and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::auth::{LOGIN_HINTS, render_login_view};
use crate::catalog::{LIST_HINTS, render_product_table};
use crate::common::truncate_start_with_ellipsis;
use crate::overlays::OverlayExt;
use crate::state::{AppState, TuiState};
use crate::statusline::render_status_line;

/// Hints while a modal owns the keyboard; the modal shows its own.
const MODAL_HINTS: &str = "Ctrl+C quit";

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let [header, body, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let state = &app.tui;
    render_header(frame, header, state);

    let hints = if state.auth.is_signed_in() {
        render_product_table(frame, body, state);
        if app.overlay.is_some() {
            MODAL_HINTS
        } else {
            LIST_HINTS
        }
    } else {
        render_login_view(frame, body, state);
        LOGIN_HINTS
    };

    app.overlay.render(frame, body, &state.tasks);
    render_status_line(frame, status, state, hints);
}

fn render_header(frame: &mut Frame, area: Rect, state: &TuiState) {
    let mut spans = vec![Span::styled(
        " shelf ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    let who = state
        .auth
        .identifier()
        .filter(|_| state.auth.is_signed_in())
        .map(|id| format!(" {id} @"))
        .unwrap_or_default();
    spans.push(Span::styled(who, Style::default().fg(Color::Green)));

    let used = spans.iter().map(Span::width).sum::<usize>();
    let room = (area.width as usize).saturating_sub(used + 1);
    spans.push(Span::styled(
        format!(" {}", truncate_start_with_ellipsis(&state.server, room)),
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
