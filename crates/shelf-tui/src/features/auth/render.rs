//! Auth feature view.
//!
//! Rendering for the login screen shown while signed out.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{AuthPhase, LoginField};
use crate::common::text::mask;
use crate::overlays::render_utils::{
    InputLine, calculate_overlay_area, render_input_line, render_overlay_container,
};
use crate::state::TuiState;

/// Key hints shown in the status line on the login screen.
pub const LOGIN_HINTS: &str = "Tab switch field • Enter sign in • Esc quit";

/// Renders the centered login box.
pub fn render_login_view(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let popup = calculate_overlay_area(area, 56, 10);
    render_overlay_container(frame, popup, "Sign in", Color::Cyan);

    let inner = Rect::new(
        popup.x + 2,
        popup.y + 1,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(2),
    );
    if inner.height < 7 {
        return;
    }

    let auth = &tui.auth;
    let form = &auth.form;

    if auth.phase == AuthPhase::Checking {
        let para = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Checking saved session...",
                Style::default().fg(Color::Yellow),
            )),
        ]);
        frame.render_widget(para, inner);
        return;
    }

    let label_style = Style::default().fg(Color::DarkGray);
    frame.render_widget(
        Paragraph::new(Span::styled("Identifier", label_style)),
        Rect::new(inner.x, inner.y, inner.width, 1),
    );
    render_field(
        frame,
        Rect::new(inner.x, inner.y + 1, inner.width, 1),
        &form.identifier,
        form.focus == LoginField::Identifier,
    );

    frame.render_widget(
        Paragraph::new(Span::styled("Secret", label_style)),
        Rect::new(inner.x, inner.y + 3, inner.width, 1),
    );
    render_field(
        frame,
        Rect::new(inner.x, inner.y + 4, inner.width, 1),
        &mask(&form.secret),
        form.focus == LoginField::Secret,
    );

    let status = if tui.tasks.sign_in.is_running() {
        Span::styled(
            "Signing in...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        Span::styled(format!("Server: {}", tui.server), label_style)
    };
    frame.render_widget(
        Paragraph::new(status),
        Rect::new(inner.x, inner.y + 6, inner.width, 1),
    );
}

fn render_field(frame: &mut Frame, area: Rect, value: &str, focused: bool) {
    let (prompt_color, cursor_color) = if focused {
        (Color::Cyan, Color::Cyan)
    } else {
        (Color::DarkGray, Color::Reset)
    };
    render_input_line(
        frame,
        area,
        &InputLine {
            value,
            placeholder: None,
            prompt: "> ",
            prompt_color,
            text_color: Color::White,
            placeholder_color: Color::DarkGray,
            cursor_color,
            show_cursor: focused,
        },
    );
}
