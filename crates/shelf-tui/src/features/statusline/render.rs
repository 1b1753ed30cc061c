use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{Notice, NoticeKind};
use crate::common::truncate_with_ellipsis;
use crate::state::TuiState;

/// Spinner frames for in-flight requests.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

fn notice_style(kind: NoticeKind) -> Style {
    match kind {
        NoticeKind::Info => Style::default().fg(Color::Green),
        NoticeKind::Validation => Style::default().fg(Color::Yellow),
        NoticeKind::Auth | NoticeKind::Fetch | NoticeKind::Mutation => {
            Style::default().fg(Color::Red)
        }
    }
}

fn notice_prefix(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Info => "",
        NoticeKind::Auth => "Auth: ",
        NoticeKind::Fetch => "Fetch failed: ",
        NoticeKind::Mutation => "Change failed: ",
        NoticeKind::Validation => "Invalid: ",
    }
}

/// Renders the bottom status bar: spinner, then the notice or key hints.
pub fn render_status_line(frame: &mut Frame, area: Rect, tui: &TuiState, hints: &str) {
    let mut spans = Vec::new();

    if tui.tasks.is_any_running() {
        let spinner = SPINNER_FRAMES[tui.spinner_frame % SPINNER_FRAMES.len()];
        spans.push(Span::styled(
            format!("{spinner} "),
            Style::default().fg(Color::Cyan),
        ));
    }

    let used = spans.iter().map(Span::width).sum::<usize>();
    let room = (area.width as usize).saturating_sub(used);

    match &tui.notice {
        Some(Notice { kind, text }) => {
            let message = format!("{}{text}", notice_prefix(*kind));
            let mut style = notice_style(*kind);
            if kind.is_error() {
                style = style.add_modifier(Modifier::BOLD);
            }
            spans.push(Span::styled(
                truncate_with_ellipsis(&message, room),
                style,
            ));
        }
        None => spans.push(Span::styled(
            truncate_with_ellipsis(hints, room),
            Style::default().fg(Color::DarkGray),
        )),
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
