//! Product form overlay for creating and editing products.
//!
//! Every keystroke goes through [`ProductDraft::apply`] so the image-slot
//! rules live in one place. Submission validates locally and only then asks
//! the reducer for a save; the overlay stays open until the save succeeds.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use shelf_core::catalog::{DraftEdit, DraftField, MAX_IMAGE_SLOTS, Product, ProductDraft};

use super::render_utils::{
    InputHint, InputLine, OverlayConfig, render_input_line, render_overlay, render_separator,
};
use super::{OverlayEffect, OverlayUpdate};
use crate::mutations::StateMutation;
use crate::state::TuiState;
use crate::statusline::{Notice, NoticeKind};

const LABEL_WIDTH: u16 = 16;

/// Which submit action the form performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    Create,
    Edit,
}

/// Focused row of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Field(DraftField),
    Enabled,
    Image(usize),
}

#[derive(Debug)]
pub struct ProductFormState {
    pub mode: ModalMode,
    pub draft: ProductDraft,
    pub focus: FormFocus,
    /// Last rejection or failed request, shown under the fields.
    pub error: Option<String>,
}

impl ProductFormState {
    pub fn open_create() -> Self {
        Self {
            mode: ModalMode::Create,
            draft: ProductDraft::default(),
            focus: FormFocus::Field(DraftField::Title),
            error: None,
        }
    }

    pub fn open_edit(product: &Product) -> Self {
        Self {
            mode: ModalMode::Edit,
            draft: ProductDraft::from_product(product),
            focus: FormFocus::Field(DraftField::Title),
            error: None,
        }
    }

    /// Rows in display order.
    fn rows(&self) -> Vec<FormFocus> {
        DraftField::ALL
            .iter()
            .map(|field| FormFocus::Field(*field))
            .chain(std::iter::once(FormFocus::Enabled))
            .chain((0..self.draft.images.len()).map(FormFocus::Image))
            .collect()
    }

    fn focus_index(&self, rows: &[FormFocus]) -> usize {
        rows.iter().position(|row| *row == self.focus).unwrap_or(0)
    }

    fn focus_next(&mut self) {
        let rows = self.rows();
        let next = (self.focus_index(&rows) + 1) % rows.len();
        self.focus = rows[next];
    }

    fn focus_prev(&mut self) {
        let rows = self.rows();
        let current = self.focus_index(&rows);
        let prev = if current == 0 {
            rows.len() - 1
        } else {
            current - 1
        };
        self.focus = rows[prev];
    }

    fn clamp_focus(&mut self) {
        if let FormFocus::Image(index) = self.focus
            && index >= self.draft.images.len()
        {
            self.focus = FormFocus::Image(self.draft.images.len().saturating_sub(1));
        }
    }

    fn apply(&mut self, edit: DraftEdit) {
        if let Err(rejection) = self.draft.apply(edit) {
            self.error = Some(rejection.to_string());
        }
    }

    fn edit_focused_text(&mut self, change: impl FnOnce(&mut String)) {
        match self.focus {
            FormFocus::Field(field) => {
                let mut text = self.draft.text(field).to_string();
                change(&mut text);
                self.apply(DraftEdit::SetText(field, text));
            }
            FormFocus::Image(index) => {
                let mut url = self.draft.images.get(index).unwrap_or_default().to_string();
                change(&mut url);
                self.apply(DraftEdit::SetImage { index, url });
            }
            FormFocus::Enabled => {}
        }
    }

    fn submit(&mut self, tui: &TuiState) -> OverlayUpdate {
        if tui.tasks.product_save.is_running() {
            self.error = Some("Save in progress...".to_string());
            return OverlayUpdate::stay();
        }

        match self.draft.to_payload() {
            Ok(payload) => {
                self.error = None;
                OverlayUpdate::stay().with_effects(vec![OverlayEffect::SaveProduct {
                    mode: self.mode,
                    id: self.draft.id.clone(),
                    payload,
                }])
            }
            Err(err) => {
                let message = err.to_string();
                self.error = Some(message.clone());
                OverlayUpdate::stay().with_mutations(vec![StateMutation::SetNotice(Notice::new(
                    NoticeKind::Validation,
                    message,
                ))])
            }
        }
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        let submitting = key.code == KeyCode::Enter || (ctrl && key.code == KeyCode::Char('s'));
        if !submitting && key.code != KeyCode::Esc {
            self.error = None;
        }

        match key.code {
            // The pending result belongs to this form.
            KeyCode::Esc if tui.tasks.product_save.is_running() => OverlayUpdate::stay(),
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Enter => self.submit(tui),
            KeyCode::Char('s') if ctrl => self.submit(tui),
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                OverlayUpdate::stay()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                OverlayUpdate::stay()
            }
            KeyCode::Char('a') if ctrl => {
                self.apply(DraftEdit::AppendImage);
                if self.error.is_none() {
                    self.focus = FormFocus::Image(self.draft.images.len() - 1);
                }
                OverlayUpdate::stay()
            }
            KeyCode::Char('x') if ctrl => {
                self.apply(DraftEdit::RemoveImage);
                self.clamp_focus();
                OverlayUpdate::stay()
            }
            KeyCode::Char(' ') if self.focus == FormFocus::Enabled => {
                self.apply(DraftEdit::ToggleEnabled);
                OverlayUpdate::stay()
            }
            KeyCode::Backspace => {
                self.edit_focused_text(|text| {
                    text.pop();
                });
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl => {
                self.edit_focused_text(|text| text.push(c));
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, saving: bool) {
        render_product_form(frame, self, area, saving);
    }
}

fn render_product_form(frame: &mut Frame, state: &ProductFormState, area: Rect, saving: bool) {
    let rows = state.rows();
    let title = match state.mode {
        ModalMode::Create => "New Product",
        ModalMode::Edit => "Edit Product",
    };
    let hints = [
        InputHint::new("Tab", "next"),
        InputHint::new("Space", "toggle"),
        InputHint::new("^A/^X", "image +/-"),
        InputHint::new("^S", "save"),
        InputHint::new("Esc", if saving { "wait" } else { "cancel" }),
    ];
    let layout = render_overlay(
        frame,
        area,
        &OverlayConfig {
            title,
            border_color: Color::Yellow,
            width: 76,
            height: rows.len() as u16 + 6,
            hints: &hints,
        },
    );
    let body = layout.body;

    for (offset, row) in rows.iter().enumerate() {
        let y = body.y + offset as u16;
        if y >= body.y + body.height.saturating_sub(2) {
            break;
        }
        let focused = *row == state.focus;
        let label = match row {
            FormFocus::Field(field) => field.label().to_string(),
            FormFocus::Enabled => "Enabled".to_string(),
            FormFocus::Image(index) => format!("Image {}/{MAX_IMAGE_SLOTS}", index + 1),
        };
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        frame.render_widget(
            Paragraph::new(Span::styled(label, label_style)),
            Rect::new(body.x + 1, y, LABEL_WIDTH, 1),
        );

        let value_area = Rect::new(
            body.x + 1 + LABEL_WIDTH,
            y,
            body.width.saturating_sub(LABEL_WIDTH + 2),
            1,
        );
        match row {
            FormFocus::Enabled => {
                let (mark, color) = if state.draft.is_enabled {
                    ("[x] enabled", Color::Green)
                } else {
                    ("[ ] disabled", Color::DarkGray)
                };
                let mut style = Style::default().fg(color);
                if focused {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                frame.render_widget(
                    Paragraph::new(Line::from(vec![Span::raw("  "), Span::styled(mark, style)])),
                    value_area,
                );
            }
            FormFocus::Field(field) => {
                render_value(frame, value_area, state.draft.text(*field), focused);
            }
            FormFocus::Image(index) => {
                let url = state.draft.images.get(*index).unwrap_or_default();
                render_value(frame, value_area, url, focused);
            }
        }
    }

    let status_offset = body.height.saturating_sub(1);
    render_separator(frame, body, status_offset.saturating_sub(1));

    let status = if let Some(error) = &state.error {
        Span::styled(error.as_str(), Style::default().fg(Color::Red))
    } else if saving {
        Span::styled(
            "Saving...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        Span::styled(
            "Prices must be non-negative numbers",
            Style::default().fg(Color::DarkGray),
        )
    };
    frame.render_widget(
        Paragraph::new(status),
        Rect::new(body.x + 1, body.y + status_offset, body.width.saturating_sub(2), 1),
    );
}

fn render_value(frame: &mut Frame, area: Rect, value: &str, focused: bool) {
    render_input_line(
        frame,
        area,
        &InputLine {
            value,
            placeholder: None,
            prompt: "> ",
            prompt_color: if focused { Color::Yellow } else { Color::DarkGray },
            text_color: Color::White,
            placeholder_color: Color::DarkGray,
            cursor_color: Color::Yellow,
            show_cursor: focused,
        },
    );
}
