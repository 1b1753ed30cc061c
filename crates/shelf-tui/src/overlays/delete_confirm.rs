//! Delete confirmation overlay.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use shelf_core::catalog::Product;

use super::render_utils::{InputHint, OverlayConfig, render_overlay};
use super::{OverlayEffect, OverlayUpdate};
use crate::common::truncate_with_ellipsis;
use crate::state::TuiState;

#[derive(Debug)]
pub struct DeleteConfirmState {
    /// The product that would be deleted (read-only).
    pub product: Product,
    pub error: Option<String>,
}

impl DeleteConfirmState {
    pub fn open(product: Product) -> Self {
        Self {
            product,
            error: None,
        }
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        let deleting = tui.tasks.product_delete.is_running();
        match key.code {
            KeyCode::Char('n' | 'N') | KeyCode::Esc if deleting => OverlayUpdate::stay(),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => {
                if deleting {
                    return OverlayUpdate::stay();
                }
                self.error = None;
                OverlayUpdate::stay().with_effects(vec![OverlayEffect::DeleteProduct {
                    id: self.product.id.clone(),
                }])
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, deleting: bool) {
        let hints = [
            InputHint::new("y", "delete"),
            InputHint::new("n", if deleting { "wait" } else { "cancel" }),
        ];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: "Delete Product",
                border_color: Color::Red,
                width: 54,
                height: 8,
                hints: &hints,
            },
        );
        let body = layout.body;
        let width = body.width.saturating_sub(2) as usize;

        let name = truncate_with_ellipsis(self.product.label(), width.saturating_sub(8));
        let status = if let Some(error) = &self.error {
            Line::from(Span::styled(
                truncate_with_ellipsis(error, width),
                Style::default().fg(Color::Red),
            ))
        } else if deleting {
            Line::from(Span::styled(
                "Deleting...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            Line::from(Span::styled(
                format!("id {}", self.product.id),
                Style::default().fg(Color::DarkGray),
            ))
        };

        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::raw("Delete "),
                Span::styled(name, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw("?"),
            ]),
            Line::from(""),
            status,
        ];
        frame.render_widget(
            Paragraph::new(lines),
            Rect::new(body.x + 1, body.y, body.width.saturating_sub(2), body.height),
        );
    }
}
