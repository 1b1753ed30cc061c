//! Product table view.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use shelf_core::catalog::display_price;

use crate::common::truncate_with_ellipsis;
use crate::state::TuiState;

/// Key hints shown in the status line while the table has focus.
pub const LIST_HINTS: &str =
    "↑/↓ select • r refresh • n new • e edit • d delete • L logout • q quit";

const TITLE_WIDTH: usize = 32;

/// Renders the product table, or a placeholder when there is nothing to show.
pub fn render_product_table(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let catalog = &tui.catalog;
    let title = format!(" Products ({}) ", catalog.products.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

    if catalog.products.is_empty() {
        let message = if !catalog.loaded && tui.tasks.product_list.is_running() {
            "Loading products..."
        } else {
            "No products yet. Press n to create one."
        };
        let para = Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(para, area);
        return;
    }

    let header = Row::new(["Title", "Category", "Unit", "Origin", "Price", "Enabled"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let rows = catalog.products.iter().map(|product| {
        let enabled = if product.is_enabled {
            Cell::from(Span::styled("yes", Style::default().fg(Color::Green)))
        } else {
            Cell::from(Span::styled("no", Style::default().fg(Color::DarkGray)))
        };
        Row::new(vec![
            Cell::from(truncate_with_ellipsis(product.label(), TITLE_WIDTH)),
            Cell::from(product.category.clone()),
            Cell::from(product.unit.clone()),
            Cell::from(display_price(product.origin_price)),
            Cell::from(display_price(product.price)),
            enabled,
        ])
    });

    let widths = [
        Constraint::Min(16),
        Constraint::Length(14),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(8),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default().with_selected(Some(catalog.selected));
    frame.render_stateful_widget(table, area, &mut state);
}
