use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use ratatui_sales_dash::format::format_number;

/// Multiselect over the distinct salespeople of the current fetch.
pub fn render_seller_select(app: &App, f: &mut Frame<'_>) {
    let area = f.area();

    if app.seller_names.is_empty() {
        let block = Block::default()
            .title("Salespeople")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let paragraph = Paragraph::new("No salespeople in the current dataset.")
            .block(block)
            .alignment(ratatui::layout::Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from(""),
        Cell::from("Seller"),
        Cell::from("Revenue"),
        Cell::from("Sales"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let total_rows = app.seller_names.len();
    let max_visible_rows = area.height.saturating_sub(7) as usize;
    let offset = scroll_offset(total_rows, max_visible_rows, app.seller_cursor);

    let rows = app
        .seller_names
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(index, name)| {
            let is_cursor = index == app.seller_cursor;
            let is_selected = app.filters.selected_sellers.contains(name);

            let style = if is_cursor {
                Style::default()
                    .bg(Color::Rgb(0, 0, 238))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else if is_selected {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };

            let stats = app
                .aggregates
                .sellers
                .iter()
                .find(|entry| entry.seller == *name);

            Row::new(vec![
                Cell::from(if is_selected { "[x]" } else { "[ ]" }),
                Cell::from(name.clone()),
                Cell::from(stats.map_or_else(String::new, |entry| {
                    format_number(entry.revenue, "R$")
                })),
                Cell::from(stats.map_or_else(String::new, |entry| entry.sales.to_string())),
            ])
            .style(style)
        });

    let widths = [
        Constraint::Length(4),
        Constraint::Length(28),
        Constraint::Length(18),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(
                    "Salespeople ({} of {}, empty selection = no filter)",
                    app.seller_cursor + 1,
                    total_rows
                ))
                .borders(Borders::ALL),
        )
        .column_spacing(1);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    f.render_widget(table, chunks[0]);

    let key = |label: &'static str| {
        Span::styled(
            label,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    };

    let help_text = vec![
        key("Space"),
        Span::raw(": Toggle   "),
        key("c"),
        Span::raw(": Clear selection   "),
        key("↑/↓"),
        Span::raw(": Navigate   "),
        key("Enter/Esc"),
        Span::raw(": Back to dashboard   "),
        key("q"),
        Span::raw(": Quit"),
    ];

    let help_paragraph = Paragraph::new(TextLine::from(help_text))
        .block(Block::default().borders(Borders::TOP))
        .alignment(ratatui::layout::Alignment::Center);

    f.render_widget(help_paragraph, chunks[1]);
}

const fn scroll_offset(total_rows: usize, max_visible_rows: usize, cursor: usize) -> usize {
    if total_rows <= max_visible_rows {
        return 0;
    }

    if cursor >= max_visible_rows {
        return cursor - max_visible_rows + 1;
    }

    cursor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_offset_keeps_the_cursor_visible() {
        assert_eq!(scroll_offset(3, 10, 2), 0);
        assert_eq!(scroll_offset(20, 10, 4), 4);
        assert_eq!(scroll_offset(20, 10, 15), 6);
    }
}
