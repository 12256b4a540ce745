use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use ratatui_sales_dash::format::format_number;

use crate::app::App;

/// The metric pair shown at the top of every view: total revenue and
/// total transaction count of the filtered table.
pub fn render_metric_pair(app: &App, f: &mut Frame<'_>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let revenue = format_number(app.aggregates.totals.revenue, "R$");
    #[allow(clippy::cast_precision_loss)]
    let sales = format_number(app.aggregates.totals.sales as f64, "");

    render_metric(f, columns[0], "Revenue", &revenue, Color::Green);
    render_metric(f, columns[1], "Sales", &sales, Color::Cyan);
}

fn render_metric(f: &mut Frame<'_>, area: Rect, title: &str, value: &str, color: Color) {
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let paragraph = Paragraph::new(Text::from(TextLine::from(Span::styled(
        value.to_string(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ))))
    .block(block)
    .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}
