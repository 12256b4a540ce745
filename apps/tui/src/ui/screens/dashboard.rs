use crate::app::{App, DashTab};
use crate::ui::widgets::charts::{
    render_category_bars, render_location_bars, render_monthly_line, render_seller_revenue_bars,
    render_seller_sales_bars,
};
use crate::ui::widgets::map::render_revenue_map;
use crate::ui::widgets::metrics::render_metric_pair;
use crate::ui::widgets::popup::centered_rect;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap};
use ratatui::Frame;

pub fn render_dashboard(app: &App, f: &mut Frame<'_>) {
    let layout = build_layout(app, f);

    if app.show_help {
        render_help_popup(f, layout[0]);
        return;
    }

    render_title_section(app, f, layout[0]);
    render_filters_section(app, f, layout[1]);
    render_content_section(app, f, layout[2]);
    render_status_section(app, f, layout[3]);
    render_shortcuts(f, layout[4]);
}

fn build_layout(app: &App, f: &Frame<'_>) -> Vec<Rect> {
    if app.show_help {
        return Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(100)])
            .split(f.area().inner(Margin::new(2, 1)))
            .to_vec();
    }

    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title and tabs
            Constraint::Length(3), // Active filters
            Constraint::Min(10),   // Charts and metrics
            Constraint::Length(3), // Status area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(2, 1)))
        .to_vec()
}

fn render_title_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("== Sales Dashboard ==")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(block, area);

    let titles = DashTab::ALL
        .iter()
        .map(|tab| TextLine::from(tab.label()))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));

    f.render_widget(tabs, area.inner(Margin::new(2, 1)));
}

fn render_filters_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Filters ")
        .title_style(Style::default().fg(Color::Green))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let period = if app.filters.all_period {
        "whole period".to_string()
    } else {
        app.filters.year.to_string()
    };

    let sellers = if app.filters.selected_sellers.is_empty() {
        "all".to_string()
    } else {
        format!("{} selected", app.filters.selected_sellers.len())
    };

    let line = TextLine::from(vec![
        Span::styled("Region: ", Style::default().fg(Color::Gray)),
        Span::styled(
            app.filters.region().label(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Period: ", Style::default().fg(Color::Gray)),
        Span::styled(
            period,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Sellers: ", Style::default().fg(Color::Gray)),
        Span::styled(
            sellers,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Top sellers: ", Style::default().fg(Color::Gray)),
        Span::styled(
            app.top_sellers.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let paragraph = Paragraph::new(Text::from(line)).block(block);
    f.render_widget(paragraph, area);
}

fn render_content_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    match app.tab {
        DashTab::Revenue => render_revenue_tab(app, f, area),
        DashTab::Volume => render_volume_tab(app, f, area),
        DashTab::Sellers => render_sellers_tab(app, f, area),
    }
}

fn render_revenue_tab(app: &App, f: &mut Frame<'_>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8)])
        .split(area);

    render_metric_pair(app, f, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(columns[0]);
    render_revenue_map(app, f, left[0]);
    render_location_bars(app, f, left[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(columns[1]);
    render_monthly_line(app, f, right[0]);
    render_category_bars(app, f, right[1]);
}

// The volume view is intentionally minimal: just the metric pair.
fn render_volume_tab(app: &App, f: &mut Frame<'_>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_metric_pair(app, f, rows[0]);
}

fn render_sellers_tab(app: &App, f: &mut Frame<'_>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8)])
        .split(area);

    render_metric_pair(app, f, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    render_seller_revenue_bars(app, f, columns[0]);
    render_seller_sales_bars(app, f, columns[1]);
}

fn render_status_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Status ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let message = if app.status_message.is_empty() {
        "Ready".to_string()
    } else {
        app.status_message.clone()
    };

    let paragraph = Paragraph::new(Text::from(TextLine::from(vec![
        Span::styled(
            heartbeat(app.animation_counter),
            Style::default().fg(Color::Green),
        ),
        Span::raw(" "),
        Span::styled(message, Style::default().fg(Color::White)),
    ])))
    .block(block);

    f.render_widget(paragraph, area);
}

// Live indicator so a stalled draw loop is visible at a glance.
fn heartbeat(animation_counter: f64) -> &'static str {
    if (animation_counter * 2.0).sin() > 0.0 {
        "●"
    } else {
        "○"
    }
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key = |label: &'static str| {
        Span::styled(
            label,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    };
    let hint = |label: &'static str| Span::styled(label, Style::default().fg(Color::Gray));

    let line = TextLine::from(vec![
        key("Tab"),
        hint(": Views | "),
        key("r"),
        hint(": Region | "),
        key("a"),
        hint(": Whole period | "),
        key("↑/↓"),
        hint(": Year | "),
        key("s"),
        hint(": Sellers | "),
        key("+/-"),
        hint(": Top N | "),
        key("f"),
        hint(": Refetch | "),
        key("?"),
        hint(": Help | "),
        key("q"),
        hint(": Quit"),
    ]);

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let popup_area = centered_rect(80, 80, area);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let paragraph = Paragraph::new(Text::from(build_help_lines()))
        .block(block)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, popup_area);

    let hint = Paragraph::new(Text::from(TextLine::from(Span::styled(
        "Press ? or Esc to close",
        Style::default().fg(Color::Gray),
    ))))
    .alignment(Alignment::Center);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };

    f.render_widget(hint, hint_area);
}

fn build_help_lines() -> Vec<TextLine<'static>> {
    let key_line = |key: &'static str, text: &'static str| {
        TextLine::from(vec![
            Span::styled(
                format!("  {key}"),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" - {text}"), Style::default()),
        ])
    };

    let mut lines = vec![
        TextLine::from(vec![Span::styled(
            "Sales Dashboard",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )]),
        TextLine::from(""),
        TextLine::from(
            "Fetches sales transactions from the remote dataset and aggregates them by location, month, category and salesperson.",
        ),
        TextLine::from("Changing the region or year refetches; the seller selection only re-filters in memory."),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "Keyboard Shortcuts:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        key_line("?", "Toggle this help popup"),
        key_line("Tab / Shift-Tab", "Cycle through the three views"),
        key_line("1 / 2 / 3", "Jump to Revenue, Sales volume, Salespeople"),
        key_line("r / R", "Next / previous region (Brasil means no filter)"),
        key_line("a", "Toggle the whole-period switch"),
        key_line("Up / Down", "Adjust the year (2020-2023, off while whole-period is on)"),
        key_line("s", "Open the salesperson multiselect"),
        key_line("+ / -", "Adjust the top-N sellers bound (2-10)"),
        key_line("f", "Refetch with the current filters"),
        key_line("q", "Quit application"),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "Views:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        TextLine::from("  Revenue: metric pair, location map, top locations, monthly lines, categories"),
        TextLine::from("  Sales volume: the metric pair only"),
        TextLine::from("  Salespeople: metric pair plus two top-N rankings (revenue vs. sales)"),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "CLI Options:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
    ];

    let help_text = ratatui_sales_dash::cli::CliArgs::help_text();
    for line in help_text.lines() {
        if line.starts_with("Usage") || line.starts_with("Options") || line.trim().is_empty() {
            continue;
        }
        lines.push(TextLine::from(line.to_string()));
    }

    lines
}
