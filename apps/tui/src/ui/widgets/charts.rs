use ratatui::layout::{Alignment, Direction, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
};
use ratatui::Frame;

use ratatui_sales_dash::aggregate::{top_sellers_by_revenue, top_sellers_by_sales, SellerStats};
use ratatui_sales_dash::format::format_number;

use crate::app::App;

const YEAR_PALETTE: [Color; 5] = [
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Green,
    Color::LightRed,
];

fn no_data(f: &mut Frame<'_>, area: Rect, title: &str) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let paragraph = Paragraph::new("No data for the current filters")
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

/// Monthly revenue, one line per year.
///
/// The y-axis is pinned to the maximum bucket across every year in the
/// aggregate, so switching the year filter never rescales the chart.
pub fn render_monthly_line(app: &App, f: &mut Frame<'_>, area: Rect) {
    let monthly = &app.aggregates.by_month;
    if monthly.is_empty() {
        no_data(f, area, "Monthly revenue");
        return;
    }

    let y_max = monthly
        .iter()
        .map(|bucket| bucket.revenue)
        .fold(0.0_f64, f64::max)
        .max(1.0);

    // One series per year, in chronological order.
    let mut series: Vec<(i32, Vec<(f64, f64)>)> = Vec::new();
    for bucket in monthly {
        let point = (f64::from(bucket.month), bucket.revenue);
        match series.iter_mut().find(|(year, _)| *year == bucket.year) {
            Some((_, points)) => points.push(point),
            None => series.push((bucket.year, vec![point])),
        }
    }

    let datasets = series
        .iter()
        .enumerate()
        .map(|(index, (year, points))| {
            Dataset::default()
                .name(year.to_string())
                .marker(Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(YEAR_PALETTE[index % YEAR_PALETTE.len()]))
                .data(points)
        })
        .collect::<Vec<_>>();

    let x_labels = vec![
        Span::raw("Jan"),
        Span::raw("Apr"),
        Span::raw("Jul"),
        Span::raw("Oct"),
        Span::raw("Dec"),
    ];
    let y_labels = vec![
        Span::raw("0"),
        Span::raw(format_number(y_max / 2.0, "")),
        Span::raw(format_number(y_max, "")),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title("Monthly revenue")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .x_axis(
            Axis::default()
                .title("Month")
                .style(Style::default().fg(Color::Gray))
                .bounds([1.0, 12.0])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Revenue")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, y_max])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

/// Top five locations by revenue, value labels on the bars.
pub fn render_location_bars(app: &App, f: &mut Frame<'_>, area: Rect) {
    let table = &app.aggregates.by_location;
    if table.is_empty() {
        no_data(f, area, "Top locations (revenue)");
        return;
    }

    let entries: Vec<(String, f64)> = table
        .iter()
        .take(5)
        .map(|entry| (entry.location.clone(), entry.revenue))
        .collect();

    render_revenue_barchart(f, area, "Top locations (revenue)", &entries, Color::Cyan);
}

/// Every product category by revenue, value labels on the bars.
pub fn render_category_bars(app: &App, f: &mut Frame<'_>, area: Rect) {
    let table = &app.aggregates.by_category;
    if table.is_empty() {
        no_data(f, area, "Revenue by category");
        return;
    }

    let entries: Vec<(String, f64)> = table
        .iter()
        .map(|entry| (entry.category.clone(), entry.revenue))
        .collect();

    render_revenue_barchart(f, area, "Revenue by category", &entries, Color::Yellow);
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn render_revenue_barchart(
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    entries: &[(String, f64)],
    color: Color,
) {
    let bars: Vec<Bar<'_>> = entries
        .iter()
        .map(|(name, revenue)| {
            Bar::default()
                .value(*revenue as u64)
                .text_value(format_number(*revenue, ""))
                .label(TextLine::from(name.clone()))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        })
        .collect();

    let max_value = entries
        .iter()
        .map(|(_, revenue)| *revenue as u64)
        .max()
        .unwrap_or(0)
        .max(1);

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .data(BarGroup::default().bars(&bars))
        .max(max_value)
        .bar_gap(1)
        .bar_width(8);

    f.render_widget(chart, area);
}

/// Top-N sellers ranked by revenue; N is the user-controlled bound.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn render_seller_revenue_bars(app: &App, f: &mut Frame<'_>, area: Rect) {
    let title = format!("Top {} sellers (revenue)", app.top_sellers);
    let ranked = top_sellers_by_revenue(&app.aggregates.sellers, app.top_sellers);
    if ranked.is_empty() {
        no_data(f, area, &title);
        return;
    }

    render_seller_barchart(f, area, &title, &ranked, Color::Green, |entry| {
        (entry.revenue as u64, format_number(entry.revenue, "R$"))
    });
}

/// Top-N sellers ranked by sale count; re-sorted independently of revenue.
pub fn render_seller_sales_bars(app: &App, f: &mut Frame<'_>, area: Rect) {
    let title = format!("Top {} sellers (sales)", app.top_sellers);
    let ranked = top_sellers_by_sales(&app.aggregates.sellers, app.top_sellers);
    if ranked.is_empty() {
        no_data(f, area, &title);
        return;
    }

    render_seller_barchart(f, area, &title, &ranked, Color::Magenta, |entry| {
        (entry.sales, entry.sales.to_string())
    });
}

fn render_seller_barchart(
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    ranked: &[SellerStats],
    color: Color,
    value_of: impl Fn(&SellerStats) -> (u64, String),
) {
    let bars: Vec<Bar<'_>> = ranked
        .iter()
        .map(|entry| {
            let (value, text) = value_of(entry);
            Bar::default()
                .value(value)
                .text_value(text)
                .label(TextLine::from(entry.seller.clone()))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        })
        .collect();

    let max_value = ranked
        .iter()
        .map(|entry| value_of(entry).0)
        .max()
        .unwrap_or(0)
        .max(1);

    // Horizontal bars leave room for full seller names.
    let chart = BarChart::default()
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .max(max_value)
        .bar_gap(1)
        .bar_width(1);

    f.render_widget(chart, area);
}
