use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Circle, Map, MapResolution};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::App;

// South America viewport, wide enough for every location in the dataset.
const LON_BOUNDS: [f64; 2] = [-82.0, -30.0];
const LAT_BOUNDS: [f64; 2] = [-35.0, 8.0];

const MAX_BUBBLE_RADIUS: f64 = 2.5;
const MIN_BUBBLE_RADIUS: f64 = 0.4;

/// Geographic bubble map: one circle per purchase location, bubble size
/// tracking its share of the maximum revenue.
pub fn render_revenue_map(app: &App, f: &mut Frame<'_>, area: Rect) {
    let table = &app.aggregates.by_location;
    if table.is_empty() {
        let block = Block::default()
            .title("Revenue by location")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let paragraph = Paragraph::new("No data for the current filters")
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    // The table is sorted descending, so the first row holds the maximum.
    let max_revenue = table[0].revenue.max(1.0);

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title("Revenue by location")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .x_bounds(LON_BOUNDS)
        .y_bounds(LAT_BOUNDS)
        .paint(|ctx| {
            ctx.draw(&Map {
                resolution: MapResolution::High,
                color: Color::DarkGray,
            });

            for entry in table {
                // Bubble area tracks revenue, so radius scales with the root.
                let share = (entry.revenue / max_revenue).sqrt();
                ctx.draw(&Circle {
                    x: entry.lon,
                    y: entry.lat,
                    radius: share.mul_add(MAX_BUBBLE_RADIUS, MIN_BUBBLE_RADIUS),
                    color: Color::Cyan,
                });
            }

            ctx.layer();
            for entry in table.iter().take(3) {
                ctx.print(
                    entry.lon,
                    entry.lat,
                    Span::styled(entry.location.clone(), Style::default().fg(Color::White)),
                );
            }
        });

    f.render_widget(canvas, area);
}
