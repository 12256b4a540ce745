use color_eyre::Result;
use crossterm::event::{self, Event};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;

use ratatui_sales_dash::aggregate::{top_sellers_by_revenue, top_sellers_by_sales};
use ratatui_sales_dash::format::format_number;

use crate::app::{handle_input, App};
use crate::ui;

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    loop {
        // Update animations
        app.update();

        // Draw the UI with better error context
        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_))
                | Err(_) => {
                    // Ignore non-key events
                }
            }
        }

        // A pending region/year change re-runs the whole pipeline. The fetch
        // is blocking; exactly one run is in flight at a time.
        if app.needs_fetch {
            app.needs_fetch = false;
            app.status_message = "Fetching transactions...".to_string();
            if terminal.draw(|f| ui::ui(app, f)).is_err() {
                // Non-fatal redraw error
            }

            match app.refresh().await {
                Ok(()) => {
                    app.status_message = format!(
                        "Loaded {} transactions for {}",
                        app.rows.len(),
                        app.filters.region().label()
                    );
                }
                Err(e) => {
                    app.status_message = format!("Fetch failed: {e}");
                }
            }
        }
    }
    Ok(())
}

/// Run the application in headless mode (no UI)
pub async fn run_headless(app: &mut App, json: bool) -> Result<()> {
    app.initialize()?;
    app.refresh().await?;

    let report = build_report(app);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn build_report(app: &App) -> Report {
    let aggregates = &app.aggregates;

    let top_locations = aggregates
        .by_location
        .iter()
        .take(5)
        .map(|entry| NamedRevenue {
            name: entry.location.clone(),
            revenue: entry.revenue,
        })
        .collect();

    let categories = aggregates
        .by_category
        .iter()
        .map(|entry| NamedRevenue {
            name: entry.category.clone(),
            revenue: entry.revenue,
        })
        .collect();

    let monthly = aggregates
        .by_month
        .iter()
        .map(|bucket| MonthlyEntry {
            year: bucket.year,
            month: bucket.month_name.to_string(),
            revenue: bucket.revenue,
        })
        .collect();

    let sellers_by_revenue = top_sellers_by_revenue(&aggregates.sellers, app.top_sellers)
        .into_iter()
        .map(|entry| SellerEntry {
            seller: entry.seller,
            revenue: entry.revenue,
            sales: entry.sales,
        })
        .collect();

    let sellers_by_sales = top_sellers_by_sales(&aggregates.sellers, app.top_sellers)
        .into_iter()
        .map(|entry| SellerEntry {
            seller: entry.seller,
            revenue: entry.revenue,
            sales: entry.sales,
        })
        .collect();

    #[allow(clippy::cast_precision_loss)]
    let sales_label = format_number(aggregates.totals.sales as f64, "");

    Report {
        region: app.filters.region().label().to_string(),
        year: app.filters.year_filter(),
        total_revenue: aggregates.totals.revenue,
        total_sales: aggregates.totals.sales,
        revenue_label: format_number(aggregates.totals.revenue, "R$"),
        sales_label,
        top_locations,
        categories,
        monthly,
        sellers_by_revenue,
        sellers_by_sales,
    }
}

fn print_report(report: &Report) {
    println!("\nSales Dashboard");
    println!("================");
    println!("Region: {}", report.region);
    match report.year {
        Some(year) => println!("Year: {year}"),
        None => println!("Year: whole period"),
    }
    println!("Revenue: {}", report.revenue_label);
    println!("Sales: {}", report.sales_label);

    println!("\nTop locations (revenue):");
    for entry in &report.top_locations {
        println!("- {}: {}", entry.name, format_number(entry.revenue, "R$"));
    }

    println!("\nRevenue by category:");
    for entry in &report.categories {
        println!("- {}: {}", entry.name, format_number(entry.revenue, "R$"));
    }

    println!("\nMonthly revenue:");
    for entry in &report.monthly {
        println!(
            "- {} {}: {}",
            entry.month,
            entry.year,
            format_number(entry.revenue, "R$")
        );
    }

    println!("\nTop sellers (revenue):");
    for entry in &report.sellers_by_revenue {
        println!(
            "- {}: {} ({} sales)",
            entry.seller,
            format_number(entry.revenue, "R$"),
            entry.sales
        );
    }

    println!("\nTop sellers (sales):");
    for entry in &report.sellers_by_sales {
        println!(
            "- {}: {} sales ({})",
            entry.seller,
            entry.sales,
            format_number(entry.revenue, "R$")
        );
    }
}

#[derive(serde::Serialize)]
struct Report {
    region: String,
    year: Option<i32>,
    total_revenue: f64,
    total_sales: u64,
    revenue_label: String,
    sales_label: String,
    top_locations: Vec<NamedRevenue>,
    categories: Vec<NamedRevenue>,
    monthly: Vec<MonthlyEntry>,
    sellers_by_revenue: Vec<SellerEntry>,
    sellers_by_sales: Vec<SellerEntry>,
}

#[derive(serde::Serialize)]
struct NamedRevenue {
    name: String,
    revenue: f64,
}

#[derive(serde::Serialize)]
struct MonthlyEntry {
    year: i32,
    month: String,
    revenue: f64,
}

#[derive(serde::Serialize)]
struct SellerEntry {
    seller: String,
    revenue: f64,
    sales: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ratatui_sales_dash::api::Transaction;

    #[test]
    fn report_reflects_the_aggregates() {
        let date = NaiveDate::from_ymd_opt(2022, 1, 10).unwrap_or_default();
        let rows = vec![
            Transaction {
                purchase_date: date,
                price: 1500.0,
                category: "livros".to_string(),
                location: "SP".to_string(),
                lat: -22.0,
                lon: -48.0,
                seller: "S1".to_string(),
            },
            Transaction {
                purchase_date: date,
                price: 500.0,
                category: "games".to_string(),
                location: "RJ".to_string(),
                lat: -22.9,
                lon: -43.2,
                seller: "S2".to_string(),
            },
        ];

        let mut app = App::new();
        app.apply_fetch(rows);
        let report = build_report(&app);

        assert_eq!(report.region, "Brasil");
        assert_eq!(report.year, None);
        assert_eq!(report.total_sales, 2);
        assert_eq!(report.revenue_label, "R$ 2.00 thousand");
        assert_eq!(report.top_locations[0].name, "SP");
        assert_eq!(report.sellers_by_revenue[0].seller, "S1");
        assert_eq!(report.sellers_by_sales.len(), 2);
    }
}
