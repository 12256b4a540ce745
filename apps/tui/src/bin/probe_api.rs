use color_eyre::Result;

use ratatui_sales_dash::api::SalesApi;
use ratatui_sales_dash::config::init_app_config;
use ratatui_sales_dash::domain::Region;

/// Connectivity check: one fetch per region, printing the row counts.
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = init_app_config()?;
    println!("Probing {}", config.base_url);

    let api = SalesApi::new(&config)?;
    for region in Region::ALL {
        let rows = api.fetch_transactions(region, None).await?;
        println!("- {:<13} {} transactions", region.label(), rows.len());
    }

    Ok(())
}
