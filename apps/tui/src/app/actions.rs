use color_eyre::eyre::eyre;
use color_eyre::Result;

use ratatui_sales_dash::api::{SalesApi, Transaction};
use ratatui_sales_dash::config::init_app_config;
use ratatui_sales_dash::domain::Region;

/// Owns the HTTP client; the single side-effecting collaborator of the app.
#[derive(Debug)]
pub struct AppActions {
    api: Option<SalesApi>,
}

impl AppActions {
    pub const fn new() -> Self {
        Self { api: None }
    }

    pub fn initialize(&mut self) -> Result<()> {
        let config = init_app_config()?;
        self.api = Some(SalesApi::new(&config)?);
        Ok(())
    }

    pub const fn is_initialized(&self) -> bool {
        self.api.is_some()
    }

    fn api(&self) -> Result<&SalesApi> {
        self.api
            .as_ref()
            .ok_or_else(|| eyre!("API client not initialized"))
    }

    /// One blocking fetch for the given server-side filters.
    pub async fn load(&self, region: Region, year: Option<i32>) -> Result<Vec<Transaction>> {
        let rows = self.api()?.fetch_transactions(region, year).await?;
        Ok(rows)
    }
}
