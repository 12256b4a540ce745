use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::api::models::Transaction;
use crate::config::ApiConfig;
use crate::domain::Region;

/// Errors raised while fetching the transaction table.
///
/// All of them are fatal for the current run; there is no retry policy.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("endpoint returned {0}")]
    Status(StatusCode),
}

/// Client for the remote sales-transaction endpoint.
#[derive(Debug, Clone)]
pub struct SalesApi {
    client: Client,
    base_url: String,
}

impl SalesApi {
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every transaction matching the region/year filters.
    ///
    /// Both parameters are always sent; the empty string means "no filter"
    /// on the server side.
    pub async fn fetch_transactions(
        &self,
        region: Region,
        year: Option<i32>,
    ) -> Result<Vec<Transaction>, FetchError> {
        let year_param = year_param(year);
        if crate::config::debug_enabled() {
            eprintln!(
                "GET {} regiao={:?} ano={:?}",
                self.base_url,
                region.query_value(),
                year_param
            );
        }

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("regiao", region.query_value()), ("ano", year_param.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let rows = response.json::<Vec<Transaction>>().await?;
        Ok(rows)
    }
}

/// `ano` query value: four-digit year, or empty for all years.
fn year_param(year: Option<i32>) -> String {
    year.map_or_else(String::new, |year| year.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_param_is_empty_for_all_years() {
        assert_eq!(year_param(None), "");
        assert_eq!(year_param(Some(2021)), "2021");
    }

    #[test]
    fn client_builds_from_config() -> Result<(), FetchError> {
        let config = ApiConfig {
            base_url: "https://labdados.com/produtos".to_string(),
            timeout_secs: 5,
        };
        let api = SalesApi::new(&config)?;
        assert_eq!(api.base_url(), "https://labdados.com/produtos");
        Ok(())
    }
}
