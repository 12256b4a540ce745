use clap::{CommandFactory, Parser};

#[derive(Debug, Parser)]
#[command(name = "ratatui_sales-dash", version, about = "Sales Dashboard TUI")]
pub struct CliArgs {
    /// Print aggregated stats and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless stats as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Initial region filter (Brasil, Centro-Oeste, Nordeste, Sudeste, Sul)
    #[arg(long, value_name = "REGION")]
    pub region: Option<String>,

    /// Initial year filter (2020-2023); omit for the whole period
    #[arg(long, value_name = "YEAR")]
    pub year: Option<i32>,

    /// Override the data endpoint URL
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Override the request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.url {
            std::env::set_var("SALES_API_URL", url);
        }
        if let Some(timeout) = self.timeout {
            std::env::set_var("SALES_API_TIMEOUT_SECS", timeout.to_string());
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headless_flags() {
        let args =
            CliArgs::parse_from(["sales-dash", "--headless", "--json", "--region", "Sul"]);
        assert!(args.headless);
        assert!(args.json);
        assert_eq!(args.region.as_deref(), Some("Sul"));
        assert_eq!(args.year, None);
    }

    #[test]
    fn help_text_mentions_the_filters() {
        let help = CliArgs::help_text();
        assert!(help.contains("--region"));
        assert!(help.contains("--year"));
    }
}
