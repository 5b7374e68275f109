//! Command-line and environment configuration

use app_ui::{TabRoute, ThemeMode};
use clap::{Parser, ValueEnum};
use graphql_client::GraphqlClientConfig;
use std::time::Duration;

/// Which tabs to mount
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TabSelection {
    /// Customers only
    Customers,
    /// Orders only
    Orders,
    /// Both, in tab bar order
    All,
}

impl TabSelection {
    /// Tabs to mount, in order
    pub fn tabs(self) -> Vec<TabRoute> {
        match self {
            TabSelection::Customers => vec![TabRoute::Customers],
            TabSelection::Orders => vec![TabRoute::Orders],
            TabSelection::All => TabRoute::all().to_vec(),
        }
    }
}

/// Courier Shell options
#[derive(Parser, Debug, Clone)]
#[command(name = "courier-shell", version, about = "Customers and orders tab shell")]
pub struct Args {
    /// GraphQL endpoint URL
    #[arg(long, env = "COURIER_GRAPHQL_ENDPOINT")]
    pub endpoint: String,

    /// API key, sent as `Authorization: apikey <key>`
    #[arg(long, env = "COURIER_GRAPHQL_APIKEY", hide_env_values = true)]
    pub api_key: String,

    /// Initial theme
    #[arg(long, default_value = "light")]
    pub theme: ThemeMode,

    /// Toggle the theme once after the first render
    #[arg(long)]
    pub toggle_theme: bool,

    /// Text for the Customers search field
    #[arg(long, default_value = "")]
    pub search: String,

    /// Tabs to mount
    #[arg(long, value_enum, default_value_t = TabSelection::All)]
    pub tab: TabSelection,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

impl Args {
    /// Transport configuration for these options
    pub fn graphql_config(&self) -> GraphqlClientConfig {
        GraphqlClientConfig::new(self.endpoint.as_str())
            .with_api_key(&self.api_key)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec![
            "courier-shell",
            "--endpoint",
            "https://example.com/graphql",
            "--api-key",
            "k",
        ];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert_eq!(args.theme, ThemeMode::Light);
        assert!(!args.toggle_theme);
        assert_eq!(args.search, "");
        assert_eq!(args.tab, TabSelection::All);
        assert_eq!(args.tab.tabs(), vec![TabRoute::Customers, TabRoute::Orders]);
    }

    #[test]
    fn test_flags() {
        let args = parse(&[
            "--theme",
            "dark",
            "--toggle-theme",
            "--search",
            "an",
            "--tab",
            "orders",
        ]);
        assert_eq!(args.theme, ThemeMode::Dark);
        assert!(args.toggle_theme);
        assert_eq!(args.search, "an");
        assert_eq!(args.tab.tabs(), vec![TabRoute::Orders]);
    }

    #[test]
    fn test_rejects_unknown_theme() {
        let result = Args::try_parse_from([
            "courier-shell",
            "--endpoint",
            "https://example.com/graphql",
            "--api-key",
            "k",
            "--theme",
            "dim",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_graphql_config() {
        let config = parse(&["--timeout-secs", "5"]).graphql_config();
        assert_eq!(config.endpoint, "https://example.com/graphql");
        assert_eq!(config.auth_header.as_deref(), Some("apikey k"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
