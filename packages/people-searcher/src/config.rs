use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use wikidata_client::{WikidataClient, DEFAULT_API_ROOT, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};

/// Searcher configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_root: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let timeout = match var("WIKIDATA_TIMEOUT_SECS") {
            Some(secs) => Duration::from_secs(
                secs.trim()
                    .parse()
                    .context("WIKIDATA_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            None => defaults.timeout,
        };

        Ok(Self {
            api_root: var("WIKIDATA_API_ROOT").unwrap_or(defaults.api_root),
            timeout,
            user_agent: var("WIKIDATA_USER_AGENT").unwrap_or(defaults.user_agent),
        })
    }

    pub fn client(&self) -> WikidataClient {
        WikidataClient::new()
            .with_api_root(&self.api_root)
            .with_timeout(self.timeout)
            .with_user_agent(&self.user_agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(vars(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api_root, "https://www.wikidata.org/w/api.php");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(vars(&[
            ("WIKIDATA_API_ROOT", "https://test.wikidata.org/w/api.php"),
            ("WIKIDATA_TIMEOUT_SECS", "5"),
            ("WIKIDATA_USER_AGENT", "catalogue-bot/2.0 (ops@example.org)"),
        ]))
        .unwrap();

        assert_eq!(config.api_root, "https://test.wikidata.org/w/api.php");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "catalogue-bot/2.0 (ops@example.org)");

        let client = config.client();
        assert_eq!(client.api_root(), config.api_root);
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_bad_timeout() {
        let err = Config::from_lookup(vars(&[("WIKIDATA_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("WIKIDATA_TIMEOUT_SECS"));
    }
}
