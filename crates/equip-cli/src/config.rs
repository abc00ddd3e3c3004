//! Runtime configuration from flags and environment.

use std::env;

use anyhow::{Context, Result};

use equip_core::{ApiUrl, DEFAULT_RECENT_CAPACITY};

/// Environment variable holding the API base URL.
pub const API_ENV: &str = "EQUIP_API_BASE_URL";

/// Environment variable overriding the recently-viewed capacity.
pub const RECENT_LIMIT_ENV: &str = "EQUIP_RECENT_LIMIT";

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiUrl,
    pub recent_limit: usize,
}

impl Config {
    /// Resolve the configuration: `--api`, then the environment, then
    /// defaults.
    pub fn resolve(api_flag: Option<&str>) -> Result<Self> {
        Self::from_sources(api_flag, non_empty_var(API_ENV), non_empty_var(RECENT_LIMIT_ENV))
    }

    fn from_sources(
        api_flag: Option<&str>,
        api_env: Option<String>,
        limit_env: Option<String>,
    ) -> Result<Self> {
        let api = match api_flag.map(str::to_string).or(api_env) {
            Some(url) => ApiUrl::new(&url).with_context(|| format!("Invalid API base URL: {url}"))?,
            None => ApiUrl::default(),
        };

        let recent_limit = match limit_env {
            Some(raw) => {
                let limit: usize = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid {RECENT_LIMIT_ENV}: {raw}"))?;
                anyhow::ensure!(limit > 0, "{RECENT_LIMIT_ENV} must be at least 1");
                limit
            }
            None => DEFAULT_RECENT_CAPACITY,
        };

        Ok(Self { api, recent_limit })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
