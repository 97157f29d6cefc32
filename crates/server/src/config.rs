//! Command-line and environment configuration shared by the binaries.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Args;

use message_catalog::Catalog;
use upstream::UpstreamConfig;

/// Where the message catalog lives
#[derive(Debug, Clone, Args)]
pub struct CatalogArgs {
    /// CSV file with `Tags` and `Message` columns
    #[arg(long, env = "MOVIE_MESSAGES_CATALOG", default_value = "data/messages.csv")]
    pub catalog: PathBuf,
}

impl CatalogArgs {
    /// Load the catalog once; every request shares the result.
    pub fn load(&self) -> Result<Arc<Catalog>> {
        let catalog = Catalog::load_from_file(&self.catalog)
            .with_context(|| format!("Failed to load catalog {}", self.catalog.display()))?;
        Ok(Arc::new(catalog))
    }
}

/// How to reach the movie-information API
#[derive(Debug, Clone, Args)]
pub struct UpstreamArgs {
    #[arg(long, env = "ROTTEN_TOMATOES_API_BASE", default_value_t = UpstreamConfig::DEFAULT_BASE_URL.to_string())]
    pub api_base: String,

    #[arg(long, env = "ROTTEN_TOMATOES_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Per-request timeout
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,
}

impl UpstreamArgs {
    pub fn to_config(&self) -> Result<UpstreamConfig> {
        let Some(api_key) = self.api_key.as_deref().filter(|key| !key.is_empty()) else {
            bail!("An API key is required: pass --api-key or set ROTTEN_TOMATOES_API_KEY");
        };
        Ok(UpstreamConfig::new(api_key)
            .with_base_url(self.api_base.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs)))
    }
}
