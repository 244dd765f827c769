use std::path::PathBuf;

use anyhow::Result;
use config::Config;
use serde::Deserialize;

const CONFIG_FILE: &str = "assets_scraper";
const ENV_PREFIX: &str = "ASSETS";

/// Where page HTML comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Rendered article at /wiki/<title>
    #[default]
    Html,
    /// MediaWiki `action=parse` JSON
    Api,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default)]
    pub source: Source,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub prefix_ids: bool,
}

fn default_output() -> PathBuf {
    PathBuf::from("services/mockData.ts")
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

impl Settings {
    /// Layered: `assets_scraper.toml` (optional), then `ASSETS_*` env vars.
    pub fn load() -> Result<Self> {
        let cfg = Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;
        Self::from_config(cfg)
    }

    fn from_config(cfg: Config) -> Result<Self> {
        Ok(cfg.try_deserialize()?)
    }
}
