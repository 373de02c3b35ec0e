//! Handles settings for the application: an optional TOML file, then
//! `FINTRACK_*` environment variables, then command line flags.
//!
//! See `config/fintrack.toml` for the configuration.
use config::{Environment, File, Source};
use repository::{Budgets, Categories, SavingsGoals, Schema, Transactions};
use serde::Deserialize;

use crate::{cli::Cli, error::Result};

const DEFAULT_CONFIG_PATH: &str = "config/fintrack.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub project_id: String,
    pub public_key: String,
    pub level: String,
    pub request_timeout_secs: u64,
    pub tables: Tables,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            project_id: String::new(),
            public_key: String::new(),
            level: "info".to_string(),
            request_timeout_secs: 30,
            tables: Tables::default(),
        }
    }
}

/// Table backing each entity.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Tables {
    pub budgets: String,
    pub categories: String,
    pub savings_goals: String,
    pub transactions: String,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            budgets: Budgets::TABLE.to_string(),
            categories: Categories::TABLE.to_string(),
            savings_goals: SavingsGoals::TABLE.to_string(),
            transactions: Transactions::TABLE.to_string(),
        }
    }
}

pub fn load(cli: &Cli) -> Result<Settings> {
    let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    resolve(File::with_name(config_path).required(false), cli)
}

fn resolve<S>(file: S, cli: &Cli) -> Result<Settings>
where
    S: Source + Send + Sync + 'static,
{
    let mut settings: Settings = config::Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix("FINTRACK")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()?;

    if let Some(base_url) = &cli.base_url {
        settings.base_url = base_url.clone();
    }
    if let Some(project_id) = &cli.project_id {
        settings.project_id = project_id.clone();
    }
    if let Some(level) = &cli.level {
        settings.level = level.clone();
    }

    Ok(settings)
}
