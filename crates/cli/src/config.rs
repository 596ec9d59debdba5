//! CLI runtime configuration.
//!
//! Resolved once at startup from the process environment (after loading `.env`), then passed
//! to the command handlers. Command-line flags take precedence over these values.

use anyhow::anyhow;
use clap::ValueEnum;

pub const FAMILY_VAR: &str = "CHECKLIST_FAMILY";
pub const LOG_LEVEL_VAR: &str = "CHECKLIST_LOG_LEVEL";
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Admission family whose tab set and catalog a command works on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Family {
    Doctorate,
    General,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliConfig {
    family: Family,
    log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            family: Family::Doctorate,
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
        }
    }
}

impl CliConfig {
    /// Loads `.env` if present, then reads the configuration from the environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Unset or blank variables take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(family) = non_blank(lookup(FAMILY_VAR)) {
            config.family = Family::from_str(&family, true)
                .map_err(|err| anyhow!("invalid {FAMILY_VAR}: {err}"))?;
        }
        if let Some(level) = non_blank(lookup(LOG_LEVEL_VAR)) {
            config.log_level = level;
        }

        Ok(config)
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn log_level(&self) -> &str {
        &self.log_level
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
