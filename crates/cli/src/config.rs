//! Contract parameters for the `parse` and `check` subcommands.
//!
//! Parameters come from an optional TOML file and from command-line flags;
//! a flag wins over the file.
//!
//! # Example
//!
//! ```toml
//! [sequence]
//! years_to_maturity = 55
//! issue_age = 45
//! retirement_age = 65
//! allowed_keywords = ["glp", "sevenpay"]
//! keywords_only = false
//! ```

use std::path::{Path, PathBuf};

use inseq_core::SequenceParams;
use serde::Deserialize;

// ── Types ─────────────────────────────────────────────────────────────────────

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ConfigFile {
    #[serde(default)]
    pub sequence: SequenceConfig,
}

/// `[sequence]` section. Every field is optional so that flags can fill gaps.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SequenceConfig {
    pub years_to_maturity: Option<i32>,
    pub issue_age: Option<i32>,
    pub retirement_age: Option<i32>,
    pub inforce_duration: Option<i32>,
    pub effective_year: Option<i32>,
    #[serde(default)]
    pub allowed_keywords: Vec<String>,
    #[serde(default)]
    pub keywords_only: bool,
}

/// Parameter flags shared by `parse` and `check`.
#[derive(Debug, Clone, Default, clap::Args)]
pub(crate) struct ParamArgs {
    /// TOML file with a [sequence] table of contract parameters
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Contract length in years
    #[arg(long)]
    pub years_to_maturity: Option<i32>,

    /// Age at issue
    #[arg(long)]
    pub issue_age: Option<i32>,

    /// Retirement age
    #[arg(long)]
    pub retirement_age: Option<i32>,

    /// Keyword accepted as a value (repeatable)
    #[arg(long = "keyword")]
    pub keywords: Vec<String>,

    /// Accept only keywords as values
    #[arg(long)]
    pub keywords_only: bool,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("could not read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not parse '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("years to maturity is required: pass --years-to-maturity or set it under [sequence]")]
    MissingYearsToMaturity,
}

// ── Functions ─────────────────────────────────────────────────────────────────

pub(crate) fn read_config(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_owned(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_owned(),
        source,
    })
}

impl ParamArgs {
    /// Load the config file, if any, and overlay the flags on it.
    pub(crate) fn resolve(&self) -> Result<SequenceParams, ConfigError> {
        let file = match &self.config {
            Some(path) => read_config(path)?,
            None => ConfigFile::default(),
        };
        let params = self.merge(file.sequence)?;
        tracing::debug!(?params, "resolved sequence parameters");
        Ok(params)
    }

    fn merge(&self, file: SequenceConfig) -> Result<SequenceParams, ConfigError> {
        let years_to_maturity = self
            .years_to_maturity
            .or(file.years_to_maturity)
            .ok_or(ConfigError::MissingYearsToMaturity)?;
        let allowed_keywords = if self.keywords.is_empty() {
            file.allowed_keywords
        } else {
            self.keywords.clone()
        };
        Ok(SequenceParams {
            years_to_maturity,
            issue_age: self.issue_age.or(file.issue_age).unwrap_or(0),
            retirement_age: self.retirement_age.or(file.retirement_age).unwrap_or(65),
            inforce_duration: file.inforce_duration.unwrap_or(0),
            effective_year: file.effective_year.unwrap_or(0),
            allowed_keywords,
            keywords_only: self.keywords_only || file.keywords_only,
        })
    }
}
