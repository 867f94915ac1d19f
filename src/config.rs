use anyhow::{bail, Result};
#[cfg(test)]
use std::collections::HashMap;
use std::env;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// How results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => bail!("DUEDATE_OUTPUT must be 'text' or 'json', got '{}'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Output format for computed due dates
    pub output_format: OutputFormat,

    // tracing-subscriber filter directives, used when RUST_LOG is not set
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env if present, ignore if missing
        Self::from_getter(|key| env::var(key).ok())
    }

    /// Parse config from a custom getter function (for testing)
    pub fn from_getter<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            output_format: get("DUEDATE_OUTPUT")
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.parse::<OutputFormat>())
                .transpose()?
                .unwrap_or(OutputFormat::Text),

            log_filter: get("DUEDATE_LOG")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "duedate=info".to_string()),
        })
    }

    /// Create config from a HashMap (convenience for testing)
    #[cfg(test)]
    pub fn from_map(map: &HashMap<&str, &str>) -> Result<Self> {
        Self::from_getter(|key| map.get(key).map(|v| v.to_string()))
    }

    /// Validate configuration values at startup.
    /// Returns Ok(()) if all validations pass, or Err with details of what failed.
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        if let Err(e) = EnvFilter::try_new(&self.log_filter) {
            errors.push(format!("DUEDATE_LOG '{}' is not a valid filter: {}", self.log_filter, e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            bail!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )
        }
    }
}
