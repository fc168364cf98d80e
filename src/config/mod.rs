use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use dotenvy::dotenv;
use serde::Deserialize;

const ENV_PREFIX: &str = "MARMORARIA_";

/// Command line flags. Anything set here wins over the environment.
#[derive(Debug, Default, Parser)]
#[command(name = "marmoraria", about = "Stone fabrication status panel")]
pub struct Cli {
    /// Name recorded on every change you make
    #[arg(long)]
    pub actor: Option<String>,

    /// Base URL used when copying project links
    #[arg(long)]
    pub base_url: Option<String>,

    /// Start with an empty project list
    #[arg(long)]
    pub no_fixtures: bool,

    /// Where to write the log
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Open the detail view of this project
    #[arg(long)]
    pub project: Option<u32>,
}

/// Configuration for the application
#[derive(Debug, Deserialize, PartialEq)]
pub struct Config {
    /// User attributed in the audit trailer of each change
    #[serde(default = "default_actor")]
    pub actor: String,

    /// Prefix for shareable project links
    #[serde(default = "default_share_base_url")]
    pub share_base_url: String,

    /// Step names, in fabrication order, given to new projects
    #[serde(default = "default_steps")]
    pub steps: Vec<String>,

    /// Seed the store with sample projects
    #[serde(default = "default_fixtures")]
    pub fixtures: bool,

    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// How long a notification stays on screen
    #[serde(default = "default_toast_seconds")]
    pub toast_seconds: u64,
}

fn default_actor() -> String {
    "Current user".to_string()
}

fn default_share_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_steps() -> Vec<String> {
    ["Cut", "Polish", "Transport", "Install"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_fixtures() -> bool {
    true
}

fn default_log_file() -> PathBuf {
    PathBuf::from("marmoraria.log")
}

fn default_toast_seconds() -> u64 {
    4
}

impl Config {
    /// Load configuration from `MARMORARIA_*` environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize prefixed environment variables into Config struct
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::prefixed(ENV_PREFIX).from_env::<Config>()?;

        Ok(config)
    }

    /// Overlays command line flags on top of the loaded values.
    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if let Some(actor) = &cli.actor {
            self.actor = actor.clone();
        }
        if let Some(base_url) = &cli.base_url {
            self.share_base_url = base_url.clone();
        }
        if cli.no_fixtures {
            self.fixtures = false;
        }
        if let Some(log_file) = &cli.log_file {
            self.log_file = log_file.clone();
        }
        self
    }

    pub fn validate(mut self) -> Result<Self> {
        self.actor = self.actor.trim().to_string();
        if self.actor.is_empty() {
            bail!("actor must not be empty");
        }

        self.steps = self
            .steps
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if self.steps.is_empty() {
            bail!("step template must name at least one step");
        }

        Ok(self)
    }
}

/// Initialize environment variables and load configuration
pub fn init(cli: &Cli) -> Result<Config> {
    Config::load()?.apply_cli(cli).validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        let vars = pairs
            .iter()
            .map(|(k, v)| (format!("{}{}", ENV_PREFIX, k), v.to_string()));
        envy::prefixed(ENV_PREFIX).from_iter(vars).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = from_pairs(&[]);
        assert_eq!(config.actor, "Current user");
        assert_eq!(config.share_base_url, "http://localhost:3000");
        assert_eq!(config.steps, vec!["Cut", "Polish", "Transport", "Install"]);
        assert!(config.fixtures);
        assert_eq!(config.toast_seconds, 4);
    }

    #[test]
    fn test_environment_values() {
        let config = from_pairs(&[
            ("ACTOR", "Vagner"),
            ("STEPS", "Cut,Polish,Install"),
            ("FIXTURES", "false"),
        ]);
        assert_eq!(config.actor, "Vagner");
        assert_eq!(config.steps, vec!["Cut", "Polish", "Install"]);
        assert!(!config.fixtures);
    }

    #[test]
    fn test_cli_overrides_environment() {
        let config = from_pairs(&[("ACTOR", "Vagner")]);
        let cli = Cli::parse_from(["marmoraria", "--actor", "Ana", "--no-fixtures"]);

        let config = config.apply_cli(&cli);
        assert_eq!(config.actor, "Ana");
        assert!(!config.fixtures);
    }

    #[test]
    fn test_validate_rejects_blank_actor() {
        let config = from_pairs(&[("ACTOR", "   ")]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_template() {
        let mut config = from_pairs(&[]);
        config.steps = vec![" ".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_project_flag() {
        let cli = Cli::parse_from(["marmoraria", "--project", "2"]);
        assert_eq!(cli.project, Some(2));
    }
}
