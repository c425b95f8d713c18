pub mod toml_config;

pub use toml_config::TomlConfig;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use clap::{Args, Parser, Subcommand};

pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Parser, Debug)]
#[command(name = "visual-audit", version, about = "AI-assisted visual inspections from the command line")]
pub struct Cli {
    #[command(flatten)]
    pub config: CliConfig,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct CliConfig {
    #[arg(long = "config", global = true, help = "TOML profile merged under CLI flags")]
    pub config_file: Option<String>,

    #[arg(long, global = true, help = "Model to query")]
    pub model: Option<String>,

    #[arg(long, global = true, help = "Base URL of the generative service")]
    pub base_url: Option<String>,

    #[arg(long, global = true, help = "API key (falls back to the GEMINI_API_KEY environment variable)")]
    pub api_key: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze an image with a natural-language inspection query
    Analyze {
        #[arg(long, help = "Path to the image file (jpg, png, gif, webp)")]
        image: String,

        #[arg(long, help = "What to look for")]
        prompt: String,

        #[arg(long, help = "Print the report as JSON")]
        json: bool,
    },
    /// Chat with the audit assistant
    Chat,
}

/// Fully resolved configuration: CLI flags over TOML profile over defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub model: String,
    pub base_url: String,
    pub api_key: String,
    pub verbose: bool,
}

impl Settings {
    pub fn resolve(cli: &CliConfig, file: Option<&TomlConfig>) -> Self {
        let service = file.map(|f| &f.service);

        let model = cli
            .model
            .clone()
            .or_else(|| service.and_then(|s| s.model.clone()))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base_url = cli
            .base_url
            .clone()
            .or_else(|| service.and_then(|s| s.base_url.clone()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        // An absent credential is not rejected here; the service refuses the
        // unauthenticated call instead.
        let api_key = cli
            .api_key
            .clone()
            .or_else(|| service.and_then(|s| s.api_key.clone()))
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .unwrap_or_default();

        Self {
            model,
            base_url,
            api_key,
            verbose: cli.verbose,
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_non_empty_string("model", &self.model)?;
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn verbose(&self) -> bool {
        self.verbose
    }
}
