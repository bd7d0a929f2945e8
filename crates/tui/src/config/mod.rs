use assistant::AssistantSettings;
use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/fintrack.toml";
const ENV_PREFIX: &str = "FINTRACK";
/// Read when the key is not set in the file or under `FINTRACK__ASSISTANT__API_KEY`.
const FALLBACK_KEY_VAR: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub level: String,
    pub log_file: String,
    pub sample_data: bool,
    pub assistant: AssistantSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_file: "fintrack_tui.log".to_string(),
            sample_data: true,
            assistant: AssistantSettings::default(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "fintrack_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override log level (e.g. debug).
    #[arg(long)]
    level: Option<String>,
    /// Override log file path.
    #[arg(long)]
    log_file: Option<String>,
    /// Override generative API base URL (the API key is never read from CLI).
    #[arg(long)]
    base_url: Option<String>,
    /// Override model order, comma separated.
    #[arg(long, value_delimiter = ',')]
    models: Option<Vec<String>>,
    /// Start with empty ledgers instead of the demo records.
    #[arg(long)]
    empty: bool,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(level) = args.level {
        settings.level = level;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }
    if let Some(base_url) = args.base_url {
        settings.assistant.base_url = base_url;
    }
    if let Some(models) = args.models {
        settings.assistant.models = models;
    }
    if args.empty {
        settings.sample_data = false;
    }
    if settings.assistant.api_key().is_none() {
        settings.assistant.api_key = std::env::var(FALLBACK_KEY_VAR).ok();
    }

    Ok(settings)
}
