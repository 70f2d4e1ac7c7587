use anyhow::{bail, Context, Result};

/// Runtime mode selected by `APP_ENV`. Only affects the default log verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppMode {
    Development,
    #[default]
    Production,
}

impl AppMode {
    fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(AppMode::Development),
            "production" | "prod" => Ok(AppMode::Production),
            other => bail!("APP_ENV must be 'development' or 'production', got '{other}'"),
        }
    }

    /// Level used when `RUST_LOG` is not set.
    pub fn default_log_level(self) -> &'static str {
        match self {
            AppMode::Development => "debug",
            AppMode::Production => "info",
        }
    }
}

/// Application configuration loaded from environment variables.
/// Only `PORT` and `APP_ENV` can fail to parse; the model credential is optional.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub mode: AppMode,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mode = match lookup("APP_ENV") {
            Some(raw) if !raw.trim().is_empty() => AppMode::parse(&raw)?,
            _ => AppMode::default(),
        };

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got '{raw}'"))?,
            None => 5000,
        };

        Ok(Config {
            openai_api_key: lookup("OPENAI_API_KEY")
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
            mode,
            port,
        })
    }

    pub fn api_key_configured(&self) -> bool {
        self.openai_api_key.is_some()
    }
}
