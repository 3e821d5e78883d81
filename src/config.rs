use clap::Parser;
use serde::Deserialize;
use tracing::info;

use crate::news::client::{DEFAULT_LANGUAGE, DEFAULT_UPSTREAM_URL};
use crate::pagination::{PageLimits, DEFAULT_MAX_ARTICLES, DEFAULT_PAGE_SIZE};

/// Command-line flags.
#[derive(Debug, Parser)]
#[command(name = "newsdesk", version, about = "Paginated HTML front-end for newsapi.org")]
pub struct Cli {
    /// Newsapi.org access key
    #[arg(long = "apikey", env = "NEWSDESK_API_KEY", hide_env_values = true, default_value = "")]
    pub api_key: String,
}

/// Process configuration, loaded once at startup and read-only afterwards.
///
/// Everything except the API key and the port comes from `NEWSDESK_*`
/// environment variables (a `.env` file is honoured). The port is read from
/// plain `PORT`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(skip)]
    pub api_key: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_upstream_url")]
    pub upstream_url: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_max_articles")]
    pub max_articles: u32,
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

fn default_port() -> u16 { 3000 }
fn default_upstream_url() -> String { DEFAULT_UPSTREAM_URL.into() }
fn default_language() -> String { DEFAULT_LANGUAGE.into() }
fn default_page_size() -> u32 { DEFAULT_PAGE_SIZE }
fn default_max_articles() -> u32 { DEFAULT_MAX_ARTICLES }
fn default_templates_dir() -> String { "templates".into() }
fn default_assets_dir() -> String { "assets".into() }
fn default_metrics_enabled() -> bool { true }

impl AppConfig {
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let source = config::Config::builder()
            .add_source(config::Environment::with_prefix("NEWSDESK").try_parsing(true))
            .set_override_option("port", std::env::var("PORT").ok().filter(|p| !p.is_empty()))?
            .build()?;

        let config = Self::from_source(source, &cli.api_key)?;
        config.log_summary();
        Ok(config)
    }

    /// Deserialize from an already-built source and validate.
    pub fn from_source(source: config::Config, api_key: &str) -> anyhow::Result<Self> {
        let mut config: Self = source.try_deserialize()?;
        config.api_key = api_key.trim().to_string();

        if config.api_key.is_empty() {
            anyhow::bail!("apiKey must be set");
        }
        if config.page_size == 0 {
            anyhow::bail!("page_size must be greater than zero");
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    pub fn page_limits(&self) -> PageLimits {
        PageLimits {
            page_size: self.page_size,
            max_articles: self.max_articles,
        }
    }

    fn log_summary(&self) {
        info!("──── Newsdesk Configuration ────");
        info!("  bind_addr     : {}", self.bind_addr());
        info!("  upstream_url  : {}", self.upstream_url);
        info!("  api_key       : {}", redact(&self.api_key));
        info!("  language      : {}", self.language);
        info!("  page_size     : {}", self.page_size);
        info!("  max_articles  : {}", self.max_articles);
        info!("  templates_dir : {}", self.templates_dir);
        info!("  assets_dir    : {}", self.assets_dir);
        info!("  metrics       : {}", self.metrics_enabled);
        info!("────────────────────────────────");
    }
}

fn redact(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}… ({} chars)", secret.chars().count())
}
