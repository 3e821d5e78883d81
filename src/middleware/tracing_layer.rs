use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// JSON when `NEWSDESK_ENV=production`.
    pub fn from_env() -> Self {
        Self::for_env(std::env::var("NEWSDESK_ENV").ok().as_deref())
    }

    fn for_env(env: Option<&str>) -> Self {
        match env {
            Some("production") => Self::Json,
            _ => Self::Pretty,
        }
    }
}

fn fallback_directives(crate_name: &str, level: &str) -> String {
    format!("{level},{crate_name}={level},tower_http={level}")
}

pub fn init_tracing(crate_name: &str, level: &str, format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback_directives(crate_name, level)));

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init(),
    }

    tracing::info!(?format, level, "tracing initialized");
}
