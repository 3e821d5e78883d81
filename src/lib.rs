//! # Newsdesk
//!
//! A small web front-end that forwards searches to the newsapi.org
//! `/v2/everything` endpoint, caps and paginates the results and renders
//! them as HTML.
//!
//! - [`news`]: upstream client and the article/result models
//! - [`pagination`]: page bookkeeping for one search
//! - [`render`]: HTML templates
//! - [`routes`]: axum handlers
//! - [`config`]: process configuration

pub mod config;
pub mod error;
pub mod middleware;
pub mod news;
pub mod pagination;
pub mod render;
pub mod routes;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::news::NewsClient;
use crate::render::Renderer;
use crate::routes::{health, index, search};

pub use error::{AppError, AppResult};

/// Shared, read-only request-handling state.
pub struct AppState {
    pub config: AppConfig,
    pub news: NewsClient,
    pub renderer: Renderer,
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Build the upstream client and load the templates named by `config`.
    pub fn new(config: AppConfig, metrics_handle: Option<PrometheusHandle>) -> anyhow::Result<Self> {
        let news = NewsClient::new(
            &config.upstream_url,
            config.api_key.clone(),
            config.language.clone(),
            config.page_size,
        )?;
        let renderer = Renderer::from_dir(&config.templates_dir)?;

        Ok(Self {
            config,
            news,
            renderer,
            metrics_handle,
        })
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let assets = ServeDir::new(&state.config.assets_dir);

    Router::new()
        .route("/", get(index::index))
        .route("/search", get(search::search))
        .route("/health", get(health::health_check))
        .route("/metrics", get(health::metrics))
        .nest_service("/assets", assets)
        .layer(axum::middleware::from_fn(middleware::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub const TEST_TEMPLATE: &str = "\
{%- if search -%}
results for {{ search.search_key }}: page {{ search.current_page }} of {{ search.total_pages }}
{%- for a in search.articles %}
<h3>{{ a.title }}</h3><time>{{ a.published_display }}</time>
{%- endfor %}
{%- if not search.is_last_page %}
next={{ search.next_page }}
{%- endif %}
{%- else -%}
landing
{%- endif -%}";

    /// State pointed at `upstream_url`, rendering [`TEST_TEMPLATE`].
    pub fn state(upstream_url: &str) -> Arc<AppState> {
        let source = ::config::Config::builder()
            .set_override("upstream_url", upstream_url)
            .unwrap()
            .set_override("assets_dir", concat!(env!("CARGO_MANIFEST_DIR"), "/assets"))
            .unwrap()
            .build()
            .unwrap();
        let config = AppConfig::from_source(source, "test-key").unwrap();

        Arc::new(AppState {
            news: NewsClient::new(&config.upstream_url, "test-key", "en", config.page_size)
                .unwrap(),
            renderer: Renderer::from_source(TEST_TEMPLATE).unwrap(),
            config,
            metrics_handle: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn serves_assets() {
        let app = build_router(test_support::state("http://127.0.0.1:1"));

        let response = app
            .oneshot(Request::get("/assets/style.css").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = build_router(test_support::state("http://127.0.0.1:1"));

        let response = app
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
