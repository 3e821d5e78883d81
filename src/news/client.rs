use reqwest::{Client, StatusCode};
use url::Url;

use crate::error::{AppError, AppResult};
use crate::middleware::{record_upstream, UpstreamOutcome};
use crate::news::ResultSet;

pub const DEFAULT_UPSTREAM_URL: &str = "https://newsapi.org";
pub const DEFAULT_LANGUAGE: &str = "en";

const EVERYTHING_PATH: &str = "/v2/everything";
const SORT_BY: &str = "publishedAt";

/// Client for the upstream `/v2/everything` search endpoint.
///
/// One call per search; no retries and no request timeout beyond what the
/// transport does on its own.
#[derive(Debug, Clone)]
pub struct NewsClient {
    http: Client,
    endpoint: Url,
    api_key: String,
    language: String,
    page_size: u32,
}

impl NewsClient {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        language: impl Into<String>,
        page_size: u32,
    ) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            http,
            endpoint: Url::parse(base_url)?.join(EVERYTHING_PATH)?,
            api_key: api_key.into(),
            language: language.into(),
            page_size,
        })
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Upstream URL for `query` at `page`.
    ///
    /// Parameters are emitted as `q`, `page`, `pageSize`, `apiKey`, `sortBy`,
    /// `language`, form-encoded.
    pub fn everything_url(&self, query: &str, page: u32) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("page", &page.to_string())
            .append_pair("pageSize", &self.page_size.to_string())
            .append_pair("apiKey", &self.api_key)
            .append_pair("sortBy", SORT_BY)
            .append_pair("language", &self.language);
        url
    }

    /// Fetch one page of articles matching `query`.
    pub async fn search(&self, query: &str, page: u32) -> AppResult<ResultSet> {
        let url = self.everything_url(query, page);
        tracing::debug!(query, page, page_size = self.page_size, "querying upstream");

        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                record_upstream(UpstreamOutcome::Unavailable);
                return Err(AppError::UpstreamUnavailable(e.without_url()));
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            record_upstream(UpstreamOutcome::NonSuccess);
            return Err(AppError::UpstreamNonSuccess(status));
        }

        let body = response.bytes().await.map_err(|e| {
            record_upstream(UpstreamOutcome::Unavailable);
            AppError::UpstreamUnavailable(e.without_url())
        })?;

        let results: ResultSet = serde_json::from_slice(&body).map_err(|e| {
            record_upstream(UpstreamOutcome::DecodeFailure);
            AppError::DecodeFailure(e)
        })?;

        record_upstream(UpstreamOutcome::Ok);
        tracing::debug!(
            total_results = results.total_results,
            returned = results.articles.len(),
            "upstream search complete"
        );

        Ok(results)
    }
}
