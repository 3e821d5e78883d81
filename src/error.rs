use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Body sent for failures the visitor can reasonably have caused.
pub const UNEXPECTED_ERROR_BODY: &str = "Unexpected server error";

/// Everything that can go wrong while answering a search request.
///
/// Every variant is terminal for its request and surfaces as an opaque
/// `500 Internal Server Error`. Only the variants the visitor can trigger
/// carry a (generic) body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid page number {0:?}")]
    InvalidPageNumber(String),

    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(#[source] reqwest::Error),

    #[error("upstream responded with status {0}")]
    UpstreamNonSuccess(reqwest::StatusCode),

    #[error("failed to decode upstream response: {0}")]
    DecodeFailure(#[source] serde_json::Error),

    #[error("failed to render template: {0}")]
    RenderFailure(#[from] minijinja::Error),
}

impl AppError {
    /// Stable short name, used as the `code` field in logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidPageNumber(_) => "invalid_page_number",
            Self::UpstreamUnavailable(_) => "upstream_unavailable",
            Self::UpstreamNonSuccess(_) => "upstream_non_success",
            Self::DecodeFailure(_) => "decode_failure",
            Self::RenderFailure(_) => "render_failure",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn body(&self) -> &'static str {
        match self {
            Self::InvalidPageNumber(_) | Self::UpstreamUnavailable(_) => UNEXPECTED_ERROR_BODY,
            Self::UpstreamNonSuccess(_) | Self::DecodeFailure(_) | Self::RenderFailure(_) => "",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            Self::InvalidPageNumber(raw) => {
                tracing::warn!(code = self.code(), page = %raw, "rejected search request");
            }
            Self::UpstreamNonSuccess(upstream) => {
                tracing::error!(
                    code = self.code(),
                    upstream_status = upstream.as_u16(),
                    "{self}"
                );
            }
            _ => {
                tracing::error!(code = self.code(), status = status.as_u16(), "{self}");
            }
        }

        (status, self.body()).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
