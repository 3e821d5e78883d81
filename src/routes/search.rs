use axum::extract::{RawQuery, State};
use axum::response::Html;
use std::sync::Arc;
use url::form_urlencoded;

use crate::error::AppResult;
use crate::pagination::{parse_requested_page, SearchState};
use crate::AppState;

#[derive(Debug, Default, PartialEq)]
pub struct SearchParams {
    q: String,
    page: Option<String>,
}

impl SearchParams {
    /// The first `q` and the first `page` win; repeats and unknown keys are
    /// ignored.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut params = Self::default();
        let mut seen_q = false;

        for (key, value) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
            match key.as_ref() {
                "q" if !seen_q => {
                    params.q = value.into_owned();
                    seen_q = true;
                }
                "page" if params.page.is_none() => params.page = Some(value.into_owned()),
                _ => {}
            }
        }

        params
    }
}

/// GET /search?q=<query>&page=<n>
///
/// An unparsable `page` fails the request before anything is sent upstream.
pub async fn search(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> AppResult<Html<String>> {
    let params = SearchParams::from_query(query.as_deref());
    let requested_page = parse_requested_page(params.page.as_deref())?;

    let results = state.news.search(&params.q, requested_page).await?;
    let search = SearchState::new(params.q, requested_page, results, state.config.page_limits());

    tracing::debug!(
        query = %search.search_key,
        requested_page,
        total_pages = search.total_pages(),
        next_page = search.next_page(),
        "search resolved"
    );

    Ok(Html(state.renderer.render_search(&search)?))
}
