use axum::extract::State;
use axum::response::Html;
use std::sync::Arc;

use crate::error::AppResult;
use crate::AppState;

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    Ok(Html(state.renderer.render_index()?))
}
