//! Dashboard Routes
//!
//! The render endpoint the page calls whenever the country or window changes.
//!
//! - GET /api/v1/dashboard?country=&window= - Chart series plus totals
//! - GET /api/v1/controls - Window slider bounds and marks

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{DashboardQuery, DashboardResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dashboard::WindowControl;

/// GET /api/v1/dashboard
///
/// Missing parameters fall back to the configured defaults.
pub async fn render(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<DashboardResponse>> {
    let config = state.data.config();
    let country = query
        .country
        .unwrap_or_else(|| config.default_country.clone());
    let window = resolve_window(&state, query.window)?;

    let view = state.data.render(&country, window)?;
    Ok(Json(view.into()))
}

/// GET /api/v1/controls
pub async fn controls(State(state): State<Arc<AppState>>) -> Json<WindowControl> {
    Json(state.data.window_control())
}

/// Apply the default window and reject windows above the slider maximum.
///
/// Windows below 1 are passed through so the transformer reports them.
pub(crate) fn resolve_window(state: &AppState, window: Option<i64>) -> ApiResult<i64> {
    let config = state.data.config();
    let window = window.unwrap_or(config.default_window);

    if window > config.max_window {
        return Err(ApiError::Validation(format!(
            "window {} exceeds maximum of {}",
            window, config.max_window
        )));
    }
    Ok(window)
}
