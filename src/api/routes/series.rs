//! Series Routes
//!
//! - GET /api/v1/series/:kind/:country?window=N - One smoothed daily series
//!
//! `kind` is one of `confirmed`, `dead` (or `deaths`), `recovered`.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use super::dashboard::resolve_window;
use crate::api::dto::{SeriesQuery, SeriesResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dataset::CaseKind;

/// GET /api/v1/series/:kind/:country
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    Path((kind, country)): Path<(String, String)>,
    Query(query): Query<SeriesQuery>,
) -> ApiResult<Json<SeriesResponse>> {
    let kind: CaseKind = kind.parse().map_err(ApiError::Validation)?;
    let window = resolve_window(&state, query.window)?;

    let series = state.data.series(kind, &country, window)?;

    Ok(Json(SeriesResponse {
        kind,
        country: series.country,
        window: series.window,
        points: series.points,
    }))
}
