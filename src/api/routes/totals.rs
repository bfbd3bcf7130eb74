//! Totals Routes
//!
//! - GET /api/v1/totals - Worldwide totals (computed once at load)
//! - GET /api/v1/totals/:country - Totals for one country

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::analysis::latest_date;
use crate::api::dto::TotalsResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/v1/totals
pub async fn worldwide(State(state): State<Arc<AppState>>) -> Json<TotalsResponse> {
    let totals = state.data.worldwide_totals();

    Json(TotalsResponse {
        scope: "worldwide".to_string(),
        as_of: latest_date(&state.data.dataset().confirmed),
        totals,
        display: totals.into(),
    })
}

/// GET /api/v1/totals/:country
pub async fn country(
    State(state): State<Arc<AppState>>,
    Path(country): Path<String>,
) -> ApiResult<Json<TotalsResponse>> {
    let totals = state.data.country_totals(&country)?;

    Ok(Json(TotalsResponse {
        scope: country,
        as_of: latest_date(&state.data.dataset().confirmed),
        totals,
        display: totals.into(),
    }))
}
