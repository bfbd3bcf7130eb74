//! Country Routes
//!
//! - GET /api/v1/countries - Sorted country list for the selector

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::CountriesResponse;
use crate::api::state::AppState;

/// GET /api/v1/countries
pub async fn list_countries(State(state): State<Arc<AppState>>) -> Json<CountriesResponse> {
    let countries = state.data.countries().to_vec();

    Json(CountriesResponse {
        count: countries.len(),
        countries,
        default_country: state.data.config().default_country.clone(),
    })
}
