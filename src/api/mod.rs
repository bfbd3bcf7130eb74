//! Pandash REST API
//!
//! HTTP layer for the dashboard, built with Axum. Every handler is a thin
//! call into `DashboardData`; the page at `/` does the drawing.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - Dashboard page
//!
//! ## Dashboard
//! - `GET /api/v1/dashboard?country=&window=` - Chart series plus totals
//! - `GET /api/v1/controls` - Window slider bounds and marks
//!
//! ## Data
//! - `GET /api/v1/countries` - Country list
//! - `GET /api/v1/totals` - Worldwide totals
//! - `GET /api/v1/totals/:country` - Country totals
//! - `GET /api/v1/series/:kind/:country?window=` - Single smoothed series
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use pandash::api::{serve, AppState};
//! use pandash::config::Config;
//! use pandash::dashboard::DashboardData;
//! use pandash::dataset::DatasetLoader;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let dataset = DatasetLoader::new(&config.dataset)?.load().await?;
//!     let data = Arc::new(DashboardData::new(dataset, config.dashboard));
//!
//!     serve(AppState::new(data), &config.api).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/dashboard", get(routes::dashboard::render))
        .route("/controls", get(routes::dashboard::controls))
        .route("/countries", get(routes::countries::list_countries))
        .route("/totals", get(routes::totals::worldwide))
        .route("/totals/:country", get(routes::totals::country))
        .route("/series/:kind/:country", get(routes::series::get_series));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::page::index))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Pandash listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Pandash shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::test_support;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let data = Arc::new(test_support::data());
        build_router(AppState::new(data))
    }

    async fn send(uri: &str) -> Response {
        create_test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        assert_eq!(send("/health/live").await.status(), StatusCode::OK);
        assert_eq!(send("/health/ready").await.status(), StatusCode::OK);

        let response = send("/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["countries"], 3);
    }

    #[tokio::test]
    async fn test_index_page() {
        let response = send("/").await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let page = String::from_utf8_lossy(&bytes);
        assert!(page.contains("COVID-19 Dashboard"));
        // Dataset strings are set as text, never parsed as markup
        assert!(!page.contains("innerHTML"));
    }

    #[tokio::test]
    async fn test_dashboard_defaults() {
        let response = send("/api/v1/dashboard").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json(response).await;
        assert_eq!(body["country"], "India");
        assert_eq!(body["window"], 3);
        assert_eq!(body["chart"]["y_axis"], "Daily Cases (3-day MA)");
        assert_eq!(body["country_totals"]["confirmed"], 26);
        assert_eq!(body["worldwide_totals"]["confirmed"], 36);
        assert_eq!(body["display"]["worldwide"]["recovered"], "17");
    }

    #[tokio::test]
    async fn test_dashboard_with_params() {
        let body = json(send("/api/v1/dashboard?country=Canada&window=1").await).await;
        assert_eq!(body["country"], "Canada");
        assert_eq!(body["series"]["points"].as_array().unwrap().len(), 6);
        assert_eq!(body["series"]["points"][0]["date"], "2020-01-23");
        assert_eq!(body["chart"]["y_axis"], "Daily Cases");
    }

    #[tokio::test]
    async fn test_dashboard_unknown_country() {
        let response = send("/api/v1/dashboard?country=Atlantis").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = json(response).await;
        assert_eq!(body["error"]["code"], "COUNTRY_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_dashboard_bad_windows() {
        let response = send("/api/v1/dashboard?window=0").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json(response).await["error"]["code"], "INVALID_WINDOW");

        let response = send("/api/v1/dashboard?window=99").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_countries_and_controls() {
        let body = json(send("/api/v1/countries").await).await;
        assert_eq!(body["count"], 3);
        assert_eq!(body["countries"][0], "Canada");
        assert_eq!(body["default_country"], "India");

        let body = json(send("/api/v1/controls").await).await;
        assert_eq!(body["max"], 15);
        assert_eq!(body["marks"][4]["label"], "Fortnight");
        assert!(body["step"].is_null());
    }

    #[tokio::test]
    async fn test_validated_config_serves_default_dashboard() {
        let mut config = crate::config::Config::default();
        config.dashboard.prefix_drop = 0;
        config.dashboard.default_window = 15;
        config.validate().unwrap();

        let data = crate::dashboard::DashboardData::new(
            test_support::dataset(),
            config.dashboard,
        );
        let response = build_router(AppState::new(Arc::new(data)))
            .oneshot(Request::builder().uri("/api/v1/dashboard").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_totals() {
        let body = json(send("/api/v1/totals").await).await;
        assert_eq!(body["scope"], "worldwide");
        assert_eq!(body["totals"]["dead"], 3);
        assert_eq!(body["as_of"], "2020-01-28");

        let body = json(send("/api/v1/totals/Canada").await).await;
        assert_eq!(body["totals"]["confirmed"], 10);

        assert_eq!(
            send("/api/v1/totals/Atlantis").await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_series_by_kind() {
        let response = send("/api/v1/series/recovered/India?window=1").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json(response).await;
        assert_eq!(body["kind"], "recovered");
        assert_eq!(body["points"][5]["value"], 5.0);

        assert_eq!(
            send("/api/v1/series/active/India").await.status(),
            StatusCode::BAD_REQUEST
        );
    }
}
