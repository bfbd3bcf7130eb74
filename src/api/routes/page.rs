//! Page Route
//!
//! - GET / - The dashboard page. All data comes from the JSON endpoints.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../../static/index.html");

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
