use axum::{Json, http::StatusCode, response::IntoResponse, routing::get};
use serde_json::json;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health_checker_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "message": "Catering API is running"
        })),
    )
}

pub fn health_routes() -> OpenApiRouter {
    OpenApiRouter::new().route("/api/health", get(health_checker_handler))
}
