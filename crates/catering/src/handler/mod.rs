mod admin;
mod auth;
mod health;
mod order;
mod schedule;

use crate::state::AppState;
use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::get,
};
use prometheus_client::encoding::text::encode;
use shared::{errors::ErrorResponse, utils::shutdown_signal};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;
use utoipa::{
    Modify, OpenApi,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::admin::admin_routes;
pub use self::auth::auth_routes;
pub use self::health::health_routes;
pub use self::order::order_routes;
pub use self::schedule::schedule_routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_checker_handler,

        auth::register_user_handler,
        auth::login_user_handler,
        auth::get_profile_handler,
        auth::update_profile_handler,

        schedule::get_schedules,
        schedule::get_schedule,
        schedule::create_schedule,
        schedule::update_schedule,
        schedule::delete_schedule,

        order::get_orders,
        order::get_order,
        order::create_order,
        order::cancel_order,

        admin::get_all_orders,
        admin::get_all_schedules,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness endpoint"),
        (name = "Auth", description = "Registration, login and profile endpoints"),
        (name = "Schedule", description = "Catering event schedule endpoints"),
        (name = "Order", description = "Catering order endpoints"),
        (name = "Admin", description = "Admin-only listings"),
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    let mut buffer = String::new();

    if let Err(e) = encode(&mut buffer, &state.registry) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode metrics: {e}"),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    )
        .into_response()
}

pub async fn not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::fail("Route not found")),
    )
}

pub struct AppRouter;

impl AppRouter {
    pub fn build(app_state: Arc<AppState>) -> Router {
        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/metrics", get(metrics_handler))
            .with_state(app_state.clone())
            .merge(health_routes())
            .merge(auth_routes(app_state.clone()))
            .merge(schedule_routes(app_state.clone()))
            .merge(order_routes(app_state.clone()))
            .merge(admin_routes(app_state));

        let (app_router, api) = api_router.split_for_parts();

        app_router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
            .fallback(not_found_handler)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(1024 * 1024))
            .layer(TraceLayer::new_for_http())
    }

    pub async fn serve(port: u16, app_state: Arc<AppState>) -> Result<()> {
        let app = Self::build(app_state);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI: http://localhost:{port}/swagger-ui");
        info!("📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server error")?;

        Ok(())
    }
}
