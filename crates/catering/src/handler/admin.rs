use crate::{
    abstract_trait::{order::DynOrderQueryService, schedule::DynScheduleQueryService},
    domain::{
        requests::{order::FindAllOrders, schedule::FindAllSchedules},
        response::{order::OrderResponse, schedule::ScheduleResponse},
    },
    middleware::{admin::admin_middleware, jwt::auth_middleware, validate::JsonQuery},
    state::AppState,
};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use shared::{domain::ApiResponsePagination, errors::HttpError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(FindAllOrders),
    responses(
        (status = 200, description = "All orders", body = ApiResponsePagination<Vec<OrderResponse>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn get_all_orders(
    Extension(service): Extension<DynOrderQueryService>,
    JsonQuery(params): JsonQuery<FindAllOrders>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/admin/schedules",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(FindAllSchedules),
    responses(
        (status = 200, description = "All schedules", body = ApiResponsePagination<Vec<ScheduleResponse>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn get_all_schedules(
    Extension(service): Extension<DynScheduleQueryService>,
    JsonQuery(params): JsonQuery<FindAllSchedules>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn admin_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/admin/orders", get(get_all_orders))
        .route("/api/admin/schedules", get(get_all_schedules))
        .route_layer(middleware::from_fn(admin_middleware))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.order_query.clone()))
        .layer(Extension(app_state.di_container.schedule_query.clone()))
        .layer(Extension(app_state.di_container.identity_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
