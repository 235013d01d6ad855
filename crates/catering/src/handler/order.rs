use crate::{
    abstract_trait::order::{DynOrderCommandService, DynOrderQueryService},
    domain::{
        requests::order::{CreateOrderRequest, FindAllOrders},
        response::order::OrderResponse,
    },
    middleware::{
        jwt::auth_middleware,
        validate::{JsonPath, JsonQuery, SimpleValidatedJson},
    },
    state::AppState,
};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, put},
};
use shared::{
    domain::{ApiResponse, ApiResponsePagination},
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(FindAllOrders),
    responses(
        (status = 200, description = "Caller's orders, newest first", body = ApiResponsePagination<Vec<OrderResponse>>),
        (status = 400, description = "Invalid status filter"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_orders(
    Extension(service): Extension<DynOrderQueryService>,
    Extension(user_id): Extension<i32>,
    JsonQuery(params): JsonQuery<FindAllOrders>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_mine(user_id, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order details", body = ApiResponse<OrderResponse>),
        (status = 404, description = "Order not found"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_order(
    Extension(service): Extension<DynOrderQueryService>,
    Extension(user_id): Extension<i32>,
    JsonPath(id): JsonPath<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id, user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Order",
    security(("bearer_auth" = [])),
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_order(
    Extension(service): Extension<DynOrderCommandService>,
    Extension(user_id): Extension<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateOrderRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_order(user_id, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/orders/{id}/cancel",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order cancelled", body = ApiResponse<OrderResponse>),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order is already cancelled"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn cancel_order(
    Extension(service): Extension<DynOrderCommandService>,
    Extension(user_id): Extension<i32>,
    JsonPath(id): JsonPath<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.cancel_order(id, user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn order_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/orders", get(get_orders).post(create_order))
        .route("/api/orders/{id}", get(get_order))
        .route("/api/orders/{id}/cancel", put(cancel_order))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.order_query.clone()))
        .layer(Extension(app_state.di_container.order_command.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
