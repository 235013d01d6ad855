use axum::{
    Extension, Json,
    body::Body,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use shared::{
    abstract_trait::DynJwtService,
    config::ACCESS_TOKEN,
    errors::{ErrorResponse, ServiceError},
};
use tracing::debug;

/// Resolves the caller from the `token` cookie or an `Authorization: Bearer` header
/// and stores the user id as an `i32` request extension.
pub async fn auth_middleware(
    cookie_jar: CookieJar,
    Extension(jwt): Extension<DynJwtService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let token = cookie_jar
        .get("token")
        .map(|cookie| cookie.value().to_string())
        .or_else(|| {
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| auth_value.strip_prefix("Bearer ").map(str::to_owned))
        });

    let Some(token) = token else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::fail(
                "You are not logged in, please provide token",
            )),
        ));
    };

    let user_id = match jwt.verify_token(&token, ACCESS_TOKEN) {
        Ok(id) => id,
        Err(ServiceError::TokenExpired) => {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::fail("Token has expired")),
            ));
        }
        Err(e) => {
            debug!("Rejected bearer token: {e}");
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::fail("Invalid token")),
            ));
        }
    };

    req.extensions_mut().insert(user_id);

    Ok(next.run(req).await)
}
