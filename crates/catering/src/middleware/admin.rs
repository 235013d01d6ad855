use crate::abstract_trait::auth::DynIdentityService;
use axum::{
    Extension,
    body::Body,
    http::Request,
    middleware::Next,
    response::IntoResponse,
};
use shared::errors::{HttpError, ServiceError};

/// Must run after `auth_middleware`. The role is read from the store on every
/// request, so a promotion applies to tokens issued before it.
pub async fn admin_middleware(
    Extension(identity): Extension<DynIdentityService>,
    Extension(user_id): Extension<i32>,
    req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    match identity.ensure_admin(user_id).await {
        Ok(()) => Ok(next.run(req).await),
        Err(ServiceError::NotFound(_)) => Err(HttpError::Unauthorized(
            "The user belonging to this token no longer exists".into(),
        )),
        Err(e) => Err(e.into()),
    }
}
