use crate::{
    abstract_trait::{
        auth::IdentityServiceTrait,
        user::{DynUserCommandRepository, DynUserQueryRepository},
    },
    domain::{
        requests::{
            auth::{UpdateProfileRequest, UpdateUserRecordRequest},
            validate_request,
        },
        response::user::UserResponse,
    },
    model::user::{Role, User as UserModel},
    service::auth::{normalize_email, user_conflict},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    domain::ApiResponse,
    errors::ServiceError,
    utils::{Method, OperationTracker},
};

pub struct IdentityServiceDeps {
    pub query: DynUserQueryRepository,
    pub command: DynUserCommandRepository,
}

#[derive(Clone)]
pub struct IdentityService {
    query: DynUserQueryRepository,
    command: DynUserCommandRepository,
    tracker: OperationTracker,
}

impl IdentityService {
    pub fn new(deps: IdentityServiceDeps, registry: &mut Registry) -> Self {
        Self {
            query: deps.query,
            command: deps.command,
            tracker: OperationTracker::new("identity-service", "identity_service", registry),
        }
    }

    async fn load_user(&self, user_id: i32) -> Result<UserModel, ServiceError> {
        self.query
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("User not found".into()))
    }

    async fn apply_profile_update(
        &self,
        user_id: i32,
        req: &UpdateProfileRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let req = req.normalized();
        validate_request(&req)?;

        let user = self.load_user(user_id).await?;

        let username = req.username.unwrap_or_else(|| user.username.clone());
        let email = match &req.email {
            Some(email) => normalize_email(email),
            None => user.email.clone(),
        };
        let phone = req.phone.unwrap_or_else(|| user.phone.clone());

        if username != user.username {
            if let Some(other) = self.query.find_by_username(&username).await? {
                if other.user_id != user_id {
                    return Err(ServiceError::Conflict("Username is already taken".into()));
                }
            }
        }

        if email != user.email {
            if let Some(other) = self.query.find_by_email(&email).await? {
                if other.user_id != user_id {
                    return Err(ServiceError::Conflict("Email is already registered".into()));
                }
            }
        }

        let updated = self
            .command
            .update_user(&UpdateUserRecordRequest {
                user_id,
                username,
                email,
                phone,
            })
            .await
            .map_err(user_conflict)?;

        Ok(ApiResponse::success(
            "Profile updated successfully",
            UserResponse::from(updated),
        ))
    }
}

#[async_trait]
impl IdentityServiceTrait for IdentityService {
    async fn get_me(&self, user_id: i32) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self
            .tracker
            .start_tracing("get_me", vec![KeyValue::new("user_id", user_id.to_string())]);

        match self.load_user(user_id).await {
            Ok(user) => {
                self.tracker.complete_tracing_success(
                    &tracing_ctx,
                    method,
                    "Profile retrieved successfully",
                );
                Ok(ApiResponse::success(
                    "Profile retrieved successfully",
                    UserResponse::from(user),
                ))
            }
            Err(e) => {
                self.tracker
                    .complete_tracing_error(&tracing_ctx, method, &e.to_string());
                Err(e)
            }
        }
    }

    async fn update_profile(
        &self,
        user_id: i32,
        req: &UpdateProfileRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let method = Method::Put;
        let tracing_ctx = self.tracker.start_tracing(
            "update_profile",
            vec![KeyValue::new("user_id", user_id.to_string())],
        );

        let result = self.apply_profile_update(user_id, req).await;

        match &result {
            Ok(response) => {
                self.tracker
                    .complete_tracing_success(&tracing_ctx, method, &response.message)
            }
            Err(e) => self
                .tracker
                .complete_tracing_error(&tracing_ctx, method, &e.to_string()),
        }

        result
    }

    async fn ensure_admin(&self, user_id: i32) -> Result<(), ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracker.start_tracing(
            "ensure_admin",
            vec![KeyValue::new("user_id", user_id.to_string())],
        );

        let result = match self.load_user(user_id).await {
            Ok(user) if user.role() == Role::Admin => Ok(()),
            Ok(_) => Err(ServiceError::Forbidden("Admin access required".into())),
            Err(e) => Err(e),
        };

        match &result {
            Ok(()) => self
                .tracker
                .complete_tracing_success(&tracing_ctx, method, "Admin access granted"),
            Err(e) => self
                .tracker
                .complete_tracing_error(&tracing_ctx, method, &e.to_string()),
        }

        result
    }
}
