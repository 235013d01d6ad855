use crate::{
    abstract_trait::{
        auth::RegisterServiceTrait,
        user::{DynUserCommandRepository, DynUserQueryRepository},
    },
    domain::{
        requests::{
            auth::{CreateUserRecordRequest, RegisterRequest},
            validate_request,
        },
        response::{auth::AuthResponse, user::UserResponse},
    },
    service::auth::{normalize_email, user_conflict},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynHashing, DynJwtService},
    config::ACCESS_TOKEN,
    domain::ApiResponse,
    errors::ServiceError,
    utils::{Method, OperationTracker},
};
use tracing::info;

pub struct RegisterServiceDeps {
    pub query: DynUserQueryRepository,
    pub command: DynUserCommandRepository,
    pub hash: DynHashing,
    pub jwt: DynJwtService,
}

#[derive(Clone)]
pub struct RegisterService {
    query: DynUserQueryRepository,
    command: DynUserCommandRepository,
    hash: DynHashing,
    jwt: DynJwtService,
    tracker: OperationTracker,
}

impl RegisterService {
    pub fn new(deps: RegisterServiceDeps, registry: &mut Registry) -> Self {
        let RegisterServiceDeps {
            query,
            command,
            hash,
            jwt,
        } = deps;

        Self {
            query,
            command,
            hash,
            jwt,
            tracker: OperationTracker::new("register-service", "register_service", registry),
        }
    }

    async fn register_user(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<AuthResponse>, ServiceError> {
        let req = req.normalized();
        validate_request(&req)?;

        let username = req.username.clone();
        let email = normalize_email(&req.email);

        if self.query.find_by_username(&username).await?.is_some() {
            return Err(ServiceError::Conflict("Username is already taken".into()));
        }

        if self.query.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::Conflict("Email is already registered".into()));
        }

        let hashed = self.hash.hash_password(&req.password).await?;

        let user = self
            .command
            .create_user(&CreateUserRecordRequest {
                username,
                email,
                phone: req.phone,
                password: hashed,
            })
            .await
            .map_err(user_conflict)?;

        let token = self.jwt.generate_token(user.user_id, ACCESS_TOKEN)?;

        info!("👤 Registered user {} (ID {})", user.username, user.user_id);

        Ok(ApiResponse::success(
            "User registered successfully",
            AuthResponse {
                token,
                user: UserResponse::from(user),
            },
        ))
    }
}

#[async_trait]
impl RegisterServiceTrait for RegisterService {
    async fn register(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<AuthResponse>, ServiceError> {
        let method = Method::Post;
        let tracing_ctx = self.tracker.start_tracing(
            "register_user",
            vec![KeyValue::new("username", req.username.clone())],
        );

        let result = self.register_user(req).await;

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
}
