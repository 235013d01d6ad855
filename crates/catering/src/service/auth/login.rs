use crate::{
    abstract_trait::{auth::LoginServiceTrait, user::DynUserQueryRepository},
    domain::{
        requests::{auth::LoginRequest, validate_request},
        response::{auth::AuthResponse, user::UserResponse},
    },
};
use async_trait::async_trait;
use chrono::Duration;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynCacheStore, DynHashing, DynJwtService},
    config::ACCESS_TOKEN,
    domain::ApiResponse,
    errors::ServiceError,
    utils::{Method, OperationTracker},
};
use tracing::{info, warn};

pub const MAX_LOGIN_ATTEMPTS: i64 = 5;
const LOGIN_WINDOW_MINUTES: i64 = 15;

fn attempts_key(username: &str) -> String {
    format!("auth:login_attempts:{username}")
}

pub struct LoginServiceDeps {
    pub query: DynUserQueryRepository,
    pub hash: DynHashing,
    pub jwt: DynJwtService,
    pub cache: DynCacheStore,
}

#[derive(Clone)]
pub struct LoginService {
    query: DynUserQueryRepository,
    hash: DynHashing,
    jwt: DynJwtService,
    cache: DynCacheStore,
    tracker: OperationTracker,
}

impl LoginService {
    pub fn new(deps: LoginServiceDeps, registry: &mut Registry) -> Self {
        let LoginServiceDeps {
            query,
            hash,
            jwt,
            cache,
        } = deps;

        Self {
            query,
            hash,
            jwt,
            cache,
            tracker: OperationTracker::new("login-service", "login_service", registry),
        }
    }

    async fn login_user(&self, req: &LoginRequest) -> Result<ApiResponse<AuthResponse>, ServiceError> {
        validate_request(req)?;

        let username = req.username.trim();
        let key = attempts_key(username);

        // The attempt is reserved before the password is checked, so concurrent
        // requests cannot all read the same count. A cache outage leaves login open.
        let attempt = self
            .cache
            .incr_with_ttl(&key, Duration::minutes(LOGIN_WINDOW_MINUTES))
            .await;

        if let Some(count) = attempt
            && count > MAX_LOGIN_ATTEMPTS
        {
            warn!("🔐 Login for '{}' throttled ({} attempts)", username, count);
            return Err(ServiceError::TooManyRequests(
                "Too many failed login attempts, please try again later".into(),
            ));
        }

        let Some(user) = self.query.find_by_username(username).await? else {
            warn!("🔐 Failed login for unknown user '{}'", username);
            return Err(ServiceError::InvalidCredentials);
        };

        if let Err(e) = self.hash.compare_password(&user.password, &req.password).await {
            if matches!(e, ServiceError::InvalidCredentials) {
                warn!(
                    "🔐 Failed login for '{}' ({}/{})",
                    username,
                    attempt.unwrap_or_default(),
                    MAX_LOGIN_ATTEMPTS
                );
            }
            return Err(e);
        }

        self.cache.delete_from_cache(&key).await;

        let token = self.jwt.generate_token(user.user_id, ACCESS_TOKEN)?;

        info!("🔓 User {} logged in", user.user_id);

        Ok(ApiResponse::success(
            "Login successful",
            AuthResponse {
                token,
                user: UserResponse::from(user),
            },
        ))
    }
}

#[async_trait]
impl LoginServiceTrait for LoginService {
    async fn login(&self, req: &LoginRequest) -> Result<ApiResponse<AuthResponse>, ServiceError> {
        let method = Method::Post;
        let tracing_ctx = self.tracker.start_tracing(
            "login_user",
            vec![KeyValue::new("username", req.username.clone())],
        );

        let result = self.login_user(req).await;

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
