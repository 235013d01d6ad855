use crate::{
    abstract_trait::{
        auth::{DynIdentityService, DynLoginService, DynRegisterService},
        order::{
            DynOrderCommandRepository, DynOrderCommandService, DynOrderQueryRepository,
            DynOrderQueryService,
        },
        schedule::{
            DynScheduleCommandRepository, DynScheduleCommandService, DynScheduleQueryRepository,
            DynScheduleQueryService,
        },
        user::{DynUserCommandRepository, DynUserQueryRepository},
    },
    repository::{
        order::{OrderCommandRepository, OrderQueryRepository},
        schedule::{ScheduleCommandRepository, ScheduleQueryRepository},
        user::{UserCommandRepository, UserQueryRepository},
    },
    service::{
        auth::{
            IdentityService, IdentityServiceDeps, LoginService, LoginServiceDeps, RegisterService,
            RegisterServiceDeps,
        },
        order::{OrderCommandService, OrderCommandServiceDeps, OrderQueryService},
        schedule::{ScheduleCommandService, ScheduleCommandServiceDeps, ScheduleQueryService},
    },
};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynCacheStore, DynHashing, DynJwtService},
    config::ConnectionPool,
};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct Repositories {
    pub user_query: DynUserQueryRepository,
    pub user_command: DynUserCommandRepository,
    pub schedule_query: DynScheduleQueryRepository,
    pub schedule_command: DynScheduleCommandRepository,
    pub order_query: DynOrderQueryRepository,
    pub order_command: DynOrderCommandRepository,
}

impl Repositories {
    pub fn postgres(pool: ConnectionPool) -> Self {
        Self {
            user_query: Arc::new(UserQueryRepository::new(pool.clone())),
            user_command: Arc::new(UserCommandRepository::new(pool.clone())),
            schedule_query: Arc::new(ScheduleQueryRepository::new(pool.clone())),
            schedule_command: Arc::new(ScheduleCommandRepository::new(pool.clone())),
            order_query: Arc::new(OrderQueryRepository::new(pool.clone())),
            order_command: Arc::new(OrderCommandRepository::new(pool)),
        }
    }
}

pub struct DependenciesInjectDeps {
    pub repositories: Repositories,
    pub hash: DynHashing,
    pub jwt: DynJwtService,
    pub cache: DynCacheStore,
}

#[derive(Clone)]
pub struct DependenciesInject {
    pub register_service: DynRegisterService,
    pub login_service: DynLoginService,
    pub identity_service: DynIdentityService,
    pub schedule_query: DynScheduleQueryService,
    pub schedule_command: DynScheduleCommandService,
    pub order_query: DynOrderQueryService,
    pub order_command: DynOrderCommandService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("register_service", &"RegisterService")
            .field("login_service", &"LoginService")
            .field("identity_service", &"IdentityService")
            .field("schedule_query", &"ScheduleQueryService")
            .field("schedule_command", &"ScheduleCommandService")
            .field("order_query", &"OrderQueryService")
            .field("order_command", &"OrderCommandService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Self {
        let DependenciesInjectDeps {
            repositories,
            hash,
            jwt,
            cache,
        } = deps;

        let register_service: DynRegisterService = Arc::new(RegisterService::new(
            RegisterServiceDeps {
                query: repositories.user_query.clone(),
                command: repositories.user_command.clone(),
                hash: hash.clone(),
                jwt: jwt.clone(),
            },
            registry,
        ));

        let login_service: DynLoginService = Arc::new(LoginService::new(
            LoginServiceDeps {
                query: repositories.user_query.clone(),
                hash,
                jwt,
                cache,
            },
            registry,
        ));

        let identity_service: DynIdentityService = Arc::new(IdentityService::new(
            IdentityServiceDeps {
                query: repositories.user_query.clone(),
                command: repositories.user_command.clone(),
            },
            registry,
        ));

        let schedule_query: DynScheduleQueryService = Arc::new(ScheduleQueryService::new(
            repositories.schedule_query.clone(),
            registry,
        ));

        let schedule_command: DynScheduleCommandService = Arc::new(ScheduleCommandService::new(
            ScheduleCommandServiceDeps {
                query: repositories.schedule_query.clone(),
                command: repositories.schedule_command.clone(),
            },
            registry,
        ));

        let order_query: DynOrderQueryService = Arc::new(OrderQueryService::new(
            repositories.order_query.clone(),
            registry,
        ));

        let order_command: DynOrderCommandService = Arc::new(OrderCommandService::new(
            OrderCommandServiceDeps {
                query: repositories.order_query.clone(),
                command: repositories.order_command.clone(),
            },
            registry,
        ));

        Self {
            register_service,
            login_service,
            identity_service,
            schedule_query,
            schedule_command,
            order_query,
            order_command,
        }
    }
}
