//! In-memory stand-ins for Postgres and Redis used by service and router tests.

use crate::{
    abstract_trait::{
        order::{OrderCommandRepositoryTrait, OrderQueryRepositoryTrait},
        schedule::{ScheduleCommandRepositoryTrait, ScheduleQueryRepositoryTrait},
        user::{UserCommandRepositoryTrait, UserQueryRepositoryTrait},
    },
    di::{DependenciesInjectDeps, Repositories},
    domain::requests::{
        auth::{CreateUserRecordRequest, UpdateUserRecordRequest},
        order::{CreateOrderRecordRequest, FindAllOrders},
        schedule::{
            CreateScheduleRecordRequest, FindAllSchedules, UpdateScheduleRecordRequest,
        },
    },
    model::{
        order::{Order, OrderItem, OrderStatus},
        schedule::Schedule,
        user::{Role, User},
    },
    state::AppState,
};
use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime, Utc};
use shared::{
    abstract_trait::{CacheStoreTrait, DynJwtService},
    config::{Hashing, JwtConfig},
    errors::RepositoryError,
};
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicI32, Ordering},
    },
    time::Instant,
};

pub const TEST_JWT_SECRET: &str = "catering-test-secret";

fn now() -> Option<NaiveDateTime> {
    Some(Utc::now().naive_utc())
}

fn page<T: Clone>(rows: &[T], page: i32, page_size: i32) -> Vec<T> {
    let skip = ((page.max(1) - 1) * page_size) as usize;
    rows.iter()
        .skip(skip)
        .take(page_size as usize)
        .cloned()
        .collect()
}

/// Mirrors the relational schema, including its unique constraints.
#[derive(Default)]
pub struct InMemoryStore {
    users: Mutex<Vec<User>>,
    schedules: Mutex<Vec<Schedule>>,
    orders: Mutex<Vec<Order>>,
    items: Mutex<Vec<OrderItem>>,
    next_id: AtomicI32,
}

impl InMemoryStore {
    pub fn repositories(store: &Arc<Self>) -> Repositories {
        Repositories {
            user_query: store.clone(),
            user_command: store.clone(),
            schedule_query: store.clone(),
            schedule_command: store.clone(),
            order_query: store.clone(),
            order_command: store.clone(),
        }
    }

    fn id(&self) -> i32 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn user_by_username(&self, username: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned()
    }

    pub fn items_of(&self, order_id: i32) -> Vec<OrderItem> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .filter(|item| item.order_id == order_id)
            .cloned()
            .collect()
    }

    fn check_user_unique(
        users: &[User],
        username: &str,
        email: &str,
        except: Option<i32>,
    ) -> Result<(), RepositoryError> {
        let others = users.iter().filter(|u| Some(u.user_id) != except);
        for user in others {
            if user.username == username {
                return Err(RepositoryError::AlreadyExists("users_username_key".into()));
            }
            if user.email == email {
                return Err(RepositoryError::AlreadyExists("users_email_key".into()));
            }
        }
        Ok(())
    }

    fn sorted_schedules(&self, user_id: Option<i32>) -> Vec<Schedule> {
        let mut rows: Vec<Schedule> = self
            .schedules
            .lock()
            .unwrap()
            .iter()
            .filter(|s| user_id.is_none_or(|id| s.user_id == id))
            .cloned()
            .collect();
        rows.sort_by_key(|s| (s.event_date, s.event_time, s.schedule_id));
        rows
    }

    fn sorted_orders(&self, user_id: Option<i32>, status: Option<&str>) -> Vec<Order> {
        let mut rows: Vec<Order> = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| user_id.is_none_or(|id| o.user_id == id))
            .filter(|o| status.is_none_or(|s| o.status == s))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.order_id.cmp(&a.order_id));
        rows
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.user_id == id)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.user_by_username(username))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for InMemoryStore {
    async fn create_user(&self, req: &CreateUserRecordRequest) -> Result<User, RepositoryError> {
        let mut users = self.users.lock().unwrap();
        Self::check_user_unique(&users, &req.username, &req.email, None)?;

        let user = User {
            user_id: self.id(),
            username: req.username.clone(),
            email: req.email.clone(),
            password: req.password.clone(),
            phone: req.phone.clone(),
            role: Role::User.as_str().into(),
            created_at: now(),
            updated_at: now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, req: &UpdateUserRecordRequest) -> Result<User, RepositoryError> {
        let mut users = self.users.lock().unwrap();
        Self::check_user_unique(&users, &req.username, &req.email, Some(req.user_id))?;

        let user = users
            .iter_mut()
            .find(|u| u.user_id == req.user_id)
            .ok_or(RepositoryError::NotFound)?;
        user.username = req.username.clone();
        user.email = req.email.clone();
        user.phone = req.phone.clone();
        user.updated_at = now();
        Ok(user.clone())
    }

    async fn update_role_by_email(
        &self,
        email: &str,
        role: Role,
    ) -> Result<Option<User>, RepositoryError> {
        let mut users = self.users.lock().unwrap();
        Ok(users.iter_mut().find(|u| u.email == email).map(|user| {
            user.role = role.as_str().into();
            user.updated_at = now();
            user.clone()
        }))
    }
}

#[async_trait]
impl ScheduleQueryRepositoryTrait for InMemoryStore {
    async fn find_by_user(
        &self,
        user_id: i32,
        req: &FindAllSchedules,
    ) -> Result<(Vec<Schedule>, i64), RepositoryError> {
        let rows = self.sorted_schedules(Some(user_id));
        Ok((page(&rows, req.page, req.page_size), rows.len() as i64))
    }

    async fn find_all(
        &self,
        req: &FindAllSchedules,
    ) -> Result<(Vec<Schedule>, i64), RepositoryError> {
        let rows = self.sorted_schedules(None);
        Ok((page(&rows, req.page, req.page_size), rows.len() as i64))
    }

    async fn find_by_id(&self, id: i32, user_id: i32) -> Result<Option<Schedule>, RepositoryError> {
        Ok(self
            .schedules
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.schedule_id == id && s.user_id == user_id)
            .cloned())
    }
}

#[async_trait]
impl ScheduleCommandRepositoryTrait for InMemoryStore {
    async fn create_schedule(
        &self,
        req: &CreateScheduleRecordRequest,
    ) -> Result<Schedule, RepositoryError> {
        let schedule = Schedule {
            schedule_id: self.id(),
            user_id: req.user_id,
            title: req.title.clone(),
            event_date: req.event_date,
            event_time: req.event_time,
            description: req.description.clone(),
            attendees: req.attendees,
            location: req.location.clone(),
            created_at: now(),
            updated_at: now(),
        };
        self.schedules.lock().unwrap().push(schedule.clone());
        Ok(schedule)
    }

    async fn update_schedule(
        &self,
        req: &UpdateScheduleRecordRequest,
    ) -> Result<Option<Schedule>, RepositoryError> {
        let mut schedules = self.schedules.lock().unwrap();
        Ok(schedules
            .iter_mut()
            .find(|s| s.schedule_id == req.schedule_id && s.user_id == req.user_id)
            .map(|schedule| {
                schedule.title = req.title.clone();
                schedule.event_date = req.event_date;
                schedule.event_time = req.event_time;
                schedule.description = req.description.clone();
                schedule.attendees = req.attendees;
                schedule.location = req.location.clone();
                schedule.updated_at = now();
                schedule.clone()
            }))
    }

    async fn delete_schedule(&self, id: i32, user_id: i32) -> Result<bool, RepositoryError> {
        let mut schedules = self.schedules.lock().unwrap();
        let before = schedules.len();
        schedules.retain(|s| !(s.schedule_id == id && s.user_id == user_id));
        Ok(schedules.len() < before)
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for InMemoryStore {
    async fn find_by_user(
        &self,
        user_id: i32,
        req: &FindAllOrders,
    ) -> Result<(Vec<Order>, i64), RepositoryError> {
        let rows = self.sorted_orders(Some(user_id), req.status.as_deref());
        Ok((page(&rows, req.page, req.page_size), rows.len() as i64))
    }

    async fn find_all(&self, req: &FindAllOrders) -> Result<(Vec<Order>, i64), RepositoryError> {
        let rows = self.sorted_orders(None, req.status.as_deref());
        Ok((page(&rows, req.page, req.page_size), rows.len() as i64))
    }

    async fn find_by_id(&self, id: i32, user_id: i32) -> Result<Option<Order>, RepositoryError> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.order_id == id && o.user_id == user_id)
            .cloned())
    }

    async fn find_items(&self, order_ids: &[i32]) -> Result<Vec<OrderItem>, RepositoryError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|item| order_ids.contains(&item.order_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for InMemoryStore {
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<(Order, Vec<OrderItem>), RepositoryError> {
        let mut orders = self.orders.lock().unwrap();
        if orders.iter().any(|o| o.order_number == req.order_number) {
            return Err(RepositoryError::AlreadyExists(
                "orders_order_number_key".into(),
            ));
        }

        let order = Order {
            order_id: self.id(),
            user_id: req.user_id,
            order_number: req.order_number.clone(),
            status: OrderStatus::Active.as_str().into(),
            delivery_date: req.delivery_date,
            delivery_time: req.delivery_time,
            delivery_address: req.delivery_address.clone(),
            special_instructions: req.special_instructions.clone(),
            total_price: req.total_price,
            cancelled_at: None,
            created_at: now(),
            updated_at: now(),
        };

        let items: Vec<OrderItem> = req
            .items
            .iter()
            .map(|item| OrderItem {
                order_item_id: self.id(),
                order_id: order.order_id,
                name: item.name.clone(),
                quantity: item.quantity,
                price: item.price,
                category: item.category.clone(),
                dietary_tags: item.dietary_tags.clone(),
                created_at: now(),
            })
            .collect();

        orders.push(order.clone());
        self.items.lock().unwrap().extend(items.iter().cloned());
        Ok((order, items))
    }

    async fn cancel_order(&self, id: i32, user_id: i32) -> Result<Option<Order>, RepositoryError> {
        let mut orders = self.orders.lock().unwrap();
        Ok(orders
            .iter_mut()
            .find(|o| {
                o.order_id == id && o.user_id == user_id && o.status == OrderStatus::Active.as_str()
            })
            .map(|order| {
                order.status = OrderStatus::Cancelled.as_str().into();
                order.cancelled_at = now();
                order.updated_at = now();
                order.clone()
            }))
    }
}

/// Redis stand-in honouring TTLs. `unavailable()` behaves like a cache that is down.
#[derive(Default)]
pub struct InMemoryCache {
    counters: Mutex<HashMap<String, (i64, Instant)>>,
    down: bool,
}

impl InMemoryCache {
    pub fn unavailable() -> Self {
        Self {
            counters: Mutex::default(),
            down: true,
        }
    }
}

#[async_trait]
impl CacheStoreTrait for InMemoryCache {
    async fn delete_from_cache(&self, key: &str) {
        self.counters.lock().unwrap().remove(key);
    }

    async fn incr_with_ttl(&self, key: &str, ttl: Duration) -> Option<i64> {
        if self.down {
            return None;
        }
        let now = Instant::now();
        let mut counters = self.counters.lock().unwrap();

        let (count, expires_at) = match counters.get(key) {
            Some((count, expires_at)) if *expires_at > now => (count + 1, *expires_at),
            _ => (1, now + ttl.to_std().unwrap_or_default()),
        };
        counters.insert(key.to_string(), (count, expires_at));
        Some(count)
    }
}

pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    pub state: Arc<AppState>,
    pub jwt: DynJwtService,
}

pub fn test_app() -> TestApp {
    test_app_with_cache(InMemoryCache::default())
}

pub fn test_app_with_cache(cache: InMemoryCache) -> TestApp {
    let store = Arc::new(InMemoryStore::default());
    let jwt: DynJwtService = Arc::new(JwtConfig::new(TEST_JWT_SECRET, 24));

    let state = AppState::from_deps(DependenciesInjectDeps {
        repositories: InMemoryStore::repositories(&store),
        hash: Arc::new(Hashing::new(4)),
        jwt: jwt.clone(),
        cache: Arc::new(cache),
    });

    TestApp {
        store,
        state: Arc::new(state),
        jwt,
    }
}
