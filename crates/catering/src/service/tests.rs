use crate::{
    abstract_trait::user::UserCommandRepositoryTrait,
    domain::requests::{
        auth::{LoginRequest, RegisterRequest, UpdateProfileRequest},
        order::{CreateOrderItemRequest, CreateOrderRequest, FindAllOrders},
        schedule::{CreateScheduleRequest, FindAllSchedules, UpdateScheduleRequest},
    },
    model::user::Role,
    service::auth::MAX_LOGIN_ATTEMPTS,
    testing::{InMemoryCache, TestApp, test_app, test_app_with_cache},
};
use shared::{config::ACCESS_TOKEN, errors::ServiceError};

fn register_request(username: &str, email: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.into(),
        email: email.into(),
        phone: "081234567890".into(),
        password: "secret123".into(),
        confirm_password: "secret123".into(),
    }
}

async fn register(app: &TestApp, username: &str) -> i32 {
    app.state
        .di_container
        .register_service
        .register(&register_request(username, &format!("{username}@example.com")))
        .await
        .unwrap()
        .data
        .user
        .id
}

fn login_request(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: username.into(),
        password: password.into(),
    }
}

fn schedule_request(title: &str, date: &str, time: &str) -> CreateScheduleRequest {
    CreateScheduleRequest {
        title: title.into(),
        date: date.into(),
        time: time.into(),
        description: Some("buffet".into()),
        attendees: 30,
        location: "Main hall".into(),
    }
}

fn order_request() -> CreateOrderRequest {
    CreateOrderRequest {
        items: vec![
            CreateOrderItemRequest {
                name: "Nasi Box Ayam".into(),
                quantity: 10,
                price: 35_000,
                category: "main".into(),
                dietary_tags: vec!["halal".into()],
            },
            CreateOrderItemRequest {
                name: "Es Teh".into(),
                quantity: 10,
                price: 5_000,
                category: "drink".into(),
                dietary_tags: vec![],
            },
        ],
        delivery_date: "2025-12-24".into(),
        delivery_time: "11:30".into(),
        delivery_address: "Jl. Merdeka 10".into(),
        special_instructions: Some("Leave at reception".into()),
    }
}

#[tokio::test]
async fn register_returns_token_for_new_user() {
    let app = test_app();
    let response = app
        .state
        .di_container
        .register_service
        .register(&register_request("alice", "Alice@Example.com"))
        .await
        .unwrap();

    let user = response.data.user;
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.role, "user");
    assert_eq!(
        app.jwt.verify_token(&response.data.token, ACCESS_TOKEN).unwrap(),
        user.id
    );

    let stored = app.store.user_by_username("alice").unwrap();
    assert_ne!(stored.password, "secret123");
    assert!(stored.password.starts_with("$2"));
}

#[tokio::test]
async fn register_rejects_duplicate_email_and_username() {
    let app = test_app();
    let service = &app.state.di_container.register_service;

    service
        .register(&register_request("alice", "alice@example.com"))
        .await
        .unwrap();

    let same_email = service
        .register(&register_request("alice2", "ALICE@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(same_email, ServiceError::Conflict(msg) if msg.contains("Email")));

    let same_username = service
        .register(&register_request("alice", "other@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(same_username, ServiceError::Conflict(msg) if msg.contains("Username")));
}

#[tokio::test]
async fn register_rejects_mismatched_confirmation() {
    let app = test_app();
    let mut req = register_request("bob", "bob@example.com");
    req.confirm_password = "different".into();

    let err = app
        .state
        .di_container
        .register_service
        .register(&req)
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
    assert!(app.store.user_by_username("bob").is_none());
}

#[tokio::test]
async fn register_rejects_whitespace_only_fields() {
    let app = test_app();
    let mut req = register_request("   ", "blank@example.com");
    req.phone = "       ".into();

    let err = app
        .state
        .di_container
        .register_service
        .register(&req)
        .await
        .unwrap_err();

    let ServiceError::Validation(messages) = err else {
        panic!("expected a validation error");
    };
    assert!(messages.iter().any(|m| m.starts_with("username:")));
    assert!(messages.iter().any(|m| m.starts_with("phone:")));
    assert!(app.store.user_by_username("").is_none());
}

#[tokio::test]
async fn register_stores_trimmed_values() {
    let app = test_app();
    let mut req = register_request("  padded  ", " Padded@Example.com ");
    req.phone = " 081234567890 ".into();

    let user = app
        .state
        .di_container
        .register_service
        .register(&req)
        .await
        .unwrap()
        .data
        .user;

    assert_eq!(user.username, "padded");
    assert_eq!(user.email, "padded@example.com");
    assert_eq!(user.phone, "081234567890");
}

#[tokio::test]
async fn login_with_valid_credentials_issues_usable_token() {
    let app = test_app();
    let user_id = register(&app, "carol").await;

    let response = app
        .state
        .di_container
        .login_service
        .login(&login_request("carol", "secret123"))
        .await
        .unwrap();

    let token_user = app.jwt.verify_token(&response.data.token, ACCESS_TOKEN).unwrap();
    assert_eq!(token_user, user_id);

    let profile = app.state.di_container.identity_service.get_me(token_user).await.unwrap();
    assert_eq!(profile.data.username, "carol");
}

#[tokio::test]
async fn login_rejects_unknown_user_and_wrong_password_alike() {
    let app = test_app();
    register(&app, "dave").await;
    let login = &app.state.di_container.login_service;

    let unknown = login.login(&login_request("nobody", "secret123")).await.unwrap_err();
    let wrong = login.login(&login_request("dave", "wrong-pass")).await.unwrap_err();

    assert!(matches!(unknown, ServiceError::InvalidCredentials));
    assert!(matches!(wrong, ServiceError::InvalidCredentials));
}

#[tokio::test]
async fn login_is_throttled_after_repeated_failures() {
    let app = test_app();
    register(&app, "erin").await;
    let login = &app.state.di_container.login_service;

    for _ in 0..MAX_LOGIN_ATTEMPTS {
        let err = login.login(&login_request("erin", "wrong-pass")).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidCredentials));
    }

    let throttled = login.login(&login_request("erin", "wrong-pass")).await.unwrap_err();
    assert!(matches!(throttled, ServiceError::TooManyRequests(_)));

    let still_throttled = login.login(&login_request("erin", "secret123")).await.unwrap_err();
    assert!(matches!(still_throttled, ServiceError::TooManyRequests(_)));
}

#[tokio::test]
async fn successful_login_resets_failure_count() {
    let app = test_app();
    register(&app, "frank").await;
    let login = &app.state.di_container.login_service;

    for _ in 0..MAX_LOGIN_ATTEMPTS - 1 {
        login.login(&login_request("frank", "nope")).await.unwrap_err();
    }
    login.login(&login_request("frank", "secret123")).await.unwrap();

    for _ in 0..MAX_LOGIN_ATTEMPTS {
        let err = login.login(&login_request("frank", "nope")).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidCredentials));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_failures_cannot_exceed_attempt_limit() {
    let app = test_app();
    register(&app, "brute").await;

    let attempts: Vec<_> = (0..20)
        .map(|_| {
            let login = app.state.di_container.login_service.clone();
            tokio::spawn(async move { login.login(&login_request("brute", "wrong-pass")).await })
        })
        .collect();

    let mut checked = 0;
    let mut throttled = 0;
    for attempt in attempts {
        match attempt.await.unwrap() {
            Err(ServiceError::InvalidCredentials) => checked += 1,
            Err(ServiceError::TooManyRequests(_)) => throttled += 1,
            other => panic!("unexpected login outcome: {other:?}"),
        }
    }

    assert_eq!(checked, MAX_LOGIN_ATTEMPTS);
    assert_eq!(throttled, 20 - MAX_LOGIN_ATTEMPTS);
}

#[tokio::test]
async fn login_is_not_throttled_when_cache_is_down() {
    let app = test_app_with_cache(InMemoryCache::unavailable());
    register(&app, "gina").await;
    let login = &app.state.di_container.login_service;

    for _ in 0..MAX_LOGIN_ATTEMPTS + 2 {
        let err = login.login(&login_request("gina", "nope")).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidCredentials));
    }

    assert!(login.login(&login_request("gina", "secret123")).await.is_ok());
}

#[tokio::test]
async fn get_me_reports_missing_user() {
    let app = test_app();
    let err = app.state.di_container.identity_service.get_me(999).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn update_profile_changes_only_given_fields() {
    let app = test_app();
    let user_id = register(&app, "hank").await;
    register(&app, "ivy").await;
    let identity = &app.state.di_container.identity_service;

    let updated = identity
        .update_profile(
            user_id,
            &UpdateProfileRequest {
                phone: Some("0899999999".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .data;
    assert_eq!(updated.phone, "0899999999");
    assert_eq!(updated.username, "hank");
    assert_eq!(updated.email, "hank@example.com");

    let taken = identity
        .update_profile(
            user_id,
            &UpdateProfileRequest {
                email: Some("ivy@example.com".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(taken, ServiceError::Conflict(_)));
}

#[tokio::test]
async fn update_profile_rejects_blank_username() {
    let app = test_app();
    let user_id = register(&app, "kyle").await;

    let err = app
        .state
        .di_container
        .identity_service
        .update_profile(
            user_id,
            &UpdateProfileRequest {
                username: Some("    ".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
    assert!(app.store.user_by_username("kyle").is_some());
}

#[tokio::test]
async fn ensure_admin_follows_stored_role() {
    let app = test_app();
    let user_id = register(&app, "jane").await;
    let identity = &app.state.di_container.identity_service;

    let err = identity.ensure_admin(user_id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));

    let promoted = app
        .store
        .update_role_by_email("jane@example.com", Role::Admin)
        .await
        .unwrap();
    assert!(promoted.is_some());

    assert!(identity.ensure_admin(user_id).await.is_ok());
}

#[tokio::test]
async fn schedules_are_listed_by_date_then_time() {
    let app = test_app();
    let user_id = register(&app, "kate").await;
    let command = &app.state.di_container.schedule_command;

    command
        .create_schedule(user_id, &schedule_request("Dinner", "2025-05-02", "19:00"))
        .await
        .unwrap();
    command
        .create_schedule(user_id, &schedule_request("Lunch", "2025-05-02", "12:00"))
        .await
        .unwrap();
    command
        .create_schedule(user_id, &schedule_request("Breakfast", "2025-05-01", "07:30"))
        .await
        .unwrap();

    let listed = app
        .state
        .di_container
        .schedule_query
        .find_mine(user_id, &FindAllSchedules::default())
        .await
        .unwrap();

    let titles: Vec<&str> = listed.data.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Breakfast", "Lunch", "Dinner"]);
    assert_eq!(listed.pagination.total_items, 3);
    assert_eq!(listed.data[0].time, "07:30");
}

#[tokio::test]
async fn schedule_listing_is_paginated() {
    let app = test_app();
    let user_id = register(&app, "liam").await;

    for day in 1..=12 {
        app.state
            .di_container
            .schedule_command
            .create_schedule(
                user_id,
                &schedule_request("Event", &format!("2025-06-{day:02}"), "10:00"),
            )
            .await
            .unwrap();
    }

    let second = app
        .state
        .di_container
        .schedule_query
        .find_mine(user_id, &FindAllSchedules { page: 3, page_size: 5 })
        .await
        .unwrap();

    assert_eq!(second.data.len(), 2);
    assert_eq!(second.pagination.total_pages, 3);
    assert_eq!(second.data[0].date, "2025-06-11");
}

#[tokio::test]
async fn schedule_rejects_malformed_date() {
    let app = test_app();
    let user_id = register(&app, "mia").await;

    let err = app
        .state
        .di_container
        .schedule_command
        .create_schedule(user_id, &schedule_request("Party", "2025-13-40", "10:00"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn schedule_rejects_blank_title_and_location() {
    let app = test_app();
    let user_id = register(&app, "mona").await;
    let command = &app.state.di_container.schedule_command;

    let mut req = schedule_request("   ", "2025-09-01", "10:00");
    req.location = "  ".into();
    let err = command.create_schedule(user_id, &req).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let created = command
        .create_schedule(user_id, &schedule_request("Brunch", "2025-09-01", "10:00"))
        .await
        .unwrap()
        .data;

    let err = command
        .update_schedule(
            created.id,
            user_id,
            &UpdateScheduleRequest {
                title: Some(" ".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn schedule_description_can_be_cleared() {
    let app = test_app();
    let owner = register(&app, "ned").await;
    let command = &app.state.di_container.schedule_command;

    let created = command
        .create_schedule(owner, &schedule_request("Tasting", "2025-09-02", "15:00"))
        .await
        .unwrap()
        .data;
    assert_eq!(created.description.as_deref(), Some("buffet"));

    let kept = command
        .update_schedule(
            created.id,
            owner,
            &UpdateScheduleRequest {
                attendees: Some(12),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .data;
    assert_eq!(kept.description.as_deref(), Some("buffet"));

    let cleared = command
        .update_schedule(
            created.id,
            owner,
            &UpdateScheduleRequest {
                description: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .data;
    assert_eq!(cleared.description, None);
    assert_eq!(cleared.attendees, 12);
}

#[tokio::test]
async fn schedules_are_private_to_their_owner() {
    let app = test_app();
    let owner = register(&app, "nina").await;
    let other = register(&app, "omar").await;
    let di = &app.state.di_container;

    let created = di
        .schedule_command
        .create_schedule(owner, &schedule_request("Gala", "2025-07-01", "18:00"))
        .await
        .unwrap()
        .data;

    let err = di.schedule_query.find_by_id(created.id, other).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let err = di
        .schedule_command
        .update_schedule(created.id, other, &UpdateScheduleRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let err = di.schedule_command.delete_schedule(created.id, other).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    assert!(di.schedule_query.find_by_id(created.id, owner).await.is_ok());
}

#[tokio::test]
async fn schedule_update_merges_and_delete_removes() {
    let app = test_app();
    let owner = register(&app, "pete").await;
    let di = &app.state.di_container;

    let created = di
        .schedule_command
        .create_schedule(owner, &schedule_request("Meeting", "2025-08-01", "09:00"))
        .await
        .unwrap()
        .data;

    let updated = di
        .schedule_command
        .update_schedule(
            created.id,
            owner,
            &UpdateScheduleRequest {
                time: Some("14:15".into()),
                attendees: Some(45),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .data;

    assert_eq!(updated.title, "Meeting");
    assert_eq!(updated.date, "2025-08-01");
    assert_eq!(updated.time, "14:15");
    assert_eq!(updated.attendees, 45);

    di.schedule_command.delete_schedule(created.id, owner).await.unwrap();
    let err = di.schedule_query.find_by_id(created.id, owner).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn order_total_and_number_are_derived() {
    let app = test_app();
    let user_id = register(&app, "quinn").await;

    let order = app
        .state
        .di_container
        .order_command
        .create_order(user_id, &order_request())
        .await
        .unwrap()
        .data;

    assert_eq!(order.total_price, 10 * 35_000 + 10 * 5_000);
    assert_eq!(order.status, "active");
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.items[0].dietary_tags, vec!["halal".to_string()]);
    assert_eq!(app.store.items_of(order.id).len(), 2);

    let parts: Vec<&str> = order.order_number.split('-').collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], "ORD");
    assert_eq!(parts[1].len(), 8);
    assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
    assert_eq!(parts[2].len(), 8);
    assert!(parts[2].chars().all(|c| c.is_ascii_alphanumeric()));
}

#[tokio::test]
async fn order_with_no_items_is_rejected() {
    let app = test_app();
    let user_id = register(&app, "rosa").await;
    let mut req = order_request();
    req.items.clear();

    let err = app
        .state
        .di_container
        .order_command
        .create_order(user_id, &req)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn order_rejects_blank_item_text_and_address() {
    let app = test_app();
    let user_id = register(&app, "olga").await;
    let command = &app.state.di_container.order_command;

    let mut blank_item = order_request();
    blank_item.items[1].name = "   ".into();
    blank_item.items[1].category = " ".into();
    let err = command.create_order(user_id, &blank_item).await.unwrap_err();
    let ServiceError::Validation(messages) = err else {
        panic!("expected a validation error");
    };
    assert!(messages.iter().any(|m| m.starts_with("items[1].name:")));
    assert!(messages.iter().any(|m| m.starts_with("items[1].category:")));

    let mut blank_address = order_request();
    blank_address.delivery_address = "    ".into();
    let err = command.create_order(user_id, &blank_address).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let listed = app
        .state
        .di_container
        .order_query
        .find_mine(user_id, &FindAllOrders::default())
        .await
        .unwrap();
    assert!(listed.data.is_empty());
}

#[tokio::test]
async fn orders_are_invisible_to_other_users() {
    let app = test_app();
    let owner = register(&app, "sam").await;
    let other = register(&app, "tina").await;
    let di = &app.state.di_container;

    let order = di.order_command.create_order(owner, &order_request()).await.unwrap().data;

    let err = di.order_query.find_by_id(order.id, other).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let err = di.order_command.cancel_order(order.id, other).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let listed = di
        .order_query
        .find_mine(other, &FindAllOrders::default())
        .await
        .unwrap();
    assert!(listed.data.is_empty());

    let still_active = di.order_query.find_by_id(order.id, owner).await.unwrap().data;
    assert_eq!(still_active.status, "active");
}

#[tokio::test]
async fn cancel_happens_exactly_once() {
    let app = test_app();
    let owner = register(&app, "uma").await;
    let di = &app.state.di_container;

    let order = di.order_command.create_order(owner, &order_request()).await.unwrap().data;

    let cancelled = di.order_command.cancel_order(order.id, owner).await.unwrap().data;
    assert_eq!(cancelled.status, "cancelled");
    assert!(cancelled.cancelled_at.is_some());
    assert_eq!(cancelled.items.len(), 2);

    let err = di.order_command.cancel_order(order.id, owner).await.unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(msg) if msg == "Order is already cancelled"));

    let current = di.order_query.find_by_id(order.id, owner).await.unwrap().data;
    assert_eq!(current.status, "cancelled");
    assert_eq!(current.cancelled_at, cancelled.cancelled_at);
}

#[tokio::test]
async fn order_listing_filters_by_status_newest_first() {
    let app = test_app();
    let owner = register(&app, "vic").await;
    let di = &app.state.di_container;

    let first = di.order_command.create_order(owner, &order_request()).await.unwrap().data;
    let second = di.order_command.create_order(owner, &order_request()).await.unwrap().data;
    di.order_command.cancel_order(first.id, owner).await.unwrap();

    let all = di.order_query.find_mine(owner, &FindAllOrders::default()).await.unwrap();
    let ids: Vec<i32> = all.data.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
    assert!(all.data.iter().all(|o| o.items.len() == 2));

    let active = di
        .order_query
        .find_mine(
            owner,
            &FindAllOrders {
                status: Some("active".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(active.data.len(), 1);
    assert_eq!(active.data[0].id, second.id);
    assert_eq!(active.pagination.total_items, 1);
}
