pub mod auth;
pub mod order;
pub mod schedule;
pub mod user;
