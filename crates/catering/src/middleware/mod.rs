pub mod admin;
pub mod jwt;
pub mod validate;
