pub mod auth;
pub mod order;
pub mod schedule;

#[cfg(test)]
mod tests;
