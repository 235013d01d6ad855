mod command;
mod query;

pub use self::command::{OrderCommandService, OrderCommandServiceDeps, generate_order_number};
pub use self::query::OrderQueryService;
