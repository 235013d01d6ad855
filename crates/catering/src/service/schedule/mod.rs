mod command;
mod query;

pub use self::command::{ScheduleCommandService, ScheduleCommandServiceDeps};
pub use self::query::ScheduleQueryService;
