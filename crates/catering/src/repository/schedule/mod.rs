mod command;
mod query;

pub use self::command::ScheduleCommandRepository;
pub use self::query::ScheduleQueryRepository;
