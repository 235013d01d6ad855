use crate::model::schedule::Schedule as ScheduleModel;
use serde::{Deserialize, Serialize};
use shared::utils::format_timestamp;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ScheduleResponse {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    #[schema(example = "2025-12-24")]
    pub date: String,
    #[schema(example = "18:30")]
    pub time: String,
    pub description: Option<String>,
    pub attendees: i32,
    pub location: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<ScheduleModel> for ScheduleResponse {
    fn from(value: ScheduleModel) -> Self {
        ScheduleResponse {
            id: value.schedule_id,
            user_id: value.user_id,
            title: value.title,
            date: value.event_date.format("%Y-%m-%d").to_string(),
            time: value.event_time.format("%H:%M").to_string(),
            description: value.description,
            attendees: value.attendees,
            location: value.location,
            created_at: format_timestamp(value.created_at),
            updated_at: format_timestamp(value.updated_at),
        }
    }
}
