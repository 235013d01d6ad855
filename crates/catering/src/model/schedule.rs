use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Schedule {
    pub schedule_id: i32,
    pub user_id: i32,
    pub title: String,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub description: Option<String>,
    pub attendees: i32,
    pub location: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}
