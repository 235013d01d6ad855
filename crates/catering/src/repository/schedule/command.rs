use crate::{
    abstract_trait::schedule::ScheduleCommandRepositoryTrait,
    domain::requests::schedule::{CreateScheduleRecordRequest, UpdateScheduleRecordRequest},
    model::schedule::Schedule as ScheduleModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

pub struct ScheduleCommandRepository {
    db: ConnectionPool,
}

impl ScheduleCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ScheduleCommandRepositoryTrait for ScheduleCommandRepository {
    async fn create_schedule(
        &self,
        req: &CreateScheduleRecordRequest,
    ) -> Result<ScheduleModel, RepositoryError> {
        let schedule = sqlx::query_as::<_, ScheduleModel>(
            r#"
            INSERT INTO schedules
                (user_id, title, event_date, event_time, description, attendees, location,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, current_timestamp, current_timestamp)
            RETURNING *
            "#,
        )
        .bind(req.user_id)
        .bind(&req.title)
        .bind(req.event_date)
        .bind(req.event_time)
        .bind(&req.description)
        .bind(req.attendees)
        .bind(&req.location)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!(
                "❌ Failed to create schedule for user {}: {:?}",
                req.user_id, e
            );
            RepositoryError::from(e)
        })?;

        info!(
            "✅ Created schedule ID {} for user {}",
            schedule.schedule_id, schedule.user_id
        );
        Ok(schedule)
    }

    async fn update_schedule(
        &self,
        req: &UpdateScheduleRecordRequest,
    ) -> Result<Option<ScheduleModel>, RepositoryError> {
        let schedule = sqlx::query_as::<_, ScheduleModel>(
            r#"
            UPDATE schedules
            SET title       = $3,
                event_date  = $4,
                event_time  = $5,
                description = $6,
                attendees   = $7,
                location    = $8,
                updated_at  = current_timestamp
            WHERE schedule_id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(req.schedule_id)
        .bind(req.user_id)
        .bind(&req.title)
        .bind(req.event_date)
        .bind(req.event_time)
        .bind(&req.description)
        .bind(req.attendees)
        .bind(&req.location)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to update schedule {}: {:?}", req.schedule_id, e);
            RepositoryError::from(e)
        })?;

        if schedule.is_some() {
            info!("🔄 Updated schedule ID {}", req.schedule_id);
        }

        Ok(schedule)
    }

    async fn delete_schedule(&self, id: i32, user_id: i32) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM schedules WHERE schedule_id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete schedule {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("🗑️ Deleted schedule ID {}", id);
        }

        Ok(deleted)
    }
}
