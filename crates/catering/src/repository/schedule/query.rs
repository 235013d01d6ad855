use crate::{
    abstract_trait::schedule::ScheduleQueryRepositoryTrait,
    domain::requests::schedule::FindAllSchedules, model::schedule::Schedule as ScheduleModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

pub struct ScheduleQueryRepository {
    db: ConnectionPool,
}

impl ScheduleQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

fn offset(page: i32, page_size: i32) -> i64 {
    ((page.max(1) - 1) as i64) * page_size as i64
}

#[async_trait]
impl ScheduleQueryRepositoryTrait for ScheduleQueryRepository {
    async fn find_by_user(
        &self,
        user_id: i32,
        req: &FindAllSchedules,
    ) -> Result<(Vec<ScheduleModel>, i64), RepositoryError> {
        info!(
            "🔍 Fetching schedules for user {} | page {}, size {}",
            user_id, req.page, req.page_size
        );

        let schedules = sqlx::query_as::<_, ScheduleModel>(
            r#"
            SELECT * FROM schedules
            WHERE user_id = $1
            ORDER BY event_date ASC, event_time ASC, schedule_id ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(req.page_size as i64)
        .bind(offset(req.page, req.page_size))
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch schedules for user {}: {:?}", user_id, e);
            RepositoryError::from(e)
        })?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schedules WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.db)
            .await
            .map_err(RepositoryError::from)?;

        Ok((schedules, total))
    }

    async fn find_all(
        &self,
        req: &FindAllSchedules,
    ) -> Result<(Vec<ScheduleModel>, i64), RepositoryError> {
        info!(
            "🔍 Fetching all schedules | page {}, size {}",
            req.page, req.page_size
        );

        let schedules = sqlx::query_as::<_, ScheduleModel>(
            r#"
            SELECT * FROM schedules
            ORDER BY event_date ASC, event_time ASC, schedule_id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(req.page_size as i64)
        .bind(offset(req.page, req.page_size))
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch schedules: {:?}", e);
            RepositoryError::from(e)
        })?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schedules")
            .fetch_one(&self.db)
            .await
            .map_err(RepositoryError::from)?;

        Ok((schedules, total))
    }

    async fn find_by_id(
        &self,
        id: i32,
        user_id: i32,
    ) -> Result<Option<ScheduleModel>, RepositoryError> {
        sqlx::query_as::<_, ScheduleModel>(
            "SELECT * FROM schedules WHERE schedule_id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to find schedule {}: {:?}", id, e);
            RepositoryError::from(e)
        })
    }
}
