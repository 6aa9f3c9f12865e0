use anyhow::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr, Statement,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::domain::AuthContext;
use crate::models::reference::{EventTitle, ShiftHours, ShiftHoursDraft, User, UserDraft};
use crate::models::report::{DailyReport, ReportDraft};

pub mod migrator;
pub mod repositories;

pub use repositories::report::WriteOutcome;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn shift_hours_repo(&self) -> repositories::shift_hours::ShiftHoursRepository {
        repositories::shift_hours::ShiftHoursRepository::new(self.conn.clone())
    }

    fn event_title_repo(&self) -> repositories::event_title::EventTitleRepository {
        repositories::event_title::EventTitleRepository::new(self.conn.clone())
    }

    fn report_repo(&self) -> repositories::report::ReportRepository {
        repositories::report::ReportRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repo().list().await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn verify_user_password(&self, username: &str, password: &str) -> Result<Option<User>> {
        self.user_repo().verify_password(username, password).await
    }

    pub async fn create_user(&self, draft: UserDraft, security: &SecurityConfig) -> Result<i32> {
        self.user_repo().create(draft, security).await
    }

    pub async fn update_user(
        &self,
        id: i32,
        draft: UserDraft,
        security: &SecurityConfig,
    ) -> Result<bool> {
        self.user_repo().update(id, draft, security).await
    }

    pub async fn delete_user(&self, id: i32) -> Result<bool> {
        self.user_repo().delete(id).await
    }

    // ========================================================================
    // Shift hours
    // ========================================================================

    pub async fn list_shift_hours(&self) -> Result<Vec<ShiftHours>> {
        self.shift_hours_repo().list().await
    }

    pub async fn create_shift_hours(&self, draft: ShiftHoursDraft) -> Result<i32> {
        self.shift_hours_repo().create(draft).await
    }

    pub async fn update_shift_hours(&self, id: i32, draft: ShiftHoursDraft) -> Result<bool> {
        self.shift_hours_repo().update(id, draft).await
    }

    pub async fn delete_shift_hours(&self, id: i32) -> Result<bool> {
        self.shift_hours_repo().delete(id).await
    }

    // ========================================================================
    // Event titles
    // ========================================================================

    pub async fn list_event_titles(&self) -> Result<Vec<EventTitle>> {
        self.event_title_repo().list().await
    }

    pub async fn create_event_title(&self, title: String) -> Result<i32> {
        self.event_title_repo().create(title).await
    }

    pub async fn update_event_title(&self, id: i32, title: String) -> Result<bool> {
        self.event_title_repo().update(id, title).await
    }

    pub async fn delete_event_title(&self, id: i32) -> Result<bool> {
        self.event_title_repo().delete(id).await
    }

    // ========================================================================
    // Daily reports
    // ========================================================================

    pub async fn list_reports(&self, date: Option<&str>) -> Result<Vec<DailyReport>> {
        self.report_repo().list(date).await
    }

    pub async fn get_report(&self, id: i32) -> Result<Option<DailyReport>> {
        self.report_repo().get(id).await
    }

    pub async fn create_report(&self, draft: &ReportDraft, actor: &AuthContext) -> Result<i32> {
        self.report_repo().create(draft, actor).await
    }

    pub async fn update_report(
        &self,
        id: i32,
        draft: &ReportDraft,
        actor: &AuthContext,
    ) -> Result<WriteOutcome> {
        self.report_repo().update(id, draft, actor).await
    }

    pub async fn delete_report(&self, id: i32, actor: &AuthContext) -> Result<WriteOutcome> {
        self.report_repo().delete(id, actor).await
    }
}

/// Whether a store error was caused by a unique or foreign-key constraint.
#[must_use]
pub fn is_constraint_violation(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<DbErr>()
            .and_then(DbErr::sql_err)
            .is_some_and(|sql| {
                matches!(
                    sql,
                    SqlErr::UniqueConstraintViolation(_) | SqlErr::ForeignKeyConstraintViolation(_)
                )
            })
    })
}
