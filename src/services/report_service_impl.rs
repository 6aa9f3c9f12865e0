//! `SeaORM` implementation of the `ReportService` trait.

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::db::{Store, WriteOutcome};
use crate::domain::AuthContext;
use crate::models::report::{DailyReport, ReportDraft};
use crate::parser::{clock, date};
use crate::services::report_service::{ReportError, ReportService};

pub struct SeaOrmReportService {
    store: Store,
}

impl SeaOrmReportService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    fn validate_draft(draft: &ReportDraft) -> Result<(), ReportError> {
        if !date::is_report_date(&draft.report_date) {
            return Err(ReportError::Validation(format!(
                "Invalid report_date '{}': expected YYYY-MM-DD",
                draft.report_date
            )));
        }

        if let Some(bad) = draft.time_values().find(|v| !clock::is_accepted(v)) {
            return Err(ReportError::Validation(format!(
                "Invalid event time '{bad}': expected HH:MM or a full timestamp"
            )));
        }

        Ok(())
    }

    fn settle(
        id: i32,
        op: &'static str,
        outcome: WriteOutcome,
        actor: &AuthContext,
    ) -> Result<(), ReportError> {
        match outcome {
            WriteOutcome::Applied => {
                info!(report_id = id, actor = %actor, op, "Report written");
                metrics::counter!("reports_written_total", "op" => op).increment(1);
                Ok(())
            }
            WriteOutcome::NotFound => Err(ReportError::NotFound(id)),
            WriteOutcome::Forbidden { owner_id } => {
                warn!(report_id = id, owner_id, actor = %actor, op, "Report write denied");
                Err(ReportError::PermissionDenied(id))
            }
        }
    }
}

#[async_trait]
impl ReportService for SeaOrmReportService {
    async fn list(&self, date: Option<&str>) -> Result<Vec<DailyReport>, ReportError> {
        if let Some(date) = date
            && !date::is_report_date(date)
        {
            return Err(ReportError::Validation(format!(
                "Invalid date filter '{date}': expected YYYY-MM-DD"
            )));
        }

        Ok(self.store.list_reports(date).await?)
    }

    async fn get(&self, id: i32) -> Result<DailyReport, ReportError> {
        self.store
            .get_report(id)
            .await?
            .ok_or(ReportError::NotFound(id))
    }

    async fn create(&self, draft: ReportDraft, actor: &AuthContext) -> Result<i32, ReportError> {
        Self::validate_draft(&draft)?;

        let id = self.store.create_report(&draft, actor).await.map_err(|e| {
            error!(actor = %actor, "Report create rolled back: {e:#}");
            ReportError::from(e)
        })?;

        Self::settle(id, "create", WriteOutcome::Applied, actor)?;
        Ok(id)
    }

    async fn update(
        &self,
        id: i32,
        draft: ReportDraft,
        actor: &AuthContext,
    ) -> Result<(), ReportError> {
        Self::validate_draft(&draft)?;

        let outcome = self.store.update_report(id, &draft, actor).await.map_err(|e| {
            error!(report_id = id, actor = %actor, "Report update rolled back: {e:#}");
            ReportError::from(e)
        })?;

        Self::settle(id, "update", outcome, actor)
    }

    async fn delete(&self, id: i32, actor: &AuthContext) -> Result<(), ReportError> {
        let outcome = self.store.delete_report(id, actor).await.map_err(|e| {
            error!(report_id = id, actor = %actor, "Report delete failed: {e:#}");
            ReportError::from(e)
        })?;

        Self::settle(id, "delete", outcome, actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::EventPart4Draft;

    fn draft(date: &str) -> ReportDraft {
        ReportDraft {
            report_date: date.to_string(),
            ..ReportDraft::default()
        }
    }

    #[test]
    fn validate_accepts_minimal_draft() {
        assert!(SeaOrmReportService::validate_draft(&draft("2025-03-01")).is_ok());
    }

    #[test]
    fn validate_rejects_bad_date() {
        let err = SeaOrmReportService::validate_draft(&draft("03/01/2025")).unwrap_err();
        assert!(matches!(err, ReportError::Validation(_)));
    }

    #[test]
    fn validate_rejects_bad_time() {
        let mut draft = draft("2025-03-01");
        draft.events_part4.push(EventPart4Draft {
            start_time: "25:99".to_string(),
            ..EventPart4Draft::default()
        });
        let err = SeaOrmReportService::validate_draft(&draft).unwrap_err();
        assert!(matches!(err, ReportError::Validation(msg) if msg.contains("25:99")));
    }

    #[test]
    fn settle_maps_outcomes() {
        let actor = AuthContext::new(2, "op", "operator");
        assert!(SeaOrmReportService::settle(1, "update", WriteOutcome::Applied, &actor).is_ok());
        assert!(matches!(
            SeaOrmReportService::settle(1, "update", WriteOutcome::NotFound, &actor),
            Err(ReportError::NotFound(1))
        ));
        assert!(matches!(
            SeaOrmReportService::settle(1, "delete", WriteOutcome::Forbidden { owner_id: 3 }, &actor),
            Err(ReportError::PermissionDenied(1))
        ));
    }
}
