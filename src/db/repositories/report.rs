use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::SecondsFormat;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::warn;

use crate::domain::AuthContext;
use crate::entities::{
    daily_reports, event_titles, prelude::*, report_event_titles, report_events_part3,
    report_events_part4, report_shift_managers, shift_hours, users,
};
use crate::models::reference::{EventTitle, ShiftHours as ShiftHoursView, User};
use crate::models::report::{DailyReport, EventPart3, EventPart4, ReportDraft};
use crate::parser::clock;

/// Result of a write against an existing report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Applied,
    NotFound,
    Forbidden { owner_id: i32 },
}

impl WriteOutcome {
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

type RootRow = (daily_reports::Model, Option<users::Model>);

/// Ids bound into a single `IN (...)` when loading children, kept well under
/// SQLite's bound-parameter limit.
pub const ID_BATCH: usize = 500;

pub struct ReportRepository {
    conn: DatabaseConnection,
}

impl ReportRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: i32) -> Result<Option<DailyReport>> {
        let root = DailyReports::find_by_id(id)
            .find_also_related(Users)
            .one(&self.conn)
            .await
            .context("Failed to query report")?;

        let Some(root) = root else {
            return Ok(None);
        };

        Ok(self.assemble(vec![root]).await?.pop())
    }

    /// Newest first; `date` narrows the result to a single report date.
    pub async fn list(&self, date: Option<&str>) -> Result<Vec<DailyReport>> {
        let mut query = DailyReports::find().find_also_related(Users);
        if let Some(date) = date {
            query = query.filter(daily_reports::Column::ReportDate.eq(date));
        }

        let roots = query
            .order_by_desc(daily_reports::Column::ReportDate)
            .order_by_desc(daily_reports::Column::CreatedAt)
            .order_by_desc(daily_reports::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list reports")?;

        self.assemble(roots).await
    }

    /// Insert a report with all of its children in one transaction.
    pub async fn create(&self, draft: &ReportDraft, actor: &AuthContext) -> Result<i32> {
        let txn = self.conn.begin().await?;
        let result = Self::write_new(&txn, draft, actor).await;
        settle(txn, result, |_| true).await
    }

    /// Replace the root fields and every child collection of a report.
    ///
    /// The owner check runs inside the transaction before anything is
    /// touched, so a rejected update leaves no trace.
    pub async fn update(
        &self,
        id: i32,
        draft: &ReportDraft,
        actor: &AuthContext,
    ) -> Result<WriteOutcome> {
        let txn = self.conn.begin().await?;
        let result = Self::write_replacement(&txn, id, draft, actor).await;
        settle(txn, result, WriteOutcome::is_applied).await
    }

    pub async fn delete(&self, id: i32, actor: &AuthContext) -> Result<WriteOutcome> {
        let txn = self.conn.begin().await?;
        let result = Self::write_removal(&txn, id, actor).await;
        settle(txn, result, WriteOutcome::is_applied).await
    }

    async fn write_new(
        txn: &DatabaseTransaction,
        draft: &ReportDraft,
        actor: &AuthContext,
    ) -> Result<i32> {
        let created_at = chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        let inserted = DailyReports::insert(daily_reports::ActiveModel {
            report_date: Set(draft.report_date.clone()),
            shift_hours_id: Set(draft.shift_hours_id),
            health_power_sources: Set(draft.health_power_sources),
            health_humidity_temp: Set(draft.health_humidity_temp),
            health_fire_system: Set(draft.health_fire_system),
            created_by: Set(actor.user_id),
            created_at: Set(created_at),
            ..Default::default()
        })
        .exec(txn)
        .await
        .context("Failed to insert report")?;

        let report_id = inserted.last_insert_id;
        insert_children(txn, report_id, draft).await?;

        Ok(report_id)
    }

    async fn write_replacement(
        txn: &DatabaseTransaction,
        id: i32,
        draft: &ReportDraft,
        actor: &AuthContext,
    ) -> Result<WriteOutcome> {
        let Some(owner_id) = owner_of(txn, id).await? else {
            return Ok(WriteOutcome::NotFound);
        };
        if !actor.may_modify(owner_id) {
            return Ok(WriteOutcome::Forbidden { owner_id });
        }

        DailyReports::update(daily_reports::ActiveModel {
            id: Set(id),
            report_date: Set(draft.report_date.clone()),
            shift_hours_id: Set(draft.shift_hours_id),
            health_power_sources: Set(draft.health_power_sources),
            health_humidity_temp: Set(draft.health_humidity_temp),
            health_fire_system: Set(draft.health_fire_system),
            created_by: NotSet,
            created_at: NotSet,
        })
        .exec(txn)
        .await
        .context("Failed to update report")?;

        delete_children(txn, id).await?;
        insert_children(txn, id, draft).await?;

        Ok(WriteOutcome::Applied)
    }

    async fn write_removal(
        txn: &DatabaseTransaction,
        id: i32,
        actor: &AuthContext,
    ) -> Result<WriteOutcome> {
        let Some(owner_id) = owner_of(txn, id).await? else {
            return Ok(WriteOutcome::NotFound);
        };
        if !actor.may_modify(owner_id) {
            return Ok(WriteOutcome::Forbidden { owner_id });
        }

        delete_children(txn, id).await?;
        DailyReports::delete_by_id(id)
            .exec(txn)
            .await
            .context("Failed to delete report")?;

        Ok(WriteOutcome::Applied)
    }

    /// Attach shift hours, managers, titles and events to root rows,
    /// preserving the order of `roots`.
    async fn assemble(&self, roots: Vec<RootRow>) -> Result<Vec<DailyReport>> {
        if roots.is_empty() {
            return Ok(Vec::new());
        }

        let report_ids: Vec<i32> = roots.iter().map(|(report, _)| report.id).collect();
        let mut shift_hours_ids: Vec<i32> = roots
            .iter()
            .filter_map(|(report, _)| report.shift_hours_id)
            .collect();
        shift_hours_ids.sort_unstable();
        shift_hours_ids.dedup();

        let mut hours = HashMap::new();
        for batch in shift_hours_ids.chunks(ID_BATCH) {
            hours.extend(self.load_shift_hours(batch).await?);
        }

        // A report's children always land in the batch holding its id.
        let mut managers = HashMap::new();
        let mut titles = HashMap::new();
        let mut part3 = HashMap::new();
        let mut part4 = HashMap::new();
        for batch in report_ids.chunks(ID_BATCH) {
            let (batch_managers, batch_titles, batch_part3, batch_part4) = futures::try_join!(
                self.load_managers(batch),
                self.load_event_titles(batch),
                self.load_part3(batch),
                self.load_part4(batch),
            )?;
            managers.extend(batch_managers);
            titles.extend(batch_titles);
            part3.extend(batch_part3);
            part4.extend(batch_part4);
        }

        roots
            .into_iter()
            .map(|(report, creator)| {
                let creator = creator.ok_or_else(|| {
                    anyhow::anyhow!(
                        "Report {} references missing creator {}",
                        report.id,
                        report.created_by
                    )
                })?;

                let shift_hours = report
                    .shift_hours_id
                    .and_then(|id| hours.get(&id).cloned());

                Ok(DailyReport {
                    id: report.id,
                    report_date: report.report_date,
                    shift_hours,
                    shift_managers: managers.remove(&report.id).unwrap_or_default(),
                    event_titles: titles.remove(&report.id).unwrap_or_default(),
                    health_power_sources: report.health_power_sources,
                    health_humidity_temp: report.health_humidity_temp,
                    health_fire_system: report.health_fire_system,
                    events_part3: part3.remove(&report.id).unwrap_or_default(),
                    events_part4: part4.remove(&report.id).unwrap_or_default(),
                    created_by: User::from(creator),
                    created_at: report.created_at,
                })
            })
            .collect()
    }

    async fn load_shift_hours(&self, ids: &[i32]) -> Result<HashMap<i32, ShiftHoursView>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = ShiftHours::find()
            .filter(shift_hours::Column::Id.is_in(ids.iter().copied()))
            .all(&self.conn)
            .await
            .context("Failed to load shift hours for reports")?;

        Ok(rows
            .into_iter()
            .map(|row| (row.id, ShiftHoursView::from(row)))
            .collect())
    }

    async fn load_managers(&self, report_ids: &[i32]) -> Result<HashMap<i32, Vec<User>>> {
        let rows = ReportShiftManagers::find()
            .filter(report_shift_managers::Column::ReportId.is_in(report_ids.iter().copied()))
            .find_also_related(Users)
            .order_by_asc(users::Column::FullName)
            .all(&self.conn)
            .await
            .context("Failed to load shift managers for reports")?;

        let mut grouped: HashMap<i32, Vec<User>> = HashMap::new();
        for (link, user) in rows {
            if let Some(user) = user {
                grouped.entry(link.report_id).or_default().push(User::from(user));
            }
        }
        Ok(grouped)
    }

    async fn load_event_titles(&self, report_ids: &[i32]) -> Result<HashMap<i32, Vec<EventTitle>>> {
        let rows = ReportEventTitles::find()
            .filter(report_event_titles::Column::ReportId.is_in(report_ids.iter().copied()))
            .find_also_related(EventTitles)
            .order_by_asc(event_titles::Column::Title)
            .all(&self.conn)
            .await
            .context("Failed to load event titles for reports")?;

        let mut grouped: HashMap<i32, Vec<EventTitle>> = HashMap::new();
        for (link, title) in rows {
            if let Some(title) = title {
                grouped
                    .entry(link.report_id)
                    .or_default()
                    .push(EventTitle::from(title));
            }
        }
        Ok(grouped)
    }

    async fn load_part3(&self, report_ids: &[i32]) -> Result<HashMap<i32, Vec<EventPart3>>> {
        let rows = ReportEventsPart3::find()
            .filter(report_events_part3::Column::ReportId.is_in(report_ids.iter().copied()))
            .order_by_asc(report_events_part3::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to load part 3 events")?;

        let mut grouped: HashMap<i32, Vec<EventPart3>> = HashMap::new();
        for row in rows {
            grouped.entry(row.report_id).or_default().push(EventPart3 {
                id: row.id,
                event_summary: row.event_summary,
                trigger_info: row.trigger_info,
                start_time: clock::display_column(row.start_time.as_deref()),
                end_time: clock::display_column(row.end_time.as_deref()),
                rca_number: row.rca_number,
            });
        }
        Ok(grouped)
    }

    async fn load_part4(&self, report_ids: &[i32]) -> Result<HashMap<i32, Vec<EventPart4>>> {
        let rows = ReportEventsPart4::find()
            .filter(report_events_part4::Column::ReportId.is_in(report_ids.iter().copied()))
            .order_by_asc(report_events_part4::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to load part 4 events")?;

        let mut grouped: HashMap<i32, Vec<EventPart4>> = HashMap::new();
        for row in rows {
            grouped.entry(row.report_id).or_default().push(EventPart4 {
                id: row.id,
                event_summary: row.event_summary,
                trigger_info: row.trigger_info,
                start_time: clock::display_column(row.start_time.as_deref()),
                end_time: clock::display_column(row.end_time.as_deref()),
            });
        }
        Ok(grouped)
    }
}

async fn owner_of(txn: &DatabaseTransaction, id: i32) -> Result<Option<i32>> {
    DailyReports::find_by_id(id)
        .select_only()
        .column(daily_reports::Column::CreatedBy)
        .into_tuple::<i32>()
        .one(txn)
        .await
        .context("Failed to look up report owner")
}

async fn insert_children(txn: &DatabaseTransaction, report_id: i32, draft: &ReportDraft) -> Result<()> {
    let managers: Vec<report_shift_managers::ActiveModel> = draft
        .distinct_manager_ids()
        .into_iter()
        .map(|user_id| report_shift_managers::ActiveModel {
            report_id: Set(report_id),
            user_id: Set(user_id),
        })
        .collect();

    if !managers.is_empty() {
        ReportShiftManagers::insert_many(managers)
            .exec_without_returning(txn)
            .await
            .context("Failed to link shift managers")?;
    }

    let titles: Vec<report_event_titles::ActiveModel> = draft
        .distinct_event_title_ids()
        .into_iter()
        .map(|event_title_id| report_event_titles::ActiveModel {
            report_id: Set(report_id),
            event_title_id: Set(event_title_id),
        })
        .collect();

    if !titles.is_empty() {
        ReportEventTitles::insert_many(titles)
            .exec_without_returning(txn)
            .await
            .context("Failed to link event titles")?;
    }

    let part3: Vec<report_events_part3::ActiveModel> = draft
        .events_part3
        .iter()
        .map(|event| report_events_part3::ActiveModel {
            report_id: Set(report_id),
            event_summary: Set(event.event_summary.clone()),
            trigger_info: Set(event.trigger_info.clone()),
            start_time: Set(clock::storage_column(&event.start_time)),
            end_time: Set(clock::storage_column(&event.end_time)),
            rca_number: Set(event.rca_number.clone()),
            ..Default::default()
        })
        .collect();

    if !part3.is_empty() {
        ReportEventsPart3::insert_many(part3)
            .exec_without_returning(txn)
            .await
            .context("Failed to insert part 3 events")?;
    }

    let part4: Vec<report_events_part4::ActiveModel> = draft
        .events_part4
        .iter()
        .map(|event| report_events_part4::ActiveModel {
            report_id: Set(report_id),
            event_summary: Set(event.event_summary.clone()),
            trigger_info: Set(event.trigger_info.clone()),
            start_time: Set(clock::storage_column(&event.start_time)),
            end_time: Set(clock::storage_column(&event.end_time)),
            ..Default::default()
        })
        .collect();

    if !part4.is_empty() {
        ReportEventsPart4::insert_many(part4)
            .exec_without_returning(txn)
            .await
            .context("Failed to insert part 4 events")?;
    }

    Ok(())
}

async fn delete_children(txn: &DatabaseTransaction, report_id: i32) -> Result<()> {
    ReportShiftManagers::delete_many()
        .filter(report_shift_managers::Column::ReportId.eq(report_id))
        .exec(txn)
        .await
        .context("Failed to unlink shift managers")?;

    ReportEventTitles::delete_many()
        .filter(report_event_titles::Column::ReportId.eq(report_id))
        .exec(txn)
        .await
        .context("Failed to unlink event titles")?;

    ReportEventsPart3::delete_many()
        .filter(report_events_part3::Column::ReportId.eq(report_id))
        .exec(txn)
        .await
        .context("Failed to delete part 3 events")?;

    ReportEventsPart4::delete_many()
        .filter(report_events_part4::Column::ReportId.eq(report_id))
        .exec(txn)
        .await
        .context("Failed to delete part 4 events")?;

    Ok(())
}

/// Commit when `keep` accepts the result, roll back otherwise.
async fn settle<T>(
    txn: DatabaseTransaction,
    result: Result<T>,
    keep: impl FnOnce(&T) -> bool,
) -> Result<T> {
    match result {
        Ok(value) if keep(&value) => {
            txn.commit()
                .await
                .context("Failed to commit report transaction")?;
            Ok(value)
        }
        other => {
            if let Err(e) = txn.rollback().await {
                warn!(error = %e, "Failed to roll back report transaction");
            }
            other
        }
    }
}
