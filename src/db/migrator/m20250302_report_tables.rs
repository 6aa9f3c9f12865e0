use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Foreign keys carry no cascade; report children are removed explicitly
/// inside the write transaction.
fn reference(
    name: &str,
    from: (DynIden, DynIden),
    to: (DynIden, DynIden),
) -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .name(name)
        .from(from.0, from.1)
        .to(to.0, to.1)
        .on_delete(ForeignKeyAction::NoAction)
        .on_update(ForeignKeyAction::NoAction)
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    #[allow(clippy::too_many_lines)]
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DailyReports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DailyReports::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DailyReports::ReportDate).string().not_null())
                    .col(ColumnDef::new(DailyReports::ShiftHoursId).integer().null())
                    .col(
                        ColumnDef::new(DailyReports::HealthPowerSources)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(DailyReports::HealthHumidityTemp)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(DailyReports::HealthFireSystem)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(DailyReports::CreatedBy).integer().not_null())
                    .col(ColumnDef::new(DailyReports::CreatedAt).string().not_null())
                    .foreign_key(&mut reference(
                        "fk_daily_reports_created_by",
                        (DailyReports::Table.into_iden(), DailyReports::CreatedBy.into_iden()),
                        (Users::Table.into_iden(), Users::Id.into_iden()),
                    ))
                    .foreign_key(&mut reference(
                        "fk_daily_reports_shift_hours_id",
                        (DailyReports::Table.into_iden(), DailyReports::ShiftHoursId.into_iden()),
                        (ShiftHours::Table.into_iden(), ShiftHours::Id.into_iden()),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_daily_reports_report_date")
                    .table(DailyReports::Table)
                    .col(DailyReports::ReportDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ReportShiftManagers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReportShiftManagers::ReportId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ReportShiftManagers::UserId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(ReportShiftManagers::ReportId)
                            .col(ReportShiftManagers::UserId),
                    )
                    .foreign_key(&mut reference(
                        "fk_report_shift_managers_report_id",
                        (
                            ReportShiftManagers::Table.into_iden(),
                            ReportShiftManagers::ReportId.into_iden(),
                        ),
                        (DailyReports::Table.into_iden(), DailyReports::Id.into_iden()),
                    ))
                    .foreign_key(&mut reference(
                        "fk_report_shift_managers_user_id",
                        (
                            ReportShiftManagers::Table.into_iden(),
                            ReportShiftManagers::UserId.into_iden(),
                        ),
                        (Users::Table.into_iden(), Users::Id.into_iden()),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ReportEventTitles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ReportEventTitles::ReportId).integer().not_null())
                    .col(
                        ColumnDef::new(ReportEventTitles::EventTitleId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ReportEventTitles::ReportId)
                            .col(ReportEventTitles::EventTitleId),
                    )
                    .foreign_key(&mut reference(
                        "fk_report_event_titles_report_id",
                        (
                            ReportEventTitles::Table.into_iden(),
                            ReportEventTitles::ReportId.into_iden(),
                        ),
                        (DailyReports::Table.into_iden(), DailyReports::Id.into_iden()),
                    ))
                    .foreign_key(&mut reference(
                        "fk_report_event_titles_event_title_id",
                        (
                            ReportEventTitles::Table.into_iden(),
                            ReportEventTitles::EventTitleId.into_iden(),
                        ),
                        (EventTitles::Table.into_iden(), EventTitles::Id.into_iden()),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ReportEventsPart3::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReportEventsPart3::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ReportEventsPart3::ReportId).integer().not_null())
                    .col(
                        ColumnDef::new(ReportEventsPart3::EventSummary)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReportEventsPart3::TriggerInfo)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ReportEventsPart3::StartTime).string().null())
                    .col(ColumnDef::new(ReportEventsPart3::EndTime).string().null())
                    .col(
                        ColumnDef::new(ReportEventsPart3::RcaNumber)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(&mut reference(
                        "fk_report_events_part3_report_id",
                        (
                            ReportEventsPart3::Table.into_iden(),
                            ReportEventsPart3::ReportId.into_iden(),
                        ),
                        (DailyReports::Table.into_iden(), DailyReports::Id.into_iden()),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ReportEventsPart4::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReportEventsPart4::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ReportEventsPart4::ReportId).integer().not_null())
                    .col(
                        ColumnDef::new(ReportEventsPart4::EventSummary)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReportEventsPart4::TriggerInfo)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ReportEventsPart4::StartTime).string().null())
                    .col(ColumnDef::new(ReportEventsPart4::EndTime).string().null())
                    .foreign_key(&mut reference(
                        "fk_report_events_part4_report_id",
                        (
                            ReportEventsPart4::Table.into_iden(),
                            ReportEventsPart4::ReportId.into_iden(),
                        ),
                        (DailyReports::Table.into_iden(), DailyReports::Id.into_iden()),
                    ))
                    .to_owned(),
            )
            .await?;

        for (name, table, column) in [
            (
                "idx_report_events_part3_report_id",
                ReportEventsPart3::Table.into_iden(),
                ReportEventsPart3::ReportId.into_iden(),
            ),
            (
                "idx_report_events_part4_report_id",
                ReportEventsPart4::Table.into_iden(),
                ReportEventsPart4::ReportId.into_iden(),
            ),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReportEventsPart4::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ReportEventsPart3::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ReportEventTitles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ReportShiftManagers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DailyReports::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum ShiftHours {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum EventTitles {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum DailyReports {
    Table,
    Id,
    ReportDate,
    ShiftHoursId,
    HealthPowerSources,
    HealthHumidityTemp,
    HealthFireSystem,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ReportShiftManagers {
    Table,
    ReportId,
    UserId,
}

#[derive(DeriveIden)]
enum ReportEventTitles {
    Table,
    ReportId,
    EventTitleId,
}

#[derive(DeriveIden)]
enum ReportEventsPart3 {
    Table,
    Id,
    ReportId,
    EventSummary,
    TriggerInfo,
    StartTime,
    EndTime,
    RcaNumber,
}

#[derive(DeriveIden)]
enum ReportEventsPart4 {
    Table,
    Id,
    ReportId,
    EventSummary,
    TriggerInfo,
    StartTime,
    EndTime,
}
