use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "report_events_part3")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub report_id: i32,
    pub event_summary: String,
    pub trigger_info: String,
    /// Anchored timestamp text (`1970-01-01 HH:MM:SS`), NULL when not given.
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub rca_number: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::daily_reports::Entity",
        from = "Column::ReportId",
        to = "super::daily_reports::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    DailyReport,
}

impl Related<super::daily_reports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DailyReport.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
