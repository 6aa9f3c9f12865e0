use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "report_event_titles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub report_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub event_title_id: i32,
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
    #[sea_orm(
        belongs_to = "super::event_titles::Entity",
        from = "Column::EventTitleId",
        to = "super::event_titles::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    EventTitle,
}

impl Related<super::daily_reports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DailyReport.def()
    }
}

impl Related<super::event_titles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventTitle.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
