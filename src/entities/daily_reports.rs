use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "daily_reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Calendar date in `YYYY-MM-DD` form.
    pub report_date: String,

    pub shift_hours_id: Option<i32>,

    pub health_power_sources: bool,

    pub health_humidity_temp: bool,

    pub health_fire_system: bool,

    pub created_by: i32,

    /// RFC 3339, UTC, microsecond precision so that text order is time order.
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Creator,
    #[sea_orm(
        belongs_to = "super::shift_hours::Entity",
        from = "Column::ShiftHoursId",
        to = "super::shift_hours::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    ShiftHours,
    #[sea_orm(has_many = "super::report_shift_managers::Entity")]
    ShiftManagers,
    #[sea_orm(has_many = "super::report_event_titles::Entity")]
    EventTitles,
    #[sea_orm(has_many = "super::report_events_part3::Entity")]
    EventsPart3,
    #[sea_orm(has_many = "super::report_events_part4::Entity")]
    EventsPart4,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::shift_hours::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShiftHours.def()
    }
}

impl Related<super::report_shift_managers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShiftManagers.def()
    }
}

impl Related<super::report_event_titles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventTitles.def()
    }
}

impl Related<super::report_events_part3::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventsPart3.def()
    }
}

impl Related<super::report_events_part4::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventsPart4.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
