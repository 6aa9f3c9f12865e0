use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::entities::{prelude::*, shift_hours};
use crate::models::reference::{ShiftHours as ShiftHoursView, ShiftHoursDraft};

pub struct ShiftHoursRepository {
    conn: DatabaseConnection,
}

impl ShiftHoursRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All shifts, earliest start first
    pub async fn list(&self) -> Result<Vec<ShiftHoursView>> {
        let rows = ShiftHours::find()
            .order_by_asc(shift_hours::Column::StartTime)
            .order_by_asc(shift_hours::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list shift hours")?;

        Ok(rows.into_iter().map(ShiftHoursView::from).collect())
    }

    pub async fn create(&self, draft: ShiftHoursDraft) -> Result<i32> {
        let result = ShiftHours::insert(shift_hours::ActiveModel {
            name: Set(draft.name),
            start_time: Set(draft.start_time),
            end_time: Set(draft.end_time),
            ..Default::default()
        })
        .exec(&self.conn)
        .await
        .context("Failed to insert shift hours")?;

        Ok(result.last_insert_id)
    }

    /// Returns `false` when no such shift exists.
    pub async fn update(&self, id: i32, draft: ShiftHoursDraft) -> Result<bool> {
        let Some(row) = ShiftHours::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query shift hours for update")?
        else {
            return Ok(false);
        };

        let mut active: shift_hours::ActiveModel = row.into();
        active.name = Set(draft.name);
        active.start_time = Set(draft.start_time);
        active.end_time = Set(draft.end_time);
        active
            .update(&self.conn)
            .await
            .context("Failed to update shift hours")?;

        Ok(true)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = ShiftHours::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete shift hours")?;

        Ok(result.rows_affected > 0)
    }
}
