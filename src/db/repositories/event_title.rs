use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::entities::{event_titles, prelude::*};
use crate::models::reference::EventTitle;

pub struct EventTitleRepository {
    conn: DatabaseConnection,
}

impl EventTitleRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<EventTitle>> {
        let rows = EventTitles::find()
            .order_by_asc(event_titles::Column::Title)
            .all(&self.conn)
            .await
            .context("Failed to list event titles")?;

        Ok(rows.into_iter().map(EventTitle::from).collect())
    }

    pub async fn create(&self, title: String) -> Result<i32> {
        let result = EventTitles::insert(event_titles::ActiveModel {
            title: Set(title),
            ..Default::default()
        })
        .exec(&self.conn)
        .await
        .context("Failed to insert event title")?;

        Ok(result.last_insert_id)
    }

    pub async fn update(&self, id: i32, title: String) -> Result<bool> {
        let Some(row) = EventTitles::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query event title for update")?
        else {
            return Ok(false);
        };

        let mut active: event_titles::ActiveModel = row.into();
        active.title = Set(title);
        active
            .update(&self.conn)
            .await
            .context("Failed to update event title")?;

        Ok(true)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = EventTitles::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete event title")?;

        Ok(result.rows_affected > 0)
    }
}
