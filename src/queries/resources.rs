//! Content item ("resource") lookups against the export tables.

use crate::connection::Connection;
use crate::error::Result;
use crate::models::{Chapter, Resource};
use crate::sql_builder::SqlBuilder;
use crate::timestamp::sort_chapters_by_time;

// ---------------------------------------------------------------------------
// ResourceQuery
// ---------------------------------------------------------------------------

/// Query interface for content items.
pub struct ResourceQuery<'a> {
    conn: &'a Connection,
}

impl<'a> ResourceQuery<'a> {
    /// Create a new `ResourceQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// List all content items, newest first (by `createdAt`).
    pub fn list(&self) -> Result<Vec<Resource>> {
        self.conn.ensure_tables(&["resources"])?;

        let (sql, params) = SqlBuilder::new("resources")
            .order_by(&["createdAt DESC", "id ASC"])
            .build();
        self.conn.execute_into(&sql, &params)
    }

    /// List only approved content items, newest first.
    pub fn approved(&self) -> Result<Vec<Resource>> {
        let mut resources = self.list()?;
        resources.retain(Resource::is_approved);
        Ok(resources)
    }

    /// Retrieve a single content item by id.
    pub fn get(&self, id: i64) -> Result<Option<Resource>> {
        self.conn.ensure_tables(&["resources"])?;

        let (sql, params) = SqlBuilder::new("resources")
            .where_eq("id", &id.to_string())
            .limit(1)
            .build();

        let resources: Vec<Resource> = self.conn.execute_into(&sql, &params)?;
        Ok(resources.into_iter().next())
    }

    /// Chapters of a content item, in chronological order.
    pub fn chapters_of(&self, resource_id: i64) -> Result<Vec<Chapter>> {
        self.conn.ensure_tables(&["chapters"])?;

        let (sql, params) = SqlBuilder::new("chapters")
            .where_eq("resourceId", &resource_id.to_string())
            .order_by(&["id ASC"])
            .build();

        let chapters: Vec<Chapter> = self.conn.execute_into(&sql, &params)?;
        Ok(sort_chapters_by_time(chapters))
    }

    /// Matchup chapters of a content item that still lack an opposing deck.
    pub fn unresolved_matchups(&self, resource_id: i64) -> Result<Vec<Chapter>> {
        let mut chapters = self.chapters_of(resource_id)?;
        chapters.retain(Chapter::is_unresolved_matchup);
        Ok(chapters)
    }
}
