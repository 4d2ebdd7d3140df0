//! Deck lookups against the `decks` export table.

use crate::connection::Connection;
use crate::error::Result;
use crate::models::Deck;
use crate::sql_builder::SqlBuilder;

// ---------------------------------------------------------------------------
// DeckQuery
// ---------------------------------------------------------------------------

/// Query interface for decks.
pub struct DeckQuery<'a> {
    conn: &'a Connection,
}

impl<'a> DeckQuery<'a> {
    /// Create a new `DeckQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// List all decks, ordered by name.
    pub fn list(&self) -> Result<Vec<Deck>> {
        self.conn.ensure_tables(&["decks"])?;

        let (sql, params) = SqlBuilder::new("decks").order_by(&["name ASC"]).build();
        self.conn.execute_into(&sql, &params)
    }

    /// Retrieve a single deck by id.
    pub fn get(&self, id: i64) -> Result<Option<Deck>> {
        self.conn.ensure_tables(&["decks"])?;

        let (sql, params) = SqlBuilder::new("decks")
            .where_eq("id", &id.to_string())
            .limit(1)
            .build();

        let decks: Vec<Deck> = self.conn.execute_into(&sql, &params)?;
        Ok(decks.into_iter().next())
    }

    /// Retrieve multiple decks by id.
    pub fn by_ids(&self, ids: &[i64]) -> Result<Vec<Deck>> {
        self.conn.ensure_tables(&["decks"])?;

        let id_strings: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        let id_refs: Vec<&str> = id_strings.iter().map(|s| s.as_str()).collect();

        let (sql, params) = SqlBuilder::new("decks")
            .where_in("id", &id_refs)
            .order_by(&["name ASC"])
            .build();
        self.conn.execute_into(&sql, &params)
    }

    /// Search for decks by case-insensitive name substring.
    pub fn search(&self, name: &str) -> Result<Vec<Deck>> {
        self.conn.ensure_tables(&["decks"])?;

        let (sql, params) = SqlBuilder::new("decks")
            .where_like("name", &format!("%{}%", name))
            .order_by(&["name ASC"])
            .build();
        self.conn.execute_into(&sql, &params)
    }
}
