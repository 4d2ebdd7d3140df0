//! Matchdex SDK.
//!
//! Catalogs community-produced video and guide content about a collectible
//! card game and answers the read queries that need real logic: resolving
//! deck variant families, aggregating matchup chapters across a whole
//! family, and classifying which gameplay content still lacks matchup
//! annotation.
//!
//! The catalog snapshot (decks, resources, chapters, author profiles) is
//! published as NDJSON export files, cached locally, and queried in-process
//! via DuckDB.
//!
//! # Quick start
//!
//! ```no_run
//! use matchdex::Matchdex;
//!
//! let sdk = Matchdex::builder().build().unwrap();
//!
//! // Matchups against a deck and all of its variants
//! let matchups = sdk.matchups().for_deck(42).unwrap();
//!
//! // Approved content still awaiting matchup curation
//! let queue = sdk.queue().pending().unwrap();
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod connection;
pub mod error;
pub mod models;
pub mod queries;
pub mod snapshot;
pub mod sql_builder;
pub mod timestamp;
pub mod variants;

#[cfg(feature = "async")]
pub use async_client::AsyncMatchdex;
pub use connection::Connection;
pub use error::{MatchdexError, Result};
pub use snapshot::SnapshotManager;
pub use sql_builder::SqlBuilder;
pub use variants::VariantRules;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// MatchdexBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`Matchdex`] instance.
///
/// Use [`Matchdex::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](MatchdexBuilder::build) to create the SDK.
pub struct MatchdexBuilder {
    snapshot_dir: Option<PathBuf>,
    export_base: Option<String>,
    offline: bool,
    timeout: Duration,
}

impl Default for MatchdexBuilder {
    fn default() -> Self {
        Self {
            snapshot_dir: None,
            export_base: None,
            offline: false,
            timeout: Duration::from_secs(120),
        }
    }
}

impl MatchdexBuilder {
    /// Set a custom snapshot cache directory.
    ///
    /// If not set, the platform-appropriate default cache directory is used
    /// (e.g. `~/.cache/matchdex` on Linux, `~/Library/Caches/matchdex` on
    /// macOS, `%LOCALAPPDATA%\matchdex` on Windows).
    pub fn snapshot_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.snapshot_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the base URL the catalog export is fetched from.
    ///
    /// Defaults to [`config::EXPORT_BASE`].
    pub fn export_base(mut self, base: &str) -> Self {
        self.export_base = Some(base.trim_end_matches('/').to_string());
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, the SDK never downloads the export and only uses
    /// previously cached files. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout for export downloads.
    ///
    /// Defaults to 120 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the SDK, initializing the snapshot cache and DuckDB connection.
    ///
    /// This may trigger a version check against the export host (unless
    /// offline mode is enabled) but does **not** download any export files
    /// eagerly -- they are fetched lazily on first query.
    pub fn build(self) -> Result<Matchdex> {
        let snapshot = SnapshotManager::new(
            self.snapshot_dir,
            self.export_base,
            self.offline,
            self.timeout,
        )?;
        let conn = Connection::new(snapshot)?;
        Ok(Matchdex { conn })
    }
}

// ---------------------------------------------------------------------------
// Matchdex
// ---------------------------------------------------------------------------

/// The main entry point for the Matchdex SDK.
///
/// Wraps a [`Connection`] (which owns the [`SnapshotManager`] and DuckDB
/// database) and exposes domain-specific query interfaces as lightweight
/// borrowing wrappers.
///
/// Created via [`Matchdex::builder()`].
pub struct Matchdex {
    conn: Connection,
}

impl Matchdex {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> MatchdexBuilder {
        MatchdexBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the deck lookup interface.
    pub fn decks(&self) -> queries::decks::DeckQuery<'_> {
        queries::decks::DeckQuery::new(&self.conn)
    }

    /// Access the variant family interface.
    ///
    /// Resolves base names and family membership, and runs the offline
    /// variant auto-classification pass (as a plan, never a write).
    pub fn variants(&self) -> queries::variants::VariantQuery<'_> {
        queries::variants::VariantQuery::new(&self.conn)
    }

    /// Access the matchup aggregation interface.
    ///
    /// Matchup lookups are expanded across the target deck's whole variant
    /// family, so researching a base deck also surfaces matchups recorded
    /// against its variants.
    pub fn matchups(&self) -> queries::matchups::MatchupQuery<'_> {
        queries::matchups::MatchupQuery::new(&self.conn)
    }

    /// Access the matchup review queue interface.
    pub fn queue(&self) -> queries::queue::QueueQuery<'_> {
        queries::queue::QueueQuery::new(&self.conn)
    }

    /// Access the content item lookup interface.
    pub fn resources(&self) -> queries::resources::ResourceQuery<'_> {
        queries::resources::ResourceQuery::new(&self.conn)
    }

    // -- Metadata and utility methods --------------------------------------

    /// Load and return the catalog export metadata (version, date, etc.).
    pub fn meta(&self) -> Result<serde_json::Value> {
        self.conn.snapshot.borrow_mut().load_meta()
    }

    /// Return the list of currently registered export table names.
    ///
    /// Tables are registered lazily on first query, so this list grows as
    /// different query interfaces are used.
    pub fn tables(&self) -> Vec<String> {
        self.conn.tables()
    }

    /// Execute a raw SQL query against the DuckDB database.
    ///
    /// Provides escape-hatch access for queries not covered by the
    /// domain-specific interfaces.
    ///
    /// # Arguments
    ///
    /// * `query` - SQL string with `?` positional placeholders.
    /// * `params` - Parameter values corresponding to the placeholders.
    ///
    /// # Returns
    ///
    /// A vector of rows, each represented as a `HashMap<String, serde_json::Value>`.
    pub fn sql(
        &self,
        query: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        self.conn.execute(query, params)
    }

    /// Check for a newer catalog export and reset tables if stale.
    ///
    /// Returns `true` if the snapshot was stale and tables were reset
    /// (meaning subsequent queries will re-download export files), or
    /// `false` if already up to date.
    pub fn refresh(&self) -> Result<bool> {
        let stale = self.conn.snapshot.borrow_mut().is_stale()?;
        if stale {
            self.conn.snapshot.borrow().clear()?;
            self.conn.reset_tables();
            eprintln!("Catalog export was stale; cache cleared and tables reset");
        }
        Ok(stale)
    }

    /// Consume the SDK and release all resources.
    ///
    /// Closes the DuckDB connection and HTTP client. This is called
    /// automatically when the SDK is dropped, but can be invoked explicitly
    /// for deterministic cleanup.
    pub fn close(self) {
        drop(self);
    }

    /// Return a reference to the underlying [`Connection`] for advanced usage.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Return a mutable reference to the underlying [`Connection`].
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for Matchdex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tables = self.conn.tables();
        let snapshot = self.conn.snapshot.borrow();
        write!(
            f,
            "Matchdex(cache_dir={}, tables=[{}], offline={})",
            snapshot.cache_dir.display(),
            tables.join(", "),
            snapshot.offline
        )
    }
}
