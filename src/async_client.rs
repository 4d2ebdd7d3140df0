//! Async wrapper around [`Matchdex`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//! DuckDB queries are CPU-bound but fast, making this approach efficient.
//!
//! # Example
//!
//! ```no_run
//! use matchdex::AsyncMatchdex;
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncMatchdex::builder().build().await.unwrap();
//!
//!     // Run any sync SDK method via closure
//!     let matchups = sdk.run(|s| s.matchups().for_deck(42)).await.unwrap();
//!
//!     // Convenience method for the review queue
//!     let queue = sdk.review_queue().await.unwrap();
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::{MatchdexError, Result};
use crate::queries::matchups::DeckMatchups;
use crate::queries::queue::QueueResource;
use crate::Matchdex;

// ---------------------------------------------------------------------------
// AsyncMatchdexBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncMatchdex`] instance.
pub struct AsyncMatchdexBuilder {
    snapshot_dir: Option<PathBuf>,
    export_base: Option<String>,
    offline: bool,
    timeout: Duration,
}

impl Default for AsyncMatchdexBuilder {
    fn default() -> Self {
        Self {
            snapshot_dir: None,
            export_base: None,
            offline: false,
            timeout: Duration::from_secs(120),
        }
    }
}

impl AsyncMatchdexBuilder {
    /// Set a custom snapshot cache directory.
    pub fn snapshot_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.snapshot_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the base URL the catalog export is fetched from.
    pub fn export_base(mut self, base: &str) -> Self {
        self.export_base = Some(base.to_string());
        self
    }

    /// Enable or disable offline mode.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout for export downloads.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the async SDK, initializing the snapshot cache and DuckDB
    /// connection.
    ///
    /// Initialization runs on the blocking thread pool so it won't block
    /// the async event loop.
    pub async fn build(self) -> Result<AsyncMatchdex> {
        tokio::task::spawn_blocking(move || {
            let mut builder = Matchdex::builder();
            if let Some(dir) = self.snapshot_dir {
                builder = builder.snapshot_dir(dir);
            }
            if let Some(base) = self.export_base {
                builder = builder.export_base(&base);
            }
            builder = builder.offline(self.offline).timeout(self.timeout);
            let sdk = builder.build()?;
            Ok(AsyncMatchdex {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| MatchdexError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncMatchdex
// ---------------------------------------------------------------------------

/// Async wrapper around [`Matchdex`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying [`Matchdex`] is
/// protected by a [`Mutex`] since it uses `RefCell` internally.
pub struct AsyncMatchdex {
    inner: Arc<Mutex<Matchdex>>,
}

impl AsyncMatchdex {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncMatchdexBuilder {
        AsyncMatchdexBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives a `&Matchdex` reference and should return a
    /// `Result<T>`. The operation runs on a dedicated blocking thread,
    /// keeping the async event loop free.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use matchdex::AsyncMatchdex;
    /// # async fn example() -> matchdex::Result<()> {
    /// # let sdk = AsyncMatchdex::builder().build().await?;
    /// let family = sdk.run(|s| s.variants().family_of(7)).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Matchdex) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| MatchdexError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| MatchdexError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Aggregate matchups for a deck's variant family asynchronously.
    ///
    /// Convenience wrapper around [`run()`](Self::run) for
    /// [`MatchupQuery::for_deck()`](crate::queries::matchups::MatchupQuery::for_deck).
    pub async fn matchups_for_deck(&self, deck_id: i64) -> Result<DeckMatchups> {
        self.run(move |s| s.matchups().for_deck(deck_id)).await
    }

    /// Fetch the matchup review queue asynchronously.
    pub async fn review_queue(&self) -> Result<Vec<QueueResource>> {
        self.run(|s| s.queue().pending()).await
    }

    /// Execute a raw SQL query asynchronously.
    pub async fn sql(
        &self,
        query: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let query = query.to_string();
        let params = params.to_vec();
        self.run(move |s| s.sql(&query, &params)).await
    }

    /// Load and return the catalog export metadata asynchronously.
    pub async fn meta(&self) -> Result<serde_json::Value> {
        self.run(|s| s.meta()).await
    }

    /// Check for a newer catalog export and reset tables if stale.
    pub async fn refresh(&self) -> Result<bool> {
        self.run(|s| s.refresh()).await
    }

    /// Return the list of currently registered export table names.
    pub async fn tables(&self) -> Result<Vec<String>> {
        self.run(|s| Ok(s.tables())).await
    }

    /// Close the SDK, releasing all resources.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || {
            let sdk = self
                .inner
                .lock()
                .map_err(|_| MatchdexError::InvalidArgument("SDK lock poisoned".into()))?;
            // Dropping the MutexGuard drops the SDK
            drop(sdk);
            Ok(())
        })
        .await
        .map_err(|e| MatchdexError::InvalidArgument(format!("Task join error: {e}")))?
    }
}
