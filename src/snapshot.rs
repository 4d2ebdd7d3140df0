//! Version-aware download and local cache of the catalog export.
//!
//! The ingestion side publishes the catalog as NDJSON export files plus a
//! `meta.json` version stamp. Files are downloaded lazily on first access
//! and re-downloaded when the published version changes.

use crate::config;
use crate::error::{MatchdexError, Result};
use flate2::read::GzDecoder;
use reqwest::blocking::Client;
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Downloads and caches catalog export files.
///
/// Checks `meta.json` for version changes and re-downloads when stale.
/// Individual files are downloaded lazily on first access.
pub struct SnapshotManager {
    /// Directory where cached export files are stored.
    pub cache_dir: PathBuf,
    /// Base URL the export is fetched from.
    pub export_base: String,
    /// If true, never download (use cached files only).
    pub offline: bool,
    timeout: Duration,
    client: Option<Client>,
    remote_ver: Option<String>,
}

impl SnapshotManager {
    /// Create a new snapshot manager.
    ///
    /// If `cache_dir` is `None`, uses the platform-appropriate default cache
    /// directory. Creates the cache directory if it does not exist.
    pub fn new(
        cache_dir: Option<PathBuf>,
        export_base: Option<String>,
        offline: bool,
        timeout: Duration,
    ) -> Result<Self> {
        let dir = cache_dir.unwrap_or_else(config::default_cache_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            cache_dir: dir,
            export_base: export_base.unwrap_or_else(|| config::EXPORT_BASE.to_string()),
            offline,
            timeout,
            client: None,
            remote_ver: None,
        })
    }

    /// Lazy HTTP client, created on first use.
    fn client(&mut self) -> Result<&Client> {
        if self.client.is_none() {
            self.client = Some(
                Client::builder()
                    .timeout(self.timeout)
                    .redirect(reqwest::redirect::Policy::limited(10))
                    .build()?,
            );
        }
        Ok(self.client.as_ref().unwrap())
    }

    /// Read the locally cached version string from `version.txt`.
    fn local_version(&self) -> Option<String> {
        let version_file = self.cache_dir.join("version.txt");
        if version_file.exists() {
            fs::read_to_string(&version_file)
                .ok()
                .map(|s| s.trim().to_string())
        } else {
            None
        }
    }

    /// Save a version string to `version.txt` in the cache directory.
    fn save_version(&self, version: &str) {
        let version_file = self.cache_dir.join("version.txt");
        let _ = fs::write(version_file, version);
    }

    /// Fetch the current export version from `meta.json`.
    ///
    /// Returns the version string, or `None` if offline or the export host
    /// is unreachable. Caches the result for subsequent calls.
    pub fn remote_version(&mut self) -> Result<Option<String>> {
        if self.remote_ver.is_some() {
            return Ok(self.remote_ver.clone());
        }
        if self.offline {
            return Ok(None);
        }
        let url = format!("{}/{}", self.export_base, config::META_FILE);
        let client = self.client()?.clone();
        match client.get(&url).send() {
            Ok(resp) => {
                let resp = resp.error_for_status()?;
                let data: serde_json::Value = resp.json()?;
                let version = data
                    .get("version")
                    .and_then(|v| v.as_str())
                    .or_else(|| {
                        data.get("meta")
                            .and_then(|m| m.get("version"))
                            .and_then(|v| v.as_str())
                    })
                    .map(|s| s.to_string());
                self.remote_ver = version.clone();
                Ok(version)
            }
            Err(e) => {
                eprintln!("Failed to fetch catalog export version: {}", e);
                Ok(None)
            }
        }
    }

    /// Check if the local cache is out of date compared to the export host.
    ///
    /// Returns `true` if there is no local cache or a newer version is
    /// published. Returns `false` if up to date or the host is unreachable.
    pub fn is_stale(&mut self) -> Result<bool> {
        let local = self.local_version();
        match local {
            None => Ok(true),
            Some(local_ver) => {
                let remote = self.remote_version()?;
                match remote {
                    None => Ok(false), // Can't check, assume fresh
                    Some(remote_ver) => Ok(local_ver != remote_ver),
                }
            }
        }
    }

    /// Download a single export file.
    ///
    /// Downloads to a temp file first and renames on success, so an
    /// interrupted download never leaves a corrupt partial file behind.
    fn download_file(&mut self, filename: &str, dest: &Path) -> Result<()> {
        let url = format!("{}/{}", self.export_base, filename);
        eprintln!("Downloading {}", url);

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_dest = dest.with_extension(format!(
            "{}.tmp",
            dest.extension().and_then(|e| e.to_str()).unwrap_or("")
        ));

        let client = self.client()?.clone();
        let result = (|| -> Result<()> {
            let resp = client.get(&url).send()?.error_for_status()?;
            let bytes = resp.bytes()?;
            fs::write(&tmp_dest, &bytes)?;
            fs::rename(&tmp_dest, dest)?;
            Ok(())
        })();

        if result.is_err() {
            // Clean up partial temp file on any error
            let _ = fs::remove_file(&tmp_dest);
        }

        result
    }

    /// Ensure an export file is cached locally, downloading if needed.
    ///
    /// # Arguments
    ///
    /// * `name` - Logical table name (e.g. `"decks"`, `"chapters"`).
    ///
    /// # Returns
    ///
    /// Local filesystem path to the cached NDJSON file.
    pub fn ensure_file(&mut self, name: &str) -> Result<PathBuf> {
        let export_files = config::export_files();
        let filename = export_files
            .get(name)
            .ok_or_else(|| MatchdexError::NotFound(format!("Unknown export table: {}", name)))?;

        let local_path = self.cache_dir.join(filename);

        if !local_path.exists() || self.is_stale()? {
            if self.offline {
                if local_path.exists() {
                    return Ok(local_path);
                }
                return Err(MatchdexError::NotFound(format!(
                    "Export file {} not cached and offline mode is enabled",
                    filename
                )));
            }
            self.download_file(filename, &local_path)?;
            // Update version after successful download
            if let Ok(Some(version)) = self.remote_version() {
                self.save_version(&version);
            }
        }

        Ok(local_path)
    }

    /// Load and parse the export metadata (handles `.gz` transparently).
    ///
    /// If the cached file is corrupt (truncated download, disk error), it is
    /// deleted automatically so the next call re-downloads a fresh copy.
    pub fn load_meta(&mut self) -> Result<serde_json::Value> {
        let local_path = self.cache_dir.join(config::META_FILE);

        if !local_path.exists() || self.is_stale()? {
            if self.offline {
                if !local_path.exists() {
                    return Err(MatchdexError::NotFound(format!(
                        "{} not cached and offline mode is enabled",
                        config::META_FILE
                    )));
                }
            } else {
                self.download_file(config::META_FILE, &local_path)?;
            }
        }

        match read_json(&local_path) {
            Ok(value) => Ok(value),
            Err(e) => {
                eprintln!("Corrupt cache file {}: {} -- removing", local_path.display(), e);
                let _ = fs::remove_file(&local_path);
                Err(MatchdexError::NotFound(format!(
                    "Cache file '{}' was corrupt and has been removed. \
                     Retry to re-download. Original error: {}",
                    config::META_FILE,
                    e
                )))
            }
        }
    }

    /// Remove all cached files and recreate the cache directory.
    pub fn clear(&self) -> Result<()> {
        if self.cache_dir.exists() {
            fs::remove_dir_all(&self.cache_dir)?;
            fs::create_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }

    /// Close the HTTP client, if open.
    pub fn close(&mut self) {
        self.client = None;
    }
}

/// Parse a JSON file, decompressing transparently when the path ends in `.gz`.
fn read_json(path: &Path) -> Result<serde_json::Value> {
    if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        let file = fs::File::open(path)?;
        let decoder = GzDecoder::new(BufReader::new(file));
        let mut contents = String::new();
        BufReader::new(decoder).read_to_string(&mut contents)?;
        Ok(serde_json::from_str(&contents)?)
    } else {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
