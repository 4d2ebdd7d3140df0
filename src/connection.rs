//! DuckDB connection wrapper with export-table registration and query
//! execution.
//!
//! Export files are loaded into in-memory DuckDB tables with explicit column
//! schemas (see [`config::table_schemas`]), so string-typed fields like
//! chapter timestamps and ISO-8601 dates stay VARCHAR instead of being
//! sniffed into DATE/TIME types.

use crate::config;
use crate::error::Result;
use crate::snapshot::SnapshotManager;
use duckdb::{types::ValueRef, Connection as DuckDbConnection};
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// Wraps a DuckDB connection and registers export files as tables.
pub struct Connection {
    conn: DuckDbConnection,
    /// The snapshot manager used to download/locate export files.
    pub snapshot: RefCell<SnapshotManager>,
    registered_tables: RefCell<HashSet<String>>,
}

impl Connection {
    /// Create a connection backed by the given snapshot.
    ///
    /// Opens an in-memory DuckDB database.
    pub fn new(snapshot: SnapshotManager) -> Result<Self> {
        let conn = DuckDbConnection::open_in_memory()?;
        Ok(Self {
            conn,
            snapshot: RefCell::new(snapshot),
            registered_tables: RefCell::new(HashSet::new()),
        })
    }

    /// Ensure one or more export tables are registered, downloading data if
    /// needed.
    pub fn ensure_tables(&self, tables: &[&str]) -> Result<()> {
        for name in tables {
            if !self.registered_tables.borrow().contains(*name) {
                let path = self.snapshot.borrow_mut().ensure_file(name)?;
                let path_str = path.to_string_lossy().replace('\\', "/");
                self.register_table_from_ndjson(name, &path_str)?;
            }
        }
        Ok(())
    }

    /// Execute SQL and return results as a `Vec` of `HashMap`s.
    ///
    /// Each row is represented as a `HashMap<String, serde_json::Value>`.
    /// Automatically converts DuckDB types to `serde_json::Value`.
    pub fn execute(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let mut stmt = self.conn.prepare(sql)?;

        let param_values: Vec<&dyn duckdb::ToSql> =
            params.iter().map(|p| p as &dyn duckdb::ToSql).collect();

        let mut rows_result = stmt.query(param_values.as_slice())?;

        // Get column metadata AFTER query execution (calling before panics in duckdb-rs)
        let column_names: Vec<String> = rows_result
            .as_ref()
            .unwrap()
            .column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();
        let column_count = rows_result.as_ref().unwrap().column_count();

        let mut out: Vec<HashMap<String, serde_json::Value>> = Vec::new();

        while let Some(row) = rows_result.next()? {
            let mut map = HashMap::new();
            for i in 0..column_count {
                let col_name = &column_names[i];
                let value = convert_value_ref(row.get_ref(i)?);
                map.insert(col_name.clone(), value);
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Execute SQL and deserialize each row into type `T`.
    ///
    /// First executes the query as `HashMap` rows, then deserializes each
    /// row using `serde_json`.
    pub fn execute_into<T: DeserializeOwned>(&self, sql: &str, params: &[String]) -> Result<Vec<T>> {
        let rows = self.execute(sql, params)?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let value = serde_json::Value::Object(
                row.into_iter()
                    .collect::<serde_json::Map<String, serde_json::Value>>(),
            );
            let item: T = serde_json::from_value(value)?;
            results.push(item);
        }
        Ok(results)
    }

    /// Execute SQL and return the first column of the first row.
    ///
    /// Returns `None` if the result set is empty.
    pub fn execute_scalar(&self, sql: &str, params: &[String]) -> Result<Option<serde_json::Value>> {
        let mut stmt = self.conn.prepare(sql)?;
        let param_values: Vec<&dyn duckdb::ToSql> =
            params.iter().map(|p| p as &dyn duckdb::ToSql).collect();

        let mut rows = stmt.query(param_values.as_slice())?;

        if let Some(row) = rows.next()? {
            let value = convert_value_ref(row.get_ref(0)?);
            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    /// Create a DuckDB table from a newline-delimited JSON file.
    ///
    /// When the table name has a schema in [`config::table_schemas`], the
    /// columns are passed explicitly to `read_json`; otherwise types are
    /// auto-detected. Also the entry point for test fixtures.
    pub fn register_table_from_ndjson(&self, table_name: &str, ndjson_path: &str) -> Result<()> {
        let path_fwd = ndjson_path.replace('\\', "/");
        let schemas = config::table_schemas();

        let read_expr = match schemas.get(table_name) {
            Some(cols) => {
                let col_specs: Vec<String> = cols
                    .iter()
                    .map(|(name, dtype)| format!("\"{}\": '{}'", name, dtype))
                    .collect();
                format!(
                    "read_json('{}', format='newline_delimited', columns={{{}}})",
                    path_fwd,
                    col_specs.join(", ")
                )
            }
            None => format!(
                "read_json_auto('{}', format='newline_delimited')",
                path_fwd
            ),
        };

        self.conn.execute_batch(&format!(
            "DROP TABLE IF EXISTS {}; CREATE TABLE {} AS SELECT * FROM {}",
            table_name, table_name, read_expr
        ))?;
        self.registered_tables
            .borrow_mut()
            .insert(table_name.to_string());
        Ok(())
    }

    /// Check whether a table has been registered.
    pub fn has_table(&self, name: &str) -> bool {
        self.registered_tables.borrow().contains(name)
    }

    /// Return a list of all registered table names.
    pub fn tables(&self) -> Vec<String> {
        self.registered_tables.borrow().iter().cloned().collect()
    }

    /// Clear all registered tables so they will be re-created on next access.
    pub fn reset_tables(&self) {
        self.registered_tables.borrow_mut().clear();
    }

    /// Access the underlying DuckDB connection for advanced usage.
    pub fn raw(&self) -> &DuckDbConnection {
        &self.conn
    }
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Boolean(b) => serde_json::Value::Bool(b),
        ValueRef::TinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::SmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Int(n) => serde_json::Value::Number(n.into()),
        ValueRef::BigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::HugeInt(n) => {
            // HugeInt may not fit in i64; try i64, fallback to string
            if let Ok(i) = i64::try_from(n) {
                serde_json::Value::Number(i.into())
            } else {
                serde_json::Value::String(n.to_string())
            }
        }
        ValueRef::Float(f) => serde_json::Number::from_f64(f as f64)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Double(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => serde_json::Value::String(String::from_utf8_lossy(bytes).to_string()),
        ValueRef::Blob(bytes) => serde_json::Value::String(format!(
            "blob:{}",
            bytes.iter().map(|b| format!("{:02x}", b)).collect::<String>()
        )),
        _ => {
            // Remaining types (Date, Time, Timestamp, Interval, List, ...)
            // never appear in the export tables given the explicit schemas.
            serde_json::Value::Null
        }
    }
}
