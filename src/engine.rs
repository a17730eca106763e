//! Contract for the external trace-query engine.
//!
//! The engine executes SQL-like queries over the loaded trace and can pull in
//! standard-library modules by dotted name. It lives outside this crate (in
//! the host process or behind RPC); everything here is the calling side of
//! that contract.

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

/// Rows returned by an engine query.
///
/// Cells are dynamically typed; the engine decides per-column types and this
/// layer only ever inspects a handful of them (thread metadata).
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl QueryResult {
    /// Value of the named column in the first row, if both exist.
    pub fn first(&self, column: &str) -> Option<&serde_json::Value> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.first()?.get(idx)
    }
}

/// The external trace-query engine.
///
/// Failures surface as errors on the returned futures; this layer never
/// retries them.
#[async_trait]
pub trait TraceEngine: Send + Sync {
    /// Execute a query and return its rows.
    async fn query(&self, sql: &str) -> Result<QueryResult>;

    /// Load a standard-library module into the engine session.
    ///
    /// Definitions introduced by the module are visible to later queries in
    /// the same session, so callers must await this before issuing a query
    /// that depends on them.
    async fn include_module(&self, module: &str) -> Result<()> {
        self.query(&format!("INCLUDE PERFETTO MODULE {module};"))
            .await?;
        Ok(())
    }
}
