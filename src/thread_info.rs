//! Thread display metadata lookup.
//!
//! Fetched fresh from the engine on every invocation; nothing is cached.

use anyhow::Result;
use serde::Serialize;

use crate::engine::TraceEngine;

/// Placeholder title used when the resolved thread has no name in the trace.
pub const UNNAMED_THREAD: &str = "<thread name>";

/// Display metadata for one thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadInfo {
    pub utid: i64,
    pub name: Option<String>,
    pub process_name: Option<String>,
}

impl ThreadInfo {
    /// Title for tracks built from this thread, falling back to a placeholder
    /// when the thread has no resolved name.
    pub fn display_title(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => UNNAMED_THREAD.to_string(),
        }
    }
}

/// Look up name and process for `utid`. `Ok(None)` when the engine has no row
/// for that utid.
pub async fn lookup_thread_info(
    engine: &dyn TraceEngine,
    utid: i64,
) -> Result<Option<ThreadInfo>> {
    let sql = format!(
        "SELECT thread.name AS name, process.name AS process_name \
         FROM thread LEFT JOIN process USING(upid) \
         WHERE utid = {utid}"
    );
    let result = engine.query(&sql).await?;
    if result.rows.is_empty() {
        return Ok(None);
    }
    let name = result.first("name").and_then(cell_to_string);
    let process_name = result.first("process_name").and_then(cell_to_string);
    Ok(Some(ThreadInfo {
        utid,
        name,
        process_name,
    }))
}

fn cell_to_string(value: &serde_json::Value) -> Option<String> {
    value.as_str().map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::QueryResult;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct FakeEngine {
        queries: Mutex<Vec<String>>,
        row: Option<(serde_json::Value, serde_json::Value)>,
    }

    #[async_trait]
    impl TraceEngine for FakeEngine {
        async fn query(&self, sql: &str) -> Result<QueryResult> {
            self.queries.lock().unwrap().push(sql.to_string());
            let Some((name, process)) = &self.row else {
                return Ok(QueryResult::default());
            };
            Ok(QueryResult {
                columns: vec!["name".to_string(), "process_name".to_string()],
                rows: vec![vec![name.clone(), process.clone()]],
            })
        }
    }

    #[tokio::test]
    async fn test_lookup_decodes_names() {
        let engine = FakeEngine {
            queries: Mutex::new(Vec::new()),
            row: Some((json!("kworker/0:1"), json!("kthreadd"))),
        };
        let info = lookup_thread_info(&engine, 17).await.unwrap().unwrap();
        assert_eq!(info.utid, 17);
        assert_eq!(info.name.as_deref(), Some("kworker/0:1"));
        assert_eq!(info.process_name.as_deref(), Some("kthreadd"));
        assert_eq!(info.display_title(), "kworker/0:1");

        let queries = engine.queries.lock().unwrap();
        assert_eq!(queries.len(), 1);
        assert!(queries[0].contains("utid = 17"));
    }

    #[tokio::test]
    async fn test_lookup_missing_thread() {
        let engine = FakeEngine {
            queries: Mutex::new(Vec::new()),
            row: None,
        };
        assert!(lookup_thread_info(&engine, 99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookup_null_name_falls_back_in_title() {
        let engine = FakeEngine {
            queries: Mutex::new(Vec::new()),
            row: Some((json!(null), json!(null))),
        };
        let info = lookup_thread_info(&engine, 3).await.unwrap().unwrap();
        assert_eq!(info.name, None);
        assert_eq!(info.display_title(), UNNAMED_THREAD);
    }
}
