//! The critical-path query variant catalog.
//!
//! Each variant is an immutable record declaring the engine module it needs,
//! a SQL template over the resolved thread and window, the output column
//! contract, and where the results are routed. Adding a variant means adding
//! a row here; orchestration code stays untouched.
//!
//! Templates substitute the utid and window bounds as numeric literals. Both
//! are engine-issued integers, never user text, so building the SQL with
//! `format!` is safe on these paths.

use crate::selection::TimeWindow;

/// Engine module defining the lite critical-path table function.
pub const MODULE_SPAN: &str = "sched.thread_executing_span";

/// Engine module defining the stacked and graph critical-path table functions.
pub const MODULE_SPAN_WITH_SLICE: &str = "sched.thread_executing_span_with_slice";

/// Semantic display roles mapped onto output column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayColumns {
    pub ts: &'static str,
    pub dur: &'static str,
    pub name: &'static str,
}

/// Where a variant's results are routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSink {
    /// Materialized as a query-defined track on the timeline.
    DebugTrack,
    /// Opened as a tabular query-result view.
    QueryTab,
}

/// How the thread under analysis is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStyle {
    /// From a selected thread-state slice (or an explicitly passed utid).
    SingleSlice,
    /// From the first thread-state track inside an area selection.
    Area,
}

/// Identifier of one analysis variant. Discriminants index [`QueryVariant::all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantId {
    LiteBySlice,
    FullBySlice,
    LiteByArea,
    FullByArea,
    GraphByArea,
}

/// One immutable analysis variant.
#[derive(Debug)]
pub struct QueryVariant {
    pub id: VariantId,
    pub required_module: &'static str,
    pub columns: &'static [&'static str],
    pub display: DisplayColumns,
    pub sink: ResultSink,
    pub style: SelectionStyle,
}

const LITE_COLUMNS: &[&str] = &[
    "id",
    "utid",
    "ts",
    "dur",
    "thread_name",
    "process_name",
    "table_name",
];

const FULL_COLUMNS: &[&str] = &["id", "utid", "ts", "dur", "name", "table_name"];

const LITE_DISPLAY: DisplayColumns = DisplayColumns {
    ts: "ts",
    dur: "dur",
    name: "thread_name",
};

const FULL_DISPLAY: DisplayColumns = DisplayColumns {
    ts: "ts",
    dur: "dur",
    name: "name",
};

// Ordered to match VariantId discriminants.
static VARIANTS: &[QueryVariant] = &[
    QueryVariant {
        id: VariantId::LiteBySlice,
        required_module: MODULE_SPAN,
        columns: LITE_COLUMNS,
        display: LITE_DISPLAY,
        sink: ResultSink::DebugTrack,
        style: SelectionStyle::SingleSlice,
    },
    QueryVariant {
        id: VariantId::FullBySlice,
        required_module: MODULE_SPAN_WITH_SLICE,
        columns: FULL_COLUMNS,
        display: FULL_DISPLAY,
        sink: ResultSink::DebugTrack,
        style: SelectionStyle::SingleSlice,
    },
    QueryVariant {
        id: VariantId::LiteByArea,
        required_module: MODULE_SPAN,
        columns: LITE_COLUMNS,
        display: LITE_DISPLAY,
        sink: ResultSink::DebugTrack,
        style: SelectionStyle::Area,
    },
    QueryVariant {
        id: VariantId::FullByArea,
        required_module: MODULE_SPAN_WITH_SLICE,
        columns: FULL_COLUMNS,
        display: FULL_DISPLAY,
        sink: ResultSink::DebugTrack,
        style: SelectionStyle::Area,
    },
    QueryVariant {
        id: VariantId::GraphByArea,
        required_module: MODULE_SPAN_WITH_SLICE,
        columns: &[],
        display: FULL_DISPLAY,
        sink: ResultSink::QueryTab,
        style: SelectionStyle::Area,
    },
];

impl QueryVariant {
    /// The catalog entry for `id`.
    pub fn get(id: VariantId) -> &'static QueryVariant {
        &VARIANTS[id as usize]
    }

    /// All variants, in declaration order.
    pub fn all() -> &'static [QueryVariant] {
        VARIANTS
    }

    /// Render the variant's SQL with the resolved thread and window bounds
    /// substituted as numeric literals. The table functions take a duration
    /// as their third argument, written as `end - start` so both bounds stay
    /// visible in the generated text.
    pub fn query(&self, utid: i64, window: TimeWindow) -> String {
        let start = window.start;
        let end = window.end;
        match self.id {
            VariantId::LiteBySlice | VariantId::LiteByArea => format!(
                "SELECT \
                 cr.id, cr.utid, cr.ts, cr.dur, \
                 thread.name AS thread_name, \
                 process.name AS process_name, \
                 'thread_state' AS table_name \
                 FROM _thread_executing_span_critical_path(\
                 {utid}, {start}, {end} - {start}) cr \
                 JOIN thread USING(utid) \
                 JOIN process USING(upid)"
            ),
            // Spans the stack could not name are intentionally dropped.
            VariantId::FullBySlice => format!(
                "SELECT cr.id, cr.utid, cr.ts, cr.dur, cr.name, cr.table_name \
                 FROM _thread_executing_span_critical_path_stack(\
                 {utid}, {start}, {end} - {start}) cr \
                 WHERE name IS NOT NULL"
            ),
            VariantId::FullByArea => format!(
                "SELECT cr.id, cr.utid, cr.ts, cr.dur, cr.name, cr.table_name \
                 FROM _critical_path_stack(\
                 {utid}, {start}, {end} - {start}, 1, 1, 1, 1) cr \
                 WHERE name IS NOT NULL"
            ),
            VariantId::GraphByArea => format!(
                "SELECT * \
                 FROM _thread_executing_span_critical_path_graph(\
                 'critical_path', {utid}, {start}, {end} - {start}) cr"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: TimeWindow = TimeWindow {
        start: 1_000,
        end: 1_500,
    };

    #[test]
    fn test_table_order_matches_variant_ids() {
        for (i, variant) in QueryVariant::all().iter().enumerate() {
            assert_eq!(variant.id as usize, i);
            assert!(std::ptr::eq(QueryVariant::get(variant.id), variant));
        }
        assert_eq!(QueryVariant::all().len(), 5);
    }

    #[test]
    fn test_query_substitutes_numeric_parameters() {
        for variant in QueryVariant::all() {
            let sql = variant.query(7, WINDOW);
            assert!(sql.contains("7, 1000, 1500 - 1000"), "{sql}");
        }
    }

    #[test]
    fn test_lite_variants_join_thread_and_process() {
        for id in [VariantId::LiteBySlice, VariantId::LiteByArea] {
            let sql = QueryVariant::get(id).query(7, WINDOW);
            assert!(sql.contains("_thread_executing_span_critical_path(7"));
            assert!(sql.contains("JOIN thread USING(utid)"));
            assert!(sql.contains("JOIN process USING(upid)"));
            assert!(sql.contains("'thread_state' AS table_name"));
            assert!(!sql.contains("IS NOT NULL"));
        }
    }

    #[test]
    fn test_full_variants_filter_unnamed_spans() {
        let slice = QueryVariant::get(VariantId::FullBySlice).query(7, WINDOW);
        assert!(slice.contains("_thread_executing_span_critical_path_stack(7"));
        assert!(slice.contains("WHERE name IS NOT NULL"));

        let area = QueryVariant::get(VariantId::FullByArea).query(7, WINDOW);
        assert!(area.contains("_critical_path_stack(7"));
        assert!(area.contains(", 1, 1, 1, 1)"));
        assert!(area.contains("WHERE name IS NOT NULL"));
    }

    #[test]
    fn test_graph_variant_routes_to_tab() {
        let variant = QueryVariant::get(VariantId::GraphByArea);
        assert_eq!(variant.sink, ResultSink::QueryTab);
        let sql = variant.query(7, WINDOW);
        assert!(sql.contains("_thread_executing_span_critical_path_graph('critical_path'"));
    }

    #[test]
    fn test_required_modules() {
        assert_eq!(
            QueryVariant::get(VariantId::LiteBySlice).required_module,
            MODULE_SPAN
        );
        assert_eq!(
            QueryVariant::get(VariantId::LiteByArea).required_module,
            MODULE_SPAN
        );
        for id in [
            VariantId::FullBySlice,
            VariantId::FullByArea,
            VariantId::GraphByArea,
        ] {
            assert_eq!(
                QueryVariant::get(id).required_module,
                MODULE_SPAN_WITH_SLICE
            );
        }
    }

    #[test]
    fn test_output_columns_are_unique_and_cover_display_roles() {
        for variant in QueryVariant::all() {
            let mut seen = std::collections::HashSet::new();
            for col in variant.columns {
                assert!(seen.insert(col), "duplicate column {col} in {:?}", variant.id);
            }
            if variant.sink == ResultSink::DebugTrack {
                for role in [variant.display.ts, variant.display.dur, variant.display.name] {
                    assert!(
                        variant.columns.contains(&role),
                        "display role {role} missing from {:?} columns",
                        variant.id
                    );
                }
            }
        }
    }
}
