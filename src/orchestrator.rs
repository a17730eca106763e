//! Command orchestration: resolve the selection, load the engine module, and
//! materialize the analysis results.
//!
//! One invocation is one sequential flow. The only suspension points are the
//! two engine calls (thread metadata lookup and module include); the module
//! include must complete before the analysis query is handed to a sink,
//! because the query references definitions the module introduces. There is
//! no cancellation, no timeout, and no retry at this layer.

use anyhow::Result;
use tracing::{debug, warn};

use crate::catalog::{DisplayColumns, QueryVariant, ResultSink, SelectionStyle, VariantId};
use crate::engine::TraceEngine;
use crate::selection::{ResolutionFailure, SelectionResolver, TrackRegistry, ViewState};
use crate::thread_info::{lookup_thread_info, UNNAMED_THREAD};

/// Title used for tabular result views.
const QUERY_TAB_TITLE: &str = "Critical path";

/// Fully-resolved description of a query-defined track, handed to the
/// materializer. Built fresh per invocation and never retained here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSpec {
    pub sql_source: String,
    pub columns: &'static [&'static str],
    pub title: String,
    pub display: DisplayColumns,
}

/// Registers ad hoc query-defined tracks on the timeline. Acceptance is
/// synchronous; rendering happens later and is not observed here. Repeated
/// registrations stack new tracks, nothing is deduplicated.
pub trait TrackMaterializer {
    fn register_track(&self, spec: TrackSpec);
}

/// Opens tabular query-result views.
pub trait TabularViewer {
    fn open_query_tab(&self, query: &str, title: &str);
}

/// Transient user-facing notices.
pub trait ModalFacility {
    fn show_modal(&self, title: &str, content: &str);
}

/// Coordinates one critical-path command invocation end to end.
///
/// Holds borrowed collaborators injected by the host; concurrent invocations
/// are independent because nothing here is mutated.
pub struct CriticalPathOrchestrator<'a> {
    engine: &'a dyn TraceEngine,
    view: &'a dyn ViewState,
    tracks: &'a dyn TrackRegistry,
    materializer: &'a dyn TrackMaterializer,
    viewer: &'a dyn TabularViewer,
    modal: &'a dyn ModalFacility,
}

impl<'a> CriticalPathOrchestrator<'a> {
    pub fn new(
        engine: &'a dyn TraceEngine,
        view: &'a dyn ViewState,
        tracks: &'a dyn TrackRegistry,
        materializer: &'a dyn TrackMaterializer,
        viewer: &'a dyn TabularViewer,
        modal: &'a dyn ModalFacility,
    ) -> Self {
        Self {
            engine,
            view,
            tracks,
            materializer,
            viewer,
            modal,
        }
    }

    /// Run one analysis variant.
    ///
    /// `explicit_utid` bypasses selection inspection for the slice-style
    /// variants (used when a details panel already knows the thread).
    /// Precondition failures are reported via modal and end the invocation as
    /// `Ok`; engine failures propagate to the invoking command framework.
    pub async fn run(&self, id: VariantId, explicit_utid: Option<i64>) -> Result<()> {
        let variant = QueryVariant::get(id);
        let resolver = SelectionResolver::new(self.view, self.tracks);
        let resolved = match variant.style {
            SelectionStyle::SingleSlice => resolver.resolve_single(explicit_utid),
            SelectionStyle::Area => resolver.resolve_area(),
        };
        let resolved = match resolved {
            Ok(resolved) => resolved,
            Err(failure) => {
                self.report_failure(failure);
                return Ok(());
            }
        };
        debug!(
            variant = ?id,
            utid = resolved.utid,
            start = resolved.window.start,
            end = resolved.window.end,
            "dispatching critical path analysis"
        );

        let title = match variant.sink {
            ResultSink::QueryTab => QUERY_TAB_TITLE.to_string(),
            ResultSink::DebugTrack => match lookup_thread_info(self.engine, resolved.utid).await? {
                Some(info) => info.display_title(),
                None => UNNAMED_THREAD.to_string(),
            },
        };

        // The analysis query references table functions defined by the
        // module, so the include must finish before the query is dispatched.
        self.engine.include_module(variant.required_module).await?;

        let sql = variant.query(resolved.utid, resolved.window);
        match variant.sink {
            ResultSink::DebugTrack => self.materializer.register_track(TrackSpec {
                sql_source: sql,
                columns: variant.columns,
                title,
                display: variant.display,
            }),
            ResultSink::QueryTab => self.viewer.open_query_tab(&sql, &title),
        }
        Ok(())
    }

    fn report_failure(&self, failure: ResolutionFailure) {
        warn!(%failure, "critical path command precondition unmet");
        self.modal.show_modal(failure.title(), failure.message());
    }
}
