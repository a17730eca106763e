//! Critical-path analysis commands for trace-viewer UIs.
//!
//! This crate is the selection-resolution and query-orchestration layer
//! between a trace viewer's UI state and an external trace-query engine. It
//! normalizes whatever the user currently has selected into a concrete
//! `(thread, time window)` pair, picks one of five critical-path query
//! variants, sequences the engine calls (module include, then query), and
//! hands the result to a track materializer or tabular viewer supplied by the
//! host.
//!
//! # Modules
//!
//! - [`selection`] - the `Selection` sum type and its resolution into a
//!   thread and window
//! - [`catalog`] - the five query variants with their SQL templates and
//!   output column contracts
//! - [`orchestrator`] - end-to-end invocation flow and the result-sink traits
//! - [`engine`] - the external trace-query engine contract
//! - [`thread_info`] - per-thread display metadata lookup
//! - [`commands`] - stable command ids and palette names for host registration
//!
//! The critical-path computation itself lives in the engine's
//! `sched.thread_executing_span*` modules; this crate only builds their
//! inputs and routes their outputs.

pub mod catalog;
pub mod commands;
pub mod engine;
pub mod orchestrator;
pub mod selection;
pub mod thread_info;

pub use catalog::{DisplayColumns, QueryVariant, ResultSink, SelectionStyle, VariantId};
pub use commands::{command, CommandSpec, COMMANDS};
pub use engine::{QueryResult, TraceEngine};
pub use orchestrator::{
    CriticalPathOrchestrator, ModalFacility, TabularViewer, TrackMaterializer, TrackSpec,
};
pub use selection::{
    ResolutionFailure, ResolvedThread, Selection, SelectionResolver, SingleSelectionKind,
    TimeWindow, TrackDescriptor, TrackKind, TrackRegistry, ViewState,
};
pub use thread_info::{lookup_thread_info, ThreadInfo, UNNAMED_THREAD};
