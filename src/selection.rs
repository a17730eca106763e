//! UI selection state and its resolution into a concrete analysis target.
//!
//! The host UI owns a single process-wide selection; this crate only reads it.
//! Commands can be invoked with several selection shapes (nothing, an area
//! sweep across tracks, a single selected item), and this module normalizes
//! those shapes into a `(utid, TimeWindow)` pair or a typed precondition
//! failure that the orchestrator turns into a user-facing modal.

use std::fmt;

use tracing::debug;

/// A trace-relative time window in nanoseconds.
///
/// `end` is expected to be at or after `start`, but the bounds are forwarded
/// to the engine as-is: the host's window state is the source of truth and a
/// degenerate window produces an empty result set, not an error here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

impl TimeWindow {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// Kind of a single-item selection. Only `ThreadState` is actionable for
/// critical-path commands; the other kinds exist so matches stay exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleSelectionKind {
    ThreadState,
    Slice,
    SchedSlice,
    Counter,
}

/// The current UI selection. At most one is active at any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Nothing selected.
    None,
    /// A range selection sweeping zero or more tracks. `track_uris` preserves
    /// the visual track order, which is authoritative for resolution.
    Area { track_uris: Vec<String> },
    /// A single selected item (e.g. one slice).
    Single {
        kind: SingleSelectionKind,
        track_uri: Option<String>,
    },
}

/// Kind tag carried by a registered track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    ThreadState,
    CpuSlice,
    Slice,
    Counter,
}

/// Tags attached to a registered track. `utid` is present on per-thread
/// tracks and identifies the thread the track belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDescriptor {
    pub kind: TrackKind,
    pub utid: Option<i64>,
}

/// Read-only view of shared UI state owned by the host.
pub trait ViewState {
    /// The current selection.
    fn selection(&self) -> Selection;

    /// The span of the current selection, or the full visible window when
    /// nothing usable is selected. Total: always produces a window.
    fn selection_or_visible_window(&self) -> TimeWindow;
}

/// Lookup of track descriptors by track URI.
pub trait TrackRegistry {
    fn track(&self, uri: &str) -> Option<TrackDescriptor>;
}

/// A selection successfully resolved to a thread and a time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedThread {
    pub utid: i64,
    pub window: TimeWindow,
}

/// Why the current selection could not be resolved. Both cases are UI-state
/// preconditions: non-retryable, reported to the user, and detected before
/// any engine call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionFailure {
    /// No area selection covering a thread-state track.
    AreaSelectionRequired,
    /// No single thread-state item selected.
    ThreadStateRequired,
}

impl ResolutionFailure {
    /// Modal title shown to the user.
    pub fn title(&self) -> &'static str {
        match self {
            Self::AreaSelectionRequired => "Error: range selection required",
            Self::ThreadStateRequired => "Error: thread state selection required",
        }
    }

    /// Modal body shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            Self::AreaSelectionRequired => {
                "This command requires an area selection over a thread state track."
            }
            Self::ThreadStateRequired => {
                "This command requires a thread state slice to be selected."
            }
        }
    }
}

impl fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl std::error::Error for ResolutionFailure {}

/// Resolves the current selection into a thread identity and time window.
///
/// Borrows the host's view state and track registry for the duration of one
/// invocation; nothing is cached across invocations.
pub struct SelectionResolver<'a> {
    view: &'a dyn ViewState,
    tracks: &'a dyn TrackRegistry,
}

impl<'a> SelectionResolver<'a> {
    pub fn new(view: &'a dyn ViewState, tracks: &'a dyn TrackRegistry) -> Self {
        Self { view, tracks }
    }

    /// Slice-style resolution.
    ///
    /// An explicitly passed utid is trusted as-is and always succeeds (the
    /// caller got it from the engine, e.g. a details panel). Otherwise the
    /// selection must be a single thread-state item whose track carries a
    /// utid tag.
    pub fn resolve_single(
        &self,
        explicit_utid: Option<i64>,
    ) -> Result<ResolvedThread, ResolutionFailure> {
        let window = self.view.selection_or_visible_window();
        if let Some(utid) = explicit_utid {
            return Ok(ResolvedThread { utid, window });
        }
        match self.selected_thread_state_utid() {
            Some(utid) => Ok(ResolvedThread { utid, window }),
            None => Err(ResolutionFailure::ThreadStateRequired),
        }
    }

    /// Area-style resolution.
    ///
    /// Scans the selection's tracks in visual order; the first thread-state
    /// track with a defined utid wins and later tracks are not inspected.
    pub fn resolve_area(&self) -> Result<ResolvedThread, ResolutionFailure> {
        let window = self.view.selection_or_visible_window();
        let Selection::Area { track_uris } = self.view.selection() else {
            return Err(ResolutionFailure::AreaSelectionRequired);
        };
        for uri in &track_uris {
            let Some(desc) = self.tracks.track(uri) else {
                continue;
            };
            if desc.kind != TrackKind::ThreadState {
                continue;
            }
            if let Some(utid) = desc.utid {
                debug!(utid, uri = uri.as_str(), "resolved area selection");
                return Ok(ResolvedThread { utid, window });
            }
        }
        Err(ResolutionFailure::AreaSelectionRequired)
    }

    fn selected_thread_state_utid(&self) -> Option<i64> {
        match self.view.selection() {
            Selection::Single {
                kind: SingleSelectionKind::ThreadState,
                track_uri: Some(uri),
            } => self.tracks.track(&uri)?.utid,
            _ => None,
        }
    }
}
