//! Palette command registration table.
//!
//! Hosts register these five commands and route invocations to
//! [`CriticalPathOrchestrator::run`](crate::CriticalPathOrchestrator::run).
//! The two slice-style commands may also be invoked programmatically with an
//! explicit utid, e.g. from a thread-state details panel.

use crate::catalog::VariantId;

/// A host-registrable command bound to one query variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub variant: VariantId,
}

/// Commands in palette order.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        id: "critpath.CriticalPathLite",
        name: "Critical path lite (selected thread state slice)",
        variant: VariantId::LiteBySlice,
    },
    CommandSpec {
        id: "critpath.CriticalPath",
        name: "Critical path (selected thread state slice)",
        variant: VariantId::FullBySlice,
    },
    CommandSpec {
        id: "critpath.CriticalPathLite_AreaSelection",
        name: "Critical path lite (over area selection)",
        variant: VariantId::LiteByArea,
    },
    CommandSpec {
        id: "critpath.CriticalPath_AreaSelection",
        name: "Critical path (over area selection)",
        variant: VariantId::FullByArea,
    },
    CommandSpec {
        id: "critpath.CriticalPathGraph_AreaSelection",
        name: "Critical path graph (over area selection)",
        variant: VariantId::GraphByArea,
    },
];

/// Find a command by its stable id.
pub fn command(id: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|c| c.id == id)
}
