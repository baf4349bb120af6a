//! Export snapshot handed to rendering and document pipelines.

use crate::models::{Frame, Glass, GroupKind, IconDefinition, PanelSize};
use serde::{Deserialize, Serialize};

/// One occupied slot in an export snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedSlot {
    /// 0-based slot index
    pub slot: usize,
    /// Kind of the group the slot belongs to
    pub kind: GroupKind,
    /// The placed icon's catalog entry
    pub icon: IconDefinition,
}

/// Read-only description of a finished panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSnapshot {
    /// Module size
    pub size: PanelSize,
    /// Variant as selected by the user
    pub variant: String,
    /// Glass colour
    pub glass: Glass,
    /// Frame trim
    pub frame: Frame,
    /// Number of slots on the panel
    pub total_slots: usize,
    /// Occupied slots in ascending index order
    pub icons: Vec<ExportedSlot>,
}

impl ExportSnapshot {
    /// Number of occupied slots.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.icons.len()
    }

    /// True when no icon has been placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}
