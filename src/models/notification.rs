//! User-facing notifications emitted by panel mutations.
//!
//! Notifications describe intended outcomes of valid operations. They are
//! informational, never errors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How prominently a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Routine confirmation
    Info,
    /// Something the user may not have wanted (icons lost, panel full)
    Destructive,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Destructive => write!(f, "destructive"),
        }
    }
}

/// An event the presentation layer should surface to the user.
///
/// Slot numbers are 0-based indices; messages render them 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    /// An icon was placed into a slot
    IconAdded {
        /// Icon display name
        icon: String,
        /// Slot index
        slot: usize,
    },
    /// A placement overwrote an occupied slot
    SlotReplaced {
        /// Slot index
        slot: usize,
        /// Name of the discarded icon
        previous: String,
        /// Name of the icon that took its place
        replacement: String,
    },
    /// An icon was removed from a slot
    IconRemoved {
        /// Icon display name
        icon: String,
        /// Slot index it occupied
        slot: usize,
    },
    /// An unindexed placement found no empty slot
    PanelFull {
        /// Number of slots on the panel
        capacity: usize,
    },
    /// An icon was discarded because the panel layout changed
    IconDropped {
        /// Icon display name
        icon: String,
        /// Slot index it occupied before the reset
        slot: usize,
        /// Number of icons dropped by the same reset
        total: usize,
    },
}

impl Notification {
    /// Short title, e.g. "Icon Added".
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::IconAdded { .. } => "Icon Added",
            Self::SlotReplaced { .. } => "Slot Occupied",
            Self::IconRemoved { .. } => "Icon Removed",
            Self::PanelFull { .. } => "Panel Full",
            Self::IconDropped { .. } => "Icons Removed",
        }
    }

    /// Presentation severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::PanelFull { .. } | Self::IconDropped { .. } => Severity::Destructive,
            _ => Severity::Info,
        }
    }

    /// Full user-facing description.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::IconAdded { icon, slot } => {
                format!("{} has been placed in slot {}.", icon, slot + 1)
            }
            Self::SlotReplaced {
                slot,
                previous,
                replacement,
            } => format!(
                "Slot {} was occupied by {}. It has been replaced with {}.",
                slot + 1,
                previous,
                replacement
            ),
            Self::IconRemoved { icon, slot } => {
                format!("{} has been removed from slot {}.", icon, slot + 1)
            }
            Self::PanelFull { capacity } => format!(
                "All {} slots are occupied. Remove an icon first or select a specific slot.",
                capacity
            ),
            Self::IconDropped { icon, slot, total } => format!(
                "Panel layout changed. {} was removed from slot {} ({} icon{} removed).",
                icon,
                slot + 1,
                total,
                if *total == 1 { "" } else { "s" }
            ),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title(), self.message())
    }
}
