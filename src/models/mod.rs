//! Data models for panels, icons and layout descriptors.
//!
//! This module contains the core data structures shared by the engine,
//! the CLI and the web API. Models are independent of UI and business logic.

pub mod builder;
pub mod descriptor;
pub mod icon;
pub mod notification;
pub mod snapshot;

// Re-export all model types
pub use builder::{BuilderConfig, Frame, Glass, PanelSize};
pub use descriptor::{
    GridHints, GroupKind, LayoutDescriptor, SlotGroup, SlotLocation, SlotSizing,
    FAN_CONTROL_LABELS,
};
pub use icon::{IconDefinition, IconInstance, InstanceId};
pub use notification::{Notification, Severity};
pub use snapshot::{ExportSnapshot, ExportedSlot};

/// One position of the slot assignment array: empty or one placed icon.
pub type Slot = Option<IconInstance>;
