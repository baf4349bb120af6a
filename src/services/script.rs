//! Session scripts.
//!
//! A script is a JSON document describing a starting configuration and a
//! sequence of builder actions. Replaying it against a fresh session yields
//! the final export snapshot and every notification emitted on the way.
//!
//! ```json
//! {
//!   "config": { "size": "4", "variant": "8 switches" },
//!   "steps": [
//!     { "action": "place", "icon": "1", "slot": 0 },
//!     { "action": "move", "from": 0, "to": 3 }
//!   ]
//! }
//! ```

use crate::catalog::IconCatalog;
use crate::models::{
    BuilderConfig, ExportSnapshot, Frame, Glass, IconInstance, Notification, PanelSize, Slot,
};
use crate::services::gestures::{DragSource, DropTarget, GestureEvent};
use crate::services::reconciler::ReconcilePolicy;
use crate::services::resolver::preferred_variant;
use crate::services::session::BuilderSession;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Starting configuration of a script. Omitted fields use defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptConfig {
    /// Module size
    pub size: PanelSize,
    /// Variant; the size's preferred variant when omitted
    #[serde(default)]
    pub variant: Option<String>,
    /// Glass colour
    #[serde(default)]
    pub glass: Option<Glass>,
    /// Frame trim
    #[serde(default)]
    pub frame: Option<Frame>,
}

impl ScriptConfig {
    /// Resolves omitted fields against `defaults`.
    #[must_use]
    pub fn to_builder_config(&self, defaults: &BuilderConfig) -> BuilderConfig {
        BuilderConfig {
            size: self.size,
            variant: self
                .variant
                .clone()
                .unwrap_or_else(|| preferred_variant(self.size).to_string()),
            glass: self.glass.unwrap_or(defaults.glass),
            frame: self.frame.unwrap_or(defaults.frame),
        }
    }
}

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Change size (switches to the preferred variant)
    SetSize {
        /// New size
        size: PanelSize,
    },
    /// Change variant
    SetVariant {
        /// New variant name
        variant: String,
    },
    /// Change glass colour
    SetGlass {
        /// New glass
        glass: Glass,
    },
    /// Change frame trim
    SetFrame {
        /// New frame
        frame: Frame,
    },
    /// Place an icon at a slot
    Place {
        /// Catalog icon id
        icon: String,
        /// Target slot
        slot: usize,
    },
    /// Place an icon in the first empty slot
    PlaceFirstEmpty {
        /// Catalog icon id
        icon: String,
    },
    /// Remove the icon at a slot
    Remove {
        /// Slot to clear
        slot: usize,
    },
    /// Swap two slots
    Move {
        /// Source slot
        from: usize,
        /// Target slot
        to: usize,
    },
    /// Clear every slot
    ClearAll,
    /// Release a drag gesture
    Gesture {
        /// Dragged item
        source: DragSource,
        /// Drop target; omitted for drops outside the panel
        #[serde(default)]
        target: Option<DropTarget>,
    },
}

impl ScriptStep {
    /// Action tag as written in scripts.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::SetSize { .. } => "set_size",
            Self::SetVariant { .. } => "set_variant",
            Self::SetGlass { .. } => "set_glass",
            Self::SetFrame { .. } => "set_frame",
            Self::Place { .. } => "place",
            Self::PlaceFirstEmpty { .. } => "place_first_empty",
            Self::Remove { .. } => "remove",
            Self::Move { .. } => "move",
            Self::ClearAll => "clear_all",
            Self::Gesture { .. } => "gesture",
        }
    }
}

/// A replayable builder session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionScript {
    /// Starting configuration
    pub config: ScriptConfig,
    /// Icon ids to hydrate the panel with, one entry per slot (`null` for empty)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub initial: Vec<Option<String>>,
    /// Actions in order
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

/// Outcome of a replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    /// Final panel
    pub snapshot: ExportSnapshot,
    /// Every notification in emission order
    pub notifications: Vec<Notification>,
}

impl SessionScript {
    /// Parses a script from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse session script")
    }

    /// Reads and parses a script file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("Invalid script: {}", path.display()))
    }

    /// Replays the script against a fresh session.
    ///
    /// Unknown icon ids and out-of-range slots abort the replay with an
    /// error naming the failing step. A full panel does not.
    pub fn replay(
        &self,
        catalog: Arc<IconCatalog>,
        defaults: &BuilderConfig,
        policy: ReconcilePolicy,
    ) -> Result<ReplayReport> {
        let config = self.config.to_builder_config(defaults);
        info!(size = %config.size, variant = %config.variant, steps = self.steps.len(), "replaying script");

        let mut session = BuilderSession::new(catalog, config, policy);
        let mut notifications = Vec::new();

        if !self.initial.is_empty() {
            let slots = self.hydration_slots(session.catalog())?;
            session.hydrate(slots);
        }

        for (index, step) in self.steps.iter().enumerate() {
            debug!(step = index + 1, action = step.action(), "applying step");
            apply_step(&mut session, step)
                .with_context(|| format!("Step {} ({}) failed", index + 1, step.action()))?;
            notifications.extend(session.take_notifications());
        }

        Ok(ReplayReport {
            snapshot: session.export_snapshot(),
            notifications,
        })
    }

    fn hydration_slots(&self, catalog: &IconCatalog) -> Result<Vec<Slot>> {
        self.initial
            .iter()
            .enumerate()
            .map(|(slot, id)| match id {
                None => Ok(None),
                Some(id) => catalog
                    .get(id)
                    .cloned()
                    .map(|icon| Some(IconInstance::new(icon)))
                    .with_context(|| format!("Unknown icon id '{id}' in initial slot {}", slot + 1)),
            })
            .collect()
    }
}

fn apply_step(session: &mut BuilderSession, step: &ScriptStep) -> Result<()> {
    match step {
        ScriptStep::SetSize { size } => {
            session.set_size(*size);
        }
        ScriptStep::SetVariant { variant } => {
            session.set_variant(variant.clone());
        }
        ScriptStep::SetGlass { glass } => {
            session.set_glass(*glass);
        }
        ScriptStep::SetFrame { frame } => {
            session.set_frame(*frame);
        }
        ScriptStep::Place { icon, slot } => {
            session.place(icon, *slot)?;
        }
        ScriptStep::PlaceFirstEmpty { icon } => {
            session.place_first_empty(icon)?;
        }
        ScriptStep::Remove { slot } => {
            session.remove_at(*slot);
        }
        ScriptStep::Move { from, to } => {
            session.move_icon(*from, *to);
        }
        ScriptStep::ClearAll => {
            session.clear_all();
        }
        ScriptStep::Gesture { source, target } => {
            session.handle_gesture(GestureEvent::end(source.clone(), *target))?;
        }
    }
    Ok(())
}
