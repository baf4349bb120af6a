//! Builder session.
//!
//! The single owned state object of a panel being designed. All slot
//! mutations go through the session's store; configuration changes go
//! through the reconciler; drag gestures go through the mapper.

use crate::catalog::IconCatalog;
use crate::models::{
    BuilderConfig, ExportSnapshot, ExportedSlot, Frame, Glass, IconDefinition, IconInstance,
    InstanceId, LayoutDescriptor, Notification, PanelSize, Slot,
};
use crate::services::gestures::{GestureEvent, GestureMapper, Operation};
use crate::services::reconciler::{ReconcilePolicy, Reconciler, ReconcilerState, Reconciliation};
use crate::services::resolver::{preferred_variant, resolve};
use crate::services::store::{AssignmentError, Placement, SlotAssignmentStore};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors surfaced by session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Store rejected the mutation
    #[error(transparent)]
    Assignment(#[from] AssignmentError),
    /// Icon id not present in the catalog
    #[error("unknown icon id '{0}'")]
    UnknownIcon(String),
}

/// Result of a gesture that reached the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Drag still in progress, or released without an operation
    Ignored,
    /// An icon was placed
    Placed(Placement),
    /// The panel had no empty slot; a `PanelFull` notification was queued
    PanelFull,
    /// Two slots were swapped
    Moved {
        /// Source slot
        from: usize,
        /// Target slot
        to: usize,
    },
    /// The move was a no-op
    NotMoved,
}

/// In-memory state of one panel being built.
#[derive(Debug, Clone)]
pub struct BuilderSession {
    catalog: Arc<IconCatalog>,
    config: BuilderConfig,
    store: SlotAssignmentStore,
    reconciler: Reconciler,
    mapper: GestureMapper,
}

impl BuilderSession {
    /// Creates a session for `config`.
    ///
    /// The session stays uninitialized until the first configuration change,
    /// mutation or hydration, so a saved array can still be adopted.
    #[must_use]
    pub fn new(catalog: Arc<IconCatalog>, config: BuilderConfig, policy: ReconcilePolicy) -> Self {
        let store = SlotAssignmentStore::new(resolve(config.size, &config.variant));
        Self {
            catalog,
            config,
            store,
            reconciler: Reconciler::new(policy),
            mapper: GestureMapper::new(),
        }
    }

    /// Icon catalog used to resolve ids.
    #[must_use]
    pub fn catalog(&self) -> &IconCatalog {
        &self.catalog
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Reconciler state.
    #[must_use]
    pub const fn state(&self) -> &ReconcilerState {
        self.reconciler.state()
    }

    /// Gesture mapper, for drag feedback.
    #[must_use]
    pub const fn mapper(&self) -> &GestureMapper {
        &self.mapper
    }

    /// Descriptor the slots are sized against.
    #[must_use]
    pub fn descriptor(&self) -> &LayoutDescriptor {
        self.store.descriptor()
    }

    /// Read-only slot array.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        self.store.slots()
    }

    /// Occupied slots in index order.
    pub fn active_icons(&self) -> impl Iterator<Item = (usize, &IconInstance)> {
        self.store.occupied()
    }

    /// Drains queued notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.store.take_notifications()
    }

    /// Replaces the whole configuration and reconciles.
    pub fn apply_config(&mut self, config: BuilderConfig) -> Reconciliation {
        self.config = config;
        self.reconciler.apply_config(&self.config, &mut self.store)
    }

    /// Changes the size and switches to that size's preferred variant.
    ///
    /// Re-selecting the current size keeps the current variant.
    pub fn set_size(&mut self, size: PanelSize) -> Reconciliation {
        let mut config = self.config.clone();
        if size != config.size {
            config.size = size;
            config.variant = preferred_variant(size).to_string();
        }
        self.apply_config(config)
    }

    /// Changes the variant.
    pub fn set_variant(&mut self, variant: impl Into<String>) -> Reconciliation {
        let config = BuilderConfig {
            variant: variant.into(),
            ..self.config.clone()
        };
        self.apply_config(config)
    }

    /// Changes the glass colour. Never clears the panel.
    pub fn set_glass(&mut self, glass: Glass) -> Reconciliation {
        let config = self.config.clone().with_glass(glass);
        self.apply_config(config)
    }

    /// Changes the frame trim.
    pub fn set_frame(&mut self, frame: Frame) -> Reconciliation {
        let config = self.config.clone().with_frame(frame);
        self.apply_config(config)
    }

    /// Adopts a saved slot array if the session is still uninitialized.
    pub fn hydrate(&mut self, slots: Vec<Slot>) -> bool {
        self.reconciler.hydrate(&self.config, &mut self.store, slots)
    }

    fn ensure_initialized(&mut self) {
        if !self.reconciler.is_stable() {
            self.reconciler.apply_config(&self.config, &mut self.store);
        }
    }

    fn icon(&self, id: &str) -> Result<IconDefinition, SessionError> {
        self.catalog
            .get(id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownIcon(id.to_string()))
    }

    /// Places catalog icon `icon_id` at `slot`.
    pub fn place(&mut self, icon_id: &str, slot: usize) -> Result<Placement, SessionError> {
        self.ensure_initialized();
        let icon = self.icon(icon_id)?;
        Ok(self.store.place(&icon, slot)?)
    }

    /// Places catalog icon `icon_id` in the first empty slot.
    ///
    /// A full panel is not an error: it queues a `PanelFull` notification
    /// and returns `Ok(None)`.
    pub fn place_first_empty(&mut self, icon_id: &str) -> Result<Option<Placement>, SessionError> {
        self.ensure_initialized();
        let icon = self.icon(icon_id)?;
        match self.store.place_first_empty(&icon) {
            Ok(placement) => Ok(Some(placement)),
            Err(AssignmentError::PanelFull { capacity }) => {
                debug!(capacity, icon = %icon.name, "panel full");
                self.store.notify(Notification::PanelFull { capacity });
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Removes the instance with `instance_id`; unknown ids are a no-op.
    pub fn remove(&mut self, instance_id: &InstanceId) -> Option<(usize, IconInstance)> {
        self.ensure_initialized();
        self.store.remove(instance_id)
    }

    /// Removes whatever occupies `slot`.
    pub fn remove_at(&mut self, slot: usize) -> Option<(usize, IconInstance)> {
        let instance_id = self.store.get(slot)?.instance_id.clone();
        self.remove(&instance_id)
    }

    /// Swaps two slots. Returns `false` for no-op moves.
    pub fn move_icon(&mut self, from: usize, to: usize) -> bool {
        self.ensure_initialized();
        self.store.move_icon(from, to)
    }

    /// Clears the panel, returning the number of removed icons.
    pub fn clear_all(&mut self) -> usize {
        self.ensure_initialized();
        self.store.clear_all().len()
    }

    /// Feeds a drag event and executes the resulting operation.
    pub fn handle_gesture(&mut self, event: GestureEvent) -> Result<GestureOutcome, SessionError> {
        let Some(operation) = self.mapper.handle(event) else {
            return Ok(GestureOutcome::Ignored);
        };
        self.execute(operation)
    }

    /// Executes a mapped operation.
    pub fn execute(&mut self, operation: Operation) -> Result<GestureOutcome, SessionError> {
        match operation {
            Operation::Place { icon, slot } => {
                let placement = self.place(&icon, slot).inspect_err(|err| {
                    warn!(%err, slot, "gesture targeted an invalid slot");
                })?;
                Ok(GestureOutcome::Placed(placement))
            }
            Operation::PlaceFirstEmpty { icon } => Ok(self
                .place_first_empty(&icon)?
                .map_or(GestureOutcome::PanelFull, GestureOutcome::Placed)),
            Operation::Move { from, to } => Ok(if self.move_icon(from, to) {
                GestureOutcome::Moved { from, to }
            } else {
                GestureOutcome::NotMoved
            }),
        }
    }

    /// Read-only description of the panel for export pipelines.
    #[must_use]
    pub fn export_snapshot(&self) -> ExportSnapshot {
        let descriptor = self.store.descriptor();
        let icons = self
            .store
            .occupied()
            .filter_map(|(slot, instance)| {
                descriptor.group_of(slot).map(|location| ExportedSlot {
                    slot,
                    kind: location.kind,
                    icon: instance.icon.clone(),
                })
            })
            .collect();

        ExportSnapshot {
            size: self.config.size,
            variant: self.config.variant.clone(),
            glass: self.config.glass,
            frame: self.config.frame,
            total_slots: self.store.len(),
            icons,
        }
    }
}
