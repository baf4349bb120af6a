//! Slot assignment store.
//!
//! Owns the canonical slot array for the current layout descriptor and is
//! the only place where slots are mutated. Every operation leaves the array
//! length equal to `descriptor.total_slots()`.

use crate::models::{IconDefinition, IconInstance, InstanceId, LayoutDescriptor, Notification, Slot};
use thiserror::Error;
use tracing::{debug, warn};

/// Failures of slot mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentError {
    /// Slot index outside `[0, len)`. Indicates a wiring bug in the caller.
    #[error("slot {index} is out of range for a panel with {len} slots")]
    OutOfRange {
        /// Requested index
        index: usize,
        /// Current array length
        len: usize,
    },
    /// No empty slot available for an unindexed placement.
    #[error("all {capacity} slots are occupied")]
    PanelFull {
        /// Current array length
        capacity: usize,
    },
}

/// Result of a successful placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Slot the icon was written to
    pub slot: usize,
    /// ID of the newly created instance
    pub instance_id: InstanceId,
    /// Instance that previously occupied the slot, if any
    pub replaced: Option<IconInstance>,
}

/// Slot-indexed assignment of icon instances.
#[derive(Debug, Clone)]
pub struct SlotAssignmentStore {
    slots: Vec<Slot>,
    descriptor: LayoutDescriptor,
    pending: Vec<Notification>,
}

impl SlotAssignmentStore {
    /// Creates an all-empty store sized to `descriptor`.
    #[must_use]
    pub fn new(descriptor: LayoutDescriptor) -> Self {
        Self {
            slots: vec![None; descriptor.total_slots()],
            descriptor,
            pending: Vec::new(),
        }
    }

    /// Descriptor the array is currently sized against.
    #[must_use]
    pub fn descriptor(&self) -> &LayoutDescriptor {
        &self.descriptor
    }

    /// Read-only view of the slot array.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True for a descriptor without slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Instance at `index`, if the slot exists and is occupied.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&IconInstance> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Index of the slot holding `instance_id`.
    #[must_use]
    pub fn find(&self, instance_id: &InstanceId) -> Option<usize> {
        self.slots.iter().position(|slot| {
            slot.as_ref()
                .is_some_and(|instance| &instance.instance_id == instance_id)
        })
    }

    /// Occupied slots in index order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &IconInstance)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|instance| (index, instance)))
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// True when no slot is empty.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Drains queued notifications in emission order.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    pub(crate) fn notify(&mut self, notification: Notification) {
        self.pending.push(notification);
    }

    fn check_index(&self, index: usize) -> Result<(), AssignmentError> {
        if index < self.slots.len() {
            Ok(())
        } else {
            warn!(index, len = self.slots.len(), "slot index out of range");
            Err(AssignmentError::OutOfRange {
                index,
                len: self.slots.len(),
            })
        }
    }

    /// Places a new instance of `icon` at `index`, overwriting any occupant.
    ///
    /// Emits `SlotReplaced` when the slot was occupied, then `IconAdded`.
    pub fn place(
        &mut self,
        icon: &IconDefinition,
        index: usize,
    ) -> Result<Placement, AssignmentError> {
        self.check_index(index)?;

        let instance = IconInstance::new(icon.clone());
        let instance_id = instance.instance_id.clone();
        let replaced = self.slots[index].replace(instance);

        if let Some(previous) = &replaced {
            self.notify(Notification::SlotReplaced {
                slot: index,
                previous: previous.icon.name.clone(),
                replacement: icon.name.clone(),
            });
        }
        self.notify(Notification::IconAdded {
            icon: icon.name.clone(),
            slot: index,
        });
        debug!(slot = index, icon = %icon.name, instance = %instance_id, "placed icon");

        Ok(Placement {
            slot: index,
            instance_id,
            replaced,
        })
    }

    /// Places a new instance of `icon` in the lowest-indexed empty slot.
    ///
    /// Fails with `PanelFull` without mutating when every slot is occupied.
    pub fn place_first_empty(&mut self, icon: &IconDefinition) -> Result<Placement, AssignmentError> {
        let index = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(AssignmentError::PanelFull {
                capacity: self.slots.len(),
            })?;
        self.place(icon, index)
    }

    /// Clears the slot holding `instance_id`.
    ///
    /// Unknown IDs are a no-op, so removal is idempotent.
    pub fn remove(&mut self, instance_id: &InstanceId) -> Option<(usize, IconInstance)> {
        let index = self.find(instance_id)?;
        let removed = self.slots[index].take()?;

        self.notify(Notification::IconRemoved {
            icon: removed.icon.name.clone(),
            slot: index,
        });
        debug!(slot = index, instance = %instance_id, "removed icon");

        Some((index, removed))
    }

    /// Swaps the contents of `from` and `to`.
    ///
    /// No-op (returns `false`) when the indices are equal, either is out of
    /// range, or `from` is empty. Moving onto an occupied slot exchanges the
    /// two icons rather than shifting anything.
    pub fn move_icon(&mut self, from: usize, to: usize) -> bool {
        let len = self.slots.len();
        if from == to || from >= len || to >= len || self.slots[from].is_none() {
            return false;
        }

        self.slots.swap(from, to);
        debug!(from, to, "moved icon");
        true
    }

    /// Empties every slot, emitting `IconRemoved` per cleared instance.
    pub fn clear_all(&mut self) -> Vec<(usize, IconInstance)> {
        let removed = self.drain_occupied();
        for (slot, instance) in &removed {
            self.notify(Notification::IconRemoved {
                icon: instance.icon.name.clone(),
                slot: *slot,
            });
        }
        debug!(count = removed.len(), "cleared panel");
        removed
    }

    /// Re-sizes to `descriptor` with an all-empty array, returning the
    /// discarded instances. Emits no notifications.
    pub(crate) fn reset(&mut self, descriptor: LayoutDescriptor) -> Vec<(usize, IconInstance)> {
        let removed = self.drain_occupied();
        self.slots = vec![None; descriptor.total_slots()];
        self.descriptor = descriptor;
        removed
    }

    /// Adopts `slots` as the array, padding with empty slots or truncating
    /// to the descriptor's length. Returns the instances cut off by truncation.
    pub(crate) fn adopt(&mut self, mut slots: Vec<Slot>) -> Vec<(usize, IconInstance)> {
        let len = self.descriptor.total_slots();
        let overflow = if slots.len() > len {
            slots
                .split_off(len)
                .into_iter()
                .enumerate()
                .filter_map(|(offset, slot)| slot.map(|instance| (len + offset, instance)))
                .collect()
        } else {
            slots.resize(len, None);
            Vec::new()
        };

        self.slots = slots;
        overflow
    }

    fn drain_occupied(&mut self) -> Vec<(usize, IconInstance)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| slot.take().map(|instance| (index, instance)))
            .collect()
    }
}
