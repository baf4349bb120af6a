//! Layout descriptor: the slot shape implied by a size/variant selection.

use crate::models::PanelSize;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Labels of the four fan controls, in slot order.
pub const FAN_CONTROL_LABELS: [&str; 4] = ["SPEED+", "OSC", "SPEED-", "POWER"];

/// Control kind shared by every slot in a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    /// Light/appliance switch
    Switch,
    /// Curtain open/close control
    Curtain,
    /// Fan control (speed up, oscillate, speed down, power)
    Fan,
    /// Power socket
    Plug,
}

impl GroupKind {
    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Switch => "Switch",
            Self::Curtain => "Curtain",
            Self::Fan => "Fan",
            Self::Plug => "Plug",
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Rendering hint for the slots of one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSizing {
    /// Slot edge length in pixels at the largest breakpoint
    pub slot_px: u16,
}

/// A named run of consecutive slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotGroup {
    /// Control kind
    pub kind: GroupKind,
    /// Number of slots in the group
    pub count: usize,
    /// Display sizing hint
    pub sizing: SlotSizing,
}

impl SlotGroup {
    /// Creates a group.
    #[must_use]
    pub const fn new(kind: GroupKind, count: usize, slot_px: u16) -> Self {
        Self {
            kind,
            count,
            sizing: SlotSizing { slot_px },
        }
    }
}

/// Panel-level rendering hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridHints {
    /// Columns of the main grid
    pub columns: u8,
    /// Rows of the main grid
    pub rows: u8,
    /// Panel width in pixels at the largest breakpoint
    pub panel_width_px: u16,
    /// Panel height in pixels at the largest breakpoint
    pub panel_height_px: u16,
}

/// Where a slot index lands inside a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotLocation {
    /// Kind of the owning group
    pub kind: GroupKind,
    /// Index of the owning group in `groups`
    pub group_index: usize,
    /// 0-based offset inside the group
    pub offset: usize,
}

/// Structural description of a panel's slots.
///
/// Slot indices are assigned group by group in `groups` order, so the
/// group of an index is found by walking cumulative counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutDescriptor {
    /// Size this descriptor was resolved for
    pub size: PanelSize,
    /// Canonical variant name, or `None` when the size default was used
    pub variant: Option<String>,
    /// Ordered slot groups (zero-count groups omitted)
    pub groups: Vec<SlotGroup>,
    /// Panel-level rendering hints
    pub grid: GridHints,
    /// Curtain-only panel whose main grid shows fixed curtain artwork
    #[serde(default)]
    pub full_curtain: bool,
}

impl LayoutDescriptor {
    /// Total number of addressable slots.
    #[must_use]
    pub fn total_slots(&self) -> usize {
        self.groups.iter().map(|g| g.count).sum()
    }

    /// Ordered `(kind, count)` pairs.
    #[must_use]
    pub fn shape(&self) -> Vec<(GroupKind, usize)> {
        self.groups.iter().map(|g| (g.kind, g.count)).collect()
    }

    /// True when both descriptors have identical ordered `(kind, count)` sequences.
    #[must_use]
    pub fn is_shape_equivalent(&self, other: &Self) -> bool {
        self.shape() == other.shape()
    }

    /// Number of slots of the given kind.
    #[must_use]
    pub fn count_of(&self, kind: GroupKind) -> usize {
        self.groups
            .iter()
            .filter(|g| g.kind == kind)
            .map(|g| g.count)
            .sum()
    }

    /// Locates the group owning `index`, or `None` when out of range.
    #[must_use]
    pub fn group_of(&self, index: usize) -> Option<SlotLocation> {
        let mut start = 0;
        for (group_index, group) in self.groups.iter().enumerate() {
            if index < start + group.count {
                return Some(SlotLocation {
                    kind: group.kind,
                    group_index,
                    offset: index - start,
                });
            }
            start += group.count;
        }
        None
    }

    /// Slot index range of the first group with the given kind.
    #[must_use]
    pub fn range_of(&self, kind: GroupKind) -> Option<Range<usize>> {
        let mut start = 0;
        for group in &self.groups {
            if group.kind == kind {
                return Some(start..start + group.count);
            }
            start += group.count;
        }
        None
    }

    /// Label shown on an empty slot (e.g. "Switch 3", "SPEED+", "Plug").
    #[must_use]
    pub fn slot_label(&self, index: usize) -> Option<String> {
        let location = self.group_of(index)?;
        let label = match location.kind {
            GroupKind::Fan => FAN_CONTROL_LABELS
                .get(location.offset)
                .map_or_else(|| format!("Fan {}", location.offset + 1), |l| (*l).to_string()),
            GroupKind::Plug if self.count_of(GroupKind::Plug) == 1 => "Plug".to_string(),
            kind => format!("{} {}", kind.display_name(), location.offset + 1),
        };
        Some(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(groups: Vec<SlotGroup>) -> LayoutDescriptor {
        LayoutDescriptor {
            size: PanelSize::Six,
            variant: None,
            groups,
            grid: GridHints {
                columns: 2,
                rows: 2,
                panel_width_px: 720,
                panel_height_px: 300,
            },
            full_curtain: false,
        }
    }

    #[test]
    fn test_group_of_walks_cumulative_counts() {
        let d = descriptor(vec![
            SlotGroup::new(GroupKind::Switch, 4, 55),
            SlotGroup::new(GroupKind::Fan, 4, 55),
            SlotGroup::new(GroupKind::Plug, 1, 170),
        ]);

        assert_eq!(d.total_slots(), 9);
        assert_eq!(d.group_of(0).unwrap().kind, GroupKind::Switch);
        assert_eq!(d.group_of(3).unwrap().offset, 3);

        let fan = d.group_of(5).unwrap();
        assert_eq!(fan.kind, GroupKind::Fan);
        assert_eq!(fan.group_index, 1);
        assert_eq!(fan.offset, 1);

        assert_eq!(d.group_of(8).unwrap().kind, GroupKind::Plug);
        assert!(d.group_of(9).is_none());
    }

    #[test]
    fn test_range_of() {
        let d = descriptor(vec![
            SlotGroup::new(GroupKind::Switch, 4, 55),
            SlotGroup::new(GroupKind::Fan, 4, 55),
        ]);

        assert_eq!(d.range_of(GroupKind::Switch), Some(0..4));
        assert_eq!(d.range_of(GroupKind::Fan), Some(4..8));
        assert_eq!(d.range_of(GroupKind::Plug), None);
    }

    #[test]
    fn test_slot_labels() {
        let d = descriptor(vec![
            SlotGroup::new(GroupKind::Switch, 2, 55),
            SlotGroup::new(GroupKind::Fan, 4, 55),
            SlotGroup::new(GroupKind::Plug, 1, 170),
        ]);

        assert_eq!(d.slot_label(1).as_deref(), Some("Switch 2"));
        assert_eq!(d.slot_label(2).as_deref(), Some("SPEED+"));
        assert_eq!(d.slot_label(5).as_deref(), Some("POWER"));
        assert_eq!(d.slot_label(6).as_deref(), Some("Plug"));
        assert_eq!(d.slot_label(7), None);
    }

    #[test]
    fn test_shape_equivalence_ignores_sizing() {
        let a = descriptor(vec![SlotGroup::new(GroupKind::Switch, 8, 60)]);
        let mut b = descriptor(vec![SlotGroup::new(GroupKind::Switch, 8, 40)]);
        b.size = PanelSize::Four;
        let c = descriptor(vec![
            SlotGroup::new(GroupKind::Switch, 4, 55),
            SlotGroup::new(GroupKind::Fan, 4, 55),
        ]);

        assert!(a.is_shape_equivalent(&b));
        assert!(!a.is_shape_equivalent(&c));
        assert_eq!(a.total_slots(), c.total_slots());
    }
}
