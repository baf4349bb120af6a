//! Layout descriptor resolution.
//!
//! Maps a (size, variant) selection to its [`LayoutDescriptor`]. The shapes
//! are catalog data: a fixed lookup table keyed by size and variant name.
//! Unknown variants fall back to the size's default entry, so resolution
//! never fails.

use crate::models::{GridHints, GroupKind, LayoutDescriptor, PanelSize, SlotGroup};

/// One catalog shape.
struct ShapeEntry {
    /// Lowercase variant name, `None` for the size default
    name: Option<&'static str>,
    groups: &'static [(GroupKind, usize, u16)],
    grid: GridHints,
    full_curtain: bool,
}

/// Catalog data for one panel size.
struct SizeEntry {
    size: PanelSize,
    /// Variants offered to the user, in display order
    offered: &'static [&'static str],
    /// Exact-name entries; the last entry is the size default
    shapes: &'static [ShapeEntry],
}

const fn grid(columns: u8, rows: u8, panel_width_px: u16, panel_height_px: u16) -> GridHints {
    GridHints {
        columns,
        rows,
        panel_width_px,
        panel_height_px,
    }
}

use GroupKind::{Curtain, Fan, Plug, Switch};

static CATALOG: [SizeEntry; 4] = [
    SizeEntry {
        size: PanelSize::Two,
        offered: &["4 switches", "2 curtains"],
        shapes: &[
            ShapeEntry {
                name: Some("4 switches"),
                groups: &[(Switch, 4, 60)],
                grid: grid(2, 2, 310, 310),
                full_curtain: false,
            },
            ShapeEntry {
                name: Some("2*2 curtains"),
                groups: &[(Curtain, 4, 60)],
                grid: grid(2, 2, 310, 310),
                full_curtain: true,
            },
            ShapeEntry {
                // Curtain controls are drawn but not addressable
                name: Some("4 switches + 2 curtains"),
                groups: &[(Switch, 4, 60)],
                grid: grid(3, 2, 350, 350),
                full_curtain: false,
            },
            ShapeEntry {
                name: None,
                groups: &[(Curtain, 4, 60)],
                grid: grid(2, 2, 310, 310),
                full_curtain: true,
            },
        ],
    },
    SizeEntry {
        size: PanelSize::Four,
        offered: &["8 switches", "4 switches + 1 Plug", "4 switches + fan"],
        shapes: &[
            ShapeEntry {
                name: Some("8 switches"),
                groups: &[(Switch, 8, 60)],
                grid: grid(4, 2, 520, 300),
                full_curtain: false,
            },
            ShapeEntry {
                name: Some("4 switches + 1 plug"),
                groups: &[(Switch, 4, 60), (Plug, 1, 170)],
                grid: grid(2, 2, 530, 300),
                full_curtain: false,
            },
            ShapeEntry {
                name: Some("4 switches + fan"),
                groups: &[(Switch, 4, 55), (Fan, 4, 55)],
                grid: grid(2, 2, 530, 300),
                full_curtain: false,
            },
            ShapeEntry {
                name: None,
                groups: &[(Switch, 4, 58), (Plug, 1, 160)],
                grid: grid(2, 2, 530, 300),
                full_curtain: false,
            },
        ],
    },
    SizeEntry {
        size: PanelSize::Six,
        offered: &["10 Switch", "8 switch + 1 Plug", "4 switches + 1 fan + 1 Plug"],
        shapes: &[
            ShapeEntry {
                name: Some("10 switch"),
                groups: &[(Switch, 10, 60)],
                grid: grid(5, 2, 720, 300),
                full_curtain: false,
            },
            ShapeEntry {
                name: Some("8 switch + 1 plug"),
                groups: &[(Switch, 8, 60), (Plug, 1, 170)],
                grid: grid(4, 2, 720, 300),
                full_curtain: false,
            },
            ShapeEntry {
                name: Some("4 switches + 1 fan + 1 plug"),
                groups: &[(Switch, 4, 55), (Fan, 4, 55), (Plug, 1, 155)],
                grid: grid(2, 2, 720, 300),
                full_curtain: false,
            },
            ShapeEntry {
                name: None,
                groups: &[(Switch, 10, 60)],
                grid: grid(5, 2, 720, 300),
                full_curtain: false,
            },
        ],
    },
    SizeEntry {
        size: PanelSize::Eight,
        offered: &["6 switches + 1 Fan + 1 Plug", "10 switches + 1 Plug"],
        shapes: &[
            ShapeEntry {
                name: Some("10 switches + 1 plug"),
                groups: &[(Switch, 10, 60), (Plug, 1, 170)],
                grid: grid(5, 2, 760, 300),
                full_curtain: false,
            },
            ShapeEntry {
                name: None,
                groups: &[(Switch, 6, 55), (Fan, 4, 55), (Plug, 1, 155)],
                grid: grid(3, 2, 760, 300),
                full_curtain: false,
            },
        ],
    },
];

fn size_entry(size: PanelSize) -> &'static SizeEntry {
    CATALOG
        .iter()
        .find(|entry| entry.size == size)
        .unwrap_or(&CATALOG[1])
}

/// Canonical form used for variant matching: trimmed, ASCII-lowercased.
#[must_use]
pub fn normalize_variant(variant: &str) -> String {
    variant.trim().to_ascii_lowercase()
}

/// Resolves the layout descriptor for a size/variant selection.
///
/// Variant names are matched ignoring case and surrounding whitespace.
/// Unknown variants resolve to the size's default shape.
///
/// # Examples
///
/// ```
/// use panelsmith::models::{GroupKind, PanelSize};
/// use panelsmith::services::resolver::resolve;
///
/// let d = resolve(PanelSize::Four, "4 switches + fan");
/// assert_eq!(d.shape(), vec![(GroupKind::Switch, 4), (GroupKind::Fan, 4)]);
/// assert_eq!(d.total_slots(), 8);
/// ```
#[must_use]
pub fn resolve(size: PanelSize, variant: &str) -> LayoutDescriptor {
    let entry = size_entry(size);
    let wanted = normalize_variant(variant);

    let shape = entry
        .shapes
        .iter()
        .find(|shape| shape.name == Some(wanted.as_str()))
        .or_else(|| entry.shapes.iter().find(|shape| shape.name.is_none()))
        .unwrap_or(&entry.shapes[entry.shapes.len() - 1]);

    LayoutDescriptor {
        size,
        variant: shape.name.map(str::to_string),
        groups: shape
            .groups
            .iter()
            .filter(|(_, count, _)| *count > 0)
            .map(|&(kind, count, slot_px)| SlotGroup::new(kind, count, slot_px))
            .collect(),
        grid: shape.grid,
        full_curtain: shape.full_curtain,
    }
}

/// Variants offered to the user for a size, in display order.
#[must_use]
pub fn offered_variants(size: PanelSize) -> &'static [&'static str] {
    size_entry(size).offered
}

/// Variant selected automatically when the user switches to `size`:
/// the second offered variant, or the first when only one is offered.
#[must_use]
pub fn preferred_variant(size: PanelSize) -> &'static str {
    let offered = offered_variants(size);
    offered.get(1).or_else(|| offered.first()).copied().unwrap_or("")
}

/// Variant names with an explicit table entry (lowercase).
pub fn known_variants(size: PanelSize) -> impl Iterator<Item = &'static str> {
    size_entry(size).shapes.iter().filter_map(|shape| shape.name)
}

/// Descriptor used when a size's variant is not in the table.
#[must_use]
pub fn default_descriptor(size: PanelSize) -> LayoutDescriptor {
    resolve(size, "")
}
