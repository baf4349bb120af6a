//! Per-group slot tables for exports.

use crate::catalog::IconCatalog;
use crate::models::{ExportSnapshot, ExportedSlot, LayoutDescriptor};
use std::collections::HashMap;
use std::fmt::Write as _;

/// Generates one Markdown table per slot group.
///
/// Each row shows the 1-based slot number, the control label printed on an
/// empty slot, the placed icon (or `-`) and the icon's category.
pub fn generate_slot_tables(
    snapshot: &ExportSnapshot,
    descriptor: &LayoutDescriptor,
    catalog: &IconCatalog,
) -> String {
    let placed: HashMap<usize, &ExportedSlot> =
        snapshot.icons.iter().map(|slot| (slot.slot, slot)).collect();

    let mut output = String::new();
    let mut index = 0;

    for group in &descriptor.groups {
        let _ = writeln!(output, "## {} Slots\n", group.kind.display_name());
        output.push_str("| Slot | Control | Icon | Category |\n");
        output.push_str("|------|---------|------|----------|\n");

        for _ in 0..group.count {
            let label = descriptor.slot_label(index).unwrap_or_default();
            let (icon, category) = placed.get(&index).map_or(("-", "-"), |slot| {
                let category = catalog
                    .category(&slot.icon.category)
                    .map_or(slot.icon.category.as_str(), |c| c.name.as_str());
                (slot.icon.name.as_str(), category)
            });
            let _ = writeln!(output, "| {} | {label} | {icon} | {category} |", index + 1);
            index += 1;
        }

        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frame, Glass, GroupKind, PanelSize};
    use crate::services::resolver::resolve;

    #[test]
    fn test_slot_tables_cover_every_slot() {
        let catalog = IconCatalog::load().unwrap();
        let descriptor = resolve(PanelSize::Four, "4 switches + 1 plug");
        let snapshot = ExportSnapshot {
            size: PanelSize::Four,
            variant: "4 switches + 1 Plug".to_string(),
            glass: Glass::Black,
            frame: Frame::Silver,
            total_slots: 5,
            icons: vec![ExportedSlot {
                slot: 1,
                kind: GroupKind::Switch,
                icon: catalog.get("12").unwrap().clone(),
            }],
        };

        let tables = generate_slot_tables(&snapshot, &descriptor, &catalog);

        assert!(tables.contains("## Switch Slots"));
        assert!(tables.contains("## Plug Slots"));
        assert!(tables.contains("| 1 | Switch 1 | - | - |"));
        assert!(tables.contains("| 2 | Switch 2 | Lamp 2 | Lamps |"));
        assert!(tables.contains("| 5 | Plug | - | - |"));
    }
}
