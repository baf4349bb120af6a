//! Icon summary for exports.

use crate::catalog::IconCatalog;
use crate::models::ExportSnapshot;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Generates the list of placed icons grouped by category.
pub fn generate_icon_summary(snapshot: &ExportSnapshot, catalog: &IconCatalog) -> String {
    let mut output = String::new();
    output.push_str("## Icons\n\n");

    if snapshot.is_empty() {
        output.push_str("No icons placed.\n");
        return output;
    }

    // Category order follows the catalog; unknown categories sort last by id
    let position = |id: &str| {
        catalog
            .categories()
            .iter()
            .position(|c| c.id == id)
            .unwrap_or(usize::MAX)
    };
    let mut by_category: BTreeMap<(usize, &str), Vec<String>> = BTreeMap::new();
    for slot in &snapshot.icons {
        let category = slot.icon.category.as_str();
        by_category
            .entry((position(category), category))
            .or_default()
            .push(format!("{} (slot {})", slot.icon.name, slot.slot + 1));
    }

    for ((_, category), entries) in &by_category {
        let name = catalog.category(category).map_or(*category, |c| c.name.as_str());
        let _ = writeln!(output, "- **{name}** ({}): {}", entries.len(), entries.join(", "));
    }

    let _ = writeln!(
        output,
        "\n{} icon(s) on {} slots.",
        snapshot.occupied(),
        snapshot.total_slots
    );

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExportedSlot, Frame, Glass, GroupKind, PanelSize};

    fn snapshot(catalog: &IconCatalog, ids: &[(usize, &str)]) -> ExportSnapshot {
        ExportSnapshot {
            size: PanelSize::Four,
            variant: "8 switches".to_string(),
            glass: Glass::Black,
            frame: Frame::Silver,
            total_slots: 8,
            icons: ids
                .iter()
                .map(|(slot, id)| ExportedSlot {
                    slot: *slot,
                    kind: GroupKind::Switch,
                    icon: catalog.get(id).unwrap().clone(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_icon_summary_empty() {
        let catalog = IconCatalog::load().unwrap();
        let summary = generate_icon_summary(&snapshot(&catalog, &[]), &catalog);
        assert!(summary.contains("No icons placed."));
    }

    #[test]
    fn test_icon_summary_groups_by_category() {
        let catalog = IconCatalog::load().unwrap();
        let summary = generate_icon_summary(
            &snapshot(&catalog, &[(0, "1"), (2, "12"), (5, "2")]),
            &catalog,
        );

        let accessories = summary
            .find("- **Accessories** (2): Bulb 1 (slot 1), Bulb 2 (slot 6)")
            .unwrap();
        let lamps = summary.find("- **Lamps** (1): Lamp 2 (slot 3)").unwrap();
        assert!(accessories < lamps);
        assert!(summary.contains("3 icon(s) on 8 slots."));
    }
}
