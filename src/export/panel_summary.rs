//! Panel header for exports.

use crate::models::{ExportSnapshot, LayoutDescriptor};
use chrono::{DateTime, Local};
use std::fmt::Write as _;

/// Generates the document title and the panel configuration list.
///
/// # Example
///
/// ```
/// use panelsmith::export::panel_summary::generate_panel_summary;
/// use panelsmith::models::{ExportSnapshot, Frame, Glass, PanelSize};
/// use panelsmith::services::resolver::resolve;
///
/// let snapshot = ExportSnapshot {
///     size: PanelSize::Four,
///     variant: "8 switches".to_string(),
///     glass: Glass::White,
///     frame: Frame::Gold,
///     total_slots: 8,
///     icons: Vec::new(),
/// };
/// let descriptor = resolve(snapshot.size, &snapshot.variant);
/// let header = generate_panel_summary(&snapshot, &descriptor, chrono::Local::now());
/// assert!(header.starts_with("# 4 Module Panel"));
/// ```
pub fn generate_panel_summary(
    snapshot: &ExportSnapshot,
    descriptor: &LayoutDescriptor,
    generated_at: DateTime<Local>,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# {} Panel\n", snapshot.size);

    output.push_str("## Configuration\n\n");
    let _ = writeln!(output, "- **Size:** {}", snapshot.size);
    let _ = writeln!(output, "- **Variant:** {}", snapshot.variant);
    if descriptor.variant.is_none() {
        output.push_str("- **Layout:** default for this size\n");
    }
    let _ = writeln!(output, "- **Glass:** {}", snapshot.glass);
    let _ = writeln!(output, "- **Frame:** {}", snapshot.frame);

    let groups = descriptor
        .groups
        .iter()
        .map(|g| format!("{} × {}", g.count, g.kind.display_name()))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(output, "- **Controls:** {groups}");
    let _ = writeln!(
        output,
        "- **Occupied:** {} of {} slots",
        snapshot.occupied(),
        snapshot.total_slots
    );
    let _ = writeln!(
        output,
        "- **Generated:** {}",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    );
    output.push('\n');

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frame, Glass, PanelSize};
    use crate::services::resolver::resolve;
    use chrono::TimeZone;

    fn snapshot(variant: &str) -> ExportSnapshot {
        ExportSnapshot {
            size: PanelSize::Two,
            variant: variant.to_string(),
            glass: Glass::White,
            frame: Frame::Gold,
            total_slots: 4,
            icons: Vec::new(),
        }
    }

    #[test]
    fn test_panel_summary_lists_configuration() {
        let snapshot = snapshot("4 switches");
        let descriptor = resolve(snapshot.size, &snapshot.variant);
        let at = Local.with_ymd_and_hms(2024, 12, 1, 9, 0, 0).unwrap();

        let summary = generate_panel_summary(&snapshot, &descriptor, at);

        assert!(summary.contains("# 2 Module Panel"));
        assert!(summary.contains("- **Glass:** White"));
        assert!(summary.contains("- **Frame:** Gold"));
        assert!(summary.contains("- **Controls:** 4 × Switch"));
        assert!(summary.contains("- **Occupied:** 0 of 4 slots"));
        assert!(summary.contains("2024-12-01 09:00:00"));
        assert!(!summary.contains("default for this size"));
    }

    #[test]
    fn test_panel_summary_marks_fallback_layout() {
        let snapshot = snapshot("Standard");
        let descriptor = resolve(snapshot.size, &snapshot.variant);

        let summary = generate_panel_summary(&snapshot, &descriptor, Local::now());
        assert!(summary.contains("default for this size"));
    }
}
