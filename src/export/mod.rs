//! Export functionality for finished panels.
//!
//! Renders an [`ExportSnapshot`] as Markdown documentation: a panel header,
//! one slot table per group and an icon summary. Visual capture of the panel
//! is left to external tooling.

pub mod icon_summary;
pub mod panel_summary;
pub mod slot_table;

pub use icon_summary::generate_icon_summary;
pub use panel_summary::generate_panel_summary;
pub use slot_table::generate_slot_tables;

use crate::catalog::IconCatalog;
use crate::models::{ExportSnapshot, PanelSize};
use crate::services::resolver::resolve;
use chrono::{DateTime, Local};

/// Renders the full Markdown document for `snapshot`.
#[must_use]
pub fn export_to_markdown(
    snapshot: &ExportSnapshot,
    catalog: &IconCatalog,
    generated_at: DateTime<Local>,
) -> String {
    let descriptor = resolve(snapshot.size, &snapshot.variant);

    let mut output = generate_panel_summary(snapshot, &descriptor, generated_at);
    output.push_str(&generate_slot_tables(snapshot, &descriptor, catalog));
    output.push_str(&generate_icon_summary(snapshot, catalog));
    output
}

/// Default export file name, e.g. `panel-4module-20250101-120000.md`.
#[must_use]
pub fn default_filename(size: PanelSize, at: DateTime<Local>) -> String {
    format!(
        "panel-{}module-{}.md",
        size.modules(),
        at.format("%Y%m%d-%H%M%S")
    )
}
