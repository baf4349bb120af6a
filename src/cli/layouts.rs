//! Layout listing and descriptor inspection.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::models::{LayoutDescriptor, PanelSize};
use crate::services::resolver::{offered_variants, preferred_variant, resolve};
use clap::Args;
use serde::Serialize;

/// List panel sizes and variants, or describe one layout
#[derive(Debug, Clone, Args)]
pub struct LayoutsArgs {
    /// Panel size (2, 4, 6 or 8)
    #[arg(short, long, value_name = "SIZE")]
    pub size: Option<String>,

    /// Variant to resolve (requires --size)
    #[arg(long, value_name = "NAME", requires = "size")]
    pub variant: Option<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// One size in the listing.
#[derive(Debug, Serialize)]
struct SizeEntry {
    size: PanelSize,
    name: String,
    variants: Vec<&'static str>,
    preferred: &'static str,
}

/// Resolved layout with per-slot labels.
#[derive(Debug, Serialize)]
struct DescribeOutput<'a> {
    descriptor: &'a LayoutDescriptor,
    total_slots: usize,
    labels: Vec<String>,
}

impl LayoutsArgs {
    /// Execute the layouts command
    pub fn execute(&self) -> CliResult<()> {
        let sizes = match &self.size {
            Some(size) => vec![parse_size(size)?],
            None => PanelSize::ALL.to_vec(),
        };

        match (&self.variant, sizes.as_slice()) {
            (Some(variant), [size]) => self.describe(&resolve(*size, variant)),
            _ => self.list(&sizes),
        }
    }

    fn list(&self, sizes: &[PanelSize]) -> CliResult<()> {
        let entries: Vec<SizeEntry> = sizes
            .iter()
            .map(|&size| SizeEntry {
                size,
                name: size.to_string(),
                variants: offered_variants(size).to_vec(),
                preferred: preferred_variant(size),
            })
            .collect();

        if self.json {
            return print_json(&entries);
        }

        for entry in &entries {
            println!("{}", entry.name);
            for variant in &entry.variants {
                let descriptor = resolve(entry.size, variant);
                let marker = if *variant == entry.preferred { "*" } else { " " };
                println!(
                    "  {marker} {variant:<32} {:>2} slots",
                    descriptor.total_slots()
                );
            }
        }
        Ok(())
    }

    fn describe(&self, descriptor: &LayoutDescriptor) -> CliResult<()> {
        let total_slots = descriptor.total_slots();
        let labels: Vec<String> = (0..total_slots)
            .filter_map(|index| descriptor.slot_label(index))
            .collect();

        if self.json {
            return print_json(&DescribeOutput {
                descriptor,
                total_slots,
                labels,
            });
        }

        println!(
            "{} / {}",
            descriptor.size,
            descriptor.variant.as_deref().unwrap_or("default layout")
        );
        println!(
            "Grid: {}x{} ({}x{} px)",
            descriptor.grid.columns,
            descriptor.grid.rows,
            descriptor.grid.panel_width_px,
            descriptor.grid.panel_height_px
        );
        for group in &descriptor.groups {
            println!(
                "  {:<8} {:>2} slots @ {}px",
                group.kind.display_name(),
                group.count,
                group.sizing.slot_px
            );
        }
        println!("Total: {total_slots} slots");
        for (index, label) in labels.iter().enumerate() {
            println!("  {:>2}. {label}", index + 1);
        }
        Ok(())
    }
}

/// Parses a size argument, mapping failures to a validation error.
pub fn parse_size(value: &str) -> CliResult<PanelSize> {
    value.parse().map_err(CliError::validation)
}
