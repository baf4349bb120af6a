//! Icon catalog listing.

use crate::cli::common::{load_catalog, print_json, CliError, CliResult};
use crate::models::IconDefinition;
use clap::Args;

/// List icons in the catalog
#[derive(Debug, Clone, Args)]
pub struct IconsArgs {
    /// Only show icons of this category id
    #[arg(short, long, value_name = "ID")]
    pub category: Option<String>,

    /// Case-insensitive substring match on the icon name
    #[arg(short, long, value_name = "QUERY")]
    pub search: Option<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

impl IconsArgs {
    /// Execute the icons command
    pub fn execute(&self) -> CliResult<()> {
        let catalog = load_catalog()?;

        if let Some(category) = &self.category {
            if catalog.category(category).is_none() {
                let known: Vec<&str> = catalog.categories().iter().map(|c| c.id.as_str()).collect();
                return Err(CliError::validation(format!(
                    "Unknown category '{category}'. Known categories: {}",
                    known.join(", ")
                )));
            }
        }

        let mut icons: Vec<&IconDefinition> = match &self.search {
            Some(query) => catalog.search(query),
            None => catalog.icons().iter().collect(),
        };
        if let Some(category) = &self.category {
            icons.retain(|icon| &icon.category == category);
        }

        if self.json {
            return print_json(&icons);
        }

        if icons.is_empty() {
            println!("No icons found.");
            return Ok(());
        }

        for category in catalog.categories() {
            let members: Vec<&&IconDefinition> =
                icons.iter().filter(|i| i.category == category.id).collect();
            if members.is_empty() {
                continue;
            }
            println!("{} ({})", category.name, members.len());
            for icon in members {
                println!("  {:>3}  {}", icon.id, icon.name);
            }
        }
        Ok(())
    }
}
