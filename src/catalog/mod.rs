//! Embedded icon catalog.
//!
//! The catalog is compiled into the binary from `icons.json` and is
//! read-only for the lifetime of the process.

use crate::models::IconDefinition;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Icon category shown as a section in the icon library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconCategory {
    /// Category ID (e.g., "lamps")
    pub id: String,
    /// Display name (e.g., "Lamps")
    pub name: String,
}

/// Catalog schema of icons.json.
#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
    #[allow(dead_code)]
    version: String,
    categories: Vec<IconCategory>,
    icons: Vec<IconDefinition>,
}

/// Ordered icon catalog with O(1) lookup by ID.
#[derive(Debug, Clone)]
pub struct IconCatalog {
    icons: Vec<IconDefinition>,
    categories: Vec<IconCategory>,
    lookup: HashMap<String, usize>,
}

impl IconCatalog {
    /// Loads the catalog from the embedded JSON file.
    pub fn load() -> Result<Self> {
        let json_data = include_str!("icons.json");
        Self::from_json(json_data).context("Failed to parse embedded icons.json")
    }

    /// Parses a catalog from a JSON document with the icons.json schema.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_parts(file.categories, file.icons)
    }

    /// Builds a catalog from categories and icons, rejecting duplicate IDs
    /// and icons whose category is not declared.
    pub fn from_parts(categories: Vec<IconCategory>, icons: Vec<IconDefinition>) -> Result<Self> {
        let mut lookup = HashMap::with_capacity(icons.len());

        for (idx, icon) in icons.iter().enumerate() {
            if !categories.iter().any(|c| c.id == icon.category) {
                anyhow::bail!(
                    "Icon '{}' references unknown category '{}'",
                    icon.id,
                    icon.category
                );
            }
            if lookup.insert(icon.id.clone(), idx).is_some() {
                anyhow::bail!("Duplicate icon id '{}' in catalog", icon.id);
            }
        }

        Ok(Self {
            icons,
            categories,
            lookup,
        })
    }

    /// Gets an icon by catalog ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&IconDefinition> {
        self.lookup.get(id).map(|&idx| &self.icons[idx])
    }

    /// All icons in catalog order.
    #[must_use]
    pub fn icons(&self) -> &[IconDefinition] {
        &self.icons
    }

    /// All declared categories in display order (including empty ones).
    #[must_use]
    pub fn categories(&self) -> &[IconCategory] {
        &self.categories
    }

    /// Gets a category by ID.
    #[must_use]
    pub fn category(&self, id: &str) -> Option<&IconCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Icons of one category, in catalog order.
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a IconDefinition> {
        self.icons.iter().filter(move |icon| icon.category == category)
    }

    /// Categories paired with their icons, skipping empty categories.
    #[must_use]
    pub fn grouped(&self) -> Vec<(&IconCategory, Vec<&IconDefinition>)> {
        self.categories
            .iter()
            .map(|cat| (cat, self.in_category(&cat.id).collect::<Vec<_>>()))
            .filter(|(_, icons)| !icons.is_empty())
            .collect()
    }

    /// Case-insensitive substring search over icon names.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&IconDefinition> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.icons.iter().collect();
        }

        self.icons
            .iter()
            .filter(|icon| icon.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Number of icons in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    /// True when the catalog holds no icons.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_embedded_catalog() {
        let catalog = IconCatalog::load().unwrap();

        assert_eq!(catalog.len(), 70);
        assert_eq!(catalog.categories().len(), 9);
        assert_eq!(catalog.get("1").unwrap().name, "Bulb 1");
        assert_eq!(catalog.get("12").unwrap().name, "Lamp 2");
        assert_eq!(catalog.get("70").unwrap().category, "appliances");
        assert!(catalog.get("71").is_none());
    }

    #[test]
    fn test_in_category_keeps_catalog_order() {
        let catalog = IconCatalog::load().unwrap();
        let fans: Vec<_> = catalog.in_category("fans").collect();

        assert_eq!(fans.len(), 13);
        assert_eq!(fans[0].name, "Fan 1");
        assert_eq!(fans[12].name, "Fan 13");
    }

    #[test]
    fn test_grouped_skips_empty_categories() {
        let catalog = IconCatalog::load().unwrap();
        let grouped = catalog.grouped();

        assert_eq!(grouped.len(), 6);
        assert_eq!(grouped[0].0.id, "accessories");
        assert!(grouped.iter().all(|(cat, _)| cat.id != "security"));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = IconCatalog::load().unwrap();

        let lamps = catalog.search("LAMP 1");
        let names: Vec<_> = lamps.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Lamp 1", "Lamp 10", "Lamp 11", "Lamp 12"]);

        assert_eq!(catalog.search("  ").len(), 70);
        assert!(catalog.search("toaster").is_empty());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let categories = vec![IconCategory {
            id: "lamps".to_string(),
            name: "Lamps".to_string(),
        }];
        let icon = IconDefinition::new("1", "Lamp", "icons/1.png", "lamps");

        assert!(IconCatalog::from_parts(categories, vec![icon.clone(), icon]).is_err());
    }

    #[test]
    fn test_rejects_unknown_category() {
        let icon = IconDefinition::new("1", "Lamp", "icons/1.png", "lamps");
        assert!(IconCatalog::from_parts(Vec::new(), vec![icon]).is_err());
    }
}
