//! Icon catalog entries and placed icon instances.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Immutable catalog entry for an icon that can be placed on a panel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IconDefinition {
    /// Catalog identifier (e.g., "12")
    pub id: String,
    /// Display name (e.g., "Lamp 2")
    pub name: String,
    /// Image reference resolved by the rendering layer (e.g., "icons/12.png")
    pub image: String,
    /// Category ID (e.g., "lamps")
    pub category: String,
}

impl IconDefinition {
    /// Creates a new icon definition.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        image: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: image.into(),
            category: category.into(),
        }
    }
}

/// Unique identifier of one placed copy of an icon.
///
/// Two placements of the same [`IconDefinition`] always get different
/// instance IDs, so removal by ID never aliases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    /// Generates a fresh random instance ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for InstanceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for InstanceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An icon definition placed on the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconInstance {
    /// Per-placement identifier
    pub instance_id: InstanceId,
    /// The catalog entry this instance was created from
    #[serde(flatten)]
    pub icon: IconDefinition,
}

impl IconInstance {
    /// Creates a new instance of `icon` with a freshly generated ID.
    #[must_use]
    pub fn new(icon: IconDefinition) -> Self {
        Self {
            instance_id: InstanceId::generate(),
            icon,
        }
    }

    /// Display name of the underlying icon.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.icon.name
    }
}
