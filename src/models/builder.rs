//! Builder configuration: panel size, variant, glass and frame selections.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Module width of the physical panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PanelSize {
    /// 2-module panel
    #[serde(rename = "2")]
    Two,
    /// 4-module panel
    #[serde(rename = "4")]
    Four,
    /// 6-module panel
    #[serde(rename = "6")]
    Six,
    /// 8-module panel
    #[serde(rename = "8")]
    Eight,
}

impl PanelSize {
    /// All sizes in catalog order.
    pub const ALL: [Self; 4] = [Self::Two, Self::Four, Self::Six, Self::Eight];

    /// Module count as shown to the user (2, 4, 6 or 8).
    #[must_use]
    pub const fn modules(self) -> u8 {
        match self {
            Self::Two => 2,
            Self::Four => 4,
            Self::Six => 6,
            Self::Eight => 8,
        }
    }

    /// Short label used in keys and filenames ("2", "4", ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Two => "2",
            Self::Four => "4",
            Self::Six => "6",
            Self::Eight => "8",
        }
    }
}

impl fmt::Display for PanelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Module", self.modules())
    }
}

impl FromStr for PanelSize {
    type Err = String;

    /// Accepts "4", "4 module" or "4-module" (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let digits = lowered
            .strip_suffix("module")
            .map_or(lowered.as_str(), |rest| rest.trim_end_matches([' ', '-']))
            .trim();

        match digits {
            "2" => Ok(Self::Two),
            "4" => Ok(Self::Four),
            "6" => Ok(Self::Six),
            "8" => Ok(Self::Eight),
            _ => Err(format!(
                "Invalid panel size '{}'. Must be one of: 2, 4, 6, 8",
                s.trim()
            )),
        }
    }
}

/// Glass (colour theme) of the panel front. Affects rendering only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Glass {
    /// Black glass (fallback for unknown names)
    #[default]
    Black,
    /// White glass
    White,
}

impl Glass {
    /// All glass options in display order.
    pub const ALL: [Self; 2] = [Self::Black, Self::White];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "Black",
            Self::White => "White",
        }
    }

    /// Parses a glass name, falling back to [`Glass::Black`] for unknown names.
    #[must_use]
    pub fn parse_lenient(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "white" => Self::White,
            _ => Self::Black,
        }
    }

    /// Whether icons should be drawn white on this glass.
    #[must_use]
    pub const fn uses_white_icons(self) -> bool {
        matches!(self, Self::Black)
    }
}

impl From<String> for Glass {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl From<Glass> for String {
    fn from(value: Glass) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for Glass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Frame (trim style) around the panel. Affects rendering only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Frame {
    /// Black frame (fallback for unknown names)
    #[default]
    Black,
    /// Gold frame
    Gold,
    /// Silver frame
    Silver,
    /// White frame
    White,
}

impl Frame {
    /// All frame options in display order.
    pub const ALL: [Self; 4] = [Self::Black, Self::Gold, Self::Silver, Self::White];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "Black",
            Self::Gold => "Gold",
            Self::Silver => "Silver",
            Self::White => "White",
        }
    }

    /// Parses a frame name, falling back to [`Frame::Black`] for unknown names.
    #[must_use]
    pub fn parse_lenient(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "gold" => Self::Gold,
            "silver" => Self::Silver,
            "white" => Self::White,
            _ => Self::Black,
        }
    }
}

impl From<String> for Frame {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl From<Frame> for String {
    fn from(value: Frame) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The user's independent panel selections.
///
/// Size and variant jointly determine the layout descriptor; glass and
/// frame only affect rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Module size
    pub size: PanelSize,
    /// Variant name as offered by the catalog (free-form, unknown names fall back)
    pub variant: String,
    /// Glass colour
    #[serde(default)]
    pub glass: Glass,
    /// Frame trim
    #[serde(default = "default_frame")]
    pub frame: Frame,
}

/// Frame selected when a config omits one (Silver)
const fn default_frame() -> Frame {
    Frame::Silver
}

impl BuilderConfig {
    /// Creates a configuration with default glass and frame.
    pub fn new(size: PanelSize, variant: impl Into<String>) -> Self {
        Self {
            size,
            variant: variant.into(),
            glass: Glass::default(),
            frame: default_frame(),
        }
    }

    /// Sets the glass colour.
    #[must_use]
    pub const fn with_glass(mut self, glass: Glass) -> Self {
        self.glass = glass;
        self
    }

    /// Sets the frame trim.
    #[must_use]
    pub const fn with_frame(mut self, frame: Frame) -> Self {
        self.frame = frame;
        self
    }
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self::new(PanelSize::Four, "Standard")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_size_from_str() {
        assert_eq!("4".parse::<PanelSize>(), Ok(PanelSize::Four));
        assert_eq!(" 8 ".parse::<PanelSize>(), Ok(PanelSize::Eight));
        assert_eq!("2 Module".parse::<PanelSize>(), Ok(PanelSize::Two));
        assert_eq!("6-module".parse::<PanelSize>(), Ok(PanelSize::Six));
        assert!("10".parse::<PanelSize>().is_err());
        assert!("".parse::<PanelSize>().is_err());
    }

    #[test]
    fn test_panel_size_serde_uses_digits() {
        let json = serde_json::to_string(&PanelSize::Six).unwrap();
        assert_eq!(json, "\"6\"");

        let size: PanelSize = serde_json::from_str("\"2\"").unwrap();
        assert_eq!(size, PanelSize::Two);
    }

    #[test]
    fn test_glass_parse_falls_back_to_black() {
        assert_eq!(Glass::parse_lenient("White"), Glass::White);
        assert_eq!(Glass::parse_lenient("white"), Glass::White);
        assert_eq!(Glass::parse_lenient("Clear"), Glass::Black);
        assert!(Glass::Black.uses_white_icons());
        assert!(!Glass::White.uses_white_icons());
    }

    #[test]
    fn test_frame_parse_falls_back_to_black() {
        assert_eq!(Frame::parse_lenient("Gold"), Frame::Gold);
        assert_eq!(Frame::parse_lenient(" silver"), Frame::Silver);
        assert_eq!(Frame::parse_lenient("chrome"), Frame::Black);
    }

    #[test]
    fn test_builder_config_defaults() {
        let config = BuilderConfig::default();
        assert_eq!(config.size, PanelSize::Four);
        assert_eq!(config.variant, "Standard");
        assert_eq!(config.glass, Glass::Black);
        assert_eq!(config.frame, Frame::Silver);
    }

    #[test]
    fn test_builder_config_deserialize_partial() {
        let config: BuilderConfig =
            serde_json::from_str(r#"{"size": "2", "variant": "4 switches"}"#).unwrap();
        assert_eq!(config.size, PanelSize::Two);
        assert_eq!(config.glass, Glass::Black);
        assert_eq!(config.frame, Frame::Silver);
    }
}
