//! Display configuration passed explicitly into formatting.

use serde::{Deserialize, Serialize};

/// Presentation settings for rendering weights and statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Unit suffix used for every weight value
    #[serde(default)]
    pub unit: WeightUnit,

    /// Light/dark theme
    #[serde(default)]
    pub theme: ThemePreference,
}

/// Unit suffix for displayed weights.
///
/// Values are never converted; the unit only labels them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeightUnit {
    #[serde(rename = "lb")]
    #[default]
    /// Pounds
    Pounds,
    #[serde(rename = "kg")]
    /// Kilograms
    Kilograms,
}

impl WeightUnit {
    /// Short suffix appended to formatted values.
    pub fn suffix(&self) -> &'static str {
        match self {
            WeightUnit::Pounds => "lb",
            WeightUnit::Kilograms => "kg",
        }
    }

    /// Spelled-out plural name, for spoken labels.
    pub fn name(&self) -> &'static str {
        match self {
            WeightUnit::Pounds => "pounds",
            WeightUnit::Kilograms => "kilograms",
        }
    }
}

/// Theme preference, one per installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThemePreference {
    /// Dark mode enabled
    pub is_dark_mode: bool,
}

impl ThemePreference {
    /// Flip between light and dark.
    pub fn toggle(&mut self) {
        self.is_dark_mode = !self.is_dark_mode;
    }
}
