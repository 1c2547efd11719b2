use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::YearMonth;

/// Configuration for a maintenance workspace.
///
/// This struct holds settings that control how the store generates records
/// and how the views open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Length of generated record identifiers.
    ///
    /// Identifiers are random alphanumeric tokens; a candidate that is already
    /// in use in the target collection is discarded and regenerated.
    id_length: usize,

    /// The category given to a request whose equipment cannot be found.
    fallback_category: String,

    /// The month the calendar opens on when none is given.
    pub default_month: YearMonth,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            id_length: default_id_length(),
            fallback_category: default_fallback_category(),
            default_month: YearMonth::default(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the length of generated identifiers.
    #[must_use]
    pub const fn id_length(&self) -> usize {
        self.id_length
    }

    /// Sets the length of generated identifiers.
    pub const fn set_id_length(&mut self, length: usize) {
        self.id_length = length;
    }

    /// Returns the category used when a request's equipment is unknown.
    #[must_use]
    pub fn fallback_category(&self) -> &str {
        &self.fallback_category
    }

    /// Sets the category used when a request's equipment is unknown.
    pub fn set_fallback_category(&mut self, category: impl Into<String>) {
        self.fallback_category = category.into();
    }
}

const fn default_id_length() -> usize {
    9
}

fn default_fallback_category() -> String {
    "General".to_string()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_id_length")]
        id_length: usize,

        #[serde(default = "default_fallback_category")]
        fallback_category: String,

        #[serde(default)]
        default_month: YearMonth,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                id_length,
                fallback_category,
                default_month,
            } => Self {
                id_length,
                fallback_category,
                default_month,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            id_length: config.id_length,
            fallback_category: config.fallback_category,
            default_month: config.default_month,
        }
    }
}
