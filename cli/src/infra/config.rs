//! Fleet file loading from disk.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::config::FleetFile;
use crate::domain::error::ValidationError;

/// Environment variable naming the fleet file.
pub const CONFIG_ENV: &str = "PORTFLEET_CONFIG";

/// Locates and parses the fleet file.
pub struct YamlFleetLoader;

impl YamlFleetLoader {
    /// Path that would be loaded, if any: the explicit path, then
    /// `$PORTFLEET_CONFIG`, then `<config dir>/portfleet/fleet.yaml` when it
    /// exists.
    #[must_use]
    pub fn path(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Some(val) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
            return Some(PathBuf::from(val));
        }
        let default = dirs::config_dir()?.join("portfleet").join("fleet.yaml");
        default.exists().then_some(default)
    }

    /// Load the fleet file. No file at all yields an empty `FleetFile`.
    ///
    /// # Errors
    ///
    /// Returns `PathNotReadable` if a named file cannot be read and
    /// `InvalidFleetFile` if it is not valid YAML for the schema.
    pub fn load(explicit: Option<&Path>) -> Result<FleetFile, ValidationError> {
        let Some(path) = Self::path(explicit) else {
            return Ok(FleetFile::default());
        };
        debug!(path = %path.display(), "loading fleet file");
        let Ok(content) = std::fs::read_to_string(&path) else {
            return Err(ValidationError::PathNotReadable {
                what: "Fleet file",
                path,
            });
        };
        if content.trim().is_empty() {
            return Ok(FleetFile::default());
        }
        serde_yaml::from_str(&content).map_err(|e| ValidationError::InvalidFleetFile {
            path,
            reason: e.to_string(),
        })
    }
}
