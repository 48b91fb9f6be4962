//! Converter settings with persistence
//!
//! Settings are read from `~/.config/glb2stl/settings.toml` unless a path is
//! given on the command line. Every field is optional.

use std::fs;
use std::path::{Path, PathBuf};

use glb2stl_assets::{
    ConvertOptions, FallbackOptions, Normals, OutputFormat, StlOptions, CONVERTED_HEADER,
    DEFAULT_SOLID_NAME,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// All converter settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub output: OutputSettings,
    pub fallback: FallbackSettings,
}

impl Settings {
    /// Get the default settings file path
    fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("glb2stl").join("settings.toml"))
    }

    /// Load settings from `path`, or from the default location if `None`.
    ///
    /// Missing or unreadable files fall back to defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => {
                    warn!("Could not determine config directory");
                    return Self::default();
                }
            },
        };

        if !path.exists() {
            debug!("No settings file at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Conversion options for the requested output format
    pub fn convert_options(&self, format: OutputFormat) -> ConvertOptions {
        ConvertOptions {
            stl: StlOptions {
                format,
                header: self.output.binary_header.clone(),
                solid_name: self.output.solid_name.clone(),
                normals: Normals::Computed,
            },
            fallback: FallbackOptions {
                max_vertices: self.fallback.max_vertices,
                max_triangles: self.fallback.max_triangles,
                header: self.fallback.header.clone(),
            },
        }
    }
}

/// Output file settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Name after `solid`/`endsolid` in text STL
    pub solid_name: String,
    /// Header text of binary STL (at most 80 bytes are kept)
    pub binary_header: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            solid_name: DEFAULT_SOLID_NAME.to_string(),
            binary_header: CONVERTED_HEADER.to_string(),
        }
    }
}

/// Fallback extraction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackSettings {
    /// Header text of fallback STL files
    pub header: String,
    /// Vertices kept from the raw float scan
    pub max_vertices: usize,
    /// Fan triangles kept
    pub max_triangles: usize,
}

impl Default for FallbackSettings {
    fn default() -> Self {
        let options = FallbackOptions::default();
        Self {
            header: options.header,
            max_vertices: options.max_vertices,
            max_triangles: options.max_triangles,
        }
    }
}
