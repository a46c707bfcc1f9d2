//! Configuration — YAML-backed settings for the volume pipeline
//!
//! Every knob the canonical run bakes in (grid size, sinc radius, window
//! shape, slice depth, tone-map scale, output path) is surfaced here with
//! the canonical values as defaults, so an empty or absent file reproduces
//! the reference run exactly.
//!
//! ## Configuration Search Path
//!
//! Configuration is loaded from the first source found:
//! 1. Path given on the command line
//! 2. Path in the `SINCVOL_CONFIG` environment variable
//! 3. `./sincvol.yaml` (current directory)
//! 4. Built-in defaults
//!
//! ## Example Configuration
//!
//! ```yaml
//! grid:
//!   nx: 256
//!   ny: 256
//!   nz: 256
//! kernel:
//!   radius: 60.0
//!   window_alpha: 0.54
//! render:
//!   slice_depth: 128
//!   scale: 0.0
//! output: "o.pgm"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::logging::LogConfig;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "SINCVOL_CONFIG";

/// Error type for configuration resolution.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// An explicitly named config file does not exist
    Missing(String),
    /// The config file exists but could not be read
    Unreadable(String),
    /// The YAML does not deserialize into the pipeline schema
    Malformed(String),
    /// A parsed value violates a pipeline contract
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(path) => write!(f, "no pipeline config at {}", path),
            ConfigError::Unreadable(detail) => write!(f, "pipeline config unreadable: {}", detail),
            ConfigError::Malformed(detail) => {
                write!(f, "pipeline config does not match the schema: {}", detail)
            }
            ConfigError::Invalid(detail) => {
                write!(f, "pipeline config breaks a contract: {}", detail)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Grid dimensions. This design requires a cube; the per-axis fields exist
/// so the wire format matches the grid contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            nx: 256,
            ny: 256,
            nz: 256,
        }
    }
}

/// Windowed-sinc generator parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Lobe frequency of the sinc (canonical run: 60.0)
    pub radius: f32,
    /// Hamming window shape parameter
    pub window_alpha: f32,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            radius: 60.0,
            window_alpha: crate::sinc_kernel::HAMMING_ALPHA,
        }
    }
}

/// Slice extraction and tone mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Depth of the rendered slice; `None` selects the mid-depth nz/2
    pub slice_depth: Option<usize>,
    /// Tone-map scale: 0 selects magnitude mode, anything else scaled-real
    pub scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            slice_depth: None,
            scale: 0.0,
        }
    }
}

/// Top-level pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub grid: GridConfig,
    pub kernel: KernelConfig,
    pub render: RenderConfig,
    /// Output raster path
    pub output: PathBuf,
    pub log: LogConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            kernel: KernelConfig::default(),
            render: RenderConfig::default(),
            output: PathBuf::from("o.pgm"),
            log: LogConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Resolve configuration from the search path, falling back to
    /// defaults when no source exists. An explicitly named file that is
    /// missing is an error rather than a silent fallback.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::from_file(Path::new(&path));
        }
        let local = Path::new("sincvol.yaml");
        if local.exists() {
            return Self::from_file(local);
        }
        Ok(Self::default())
    }

    /// Load from a specific YAML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::Missing(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Unreadable(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }

    /// Parse from a YAML string. Missing fields take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    /// The effective slice depth: explicit value or the mid-depth.
    pub fn slice_depth(&self) -> usize {
        self.render.slice_depth.unwrap_or(self.grid.nz / 2)
    }

    /// Check the configuration against the pipeline's contracts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let GridConfig { nx, ny, nz } = self.grid;
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid dimensions must be positive, got {}x{}x{}",
                nx, ny, nz
            )));
        }
        if nx != ny || ny != nz {
            return Err(ConfigError::Invalid(format!(
                "grid must be cubic, got {}x{}x{}",
                nx, ny, nz
            )));
        }
        if !self.kernel.radius.is_finite() || self.kernel.radius <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "kernel radius must be a positive finite value, got {}",
                self.kernel.radius
            )));
        }
        if !self.kernel.window_alpha.is_finite()
            || !(0.0..=1.0).contains(&self.kernel.window_alpha)
        {
            return Err(ConfigError::Invalid(format!(
                "window alpha must lie in [0, 1], got {}",
                self.kernel.window_alpha
            )));
        }
        if let Some(z0) = self.render.slice_depth {
            if z0 >= nz {
                return Err(ConfigError::Invalid(format!(
                    "slice depth {} out of range for grid depth {}",
                    z0, nz
                )));
            }
        }
        if !self.render.scale.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "render scale must be finite, got {}",
                self.render.scale
            )));
        }
        Ok(())
    }
}
