//! Run configuration
//!
//! Values come from the built-in defaults, optionally replaced by a TOML file, then by
//! command-line flags. The result is validated once and resolved against the input
//! image's size before any scanning happens.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::assembly::Alignment;
use crate::canvas::Color;
use crate::errors::{HalftoneError, Result};

/// Share of the shorter image dimension used as the default kernel size
const KERNEL_RATIO: f64 = 0.007;

/// Renderer selection
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Rotated lattice scan drawn as sigmoid ribbons
    #[default]
    Ribbons,
    /// Axis-aligned grid drawn as centred bars
    Blocks,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Ribbons => write!(f, "ribbons"),
            Mode::Blocks => write!(f, "blocks"),
        }
    }
}

/// User-facing settings, as read from a file or assembled from flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HalftoneConfig {
    /// Output square side in pixels
    pub side: u32,

    /// Kernel side in input pixels; derived from the image size when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kernel: Option<u32>,

    pub bg_color: Color,
    pub fg_color: Color,

    /// Padding above and below every ribbon slice
    pub alpha: f64,

    /// Lattice rotation in degrees
    pub angle: f64,

    /// Points per ribbon transition
    pub smoothness: usize,

    /// Logistic steepness of ribbon transitions
    pub steepness: f64,

    pub verbose: bool,

    /// Apply adaptive histogram equalisation before scanning
    pub contrast: bool,

    pub mode: Mode,
    pub align: Alignment,
}

impl Default for HalftoneConfig {
    fn default() -> Self {
        Self {
            side: 20,
            kernel: None,
            bg_color: Color::WHITE,
            fg_color: Color::BLACK,
            alpha: 1.2,
            angle: 20.0,
            smoothness: 10,
            steepness: 8.0,
            verbose: true,
            contrast: true,
            mode: Mode::default(),
            align: Alignment::default(),
        }
    }
}

/// `ceil(0.007 * min(width, height))`, at least 1
pub fn default_kernel(width: u32, height: u32) -> u32 {
    let shorter = f64::from(width.min(height));
    ((shorter * KERNEL_RATIO).ceil() as u32).max(1)
}

impl HalftoneConfig {
    /// Read a TOML file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| HalftoneError::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| HalftoneError::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| HalftoneError::invalid("config", e.to_string()))
    }

    /// Check every value against its allowed range
    pub fn validate(&self) -> Result<()> {
        if self.side == 0 {
            return Err(HalftoneError::invalid("side", "must be a positive integer"));
        }
        if self.kernel == Some(0) {
            return Err(HalftoneError::invalid("kernel", "must be a positive integer"));
        }
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(HalftoneError::invalid(
                "alpha",
                format!("must be greater than 0, got {}", self.alpha),
            ));
        }
        if !self.angle.is_finite() {
            return Err(HalftoneError::invalid("angle", "must be a finite number of degrees"));
        }
        if self.smoothness < 2 {
            return Err(HalftoneError::invalid(
                "smoothness",
                format!("must be at least 2, got {}", self.smoothness),
            ));
        }
        if !(self.steepness.is_finite() && self.steepness > 0.0) {
            return Err(HalftoneError::invalid(
                "steepness",
                format!("must be greater than 0, got {}", self.steepness),
            ));
        }
        Ok(())
    }

    /// Validate and fix the image-dependent values
    pub fn resolve(&self, width: u32, height: u32) -> Result<Settings> {
        self.validate()?;
        Ok(Settings {
            side: self.side,
            kernel: self.kernel.unwrap_or_else(|| default_kernel(width, height)),
            bg_color: self.bg_color,
            fg_color: self.fg_color,
            alpha: self.alpha,
            angle: self.angle,
            smoothness: self.smoothness,
            steepness: self.steepness,
            contrast: self.contrast,
            mode: self.mode,
            align: self.align,
        })
    }
}

/// Validated settings for one image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub side: u32,
    pub kernel: u32,
    pub bg_color: Color,
    pub fg_color: Color,
    pub alpha: f64,
    pub angle: f64,
    pub smoothness: usize,
    pub steepness: f64,
    pub contrast: bool,
    pub mode: Mode,
    pub align: Alignment,
}

impl Settings {
    /// Output pixels per input pixel
    pub fn zoom(&self) -> f64 {
        f64::from(self.side) / f64::from(self.kernel)
    }
}
