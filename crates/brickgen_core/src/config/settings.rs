//! Render settings with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Every field has a default so a partial (or missing) config file still
//! yields a usable configuration.

use serde::{Deserialize, Serialize};

use super::loader::{ConfigError, ConfigResult};

/// Root configuration for a render run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RenderConfig {
    /// Output image format settings.
    #[serde(default)]
    pub image: ImageSettings,

    /// Randomized scene sampling ranges.
    #[serde(default)]
    pub scene: SceneSettings,

    /// External render backend settings.
    #[serde(default)]
    pub renderer: RendererSettings,
}

impl RenderConfig {
    /// Validate the loaded configuration.
    ///
    /// Checks the structural constraints the sampler relies on: exactly
    /// four disjoint rotation intervals, an ordered zoom range, a JPEG
    /// quality within 0-100, and a non-empty palette of 6-hex-digit
    /// entries.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.image.jpeg_compression > 100 {
            return Err(ConfigError::invalid(
                "image.jpeg_compression",
                format!("quality {} exceeds 100", self.image.jpeg_compression),
            ));
        }

        if self.scene.zoom_min > self.scene.zoom_max {
            return Err(ConfigError::invalid(
                "scene.zoom_min",
                format!(
                    "zoom_min {} exceeds zoom_max {}",
                    self.scene.zoom_min, self.scene.zoom_max
                ),
            ));
        }

        if self.scene.pos_sigma < 0.0 {
            return Err(ConfigError::invalid(
                "scene.pos_sigma",
                format!("sigma {} is negative", self.scene.pos_sigma),
            ));
        }

        let intervals = &self.scene.rotation_intervals;
        if intervals.len() != 4 {
            return Err(ConfigError::invalid(
                "scene.rotation_intervals",
                format!("expected 4 intervals, got {}", intervals.len()),
            ));
        }
        for iv in intervals {
            if iv.low >= iv.high {
                return Err(ConfigError::invalid(
                    "scene.rotation_intervals",
                    format!("interval [{}, {}) is empty", iv.low, iv.high),
                ));
            }
        }
        for (i, a) in intervals.iter().enumerate() {
            for b in intervals.iter().skip(i + 1) {
                if a.low < b.high && b.low < a.high {
                    return Err(ConfigError::invalid(
                        "scene.rotation_intervals",
                        format!(
                            "intervals [{}, {}) and [{}, {}) overlap",
                            a.low, a.high, b.low, b.high
                        ),
                    ));
                }
            }
        }

        if self.scene.color.is_empty() {
            return Err(ConfigError::invalid("scene.color", "palette is empty"));
        }
        for entry in &self.scene.color {
            if entry.len() != 6 || !entry.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(ConfigError::invalid(
                    "scene.color",
                    format!("'{}' is not a 6-hex-digit color", entry),
                ));
            }
        }

        Ok(())
    }
}

/// Output image resolution and encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSettings {
    /// Rendered image width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Rendered image height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,

    /// JPEG quality, 0-100.
    #[serde(default = "default_jpeg_compression")]
    pub jpeg_compression: u8,
}

fn default_width() -> u32 {
    224
}

fn default_height() -> u32 {
    224
}

fn default_jpeg_compression() -> u8 {
    90
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            jpeg_compression: default_jpeg_compression(),
        }
    }
}

/// One angular sampling window, `[low, high)` in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationInterval {
    pub low: f64,
    pub high: f64,
}

/// Randomization ranges for per-image scene parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSettings {
    /// Lower bound of the uniform scale range.
    #[serde(default = "default_zoom_min")]
    pub zoom_min: f64,

    /// Upper bound of the uniform scale range.
    #[serde(default = "default_zoom_max")]
    pub zoom_max: f64,

    /// Mean of the Gaussian position offset.
    #[serde(default)]
    pub pos_mean: f64,

    /// Sigma of the Gaussian position offset.
    #[serde(default = "default_pos_sigma")]
    pub pos_sigma: f64,

    /// The four disjoint angular windows rotation is sampled from.
    #[serde(default = "default_rotation_intervals")]
    pub rotation_intervals: Vec<RotationInterval>,

    /// Part color palette as 6-hex-digit RGB triplets.
    #[serde(default = "default_palette")]
    pub color: Vec<String>,
}

fn default_zoom_min() -> f64 {
    0.5
}

fn default_zoom_max() -> f64 {
    1.5
}

fn default_pos_sigma() -> f64 {
    0.1
}

fn default_rotation_intervals() -> Vec<RotationInterval> {
    vec![
        RotationInterval { low: 0.17, high: 1.40 },
        RotationInterval { low: 1.74, high: 2.97 },
        RotationInterval { low: 3.32, high: 4.54 },
        RotationInterval { low: 4.89, high: 6.11 },
    ]
}

fn default_palette() -> Vec<String> {
    // LDraw solid colors: red, blue, green, yellow, white, black.
    vec![
        "c91a09".to_string(),
        "0055bf".to_string(),
        "237841".to_string(),
        "f2cd37".to_string(),
        "ffffff".to_string(),
        "05131d".to_string(),
    ]
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            zoom_min: default_zoom_min(),
            zoom_max: default_zoom_max(),
            pos_mean: 0.0,
            pos_sigma: default_pos_sigma(),
            rotation_intervals: default_rotation_intervals(),
            color: default_palette(),
        }
    }
}

/// External render backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RendererSettings {
    /// Program the render adapter invokes for each image.
    #[serde(default = "default_program")]
    pub program: String,
}

fn default_program() -> String {
    "brick-raster".to_string()
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            program: default_program(),
        }
    }
}
