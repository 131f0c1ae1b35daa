//! Per-image scene parameter sampling.
//!
//! Every rendered image gets a fresh [`SceneParams`] value; nothing is
//! carried over between iterations, so a leftover backdrop or a stale
//! transform cannot leak into the next image.

use std::path::PathBuf;

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::config::{ConfigError, ConfigResult, RotationInterval, SceneSettings};

/// The randomized pose, scale, color, and backdrop for one image.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneParams {
    /// Uniform scale factor applied to the part.
    pub scale: f64,
    /// Euler rotation in radians, one angle per axis.
    pub rotation: [f64; 3],
    /// Part location. The y component is always 0; depth is controlled
    /// entirely via scale.
    pub position: [f64; 3],
    /// Part material color, RGBA with each channel in [0, 1].
    pub color: [f32; 4],
    /// Backdrop image for this frame, if any.
    pub background: Option<PathBuf>,
}

/// Samples [`SceneParams`] values from the configured ranges.
///
/// Construction pre-parses the palette and the position distribution so
/// sampling itself is infallible.
pub struct SceneSampler {
    zoom_min: f64,
    zoom_max: f64,
    intervals: Vec<RotationInterval>,
    position: Normal<f64>,
    palette: Vec<[f32; 3]>,
    backgrounds: Vec<PathBuf>,
}

impl SceneSampler {
    /// Create a sampler for the given scene settings and background
    /// candidates (already filtered by extension; empty means the
    /// default flat backdrop).
    pub fn new(scene: &SceneSettings, backgrounds: Vec<PathBuf>) -> ConfigResult<Self> {
        let palette = scene
            .color
            .iter()
            .map(|entry| {
                hex_to_rgb(entry).ok_or_else(|| {
                    ConfigError::invalid(
                        "scene.color",
                        format!("'{}' is not a 6-hex-digit color", entry),
                    )
                })
            })
            .collect::<ConfigResult<Vec<_>>>()?;
        if palette.is_empty() {
            return Err(ConfigError::invalid("scene.color", "palette is empty"));
        }

        if scene.rotation_intervals.is_empty() {
            return Err(ConfigError::invalid(
                "scene.rotation_intervals",
                "no rotation intervals configured",
            ));
        }

        let position = Normal::new(scene.pos_mean, scene.pos_sigma).map_err(|e| {
            ConfigError::invalid("scene.pos_sigma", format!("bad position gaussian: {}", e))
        })?;

        Ok(Self {
            zoom_min: scene.zoom_min,
            zoom_max: scene.zoom_max,
            intervals: scene.rotation_intervals.clone(),
            position,
            palette,
            backgrounds,
        })
    }

    /// Sample one fresh set of scene parameters.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SceneParams {
        let scale = rng.random_range(self.zoom_min..=self.zoom_max);

        let rotation = [
            self.sample_angle(rng),
            self.sample_angle(rng),
            self.sample_angle(rng),
        ];

        let pos_x = self.position.sample(rng);
        let pos_z = self.position.sample(rng);

        let [r, g, b] = self.palette[rng.random_range(0..self.palette.len())];

        let background = if self.backgrounds.is_empty() {
            None
        } else {
            Some(self.backgrounds[rng.random_range(0..self.backgrounds.len())].clone())
        };

        SceneParams {
            scale,
            rotation,
            position: [pos_x, 0.0, pos_z],
            color: [r, g, b, 1.0],
            background,
        }
    }

    /// Pick one angular window uniformly, then sample uniformly inside
    /// it. A single uniform range over the full turn would cluster
    /// samples near degenerate viewing angles.
    fn sample_angle<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let window = self.intervals[rng.random_range(0..self.intervals.len())];
        rng.random_range(window.low..window.high)
    }
}

/// Convert a 6-hex-digit triplet to normalized RGB.
fn hex_to_rgb(hex: &str) -> Option<[f32; 3]> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
    ])
}
