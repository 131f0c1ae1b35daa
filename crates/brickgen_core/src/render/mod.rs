//! Randomized scene generation and the render backend boundary.
//!
//! The randomizer produces N independently sampled scenes for one part
//! and drives the backend once per scene. The backend itself is a black
//! box: it consumes a scene and produces one raster image file.

mod backend;
mod randomizer;
mod scene;

pub use backend::{CommandBackend, RenderBackend, RenderError, RenderResult};
pub use randomizer::{list_background_images, render_part};
pub use scene::{SceneParams, SceneSampler};
