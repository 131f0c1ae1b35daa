//! Render configuration.
//!
//! The config is loaded once at process start into an explicit
//! [`RenderConfig`] value and passed by reference into the planner and
//! the scene sampler. There is no ambient global configuration state.

mod loader;
mod settings;

pub use loader::{ConfigError, ConfigResult};
pub use settings::{ImageSettings, RenderConfig, RendererSettings, RotationInterval, SceneSettings};
