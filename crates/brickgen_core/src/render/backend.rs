//! Render backend boundary.
//!
//! The rasterization engine is an external collaborator: it consumes
//! one scene plus the output format settings and produces one image
//! file. Its failure behavior is opaque; any error propagates up and
//! aborts the remaining images of the part.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use crate::config::ImageSettings;

use super::scene::SceneParams;

/// Errors raised at the render boundary.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The backend process could not be run.
    #[error("Failed to run render backend '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The backend ran but did not produce the image.
    #[error("Render backend '{program}' failed for {}: {message}", .output.display())]
    Backend {
        program: String,
        output: PathBuf,
        message: String,
    },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// The boundary the scene randomizer drives, once per image.
pub trait RenderBackend {
    /// Render `part` under `scene` to the image file at `output`.
    fn render(&self, part: &Path, scene: &SceneParams, output: &Path) -> RenderResult<()>;
}

/// Backend that invokes an external raster tool per image.
///
/// Scene and format values travel as an explicit argument list; the
/// tool is expected to write a JPEG in RGB color mode to the given
/// output path and exit zero.
pub struct CommandBackend {
    program: String,
    image: ImageSettings,
}

impl CommandBackend {
    /// Create a backend around the configured raster program.
    pub fn new(program: impl Into<String>, image: ImageSettings) -> Self {
        Self {
            program: program.into(),
            image,
        }
    }

    /// Build the raster invocation for one image.
    fn build_command(&self, part: &Path, scene: &SceneParams, output: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--model").arg(part);
        cmd.arg("--out").arg(output);
        cmd.arg("--width").arg(self.image.width.to_string());
        cmd.arg("--height").arg(self.image.height.to_string());
        cmd.arg("--quality").arg(self.image.jpeg_compression.to_string());
        cmd.arg("--scale").arg(scene.scale.to_string());
        cmd.arg("--rotate").arg(join_floats(&scene.rotation));
        cmd.arg("--position").arg(join_floats(&scene.position));
        cmd.arg("--color").arg(
            scene
                .color
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(","),
        );
        if let Some(background) = &scene.background {
            cmd.arg("--background").arg(background);
        }
        cmd
    }
}

fn join_floats(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

impl RenderBackend for CommandBackend {
    fn render(&self, part: &Path, scene: &SceneParams, output: &Path) -> RenderResult<()> {
        let mut cmd = self.build_command(part, scene, output);
        tracing::debug!("Running: {:?}", cmd);

        let result = cmd.output().map_err(|source| RenderError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(RenderError::Backend {
                program: self.program.clone(),
                output: output.to_path_buf(),
                message: stderr.trim().to_string(),
            });
        }

        Ok(())
    }
}
