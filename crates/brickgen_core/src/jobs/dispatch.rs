//! Sequential dispatch of render jobs to an external process.
//!
//! Each job becomes one invocation of the `brickgen-render` binary,
//! built as an explicit argument list so paths with embedded whitespace
//! survive intact. Jobs run strictly one at a time; the first failure
//! aborts the remaining batch.

use std::io;
use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;

use super::types::RenderJob;

/// Errors raised while dispatching jobs.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The render process could not be spawned at all.
    #[error("Failed to spawn render process for part {part_number}: {source}")]
    Spawn {
        part_number: String,
        #[source]
        source: io::Error,
    },

    /// The render process ran but exited non-zero, meaning some image
    /// failed to render. The batch stops at the first failing part.
    #[error("Render process for part {part_number} exited with code {exit_code}")]
    JobFailed {
        part_number: String,
        exit_code: i32,
    },
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Dispatches render jobs to the per-part render binary.
pub struct Dispatcher {
    /// Program executed once per job.
    render_program: PathBuf,
    /// Images rendered per part.
    images_per_part: u32,
    /// Optional directory of background images, passed through.
    backgrounds: Option<PathBuf>,
    /// Optional config file path, passed through.
    config_path: Option<PathBuf>,
}

impl Dispatcher {
    /// Create a new dispatcher.
    pub fn new(
        render_program: PathBuf,
        images_per_part: u32,
        backgrounds: Option<PathBuf>,
        config_path: Option<PathBuf>,
    ) -> Self {
        Self {
            render_program,
            images_per_part,
            backgrounds,
            config_path,
        }
    }

    /// Locate the per-part render binary.
    ///
    /// Prefers a `brickgen-render` sitting next to the current
    /// executable (the normal cargo layout); otherwise the bare name is
    /// returned and resolution is left to `PATH`.
    pub fn default_render_program() -> PathBuf {
        let name = format!("brickgen-render{}", std::env::consts::EXE_SUFFIX);
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let sibling = dir.join(&name);
                if sibling.exists() {
                    return sibling;
                }
            }
        }
        PathBuf::from(name)
    }

    /// Run every job in order, waiting for each to finish before the
    /// next starts. Stops at the first failure.
    pub fn dispatch_all(&self, jobs: &[RenderJob]) -> DispatchResult<()> {
        for (i, job) in jobs.iter().enumerate() {
            tracing::info!(
                "Rendering part {} ({}/{})",
                job.part_number,
                i + 1,
                jobs.len()
            );
            self.dispatch(job)?;
        }
        Ok(())
    }

    /// Run a single job synchronously to completion.
    pub fn dispatch(&self, job: &RenderJob) -> DispatchResult<()> {
        let mut cmd = self.build_command(job);
        tracing::debug!("Running: {:?}", cmd);

        let status = cmd.status().map_err(|source| {
            tracing::error!(
                "Failed to spawn render process for part {}: {}",
                job.part_number,
                source
            );
            DispatchError::Spawn {
                part_number: job.part_number.clone(),
                source,
            }
        })?;

        if !status.success() {
            return Err(DispatchError::JobFailed {
                part_number: job.part_number.clone(),
                exit_code: status.code().unwrap_or(-1),
            });
        }

        Ok(())
    }

    /// Build the render invocation for one job.
    fn build_command(&self, job: &RenderJob) -> Command {
        let mut cmd = Command::new(&self.render_program);
        cmd.arg("--input").arg(&job.input);
        if let Some(backgrounds) = &self.backgrounds {
            cmd.arg("--backgrounds").arg(backgrounds);
        }
        cmd.arg("--count").arg(self.images_per_part.to_string());
        cmd.arg("--out").arg(&job.output_dir);
        if let Some(config) = &self.config_path {
            cmd.arg("--config").arg(config);
        }
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    fn sample_job() -> RenderJob {
        RenderJob {
            part_number: "3001".to_string(),
            input: PathBuf::from("/parts/3001.dat"),
            output_dir: PathBuf::from("/dataset/Brick/3001"),
        }
    }

    #[test]
    fn command_uses_explicit_argument_list() {
        let dispatcher = Dispatcher::new(
            PathBuf::from("brickgen-render"),
            5,
            Some(PathBuf::from("/bg images")),
            Some(PathBuf::from("brickgen.toml")),
        );

        let cmd = dispatcher.build_command(&sample_job());
        let args: Vec<OsString> = cmd.get_args().map(|a| a.to_os_string()).collect();
        assert_eq!(
            args,
            vec![
                OsString::from("--input"),
                OsString::from("/parts/3001.dat"),
                OsString::from("--backgrounds"),
                OsString::from("/bg images"),
                OsString::from("--count"),
                OsString::from("5"),
                OsString::from("--out"),
                OsString::from("/dataset/Brick/3001"),
                OsString::from("--config"),
                OsString::from("brickgen.toml"),
            ]
        );
    }

    #[test]
    fn optional_flags_are_omitted() {
        let dispatcher = Dispatcher::new(PathBuf::from("brickgen-render"), 1, None, None);

        let cmd = dispatcher.build_command(&sample_job());
        let args: Vec<OsString> = cmd.get_args().map(|a| a.to_os_string()).collect();
        assert!(!args.contains(&OsString::from("--backgrounds")));
        assert!(!args.contains(&OsString::from("--config")));
    }

    #[test]
    fn spawn_failure_aborts_batch() {
        let dispatcher = Dispatcher::new(
            PathBuf::from("/nonexistent/brickgen-render"),
            1,
            None,
            None,
        );

        let err = dispatcher.dispatch_all(&[sample_job()]).unwrap_err();
        assert!(matches!(err, DispatchError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_fails_the_job() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fake-render");
        std::fs::write(&script, "#!/bin/sh\nexit 7\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let dispatcher = Dispatcher::new(script, 1, None, None);
        let err = dispatcher.dispatch(&sample_job()).unwrap_err();
        assert!(matches!(err, DispatchError::JobFailed { exit_code: 7, .. }));
    }

    #[cfg(unix)]
    #[test]
    fn successful_child_completes_batch() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fake-render");
        std::fs::write(&script, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let dispatcher = Dispatcher::new(script, 1, None, None);
        dispatcher.dispatch_all(&[sample_job()]).unwrap();
    }
}
