//! Job data structures.

use std::path::PathBuf;

/// A unit of work binding one pending part to an output directory.
///
/// Jobs are fire-and-forget: once dispatched there is no further
/// lifecycle tracking, and the presence of `output_dir` on disk is the
/// only durable signal that the part was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    /// Part number, doubles as the job identity.
    pub part_number: String,
    /// Path to the input part file.
    pub input: PathBuf,
    /// Directory the rendered images are written to.
    pub output_dir: PathBuf,
}
