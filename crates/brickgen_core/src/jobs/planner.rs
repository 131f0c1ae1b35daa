//! Job planning over the scanned catalog.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::catalog::Catalog;

use super::types::RenderJob;

/// Errors raised while planning jobs.
#[derive(Error, Debug)]
pub enum PlanError {
    /// The target category never showed up in the scan. Fatal: with no
    /// parts to render, the run is misconfigured.
    #[error("Category '{0}' not present in the scanned catalog")]
    CategoryMissing(String),

    #[error("I/O error under {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type for planning operations.
pub type PlanResult<T> = Result<T, PlanError>;

/// Plan render jobs for `category` into `output_root`.
///
/// A part is pending iff its part number is not already an entry name
/// directly under `<output_root>/<category>/`. The check is existence
/// only: a directory that exists counts as done no matter what it
/// contains, so reruns after a partial batch pick up exactly the parts
/// whose directory was never created. For each pending part the output
/// directory `<output_root>/<category>/<part_number>/` is created if
/// absent.
pub fn plan_jobs(
    catalog: &Catalog,
    category: &str,
    output_root: &Path,
) -> PlanResult<Vec<RenderJob>> {
    let parts = catalog
        .get(category)
        .ok_or_else(|| PlanError::CategoryMissing(category.to_string()))?;

    let category_dir = output_root.join(category);
    let done = existing_entry_names(&category_dir)?;

    let mut jobs = Vec::new();
    for part in parts {
        if done.contains(&part.part_number) {
            tracing::debug!("Part {} already rendered, skipping", part.part_number);
            continue;
        }

        let output_dir = category_dir.join(&part.part_number);
        if !output_dir.exists() {
            fs::create_dir_all(&output_dir).map_err(|source| PlanError::Io {
                path: output_dir.clone(),
                source,
            })?;
        }

        jobs.push(RenderJob {
            part_number: part.part_number.clone(),
            input: part.path.clone(),
            output_dir,
        });
    }

    tracing::info!(
        "Planned {} jobs for category '{}' ({} already done)",
        jobs.len(),
        category,
        parts.len() - jobs.len()
    );
    Ok(jobs)
}

/// List entry names directly under `dir`, or an empty set if the
/// directory does not exist yet (first run).
fn existing_entry_names(dir: &Path) -> PlanResult<BTreeSet<String>> {
    let mut names = BTreeSet::new();
    if !dir.exists() {
        return Ok(names);
    }

    let entries = fs::read_dir(dir).map_err(|source| PlanError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| PlanError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        names.insert(entry.file_name().to_string_lossy().into_owned());
    }

    Ok(names)
}
