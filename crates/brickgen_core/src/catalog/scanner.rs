//! Catalog directory scanning.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::label::{parse_label, Label};
use super::{CatalogError, CatalogResult, PART_EXTENSION};

/// A single part file, read once and immutable afterwards.
#[derive(Debug, Clone)]
pub struct PartFile {
    /// Part number, derived from the filename without extension.
    pub part_number: String,
    /// Source path of the part file.
    pub path: PathBuf,
    /// Raw first header line.
    pub header: String,
}

/// Mapping from category name to the ordered parts in that category.
pub type Catalog = BTreeMap<String, Vec<PartFile>>;

/// Scan `input_dir` for part files and group them by category.
///
/// Files are processed in filename order so the resulting groups are
/// deterministic. Parts whose header is a relocation note, and parts
/// whose category is in `exclusions`, are dropped. A header that fails
/// to classify aborts the scan.
pub fn scan_catalog(input_dir: &Path, exclusions: &BTreeSet<String>) -> CatalogResult<Catalog> {
    let entries = std::fs::read_dir(input_dir).map_err(|source| CatalogError::ReadError {
        path: input_dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CatalogError::ReadError {
            path: input_dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some(PART_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();

    tracing::info!("Found {} part files in {}", files.len(), input_dir.display());

    let mut catalog = Catalog::new();
    for path in files {
        let header = read_header_line(&path)?;

        let label = parse_label(&header).map_err(|reason| CatalogError::MalformedHeader {
            path: path.clone(),
            reason: reason.to_string(),
        })?;

        let category = match label {
            Label::Relocated => {
                tracing::debug!("Skipping relocated part: {}", path.display());
                continue;
            }
            Label::Category(category) => category,
        };

        if exclusions.contains(&category) {
            tracing::debug!(
                "Skipping excluded category '{}': {}",
                category,
                path.display()
            );
            continue;
        }

        let part_number = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        catalog.entry(category).or_default().push(PartFile {
            part_number,
            path,
            header,
        });
    }

    tracing::info!("Catalog holds {} categories", catalog.len());
    Ok(catalog)
}

/// Read the first line of a part file.
fn read_header_line(path: &Path) -> CatalogResult<String> {
    let file = File::open(path).map_err(|source| CatalogError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    let mut header = String::new();
    BufReader::new(file)
        .read_line(&mut header)
        .map_err(|source| CatalogError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_part(dir: &Path, name: &str, header: &str) {
        fs::write(dir.join(name), format!("{}\n0 some body line\n", header)).unwrap();
    }

    #[test]
    fn groups_parts_by_category() {
        let dir = tempdir().unwrap();
        write_part(dir.path(), "3001.dat", "0 Brick 2 x 4");
        write_part(dir.path(), "3024.dat", "0 Plate 1 x 1");
        write_part(dir.path(), "3003.dat", "0 Brick 2 x 2");

        let catalog = scan_catalog(dir.path(), &BTreeSet::new()).unwrap();
        assert_eq!(catalog.len(), 2);

        let bricks = &catalog["Brick"];
        let numbers: Vec<&str> = bricks.iter().map(|p| p.part_number.as_str()).collect();
        assert_eq!(numbers, vec!["3001", "3003"]);
        assert_eq!(catalog["Plate"].len(), 1);
    }

    #[test]
    fn relocated_parts_never_appear() {
        let dir = tempdir().unwrap();
        write_part(dir.path(), "3001.dat", "0 Brick 2 x 4");
        write_part(dir.path(), "3002.dat", "0 ~Moved to 3001");

        let catalog = scan_catalog(dir.path(), &BTreeSet::new()).unwrap();
        let all: Vec<&str> = catalog
            .values()
            .flatten()
            .map(|p| p.part_number.as_str())
            .collect();
        assert_eq!(all, vec!["3001"]);
    }

    #[test]
    fn excluded_categories_are_dropped() {
        let dir = tempdir().unwrap();
        write_part(dir.path(), "3001.dat", "0 Brick 2 x 4");
        write_part(dir.path(), "3626.dat", "0 Minifig Head");

        let exclusions: BTreeSet<String> = ["Minifig".to_string()].into();
        let catalog = scan_catalog(dir.path(), &exclusions).unwrap();
        assert!(catalog.contains_key("Brick"));
        assert!(!catalog.contains_key("Minifig"));
    }

    #[test]
    fn non_part_files_are_ignored() {
        let dir = tempdir().unwrap();
        write_part(dir.path(), "3001.dat", "0 Brick 2 x 4");
        fs::write(dir.path().join("readme.txt"), "not a part").unwrap();

        let catalog = scan_catalog(dir.path(), &BTreeSet::new()).unwrap();
        assert_eq!(catalog.values().flatten().count(), 1);
    }

    #[test]
    fn malformed_header_aborts_scan() {
        let dir = tempdir().unwrap();
        write_part(dir.path(), "3001.dat", "0 Brick 2 x 4");
        fs::write(dir.path().join("9999.dat"), "").unwrap();

        let err = scan_catalog(dir.path(), &BTreeSet::new()).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedHeader { .. }));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let result = scan_catalog(&dir.path().join("nope"), &BTreeSet::new());
        assert!(matches!(result, Err(CatalogError::ReadError { .. })));
    }
}
