//! Part catalog scanning and label classification.
//!
//! A catalog is a directory of LDraw-style part files. Each file opens
//! with a comment header naming the part, and the first word of that
//! header is the part's category. Scanning reads every part header,
//! classifies it, and groups the surviving parts by category.

mod label;
mod scanner;

pub use label::{clean_label, parse_label, Label};
pub use scanner::{scan_catalog, Catalog, PartFile};

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// File extension identifying part files in the input directory.
pub const PART_EXTENSION: &str = "dat";

/// Errors raised while scanning the catalog.
///
/// Every variant is fatal for the run; there is no per-file isolation.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Malformed part header in {}: {reason}", .path.display())]
    MalformedHeader { path: PathBuf, reason: String },

    #[error("Failed to read {}: {source}", .path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
