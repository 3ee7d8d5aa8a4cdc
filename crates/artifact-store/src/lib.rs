//! Artifact Store
//!
//! Loads the reference schema, fitted scaler and trained classifier once at
//! startup and holds them immutably for the life of the process.

mod bundle;
mod paths;

pub use bundle::ArtifactBundle;
pub use paths::ArtifactPaths;

use std::path::PathBuf;
use thiserror::Error;

/// Startup-time artifact errors; all are fatal
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Required artifact not found: {}", .path.display())]
    Missing { path: PathBuf },
    #[error("Could not read artifact {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed artifact {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },
    #[error("Artifacts are inconsistent: {0}")]
    Inconsistent(String),
}
