use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when writing a CSV export
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to create {path}: {1}", path = .0.display())]
    Create(PathBuf, String),

    #[error("Failed to write {path}: {1}", path = .0.display())]
    Write(PathBuf, String),
}
