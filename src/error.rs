//! Defines custom error types for the application.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Source file extension invalid: {}", .0.display())]
    InvalidExtension(PathBuf),

    #[error("Source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Head token {0} missing from source file")]
    HeadTokenMissing(&'static str),

    #[error("New file already exists: {}", .0.display())]
    NewFileExists(PathBuf),
}
