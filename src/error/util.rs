//! Utility functions for error handling
//!
//! This module provides utility functions for opening and creating record
//! files with the path attached to any failure.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{AuditError, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(AuditError::io(
            path,
            io::Error::new(io::ErrorKind::NotFound, format!("File not found, needed for: {purpose}")),
        ));
    }

    if !path.is_file() {
        return Err(AuditError::io(
            path,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Path is not a file, expected a file for: {purpose}"),
            ),
        ));
    }

    fs::File::open(path).map_err(|e| AuditError::io(path, e))
}

/// Create a file for writing, creating any missing parent directories
pub fn safe_create_file(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            log::debug!("Creating output directory {}", parent.display());
            fs::create_dir_all(parent).map_err(|e| AuditError::io(parent, e))?;
        }
    }

    fs::File::create(path).map_err(|e| AuditError::io(path, e))
}
