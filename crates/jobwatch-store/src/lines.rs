//! Append-only line files shared by the URL and company stores.

use crate::error::{Result, StoreError};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::Path;

/// Read trimmed, non-empty lines accepted by `keep`. A missing file reads as empty.
pub(crate) fn read_lines(path: &Path, keep: impl Fn(&str) -> bool) -> Result<Vec<String>> {
    let file = match fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let mut lines = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let line = line.trim();
        if !line.is_empty() && keep(line) {
            lines.push(line.to_string());
        }
    }
    Ok(lines)
}

/// Append each item as its own line, creating the file and its directory if absent.
pub(crate) fn append_lines<S: AsRef<str>>(path: &Path, items: &[S]) -> Result<()> {
    if items.is_empty() {
        return Ok(());
    }

    let mut file = open_append(path)?;
    for item in items {
        writeln!(file, "{}", item.as_ref()).map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Open a file for appending, creating parent directories first.
pub(crate) fn open_append(path: &Path) -> Result<fs::File> {
    ensure_parent(path)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })
}

pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StoreError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
