// src/file.rs
//
// Small filesystem helpers shared by the stores and settings files.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Result, TrackerError};

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(TrackerError::persistence(dir, "path exists but is not a directory"));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| TrackerError::persistence(dir, e))?;
    }
    Ok(())
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

/// Sibling temp path used for write-then-rename.
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replace `path` with `contents`: write a temp sibling, then rename over.
/// A crash mid-write leaves the old file intact.
pub fn write_replace(path: &Path, contents: &[u8]) -> Result<()> {
    ensure_parent(path)?;
    let tmp = temp_sibling(path);
    {
        let mut f = fs::File::create(&tmp).map_err(|e| TrackerError::persistence(&tmp, e))?;
        f.write_all(contents).map_err(|e| TrackerError::persistence(&tmp, e))?;
        f.sync_all().map_err(|e| TrackerError::persistence(&tmp, e))?;
    }
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        TrackerError::persistence(path, e)
    })
}

/// Read a JSON file. `Ok(None)` when it does not exist.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(path).map_err(|e| TrackerError::persistence(path, e))?;
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| TrackerError::persistence(path, e))
}

/// Pretty-print `value` as JSON and replace `path` with it.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut buf = serde_json::to_vec_pretty(value).map_err(|e| TrackerError::persistence(path, e))?;
    buf.push(b'\n');
    write_replace(path, &buf)
}

pub fn remove_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).map_err(|e| TrackerError::persistence(path, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_dir(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("pricewatch_file_{}", name));
        let _ = fs::remove_dir_all(&p);
        fs::create_dir_all(&p).unwrap();
        p
    }

    #[test]
    fn write_replace_creates_parents_and_overwrites() {
        let dir = tmp_dir("replace");
        let path = dir.join("nested").join("x.json");
        write_replace(&path, b"one").unwrap();
        write_replace(&path, b"two").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "two");
        assert!(!temp_sibling(&path).exists());
    }

    #[test]
    fn failed_rename_leaves_no_temp_file() {
        let dir = tmp_dir("blocked");
        // A non-empty directory in the way makes the rename fail.
        let path = dir.join("x.json");
        fs::create_dir_all(path.join("inner")).unwrap();

        assert!(matches!(write_replace(&path, b"data"), Err(TrackerError::Persistence { .. })));
        assert!(!temp_sibling(&path).exists());
        assert!(path.is_dir());
    }

    #[test]
    fn read_json_missing_is_none() {
        let dir = tmp_dir("missing");
        let got: Option<Vec<u32>> = read_json(&dir.join("nope.json")).unwrap();
        assert!(got.is_none());
    }

    #[test]
    fn read_json_garbage_is_error() {
        let dir = tmp_dir("garbage");
        let path = dir.join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let got: Result<Option<Vec<u32>>> = read_json(&path);
        assert!(matches!(got, Err(TrackerError::Persistence { .. })));
    }
}
