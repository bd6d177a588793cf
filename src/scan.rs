//! Remote directory scanning: listing the network share that is the source
//! of truth for images.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// One image file found on the remote share. Transient; rebuilt every scan.
#[derive(Debug, Clone)]
pub struct RemoteEntry {
    /// Bare filename, unique within the share's top level.
    pub name: String,
    /// Full path to the remote file.
    pub path: PathBuf,
    /// Modification time, when the filesystem would give us one.
    pub modified: Option<SystemTime>,
}

/// Result of listing the remote share.
#[derive(Debug, Clone, Default)]
pub struct RemoteScan {
    /// Matching files keyed by filename.
    pub entries: BTreeMap<String, RemoteEntry>,
    /// Whether the share could be listed at all. An unreachable share is an
    /// expected condition (network down, share unmounted), not an error.
    pub reachable: bool,
}

/// Return `true` if `name` ends with one of `exts` (lowercase, leading dot).
#[must_use]
pub fn has_allowed_extension(name: &str, exts: &[String]) -> bool {
    let lower = name.to_ascii_lowercase();
    exts.iter().any(|ext| lower.ends_with(ext.as_str()))
}

/// List the direct children of `remote_dir`, keeping plain files whose name
/// carries an allowed extension. Read-only; never fails.
///
/// A missing directory, a non-directory path, or an enumeration error all
/// collapse to `reachable = false` with an empty mapping, and the caller
/// falls back to the local cache.
pub fn scan(remote_dir: &Path, exts: &[String]) -> RemoteScan {
    if !remote_dir.is_dir() {
        warn!(dir = %remote_dir.display(), "remote directory unreachable or not a directory");
        return RemoteScan::default();
    }

    match list_files(remote_dir, exts) {
        Ok(entries) => {
            info!(dir = %remote_dir.display(), count = entries.len(), "remote scan complete");
            RemoteScan {
                entries,
                reachable: true,
            }
        }
        Err(err) => {
            // The share existed a moment ago but could not be listed; treat
            // it as unreachable rather than half-trusted.
            warn!(dir = %remote_dir.display(), error = %err, "remote listing failed");
            RemoteScan::default()
        }
    }
}

fn list_files(
    dir: &Path,
    exts: &[String],
) -> Result<BTreeMap<String, RemoteEntry>, walkdir::Error> {
    let mut entries = BTreeMap::new();
    // Direct children only; nested directories are ignored, not recursed.
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            debug!(path = %entry.path().display(), "skipping non-UTF-8 filename");
            continue;
        };
        if !has_allowed_extension(&name, exts) {
            continue;
        }
        let modified = entry.metadata().ok().and_then(|m| m.modified().ok());
        entries.insert(
            name.clone(),
            RemoteEntry {
                name,
                path: entry.into_path(),
                modified,
            },
        );
    }
    Ok(entries)
}
