//! Cache reconciliation: mirror the remote share into the local cache and
//! pick the image set for one display session.
//!
//! One pass per session start, synchronous and run-to-completion. Per-file
//! failures are logged, recorded as skipped items, and never abort the pass.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

use crate::scan::{RemoteEntry, RemoteScan, has_allowed_extension};

/// Where the session's images are served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSource {
    /// The share was reachable; paths point straight at the remote files.
    Remote,
    /// The share was down; paths point at the local cache.
    Cache,
    /// Nothing to show. The caller displays a blank screen.
    #[default]
    Empty,
}

/// What the reconciler was trying to do with a file it ended up skipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkippedAction {
    Copy,
    Evict,
}

/// A per-file failure, recorded instead of aborting the pass.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub name: String,
    pub action: SkippedAction,
    pub reason: String,
}

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Default)]
pub struct SyncOutcome {
    /// Paths to display this session, already shuffled. Empty means the
    /// session shows a blank screen; that is not an error.
    pub images: Vec<PathBuf>,
    pub source: ImageSource,
    /// Files copied into the cache, fresh copies and refreshes alike.
    pub copied: usize,
    /// Stale cache files deleted.
    pub evicted: usize,
    /// Files the pass could not copy or evict.
    pub skipped: Vec<SkippedFile>,
}

/// Run one reconciliation pass, shuffling with the thread-local RNG.
pub fn reconcile(scan: &RemoteScan, cache_dir: &Path, exts: &[String]) -> SyncOutcome {
    reconcile_with_rng(scan, cache_dir, exts, &mut rand::rng())
}

/// Run one reconciliation pass with a caller-supplied RNG, so tests can seed
/// it for deterministic orderings.
///
/// When the share is reachable the cache is brought in line with it (copy
/// new, refresh strictly-newer, evict orphans) and the remote paths are
/// authoritative. When it is not, the cache is left untouched and served
/// as-is.
pub fn reconcile_with_rng<R: Rng + ?Sized>(
    scan: &RemoteScan,
    cache_dir: &Path,
    exts: &[String],
    rng: &mut R,
) -> SyncOutcome {
    let mut outcome = SyncOutcome::default();

    // Best effort: a cache we cannot create still leaves the remote path
    // usable, and an existing cache stays readable.
    if let Err(err) = fs::create_dir_all(cache_dir) {
        warn!(dir = %cache_dir.display(), error = %err, "could not create cache directory");
    }

    if scan.reachable {
        copy_into_cache(scan, cache_dir, &mut outcome);
        evict_orphans(scan, cache_dir, &mut outcome);
        // Remote is authoritative while it is up.
        outcome.images = scan.entries.values().map(|e| e.path.clone()).collect();
        if !outcome.images.is_empty() {
            outcome.source = ImageSource::Remote;
        }
    } else {
        outcome.images = list_cache(cache_dir, exts);
        if outcome.images.is_empty() {
            warn!(dir = %cache_dir.display(), "share down and no cached images; blank session");
        } else {
            info!(dir = %cache_dir.display(), count = outcome.images.len(), "share down; serving from cache");
            outcome.source = ImageSource::Cache;
        }
    }

    outcome.images.shuffle(rng);
    info!(
        count = outcome.images.len(),
        source = ?outcome.source,
        copied = outcome.copied,
        evicted = outcome.evicted,
        skipped = outcome.skipped.len(),
        "reconciliation pass complete"
    );
    outcome
}

fn copy_into_cache(scan: &RemoteScan, cache_dir: &Path, outcome: &mut SyncOutcome) {
    for entry in scan.entries.values() {
        let dest = cache_dir.join(&entry.name);
        if !needs_copy(entry, &dest) {
            continue;
        }
        match copy_preserving_mtime(&entry.path, &dest) {
            Ok(()) => {
                debug!(name = %entry.name, "copied into cache");
                outcome.copied += 1;
            }
            Err(err) => {
                // Covers the source vanishing between listing and copy.
                warn!(name = %entry.name, error = %err, "copy into cache failed");
                outcome.skipped.push(SkippedFile {
                    name: entry.name.clone(),
                    action: SkippedAction::Copy,
                    reason: err.to_string(),
                });
            }
        }
    }
}

/// A cache file is refreshed only when the remote copy is strictly newer;
/// equal timestamps leave it alone. A timestamp we cannot read on either
/// side means copy (fail open toward freshness).
fn needs_copy(entry: &RemoteEntry, dest: &Path) -> bool {
    let Ok(dest_meta) = dest.metadata() else {
        // Not cached yet, or removed underneath us.
        return true;
    };
    match (entry.modified, dest_meta.modified().ok()) {
        (Some(remote), Some(cached)) => remote > cached,
        _ => true,
    }
}

fn copy_preserving_mtime(src: &Path, dest: &Path) -> io::Result<()> {
    fs::copy(src, dest)?;
    let meta = src.metadata()?;
    filetime::set_file_mtime(dest, FileTime::from_last_modification_time(&meta))?;
    Ok(())
}

fn evict_orphans(scan: &RemoteScan, cache_dir: &Path, outcome: &mut SyncOutcome) {
    let iter = match fs::read_dir(cache_dir) {
        Ok(iter) => iter,
        Err(err) => {
            warn!(dir = %cache_dir.display(), error = %err, "cache directory unreadable; skipping eviction");
            return;
        }
    };
    for entry in iter.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if scan.entries.contains_key(&name) {
            continue;
        }
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(name = %name, "evicted stale cache file");
                outcome.evicted += 1;
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(name = %name, "cache file vanished during eviction");
            }
            Err(err) => {
                warn!(name = %name, error = %err, "evicting cache file failed");
                outcome.skipped.push(SkippedFile {
                    name,
                    action: SkippedAction::Evict,
                    reason: err.to_string(),
                });
            }
        }
    }
}

fn list_cache(cache_dir: &Path, exts: &[String]) -> Vec<PathBuf> {
    let iter = match fs::read_dir(cache_dir) {
        Ok(iter) => iter,
        Err(err) => {
            warn!(dir = %cache_dir.display(), error = %err, "cache directory unreadable");
            return Vec::new();
        }
    };
    let mut out = Vec::new();
    for entry in iter.flatten() {
        let path = entry.path();
        if path.is_file()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|n| has_allowed_extension(n, exts))
        {
            out.push(path);
        }
    }
    out
}
