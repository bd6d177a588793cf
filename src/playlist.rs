//! Session rotation over the image set produced by a reconciliation pass.

use std::path::PathBuf;

use tracing::warn;

use crate::sync::SyncOutcome;

/// Rotation of images for one display session.
///
/// The cursor wraps around, and files that vanish underneath the session are
/// dropped from the rotation instead of failing it. The presentation layer
/// owns one of these per session rather than sharing list/index state.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    images: Vec<PathBuf>,
    cursor: usize,
}

impl Playlist {
    pub fn new(images: Vec<PathBuf>) -> Self {
        Self { images, cursor: 0 }
    }

    /// Next image to display, wrapping around at the end.
    ///
    /// A path whose file has disappeared since the pass is removed from the
    /// rotation and the following one is tried. `None` means the rotation is
    /// empty and the session shows a blank screen.
    pub fn advance(&mut self) -> Option<PathBuf> {
        while !self.images.is_empty() {
            self.cursor %= self.images.len();
            let candidate = self.images[self.cursor].clone();
            if candidate.exists() {
                self.cursor = (self.cursor + 1) % self.images.len();
                return Some(candidate);
            }
            warn!(path = %candidate.display(), "image vanished; dropping from rotation");
            self.images.remove(self.cursor);
        }
        None
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl From<SyncOutcome> for Playlist {
    fn from(outcome: SyncOutcome) -> Self {
        Self::new(outcome.images)
    }
}
