use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{foundation::core::FrameIndex, tracking::bbox::BBox, tracking::track::BoxTrack};

/// Cloneable single-writer/multi-reader handle to a [`BoxTrack`].
///
/// Render threads call [`SharedBoxTrack::get_box`] concurrently; edits go through
/// [`SharedBoxTrack::update`] and exclude readers for their duration. A panicked writer
/// does not wedge the handle: the lock is recovered from poisoning.
#[derive(Clone, Debug, Default)]
pub struct SharedBoxTrack(Arc<RwLock<BoxTrack>>);

impl SharedBoxTrack {
    pub fn new(track: BoxTrack) -> Self {
        Self(Arc::new(RwLock::new(track)))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, BoxTrack> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, BoxTrack> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get_box(&self, frame: FrameIndex) -> BBox {
        self.read().get_box(frame)
    }

    /// Run `f` with exclusive access.
    pub fn update<R>(&self, f: impl FnOnce(&mut BoxTrack) -> R) -> R {
        f(&mut self.write())
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> BoxTrack {
        self.read().clone()
    }
}

impl From<BoxTrack> for SharedBoxTrack {
    fn from(track: BoxTrack) -> Self {
        Self::new(track)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tracking/shared.rs"]
mod tests;
