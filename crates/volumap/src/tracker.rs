//! The active-surface collaborator.

use std::sync::{Arc, RwLock};

use volumap_core::SurfaceId;

/// Reports which render surface currently has focus.
///
/// This is the seam to the application's window/focus tracking: the
/// controller asks it, never the other way around. `None` covers both "no
/// surface has focus" and "the focused widget is not volume-capable".
pub trait ActiveSurfaceProvider: Send + Sync {
    /// Returns the id of the active volume-capable surface, if any.
    fn active_surface(&self) -> Option<SurfaceId>;
}

/// A shared, cloneable [`ActiveSurfaceProvider`].
///
/// The application shell holds one clone and updates it as focus moves; the
/// controller holds another and reads it when handling events.
#[derive(Clone, Default)]
pub struct SharedTracker {
    active: Arc<RwLock<Option<SurfaceId>>>,
}

impl SharedTracker {
    /// Creates a tracker with no active surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the surface that became active, or `None` when focus left
    /// every volume-capable surface.
    pub fn set_active(&self, surface: Option<SurfaceId>) {
        *self.active.write().expect("active surface lock poisoned") = surface;
    }
}

impl ActiveSurfaceProvider for SharedTracker {
    fn active_surface(&self) -> Option<SurfaceId> {
        *self.active.read().expect("active surface lock poisoned")
    }
}
