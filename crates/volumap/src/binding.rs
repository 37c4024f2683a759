//! The active-surface binding state machine.
//!
//! At most one render surface is observed at any time. The binding pairs the
//! bound surface's id with the update connection opened against it, so the
//! two can only change together: rebinding always disconnects before it
//! reconnects, and re-entering the already-bound surface is a no-op. Those
//! two rules are what keep a surface from ever accumulating duplicate
//! subscriptions.

use volumap_core::{SurfaceId, SurfaceRegistry, UpdateConnection};

/// Which surface, if any, the controller is currently observing.
#[derive(Debug, Default)]
pub enum SurfaceBinding {
    /// No surface is being observed.
    #[default]
    Unbound,
    /// `surface` is observed through `connection`.
    Bound {
        /// The bound surface.
        surface: SurfaceId,
        /// The live volume-update connection to it.
        connection: UpdateConnection,
    },
}

impl SurfaceBinding {
    /// Creates an unbound binding.
    #[must_use]
    pub fn new() -> Self {
        Self::Unbound
    }

    /// Returns the bound surface's id, if bound.
    #[must_use]
    pub fn bound_surface(&self) -> Option<SurfaceId> {
        match self {
            Self::Unbound => None,
            Self::Bound { surface, .. } => Some(*surface),
        }
    }

    /// Returns whether the binding observes the given surface.
    #[must_use]
    pub fn is_bound_to(&self, id: SurfaceId) -> bool {
        self.bound_surface() == Some(id)
    }

    /// Returns the live update connection, if bound.
    #[must_use]
    pub fn connection(&self) -> Option<&UpdateConnection> {
        match self {
            Self::Unbound => None,
            Self::Bound { connection, .. } => Some(connection),
        }
    }

    /// Moves the binding to `target`, tearing down the previous observation
    /// first. Returns whether the binding changed.
    ///
    /// A `target` that is not registered (destroyed surface, stale id) is
    /// treated as `None`. Rebinding to the already-bound surface changes
    /// nothing and opens no second connection.
    pub fn rebind(
        &mut self,
        registry: &mut SurfaceRegistry,
        target: Option<SurfaceId>,
    ) -> bool {
        let target = target.filter(|&id| registry.contains(id));
        if self.bound_surface() == target {
            return false;
        }

        if let Self::Bound {
            surface,
            connection,
        } = std::mem::take(self)
        {
            log::debug!("unbinding surface {surface}");
            registry.disconnect_updates(connection);
        }

        if let Some(id) = target {
            match registry.connect_updates(id) {
                Ok(connection) => {
                    log::debug!("bound surface {id}");
                    *self = Self::Bound {
                        surface: id,
                        connection,
                    };
                }
                Err(err) => log::warn!("failed to bind surface {id}: {err}"),
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use volumap_surfaces::SoftwareSurface;

    fn registry_with_two() -> (SurfaceRegistry, SurfaceId, SurfaceId) {
        let mut registry = SurfaceRegistry::new();
        let a = registry.add(Box::<SoftwareSurface>::default());
        let b = registry.add(Box::<SoftwareSurface>::default());
        (registry, a, b)
    }

    #[test]
    fn test_rebind_same_surface_is_idempotent() {
        let (mut registry, a, _) = registry_with_two();
        let mut binding = SurfaceBinding::new();

        assert!(binding.rebind(&mut registry, Some(a)));
        assert!(!binding.rebind(&mut registry, Some(a)));
        assert_eq!(registry.connection_count(a), 1);
    }

    #[test]
    fn test_switch_disconnects_previous() {
        let (mut registry, a, b) = registry_with_two();
        let mut binding = SurfaceBinding::new();

        assert!(binding.rebind(&mut registry, Some(a)));
        assert!(binding.rebind(&mut registry, Some(b)));
        assert!(binding.rebind(&mut registry, Some(a)));

        assert!(binding.is_bound_to(a));
        assert_eq!(registry.connection_count(a), 1);
        assert_eq!(registry.connection_count(b), 0);
    }

    #[test]
    fn test_unbind_on_none() {
        let (mut registry, a, _) = registry_with_two();
        let mut binding = SurfaceBinding::new();

        assert!(binding.rebind(&mut registry, Some(a)));
        assert!(binding.rebind(&mut registry, None));
        assert_eq!(binding.bound_surface(), None);
        assert_eq!(registry.connection_count(a), 0);
    }

    #[test]
    fn test_stale_target_treated_as_none() {
        let (mut registry, a, b) = registry_with_two();
        let mut binding = SurfaceBinding::new();

        assert!(binding.rebind(&mut registry, Some(a)));
        let _ = registry.remove(b);
        assert!(binding.rebind(&mut registry, Some(b)));
        assert_eq!(binding.bound_surface(), None);
    }

    #[test]
    fn test_bound_surface_destroyed_externally() {
        let (mut registry, a, _) = registry_with_two();
        let mut binding = SurfaceBinding::new();

        assert!(binding.rebind(&mut registry, Some(a)));
        let _ = registry.remove(a);
        // The stale connection unwinds without complaint.
        assert!(binding.rebind(&mut registry, Some(a)));
        assert_eq!(binding.bound_surface(), None);
    }
}
