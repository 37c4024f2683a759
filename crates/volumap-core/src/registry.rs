//! Surface registry and volume-update connections.

use std::collections::HashMap;

use crate::error::{Result, VolumapError};
use crate::surface::{SurfaceId, VolumeSurface};

/// A live connection to a surface's "volume data updated" signal.
///
/// Connections are move-only handles: disconnecting consumes the handle, so a
/// connection cannot outlive its accounting entry. Dropping a handle without
/// disconnecting leaves the entry to be cleaned up when the surface is
/// removed.
#[derive(Debug)]
pub struct UpdateConnection {
    surface: SurfaceId,
    token: u64,
}

impl UpdateConnection {
    /// Returns the surface this connection is attached to.
    #[must_use]
    pub fn surface(&self) -> SurfaceId {
        self.surface
    }
}

/// Owner of all registered render surfaces.
///
/// Surfaces are keyed by generated [`SurfaceId`]s. The registry also tracks
/// which volume-update connections are live per surface; removal of a surface
/// drops its connections, so a stale [`UpdateConnection`] held elsewhere is
/// simply inert.
#[derive(Default)]
pub struct SurfaceRegistry {
    surfaces: HashMap<SurfaceId, Box<dyn VolumeSurface>>,
    connections: HashMap<SurfaceId, Vec<u64>>,
    next_surface: u64,
    next_token: u64,
}

impl SurfaceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a surface and returns its id.
    pub fn add(&mut self, surface: Box<dyn VolumeSurface>) -> SurfaceId {
        let id = SurfaceId::new(self.next_surface);
        self.next_surface += 1;
        let _ = self.surfaces.insert(id, surface);
        log::debug!("surface {id} registered");
        id
    }

    /// Removes a surface, dropping any live connections to it.
    pub fn remove(&mut self, id: SurfaceId) -> Option<Box<dyn VolumeSurface>> {
        let surface = self.surfaces.remove(&id);
        if surface.is_some() {
            let _ = self.connections.remove(&id);
            log::debug!("surface {id} removed");
        }
        surface
    }

    /// Gets a surface by id.
    #[must_use]
    pub fn get(&self, id: SurfaceId) -> Option<&dyn VolumeSurface> {
        self.surfaces.get(&id).map(|s| s.as_ref())
    }

    /// Gets a mutable surface by id.
    pub fn get_mut(&mut self, id: SurfaceId) -> Option<&mut Box<dyn VolumeSurface>> {
        self.surfaces.get_mut(&id)
    }

    /// Returns whether a surface with the given id is registered.
    #[must_use]
    pub fn contains(&self, id: SurfaceId) -> bool {
        self.surfaces.contains_key(&id)
    }

    /// Returns the number of registered surfaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Returns true if no surfaces are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Returns an iterator over the registered surface ids.
    pub fn ids(&self) -> impl Iterator<Item = SurfaceId> + '_ {
        self.surfaces.keys().copied()
    }

    /// Connects to a surface's volume-update signal.
    ///
    /// # Errors
    ///
    /// Returns [`VolumapError::SurfaceNotFound`] if the surface is not
    /// registered.
    pub fn connect_updates(&mut self, id: SurfaceId) -> Result<UpdateConnection> {
        if !self.surfaces.contains_key(&id) {
            return Err(VolumapError::SurfaceNotFound(id));
        }
        let token = self.next_token;
        self.next_token += 1;
        self.connections.entry(id).or_default().push(token);
        log::debug!("surface {id} update connection opened");
        Ok(UpdateConnection { surface: id, token })
    }

    /// Disconnects a connection. A connection whose surface is already gone
    /// is a no-op.
    pub fn disconnect_updates(&mut self, connection: UpdateConnection) {
        if let Some(tokens) = self.connections.get_mut(&connection.surface) {
            tokens.retain(|&t| t != connection.token);
            if tokens.is_empty() {
                let _ = self.connections.remove(&connection.surface);
            }
            log::debug!("surface {} update connection closed", connection.surface);
        }
    }

    /// Returns how many update connections are live for a surface.
    #[must_use]
    pub fn connection_count(&self, id: SurfaceId) -> usize {
        self.connections.get(&id).map_or(0, Vec::len)
    }

    /// Returns whether the given connection is still live.
    #[must_use]
    pub fn is_connected(&self, connection: &UpdateConnection) -> bool {
        self.connections
            .get(&connection.surface)
            .is_some_and(|tokens| tokens.contains(&connection.token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::TransferFunction;
    use crate::volume::VolumeImage;
    use std::any::Any;

    struct NullSurface {
        transfer: TransferFunction,
        image: Option<VolumeImage>,
    }

    impl NullSurface {
        fn boxed() -> Box<dyn VolumeSurface> {
            Box::new(Self {
                transfer: TransferFunction::new(),
                image: None,
            })
        }
    }

    impl VolumeSurface for NullSurface {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
        fn volume_image(&self) -> Option<&VolumeImage> {
            self.image.as_ref()
        }
        fn set_volume_image(&mut self, image: VolumeImage) {
            self.image = Some(image);
        }
        fn transfer_function(&self) -> &TransferFunction {
            &self.transfer
        }
        fn transfer_function_mut(&mut self) -> &mut TransferFunction {
            &mut self.transfer
        }
        fn render(&mut self) {}
    }

    #[test]
    fn test_add_get_remove() {
        let mut registry = SurfaceRegistry::new();
        let id = registry.add(NullSurface::boxed());
        assert!(registry.contains(id));
        assert_eq!(registry.len(), 1);
        assert!(registry.remove(id).is_some());
        assert!(!registry.contains(id));
        assert!(registry.remove(id).is_none());
    }

    #[test]
    fn test_connect_disconnect_accounting() {
        let mut registry = SurfaceRegistry::new();
        let id = registry.add(NullSurface::boxed());

        let conn = registry.connect_updates(id).unwrap();
        assert_eq!(registry.connection_count(id), 1);
        assert!(registry.is_connected(&conn));

        registry.disconnect_updates(conn);
        assert_eq!(registry.connection_count(id), 0);
    }

    #[test]
    fn test_connect_to_missing_surface_fails() {
        let mut registry = SurfaceRegistry::new();
        let id = registry.add(NullSurface::boxed());
        let _ = registry.remove(id);
        assert!(matches!(
            registry.connect_updates(id),
            Err(VolumapError::SurfaceNotFound(_))
        ));
    }

    #[test]
    fn test_remove_drops_connections() {
        let mut registry = SurfaceRegistry::new();
        let id = registry.add(NullSurface::boxed());
        let conn = registry.connect_updates(id).unwrap();
        let _ = registry.remove(id);
        assert_eq!(registry.connection_count(id), 0);
        assert!(!registry.is_connected(&conn));
        // Disconnecting the stale handle is harmless.
        registry.disconnect_updates(conn);
    }
}
