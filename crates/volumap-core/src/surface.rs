//! The render-surface contract.
//!
//! A [`VolumeSurface`] is the opaque sink the volume pipeline feeds: it
//! accepts a converted [`VolumeImage`], owns the live [`TransferFunction`]
//! applied to it, and exposes a redraw primitive. How the surface actually
//! shades the volume is entirely its own business.

use std::any::Any;
use std::fmt;

use crate::transfer::TransferFunction;
use crate::volume::VolumeImage;

/// Stable opaque identifier for a registered surface.
///
/// Identity comparison and staleness checks go through this handle rather
/// than through references, so a destroyed surface is detected as a failed
/// registry lookup instead of a dangling pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(u64);

impl SurfaceId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A volume-capable render surface.
///
/// Surfaces own their transfer function: there is exactly one instance per
/// surface and every edit flows through [`transfer_function_mut`]. The next
/// [`render`] call observes the edited state; no separate push is required.
///
/// [`transfer_function_mut`]: VolumeSurface::transfer_function_mut
/// [`render`]: VolumeSurface::render
pub trait VolumeSurface: Any + Send + Sync {
    /// Returns a reference to self as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns a mutable reference to self as `Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Returns the surface's current volume data, if any has been pushed.
    fn volume_image(&self) -> Option<&VolumeImage>;

    /// Replaces the surface's volume data.
    fn set_volume_image(&mut self, image: VolumeImage);

    /// Returns the live transfer function.
    fn transfer_function(&self) -> &TransferFunction;

    /// Returns the live transfer function for editing.
    fn transfer_function_mut(&mut self) -> &mut TransferFunction;

    /// Redraws the surface with its current volume data and transfer
    /// function.
    fn render(&mut self);

    /// Returns how many times [`render`](VolumeSurface::render) has been
    /// invoked. Implementations that do not track redraws may return zero.
    fn redraw_count(&self) -> u64 {
        0
    }
}
