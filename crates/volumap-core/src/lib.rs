//! Core abstractions for volumap.
//!
//! This crate provides the data model and pure algorithms of the volume
//! color/opacity mapping pipeline:
//! - [`ScalarField`] - a 3D scalar grid with physical origin and spacing
//! - [`VolumeImage`] - the same grid reordered into the renderer's layout
//! - [`Histogram`] / [`HistogramBuilder`] - binned populations for the editor
//! - [`TransferFunction`] - color ramp and opacity curve control points
//! - [`Model`] - the scalar-field collection and its change protocol
//! - [`VolumeSurface`] / [`SurfaceRegistry`] - the render-sink contract and
//!   the update-connection accounting behind surface binding

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod field;
pub mod histogram;
pub mod model;
pub mod options;
pub mod registry;
pub mod surface;
pub mod transfer;
pub mod volume;

pub use error::{Result, VolumapError};
pub use field::ScalarField;
pub use histogram::{Histogram, HistogramBin, HistogramBuilder};
pub use model::{Model, ModelChange};
pub use options::Options;
pub use registry::{SurfaceRegistry, UpdateConnection};
pub use surface::{SurfaceId, VolumeSurface};
pub use transfer::{ColorRamp, ColorStop, OpacityCurve, OpacityStop, TransferFunction};
pub use volume::VolumeImage;

// Re-export glam types for convenience
pub use glam::{UVec3, Vec3};
