//! volumap: interactive color/opacity mapping for volume-rendered scalar
//! fields.
//!
//! A molecular model carries scalar fields ("cubes") sampled over a regular
//! 3D grid. volumap renders-side plumbing keeps three things in sync while
//! the user edits how values map to color and opacity:
//!
//! - the converted volume pushed to the active render surface,
//! - the population histogram behind the editing UI,
//! - the binding that keeps exactly one surface subscribed to updates.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::{Arc, RwLock};
//! use volumap::*;
//!
//! struct NoEditor;
//! impl TransferEditor for NoEditor {
//!     fn set_histogram(&mut self, _histogram: &Histogram) {}
//!     fn set_transfer_snapshot(&mut self, _transfer: &TransferFunction) {}
//!     fn show(&mut self) {}
//! }
//! struct NoEditorFactory;
//! impl EditorFactory for NoEditorFactory {
//!     fn create_editor(&self) -> Box<dyn TransferEditor> {
//!         Box::new(NoEditor)
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     // A surface registry with one software-rendered surface.
//!     let surfaces = Arc::new(RwLock::new(SurfaceRegistry::new()));
//!     let id = surfaces
//!         .write()
//!         .expect("lock")
//!         .add(Box::<SoftwareSurface>::default());
//!
//!     // Focus tracking, driven by the application shell.
//!     let tracker = SharedTracker::new();
//!     tracker.set_active(Some(id));
//!
//!     // A model with a single 2x2x2 scalar field.
//!     let mut model = Model::new();
//!     let field = ScalarField::new(
//!         UVec3::new(2, 2, 2),
//!         Vec3::ZERO,
//!         Vec3::ONE,
//!         vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
//!     )?;
//!     let _ = model.add_field(field);
//!
//!     let mut controller = VolumeController::new(
//!         surfaces,
//!         Arc::new(tracker.clone()),
//!         Box::new(NoEditorFactory),
//!         Options::default(),
//!     );
//!     controller.attach_model(Some(Arc::new(RwLock::new(model))));
//!     controller.on_active_surface_changed();
//!     assert!(controller.actions_enabled());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`ScalarField`] → [`VolumeImage`] conversion and [`Histogram`] building
//!   are pure functions in `volumap-core`.
//! - [`SurfaceBinding`] is the state machine that guarantees at most one live
//!   update connection per surface.
//! - [`VolumeController`] owns the orchestration: it reacts to model and
//!   focus events, reruns the pipeline, and routes edits and redraws.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod binding;
pub mod controller;
pub mod editor;
pub mod tracker;

pub use binding::SurfaceBinding;
pub use controller::{SharedModel, SharedSurfaces, VolumeController};
pub use editor::{EditorEvent, EditorFactory, TransferEditor};
pub use tracker::{ActiveSurfaceProvider, SharedTracker};

// Re-export core types
pub use volumap_core::{
    error::{Result, VolumapError},
    ColorRamp, ColorStop, Histogram, HistogramBin, HistogramBuilder, Model, ModelChange,
    OpacityCurve, OpacityStop, Options, ScalarField, SurfaceId, SurfaceRegistry,
    TransferFunction, UVec3, UpdateConnection, Vec3, VolumeImage, VolumeSurface,
};

// Re-export surface implementations
pub use volumap_surfaces::SoftwareSurface;

/// Initializes logging for standalone embedders.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let _ = env_logger::try_init();
    log::info!("volumap initialized");
}
