//! Surface implementations for volumap.
//!
//! Render backends implement [`VolumeSurface`](volumap_core::VolumeSurface)
//! themselves; this crate ships [`SoftwareSurface`], an in-memory sink for
//! embedders without a GPU path and for integration tests.

mod software;

pub use software::SoftwareSurface;
