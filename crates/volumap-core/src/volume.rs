//! Volume images in the renderer's memory layout.
//!
//! Renderers consume the scalar grid with the axis order inverted relative to
//! the native [`ScalarField`] layout: `z` becomes the slowest-varying axis and
//! `x` the fastest. [`VolumeImage::from_field`] performs that reordering as a
//! full gather/scatter pass; there is no shortcut, since each of the three
//! loop variables changes its stride role rather than simply reversing.

use glam::{UVec3, Vec3};

use crate::field::ScalarField;

/// A scalar grid reordered into the layout the render surface expects.
///
/// The value for logical sample `(i, j, k)` is stored at flat index
/// `(k * ny + j) * nx + i`. Physical origin and spacing are carried over from
/// the source field unchanged; only the in-memory traversal order differs, so
/// every sample keeps its world position.
///
/// A `VolumeImage` is derived data: one exists transiently per field version
/// and is discarded after the histogram builder and render surface consume it.
#[derive(Debug, Clone)]
pub struct VolumeImage {
    dimensions: UVec3,
    origin: Vec3,
    spacing: Vec3,
    values: Vec<f32>,
    value_range: (f32, f32),
}

impl VolumeImage {
    /// Converts a scalar field into the renderer layout.
    ///
    /// Reads the value at native index `(i*ny + j)*nz + k` and writes it to
    /// output index `(k*ny + j)*nx + i`, for every `(i, j, k)` in the grid.
    /// A field with any zero dimension yields an empty image.
    #[must_use]
    pub fn from_field(field: &ScalarField) -> Self {
        let dim = field.dimensions();
        let (nx, ny, nz) = (dim.x as usize, dim.y as usize, dim.z as usize);
        let source = field.values();
        let mut values = vec![0.0_f32; nx * ny * nz];

        for i in 0..nx {
            for j in 0..ny {
                for k in 0..nz {
                    values[(k * ny + j) * nx + i] = source[(i * ny + j) * nz + k];
                }
            }
        }

        Self {
            dimensions: dim,
            origin: field.origin(),
            spacing: field.spacing(),
            values,
            value_range: field.value_range(),
        }
    }

    /// Returns the grid dimensions (number of samples per axis).
    #[must_use]
    pub fn dimensions(&self) -> UVec3 {
        self.dimensions
    }

    /// Returns the physical coordinate of sample `(0, 0, 0)`.
    #[must_use]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Returns the physical distance between adjacent samples per axis.
    #[must_use]
    pub fn spacing(&self) -> Vec3 {
        self.spacing
    }

    /// Returns the samples in the renderer layout.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Returns the total number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the image holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the finite value range inherited from the source field.
    #[must_use]
    pub fn value_range(&self) -> (f32, f32) {
        self.value_range
    }

    /// Returns the flat index of logical sample `(i, j, k)` in this layout.
    #[must_use]
    pub fn index_of(&self, i: u32, j: u32, k: u32) -> usize {
        (k as usize * self.dimensions.y as usize + j as usize)
            * self.dimensions.x as usize
            + i as usize
    }

    /// Returns the value at logical sample `(i, j, k)`, or `None` if out of
    /// bounds.
    #[must_use]
    pub fn sample(&self, i: u32, j: u32, k: u32) -> Option<f32> {
        if i >= self.dimensions.x || j >= self.dimensions.y || k >= self.dimensions.z {
            return None;
        }
        self.values.get(self.index_of(i, j, k)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn make_field(dim: UVec3, origin: Vec3, spacing: Vec3) -> ScalarField {
        let n = dim.x as usize * dim.y as usize * dim.z as usize;
        let values = (0..n).map(|v| v as f32).collect();
        ScalarField::new(dim, origin, spacing, values).unwrap()
    }

    #[test]
    fn test_2x2x2_exact() {
        // Native values 0..8 at (i*2 + j)*2 + k must land as [0,4,2,6,1,5,3,7].
        let field = make_field(UVec3::new(2, 2, 2), Vec3::ZERO, Vec3::ONE);
        let image = VolumeImage::from_field(&field);
        assert_eq!(image.values(), &[0.0, 4.0, 2.0, 6.0, 1.0, 5.0, 3.0, 7.0]);
    }

    #[test]
    fn test_preserves_physical_framing() {
        let origin = Vec3::new(-3.5, 0.25, 12.0);
        let spacing = Vec3::new(0.1, 0.2, 0.3);
        let field = make_field(UVec3::new(3, 4, 5), origin, spacing);
        let image = VolumeImage::from_field(&field);
        assert_eq!(image.dimensions(), field.dimensions());
        assert_eq!(image.origin(), origin);
        assert_eq!(image.spacing(), spacing);
        assert_eq!(image.value_range(), field.value_range());
    }

    #[test]
    fn test_zero_dimension_yields_empty_image() {
        let field = ScalarField::new(
            UVec3::new(3, 0, 5),
            Vec3::ZERO,
            Vec3::ONE,
            vec![],
        )
        .unwrap();
        let image = VolumeImage::from_field(&field);
        assert!(image.is_empty());
        assert_eq!(image.dimensions(), UVec3::new(3, 0, 5));
    }

    #[test]
    fn test_every_sample_lands_once() {
        // Asymmetric dimensions so every axis has a distinct stride role.
        let field = make_field(UVec3::new(2, 3, 4), Vec3::ZERO, Vec3::ONE);
        let image = VolumeImage::from_field(&field);
        assert_eq!(image.len(), field.len());
        for i in 0..2 {
            for j in 0..3 {
                for k in 0..4 {
                    assert_eq!(image.sample(i, j, k), field.sample(i, j, k));
                }
            }
        }
        // Bijection: sorted output equals sorted input.
        let mut sorted = image.values().to_vec();
        sorted.sort_by(f32::total_cmp);
        let expected: Vec<f32> = (0..24).map(|v| v as f32).collect();
        assert_eq!(sorted, expected);
    }

    proptest! {
        #[test]
        fn prop_conversion_is_coordinate_bijection(
            nx in 1_u32..6,
            ny in 1_u32..6,
            nz in 1_u32..6,
        ) {
            let field = make_field(UVec3::new(nx, ny, nz), Vec3::ZERO, Vec3::ONE);
            let image = VolumeImage::from_field(&field);
            for i in 0..nx {
                for j in 0..ny {
                    for k in 0..nz {
                        prop_assert_eq!(image.sample(i, j, k), field.sample(i, j, k));
                    }
                }
            }
        }
    }
}
