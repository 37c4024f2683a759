//! Scalar fields sampled over a regular 3D grid.
//!
//! A [`ScalarField`] is an immutable grid of samples with a physical origin and
//! per-axis spacing. Fields are owned by a [`Model`](crate::model::Model) and
//! replaced wholesale whenever the owning model recomputes them; nothing in
//! volumap holds a reference into a field's buffer across a recomputation.

use glam::{UVec3, Vec3};

use crate::error::{Result, VolumapError};

/// A 3D grid of scalar samples with physical placement.
///
/// Samples are stored in the field's native layout: the value at grid
/// coordinate `(i, j, k)` lives at flat index `(i * ny + j) * nz + k`, i.e.
/// `x` is the slowest-varying axis and `z` the fastest.
#[derive(Debug, Clone)]
pub struct ScalarField {
    dimensions: UVec3,
    origin: Vec3,
    spacing: Vec3,
    values: Vec<f32>,
    value_range: (f32, f32),
}

impl ScalarField {
    /// Creates a new scalar field.
    ///
    /// # Errors
    ///
    /// Returns [`VolumapError::SizeMismatch`] if `values.len()` does not equal
    /// the product of the dimensions.
    pub fn new(
        dimensions: UVec3,
        origin: Vec3,
        spacing: Vec3,
        values: Vec<f32>,
    ) -> Result<Self> {
        let expected =
            dimensions.x as usize * dimensions.y as usize * dimensions.z as usize;
        if values.len() != expected {
            return Err(VolumapError::SizeMismatch {
                expected,
                actual: values.len(),
            });
        }
        let value_range = compute_range(&values);
        Ok(Self {
            dimensions,
            origin,
            spacing,
            values,
            value_range,
        })
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

    /// Returns the samples in the field's native layout.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Returns the total number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the field holds no samples (any dimension is zero).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the minimum and maximum finite sample values.
    ///
    /// Falls back to `(0.0, 1.0)` when the field has no finite samples.
    #[must_use]
    pub fn value_range(&self) -> (f32, f32) {
        self.value_range
    }

    /// Returns the flat index of sample `(i, j, k)` in the native layout.
    #[must_use]
    pub fn index_of(&self, i: u32, j: u32, k: u32) -> usize {
        (i as usize * self.dimensions.y as usize + j as usize)
            * self.dimensions.z as usize
            + k as usize
    }

    /// Returns the value at grid coordinate `(i, j, k)`, or `None` if out of
    /// bounds.
    #[must_use]
    pub fn sample(&self, i: u32, j: u32, k: u32) -> Option<f32> {
        if i >= self.dimensions.x || j >= self.dimensions.y || k >= self.dimensions.z {
            return None;
        }
        self.values.get(self.index_of(i, j, k)).copied()
    }

    /// Returns the world position of grid coordinate `(i, j, k)`.
    #[must_use]
    pub fn world_position(&self, i: u32, j: u32, k: u32) -> Vec3 {
        self.origin + Vec3::new(i as f32, j as f32, k as f32) * self.spacing
    }
}

fn compute_range(values: &[f32]) -> (f32, f32) {
    let mut min = f32::MAX;
    let mut max = f32::MIN;
    for &v in values {
        if v.is_finite() {
            min = min.min(v);
            max = max.max(v);
        }
    }
    if min > max {
        (0.0, 1.0)
    } else {
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_mismatch() {
        let err = ScalarField::new(
            UVec3::new(2, 2, 2),
            Vec3::ZERO,
            Vec3::ONE,
            vec![0.0; 7],
        );
        assert!(matches!(
            err,
            Err(VolumapError::SizeMismatch {
                expected: 8,
                actual: 7
            })
        ));
    }

    #[test]
    fn test_native_indexing() {
        let field = ScalarField::new(
            UVec3::new(2, 3, 4),
            Vec3::ZERO,
            Vec3::ONE,
            (0..24).map(|v| v as f32).collect(),
        )
        .unwrap();

        assert_eq!(field.index_of(0, 0, 0), 0);
        assert_eq!(field.index_of(1, 2, 3), (1 * 3 + 2) * 4 + 3);
        assert_eq!(field.sample(1, 2, 3), Some(23.0));
        assert_eq!(field.sample(2, 0, 0), None);
    }

    #[test]
    fn test_world_position() {
        let field = ScalarField::new(
            UVec3::new(2, 2, 2),
            Vec3::new(-1.0, 0.0, 2.0),
            Vec3::new(0.5, 1.0, 2.0),
            vec![0.0; 8],
        )
        .unwrap();
        assert_eq!(field.world_position(0, 0, 0), Vec3::new(-1.0, 0.0, 2.0));
        assert_eq!(field.world_position(1, 1, 1), Vec3::new(-0.5, 1.0, 4.0));
    }

    #[test]
    fn test_value_range_skips_non_finite() {
        let field = ScalarField::new(
            UVec3::new(1, 1, 4),
            Vec3::ZERO,
            Vec3::ONE,
            vec![f32::NAN, -2.0, 5.0, f32::INFINITY],
        )
        .unwrap();
        assert_eq!(field.value_range(), (-2.0, 5.0));
    }

    #[test]
    fn test_zero_dimension_is_empty() {
        let field =
            ScalarField::new(UVec3::new(0, 4, 4), Vec3::ZERO, Vec3::ONE, vec![]).unwrap();
        assert!(field.is_empty());
        assert_eq!(field.value_range(), (0.0, 1.0));
    }
}
