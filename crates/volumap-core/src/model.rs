//! The molecular model's scalar-field collection and its change protocol.

use crate::error::{Result, VolumapError};
use crate::field::ScalarField;

/// The category of a model change notification.
///
/// Only field additions and removals matter to the volume pipeline; every
/// other kind of model edit is collapsed into [`ModelChange::Appearance`] and
/// left to other collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelChange {
    /// One or more scalar fields were added.
    FieldsAdded,
    /// One or more scalar fields were removed.
    FieldsRemoved,
    /// A change with no effect on the scalar-field collection.
    Appearance,
}

/// Owner of the scalar fields attached to a molecular model.
///
/// Fields are replaced wholesale, never mutated in place; consumers re-fetch
/// the current field on every use rather than holding onto its buffer.
#[derive(Debug, Default)]
pub struct Model {
    fields: Vec<ScalarField>,
}

impl Model {
    /// Creates a model with no scalar fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of attached scalar fields.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Returns the scalar field at `index`, if present.
    #[must_use]
    pub fn field(&self, index: usize) -> Option<&ScalarField> {
        self.fields.get(index)
    }

    /// Returns an iterator over the attached scalar fields.
    pub fn fields(&self) -> impl Iterator<Item = &ScalarField> {
        self.fields.iter()
    }

    /// Attaches a scalar field and reports the implied change kind.
    pub fn add_field(&mut self, field: ScalarField) -> ModelChange {
        self.fields.push(field);
        ModelChange::FieldsAdded
    }

    /// Replaces the scalar field at `index` with a recomputed version.
    ///
    /// # Errors
    ///
    /// Returns [`VolumapError::FieldNotFound`] if `index` is out of range.
    pub fn replace_field(&mut self, index: usize, field: ScalarField) -> Result<ModelChange> {
        let slot = self
            .fields
            .get_mut(index)
            .ok_or(VolumapError::FieldNotFound(index))?;
        *slot = field;
        // A wholesale replacement is an add as far as consumers care.
        Ok(ModelChange::FieldsAdded)
    }

    /// Detaches the scalar field at `index` and reports the implied change
    /// kind.
    ///
    /// # Errors
    ///
    /// Returns [`VolumapError::FieldNotFound`] if `index` is out of range.
    pub fn remove_field(&mut self, index: usize) -> Result<ModelChange> {
        if index >= self.fields.len() {
            return Err(VolumapError::FieldNotFound(index));
        }
        let _ = self.fields.remove(index);
        Ok(ModelChange::FieldsRemoved)
    }

    /// Detaches every scalar field. Returns `None` if there was nothing to
    /// remove.
    pub fn clear_fields(&mut self) -> Option<ModelChange> {
        if self.fields.is_empty() {
            return None;
        }
        self.fields.clear();
        Some(ModelChange::FieldsRemoved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{UVec3, Vec3};

    fn field() -> ScalarField {
        ScalarField::new(UVec3::new(1, 1, 2), Vec3::ZERO, Vec3::ONE, vec![0.0, 1.0])
            .unwrap()
    }

    #[test]
    fn test_mutators_report_change_kind() {
        let mut model = Model::new();
        assert_eq!(model.add_field(field()), ModelChange::FieldsAdded);
        assert_eq!(model.field_count(), 1);
        assert_eq!(
            model.replace_field(0, field()).unwrap(),
            ModelChange::FieldsAdded
        );
        assert_eq!(model.remove_field(0).unwrap(), ModelChange::FieldsRemoved);
        assert_eq!(model.field_count(), 0);
    }

    #[test]
    fn test_out_of_range_errors() {
        let mut model = Model::new();
        assert!(matches!(
            model.remove_field(3),
            Err(VolumapError::FieldNotFound(3))
        ));
        assert!(model.replace_field(0, field()).is_err());
    }

    #[test]
    fn test_clear_on_empty_is_no_change() {
        let mut model = Model::new();
        assert_eq!(model.clear_fields(), None);
        let _ = model.add_field(field());
        assert_eq!(model.clear_fields(), Some(ModelChange::FieldsRemoved));
    }
}
