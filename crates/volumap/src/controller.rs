//! The volume pipeline orchestrator.

use std::sync::{Arc, RwLock};

use volumap_core::{
    Histogram, HistogramBuilder, Model, ModelChange, Options, SurfaceId, SurfaceRegistry,
    TransferFunction, VolumeImage,
};

use crate::binding::SurfaceBinding;
use crate::editor::{EditorEvent, EditorFactory, TransferEditor};
use crate::tracker::ActiveSurfaceProvider;

/// Shared handle to the surface registry.
pub type SharedSurfaces = Arc<RwLock<SurfaceRegistry>>;

/// Shared handle to a molecular model.
pub type SharedModel = Arc<RwLock<Model>>;

/// Reacts to model and focus events, keeps the converted volume, the
/// histogram, and the surface binding in sync, and routes transfer-function
/// edits to the active surface.
///
/// All entry points run synchronously on the calling (event) thread; each
/// event is processed to completion before the next one is delivered, so a
/// redraw request can never observe a histogram or binding older than the
/// last handled event.
pub struct VolumeController {
    surfaces: SharedSurfaces,
    tracker: Arc<dyn ActiveSurfaceProvider>,
    editor_factory: Box<dyn EditorFactory>,
    options: Options,
    model: Option<SharedModel>,
    binding: SurfaceBinding,
    editor: Option<Box<dyn TransferEditor>>,
    histogram: Option<Histogram>,
    active_field_index: usize,
    actions_enabled: bool,
}

impl VolumeController {
    /// Creates a controller wired to its collaborators.
    ///
    /// No model is attached and nothing is bound until the first events
    /// arrive; all actions start disabled.
    pub fn new(
        surfaces: SharedSurfaces,
        tracker: Arc<dyn ActiveSurfaceProvider>,
        editor_factory: Box<dyn EditorFactory>,
        options: Options,
    ) -> Self {
        Self {
            surfaces,
            tracker,
            editor_factory,
            options,
            model: None,
            binding: SurfaceBinding::new(),
            editor: None,
            histogram: None,
            active_field_index: 0,
            actions_enabled: false,
        }
    }

    /// Replaces the observed model.
    ///
    /// Change notifications for the previous model stop mattering the moment
    /// it is detached; the caller routes subsequent [`on_model_changed`]
    /// deliveries for the new model only. Attaching the model that is
    /// already observed changes nothing.
    ///
    /// [`on_model_changed`]: VolumeController::on_model_changed
    pub fn attach_model(&mut self, model: Option<SharedModel>) {
        let same = match (&self.model, &model) {
            (Some(current), Some(new)) => Arc::ptr_eq(current, new),
            (None, None) => true,
            _ => false,
        };
        if same {
            return;
        }

        self.model = model;
        self.active_field_index = 0;
        self.sync_binding();
        self.update_actions();
    }

    /// Opens the transfer-function editor.
    ///
    /// The editor session is created on first use only; every call recomputes
    /// and pushes the volume and histogram for the active surface before
    /// surfacing the editor.
    pub fn open_editor(&mut self) {
        if self.editor.is_none() {
            self.editor = Some(self.editor_factory.create_editor());
            log::info!("transfer editor session created");
        }
        self.refresh();
        if let Some(editor) = &mut self.editor {
            editor.show();
        }
    }

    /// Handles a model change notification.
    ///
    /// Field additions and removals rerun the conversion/histogram pipeline
    /// (or unbind and disable, if the model no longer qualifies); every other
    /// change kind is none of this pipeline's business.
    pub fn on_model_changed(&mut self, change: ModelChange) {
        match change {
            ModelChange::FieldsAdded | ModelChange::FieldsRemoved => self.refresh(),
            ModelChange::Appearance => {}
        }
    }

    /// Handles a change of the active surface.
    pub fn on_active_surface_changed(&mut self) {
        self.refresh();
    }

    /// Handles a "volume data updated" delivery from a surface.
    ///
    /// Only deliveries for the surface the controller is currently connected
    /// to are acted on; anything else is a stale signal and is dropped.
    pub fn on_volume_data_updated(&mut self, surface: SurfaceId) {
        if !self.binding.is_bound_to(surface) {
            return;
        }
        let live = self.binding.connection().is_some_and(|connection| {
            self.surfaces
                .read()
                .expect("surface registry lock poisoned")
                .is_connected(connection)
        });
        if live {
            self.refresh();
        }
    }

    /// Handles a signal from the editing UI. Every variant results in a
    /// redraw request against the bound surface.
    pub fn on_editor_event(&mut self, event: EditorEvent) {
        match event {
            EditorEvent::ColorRampChanged
            | EditorEvent::OpacityChanged
            | EditorEvent::RedrawNeeded => self.request_redraw(),
        }
    }

    /// Asks the bound surface to redraw. A no-op when unbound.
    pub fn request_redraw(&mut self) {
        let Some(id) = self.binding.bound_surface() else {
            return;
        };
        let mut surfaces = self.surfaces.write().expect("surface registry lock poisoned");
        if let Some(surface) = surfaces.get_mut(id) {
            surface.render();
        }
    }

    /// Applies an edit to the active surface's live transfer function, then
    /// requests a redraw. Returns whether the edit was applied.
    pub fn edit_transfer_function(&mut self, edit: impl FnOnce(&mut TransferFunction)) -> bool {
        let Some(id) = self.binding.bound_surface() else {
            return false;
        };
        {
            let mut surfaces =
                self.surfaces.write().expect("surface registry lock poisoned");
            let Some(surface) = surfaces.get_mut(id) else {
                return false;
            };
            edit(surface.transfer_function_mut());
        }
        self.request_redraw();
        true
    }

    /// Selects which of the model's scalar fields feeds the pipeline.
    ///
    /// The index is clamped into range at every use, so an out-of-range
    /// selection degrades to the last field rather than failing.
    pub fn set_active_field(&mut self, index: usize) {
        if self.active_field_index != index {
            self.active_field_index = index;
            self.refresh();
        }
    }

    /// Returns the selected scalar-field index.
    #[must_use]
    pub fn active_field_index(&self) -> usize {
        self.active_field_index
    }

    /// Returns whether the user-facing volume actions should be enabled.
    ///
    /// True exactly when a volume-capable surface is active, a model is
    /// attached, and that model has at least one scalar field.
    #[must_use]
    pub fn actions_enabled(&self) -> bool {
        self.actions_enabled
    }

    /// Returns the surface currently bound, if any.
    #[must_use]
    pub fn bound_surface(&self) -> Option<SurfaceId> {
        self.binding.bound_surface()
    }

    /// Returns the most recently computed histogram, if any.
    #[must_use]
    pub fn histogram(&self) -> Option<&Histogram> {
        self.histogram.as_ref()
    }

    /// Returns the controller options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    fn model_has_fields(&self) -> bool {
        self.model.as_ref().is_some_and(|model| {
            model.read().expect("model lock poisoned").field_count() > 0
        })
    }

    /// Moves the binding to wherever focus and model state say it should be.
    fn sync_binding(&mut self) {
        let target = if self.model_has_fields() {
            self.tracker.active_surface()
        } else {
            None
        };
        let mut surfaces = self.surfaces.write().expect("surface registry lock poisoned");
        let _ = self.binding.rebind(&mut surfaces, target);
    }

    fn update_actions(&mut self) {
        let enabled = self.binding.bound_surface().is_some();
        if enabled != self.actions_enabled {
            self.actions_enabled = enabled;
            log::debug!(
                "volume actions {}",
                if enabled { "enabled" } else { "disabled" }
            );
        }
    }

    /// Reruns the pipeline for the current binding: convert the active field,
    /// push it to the surface, rebuild the histogram, refresh the editor.
    fn refresh(&mut self) {
        self.sync_binding();
        self.update_actions();

        let Some(surface_id) = self.binding.bound_surface() else {
            return;
        };
        let Some(model) = &self.model else {
            return;
        };

        // Re-fetch the current field; the model may have replaced it since
        // the last cycle.
        let image = {
            let model = model.read().expect("model lock poisoned");
            let index = self
                .active_field_index
                .min(model.field_count().saturating_sub(1));
            let Some(field) = model.field(index) else {
                return;
            };
            VolumeImage::from_field(field)
        };

        let pushed = {
            let mut surfaces =
                self.surfaces.write().expect("surface registry lock poisoned");
            let Some(surface) = surfaces.get_mut(surface_id) else {
                return;
            };
            surface.set_volume_image(image);

            // A surface may stage volume data asynchronously; until it
            // reports a buffer there is nothing to histogram this cycle.
            surface.volume_image().map(|image| {
                let histogram = HistogramBuilder::new(self.options.histogram_bins)
                    .build(image.values());
                (histogram, surface.transfer_function().clone())
            })
        };
        let Some((histogram, snapshot)) = pushed else {
            return;
        };

        if let Some(editor) = &mut self.editor {
            editor.set_histogram(&histogram);
            editor.set_transfer_snapshot(&snapshot);
        }
        self.histogram = Some(histogram);
    }
}
