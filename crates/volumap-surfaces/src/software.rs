//! An in-memory volume render sink.

use std::any::Any;

use volumap_core::{Options, TransferFunction, VolumeImage, VolumeSurface};

/// A [`VolumeSurface`] that stores everything pushed to it and counts
/// redraws.
///
/// `SoftwareSurface` performs no shading; it is the reference sink for
/// embedders that drive the pipeline without a GPU backend, and the
/// observable double the integration tests bind against.
pub struct SoftwareSurface {
    image: Option<VolumeImage>,
    transfer: TransferFunction,
    seed_default_transfer: bool,
    default_peak_opacity: f32,
    redraws: u64,
}

impl SoftwareSurface {
    /// Creates a surface configured from the given options.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self {
            image: None,
            transfer: TransferFunction::new(),
            seed_default_transfer: options.seed_default_transfer,
            default_peak_opacity: options.default_peak_opacity,
            redraws: 0,
        }
    }
}

impl Default for SoftwareSurface {
    fn default() -> Self {
        Self::new(&Options::default())
    }
}

impl VolumeSurface for SoftwareSurface {
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
        // Seed editing defaults the first time real data arrives, so the
        // editor never opens on an unmapped volume.
        if self.seed_default_transfer && self.transfer.is_empty() && !image.is_empty() {
            let (min, max) = image.value_range();
            self.transfer = TransferFunction::for_range(min, max, self.default_peak_opacity);
            log::debug!("seeded default transfer function over [{min}, {max}]");
        }
        self.image = Some(image);
    }

    fn transfer_function(&self) -> &TransferFunction {
        &self.transfer
    }

    fn transfer_function_mut(&mut self) -> &mut TransferFunction {
        &mut self.transfer
    }

    fn render(&mut self) {
        self.redraws += 1;
        log::debug!("software surface redraw {}", self.redraws);
    }

    fn redraw_count(&self) -> u64 {
        self.redraws
    }
}
