//! Contracts for the transfer-function editing UI.
//!
//! The editor widget itself lives with the embedding application; volumap
//! only defines what it is fed and which signals it raises back. The
//! controller constructs the editor session at most once per lifetime and
//! refreshes its contents on every open.

use volumap_core::{Histogram, TransferFunction};

/// A signal raised by the editing UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorEvent {
    /// The user changed a color ramp control point.
    ColorRampChanged,
    /// The user changed an opacity control point.
    OpacityChanged,
    /// The UI wants a redraw for some other reason.
    RedrawNeeded,
}

/// The editing UI as the controller sees it.
///
/// The controller pushes display data in; edits to the live transfer function
/// are routed through
/// [`VolumeController::edit_transfer_function`](crate::VolumeController::edit_transfer_function)
/// and announced back via [`EditorEvent`]s.
pub trait TransferEditor: Send {
    /// Replaces the histogram backing the population plot.
    fn set_histogram(&mut self, histogram: &Histogram);

    /// Replaces the displayed snapshot of the active surface's transfer
    /// function.
    fn set_transfer_snapshot(&mut self, transfer: &TransferFunction);

    /// Brings the editor to the front.
    fn show(&mut self);
}

/// Constructs the editor session on first use.
pub trait EditorFactory: Send + Sync {
    /// Creates the editor widget. Called at most once per controller.
    fn create_editor(&self) -> Box<dyn TransferEditor>;
}
