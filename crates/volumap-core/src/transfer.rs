//! Transfer functions: scalar value to color and opacity.
//!
//! A [`TransferFunction`] is the pair of mappings a render surface applies to
//! a volume: a [`ColorRamp`] and an [`OpacityCurve`], each a sorted list of
//! control points evaluated piecewise-linearly. Exactly one instance exists
//! per surface; the surface owns it and the editing UI mutates it through the
//! surface's accessors.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A color control point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Scalar value this stop is anchored at.
    pub value: f32,
    /// RGB color in `[0, 1]` per channel.
    pub color: Vec3,
}

/// An opacity control point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpacityStop {
    /// Scalar value this stop is anchored at.
    pub value: f32,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
}

/// Ordered color control points mapping scalar values to colors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorRamp {
    stops: Vec<ColorStop>,
}

impl ColorRamp {
    /// Creates an empty ramp.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a control point, keeping stops sorted by value. A stop at an
    /// existing value replaces it.
    pub fn add_stop(&mut self, value: f32, color: Vec3) -> &mut Self {
        match self
            .stops
            .binary_search_by(|s| s.value.total_cmp(&value))
        {
            Ok(idx) => self.stops[idx].color = color,
            Err(idx) => self.stops.insert(idx, ColorStop { value, color }),
        }
        self
    }

    /// Returns the stops, ordered ascending by value.
    #[must_use]
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Returns true if the ramp has no stops.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Removes all stops.
    pub fn clear(&mut self) {
        self.stops.clear();
    }

    /// Samples the ramp at a scalar value, clamping outside the stop range.
    ///
    /// An empty ramp samples to black.
    #[must_use]
    pub fn sample(&self, value: f32) -> Vec3 {
        match interpolate(&self.stops, |s| s.value, value) {
            Interp::Empty => Vec3::ZERO,
            Interp::At(idx) => self.stops[idx].color,
            Interp::Between(lo, hi, t) => self.stops[lo].color.lerp(self.stops[hi].color, t),
        }
    }
}

/// Ordered opacity control points mapping scalar values to opacity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpacityCurve {
    stops: Vec<OpacityStop>,
}

impl OpacityCurve {
    /// Creates an empty curve.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a control point, keeping stops sorted by value. A stop at an
    /// existing value replaces it.
    pub fn add_stop(&mut self, value: f32, opacity: f32) -> &mut Self {
        match self
            .stops
            .binary_search_by(|s| s.value.total_cmp(&value))
        {
            Ok(idx) => self.stops[idx].opacity = opacity,
            Err(idx) => self.stops.insert(idx, OpacityStop { value, opacity }),
        }
        self
    }

    /// Returns the stops, ordered ascending by value.
    #[must_use]
    pub fn stops(&self) -> &[OpacityStop] {
        &self.stops
    }

    /// Returns true if the curve has no stops.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Removes all stops.
    pub fn clear(&mut self) {
        self.stops.clear();
    }

    /// Samples the curve at a scalar value, clamping outside the stop range.
    ///
    /// An empty curve samples to fully opaque.
    #[must_use]
    pub fn sample(&self, value: f32) -> f32 {
        match interpolate(&self.stops, |s| s.value, value) {
            Interp::Empty => 1.0,
            Interp::At(idx) => self.stops[idx].opacity,
            Interp::Between(lo, hi, t) => {
                let a = self.stops[lo].opacity;
                let b = self.stops[hi].opacity;
                a + (b - a) * t
            }
        }
    }
}

/// The color/opacity pair consumed by a render surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferFunction {
    color_ramp: ColorRamp,
    opacity_curve: OpacityCurve,
}

impl TransferFunction {
    /// Creates an empty transfer function.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a default transfer function over `[min, max]`: a cool-to-warm
    /// color ramp and a linear opacity rising from transparent at `min` to
    /// `peak_opacity` at `max`.
    #[must_use]
    pub fn for_range(min: f32, max: f32, peak_opacity: f32) -> Self {
        // Same stops the default coolwarm color map uses.
        let colors = [
            Vec3::new(0.230, 0.299, 0.754),
            Vec3::new(0.552, 0.690, 0.996),
            Vec3::new(0.866, 0.866, 0.866),
            Vec3::new(0.956, 0.604, 0.486),
            Vec3::new(0.706, 0.016, 0.150),
        ];
        let mut tf = Self::new();
        let span = max - min;
        let n = colors.len() - 1;
        for (idx, color) in colors.iter().enumerate() {
            let value = min + span * idx as f32 / n as f32;
            tf.color_ramp.add_stop(value, *color);
        }
        tf.opacity_curve.add_stop(min, 0.0);
        tf.opacity_curve.add_stop(max, peak_opacity.clamp(0.0, 1.0));
        tf
    }

    /// Returns the color ramp.
    #[must_use]
    pub fn color_ramp(&self) -> &ColorRamp {
        &self.color_ramp
    }

    /// Returns the color ramp for editing.
    pub fn color_ramp_mut(&mut self) -> &mut ColorRamp {
        &mut self.color_ramp
    }

    /// Returns the opacity curve.
    #[must_use]
    pub fn opacity_curve(&self) -> &OpacityCurve {
        &self.opacity_curve
    }

    /// Returns the opacity curve for editing.
    pub fn opacity_curve_mut(&mut self) -> &mut OpacityCurve {
        &mut self.opacity_curve
    }

    /// Returns true if both the ramp and the curve have no stops.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.color_ramp.is_empty() && self.opacity_curve.is_empty()
    }

    /// Removes all control points from both mappings.
    pub fn clear(&mut self) {
        self.color_ramp.clear();
        self.opacity_curve.clear();
    }
}

enum Interp {
    Empty,
    At(usize),
    Between(usize, usize, f32),
}

fn interpolate<S>(stops: &[S], key: impl Fn(&S) -> f32, value: f32) -> Interp {
    if stops.is_empty() {
        return Interp::Empty;
    }
    if value <= key(&stops[0]) {
        return Interp::At(0);
    }
    let last = stops.len() - 1;
    if value >= key(&stops[last]) {
        return Interp::At(last);
    }
    // First stop strictly above `value`; the bounds checks above guarantee a
    // predecessor exists.
    let hi = stops.partition_point(|s| key(s) <= value);
    let lo = hi - 1;
    let (a, b) = (key(&stops[lo]), key(&stops[hi]));
    let t = if b > a { (value - a) / (b - a) } else { 0.0 };
    Interp::Between(lo, hi, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stops_stay_sorted() {
        let mut ramp = ColorRamp::new();
        ramp.add_stop(2.0, Vec3::X)
            .add_stop(0.0, Vec3::Y)
            .add_stop(1.0, Vec3::Z);
        let values: Vec<f32> = ramp.stops().iter().map(|s| s.value).collect();
        assert_eq!(values, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_duplicate_value_replaces() {
        let mut curve = OpacityCurve::new();
        curve.add_stop(1.0, 0.25).add_stop(1.0, 0.75);
        assert_eq!(curve.stops().len(), 1);
        assert_eq!(curve.stops()[0].opacity, 0.75);
    }

    #[test]
    fn test_sample_interpolates_and_clamps() {
        let mut curve = OpacityCurve::new();
        curve.add_stop(0.0, 0.0).add_stop(10.0, 1.0);
        assert_eq!(curve.sample(-5.0), 0.0);
        assert_eq!(curve.sample(15.0), 1.0);
        assert!((curve.sample(2.5) - 0.25).abs() < 1e-6);

        let mut ramp = ColorRamp::new();
        ramp.add_stop(0.0, Vec3::ZERO).add_stop(2.0, Vec3::ONE);
        assert_eq!(ramp.sample(1.0), Vec3::splat(0.5));
    }

    #[test]
    fn test_empty_defaults() {
        assert_eq!(ColorRamp::new().sample(3.0), Vec3::ZERO);
        assert_eq!(OpacityCurve::new().sample(3.0), 1.0);
    }

    #[test]
    fn test_for_range_spans_the_range() {
        let tf = TransferFunction::for_range(-4.0, 4.0, 0.8);
        let ramp = tf.color_ramp().stops();
        assert_eq!(ramp.first().map(|s| s.value), Some(-4.0));
        assert_eq!(ramp.last().map(|s| s.value), Some(4.0));
        assert_eq!(tf.opacity_curve().sample(-4.0), 0.0);
        assert!((tf.opacity_curve().sample(4.0) - 0.8).abs() < 1e-6);
    }
}
