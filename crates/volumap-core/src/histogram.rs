//! Population histograms over scalar samples.
//!
//! The histogram is the data behind the transfer-function editing UI: a
//! population-vs-value curve that shows where the interesting density ranges
//! sit. It is a pure function of the sample values; traversal order is
//! irrelevant, so it can be built from either a [`ScalarField`] or a
//! [`VolumeImage`] snapshot.
//!
//! [`ScalarField`]: crate::field::ScalarField
//! [`VolumeImage`]: crate::volume::VolumeImage

use serde::{Deserialize, Serialize};

/// One histogram bin: a representative value and the number of samples that
/// fell into it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Center of the bin's value interval.
    pub value: f32,
    /// Number of samples in the bin.
    pub population: u64,
}

/// An ordered sequence of contiguous, non-overlapping bins, ascending by
/// value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Returns the bins, ordered ascending by value.
    #[must_use]
    pub fn bins(&self) -> &[HistogramBin] {
        &self.bins
    }

    /// Returns the number of bins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Returns true if the histogram has no bins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Returns the sum of all bin populations.
    #[must_use]
    pub fn total_population(&self) -> u64 {
        self.bins.iter().map(|b| b.population).sum()
    }
}

/// Bins scalar samples into a [`Histogram`].
///
/// Bins are uniform over the finite value range of the input. Non-finite
/// samples are excluded from both the range and the populations.
#[derive(Debug, Clone, Copy)]
pub struct HistogramBuilder {
    bins: usize,
}

impl HistogramBuilder {
    /// Creates a builder producing at most `bins` bins (clamped to at least
    /// one).
    #[must_use]
    pub fn new(bins: usize) -> Self {
        Self { bins: bins.max(1) }
    }

    /// Returns the configured bin count.
    #[must_use]
    pub fn bin_count(&self) -> usize {
        self.bins
    }

    /// Builds a histogram from the given samples.
    ///
    /// Zero samples (or none finite) yield an empty histogram. A degenerate
    /// range, where every finite sample has the same value, collapses to a
    /// single bin holding all of them.
    #[must_use]
    pub fn build(&self, samples: &[f32]) -> Histogram {
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        let mut finite = 0_u64;
        for &v in samples {
            if v.is_finite() {
                min = min.min(v);
                max = max.max(v);
                finite += 1;
            }
        }
        if finite == 0 {
            return Histogram::default();
        }
        let width = (max - min) / self.bins as f32;
        // A range too narrow to resolve distinct bin centers collapses to a
        // single bin, same as the all-equal case.
        if min == max || min + width * 0.25 == min || max - width * 0.25 == max {
            return Histogram {
                bins: vec![HistogramBin {
                    value: min,
                    population: finite,
                }],
            };
        }

        let mut populations = vec![0_u64; self.bins];
        for &v in samples {
            if !v.is_finite() {
                continue;
            }
            // The top-of-range sample maps past the last bin; clamp it in.
            let idx = (((v - min) / width) as usize).min(self.bins - 1);
            populations[idx] += 1;
        }

        let bins = populations
            .into_iter()
            .enumerate()
            .map(|(idx, population)| HistogramBin {
                value: min + (idx as f32 + 0.5) * width,
                population,
            })
            .collect();
        Histogram { bins }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_input() {
        let hist = HistogramBuilder::new(64).build(&[]);
        assert!(hist.is_empty());
        assert_eq!(hist.total_population(), 0);
    }

    #[test]
    fn test_totals_match_sample_count() {
        let samples: Vec<f32> = (0..1000).map(|v| (v as f32).sin()).collect();
        let hist = HistogramBuilder::new(32).build(&samples);
        assert_eq!(hist.total_population(), 1000);
        assert_eq!(hist.len(), 32);
    }

    #[test]
    fn test_bins_strictly_ascending() {
        let samples: Vec<f32> = (0..100).map(|v| v as f32 * 0.37 - 5.0).collect();
        let hist = HistogramBuilder::new(16).build(&samples);
        for pair in hist.bins().windows(2) {
            assert!(pair[0].value < pair[1].value);
        }
    }

    #[test]
    fn test_degenerate_range_single_bin() {
        let hist = HistogramBuilder::new(256).build(&[3.0; 50]);
        assert_eq!(hist.len(), 1);
        assert_eq!(hist.bins()[0].value, 3.0);
        assert_eq!(hist.bins()[0].population, 50);
    }

    #[test]
    fn test_non_finite_samples_excluded() {
        let hist =
            HistogramBuilder::new(4).build(&[0.0, 1.0, f32::NAN, f32::NEG_INFINITY]);
        assert_eq!(hist.total_population(), 2);
    }

    #[test]
    fn test_extremes_land_in_end_bins() {
        let hist = HistogramBuilder::new(4).build(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(hist.bins()[0].population, 1);
        // 3.0 falls in the last bin together with the top-of-range 4.0.
        assert_eq!(hist.bins()[3].population, 2);
    }

    proptest! {
        #[test]
        fn prop_total_population_equals_finite_count(
            samples in proptest::collection::vec(-1e6_f32..1e6, 0..200),
            bins in 1_usize..64,
        ) {
            let hist = HistogramBuilder::new(bins).build(&samples);
            prop_assert_eq!(hist.total_population(), samples.len() as u64);
            for pair in hist.bins().windows(2) {
                prop_assert!(pair[0].value < pair[1].value);
            }
        }
    }
}
