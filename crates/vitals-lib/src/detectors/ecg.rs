use serde::{Deserialize, Serialize};

use crate::signal::PeakSet;

/// Configurable parameters for R-peak detection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeakConfig {
    /// Amplitude threshold as a fraction of the recording-wide maximum.
    pub threshold_ratio: f64,
}

impl Default for PeakConfig {
    fn default() -> Self {
        Self {
            threshold_ratio: 0.6,
        }
    }
}

/// Absolute amplitude threshold for the given samples.
pub fn peak_threshold(ecg: &[f64], threshold_ratio: f64) -> f64 {
    let max = ecg.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    threshold_ratio * max
}

/// Detect R-peaks with the default configuration.
pub fn detect_r_peaks(ecg: &[f64]) -> PeakSet {
    detect_r_peaks_with_config(ecg, &PeakConfig::default())
}

/// Locate R-peaks: local maxima whose amplitude reaches
/// `threshold_ratio * max(ecg)` (boundary inclusive).
///
/// A flat top counts as a single peak at the earliest index of the
/// plateau; the first and last samples are never peaks.
pub fn detect_r_peaks_with_config(ecg: &[f64], cfg: &PeakConfig) -> PeakSet {
    let n = ecg.len();
    if n < 3 {
        return PeakSet::from_indices(Vec::new());
    }

    let threshold = peak_threshold(ecg, cfg.threshold_ratio);
    let mut indices = Vec::new();
    let mut i = 1;
    while i < n - 1 {
        if ecg[i] > ecg[i - 1] {
            // walk any plateau to find where the signal turns again
            let start = i;
            let mut j = i;
            while j + 1 < n && ecg[j + 1] == ecg[j] {
                j += 1;
            }
            if j + 1 < n && ecg[j + 1] < ecg[j] && ecg[start] >= threshold {
                indices.push(start);
            }
            i = j + 1;
        } else {
            i += 1;
        }
    }
    PeakSet::from_indices(indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn finds_sinusoid_peaks_at_known_period() {
        let fs = 1024.0;
        let f = 1.2;
        let n = (10.0 * fs) as usize;
        let ecg: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * f * i as f64 / fs).sin())
            .collect();
        let peaks = detect_r_peaks(&ecg);
        assert_eq!(peaks.len(), 12);
        let period_samples = fs / f;
        for w in peaks.indices.windows(2) {
            let spacing = (w[1] - w[0]) as f64;
            assert!(
                (spacing - period_samples).abs() <= 2.0,
                "peak spacing {} samples, expected ~{}",
                spacing,
                period_samples
            );
        }
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        let at_threshold = vec![0.0, 0.6, 0.0, 1.0, 0.0];
        let peaks = detect_r_peaks(&at_threshold);
        assert_eq!(peaks.indices, vec![1, 3]);

        let just_below = vec![0.0, 0.6 - 1e-9, 0.0, 1.0, 0.0];
        let peaks = detect_r_peaks(&just_below);
        assert_eq!(peaks.indices, vec![3]);
    }

    #[test]
    fn plateau_resolves_to_earliest_index() {
        let ecg = vec![0.0, 1.0, 1.0, 1.0, 0.0];
        let peaks = detect_r_peaks(&ecg);
        assert_eq!(peaks.indices, vec![1]);
    }

    #[test]
    fn endpoints_are_never_peaks() {
        let ecg = vec![2.0, 1.0, 0.0, 1.0, 2.0];
        let peaks = detect_r_peaks(&ecg);
        assert!(peaks.is_empty());
    }

    #[test]
    fn short_sequences_yield_no_peaks() {
        assert!(detect_r_peaks(&[]).is_empty());
        assert!(detect_r_peaks(&[1.0]).is_empty());
        assert!(detect_r_peaks(&[1.0, 2.0]).is_empty());
    }

    #[test]
    fn custom_ratio_widens_the_net() {
        let ecg = vec![0.0, 0.5, 0.0, 1.0, 0.0];
        assert_eq!(detect_r_peaks(&ecg).indices, vec![3]);
        let cfg = PeakConfig {
            threshold_ratio: 0.4,
        };
        assert_eq!(detect_r_peaks_with_config(&ecg, &cfg).indices, vec![1, 3]);
    }
}
