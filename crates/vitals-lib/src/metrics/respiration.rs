use sci_rs::signal::filter::{design::Sos, sosfiltfilt_dyn};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, SQRT_2};

use crate::metrics::MetricError;

/// Configurable parameters for the respiration-rate estimate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RespirationConfig {
    /// Low-pass cutoff isolating the respiration envelope (Hz).
    pub cutoff_hz: f64,
}

impl Default for RespirationConfig {
    fn default() -> Self {
        Self { cutoff_hz: 0.5 }
    }
}

/// Breathing-rate estimate from the low-passed ECG envelope.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RespirationRate {
    /// Breaths per minute, rounded to one decimal
    pub breaths_per_minute: f64,
    /// Zero-crossings counted on the envelope (both polarities)
    pub crossings: usize,
}

// The envelope comes from a single second-order section.
const SOS_SECTIONS: usize = 1;

/// Estimate breaths per minute with the default 0.5 Hz cutoff.
pub fn respiration_rate(ecg: &[f64], fs: f64) -> Result<RespirationRate, MetricError> {
    respiration_rate_with_config(ecg, fs, &RespirationConfig::default())
}

/// Low-pass the ECG forward-and-backward (zero phase) and count envelope
/// zero-crossings. Two crossings make one breath cycle, hence the final
/// division by two.
pub fn respiration_rate_with_config(
    ecg: &[f64],
    fs: f64,
    cfg: &RespirationConfig,
) -> Result<RespirationRate, MetricError> {
    // sosfiltfilt reflect-pads 3 * (2 * sections + 1) samples per end
    let pad = 3 * (2 * SOS_SECTIONS + 1);
    if ecg.len() <= pad {
        return Err(MetricError::insufficient_data(
            "respiration_rate",
            format!(
                "need more than {} samples for zero-phase filtering, got {}",
                pad,
                ecg.len()
            ),
        ));
    }
    let normalized_cutoff = cfg.cutoff_hz / (fs / 2.0);
    if !(normalized_cutoff > 0.0 && normalized_cutoff < 1.0) {
        return Err(MetricError::computation(
            "respiration_rate",
            format!(
                "cutoff {} Hz is not below the Nyquist rate of a {} Hz recording",
                cfg.cutoff_hz, fs
            ),
        ));
    }

    let (b, a) = butter2_lowpass(normalized_cutoff);
    let sos = [Sos::new([b[0], b[1], b[2]], [a[0], a[1], a[2]])];
    let envelope: Vec<f64> = sosfiltfilt_dyn(ecg.iter(), &sos);

    let crossings = polarity_flips(&envelope);
    let duration = ecg.len() as f64 / fs;
    let breaths_per_minute = crossings as f64 * (60.0 / duration) / 2.0;
    if !breaths_per_minute.is_finite() {
        return Err(MetricError::computation(
            "respiration_rate",
            "estimate is not finite",
        ));
    }
    Ok(RespirationRate {
        breaths_per_minute: (breaths_per_minute * 10.0).round() / 10.0,
        crossings,
    })
}

/// 2nd-order Butterworth low-pass coefficients via the bilinear
/// transform. `normalized_cutoff` is relative to Nyquist, in (0, 1).
fn butter2_lowpass(normalized_cutoff: f64) -> ([f64; 3], [f64; 3]) {
    let k = (PI * normalized_cutoff / 2.0).tan();
    let norm = 1.0 / (1.0 + SQRT_2 * k + k * k);
    let b0 = k * k * norm;
    let b = [b0, 2.0 * b0, b0];
    let a = [
        1.0,
        2.0 * (k * k - 1.0) * norm,
        (1.0 - SQRT_2 * k + k * k) * norm,
    ];
    (b, a)
}

/// Count sign changes of either polarity, ignoring exact zeros so a
/// sample landing on 0.0 cannot double-count one crossing.
fn polarity_flips(envelope: &[f64]) -> usize {
    let mut flips = 0;
    let mut last = 0i8;
    for &value in envelope {
        let sign = if value > 0.0 {
            1
        } else if value < 0.0 {
            -1
        } else {
            0
        };
        if sign != 0 {
            if last != 0 && sign != last {
                flips += 1;
            }
            last = sign;
        }
    }
    flips
}
