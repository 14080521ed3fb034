use serde::{Deserialize, Serialize};

use crate::metrics::MetricError;
use crate::signal::IntervalSeries;

/// Heart rate derived from RR intervals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartRate {
    /// Arithmetic mean of the instantaneous rates (bpm)
    pub mean_bpm: f64,
    /// Instantaneous rate per interval, `60 / rr_i` (bpm)
    pub instantaneous_bpm: Vec<f64>,
}

/// RMSSD-derived variability display score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HrvScore {
    /// `sqrt(mean(diff(rr)^2)) * 100`, unclamped
    pub score: f64,
    /// Score clamped to the `[0, 100]` gauge range
    pub gauge: f64,
}

/// Mean and instantaneous heart rate from RR intervals. Needs at least
/// one interval (two detected peaks); non-positive intervals or a
/// non-finite mean are reported rather than propagated into display.
pub fn heart_rate(rr: &IntervalSeries) -> Result<HeartRate, MetricError> {
    if rr.is_empty() {
        return Err(MetricError::insufficient_data(
            "heart_rate",
            "need at least 2 detected peaks",
        ));
    }
    if let Some(bad) = rr.rr.iter().find(|&&interval| !(interval > 0.0)) {
        return Err(MetricError::computation(
            "heart_rate",
            format!("non-positive RR interval {}", bad),
        ));
    }
    let instantaneous_bpm: Vec<f64> = rr.rr.iter().map(|&interval| 60.0 / interval).collect();
    let mean_bpm = instantaneous_bpm.iter().sum::<f64>() / instantaneous_bpm.len() as f64;
    if !mean_bpm.is_finite() {
        return Err(MetricError::computation(
            "heart_rate",
            "mean rate is not finite",
        ));
    }
    Ok(HeartRate {
        mean_bpm,
        instantaneous_bpm,
    })
}

/// Scaled root-mean-square of successive RR differences. The ×100
/// scaling is the display contract; `gauge` clamps it to [0, 100].
/// Needs at least two intervals (three detected peaks).
pub fn hrv_score(rr: &IntervalSeries) -> Result<HrvScore, MetricError> {
    if rr.len() < 2 {
        return Err(MetricError::insufficient_data(
            "hrv",
            "need at least 3 detected peaks",
        ));
    }
    let diffs = rr.rr.windows(2).map(|w| (w[1] - w[0]).powi(2));
    let score = (diffs.sum::<f64>() / (rr.len() as f64 - 1.0)).sqrt() * 100.0;
    if !score.is_finite() {
        return Err(MetricError::computation("hrv", "score is not finite"));
    }
    Ok(HrvScore {
        score,
        gauge: score.clamp(0.0, 100.0),
    })
}
