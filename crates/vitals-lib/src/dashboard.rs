use log::debug;
use serde::{Deserialize, Serialize};

use crate::detectors::ecg::{detect_r_peaks_with_config, PeakConfig};
use crate::metrics::heart::{heart_rate, hrv_score, HeartRate, HrvScore};
use crate::metrics::motion::{motion_series_with_config, MotionConfig};
use crate::metrics::respiration::{respiration_rate_with_config, RespirationConfig, RespirationRate};
use crate::metrics::MetricError;
use crate::signal::{IntervalSeries, MotionSeries, PeakSet, Recording};

/// Display band for the mean heart rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeartRateBand {
    Low,
    Normal,
    High,
}

impl HeartRateBand {
    pub fn classify(bpm: f64) -> Self {
        if bpm < 50.0 {
            Self::Low
        } else if bpm > 100.0 {
            Self::High
        } else {
            Self::Normal
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Low => "blue",
            Self::Normal => "green",
            Self::High => "red",
        }
    }
}

/// Display band for the last measured skin temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureBand {
    Cold,
    Normal,
    MildlyElevated,
    High,
}

impl TemperatureBand {
    pub fn classify(celsius: f64) -> Self {
        if celsius < 30.0 {
            Self::Cold
        } else if celsius <= 36.0 {
            Self::Normal
        } else if celsius <= 38.0 {
            Self::MildlyElevated
        } else {
            Self::High
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Cold => "blue",
            Self::Normal => "green",
            Self::MildlyElevated => "orange",
            Self::High => "red",
        }
    }
}

/// Gauge band for the clamped HRV score. Bands are half-open on the
/// right; 100.0 falls in the top band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HrvBand {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl HrvBand {
    pub fn classify(gauge: f64) -> Self {
        if gauge < 25.0 {
            Self::Poor
        } else if gauge < 50.0 {
            Self::Fair
        } else if gauge < 75.0 {
            Self::Good
        } else {
            Self::Excellent
        }
    }

    /// Gauge segment covered by this band.
    pub fn range(self) -> (f64, f64) {
        match self {
            Self::Poor => (0.0, 25.0),
            Self::Fair => (25.0, 50.0),
            Self::Good => (50.0, 75.0),
            Self::Excellent => (75.0, 100.0),
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Poor => "red",
            Self::Fair => "orange",
            Self::Good => "lightgreen",
            Self::Excellent => "green",
        }
    }
}

/// Heart-rate metric with its display classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartRateSummary {
    #[serde(flatten)]
    pub rate: HeartRate,
    pub band: HeartRateBand,
    pub color: String,
}

/// HRV metric with its gauge classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HrvSummary {
    #[serde(flatten)]
    pub hrv: HrvScore,
    pub band: HrvBand,
    pub color: String,
}

/// Temperature metric with its display classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemperatureSummary {
    pub celsius: f64,
    pub band: TemperatureBand,
    pub color: String,
}

/// Configuration for the whole derivation pipeline.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub peaks: PeakConfig,
    pub respiration: RespirationConfig,
    pub motion: MotionConfig,
}

/// Everything the presentation layer consumes, computed once per load.
/// Metrics that cannot be computed carry their `MetricError` so the rest
/// of the dashboard stays usable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub fs: f64,
    pub sample_count: usize,
    pub peaks: PeakSet,
    pub rr: IntervalSeries,
    pub heart_rate: Result<HeartRateSummary, MetricError>,
    pub hrv: Result<HrvSummary, MetricError>,
    pub respiration: Result<RespirationRate, MetricError>,
    pub temperature: Result<TemperatureSummary, MetricError>,
    pub motion: MotionSeries,
}

impl DashboardSummary {
    /// Run the one-directional pipeline: detector → intervals → metrics,
    /// plus the independent respiration, temperature and motion branches.
    pub fn from_recording(recording: &Recording, cfg: &DashboardConfig) -> Self {
        let peaks = detect_r_peaks_with_config(&recording.ecg, &cfg.peaks);
        let rr = IntervalSeries::from_peaks(&peaks, recording);
        debug!(
            "derived {} peaks / {} intervals from {} samples",
            peaks.len(),
            rr.len(),
            recording.len()
        );

        let heart_rate = heart_rate(&rr).map(|rate| {
            let band = HeartRateBand::classify(rate.mean_bpm);
            HeartRateSummary {
                rate,
                band,
                color: band.color().into(),
            }
        });
        let hrv = hrv_score(&rr).map(|hrv| {
            let band = HrvBand::classify(hrv.gauge);
            HrvSummary {
                hrv,
                band,
                color: band.color().into(),
            }
        });
        let respiration =
            respiration_rate_with_config(&recording.ecg, recording.fs, &cfg.respiration);
        let temperature = recording
            .last_temperature()
            .ok_or_else(|| {
                MetricError::insufficient_data("temperature", "recording holds no samples")
            })
            .map(|celsius| {
                let band = TemperatureBand::classify(celsius);
                TemperatureSummary {
                    celsius,
                    band,
                    color: band.color().into(),
                }
            });
        let motion = motion_series_with_config(recording, &cfg.motion);

        Self {
            fs: recording.fs,
            sample_count: recording.len(),
            peaks,
            rr,
            heart_rate,
            hrv,
            respiration,
            temperature,
            motion,
        }
    }
}
