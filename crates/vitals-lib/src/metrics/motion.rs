use serde::{Deserialize, Serialize};

use crate::signal::{MotionBlock, MotionSeries, Recording};

/// Configurable parameters for the motion-intensity proxy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Width of one aggregation block, in timestamp units.
    pub block_width: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self { block_width: 5.0 }
    }
}

/// Motion intensity with the default 5-unit block width.
pub fn motion_series(recording: &Recording) -> MotionSeries {
    motion_series_with_config(recording, &MotionConfig::default())
}

/// Per-sample intensity is the absolute numerical gradient of the ECG;
/// samples fall into blocks keyed by `floor(t / width) * width` and each
/// block reports its mean intensity, in block order. An empty recording
/// yields an empty series.
pub fn motion_series_with_config(recording: &Recording, cfg: &MotionConfig) -> MotionSeries {
    let intensity: Vec<f64> = gradient(&recording.ecg).iter().map(|g| g.abs()).collect();
    let width = cfg.block_width.max(f64::EPSILON);

    let mut blocks: Vec<MotionBlock> = Vec::new();
    let mut current: Option<(f64, f64, usize)> = None;
    for (&t, &value) in recording.timestamps.iter().zip(&intensity) {
        let start = (t / width).floor() * width;
        match &mut current {
            Some((block, sum, count)) if *block == start => {
                *sum += value;
                *count += 1;
            }
            slot => {
                if let Some((block, sum, count)) = slot.take() {
                    blocks.push(MotionBlock {
                        start: block,
                        intensity: sum / count as f64,
                    });
                }
                *slot = Some((start, value, 1));
            }
        }
    }
    if let Some((block, sum, count)) = current {
        blocks.push(MotionBlock {
            start: block,
            intensity: sum / count as f64,
        });
    }
    MotionSeries { blocks }
}

/// First-derivative approximation: central differences inside, one-sided
/// at the edges, matching the conventional numerical gradient.
fn gradient(data: &[f64]) -> Vec<f64> {
    let n = data.len();
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let mut out = vec![0.0; n];
            out[0] = data[1] - data[0];
            out[n - 1] = data[n - 1] - data[n - 2];
            for i in 1..n - 1 {
                out[i] = (data[i + 1] - data[i - 1]) / 2.0;
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording(timestamps: Vec<f64>, ecg: Vec<f64>) -> Recording {
        let n = ecg.len();
        Recording {
            fs: 1.0,
            timestamps,
            ecg,
            temperature: vec![36.0; n],
        }
    }

    #[test]
    fn flat_ecg_has_zero_intensity_everywhere() {
        let rec = recording((0..20).map(|i| i as f64).collect(), vec![0.7; 20]);
        let series = motion_series(&rec);
        assert_eq!(series.len(), 4);
        assert!(series.blocks.iter().all(|b| b.intensity == 0.0));
    }

    #[test]
    fn blocks_start_on_width_multiples_in_order() {
        let rec = recording(
            vec![0.0, 1.0, 4.9, 5.0, 9.9, 10.0, 12.0],
            vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0],
        );
        let series = motion_series(&rec);
        let starts: Vec<f64> = series.blocks.iter().map(|b| b.start).collect();
        assert_eq!(starts, vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn gradient_matches_central_differences() {
        let g = gradient(&[0.0, 1.0, 4.0, 9.0]);
        assert_eq!(g, vec![1.0, 2.0, 4.0, 5.0]);
    }

    #[test]
    fn block_width_is_configurable() {
        let rec = recording(
            (0..10).map(|i| i as f64).collect(),
            (0..10).map(|i| i as f64).collect(),
        );
        let cfg = MotionConfig { block_width: 2.0 };
        let series = motion_series_with_config(&rec, &cfg);
        assert_eq!(series.len(), 5);
        // linear ramp has unit gradient everywhere
        assert!(series
            .blocks
            .iter()
            .all(|b| (b.intensity - 1.0).abs() < 1e-12));
    }

    #[test]
    fn empty_recording_yields_empty_series() {
        let rec = recording(vec![], vec![]);
        assert!(motion_series(&rec).is_empty());
    }

    #[test]
    fn single_sample_yields_one_zero_block() {
        let rec = recording(vec![3.2], vec![0.5]);
        let series = motion_series(&rec);
        assert_eq!(series.len(), 1);
        assert_eq!(series.blocks[0].start, 0.0);
        assert_eq!(series.blocks[0].intensity, 0.0);
    }
}
