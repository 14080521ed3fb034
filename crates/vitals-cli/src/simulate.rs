use anyhow::{Context, Result};
use csv::WriterBuilder;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::PI;
use std::path::Path;

use vitals_lib::signal::Recording;

/// Parameters for the synthetic recording generator.
#[derive(Debug, Clone, Copy)]
pub struct SimulateConfig {
    pub duration_s: f64,
    pub fs: f64,
    pub bpm: f64,
    pub breaths_per_min: f64,
    pub temperature: f64,
    /// Fractional jitter applied to every RR interval
    pub rr_jitter: f64,
    pub seed: u64,
}

const SPIKE_WIDTH_S: f64 = 0.02;
const BREATH_AMPLITUDE: f64 = 0.15;

/// Deterministic synthetic recording: Gaussian R-spikes at the target
/// beat rate with seeded RR jitter, a sinusoidal respiration baseline,
/// and a constant skin temperature.
pub fn synthetic_recording(cfg: &SimulateConfig) -> Recording {
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let base_rr = 60.0 / cfg.bpm;
    let mut beats = Vec::new();
    let mut t = 0.5;
    while t < cfg.duration_s {
        beats.push(t);
        let jitter = if cfg.rr_jitter > 0.0 {
            rng.gen_range(-cfg.rr_jitter..=cfg.rr_jitter)
        } else {
            0.0
        };
        t += base_rr * (1.0 + jitter);
    }

    let breath_hz = cfg.breaths_per_min / 60.0;
    let n = (cfg.duration_s * cfg.fs) as usize;
    let mut timestamps = Vec::with_capacity(n);
    let mut ecg = Vec::with_capacity(n);
    for i in 0..n {
        let time = i as f64 / cfg.fs;
        let mut v = BREATH_AMPLITUDE * (2.0 * PI * breath_hz * time).sin();
        for &beat in &beats {
            v += (-0.5 * ((time - beat) / SPIKE_WIDTH_S).powi(2)).exp();
        }
        timestamps.push(time);
        ecg.push(v);
    }

    Recording {
        fs: cfg.fs,
        timestamps,
        ecg,
        temperature: vec![cfg.temperature; n],
    }
}

/// Write a synthetic recording in the collaborator CSV format.
pub fn write_recording_csv(path: &Path, cfg: &SimulateConfig) -> Result<()> {
    let recording = synthetic_recording(cfg);
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["timestamp", "ecg", "temperatuur"])?;
    for i in 0..recording.len() {
        writer.write_record(&[
            recording.timestamps[i].to_string(),
            recording.ecg[i].to_string(),
            recording.temperature[i].to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
