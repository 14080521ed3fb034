use serde::{Deserialize, Serialize};

/// Sampling rate assumed when a recording is too short to infer one (Hz).
pub const DEFAULT_FS: f64 = 1024.0;

/// One fully loaded physiological recording: ECG waveform plus skin
/// temperature, sampled on a shared timeline. Read-only after load; every
/// derived quantity is recomputed from scratch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    /// Uniform sampling frequency in Hz
    pub fs: f64,
    /// Sample times in seconds, strictly increasing
    pub timestamps: Vec<f64>,
    /// Raw ECG amplitude per sample
    pub ecg: Vec<f64>,
    /// Skin temperature per sample (°C)
    pub temperature: Vec<f64>,
}

impl Recording {
    pub fn len(&self) -> usize {
        self.ecg.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ecg.is_empty()
    }

    pub fn duration(&self) -> f64 {
        self.ecg.len() as f64 / self.fs
    }

    /// Most recent temperature sample, if any.
    pub fn last_temperature(&self) -> Option<f64> {
        self.temperature.last().copied()
    }
}

/// Indices of detected R-peaks into a `Recording`, strictly increasing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeakSet {
    pub indices: Vec<usize>,
}

impl PeakSet {
    pub fn from_indices(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Peak times looked up on the recording's timeline.
    pub fn timestamps(&self, recording: &Recording) -> Vec<f64> {
        self.indices
            .iter()
            .filter_map(|&i| recording.timestamps.get(i).copied())
            .collect()
    }
}

/// RR intervals (seconds): successive timestamp differences between
/// consecutive detected peaks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalSeries {
    pub rr: Vec<f64>,
}

impl IntervalSeries {
    pub fn from_peaks(peaks: &PeakSet, recording: &Recording) -> Self {
        let times = peaks.timestamps(recording);
        let rr = times.windows(2).map(|w| w[1] - w[0]).collect();
        Self { rr }
    }

    pub fn len(&self) -> usize {
        self.rr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rr.is_empty()
    }
}

/// Mean motion intensity over one fixed-width time block.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MotionBlock {
    /// Block start on the recording timeline (same unit as timestamps)
    pub start: f64,
    pub intensity: f64,
}

/// Motion-intensity proxy per time block, ordered by block start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionSeries {
    pub blocks: Vec<MotionBlock>,
}

impl MotionSeries {
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
