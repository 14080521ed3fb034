use serde::{Deserialize, Serialize};

use crate::signal::{MotionSeries, Recording};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Axis {
    pub label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Style {
    pub width: f32,
    pub color: Color,
}

#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct Color(pub u32);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineSeries {
    pub name: String,
    pub points: Vec<[f64; 2]>,
    pub style: Style,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Series {
    Line(LineSeries),
}

/// Backend-neutral chart description; the CLI rasterizes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Figure {
    pub title: Option<String>,
    pub x: Axis,
    pub y: Axis,
    pub series: Vec<Series>,
}

impl Figure {
    pub fn new(title: impl Into<Option<String>>) -> Self {
        Self {
            title: title.into(),
            x: Axis { label: None },
            y: Axis { label: None },
            series: Vec::new(),
        }
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }
}

/// Bucket decimation so a long waveform stays drawable.
pub fn decimate_points(points: &[[f64; 2]], max_points: usize) -> Vec<[f64; 2]> {
    if points.len() <= max_points {
        return points.to_vec();
    }
    let bucket_size = points.len() as f64 / max_points as f64;
    let mut result = Vec::with_capacity(max_points);
    for i in 0..max_points {
        let start = (i as f64 * bucket_size).floor() as usize;
        if start >= points.len() {
            break;
        }
        result.push(points[start]);
    }
    result
}

/// Raw ECG waveform against the recording timeline.
pub fn figure_from_recording(recording: &Recording, max_points: usize) -> Figure {
    let points: Vec<[f64; 2]> = recording
        .timestamps
        .iter()
        .zip(&recording.ecg)
        .map(|(&t, &v)| [t, v])
        .collect();
    let decimated = decimate_points(&points, max_points);
    let mut fig = Figure::new(Some("ECG signal".into()));
    fig.x.label = Some("Time (s)".into());
    fig.y.label = Some("Amplitude".into());
    fig.add_series(Series::Line(LineSeries {
        name: "ecg".into(),
        points: decimated,
        style: Style {
            width: 1.4,
            color: Color(0x0000FF),
        },
    }));
    fig
}

/// Block-averaged motion intensity.
pub fn figure_from_motion(motion: &MotionSeries) -> Figure {
    let points: Vec<[f64; 2]> = motion
        .blocks
        .iter()
        .map(|b| [b.start, b.intensity])
        .collect();
    let mut fig = Figure::new(Some("Motion intensity".into()));
    fig.x.label = Some("Time (s)".into());
    fig.y.label = Some("Intensity".into());
    fig.add_series(Series::Line(LineSeries {
        name: "intensity".into(),
        points,
        style: Style {
            width: 2.0,
            color: Color(0xFF7700),
        },
    }));
    fig
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::MotionBlock;

    #[test]
    fn decimation_caps_point_count() {
        let points: Vec<[f64; 2]> = (0..5000).map(|i| [i as f64, 0.0]).collect();
        let decimated = decimate_points(&points, 1024);
        assert_eq!(decimated.len(), 1024);
        assert_eq!(decimated[0], [0.0, 0.0]);
    }

    #[test]
    fn short_series_pass_through_unchanged() {
        let points = vec![[0.0, 1.0], [1.0, 2.0]];
        assert_eq!(decimate_points(&points, 1024), points);
    }

    #[test]
    fn waveform_figure_uses_the_timeline() {
        let rec = Recording {
            fs: 2.0,
            timestamps: vec![10.0, 10.5, 11.0],
            ecg: vec![0.1, 0.9, 0.2],
            temperature: vec![36.0; 3],
        };
        let fig = figure_from_recording(&rec, 1024);
        let Series::Line(line) = &fig.series[0];
        assert_eq!(line.points[0], [10.0, 0.1]);
        assert_eq!(line.points[2], [11.0, 0.2]);
    }

    #[test]
    fn motion_figure_is_block_ordered() {
        let motion = MotionSeries {
            blocks: vec![
                MotionBlock {
                    start: 0.0,
                    intensity: 0.2,
                },
                MotionBlock {
                    start: 5.0,
                    intensity: 0.4,
                },
            ],
        };
        let fig = figure_from_motion(&motion);
        let Series::Line(line) = &fig.series[0];
        assert_eq!(line.points, vec![[0.0, 0.2], [5.0, 0.4]]);
    }
}
