use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

use vitals_lib::{
    dashboard::{DashboardConfig, DashboardSummary},
    detectors::ecg::{detect_r_peaks_with_config, PeakConfig},
    io::csv as csv_io,
    metrics::{
        motion::{motion_series_with_config, MotionConfig},
        respiration::{respiration_rate_with_config, RespirationConfig},
    },
    plot::{figure_from_motion, figure_from_recording, Figure, Series},
    signal::Recording,
};

mod simulate;

#[derive(Parser)]
#[command(
    name = "vitals",
    version,
    about = "Vitals: single-recording vital-signs dashboard core"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the full dashboard summary from a recording
    Dashboard {
        #[arg(long)]
        input: PathBuf,
        /// Override the sampling rate inferred from the timestamps (Hz)
        #[arg(long)]
        fs: Option<f64>,
        #[arg(long, default_value_t = 0.6)]
        threshold_ratio: f64,
        #[arg(long, default_value_t = 0.5)]
        cutoff_hz: f64,
        #[arg(long, default_value_t = 5.0)]
        block_width: f64,
    },
    /// Detect R-peaks and print their sample indices
    FindRpeaks {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = 0.6)]
        threshold_ratio: f64,
    },
    /// Estimate the breathing rate from the low-passed ECG
    Respiration {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        fs: Option<f64>,
        #[arg(long, default_value_t = 0.5)]
        cutoff_hz: f64,
    },
    /// Aggregate motion intensity into fixed time blocks
    Motion {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = 5.0)]
        block_width: f64,
    },
    /// Render the raw ECG waveform to a PNG
    PlotEcg {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Render the motion-intensity chart to a PNG
    PlotMotion {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = 5.0)]
        block_width: f64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Write a synthetic recording in the collaborator CSV format
    Simulate {
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 60.0)]
        duration_s: f64,
        #[arg(long, default_value_t = 1024.0)]
        fs: f64,
        #[arg(long, default_value_t = 72.0)]
        bpm: f64,
        #[arg(long, default_value_t = 15.0)]
        breaths_per_min: f64,
        #[arg(long, default_value_t = 36.5)]
        temperature: f64,
        #[arg(long, default_value_t = 0.02)]
        rr_jitter: f64,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Dashboard {
            input,
            fs,
            threshold_ratio,
            cutoff_hz,
            block_width,
        } => cmd_dashboard(&input, fs, threshold_ratio, cutoff_hz, block_width)?,
        Commands::FindRpeaks {
            input,
            threshold_ratio,
        } => cmd_find_rpeaks(&input, threshold_ratio)?,
        Commands::Respiration {
            input,
            fs,
            cutoff_hz,
        } => cmd_respiration(&input, fs, cutoff_hz)?,
        Commands::Motion { input, block_width } => cmd_motion(&input, block_width)?,
        Commands::PlotEcg { input, out } => cmd_plot_ecg(&input, &out)?,
        Commands::PlotMotion {
            input,
            block_width,
            out,
        } => cmd_plot_motion(&input, block_width, &out)?,
        Commands::Simulate {
            out,
            duration_s,
            fs,
            bpm,
            breaths_per_min,
            temperature,
            rr_jitter,
            seed,
        } => {
            let cfg = simulate::SimulateConfig {
                duration_s,
                fs,
                bpm,
                breaths_per_min,
                temperature,
                rr_jitter,
                seed,
            };
            simulate::write_recording_csv(&out, &cfg)?;
            info!("wrote synthetic recording to {}", out.display());
        }
    }
    Ok(())
}

/// Load the recording, optionally forcing the sampling rate.
fn load_recording(input: &Path, fs: Option<f64>) -> Result<Recording> {
    let mut recording = csv_io::read_recording(input)
        .with_context(|| format!("loading recording {}", input.display()))?;
    if let Some(fs) = fs {
        recording.fs = fs;
    }
    Ok(recording)
}

fn cmd_dashboard(
    input: &Path,
    fs: Option<f64>,
    threshold_ratio: f64,
    cutoff_hz: f64,
    block_width: f64,
) -> Result<()> {
    let recording = load_recording(input, fs)?;
    let cfg = DashboardConfig {
        peaks: PeakConfig { threshold_ratio },
        respiration: RespirationConfig { cutoff_hz },
        motion: MotionConfig { block_width },
    };
    let summary = DashboardSummary::from_recording(&recording, &cfg);
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

fn cmd_find_rpeaks(input: &Path, threshold_ratio: f64) -> Result<()> {
    let recording = load_recording(input, None)?;
    let peaks = detect_r_peaks_with_config(&recording.ecg, &PeakConfig { threshold_ratio });
    println!("{}", serde_json::to_string(&peaks)?);
    Ok(())
}

fn cmd_respiration(input: &Path, fs: Option<f64>, cutoff_hz: f64) -> Result<()> {
    let recording = load_recording(input, fs)?;
    let cfg = RespirationConfig { cutoff_hz };
    let rate = respiration_rate_with_config(&recording.ecg, recording.fs, &cfg)?;
    println!("{}", serde_json::to_string(&rate)?);
    Ok(())
}

fn cmd_motion(input: &Path, block_width: f64) -> Result<()> {
    let recording = load_recording(input, None)?;
    let motion = motion_series_with_config(&recording, &MotionConfig { block_width });
    println!("{}", serde_json::to_string(&motion)?);
    Ok(())
}

fn cmd_plot_ecg(input: &Path, out: &Path) -> Result<()> {
    let recording = load_recording(input, None)?;
    let fig = figure_from_recording(&recording, 2048);
    draw_plotters_figure(out, &fig)
}

fn cmd_plot_motion(input: &Path, block_width: f64, out: &Path) -> Result<()> {
    let recording = load_recording(input, None)?;
    let motion = motion_series_with_config(&recording, &MotionConfig { block_width });
    let fig = figure_from_motion(&motion);
    draw_plotters_figure(out, &fig)
}

fn draw_plotters_figure(path: &Path, fig: &Figure) -> Result<()> {
    let backend = BitMapBackend::new(path, (800, 480));
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;
    let points: Vec<[f64; 2]> = fig
        .series
        .iter()
        .flat_map(|series| match series {
            Series::Line(line) => line.points.clone(),
        })
        .collect();
    let x_min = points.iter().map(|p| p[0]).fold(f64::INFINITY, f64::min);
    let x_max = points
        .iter()
        .map(|p| p[0])
        .fold(f64::NEG_INFINITY, f64::max);
    let y_min = points.iter().map(|p| p[1]).fold(f64::INFINITY, f64::min);
    let y_max = points
        .iter()
        .map(|p| p[1])
        .fold(f64::NEG_INFINITY, f64::max);
    let (x_min, x_max) = if x_min < x_max {
        (x_min, x_max)
    } else {
        (0.0, 1.0)
    };
    let (y_min, y_max) = if y_min < y_max {
        (y_min, y_max)
    } else {
        (0.0, 1.0)
    };
    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .caption(
            fig.title.clone().unwrap_or_else(|| "Plot".into()),
            ("sans-serif", 24),
        )
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
    chart.configure_mesh().draw()?;
    for series in &fig.series {
        match series {
            Series::Line(line) => {
                chart.draw_series(LineSeries::new(
                    line.points.iter().map(|p| (p[0], p[1])),
                    &RGBColor(
                        ((line.style.color.0 >> 16) & 0xFF) as u8,
                        ((line.style.color.0 >> 8) & 0xFF) as u8,
                        (line.style.color.0 & 0xFF) as u8,
                    ),
                ))?;
            }
        }
    }
    root.present()?;
    Ok(())
}
