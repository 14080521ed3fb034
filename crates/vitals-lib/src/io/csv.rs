use csv::{ReaderBuilder, Trim};
use log::debug;
use std::path::Path;

use crate::io::LoadError;
use crate::signal::{Recording, DEFAULT_FS};

/// Accepted header names for the temperature column. The collaborator
/// file format is Dutch-labelled; both spellings must keep working.
const TEMPERATURE_COLUMNS: [&str; 2] = ["temperatuur", "temperature"];

/// Load a delimited recording with `timestamp`, `ecg` and
/// `temperatuur`/`temperature` columns. Column lookup is by header name,
/// case-insensitive; column order carries no meaning.
pub fn read_recording(path: &Path) -> Result<Recording, LoadError> {
    let display = path.display().to_string();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(|source| LoadError::Open {
            path: display.clone(),
            source,
        })?;

    let headers = reader
        .headers()
        .map_err(|source| LoadError::Open {
            path: display.clone(),
            source,
        })?
        .clone();
    let timestamp_idx = find_column(&headers, &["timestamp"]).ok_or_else(|| {
        LoadError::MissingColumn {
            path: display.clone(),
            column: "timestamp".into(),
        }
    })?;
    let ecg_idx = find_column(&headers, &["ecg"]).ok_or_else(|| LoadError::MissingColumn {
        path: display.clone(),
        column: "ecg".into(),
    })?;
    let temperature_idx =
        find_column(&headers, &TEMPERATURE_COLUMNS).ok_or_else(|| LoadError::MissingColumn {
            path: display.clone(),
            column: "temperatuur/temperature".into(),
        })?;

    let mut timestamps = Vec::new();
    let mut ecg = Vec::new();
    let mut temperature = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| LoadError::MalformedRow {
            path: display.clone(),
            row: row + 1,
            detail: e.to_string(),
        })?;
        timestamps.push(parse_field(&record, timestamp_idx, "timestamp", &display, row)?);
        ecg.push(parse_field(&record, ecg_idx, "ecg", &display, row)?);
        temperature.push(parse_field(
            &record,
            temperature_idx,
            "temperature",
            &display,
            row,
        )?);
    }

    let fs = infer_fs(&timestamps);
    debug!(
        "loaded {} samples from {} (fs {:.1} Hz)",
        ecg.len(),
        display,
        fs
    );
    Ok(Recording {
        fs,
        timestamps,
        ecg,
        temperature,
    })
}

fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|name| h.eq_ignore_ascii_case(name)))
}

fn parse_field(
    record: &csv::StringRecord,
    idx: usize,
    column: &str,
    path: &str,
    row: usize,
) -> Result<f64, LoadError> {
    let raw = record.get(idx).ok_or_else(|| LoadError::MalformedRow {
        path: path.to_string(),
        row: row + 1,
        detail: format!("missing {} field", column),
    })?;
    raw.parse().map_err(|_| LoadError::MalformedRow {
        path: path.to_string(),
        row: row + 1,
        detail: format!("{} value '{}' is not a number", column, raw),
    })
}

/// Sample rate from the first two timestamps, falling back to the
/// assumed default when the recording is too short to tell.
fn infer_fs(timestamps: &[f64]) -> f64 {
    match timestamps {
        [first, second, ..] if second > first => 1.0 / (second - first),
        _ => DEFAULT_FS,
    }
}
