pub mod heart;
pub mod motion;
pub mod respiration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a single metric could not be computed. Serializable so the
/// dashboard summary can carry it to the presentation layer as a
/// per-metric failure indicator instead of a number.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum MetricError {
    #[error("insufficient data for {metric}: {detail}")]
    InsufficientData { metric: String, detail: String },
    #[error("computation failed for {metric}: {detail}")]
    Computation { metric: String, detail: String },
}

impl MetricError {
    pub fn insufficient_data(metric: &str, detail: impl Into<String>) -> Self {
        Self::InsufficientData {
            metric: metric.into(),
            detail: detail.into(),
        }
    }

    pub fn computation(metric: &str, detail: impl Into<String>) -> Self {
        Self::Computation {
            metric: metric.into(),
            detail: detail.into(),
        }
    }
}
