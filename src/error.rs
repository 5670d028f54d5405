use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Why a persisted trajectory could not be analyzed.
#[derive(Debug, Error)]
pub enum DataErrorKind {
    #[error("file not found")]
    Missing,
    #[error("no data")]
    Empty,
    #[error("malformed data: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid {field}: {reason}")]
    Configuration { field: &'static str, reason: String },

    #[error("time step must be positive and finite, got {dt}")]
    Integration { dt: f64 },

    #[error("cannot write {}: {source}", .path.display())]
    RecorderIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {kind}", origin(.path))]
    AnalysisData {
        path: Option<PathBuf>,
        kind: DataErrorKind,
    },
}

fn origin(path: &Option<PathBuf>) -> String {
    path.as_deref()
        .map_or_else(|| "trajectory".to_string(), |p| p.display().to_string())
}

impl SimError {
    /// Pipeline stage that failed, for user-facing messages.
    pub fn stage(&self) -> &'static str {
        match self {
            SimError::Configuration { .. } => "configuration",
            SimError::Integration { .. } => "integration",
            SimError::RecorderIo { .. } => "recording",
            SimError::AnalysisData { .. } => "analysis",
        }
    }

    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        SimError::Configuration { field, reason: reason.into() }
    }

    pub(crate) fn recorder_io(path: &Path, source: impl Into<io::Error>) -> Self {
        SimError::RecorderIo { path: path.to_path_buf(), source: source.into() }
    }

    pub(crate) fn data(path: Option<&Path>, kind: DataErrorKind) -> Self {
        SimError::AnalysisData { path: path.map(Path::to_path_buf), kind }
    }

    /// True when analysis failed only because there was nothing to analyze.
    pub fn is_no_data(&self) -> bool {
        matches!(self, SimError::AnalysisData { kind: DataErrorKind::Empty, .. })
    }
}

pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_names_follow_pipeline() {
        assert_eq!(SimError::Integration { dt: -1.0 }.stage(), "integration");
        assert_eq!(SimError::config("launch_speed", "negative").stage(), "configuration");
        assert_eq!(SimError::data(None, DataErrorKind::Empty).stage(), "analysis");
    }

    #[test]
    fn analysis_message_names_the_file() {
        let err = SimError::data(Some(Path::new("run.csv")), DataErrorKind::Missing);
        assert_eq!(err.to_string(), "run.csv: file not found");
        let err = SimError::data(None, DataErrorKind::Empty);
        assert_eq!(err.to_string(), "trajectory: no data");
        assert!(err.is_no_data());
    }
}
