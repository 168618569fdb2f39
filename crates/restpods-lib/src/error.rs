//! Error types for report building, export and pod retrieval

use thiserror::Error;

/// Failures raised while retrieving pods from the cluster
#[derive(Debug, Error)]
pub enum SourceError {
    /// Cluster credentials are missing or were rejected
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Transport or API server failure
    #[error("{0}")]
    Api(String),
}

impl SourceError {
    /// Human readable reason, without the error kind prefix
    pub fn reason(&self) -> &str {
        match self {
            SourceError::Auth(reason) | SourceError::Api(reason) => reason,
        }
    }
}

impl From<kube::Error> for SourceError {
    fn from(err: kube::Error) -> Self {
        match err {
            kube::Error::Api(response) if response.code == 401 || response.code == 403 => {
                SourceError::Auth(response.message)
            }
            kube::Error::Api(response) => SourceError::Api(response.message),
            kube::Error::Auth(e) => SourceError::Auth(e.to_string()),
            kube::Error::InferConfig(e) => SourceError::Auth(e.to_string()),
            other => SourceError::Api(other.to_string()),
        }
    }
}

/// Failures raised while exporting or configuring a report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown time zone: {0}")]
    InvalidTimeZone(String),
}
