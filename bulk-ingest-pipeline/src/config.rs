//! Configuration types for the batch ingestor.

use std::fmt;
use std::str::FromStr;

use crate::errors::IngestError;

/// Default number of documents per committed batch.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// How the overall status of a pass reflects recorded failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Report `ok` whenever the pass completes, even with recorded failures.
    /// Callers must inspect the error list to detect partial failure.
    #[default]
    AlwaysOk,
    /// Report `completed_with_errors` when any failure was recorded.
    ReportPartialFailure,
}

impl fmt::Display for StatusPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusPolicy::AlwaysOk => write!(f, "always_ok"),
            StatusPolicy::ReportPartialFailure => write!(f, "report_partial_failure"),
        }
    }
}

impl FromStr for StatusPolicy {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always_ok" => Ok(StatusPolicy::AlwaysOk),
            "report_partial_failure" => Ok(StatusPolicy::ReportPartialFailure),
            other => Err(IngestError::invalid_config(format!(
                "unknown status policy '{}'",
                other
            ))),
        }
    }
}

/// Configuration for the BatchIngestor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestorConfig {
    /// Maximum number of documents staged before a batch is committed.
    /// Bounds the memory held by one ingestion pass.
    pub batch_size: usize,
    /// How recorded failures affect the reported status.
    pub status_policy: StatusPolicy,
}

impl Default for IngestorConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            status_policy: StatusPolicy::default(),
        }
    }
}

impl IngestorConfig {
    /// Create a config with a custom batch size.
    pub fn with_batch_size(batch_size: usize) -> Self {
        Self {
            batch_size,
            ..Self::default()
        }
    }

    /// Set the status policy.
    pub fn status_policy(mut self, status_policy: StatusPolicy) -> Self {
        self.status_policy = status_policy;
        self
    }

    /// Check that the configuration can drive an ingestion pass.
    pub fn validate(&self) -> Result<(), IngestError> {
        if self.batch_size == 0 {
            return Err(IngestError::invalid_config("batch_size must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IngestorConfig::default();
        assert_eq!(config.batch_size, 1000);
        assert_eq!(config.status_policy, StatusPolicy::AlwaysOk);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let config = IngestorConfig::with_batch_size(0);
        assert!(matches!(
            config.validate(),
            Err(IngestError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_status_policy_parse() {
        assert_eq!(
            "report_partial_failure".parse::<StatusPolicy>().unwrap(),
            StatusPolicy::ReportPartialFailure
        );
        assert_eq!(
            " Always_OK ".parse::<StatusPolicy>().unwrap(),
            StatusPolicy::AlwaysOk
        );
        assert!("sometimes".parse::<StatusPolicy>().is_err());
        assert_eq!(StatusPolicy::ReportPartialFailure.to_string(), "report_partial_failure");
    }
}
