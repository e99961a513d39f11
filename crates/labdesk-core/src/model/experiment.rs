//! Experiment records.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Lifecycle state of an experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
pub enum ExperimentStatus {
    /// Actively collecting data.
    Running,
    /// Finished successfully.
    Completed,
    /// Suspended, may resume.
    Paused,
    /// Stopped with an error.
    Failed,
    /// Long-running study in progress.
    Ongoing,
    /// Scheduled but not started.
    Planned,
}

impl ExperimentStatus {
    /// Returns the wire spelling of this status.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Returns whether the experiment is currently in progress.
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Running | Self::Ongoing)
    }

    /// Returns whether the experiment has finished, successfully or not.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// An experiment as reported by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentRecord {
    /// Experiment identifier (e.g. `EXP001`).
    pub id: String,
    /// Experiment name.
    pub name: String,
    /// Current lifecycle state.
    pub status: ExperimentStatus,
    /// Day the experiment started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Date>,
    /// Name of the responsible researcher.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub researcher: Option<String>,
    /// Completion in percent (0-100), kept as sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<Number>,
    /// Fields this type does not model, passed through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExperimentRecord {
    /// Returns the completion as a float.
    pub fn progress_percent(&self) -> Option<f64> {
        self.progress.as_ref().and_then(Number::as_f64)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_record_roundtrips_unchanged() {
        let value = json!({
            "id": "EXP001",
            "name": "Temperature Sensitivity Analysis",
            "status": "Running",
            "startDate": "2024-03-15",
            "researcher": "John Smith",
            "progress": 68
        });

        let record: ExperimentRecord = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(record.status, ExperimentStatus::Running);
        assert_eq!(record.progress_percent(), Some(68.0));
        assert_eq!(serde_json::to_value(&record).unwrap(), value);
    }

    #[test]
    fn test_fractional_progress_and_extra_fields() {
        let value = json!({
            "id": "EXP002",
            "name": "Catalyst Efficiency Test",
            "status": "Paused",
            "progress": 68.5,
            "team": "bio"
        });

        let record: ExperimentRecord = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(record.progress_percent(), Some(68.5));
        assert_eq!(record.extra["team"], "bio");
        assert_eq!(serde_json::to_value(&record).unwrap(), value);
    }

    #[test]
    fn test_status_predicates() {
        assert!(ExperimentStatus::Running.is_active());
        assert!(ExperimentStatus::Ongoing.is_active());
        assert!(!ExperimentStatus::Planned.is_active());

        assert!(ExperimentStatus::Completed.is_terminal());
        assert!(ExperimentStatus::Failed.is_terminal());
        assert!(!ExperimentStatus::Paused.is_terminal());
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result = serde_json::from_value::<ExperimentRecord>(json!({
            "id": "EXP404",
            "name": "Lost",
            "status": "Archived"
        }));
        assert!(result.is_err());
    }
}
