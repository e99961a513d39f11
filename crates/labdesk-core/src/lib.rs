#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod health;

pub mod model;
pub mod prelude;

pub use error::{BoxedError, Error, ErrorKind, Result};
pub use health::{ServiceHealth, ServiceStatus};
pub use model::{
    AnalysisQuery, DashboardSummary, EquipmentRecord, EquipmentStatus, ExperimentRecord,
    ExperimentStatus,
};

#[cfg(test)]
mod tests {
    use serde_json::json;

    #[test]
    fn test_records_are_reachable_from_crate_root() {
        let equipment: crate::EquipmentRecord = serde_json::from_value(json!({
            "id": "EQ001", "name": "Microscope", "status": "Online"
        }))
        .unwrap();
        assert_eq!(equipment.status, crate::EquipmentStatus::Online);

        let experiment: crate::ExperimentRecord = serde_json::from_value(json!({
            "id": "EXP001", "name": "Test", "status": "Running"
        }))
        .unwrap();
        assert_eq!(experiment.status, crate::ExperimentStatus::Running);

        let summary = crate::DashboardSummary::from_records(&[equipment], &[experiment]);
        assert_eq!(summary.equipment_total, 1);
        assert!(crate::AnalysisQuery::from_json(json!({})).is_ok());
    }
}
