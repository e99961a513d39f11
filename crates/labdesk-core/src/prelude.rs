//! Convenient re-exports for common use.

pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::health::{ServiceHealth, ServiceStatus};
pub use crate::model::{
    AnalysisQuery, DashboardSummary, EquipmentRecord, EquipmentStatus, ExperimentRecord,
    ExperimentStatus,
};
