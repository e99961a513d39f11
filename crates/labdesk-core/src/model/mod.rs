//! Records exchanged with the lab API.
//!
//! Record types mirror the JSON the API serves (camelCase field names).
//! Fields the API may leave out are optional and are omitted again when the
//! record is serialized, so a fetched record re-encodes to the same JSON.

mod analysis;
mod equipment;
mod experiment;
mod summary;

pub use analysis::AnalysisQuery;
pub use equipment::{EquipmentRecord, EquipmentStatus};
pub use experiment::{ExperimentRecord, ExperimentStatus};
pub use summary::DashboardSummary;
