//! Dashboard statistics derived from fetched records.

use serde::{Deserialize, Serialize};

use super::{EquipmentRecord, EquipmentStatus, ExperimentRecord};

/// Aggregate figures shown on the dashboard's statistics cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Experiments that are running or ongoing.
    pub active_experiments: usize,
    /// Total number of experiments.
    pub total_experiments: usize,
    /// Equipment that is online or in use.
    pub equipment_online: usize,
    /// Total number of equipment records.
    pub equipment_total: usize,
    /// Equipment currently under maintenance.
    pub equipment_in_maintenance: usize,
    /// Mean progress over experiments that report one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_progress: Option<f64>,
}

impl DashboardSummary {
    /// Computes the summary from the current equipment and experiment lists.
    ///
    /// Empty inputs yield zero counts, which is what the dashboard shows when
    /// a read endpoint degraded to an empty list.
    pub fn from_records(equipment: &[EquipmentRecord], experiments: &[ExperimentRecord]) -> Self {
        let progress: Vec<f64> = experiments
            .iter()
            .filter_map(ExperimentRecord::progress_percent)
            .collect();

        let mean_progress =
            (!progress.is_empty()).then(|| progress.iter().sum::<f64>() / progress.len() as f64);

        Self {
            active_experiments: experiments.iter().filter(|e| e.status.is_active()).count(),
            total_experiments: experiments.len(),
            equipment_online: equipment.iter().filter(|e| e.status.is_available()).count(),
            equipment_total: equipment.len(),
            equipment_in_maintenance: equipment
                .iter()
                .filter(|e| e.status == EquipmentStatus::Maintenance)
                .count(),
            mean_progress,
        }
    }

    /// Formats equipment availability the way the dashboard card does (`24/25`).
    pub fn equipment_ratio(&self) -> String {
        format!("{}/{}", self.equipment_online, self.equipment_total)
    }
}
