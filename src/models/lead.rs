use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::simulation::{Distributor, PhaseType, SimulationParams, SimulationResult};

/// Sales pipeline stage of a lead
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    ContractSigned,
    Lost,
    Converted,
    Rejected,
}

impl LeadStatus {
    pub fn is_closed_deal(self) -> bool {
        matches!(self, LeadStatus::ContractSigned | LeadStatus::Converted)
    }
}

/// Lead row as stored by the record backend. Only the fields the
/// estimator needs are mandatory.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeadRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub whatsapp: String,
    pub bill_value: f64,
    pub phase: PhaseType,
    pub distribuidora: Distributor,
    #[serde(default)]
    pub bill_url: Option<String>,
    #[serde(default, deserialize_with = "status_or_new")]
    pub status: LeadStatus,
}

// The dashboard treats a null status as a fresh lead
fn status_or_new<'de, D>(deserializer: D) -> Result<LeadStatus, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<LeadStatus>::deserialize(deserializer)?.unwrap_or_default())
}

impl LeadRecord {
    pub fn to_params(&self) -> SimulationParams {
        SimulationParams {
            distribuidora: Some(self.distribuidora),
            ..SimulationParams::new(self.bill_value, self.phase)
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LeadSavings {
    pub lead_id: Option<String>,
    pub name: String,
    pub status: LeadStatus,
    pub result: SimulationResult,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct StatusCount {
    pub status: LeadStatus,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct LeadSummary {
    pub total_leads: usize,
    /// One entry per status present in the input, ordered by pipeline stage
    pub by_status: Vec<StatusCount>,
    pub total_bill_value: f64,
    pub average_bill_value: f64,
    /// Annual savings across every lead
    pub pipeline_annual_savings: f64,
    /// Annual savings across signed/converted leads only
    pub closed_annual_savings: f64,
}
