use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ─── Connection phase ────────────────────────────────────────────────────────

/// Grid connection type of the consumer unit. Each phase carries the
/// regulatory minimum the utility bills regardless of injected credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum PhaseType {
    #[serde(rename = "MONOFASICO")]
    SinglePhase,
    #[serde(rename = "BIFASICO")]
    BiPhase,
    #[serde(rename = "TRIFASICO")]
    TriPhase,
}

impl PhaseType {
    pub const ALL: [PhaseType; 3] = [PhaseType::SinglePhase, PhaseType::BiPhase, PhaseType::TriPhase];

    /// Minimum billable consumption (kWh)
    pub fn min_consumption_kwh(self) -> u32 {
        match self {
            PhaseType::SinglePhase => 30,
            PhaseType::BiPhase => 50,
            PhaseType::TriPhase => 100,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PhaseType::SinglePhase => "MONOFASICO",
            PhaseType::BiPhase => "BIFASICO",
            PhaseType::TriPhase => "TRIFASICO",
        }
    }
}

// ─── Distributors ────────────────────────────────────────────────────────────

/// Utility concession serving the customer. Carried through for lead
/// records; the estimate does not depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Distributor {
    #[serde(rename = "Energisa Minas Gerais")]
    EnergisaMg,
    #[serde(rename = "Energisa Mato Grosso")]
    EnergisaMt,
    #[serde(rename = "Energisa Paraíba")]
    EnergisaPb,
    #[serde(rename = "Energisa Mato Grosso do Sul")]
    EnergisaMs,
}

impl Distributor {
    pub const ALL: [Distributor; 4] = [
        Distributor::EnergisaMg,
        Distributor::EnergisaMt,
        Distributor::EnergisaPb,
        Distributor::EnergisaMs,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Distributor::EnergisaMg => "Energisa Minas Gerais",
            Distributor::EnergisaMt => "Energisa Mato Grosso",
            Distributor::EnergisaPb => "Energisa Paraíba",
            Distributor::EnergisaMs => "Energisa Mato Grosso do Sul",
        }
    }
}

// ─── Estimator input / output ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParams {
    /// Current monthly bill (R$)
    pub bill_value: f64,
    pub phase: PhaseType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribuidora: Option<Distributor>,
    /// Customer already receives a discount from another reseller
    #[serde(default)]
    pub has_competitor: bool,
    /// Competitor discount in percent (0–100). Absent means 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competitor_discount: Option<f64>,
}

impl SimulationParams {
    pub fn new(bill_value: f64, phase: PhaseType) -> Self {
        Self {
            bill_value,
            phase,
            distribuidora: None,
            has_competitor: false,
            competitor_discount: None,
        }
    }

    #[cfg(test)]
    pub fn with_competitor(mut self, discount_percent: f64) -> Self {
        self.has_competitor = true;
        self.competitor_discount = Some(discount_percent);
        self
    }

    /// Competitor discount as a fraction, or `None` when there is no competitor.
    pub fn competitor_rate(&self) -> Option<f64> {
        self.has_competitor
            .then(|| self.competitor_discount.unwrap_or(0.0) / 100.0)
    }
}

/// Cost comparison between the current bill and the subscription.
///
/// "Month 1 to 3" figures are the introductory tier, "month 4 to 12" the
/// sustained tier. `newTotalValue`, `subscriptionCost` and `monthlySavings`
/// repeat the introductory figures for clients that read a single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub estimated_consumption_kwh: i64,
    pub min_consumption_kwh: u32,
    pub compensable_energy_kwh: u64,
    pub original_bill_value: f64,

    pub new_total_value: f64,
    pub subscription_cost: f64,
    pub monthly_savings: f64,
    pub annual_savings: f64,

    /// Paid straight to the utility: availability cost + lighting fee + Fio B
    pub residual_bill: f64,
    /// Non-compensable portion of the wire usage tariff
    pub fio_b_tax: f64,

    pub savings_month1to3: f64,
    pub savings_month4to12: f64,
    pub discount_applied_month1to3: f64,
    pub discount_applied_month4to12: f64,
    pub monthly_cost_month1to3: f64,
    pub monthly_cost_month4to12: f64,

    pub has_competitor: bool,
    pub competitor_total_value: f64,
    pub competitor_savings: f64,
    pub extra_savings: f64,
}

// ─── REST API response types ──────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct SimulationResponse {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub params: SimulationParams,
    pub result: SimulationResult,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PhaseInfo {
    pub phase: PhaseType,
    pub min_consumption_kwh: u32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DistributorInfo {
    pub id: Distributor,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub simulations_served: u64,
}
