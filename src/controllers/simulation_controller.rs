use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::simulation::{
    Distributor, DistributorInfo, HealthStatus, PhaseInfo, PhaseType, SimulationParams,
    SimulationResponse,
};
use crate::services::savings_estimator::{DiscountSchedule, Tariff};
use crate::shared_state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct PricingInfo {
    pub tariff: Tariff,
    pub schedule: DiscountSchedule,
}

/// Reject inputs the estimator would turn into meaningless figures.
pub(crate) fn validate_params(params: &SimulationParams) -> Result<(), ApiError> {
    if !params.bill_value.is_finite() || params.bill_value < 0.0 {
        return Err(ApiError::BadRequest(format!(
            "billValue must be a non-negative amount, got {}",
            params.bill_value
        )));
    }
    if let Some(d) = params.competitor_discount {
        if !(0.0..=100.0).contains(&d) {
            return Err(ApiError::BadRequest(format!(
                "competitorDiscount must be between 0 and 100, got {d}"
            )));
        }
    }
    Ok(())
}

/// POST /api/simulations
/// Estimate subscription savings
///
/// Computes the two-tier subscription cost for the given bill and phase, and
/// the comparison against a competitor discount when one is supplied.
#[utoipa::path(
    post,
    path = "/api/simulations",
    request_body = SimulationParams,
    responses(
        (status = 200, description = "Savings estimate", body = SimulationResponse),
        (status = 400, description = "Bill value or competitor discount out of range")
    )
)]
pub async fn create_simulation(
    State(state): State<AppState>,
    Json(params): Json<SimulationParams>,
) -> Result<impl IntoResponse, ApiError> {
    validate_params(&params)?;

    let result = state.estimator.estimate(&params);
    state.record_simulations(1);

    tracing::info!(
        bill = params.bill_value,
        phase = params.phase.label(),
        competitor = params.has_competitor,
        monthly_savings = result.monthly_savings,
        annual_savings = result.annual_savings,
        "simulation computed"
    );
    tracing::debug!(?result, "simulation breakdown");

    let response = SimulationResponse {
        id: uuid::Uuid::new_v4(),
        timestamp: chrono::Utc::now(),
        params,
        result,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// GET /api/tariff
/// Active tariff constants and discount schedule
#[utoipa::path(
    get,
    path = "/api/tariff",
    responses(
        (status = 200, description = "Pricing in effect", body = PricingInfo)
    )
)]
pub async fn get_pricing(State(state): State<AppState>) -> impl IntoResponse {
    Json(PricingInfo {
        tariff: state.estimator.tariff.clone(),
        schedule: state.estimator.schedule.clone(),
    })
}

/// GET /api/phases
/// Connection phases and their minimum billable consumption
#[utoipa::path(
    get,
    path = "/api/phases",
    responses(
        (status = 200, description = "Supported phases", body = Vec<PhaseInfo>)
    )
)]
pub async fn list_phases() -> impl IntoResponse {
    let phases: Vec<PhaseInfo> = PhaseType::ALL
        .into_iter()
        .map(|phase| PhaseInfo {
            phase,
            min_consumption_kwh: phase.min_consumption_kwh(),
        })
        .collect();
    Json(phases)
}

/// GET /api/distributors
#[utoipa::path(
    get,
    path = "/api/distributors",
    responses(
        (status = 200, description = "Supported distributors", body = Vec<DistributorInfo>)
    )
)]
pub async fn list_distributors() -> impl IntoResponse {
    let list: Vec<DistributorInfo> = Distributor::ALL
        .into_iter()
        .map(|id| DistributorInfo {
            id,
            name: id.display_name().to_string(),
        })
        .collect();
    Json(list)
}

/// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service status", body = HealthStatus)
    )
)]
pub async fn get_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        simulations_served: state.simulations_served(),
    })
}
