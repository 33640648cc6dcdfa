use utoipa::OpenApi;
use crate::controllers::{lead_controller, simulation_controller};
use crate::models::{lead, simulation};
use crate::services::savings_estimator;

#[derive(OpenApi)]
#[openapi(
    paths(
        simulation_controller::create_simulation,
        simulation_controller::get_pricing,
        simulation_controller::list_phases,
        simulation_controller::list_distributors,
        simulation_controller::get_health,
        lead_controller::leads_savings,
        lead_controller::leads_summary
    ),
    components(
        schemas(
            simulation::SimulationParams,
            simulation::SimulationResult,
            simulation::SimulationResponse,
            simulation::PhaseType,
            simulation::Distributor,
            simulation::PhaseInfo,
            simulation::DistributorInfo,
            simulation::HealthStatus,
            savings_estimator::Tariff,
            savings_estimator::DiscountSchedule,
            simulation_controller::PricingInfo,
            lead::LeadRecord,
            lead::LeadStatus,
            lead::LeadSavings,
            lead::LeadSummary,
            lead::StatusCount
        )
    ),
    tags(
        (name = "solar-savings-sim", description = "Solar subscription savings estimator API")
    )
)]
pub struct ApiDoc;
