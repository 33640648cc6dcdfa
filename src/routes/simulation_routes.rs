use axum::{routing::{get, post}, Router};
use crate::controllers::simulation_controller::{
    create_simulation, get_pricing, list_phases, list_distributors, get_health,
};
use crate::controllers::lead_controller::{leads_savings, leads_summary};
use crate::shared_state::AppState;

/// Build the `/api/*` sub-router.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/simulations",    post(create_simulation))
        .route("/tariff",         get(get_pricing))
        .route("/phases",         get(list_phases))
        .route("/distributors",   get(list_distributors))
        .route("/leads/savings",  post(leads_savings))
        .route("/leads/summary",  post(leads_summary))
        .route("/health",         get(get_health))
        .with_state(state)
}
