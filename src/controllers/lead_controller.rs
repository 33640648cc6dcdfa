use axum::{extract::State, response::IntoResponse, Json};

use crate::controllers::simulation_controller::validate_params;
use crate::error::ApiError;
use crate::models::lead::{LeadRecord, LeadSavings, LeadSummary};
use crate::services::lead_summary;
use crate::shared_state::AppState;

fn validate_leads(leads: &[LeadRecord]) -> Result<(), ApiError> {
    for lead in leads {
        validate_params(&lead.to_params()).map_err(|e| {
            ApiError::BadRequest(format!("lead {:?}: {e}", lead.id.as_deref().unwrap_or(&lead.name)))
        })?;
    }
    Ok(())
}

/// POST /api/leads/savings
/// Recompute the estimate for stored lead records
///
/// Leads are supplied by the caller as read from the record store; nothing is persisted.
#[utoipa::path(
    post,
    path = "/api/leads/savings",
    request_body = Vec<LeadRecord>,
    responses(
        (status = 200, description = "Estimate per lead", body = Vec<LeadSavings>),
        (status = 400, description = "A lead has an invalid bill value")
    )
)]
pub async fn leads_savings(
    State(state): State<AppState>,
    Json(leads): Json<Vec<LeadRecord>>,
) -> Result<impl IntoResponse, ApiError> {
    validate_leads(&leads)?;
    let out = lead_summary::lead_savings(&leads, &state.estimator);
    state.record_simulations(out.len() as u64);
    tracing::info!(leads = out.len(), "lead savings recomputed");
    Ok(Json(out))
}

/// POST /api/leads/summary
/// Pipeline aggregates for the admin dashboard
#[utoipa::path(
    post,
    path = "/api/leads/summary",
    request_body = Vec<LeadRecord>,
    responses(
        (status = 200, description = "Counts per status and savings totals", body = LeadSummary),
        (status = 400, description = "A lead has an invalid bill value")
    )
)]
pub async fn leads_summary(
    State(state): State<AppState>,
    Json(leads): Json<Vec<LeadRecord>>,
) -> Result<impl IntoResponse, ApiError> {
    validate_leads(&leads)?;
    let summary = lead_summary::summarize(&leads, &state.estimator);
    state.record_simulations(leads.len() as u64);
    tracing::info!(
        leads = summary.total_leads,
        pipeline = summary.pipeline_annual_savings,
        "lead summary computed"
    );
    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lead::LeadStatus;
    use crate::models::simulation::{Distributor, PhaseType};

    fn lead(id: Option<&str>, bill: f64) -> LeadRecord {
        LeadRecord {
            id: id.map(str::to_string),
            name: "Carla".into(),
            email: None,
            whatsapp: String::new(),
            bill_value: bill,
            phase: PhaseType::BiPhase,
            distribuidora: Distributor::EnergisaMt,
            bill_url: None,
            status: LeadStatus::New,
        }
    }

    #[test]
    fn invalid_lead_is_named_in_the_error() {
        let leads = vec![lead(Some("ok"), 300.0), lead(Some("bad-7"), -5.0)];
        let err = validate_leads(&leads).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
        let msg = err.to_string();
        assert!(msg.contains("\"bad-7\""), "{msg}");
        assert!(msg.contains("billValue must be a non-negative amount"), "{msg}");
    }

    #[test]
    fn lead_without_id_falls_back_to_name() {
        let err = validate_leads(&[lead(None, f64::NAN)]).unwrap_err();
        assert!(err.to_string().contains("\"Carla\""));
    }

    #[test]
    fn valid_batch_passes() {
        assert!(validate_leads(&[lead(None, 0.0), lead(Some("x"), 4200.0)]).is_ok());
    }
}
