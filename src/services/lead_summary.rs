use std::collections::BTreeMap;

use crate::models::lead::{LeadRecord, LeadSavings, LeadSummary, StatusCount};
use crate::services::savings_estimator::SavingsEstimator;

/// Recompute the estimate for each lead. Results are never stored.
pub fn lead_savings(leads: &[LeadRecord], estimator: &SavingsEstimator) -> Vec<LeadSavings> {
    leads
        .iter()
        .map(|lead| LeadSavings {
            lead_id: lead.id.clone(),
            name: lead.name.clone(),
            status: lead.status,
            result: estimator.estimate(&lead.to_params()),
        })
        .collect()
}

/// Dashboard aggregates over a batch of leads.
pub fn summarize(leads: &[LeadRecord], estimator: &SavingsEstimator) -> LeadSummary {
    if leads.is_empty() {
        return LeadSummary::default();
    }

    let mut counts: BTreeMap<_, usize> = BTreeMap::new();
    let mut total_bill = 0.0;
    let mut pipeline = 0.0;
    let mut closed = 0.0;

    for lead in leads {
        *counts.entry(lead.status).or_default() += 1;
        total_bill += lead.bill_value;

        let annual = estimator.estimate(&lead.to_params()).annual_savings;
        pipeline += annual;
        if lead.status.is_closed_deal() {
            closed += annual;
        }
    }

    LeadSummary {
        total_leads: leads.len(),
        by_status: counts
            .into_iter()
            .map(|(status, count)| StatusCount { status, count })
            .collect(),
        total_bill_value: total_bill,
        average_bill_value: total_bill / leads.len() as f64,
        pipeline_annual_savings: pipeline,
        closed_annual_savings: closed,
    }
}
