pub mod savings_estimator;
pub mod lead_summary;
