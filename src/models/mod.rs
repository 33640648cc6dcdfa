pub mod simulation;
pub mod lead;
