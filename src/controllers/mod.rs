pub mod simulation_controller;
pub mod lead_controller;
