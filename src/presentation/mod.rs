// Presentation layer - Local UI state, console rendering and operator commands
pub mod commands;
pub mod console;
pub mod dashboard_state;
pub mod handlers;
