// Domain layer - Pure telemetry models, parsing and viewport state
pub mod dashboard;
pub mod parsing;
pub mod raw_record;
pub mod telemetry;
pub mod viewport;
