pub mod routes;
pub mod startup;
pub mod errors;
pub mod openapi;

pub use startup::{launch, run, run_ephemeral, ServiceKind};
