//! Domain models for the vet-triage system.

mod condition;
mod diagnosis;
mod inventory;
mod stock;
mod triage;

pub use condition::*;
pub use diagnosis::*;
pub use inventory::*;
pub use stock::*;
pub use triage::*;
