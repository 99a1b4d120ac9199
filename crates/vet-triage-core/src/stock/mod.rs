//! Inventory search and stock alerts.

mod alerts;
mod search;

pub use alerts::*;
pub use search::*;
