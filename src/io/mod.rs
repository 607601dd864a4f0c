//! Input/output helpers.
//!
//! - graph ingest from JSON/CSV (`ingest`)
//! - series and stat card exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
