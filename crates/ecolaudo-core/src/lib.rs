//! ecolaudo-core
//!
//! Pure domain types for the ultrasound reporting system: the organ/finding
//! catalog, selected findings with their measured instances, exam session
//! state, and report input structures. No I/O — this is the shared
//! vocabulary of the EcoLaudo system.

pub mod error;
pub mod models;
