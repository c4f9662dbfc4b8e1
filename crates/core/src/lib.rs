//! Core business logic for TipJar.
//!
//! This crate contains pure tip allocation logic with ZERO web dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `allocation` - Hourly rate, cash rounding, and bill distribution
//! - `intake` - Turning upstream `{name, hours}` records into workers
//! - `report` - Read-only text and HTML rendering of allocation outcomes

pub mod allocation;
pub mod intake;
pub mod report;
