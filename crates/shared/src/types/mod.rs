//! Common types used across the application.

pub mod id;
pub mod money;

pub use id::WorkerId;
pub use money::{format_cash, format_dollars, format_hours};
