//! Read-only presentation of allocation outcomes.
//!
//! Nothing in here recomputes rates or bills; every figure comes straight
//! from an [`AllocationOutcome`](crate::allocation::AllocationOutcome).

pub mod render;
pub mod types;


pub use render::{rate_summary, render_html, render_text};
pub use types::{ReportRow, report_rows};
