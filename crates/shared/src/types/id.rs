//! Ordinal worker identifiers.
//!
//! Workers are numbered `1..=n` in the order they arrive for a single
//! allocation run. The number is what gets written on the cash envelope, so it
//! is a plain ordinal rather than a random identifier.

use serde::{Deserialize, Serialize};

/// Stable 1-based ordinal of a worker within one allocation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(pub u32);

impl WorkerId {
    /// Returns the ID for the worker at a 0-based input position.
    ///
    /// Returns `None` if the position does not fit the ordinal range.
    #[must_use]
    pub fn from_position(position: usize) -> Option<Self> {
        u32::try_from(position).ok()?.checked_add(1).map(Self)
    }

    /// Returns the inner ordinal.
    #[must_use]
    pub const fn into_inner(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for WorkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_position_is_one_based() {
        assert_eq!(WorkerId::from_position(0), Some(WorkerId(1)));
        assert_eq!(WorkerId::from_position(4), Some(WorkerId(5)));
    }

    #[test]
    fn test_from_position_overflow() {
        assert_eq!(WorkerId::from_position(u32::MAX as usize), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(WorkerId(7).to_string(), "7");
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&WorkerId(3)).unwrap();
        assert_eq!(json, "3");
        let id: WorkerId = serde_json::from_str("12").unwrap();
        assert_eq!(id.into_inner(), 12);
    }
}
