//! Error types for peripheral access.

use thiserror::Error;

/// Errors reported by the input bank, audio sink, or the instrument itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlatformError {
    /// The peripheral is busy; the same request may succeed immediately after
    #[error("peripheral not ready")]
    NotReady,

    /// The peripheral bus reported a fault
    #[error("bus error (code {code})")]
    Bus {
        /// Driver-specific fault code.
        code: u8,
    },

    /// A collaborator was unavailable at start-up
    #[error("initialization failed: {0}")]
    Initialization(&'static str),
}

impl PlatformError {
    /// Whether one immediate retry is worthwhile.
    #[inline]
    pub fn is_transient(&self) -> bool {
        matches!(self, PlatformError::NotReady)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(PlatformError::NotReady.to_string(), "peripheral not ready");
        assert_eq!(
            PlatformError::Bus { code: 7 }.to_string(),
            "bus error (code 7)"
        );
        assert_eq!(
            PlatformError::Initialization("input bank").to_string(),
            "initialization failed: input bank"
        );
    }

    #[test]
    fn only_not_ready_is_transient() {
        assert!(PlatformError::NotReady.is_transient());
        assert!(!PlatformError::Bus { code: 1 }.is_transient());
        assert!(!PlatformError::Initialization("x").is_transient());
    }
}
