//! Structured error types shared across the physalia crates.

use thiserror::Error;

/// Unified error type for all physalia operations.
///
/// The `Parse` variant is the one lenient call sites are allowed to swallow
/// when skipping malformed pool entries; every other variant must propagate.
#[derive(Debug, Error)]
pub enum PhysaliaError {
    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A SMILES string could not be interpreted as a molecular structure.
    #[error("molecule parse error: {0}")]
    Parse(String),

    /// Invalid input (bad arguments, out-of-range values)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the physalia crates.
pub type Result<T> = std::result::Result<T, PhysaliaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display() {
        let err = PhysaliaError::Parse("unexpected character '('".into());
        assert_eq!(
            err.to_string(),
            "molecule parse error: unexpected character '('"
        );
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PhysaliaError = io.into();
        assert!(matches!(err, PhysaliaError::Io(_)));
    }
}
