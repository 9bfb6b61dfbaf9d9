//! Error types for linear combination arithmetic

/// Errors that can occur when operating on linear combinations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LincombError {
    /// Division of a combination by an exactly zero scalar
    DivisionByZero,
}

impl core::fmt::Display for LincombError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            LincombError::DivisionByZero => "division of a linear combination by zero",
        };
        write!(f, "{msg}")
    }
}

impl std::error::Error for LincombError {}

/// Result type for linear combination operations
pub type Result<T> = core::result::Result<T, LincombError>;
