//! Error types for the Benefits Entitlement Engine.
//!
//! The rule tiers themselves never fail. Errors only arise at the boundaries:
//! loading a policy document, and caller-side validation of a household
//! profile before it reaches the engine.

use thiserror::Error;

/// The main error type for the Benefits Entitlement Engine.
///
/// # Example
///
/// ```
/// use entitlement_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/policy.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Policy document not found: /missing/policy.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Policy document was not found at the specified path.
    #[error("Policy document not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Policy document could not be parsed into a complete policy.
    #[error("Failed to parse policy document '{path}': {message}")]
    ConfigParseError {
        /// The path (or label) of the document that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Policy document parsed but holds values the rule tiers cannot use.
    #[error("Invalid policy field '{field}': {message}")]
    InvalidPolicy {
        /// The offending field, as a dotted path.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A household profile failed a caller-side precondition.
    #[error("Invalid profile field '{field}': {message}")]
    InvalidProfile {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
