// This module defines error types for the cpogen pipeline using the thiserror crate for
// idiomatic Rust error handling. GenerateError is the main error enum covering every failure
// a request can produce: malformed argument expressions in the type mini-language, ambiguous
// pack declarations in the impl-target language, duplicate dispatch labels, conflicting or
// missing specification inputs, name collisions between arguments and the dispatch argument,
// invalid identifiers, unknown operation patterns, ill-formed dispatch descriptors, and
// undeserializable requests at the host boundary. Each variant carries the offending text so
// the host can print a message close to the user's input. Everything is detected during
// parsing and normalization; the classification engine and dispatch table builder operate on
// already-validated specifications and cannot fail.

//! Error types for the cpogen pipeline.
//!
//! Using thiserror for more idiomatic error handling.

use thiserror::Error;

/// Main error type for specification processing and generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("Malformed argument expression '{expression}': {reason}")]
    MalformedArgumentExpression { expression: String, reason: String },

    #[error("Ambiguous pack declaration '{segment}...': a named pack needs the '$' marker, e.g. '${segment}...'")]
    AmbiguousPackDeclaration { segment: String },

    #[error("Duplicate dispatch label '{label}'")]
    DuplicateDispatchLabel { label: String },

    #[error("Exactly one of 'args' or 'operation_type' must be provided")]
    ConflictingSpecificationInputs,

    #[error("Name collision: '{name}' ({reason})")]
    NameCollision { name: String, reason: String },

    #[error("Invalid identifier '{name}'")]
    InvalidIdentifier { name: String },

    #[error("Unknown operation_type '{name}'. Available: {available}")]
    UnknownOperationPattern { name: String, available: String },

    #[error("Invalid runtime_dispatch: {reason}")]
    InvalidDispatchDescriptor { reason: String },

    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },
}

/// Result type alias for generation operations.
pub type GenerateResult<T> = Result<T, GenerateError>;
