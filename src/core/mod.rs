// This module serves as the central hub for cpogen's shared model types, the building
// blocks every pipeline stage exchanges: the structured error enum and result alias,
// the per-argument descriptor produced by the mini-language parser, and the canonical
// specification assembled by the normalizer. Pipeline stages (parsers, normalizer,
// classification engine, dispatch table builder, emitter) live in their own modules and
// depend on this one only; nothing here depends back on them, keeping the strict
// Parser -> Normalizer -> Classification -> Dispatch -> Emitter flow acyclic.

//! Core cpogen model.
//!
//! Shared, immutable data types flowing through the generation pipeline:
//!
//! - [`error`] - structured error kinds and the result alias
//! - [`descriptor`] - one parsed argument entry
//! - [`spec`] - the validated specification plus dispatch description

pub mod descriptor;
pub mod error;
pub mod spec;

pub use descriptor::{is_valid_identifier, ArgumentDescriptor, Qualifiers, RefCategory};
pub use error::{GenerateError, GenerateResult};
pub use spec::{DispatchDescriptor, DispatchKind, Presentation, Specification};
