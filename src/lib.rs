//! cpogen - Customization Point Source Generation.
//!
//! cpogen compiles a compact declarative specification of a C++ customization
//! point (a named call site third parties may specialize without touching core
//! code) into complete generated source built on the `tag_invoke` pattern of
//! the tincup support library.
//!
//! # Primary Usage
//!
//! ```
//! use cpogen::{generate, EmitOptions, GenerateRequest};
//!
//! let request = GenerateRequest::from_json(
//!     r#"{"name": "scale", "args": ["$T&: target", "double: factor"]}"#,
//! )?;
//! let artifact = generate(&request, &EmitOptions::default())?;
//! assert!(artifact.contains("TINCUP_CPO_TAG(\"scale\")"));
//! # Ok::<(), cpogen::GenerateError>(())
//! ```
//!
//! # Architecture
//!
//! One request flows strictly forward, with every validation done up front:
//!
//! - [`request`] - external JSON/YAML schema
//! - [`parser`] - argument and impl-target mini-language parsers
//! - [`normalizer`] - canonical specification + operation-pattern registry
//! - [`classify`] - per-argument flag records and mask packing
//! - [`dispatch`] - runtime-to-compile-time dispatch tables
//! - [`codegen`] - emission strategies (generic, concrete, variadic,
//!   dispatch, third-party extension)
//! - [`core`] - shared model and error types

pub mod classify;
pub mod codegen;
pub mod core;
pub mod dispatch;
pub mod generator;
pub mod normalizer;
pub mod parser;
pub mod request;

// Re-export the common surface.
pub use crate::core::{
    ArgumentDescriptor, DispatchDescriptor, DispatchKind, GenerateError, GenerateResult,
    Presentation, Qualifiers, RefCategory, Specification,
};
pub use classify::{classify, ArgFlags, Classification, FlagKind};
pub use codegen::{emit_functor, select_strategy, EmitOptions, Strategy};
pub use dispatch::{build_table, DispatchEntry, DispatchTable};
pub use generator::{generate, generate_from_spec};
pub use normalizer::{find_pattern, normalize, OperationPattern, OPERATION_PATTERNS};
pub use parser::{parse_argument, parse_target, TargetDescriptor, TargetParam};
pub use request::{DispatchRequest, GenerateRequest};
