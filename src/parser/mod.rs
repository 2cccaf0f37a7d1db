// This module is the hub for the two mini-language parsers at the front of the pipeline:
// the argument descriptor parser for "type-expression : parameter-name" entries and the
// impl-target parser for third-party extension targets. Both are pure functions returning
// structured errors; they share nothing but the core model, and their marker rules differ
// on purpose (an unmarked identifier is an inferred concrete type in the argument language
// but a literal segment in the target language).

//! Mini-language parsers.

pub mod argument;
pub mod target;

pub use argument::parse_argument;
pub use target::{parse_target, TargetDescriptor, TargetParam};
