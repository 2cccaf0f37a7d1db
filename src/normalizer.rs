// This module merges a raw request into one canonical, fully validated Specification.
// A request supplies exactly one of an explicit argument list or a named operation
// pattern; the pattern registry carries the canned one-to-three argument shapes
// (mutating_binary, scalar_mutating, unary_mutating, binary_query, unary_query,
// generator, binary_transform), each expanding to mini-language entries that run through
// the ordinary argument parser. All cross-argument validation happens here and nowhere
// later: unique parameter names, at most one pack and only in last position, a dispatch
// argument that shadows no positional argument, distinct dispatch labels, the Boolean
// two-label rule (with the default first_tag/second_tag pair when labels are omitted),
// and identifier validity for the dispatch point name itself. The classification engine
// and dispatch table builder downstream are total functions because nothing invalid
// survives this stage.

//! Specification normalizer and operation-pattern registry.

use crate::core::{
    is_valid_identifier, DispatchDescriptor, DispatchKind, GenerateError, GenerateResult,
    Presentation, Specification,
};
use crate::parser::parse_argument;
use crate::request::{DispatchRequest, GenerateRequest};

/// One canned operation pattern.
#[derive(Debug, Clone, Copy)]
pub struct OperationPattern {
    pub name: &'static str,
    pub description: &'static str,
    /// Argument entries in the mini-language of [`parse_argument`].
    pub args: &'static [&'static str],
    /// One-line implementation note carried into generated doc comments.
    pub note: &'static str,
}

/// Canned operation patterns, keyed by `operation_type`.
pub const OPERATION_PATTERNS: &[OperationPattern] = &[
    OperationPattern {
        name: "mutating_binary",
        description: "Modifies first object using second object",
        args: &["$T&: target", "$const U&: source"],
        note: "Implement your binary modification logic here",
    },
    OperationPattern {
        name: "scalar_mutating",
        description: "Modifies object using a scalar value",
        args: &["$T&: target", "$S: scalar"],
        note: "Implement your scalar modification logic here",
    },
    OperationPattern {
        name: "unary_mutating",
        description: "Modifies object using a unary function",
        args: &["$T&: target", "$F: func"],
        note: "Apply func to modify target",
    },
    OperationPattern {
        name: "binary_query",
        description: "Computes value from two objects",
        args: &["$const T&: lhs", "$const U&: rhs"],
        note: "Implement your binary computation logic here",
    },
    OperationPattern {
        name: "unary_query",
        description: "Computes value from one object",
        args: &["$const T&: obj"],
        note: "Implement your query logic here",
    },
    OperationPattern {
        name: "generator",
        description: "Creates new object from existing object",
        args: &["$const T&: source"],
        note: "Create and return a new object based on source",
    },
    OperationPattern {
        name: "binary_transform",
        description: "Applies a binary function to transform two objects",
        args: &["$T&: target", "$const U&: source", "$F: func"],
        note: "Apply func to transform target using source",
    },
];

/// Look up a canned pattern by name.
pub fn find_pattern(name: &str) -> Option<&'static OperationPattern> {
    OPERATION_PATTERNS.iter().find(|p| p.name == name)
}

/// Default Boolean labels when a request omits `options`.
const DEFAULT_BOOL_LABELS: [&str; 2] = ["first_tag", "second_tag"];

/// Merge a raw request into a validated [`Specification`].
pub fn normalize(request: &GenerateRequest) -> GenerateResult<Specification> {
    if !is_valid_identifier(&request.name) {
        return Err(GenerateError::InvalidIdentifier { name: request.name.clone() });
    }

    let entries: Vec<String> = match (&request.args, &request.operation_type) {
        (Some(_), Some(_)) | (None, None) => {
            return Err(GenerateError::ConflictingSpecificationInputs);
        }
        (Some(args), None) => args.clone(),
        (None, Some(op)) => {
            let pattern = find_pattern(op).ok_or_else(|| GenerateError::UnknownOperationPattern {
                name: op.clone(),
                available: OPERATION_PATTERNS
                    .iter()
                    .map(|p| p.name)
                    .collect::<Vec<_>>()
                    .join(", "),
            })?;
            pattern.args.iter().map(|s| s.to_string()).collect()
        }
    };

    let mut arguments = Vec::with_capacity(entries.len());
    for entry in &entries {
        arguments.push(parse_argument(entry)?);
    }

    for (i, arg) in arguments.iter().enumerate() {
        if arguments[..i].iter().any(|other| other.name == arg.name) {
            return Err(GenerateError::NameCollision {
                name: arg.name.clone(),
                reason: "duplicate argument name".to_string(),
            });
        }
        if arg.is_pack && i + 1 != arguments.len() {
            return Err(GenerateError::MalformedArgumentExpression {
                expression: entries[i].clone(),
                reason: "a pack argument must be the last argument".to_string(),
            });
        }
    }

    let dispatch = match &request.runtime_dispatch {
        Some(raw) => Some(normalize_dispatch(raw, &arguments)?),
        None => None,
    };

    let all_concrete = !arguments.is_empty() && arguments.iter().all(|a| !a.is_generic);

    Ok(Specification {
        name: request.name.clone(),
        arguments,
        dispatch,
        all_concrete,
        presentation: Presentation {
            doc_comments: request.doxygen.unwrap_or(false),
            ..Presentation::default()
        },
    })
}

fn normalize_dispatch(
    raw: &DispatchRequest,
    arguments: &[crate::core::ArgumentDescriptor],
) -> GenerateResult<DispatchDescriptor> {
    let kind = match raw.kind.as_str() {
        "bool" => DispatchKind::Boolean,
        "string" => DispatchKind::String,
        other => {
            return Err(GenerateError::InvalidDispatchDescriptor {
                reason: format!("unknown dispatch type '{other}', expected 'bool' or 'string'"),
            });
        }
    };

    if !is_valid_identifier(&raw.dispatch_arg) {
        return Err(GenerateError::InvalidIdentifier { name: raw.dispatch_arg.clone() });
    }
    if arguments.iter().any(|a| a.name == raw.dispatch_arg) {
        return Err(GenerateError::NameCollision {
            name: raw.dispatch_arg.clone(),
            reason: "dispatch argument shadows a positional argument".to_string(),
        });
    }

    let options: Vec<String> = match (&raw.options, kind) {
        (Some(opts), _) => opts.clone(),
        (None, DispatchKind::Boolean) => {
            DEFAULT_BOOL_LABELS.iter().map(|s| s.to_string()).collect()
        }
        (None, DispatchKind::String) => {
            return Err(GenerateError::InvalidDispatchDescriptor {
                reason: "string dispatch requires an options array".to_string(),
            });
        }
    };

    for (i, label) in options.iter().enumerate() {
        if options[..i].contains(label) {
            return Err(GenerateError::DuplicateDispatchLabel { label: label.clone() });
        }
    }
    match kind {
        DispatchKind::Boolean if options.len() != 2 => {
            return Err(GenerateError::InvalidDispatchDescriptor {
                reason: format!("bool dispatch takes exactly two labels, got {}", options.len()),
            });
        }
        DispatchKind::String if options.is_empty() => {
            return Err(GenerateError::InvalidDispatchDescriptor {
                reason: "string dispatch needs at least one label".to_string(),
            });
        }
        _ => {}
    }

    Ok(DispatchDescriptor { kind, argument: raw.dispatch_arg.clone(), options })
}
