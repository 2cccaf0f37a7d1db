// This module is the code emitter's hub: strategy selection from the semantic model,
// emit options, the capability-query predicate tree, and the signature/introspection
// rendering helpers every strategy shares. Generation is plain string building with
// format!, accumulating lines into an output buffer; there is no template engine. One
// contract is shared by all strategies: the self-identifying tag text embedded via
// TINCUP_CPO_TAG equals the specification name byte-for-byte, which is what the external
// pattern-verification tooling keys on. Capability queries ("does an implementation
// exist") are modeled as a small expression tree that is rendered into the artifact and
// never evaluated here; only the target compiler resolves them.

//! Code emitter.
//!
//! Renders a validated [`Specification`] plus derived metadata into generated
//! C++ source. Strategy selection:
//!
//! - [`Strategy::Dispatch`] when a dispatch table is present
//! - [`Strategy::Variadic`] when a trailing pack is present
//! - [`Strategy::Concrete`] when no argument is generic
//! - [`Strategy::Generic`] otherwise

mod cpo;
mod dispatch;
mod extension;

pub use cpo::emit_functor;
pub use extension::{emit_adl_shim, emit_trait_impl};

use crate::classify::{Classification, FlagKind};
use crate::core::Specification;
use crate::dispatch::DispatchTable;

/// Generation strategy derived from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Generic,
    Concrete,
    Variadic,
    Dispatch,
}

/// Pick the strategy for a specification. Dispatch wins over pack-ness,
/// pack-ness over concreteness; a specification without generic arguments
/// (including the zero-argument case) renders concretely.
pub fn select_strategy(spec: &Specification, table: Option<&DispatchTable>) -> Strategy {
    if table.is_some() {
        Strategy::Dispatch
    } else if spec.pack_argument().is_some() {
        Strategy::Variadic
    } else if !spec.has_generics() {
        Strategy::Concrete
    } else {
        Strategy::Generic
    }
}

/// Host- and presentation-level emission switches.
#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    /// Emit a Doxygen block and the tag_invoke signature above the functor.
    pub doc_comments: bool,
    /// Wrap the artifact in `namespace NS { ... }`.
    pub namespace: Option<String>,
    /// Prepend `#include <tincup/tincup.hpp>`.
    pub with_include: bool,
    /// Append a declaration-only tag_invoke stub.
    pub emit_stub: bool,
    /// With `emit_stub`, also emit a macro-guarded stub definition.
    pub stub_guard: Option<String>,
    /// Target type expression for third-party extension generation.
    pub impl_target: Option<String>,
    pub emit_trait_impl: bool,
    /// Emit only the trait specialization, not the dispatch point.
    pub trait_impl_only: bool,
    /// Wrap the trait specialization in `#ifdef MACRO`.
    pub impl_guard: Option<String>,
    pub emit_adl_shim: bool,
    /// Namespace for the ADL shim (the CPO's namespace).
    pub shim_namespace: Option<String>,
}

/// Capability-query expression, rendered into the artifact and resolved
/// only by the downstream target compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `tag_invocable_c<functor, Types...>`
    TagInvocable { functor: String, arg_types: Vec<String> },
    /// `nothrow_tag_invocable_c<functor, Types...>`
    NothrowTagInvocable { functor: String, arg_types: Vec<String> },
    /// `tincup::has_cpo_impl_for_c<functor, Target, Args...>`
    ImplExists { functor: String, target: String, args_pack: String },
    Not(Box<Predicate>),
}

impl Predicate {
    pub fn negated(self) -> Self {
        Predicate::Not(Box::new(self))
    }

    pub fn render(&self) -> String {
        match self {
            Predicate::TagInvocable { functor, arg_types } => {
                format!("tag_invocable_c<{}>", concept_argument_list(functor, arg_types))
            }
            Predicate::NothrowTagInvocable { functor, arg_types } => {
                format!("nothrow_tag_invocable_c<{}>", concept_argument_list(functor, arg_types))
            }
            Predicate::ImplExists { functor, target, args_pack } => {
                format!("tincup::has_cpo_impl_for_c<{functor}, {target}, {args_pack}...>")
            }
            Predicate::Not(inner) => format!("(!{})", inner.render()),
        }
    }
}

/// `functor, T&, double` — the canonical concept argument spelling used by
/// every concept-family reference to one specification.
pub(crate) fn concept_argument_list(functor: &str, arg_types: &[String]) -> String {
    if arg_types.is_empty() {
        functor.to_string()
    } else {
        format!("{}, {}", functor, arg_types.join(", "))
    }
}

/// Signature fragments shared by the strategies, derived once per emission.
pub(crate) struct SignatureParts {
    /// `T& target, double factor`
    pub parameters: String,
    /// `target, factor` with forwarding applied.
    pub forwards: String,
    /// Concept argument types in call-site order.
    pub concept_types: Vec<String>,
    /// `template<typename T>` or empty.
    pub template_header: String,
}

pub(crate) fn signature_parts(spec: &Specification) -> SignatureParts {
    let parameters = spec
        .arguments
        .iter()
        .map(|a| a.parameter_text())
        .collect::<Vec<_>>()
        .join(", ");
    let forwards = spec
        .arguments
        .iter()
        .map(|a| a.forward_text())
        .collect::<Vec<_>>()
        .join(", ");
    let concept_types = spec.arguments.iter().map(|a| a.concept_type()).collect();
    let template_list = spec.template_parameter_list();
    let template_header = if template_list.is_empty() {
        String::new()
    } else {
        format!("template<{}>", template_list.join(", "))
    };
    SignatureParts { parameters, forwards, concept_types, template_header }
}

/// Render the introspection block: the `is_variadic` constant and the
/// `arg_traits` mask structure. Masks are packed here, at emission time; a
/// pack contributes a `pack_mask` expression replicated per consumed
/// element at the artifact's compile time.
pub(crate) fn introspection_block(classification: &Classification) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "  inline static constexpr bool is_variadic = {};\n\n",
        classification.is_variadic
    ));
    out.push_str("  template<typename... Args>\n  struct arg_traits {\n");
    out.push_str(&format!(
        "    static constexpr std::size_t fixed_arity = {};\n",
        classification.fixed_arity
    ));
    if classification.is_variadic {
        out.push_str(
            "    static constexpr std::uint64_t pack_mask =\n      \
             (sizeof...(Args) > fixed_arity)\n        \
             ? (((1ull << (sizeof...(Args) - fixed_arity)) - 1ull) << fixed_arity)\n        \
             : 0ull;\n",
        );
    }
    for kind in FlagKind::ALL {
        let literal = mask_literal(classification.mask(kind), classification.fixed_arity);
        if classification.is_variadic && classification.pack_has(kind) {
            out.push_str(&format!(
                "    static constexpr std::uint64_t {} = {} | pack_mask;\n",
                kind.mask_name(),
                literal
            ));
        } else {
            out.push_str(&format!(
                "    static constexpr std::uint64_t {} = {};\n",
                kind.mask_name(),
                literal
            ));
        }
    }
    out.push_str("  };\n");
    out
}

/// Binary mask literal padded to the fixed arity, e.g. `0b10ull`.
fn mask_literal(mask: u64, fixed_arity: usize) -> String {
    let width = fixed_arity.max(1);
    format!("0b{mask:0width$b}ull")
}

/// Doxygen block for the functor, including the customization signature.
pub(crate) fn doc_comment_block(spec: &Specification) -> String {
    let mut out = String::new();
    out.push_str("/**\n");
    out.push_str(&format!(" * @brief {} customization point\n", spec.name));
    if !spec.arguments.is_empty() {
        out.push_str(" *\n");
        for arg in &spec.arguments {
            out.push_str(&format!(
                " * @param {} [TODO: Description for {}]\n",
                arg.name, arg.name
            ));
        }
    }
    out.push_str(" *\n * Customize by overloading tag_invoke:\n");
    for line in tag_invoke_signature(spec).lines() {
        out.push_str(&format!(" *   {line}\n"));
    }
    out.push_str(" */\n");
    out
}

/// `template<...>\nconstexpr auto tag_invoke({name}_ftor, <params>)`.
pub(crate) fn tag_invoke_signature(spec: &Specification) -> String {
    let parts = signature_parts(spec);
    let head = if parts.parameters.is_empty() {
        format!("constexpr auto tag_invoke({}_ftor)", spec.name)
    } else {
        format!("constexpr auto tag_invoke({}_ftor, {})", spec.name, parts.parameters)
    };
    if parts.template_header.is_empty() {
        head
    } else {
        format!("{}\n{}", parts.template_header, head)
    }
}

/// Declaration-only tag_invoke stub, optionally with a guarded definition
/// whose body intentionally fails to compile until replaced.
pub(crate) fn tag_invoke_stub(spec: &Specification, guard: Option<&str>) -> String {
    let signature = tag_invoke_signature(spec);
    let mut out = format!("{signature};\n");
    if let Some(guard) = guard {
        out.push_str(&format!(
            "\n#ifdef {guard}\n{signature} {{\n\
             #  if defined(__clang__) || defined(__GNUC__) || defined(_MSC_VER)\n  \
             static_assert(true == false, \"Provide implementation or disable guard\");\n\
             #  endif\n}}\n#endif\n"
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::dispatch::build_table;
    use crate::normalizer::normalize;
    use crate::request::GenerateRequest;

    fn spec_of(json: &str) -> Specification {
        normalize(&GenerateRequest::from_json(json).unwrap()).unwrap()
    }

    #[test]
    fn test_strategy_selection() {
        let generic = spec_of(r#"{"name": "a", "args": ["$T&: x"]}"#);
        assert_eq!(select_strategy(&generic, None), Strategy::Generic);

        let concrete = spec_of(r#"{"name": "b", "args": ["int: x"]}"#);
        assert_eq!(select_strategy(&concrete, None), Strategy::Concrete);

        let variadic = spec_of(r#"{"name": "c", "args": ["$Args&&...: rest"]}"#);
        assert_eq!(select_strategy(&variadic, None), Strategy::Variadic);

        let zero = spec_of(r#"{"name": "d", "args": []}"#);
        assert_eq!(select_strategy(&zero, None), Strategy::Concrete);

        let dispatched = spec_of(
            r#"{"name": "e", "args": ["$T&: x"],
                "runtime_dispatch": {"type": "bool", "dispatch_arg": "flag"}}"#,
        );
        let table = build_table(dispatched.dispatch.as_ref().unwrap());
        assert_eq!(select_strategy(&dispatched, Some(&table)), Strategy::Dispatch);
    }

    #[test]
    fn test_predicate_rendering() {
        let positive = Predicate::TagInvocable {
            functor: "scale_ftor".into(),
            arg_types: vec!["T&".into(), "double".into()],
        };
        assert_eq!(positive.render(), "tag_invocable_c<scale_ftor, T&, double>");
        assert_eq!(
            positive.clone().negated().render(),
            "(!tag_invocable_c<scale_ftor, T&, double>)"
        );

        let exists = Predicate::ImplExists {
            functor: "scale_ftor".into(),
            target: "std::vector<T, Alloc>".into(),
            args_pack: "Args".into(),
        };
        assert_eq!(
            exists.render(),
            "tincup::has_cpo_impl_for_c<scale_ftor, std::vector<T, Alloc>, Args...>"
        );
    }

    #[test]
    fn test_mask_literal_width_tracks_arity() {
        let spec = spec_of(r#"{"name": "scale", "args": ["$T&: target", "double: factor"]}"#);
        let block = introspection_block(&classify(&spec));
        assert!(block.contains("values_mask = 0b10ull"));
        assert!(block.contains("lvalue_refs_mask = 0b01ull"));
        assert!(block.contains("fixed_arity = 2"));
        assert!(block.contains("is_variadic = false"));
        assert!(!block.contains("pack_mask"));
    }

    #[test]
    fn test_pack_mask_replication_expression() {
        let spec = spec_of(r#"{"name": "apply", "args": ["$F&: f", "$Args&&...: rest"]}"#);
        let block = introspection_block(&classify(&spec));
        assert!(block.contains("is_variadic = true"));
        assert!(block.contains("pack_mask ="));
        assert!(block.contains("forwarding_refs_mask = 0b0ull | pack_mask"));
        assert!(block.contains("rvalue_refs_mask = 0b0ull | pack_mask"));
        assert!(block.contains("lvalue_refs_mask = 0b1ull\n"));
    }

    #[test]
    fn test_stub_with_guard() {
        let spec = spec_of(r#"{"name": "scale", "args": ["$T&: target", "double: factor"]}"#);
        let stub = tag_invoke_stub(&spec, Some("SCALE_STUB"));
        assert!(stub.contains("template<typename T>"));
        assert!(stub.contains("constexpr auto tag_invoke(scale_ftor, T& target, double factor);"));
        assert!(stub.contains("#ifdef SCALE_STUB"));
        assert!(stub.contains("static_assert(true == false"));
    }
}
