// This module renders the dispatch-point functor for the generic, concrete, and variadic
// strategies; the runtime-dispatch strategy lives in the sibling module and is delegated
// to whenever a dispatch table is present. The generic shape follows the runtime
// library's expected pattern: an inline constexpr functor struct deriving from
// tincup::cpo_base, the self-identifying tag, a positive operator() gated by a
// tag_invocable requires clause with matching noexcept propagation and trailing return
// type, and an argument-set-disjoint negative operator() that routes into the base
// class's structured diagnostic instead of producing an opaque overload error. The
// variadic shape is the same with the trailing pack flowing through every clause, so the
// guard evaluates the whole pack at once. The concrete shape drops the template head and
// the negative branch, and when every argument is concrete it carries a visible advisory
// that a plain function would usually be preferable. All three append the introspection
// block with the packed classification masks.

//! Generic, concrete, and variadic functor rendering.

use crate::classify::Classification;
use crate::core::Specification;
use crate::dispatch::DispatchTable;

use super::dispatch::emit_dispatch_functor;
use super::{concept_argument_list, introspection_block, signature_parts, Predicate};

/// Render the functor definition for a specification.
pub fn emit_functor(
    spec: &Specification,
    classification: &Classification,
    table: Option<&DispatchTable>,
) -> String {
    if let Some(table) = table {
        return emit_dispatch_functor(spec, classification, table);
    }
    if spec.has_generics() {
        emit_guarded_functor(spec, classification)
    } else {
        emit_concrete_functor(spec, classification)
    }
}

/// Generic and variadic strategies: guarded positive branch plus disjoint
/// failure branch.
fn emit_guarded_functor(spec: &Specification, classification: &Classification) -> String {
    let parts = signature_parts(spec);
    let functor = format!("{}_ftor", spec.name);
    let positive = Predicate::TagInvocable {
        functor: functor.clone(),
        arg_types: parts.concept_types.clone(),
    };
    let nothrow = Predicate::NothrowTagInvocable {
        functor: functor.clone(),
        arg_types: parts.concept_types.clone(),
    };
    let concept_args = concept_argument_list(&functor, &parts.concept_types);
    let invoke = invoke_expression(&parts.forwards);

    let mut out = String::new();
    out.push_str(&format!(
        "inline constexpr struct {functor} final : tincup::cpo_base<{functor}> {{\n"
    ));
    out.push_str(&format!("  TINCUP_CPO_TAG(\"{}\")\n\n", spec.name));

    out.push_str(&format!("  {}\n", parts.template_header));
    out.push_str(&format!("    requires {}\n", positive.render()));
    out.push_str(&format!("  constexpr auto operator()({}) const\n", parts.parameters));
    out.push_str(&format!("    noexcept({})\n", nothrow.render()));
    out.push_str(&format!("    -> tag_invocable_t<{concept_args}> {{\n"));
    out.push_str(&format!("    return {invoke};\n"));
    out.push_str("  }\n\n");

    out.push_str(&format!("  {}\n", parts.template_header));
    out.push_str(&format!("    requires {}\n", positive.negated().render()));
    out.push_str(&format!("  constexpr void operator()({}) const {{\n", parts.parameters));
    out.push_str(&format!("    this->fail({});\n", parts.forwards));
    out.push_str("  }\n\n");

    out.push_str(&introspection_block(classification));
    out.push_str(&format!("}} {}{{}};\n", spec.name));
    out
}

/// Concrete strategy: a non-template callable. Correct, but conventionally
/// discouraged when every argument type is concrete.
fn emit_concrete_functor(spec: &Specification, classification: &Classification) -> String {
    let parts = signature_parts(spec);
    let functor = format!("{}_ftor", spec.name);
    let nothrow = Predicate::NothrowTagInvocable {
        functor: functor.clone(),
        arg_types: parts.concept_types.clone(),
    };
    let invoke = invoke_expression(&parts.forwards);

    let mut out = String::new();
    if spec.all_concrete {
        out.push_str(
            "// Advisory: every argument type is concrete; a plain function is usually\n\
             // preferable to a customization point here.\n",
        );
    }
    out.push_str(&format!(
        "inline constexpr struct {functor} final : tincup::cpo_base<{functor}> {{\n"
    ));
    out.push_str(&format!("  TINCUP_CPO_TAG(\"{}\")\n\n", spec.name));
    // Deduced return type: the functor is still incomplete in its own
    // definition, so only the deferred contexts may name it.
    out.push_str(&format!("  constexpr auto operator()({}) const\n", parts.parameters));
    out.push_str(&format!("    noexcept({}) {{\n", nothrow.render()));
    out.push_str(&format!("    return {invoke};\n"));
    out.push_str("  }\n\n");
    out.push_str(&introspection_block(classification));
    out.push_str(&format!("}} {}{{}};\n", spec.name));
    out
}

fn invoke_expression(forwards: &str) -> String {
    if forwards.is_empty() {
        "tag_invoke(*this)".to_string()
    } else {
        format!("tag_invoke(*this, {forwards})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::normalizer::normalize;
    use crate::request::GenerateRequest;

    fn emit(json: &str) -> String {
        let spec = normalize(&GenerateRequest::from_json(json).unwrap()).unwrap();
        emit_functor(&spec, &classify(&spec), None)
    }

    #[test]
    fn test_generic_branches_are_disjoint() {
        let code = emit(r#"{"name": "scale", "args": ["$T&: target", "double: factor"]}"#);
        assert!(code.contains("TINCUP_CPO_TAG(\"scale\")"));
        assert!(code.contains("requires tag_invocable_c<scale_ftor, T&, double>"));
        assert!(code.contains("requires (!tag_invocable_c<scale_ftor, T&, double>)"));
        assert!(code.contains("noexcept(nothrow_tag_invocable_c<scale_ftor, T&, double>)"));
        assert!(code.contains("-> tag_invocable_t<scale_ftor, T&, double>"));
        assert!(code.contains("this->fail(target, factor);"));
        assert!(code.contains("} scale{};"));
    }

    #[test]
    fn test_forwarding_argument_uses_std_forward() {
        let code = emit(r#"{"name": "sink", "args": ["$V&&: y"]}"#);
        assert!(code.contains("constexpr auto operator()(V&& y) const"));
        assert!(code.contains("tag_invoke(*this, std::forward<V>(y))"));
        // The deduced parameter, not the reference, appears in concepts.
        assert!(code.contains("tag_invocable_c<sink_ftor, V>"));
    }

    #[test]
    fn test_concrete_advisory_marker() {
        let code = emit(r#"{"name": "dump", "args": ["int: x", "double&: y"]}"#);
        assert!(code.starts_with("// Advisory:"));
        assert!(code.contains("TINCUP_CPO_TAG(\"dump\")"));
        assert!(!code.contains("requires"));
        // No template head on the operator; only arg_traits is templated.
        assert!(!code.contains("template<typename T>"));
        assert!(code.contains("tag_invoke(*this, x, y)"));
    }

    #[test]
    fn test_zero_argument_functor_has_no_advisory() {
        let code = emit(r#"{"name": "tick", "args": []}"#);
        assert!(!code.contains("// Advisory:"));
        assert!(code.contains("constexpr auto operator()() const"));
        assert!(code.contains("tag_invoke(*this)"));
        assert!(code.contains("noexcept(nothrow_tag_invocable_c<tick_ftor>)"));
    }

    #[test]
    fn test_variadic_guard_covers_whole_pack() {
        let code = emit(r#"{"name": "apply", "args": ["$F&: f", "$Args&&...: rest"]}"#);
        assert!(code.contains("template<typename F, typename... Args>"));
        assert!(code.contains("requires tag_invocable_c<apply_ftor, F&, Args...>"));
        assert!(code.contains("Args&&... rest"));
        assert!(code.contains("std::forward<Args>(rest)..."));
        assert!(code.contains("is_variadic = true"));
    }
}
