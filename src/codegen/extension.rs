// This module renders the third-party extension artifacts: a formatter-style trait
// specialization skeleton that adapts a foreign container/type to an existing dispatch
// point without touching core code, and an optional ADL-visible forwarding shim placed in
// the dispatch point's namespace. The skeleton specializes tincup::cpo_impl for the
// parsed impl target, parameterized per the target's named parameters and packs, and
// forwards through a static call(...) taking a trailing Args pack so implementers never
// need perfect argument reconstruction. The shim's activation condition is the capability
// query "does a cpo_impl specialization exist for this target" — emitted as a rendered
// predicate expression plus matching noexcept/decltype propagation, and never evaluated
// by the generator itself. Both artifacts can be wrapped in an #ifdef guard so projects
// can keep third-party integrations optional.

//! Third-party extension skeleton and ADL shim rendering.

use crate::core::Specification;
use crate::parser::TargetDescriptor;

use super::Predicate;

/// Render the `tincup::cpo_impl` specialization skeleton for a target.
pub fn emit_trait_impl(
    spec: &Specification,
    target: &TargetDescriptor,
    guard: Option<&str>,
) -> String {
    let functor = format!("{}_ftor", spec.name);
    let header = target.template_header();

    let mut out = String::new();
    out.push_str("namespace tincup {\n\n");
    if header.is_empty() {
        out.push_str("template<>\n");
    } else {
        out.push_str(&format!("{header}\n"));
    }
    out.push_str(&format!("struct cpo_impl<{}, {}> {{\n", functor, target.specialized));
    out.push_str("  template<typename... Args>\n");
    out.push_str(&format!(
        "  static constexpr auto call({}& target, Args&&... args) {{\n",
        target.specialized
    ));
    out.push_str(&format!(
        "    // TODO: implement {} for {}\n",
        spec.name, target.specialized
    ));
    out.push_str("  }\n};\n\n} // namespace tincup\n");

    if let Some(guard) = guard {
        format!("#ifdef {guard}\n{out}#endif\n")
    } else {
        out
    }
}

/// Render the ADL-visible forwarding shim. Active only when a matching
/// extension exists; existence is a rendered predicate, never evaluated
/// here.
pub fn emit_adl_shim(
    spec: &Specification,
    target: &TargetDescriptor,
    shim_namespace: Option<&str>,
) -> String {
    let functor = format!("{}_ftor", spec.name);
    let exists = Predicate::ImplExists {
        functor: functor.clone(),
        target: target.specialized.clone(),
        args_pack: "Args".to_string(),
    };
    let call = format!(
        "tincup::cpo_impl<{}, {}>::call(target, std::forward<Args>(args)...)",
        functor, target.specialized
    );

    let mut params: Vec<String> = target
        .params
        .iter()
        .map(|p| {
            if p.is_pack {
                format!("typename... {}", p.name)
            } else {
                format!("typename {}", p.name)
            }
        })
        .collect();
    params.push("typename... Args".to_string());

    let mut out = String::new();
    out.push_str(&format!("template<{}>\n", params.join(", ")));
    out.push_str(&format!("  requires {}\n", exists.render()));
    out.push_str(&format!(
        "constexpr auto tag_invoke({functor}, {}& target, Args&&... args)\n",
        target.specialized
    ));
    out.push_str(&format!("  noexcept(noexcept({call}))\n"));
    out.push_str(&format!("  -> decltype({call})\n{{\n  return {call};\n}}\n"));

    match shim_namespace {
        Some(ns) => format!("namespace {ns} {{\n\n{out}\n}} // namespace {ns}\n"),
        None => out,
    }
}
