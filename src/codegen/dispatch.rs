// This module renders the runtime-dispatch strategy: one runtime entry point that
// performs the dispatch table's match and forwards to an independently tagged,
// compile-time-constrained overload per table entry. Every entry gets a tag struct
// member on the functor; string tables additionally get the synthesized not_found tag
// and an options array in declaration order. The entry point takes the positional
// arguments plus the implicit dispatch argument (a defaulted bool, or a string_view)
// and hands the runtime value to the support library's BoolDispatch/StringDispatch,
// whose receive() callback is an if-constexpr ladder in table order: Boolean matches
// the value directly with true selecting the first declared label, string compares
// left to right with first match winning and everything else falling through to
// not_found. The tagged overloads give callers and the compliance checker one visible
// branch per table entry.

//! Runtime-dispatch functor rendering.

use crate::classify::Classification;
use crate::core::{DispatchKind, Specification};
use crate::dispatch::DispatchTable;

use super::{introspection_block, signature_parts, SignatureParts};

/// Render the dispatch-strategy functor for a specification with a table.
pub fn emit_dispatch_functor(
    spec: &Specification,
    classification: &Classification,
    table: &DispatchTable,
) -> String {
    let parts = signature_parts(spec);
    let functor = format!("{}_ftor", spec.name);

    let mut out = String::new();
    out.push_str(&format!(
        "inline constexpr struct {functor} final : tincup::cpo_base<{functor}> {{\n"
    ));
    out.push_str(&format!("  TINCUP_CPO_TAG(\"{}\")\n\n", spec.name));

    for entry in &table.entries {
        let ident = tag_ident(&entry.label);
        out.push_str(&format!("  static constexpr struct {ident}_tag {{}} {ident}{{}};\n"));
    }
    if table.not_found_tag.is_some() {
        out.push_str("  static constexpr struct not_found_tag {} not_found{};\n");
    }
    out.push('\n');

    if table.kind == DispatchKind::String {
        let labels: Vec<String> =
            table.entries.iter().map(|e| format!("\"{}\"", e.label)).collect();
        out.push_str(&format!(
            "  inline static constexpr auto options = tincup::string_view_array<{}>{{ {} }};\n\n",
            table.entries.len(),
            labels.join(", ")
        ));
    }

    out.push_str(&entry_point(table, &parts));
    out.push('\n');
    out.push_str(&tagged_overloads(table, &parts));
    out.push('\n');
    out.push_str(&introspection_block(classification));
    out.push_str(&format!("}} {}{{}};\n", spec.name));
    out
}

/// The runtime entry point performing the table match.
fn entry_point(table: &DispatchTable, parts: &SignatureParts) -> String {
    let dispatch_param = match table.kind {
        DispatchKind::Boolean => format!("bool {} = false", table.argument),
        DispatchKind::String => format!("std::string_view {}", table.argument),
    };
    let parameters = join_parameters(&parts.parameters, &dispatch_param);

    let mut out = String::new();
    if !parts.template_header.is_empty() {
        out.push_str(&format!("  {}\n", parts.template_header));
    }
    out.push_str(&format!("  constexpr auto operator()({parameters}) const {{\n"));
    match table.kind {
        DispatchKind::Boolean => {
            out.push_str(&format!(
                "    tincup::BoolDispatch dispatcher({});\n",
                table.argument
            ));
            out.push_str("    return dispatcher.receive([&](auto dispatch_constant) {\n");
            out.push_str("      if constexpr (dispatch_constant.value) {\n");
            out.push_str(&format!(
                "        return {};\n",
                invoke_tagged(&parts.forwards, &tag_ident(&table.entries[0].label))
            ));
            out.push_str("      } else {\n");
            out.push_str(&format!(
                "        return {};\n",
                invoke_tagged(&parts.forwards, &tag_ident(&table.entries[1].label))
            ));
            out.push_str("      }\n");
        }
        DispatchKind::String => {
            out.push_str(&format!(
                "    tincup::StringDispatch<{}> dispatcher({}, options);\n",
                table.entries.len(),
                table.argument
            ));
            out.push_str("    return dispatcher.receive([&](auto dispatch_constant) {\n");
            for (i, entry) in table.entries.iter().enumerate() {
                let keyword = if i == 0 { "if" } else { "} else if" };
                out.push_str(&format!(
                    "      {keyword} constexpr (dispatch_constant.value == {i}) {{\n"
                ));
                out.push_str(&format!(
                    "        return {};\n",
                    invoke_tagged(&parts.forwards, &tag_ident(&entry.label))
                ));
            }
            out.push_str("      } else {\n");
            out.push_str(&format!(
                "        return {};\n",
                invoke_tagged(&parts.forwards, "not_found")
            ));
            out.push_str("      }\n");
        }
    }
    out.push_str("    });\n  }\n");
    out
}

/// One compile-time-tagged overload per table entry (plus not_found).
fn tagged_overloads(table: &DispatchTable, parts: &SignatureParts) -> String {
    let mut idents: Vec<String> = table.entries.iter().map(|e| tag_ident(&e.label)).collect();
    if table.not_found_tag.is_some() {
        idents.push("not_found".to_string());
    }
    let mut out = String::new();
    for ident in idents {
        if !parts.template_header.is_empty() {
            out.push_str(&format!("  {}\n", parts.template_header));
        }
        let parameters = join_parameters(&parts.parameters, &format!("{ident}_tag"));
        out.push_str(&format!("  constexpr auto operator()({parameters}) const {{\n"));
        out.push_str(&format!("    return {};\n  }}\n", invoke_tagged(&parts.forwards, &ident)));
    }
    out
}

fn join_parameters(positional: &str, trailing: &str) -> String {
    if positional.is_empty() {
        trailing.to_string()
    } else {
        format!("{positional}, {trailing}")
    }
}

fn invoke_tagged(forwards: &str, tag: &str) -> String {
    if forwards.is_empty() {
        format!("tag_invoke(*this, {tag})")
    } else {
        format!("tag_invoke(*this, {forwards}, {tag})")
    }
}

/// Labels become tag identifiers; anything outside `[A-Za-z0-9_]` is
/// replaced and a leading digit is escaped.
fn tag_ident(label: &str) -> String {
    let mut ident: String = label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}
