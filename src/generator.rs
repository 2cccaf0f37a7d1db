// This module is the pipeline driver. One call runs a raw request through the strict
// forward-only flow: normalize into a validated Specification, derive the classification,
// build the dispatch table when a dispatch descriptor is present, then render the
// requested artifacts: the dispatch-point functor (unless trait-impl-only was asked for),
// an optional declaration stub with an optional guarded definition, an optional
// third-party trait specialization and ADL shim for a parsed impl target, and finally the
// presentation wrapping (namespace, include prepend) plus the marker scrub that keeps the
// parsing-only $ and ' characters out of the artifact. Validation failures surface before
// any rendering starts, so a failing request never produces a partial artifact. The
// driver logs stage boundaries at debug level; the library never writes files, that is
// the host's job.

//! Pipeline driver: request in, artifact out.

use crate::classify::classify;
use crate::codegen::{
    emit_adl_shim, emit_functor, emit_trait_impl, select_strategy, EmitOptions,
};
use crate::codegen::{doc_comment_block, tag_invoke_stub};
use crate::core::{GenerateError, GenerateResult, Specification};
use crate::dispatch::build_table;
use crate::normalizer::normalize;
use crate::parser::parse_target;
use crate::request::GenerateRequest;

/// Run the full pipeline for one request.
pub fn generate(request: &GenerateRequest, options: &EmitOptions) -> GenerateResult<String> {
    let spec = normalize(request)?;
    log::debug!("normalized '{}' ({} arguments)", spec.name, spec.arguments.len());
    generate_from_spec(&spec, options)
}

/// Run classification, table construction, and emission for a validated
/// specification.
pub fn generate_from_spec(spec: &Specification, options: &EmitOptions) -> GenerateResult<String> {
    let emit_trait = options.emit_trait_impl || options.trait_impl_only;
    if emit_trait && options.impl_target.is_none() {
        return Err(GenerateError::InvalidRequest {
            reason: "emitting a trait specialization requires an impl target".to_string(),
        });
    }
    if options.emit_adl_shim && options.impl_target.is_none() {
        return Err(GenerateError::InvalidRequest {
            reason: "emitting an ADL shim requires an impl target".to_string(),
        });
    }
    // Parse the target up front; a bad target must fail before anything
    // renders.
    let target = match &options.impl_target {
        Some(text) => Some(parse_target(text)?),
        None => None,
    };

    let classification = classify(spec);
    let table = spec.dispatch.as_ref().map(build_table);
    log::debug!(
        "emitting '{}' with strategy {:?}",
        spec.name,
        select_strategy(spec, table.as_ref())
    );

    let mut sections: Vec<String> = Vec::new();
    if !options.trait_impl_only {
        let mut functor = String::new();
        if options.doc_comments || spec.presentation.doc_comments {
            functor.push_str(&doc_comment_block(spec));
        }
        functor.push_str(&emit_functor(spec, &classification, table.as_ref()));
        sections.push(functor);

        if options.emit_stub {
            sections.push(tag_invoke_stub(spec, options.stub_guard.as_deref()));
        }
    }

    if let Some(target) = &target {
        if emit_trait {
            sections.push(emit_trait_impl(spec, target, options.impl_guard.as_deref()));
        }
        if options.emit_adl_shim {
            sections.push(emit_adl_shim(spec, target, options.shim_namespace.as_deref()));
        }
    }

    let body = sections
        .iter()
        .map(|s| s.trim_end())
        .collect::<Vec<_>>()
        .join("\n\n");
    Ok(scrub_markers(&wrap_output(&body, spec, options)))
}

/// Apply namespace wrapping and the include prepend.
fn wrap_output(body: &str, spec: &Specification, options: &EmitOptions) -> String {
    let namespace = options
        .namespace
        .as_deref()
        .or(spec.presentation.namespace.as_deref());
    let mut out = String::new();
    if options.with_include {
        out.push_str("#include <tincup/tincup.hpp>\n\n");
    }
    match namespace {
        Some(ns) => {
            out.push_str(&format!("namespace {ns} {{\n\n{body}\n\n}} // namespace {ns}\n"));
        }
        None => {
            out.push_str(body);
            out.push('\n');
        }
    }
    out
}

/// `$` and `'` only exist for parsing and never survive into the artifact.
fn scrub_markers(artifact: &str) -> String {
    artifact.replace(['$', '\''], "")
}
