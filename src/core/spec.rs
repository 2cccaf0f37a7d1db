// This module defines the canonical Specification produced by the normalizer and consumed
// by every later pipeline stage. A Specification bundles the dispatch point's name, the
// ordered argument descriptors (order equals call-site order), an optional dispatch
// descriptor for runtime-to-compile-time branching, the all_concrete aggregate, and a
// Presentation record of fields that shape output but carry no dispatch semantics (doc
// comment flag, wrapping namespace, output path). DispatchDescriptor models the two
// supported selector kinds: Boolean (two conceptual branches regardless of label text) and
// String (declared labels plus an implicit terminal not-found branch synthesized later by
// the table builder). Specifications are immutable once built and shared by reference
// through classification and emission.

//! Canonical specification model.

use std::path::PathBuf;

use super::descriptor::ArgumentDescriptor;

/// Selector kind for runtime dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchKind {
    /// Two branches selected directly by a `bool`.
    Boolean,
    /// N declared branches selected by string comparison, plus an implicit
    /// not-found terminal branch.
    String,
}

/// Validated runtime dispatch description.
///
/// `argument` is an implicit extra runtime parameter of the generated entry
/// point; it never appears among the positional [`ArgumentDescriptor`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchDescriptor {
    pub kind: DispatchKind,
    pub argument: String,
    /// Ordered, distinct branch labels. Exactly two for Boolean.
    pub options: Vec<String>,
}

/// Output-shaping fields with no dispatch semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presentation {
    /// Emit a Doxygen block and the tag_invoke signature above the functor.
    pub doc_comments: bool,
    /// Wrap the artifact in `namespace NS { ... }`.
    pub namespace: Option<String>,
    /// Requested output file; writing is the host's concern.
    pub output_path: Option<PathBuf>,
}

/// One fully validated generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specification {
    /// Dispatch point name; also the self-identifying tag text embedded in
    /// the artifact.
    pub name: String,
    /// Call-site order. At most one pack argument, always last.
    pub arguments: Vec<ArgumentDescriptor>,
    pub dispatch: Option<DispatchDescriptor>,
    /// True iff there is at least one argument and none is generic.
    /// Zero-argument specifications are conventionally not all-concrete.
    pub all_concrete: bool,
    pub presentation: Presentation,
}

impl Specification {
    /// Arguments excluding a trailing pack.
    pub fn fixed_arguments(&self) -> &[ArgumentDescriptor] {
        match self.arguments.last() {
            Some(last) if last.is_pack => &self.arguments[..self.arguments.len() - 1],
            _ => &self.arguments,
        }
    }

    /// The trailing pack argument, if any.
    pub fn pack_argument(&self) -> Option<&ArgumentDescriptor> {
        self.arguments.last().filter(|a| a.is_pack)
    }

    pub fn has_generics(&self) -> bool {
        self.arguments.iter().any(|a| a.is_generic)
    }

    /// Sorted generic parameter declarations: non-pack bases as
    /// `typename X`, then pack bases as `typename... X`.
    pub fn template_parameter_list(&self) -> Vec<String> {
        let mut plain: Vec<&str> = Vec::new();
        let mut packs: Vec<&str> = Vec::new();
        for arg in &self.arguments {
            if !arg.is_generic {
                continue;
            }
            let bucket = if arg.is_pack { &mut packs } else { &mut plain };
            if !bucket.contains(&arg.base_type.as_str()) {
                bucket.push(&arg.base_type);
            }
        }
        plain.sort_unstable();
        packs.sort_unstable();
        plain
            .into_iter()
            .map(|t| format!("typename {t}"))
            .chain(packs.into_iter().map(|t| format!("typename... {t}")))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::descriptor::{Qualifiers, RefCategory};

    fn arg(name: &str, base: &str, generic: bool, pack: bool) -> ArgumentDescriptor {
        ArgumentDescriptor {
            name: name.into(),
            is_generic: generic,
            base_type: base.into(),
            reference: RefCategory::Value,
            is_forwarding: false,
            is_pack: pack,
            qualifiers: Qualifiers::none(),
        }
    }

    #[test]
    fn test_fixed_and_pack_split() {
        let spec = Specification {
            name: "apply".into(),
            arguments: vec![arg("f", "F", true, false), arg("rest", "Args", true, true)],
            dispatch: None,
            all_concrete: false,
            presentation: Presentation::default(),
        };
        assert_eq!(spec.fixed_arguments().len(), 1);
        assert_eq!(spec.pack_argument().unwrap().name, "rest");
    }

    #[test]
    fn test_template_parameter_ordering() {
        let spec = Specification {
            name: "apply".into(),
            arguments: vec![
                arg("u", "U", true, false),
                arg("t", "T", true, false),
                arg("t2", "T", true, false),
                arg("rest", "Args", true, true),
            ],
            dispatch: None,
            all_concrete: false,
            presentation: Presentation::default(),
        };
        assert_eq!(
            spec.template_parameter_list(),
            vec!["typename T", "typename U", "typename... Args"]
        );
    }
}
