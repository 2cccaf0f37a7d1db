// This module defines the per-argument data model produced by the argument mini-language
// parser. ArgumentDescriptor records everything later stages need about one call-site
// argument: the parameter name, whether the type is a generic parameter or literal concrete
// text, the base type with qualifiers and reference markers stripped, the reference category,
// whether a generic rvalue reference is a forwarding reference, pack-ness, and cv qualifiers.
// The descriptor also knows how to render itself back into C++ fragments (parameter
// declaration, call-site expression, concept argument type) so that every emitter strategy
// reconstructs signatures from one place. Descriptors are immutable once parsed; the
// invariant is_forwarding => is_generic && reference == RvalueRef is established by the
// parser and preserved here.

//! Argument descriptor model.

use std::fmt;

/// Reference category of a declared argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefCategory {
    /// Passed by value.
    Value,
    /// Trailing `&`.
    LvalueRef,
    /// Trailing `&&` (forwarding when the type is generic).
    RvalueRef,
}

/// cv-qualifiers stripped from the front of a type expression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Qualifiers {
    pub is_const: bool,
    pub is_volatile: bool,
}

impl Qualifiers {
    pub fn none() -> Self {
        Self::default()
    }
}

/// One parsed "type-expression : parameter-name" entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentDescriptor {
    /// Parameter name, unique within a specification.
    pub name: String,
    /// True when the type expression carried the `$` generic marker.
    pub is_generic: bool,
    /// Generic parameter id (e.g. `T`) or literal concrete type text
    /// (e.g. `std::vector<int, Alloc>`), qualifiers and markers stripped.
    pub base_type: String,
    pub reference: RefCategory,
    /// Trailing `&&` on a generic type preserves the caller's value
    /// category; on a concrete type it is a plain rvalue reference.
    pub is_forwarding: bool,
    /// Trailing `...`.
    pub is_pack: bool,
    pub qualifiers: Qualifiers,
}

impl ArgumentDescriptor {
    /// Declared type text without the pack ellipsis, e.g. `const T&`.
    ///
    /// Forwarding references render as `Base&&` with qualifiers dropped,
    /// matching how the call site reconstructs them via `std::forward`.
    pub fn full_type(&self) -> String {
        if self.is_forwarding {
            return format!("{}&&", self.base_type);
        }
        let mut out = String::new();
        if self.qualifiers.is_const {
            out.push_str("const ");
        }
        if self.qualifiers.is_volatile {
            out.push_str("volatile ");
        }
        out.push_str(&self.base_type);
        match self.reference {
            RefCategory::Value => {}
            RefCategory::LvalueRef => out.push('&'),
            RefCategory::RvalueRef => out.push_str("&&"),
        }
        out
    }

    /// Parameter declaration fragment, e.g. `const T& source` or `Args&&... rest`.
    pub fn parameter_text(&self) -> String {
        if self.is_pack {
            format!("{}... {}", self.full_type(), self.name)
        } else {
            format!("{} {}", self.full_type(), self.name)
        }
    }

    /// Call-site expression forwarding this argument into `tag_invoke`.
    pub fn forward_text(&self) -> String {
        if self.is_forwarding {
            let expand = if self.is_pack { "..." } else { "" };
            format!("std::forward<{}>({}){}", self.base_type, self.name, expand)
        } else if self.is_pack {
            format!("{}...", self.name)
        } else {
            self.name.clone()
        }
    }

    /// Type used in concept argument lists: the bare base for forwarding
    /// references (the deduced parameter), the full declared type otherwise.
    pub fn concept_type(&self) -> String {
        let ty = if self.is_forwarding {
            self.base_type.clone()
        } else {
            self.full_type()
        };
        if self.is_pack {
            format!("{}...", ty)
        } else {
            ty
        }
    }

    /// Concrete pointer types are recognized by their trailing `*`.
    ///
    /// Only the written type text is consulted; reference category does not
    /// matter, so `int*&` is still a pointer argument. Multi-level pointers
    /// are not distinguished from single-level ones.
    pub fn is_pointer(&self) -> bool {
        !self.is_generic && self.base_type.trim_end().ends_with('*')
    }
}

impl fmt::Display for ArgumentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.parameter_text())
    }
}

/// True for a C++-style identifier: `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_valid_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
