// This module implements the sibling parser for the impl-target mini-language used when
// generating third-party extension skeletons, e.g. 'std::vector<$T, $Alloc>' or
// 'Kokkos::View<...>'. The grammar is deliberately stricter than the argument language:
// $Name declares a named generic parameter, $Name... a named generic pack, a bare ...
// an anonymous pack (all anonymous packs share the parameter name P, and P expands as
// P...), and a bare identifier is always a literal fixed segment, never an inferred
// parameter. A named pack without the $ marker (identifier immediately followed by an
// ellipsis) is therefore a format error rather than a guess. The parser walks the target
// text once, collects the ordered de-duplicated template parameter list, and produces the
// specialized target text with every marker resolved ($T -> T, $Rest... -> Rest...,
// ... -> P...).

//! Impl-target mini-language parser.

use crate::core::{GenerateError, GenerateResult};

/// Name reserved for anonymous packs, matching the generated `template<typename... P>`.
const ANONYMOUS_PACK_NAME: &str = "P";

/// One declared template parameter of an impl target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetParam {
    pub name: String,
    pub is_pack: bool,
}

/// Parsed impl-target description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDescriptor {
    /// Ordered, de-duplicated parameters in order of first appearance.
    pub params: Vec<TargetParam>,
    /// Target text with markers resolved, usable as a specialization
    /// argument (e.g. `std::vector<T, Alloc>`).
    pub specialized: String,
}

impl TargetDescriptor {
    pub fn is_templated(&self) -> bool {
        !self.params.is_empty()
    }

    /// `template<typename T, typename... Rest>` header, or empty when the
    /// target is fully concrete.
    pub fn template_header(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }
        let list: Vec<String> = self
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
        format!("template<{}>", list.join(", "))
    }
}

/// Parse an impl-target expression such as `std::vector<$T, $Alloc>`.
pub fn parse_target(target: &str) -> GenerateResult<TargetDescriptor> {
    let target = target.trim();
    if target.is_empty() {
        return Err(GenerateError::MalformedArgumentExpression {
            expression: target.to_string(),
            reason: "empty impl-target".to_string(),
        });
    }

    let mut params: Vec<TargetParam> = Vec::new();
    let mut specialized = String::new();
    let mut push_param = |name: &str, is_pack: bool| {
        if !params.iter().any(|p| p.name == name) {
            params.push(TargetParam { name: name.to_string(), is_pack });
        }
    };

    let bytes = target.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'$' => {
                let start = i + 1;
                let end = identifier_end(target, start);
                if end == start {
                    return Err(GenerateError::MalformedArgumentExpression {
                        expression: target.to_string(),
                        reason: "'$' must be followed by a parameter name".to_string(),
                    });
                }
                let name = &target[start..end];
                if target[end..].starts_with("...") {
                    push_param(name, true);
                    specialized.push_str(name);
                    specialized.push_str("...");
                    i = end + 3;
                } else {
                    push_param(name, false);
                    specialized.push_str(name);
                    i = end;
                }
            }
            b'.' if target[i..].starts_with("...") => {
                push_param(ANONYMOUS_PACK_NAME, true);
                specialized.push_str(ANONYMOUS_PACK_NAME);
                specialized.push_str("...");
                i += 3;
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                let end = identifier_end(target, i);
                let segment = &target[i..end];
                // An unmarked identifier is always literal here; gluing an
                // ellipsis onto one is the classic "forgot the $" mistake.
                if target[end..].starts_with("...") {
                    return Err(GenerateError::AmbiguousPackDeclaration {
                        segment: segment.to_string(),
                    });
                }
                specialized.push_str(segment);
                i = end;
            }
            _ => match target[i..].chars().next() {
                Some(c) => {
                    specialized.push(c);
                    i += c.len_utf8();
                }
                None => break,
            },
        }
    }

    Ok(TargetDescriptor { params, specialized })
}

/// End offset of the identifier (including digits) starting at `start`.
fn identifier_end(text: &str, start: usize) -> usize {
    text[start..]
        .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
        .map(|off| start + off)
        .unwrap_or(text.len())
}
