// This module builds the deterministic runtime-to-compile-time dispatch table from a
// validated dispatch descriptor. Boolean dispatch produces exactly two entries with tags
// 0 and 1 resolved directly from the runtime value, no scan and no not-found branch; the
// first declared label is the one selected by `true`, matching the branch order of the
// generated code. String dispatch keeps the entries in declaration order (tag equals
// declaration index), resolves by a linear left-to-right scan where the first match wins,
// and routes every unmatched input to a synthesized not-found tag that never appears
// among the declared options. Linear scan with an explicit terminal was chosen for
// determinism under overlapping labels; option counts stay in the single digits, so scan
// cost is irrelevant while the emitted branching stays easy to read and diagnose.
// Duplicate labels were already rejected by the normalizer, so construction is total.

//! Dispatch table builder.

use crate::core::{DispatchDescriptor, DispatchKind};

/// One `(label, tag)` table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchEntry {
    pub label: String,
    pub tag: u32,
}

/// Ordered dispatch table for one specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchTable {
    pub kind: DispatchKind,
    /// Name of the implicit runtime selector parameter.
    pub argument: String,
    pub entries: Vec<DispatchEntry>,
    /// Terminal branch for unmatched string input. Always `None` for
    /// Boolean dispatch.
    pub not_found_tag: Option<u32>,
}

impl DispatchTable {
    /// Total branch count of the generated artifact, including a string
    /// table's not-found terminal.
    pub fn branch_count(&self) -> usize {
        self.entries.len() + usize::from(self.not_found_tag.is_some())
    }

    /// Resolve a Boolean selector directly, without scanning: `true`
    /// selects the first declared label (tag 0), `false` the second.
    pub fn resolve_bool(&self, value: bool) -> u32 {
        debug_assert_eq!(self.kind, DispatchKind::Boolean);
        if value {
            0
        } else {
            1
        }
    }

    /// Resolve a string selector by linear left-to-right scan; the first
    /// match wins, anything else reaches the not-found tag.
    pub fn resolve_str(&self, value: &str) -> u32 {
        debug_assert_eq!(self.kind, DispatchKind::String);
        self.entries
            .iter()
            .find(|e| e.label == value)
            .map(|e| e.tag)
            .or(self.not_found_tag)
            .unwrap_or(0)
    }
}

/// Build the table for a validated descriptor. Total function.
pub fn build_table(descriptor: &DispatchDescriptor) -> DispatchTable {
    let entries: Vec<DispatchEntry> = descriptor
        .options
        .iter()
        .enumerate()
        .map(|(i, label)| DispatchEntry { label: label.clone(), tag: i as u32 })
        .collect();
    let not_found_tag = match descriptor.kind {
        DispatchKind::Boolean => None,
        DispatchKind::String => Some(entries.len() as u32),
    };
    log::trace!(
        "dispatch table for '{}': {} declared entries, not_found={:?}",
        descriptor.argument,
        entries.len(),
        not_found_tag
    );
    DispatchTable { kind: descriptor.kind, argument: descriptor.argument.clone(), entries, not_found_tag }
}
