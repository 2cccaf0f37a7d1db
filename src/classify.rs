// This module derives per-argument and aggregate classification metadata from a validated
// specification. Each fixed-position argument gets an ArgFlags record of six booleans with
// exactly one of value/pointer/lvalue_ref/rvalue_ref set: pointer wins whenever the written
// concrete type text ends in '*', independent of the declared reference category, and
// otherwise the reference category decides. forwarding_ref and const_qualified ride along
// as independent flags; for pointer types the const flag describes the pointee ("deep"
// const). A trailing pack does not occupy a fixed bit: its category is recorded once as a
// template plus a replication rule, since pack arity is only known where the generated
// code is ultimately instantiated. Bit-per-index u64 masks are deliberately not stored on
// the model; they are packed on demand at emission time so the model stays free of the
// artifact's width constraints. classify() is a total function over validated
// specifications and cannot fail.
//
// Known, inherited limitation: pointer detection and deep-const evaluation assume a
// single indirection level; T** classifies exactly like T*.

//! Classification engine.

use crate::core::{ArgumentDescriptor, RefCategory, Specification};

/// Per-argument category flags. Exactly one of `value`, `pointer`,
/// `lvalue_ref`, `rvalue_ref` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArgFlags {
    pub value: bool,
    pub pointer: bool,
    pub lvalue_ref: bool,
    pub rvalue_ref: bool,
    pub forwarding_ref: bool,
    pub const_qualified: bool,
}

impl ArgFlags {
    fn of(arg: &ArgumentDescriptor) -> Self {
        let pointer = arg.is_pointer();
        Self {
            value: !pointer && arg.reference == RefCategory::Value,
            pointer,
            lvalue_ref: !pointer && arg.reference == RefCategory::LvalueRef,
            rvalue_ref: !pointer && arg.reference == RefCategory::RvalueRef,
            forwarding_ref: arg.is_forwarding,
            const_qualified: arg.qualifiers.is_const,
        }
    }
}

/// Derived classification for one specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Flags for fixed-position arguments, index = call-site position.
    pub flags: Vec<ArgFlags>,
    /// Category template of a trailing pack, replicated per element at
    /// consumption time rather than occupying one fixed bit.
    pub pack_template: Option<ArgFlags>,
    /// Number of non-pack arguments.
    pub fixed_arity: usize,
    pub is_variadic: bool,
    pub all_concrete: bool,
}

/// Selector for one of the six per-argument flag masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    Values,
    Pointers,
    LvalueRefs,
    RvalueRefs,
    ForwardingRefs,
    ConstQualified,
}

impl FlagKind {
    pub const ALL: [FlagKind; 6] = [
        FlagKind::Values,
        FlagKind::Pointers,
        FlagKind::LvalueRefs,
        FlagKind::RvalueRefs,
        FlagKind::ForwardingRefs,
        FlagKind::ConstQualified,
    ];

    /// Member name in the emitted introspection block.
    pub fn mask_name(self) -> &'static str {
        match self {
            FlagKind::Values => "values_mask",
            FlagKind::Pointers => "pointers_mask",
            FlagKind::LvalueRefs => "lvalue_refs_mask",
            FlagKind::RvalueRefs => "rvalue_refs_mask",
            FlagKind::ForwardingRefs => "forwarding_refs_mask",
            FlagKind::ConstQualified => "const_qualified_mask",
        }
    }

    fn get(self, flags: &ArgFlags) -> bool {
        match self {
            FlagKind::Values => flags.value,
            FlagKind::Pointers => flags.pointer,
            FlagKind::LvalueRefs => flags.lvalue_ref,
            FlagKind::RvalueRefs => flags.rvalue_ref,
            FlagKind::ForwardingRefs => flags.forwarding_ref,
            FlagKind::ConstQualified => flags.const_qualified,
        }
    }
}

impl Classification {
    /// Bit-per-fixed-index mask for one flag kind, packed on demand.
    pub fn mask(&self, kind: FlagKind) -> u64 {
        self.flags
            .iter()
            .enumerate()
            .filter(|(_, f)| kind.get(f))
            .fold(0u64, |m, (i, _)| m | (1u64 << i))
    }

    /// Whether the pack template sets the given flag.
    pub fn pack_has(&self, kind: FlagKind) -> bool {
        self.pack_template.map(|t| kind.get(&t)).unwrap_or(false)
    }

    /// Replicate the pack category template across `count` consumed
    /// elements. Empty when the specification has no pack.
    pub fn replicate_pack(&self, count: usize) -> impl Iterator<Item = ArgFlags> + '_ {
        self.pack_template.into_iter().cycle().take(if self.pack_template.is_some() {
            count
        } else {
            0
        })
    }
}

/// Derive classification metadata. Total over validated specifications.
pub fn classify(spec: &Specification) -> Classification {
    let flags: Vec<ArgFlags> = spec.fixed_arguments().iter().map(ArgFlags::of).collect();
    let pack_template = spec.pack_argument().map(ArgFlags::of);
    let fixed_arity = flags.len();
    log::trace!(
        "classified '{}': fixed_arity={}, variadic={}",
        spec.name,
        fixed_arity,
        pack_template.is_some()
    );
    Classification {
        flags,
        pack_template,
        fixed_arity,
        is_variadic: pack_template.is_some(),
        all_concrete: spec.all_concrete,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;
    use crate::request::GenerateRequest;

    fn classify_args(args: &[&str]) -> Classification {
        let json = format!(
            r#"{{"name": "probe", "args": [{}]}}"#,
            args.iter().map(|a| format!("\"{a}\"")).collect::<Vec<_>>().join(", ")
        );
        let spec = normalize(&GenerateRequest::from_json(&json).unwrap()).unwrap();
        classify(&spec)
    }

    #[test]
    fn test_scale_example_masks() {
        // {"name":"scale","args":["$T&: target","double: factor"]}
        let c = classify_args(&["$T&: target", "double: factor"]);
        assert_eq!(c.mask(FlagKind::LvalueRefs), 0b01);
        assert_eq!(c.mask(FlagKind::Values), 0b10);
        assert_eq!(c.fixed_arity, 2);
        assert!(!c.is_variadic);
        assert!(!c.all_concrete);
    }

    #[test]
    fn test_exactly_one_category_per_argument() {
        let c = classify_args(&["$T&: a", "int*: b", "std::string&&: c", "double: d"]);
        for flags in &c.flags {
            let categories = [flags.value, flags.pointer, flags.lvalue_ref, flags.rvalue_ref]
                .iter()
                .filter(|b| **b)
                .count();
            assert_eq!(categories, 1);
        }
    }

    #[test]
    fn test_const_lvalue_ref_properties() {
        let c = classify_args(&["$const T&: obj"]);
        let f = c.flags[0];
        assert!(f.lvalue_ref && f.const_qualified);
        assert!(!f.rvalue_ref && !f.forwarding_ref);
    }

    #[test]
    fn test_forwarding_implies_generic() {
        let generic = classify_args(&["$V&&: y"]);
        assert!(generic.flags[0].forwarding_ref);
        assert!(generic.flags[0].rvalue_ref);

        // The same token sequence without the generic marker stays a plain
        // rvalue reference.
        let concrete = classify_args(&["std::string&&: y"]);
        assert!(!concrete.flags[0].forwarding_ref);
        assert!(concrete.flags[0].rvalue_ref);
    }

    #[test]
    fn test_pointer_beats_reference_category() {
        let c = classify_args(&["int*&: p"]);
        let f = c.flags[0];
        assert!(f.pointer);
        assert!(!f.lvalue_ref && !f.value && !f.rvalue_ref);
    }

    #[test]
    fn test_deep_const_pointer() {
        let c = classify_args(&["const char*: msg"]);
        let f = c.flags[0];
        assert!(f.pointer && f.const_qualified);
    }

    #[test]
    fn test_pack_is_template_not_fixed_bit() {
        let c = classify_args(&["$T&: first", "$Args&&...: rest"]);
        assert_eq!(c.fixed_arity, 1);
        assert!(c.is_variadic);
        assert_eq!(c.flags.len(), 1);
        let t = c.pack_template.unwrap();
        assert!(t.rvalue_ref && t.forwarding_ref);
        assert!(c.pack_has(FlagKind::ForwardingRefs));
        // Replication yields one record per consumed element.
        let replicated: Vec<_> = c.replicate_pack(3).collect();
        assert_eq!(replicated.len(), 3);
        assert!(replicated.iter().all(|f| f.forwarding_ref));
    }

    #[test]
    fn test_no_pack_replicates_nothing() {
        let c = classify_args(&["int: x"]);
        assert_eq!(c.replicate_pack(4).count(), 0);
    }

    #[test]
    fn test_masks_cover_fixed_positions_only() {
        let c = classify_args(&["const int&: a", "$Args&&...: rest"]);
        assert_eq!(c.mask(FlagKind::LvalueRefs), 0b1);
        assert_eq!(c.mask(FlagKind::ForwardingRefs), 0);
        assert_eq!(c.mask(FlagKind::ConstQualified), 0b1);
    }
}
