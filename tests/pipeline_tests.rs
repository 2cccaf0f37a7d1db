// End-to-end pipeline tests: each case drives a raw JSON (or YAML) request through
// normalization, classification, dispatch table construction, and emission, checking the
// documented behavior of the five canonical examples plus the fail-fast error paths.

use cpogen::{
    build_table, classify, generate, normalize, parse_target, DispatchKind, EmitOptions,
    FlagKind, GenerateError, GenerateRequest, Strategy,
};

fn request(json: &str) -> GenerateRequest {
    GenerateRequest::from_json(json).unwrap()
}

#[test]
fn example_scale_generic_classification() {
    // {name:"scale", args:["$T&: target","double: factor"]}
    let spec = normalize(&request(
        r#"{"name": "scale", "args": ["$T&: target", "double: factor"]}"#,
    ))
    .unwrap();
    assert!(!spec.all_concrete);
    assert_eq!(spec.template_parameter_list(), vec!["typename T"]);

    let c = classify(&spec);
    assert_eq!(c.mask(FlagKind::LvalueRefs), 0b01);
    assert_eq!(c.mask(FlagKind::Values), 0b10);
    assert_eq!(c.fixed_arity, 2);
    assert!(!c.is_variadic);

    let artifact = generate(
        &request(r#"{"name": "scale", "args": ["$T&: target", "double: factor"]}"#),
        &EmitOptions::default(),
    )
    .unwrap();
    assert!(artifact.contains("TINCUP_CPO_TAG(\"scale\")"));
    assert!(artifact.contains("template<typename T>"));
}

#[test]
fn example_dump_concrete_strategy() {
    // {name:"dump", args:["int: x","double&: y"]} -> all_concrete
    let spec =
        normalize(&request(r#"{"name": "dump", "args": ["int: x", "double&: y"]}"#)).unwrap();
    assert!(spec.all_concrete);
    assert_eq!(cpogen::select_strategy(&spec, None), Strategy::Concrete);

    let artifact = generate(
        &request(r#"{"name": "dump", "args": ["int: x", "double&: y"]}"#),
        &EmitOptions::default(),
    )
    .unwrap();
    assert!(artifact.contains("// Advisory:"));
    assert!(artifact.contains("TINCUP_CPO_TAG(\"dump\")"));
}

#[test]
fn example_pick_bool_dispatch() {
    // {name:"pick", args:["$T&: data"], bool dispatch on "flag", options a/b}
    let spec = normalize(&request(
        r#"{"name": "pick", "args": ["$T&: data"],
            "runtime_dispatch": {"type": "bool", "dispatch_arg": "flag",
                                 "options": ["a", "b"]}}"#,
    ))
    .unwrap();
    let table = build_table(spec.dispatch.as_ref().unwrap());
    assert_eq!(table.kind, DispatchKind::Boolean);
    assert_eq!(table.entries.len(), 2);
    assert_eq!(table.branch_count(), 2);
    assert_eq!(table.not_found_tag, None);
    assert_eq!(table.resolve_bool(true), 0);
    assert_eq!(table.resolve_bool(false), 1);
}

#[test]
fn example_route_string_dispatch() {
    // {name:"route", args:["$const T&: in"], string dispatch x/y/z}
    let json = r#"{"name": "route", "args": ["$const T&: in"],
                   "runtime_dispatch": {"type": "string", "dispatch_arg": "mode",
                                        "options": ["x", "y", "z"]}}"#;
    let spec = normalize(&request(json)).unwrap();
    let table = build_table(spec.dispatch.as_ref().unwrap());
    assert_eq!(table.branch_count(), 4);
    assert_eq!(table.not_found_tag, Some(3));
    // Input "q" is not declared and resolves to not_found.
    assert_eq!(table.resolve_str("q"), 3);
    assert_eq!(table.resolve_str("x"), 0);

    let artifact = generate(&request(json), &EmitOptions::default()).unwrap();
    assert!(artifact.contains("not_found"));
    assert!(artifact.contains("tincup::StringDispatch<3>"));
}

#[test]
fn example_ambiguous_target_pack() {
    // Container<$T, Rest...> -> AmbiguousPackDeclaration
    let err = parse_target("Container<$T, Rest...>").unwrap_err();
    assert_eq!(err, GenerateError::AmbiguousPackDeclaration { segment: "Rest".into() });
}

#[test]
fn forwarding_requires_generic_type() {
    let spec = normalize(&request(r#"{"name": "f", "args": ["$V&&: a", "std::string&&: b"]}"#))
        .unwrap();
    assert!(spec.arguments[0].is_forwarding && spec.arguments[0].is_generic);
    assert!(!spec.arguments[1].is_forwarding);

    let c = classify(&spec);
    assert_eq!(c.mask(FlagKind::ForwardingRefs), 0b01);
    assert_eq!(c.mask(FlagKind::RvalueRefs), 0b11);
}

#[test]
fn const_lvalue_ref_excludes_rvalue_flags() {
    let spec = normalize(&request(r#"{"name": "f", "args": ["$const T&: obj"]}"#)).unwrap();
    let c = classify(&spec);
    assert_eq!(c.mask(FlagKind::LvalueRefs) & c.mask(FlagKind::ConstQualified), 0b1);
    assert_eq!(c.mask(FlagKind::RvalueRefs), 0);
    assert_eq!(c.mask(FlagKind::ForwardingRefs), 0);
}

#[test]
fn mid_list_pack_is_rejected() {
    let err = normalize(&request(
        r#"{"name": "f", "args": ["$Args&&...: rest", "$T&: tail"]}"#,
    ))
    .unwrap_err();
    assert!(matches!(err, GenerateError::MalformedArgumentExpression { .. }));
}

#[test]
fn failing_request_produces_no_artifact() {
    let err = generate(
        &request(r#"{"name": "f", "args": ["$T&: x", "int: x"]}"#),
        &EmitOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, GenerateError::NameCollision { .. }));
}

#[test]
fn operation_pattern_roundtrip() {
    let artifact = generate(
        &request(r#"{"name": "process", "operation_type": "mutating_binary"}"#),
        &EmitOptions::default(),
    )
    .unwrap();
    assert!(artifact.contains("TINCUP_CPO_TAG(\"process\")"));
    assert!(artifact.contains("T& target"));
    assert!(artifact.contains("const U& source"));
    assert!(artifact.contains("template<typename T, typename U>"));
}

#[test]
fn yaml_request_matches_json_request() {
    let json = generate(
        &request(r#"{"name": "scale", "args": ["$T&: target", "double: factor"]}"#),
        &EmitOptions::default(),
    )
    .unwrap();
    let yaml = generate(
        &GenerateRequest::from_yaml(
            "name: scale\nargs:\n  - '$T&: target'\n  - 'double: factor'\n",
        )
        .unwrap(),
        &EmitOptions::default(),
    )
    .unwrap();
    assert_eq!(json, yaml);
}

#[test]
fn zero_argument_specification_is_valid() {
    let artifact =
        generate(&request(r#"{"name": "tick", "args": []}"#), &EmitOptions::default()).unwrap();
    assert!(artifact.contains("TINCUP_CPO_TAG(\"tick\")"));
    assert!(artifact.contains("operator()() const"));
}
