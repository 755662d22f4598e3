use trace_slicer_core::program::{
    Definition, Instruction, ProgramError, ProgramManifest, ProgramRepr,
};

const MANIFEST_JSON: &str = r#"{
  "values": [
    {"id": 1, "pointer": true, "function": "main", "text": "%p = load i8** %slot", "definition": {"kind": "load"}},
    {"id": 2, "pointer": true, "function": "main", "text": "%q = select i1 %c, i8* %a, i8* %b",
     "definition": {"kind": "select", "if_true": 3, "if_false": 4}},
    {"id": 5, "pointer": true, "text": "@table", "definition": {"kind": "global"}},
    {"id": 6, "pointer": false, "function": "main", "text": "%n = add i32 1, 2", "definition": {"kind": "binary_op"}},
    {"id": 7, "pointer": true, "function": "helper", "text": "i8* %arg", "definition": {"kind": "parameter", "arg_no": 0}}
  ],
  "instructions": [
    {"id": 100, "kind": "store", "value": 3},
    {"id": 101, "kind": "call", "args": [1, 5]},
    {"id": 102, "kind": "return", "value": 1},
    {"id": 103, "kind": "return"},
    {"id": 104, "kind": "resume"},
    {"id": 105, "kind": "fence"}
  ]
}"#;

const MANIFEST_YAML: &str = r#"
values:
  - id: 1
    pointer: true
    function: main
    text: "%m = phi i8* [%a, %bb1], [%b, %bb2]"
    definition:
      kind: merge
      incoming: [3, 4]
instructions:
  - id: 200
    kind: invoke
    args: [1]
"#;

#[test]
fn json_manifest_resolves_definitions_and_instructions() {
    let program = ProgramManifest::from_json_str(MANIFEST_JSON).expect("parse");

    assert_eq!(program.definition(1).unwrap(), Definition::Load);
    assert_eq!(program.definition(2).unwrap(), Definition::Select { if_true: 3, if_false: 4 });
    assert_eq!(program.definition(7).unwrap(), Definition::Parameter { arg_no: 0 });
    assert_eq!(program.definition(6).unwrap(), Definition::Unclassified);
    assert!(program.is_pointer(5).unwrap());
    assert!(!program.is_pointer(6).unwrap());

    assert_eq!(program.instruction(100).unwrap(), Instruction::Store { value: 3 });
    assert_eq!(program.instruction(101).unwrap().call_arguments(), Some(&[1, 5][..]));
    assert_eq!(program.instruction(102).unwrap(), Instruction::Return { value: Some(1) });
    assert_eq!(program.instruction(103).unwrap(), Instruction::Return { value: None });
    assert_eq!(program.instruction(104).unwrap(), Instruction::Resume);
    assert_eq!(program.instruction(105).unwrap(), Instruction::Other);
}

#[test]
fn yaml_manifest_parses_merge_and_invoke() {
    let program = ProgramManifest::from_yaml_str(MANIFEST_YAML).expect("parse");
    assert_eq!(program.definition(1).unwrap(), Definition::Merge { incoming: vec![3, 4] });
    assert_eq!(program.instruction(200).unwrap(), Instruction::Invoke { args: vec![1] });
}

#[test]
fn describe_uses_function_prefix_when_present() {
    let program = ProgramManifest::from_json_str(MANIFEST_JSON).unwrap();
    assert_eq!(program.describe(1), "main:  %p = load i8** %slot");
    assert_eq!(program.describe(5), "@table");
    assert_eq!(program.describe(42), "<unknown value 42>");
}

#[test]
fn unknown_ids_are_errors() {
    let program = ProgramManifest::from_json_str(MANIFEST_JSON).unwrap();
    assert!(matches!(program.definition(42), Err(ProgramError::UnknownValue(42))));
    assert!(matches!(program.instruction(42), Err(ProgramError::UnknownInstruction(42))));
}

#[test]
fn duplicate_ids_are_rejected() {
    let body = r#"{"values": [
        {"id": 1, "definition": {"kind": "global"}},
        {"id": 1, "definition": {"kind": "load"}}
    ]}"#;
    assert!(matches!(ProgramManifest::from_json_str(body), Err(ProgramError::DuplicateValue(1))));
}

#[test]
fn load_picks_format_from_extension() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = dir.path().join("program.yaml");
    std::fs::write(&yaml, MANIFEST_YAML).unwrap();
    let json = dir.path().join("program.json");
    std::fs::write(&json, MANIFEST_JSON).unwrap();

    assert!(ProgramManifest::load(&yaml).unwrap().value(1).is_some());
    assert_eq!(ProgramManifest::load(&json).unwrap().definition(5).unwrap(), Definition::Global);
}
