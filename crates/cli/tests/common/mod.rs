#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Log where both pointers load from the same slot that one store filled.
///
/// Record ids: 0 decl, 1 `@buf` points-to, 2 store of `@buf` into 0x100,
/// 3 decl, 4 `%q` load, 5 `%p` load.
pub const CONVERGING_LOG: &str = r#"{"kind":"addr_taken_decl"}
{"kind":"top_level_point_to","pointer_value":3,"pointee":4096}
{"kind":"addr_taken_point_to","instruction":100,"pointer_address":256}
{"kind":"addr_taken_decl"}
{"kind":"top_level_point_to","pointer_value":2,"pointee":4096,"loaded_from":256}
{"kind":"top_level_point_to","pointer_value":1,"pointee":4096,"loaded_from":256}
"#;

pub const PROGRAM: &str = r#"{
  "values": [
    {"id": 1, "pointer": true, "function": "main", "text": "%p = load i8** @slot", "definition": {"kind": "load"}},
    {"id": 2, "pointer": true, "function": "main", "text": "%q = load i8** @slot", "definition": {"kind": "load"}},
    {"id": 3, "pointer": true, "text": "@buf = global [16 x i8]", "definition": {"kind": "global"}}
  ],
  "instructions": [
    {"id": 100, "kind": "store", "value": 3}
  ]
}"#;

pub struct Fixture {
    pub dir: tempfile::TempDir,
    pub log: PathBuf,
    pub program: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let log = dir.path().join("trace.jsonl");
        let program = dir.path().join("program.json");
        fs::write(&log, CONVERGING_LOG).expect("write log");
        fs::write(&program, PROGRAM).expect("write program");
        Self { dir, log, program }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}
