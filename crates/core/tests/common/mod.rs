#![allow(dead_code)]

use trace_slicer_core::log::RecordLog;
use trace_slicer_core::model::{Address, InstructionId, LogRecord, ValueId};
use trace_slicer_core::program::{
    Definition, Instruction, InstructionInfo, ManifestFile, ProgramManifest, ValueInfo,
};

/// Small builder for in-memory program manifests.
#[derive(Default)]
pub struct ProgramBuilder {
    file: ManifestFile,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(mut self, id: ValueId, definition: Definition) -> Self {
        self.file.values.push(ValueInfo {
            id,
            pointer: true,
            function: Some("main".into()),
            text: format!("%v{id}"),
            definition,
        });
        self
    }

    pub fn scalar(mut self, id: ValueId) -> Self {
        self.file.values.push(ValueInfo {
            id,
            pointer: false,
            function: Some("main".into()),
            text: format!("%n{id}"),
            definition: Definition::Unclassified,
        });
        self
    }

    pub fn instruction(mut self, id: InstructionId, instruction: Instruction) -> Self {
        self.file.instructions.push(InstructionInfo { id, instruction });
        self
    }

    pub fn build(self) -> ProgramManifest {
        ProgramManifest::from_file(self.file).expect("valid manifest")
    }
}

pub fn log(records: Vec<LogRecord>) -> RecordLog {
    RecordLog::new(records).expect("log")
}

pub fn tlpt(pointer_value: ValueId, pointee: Address) -> LogRecord {
    LogRecord::TopLevelPointTo { pointer_value, pointee, loaded_from: None }
}

pub fn tlpt_loaded(pointer_value: ValueId, pointee: Address, loaded_from: Address) -> LogRecord {
    LogRecord::TopLevelPointTo { pointer_value, pointee, loaded_from: Some(loaded_from) }
}

pub fn store(instruction: InstructionId, pointer_address: Address) -> LogRecord {
    LogRecord::AddrTakenPointTo { instruction, pointer_address }
}

pub fn call(instruction: InstructionId) -> LogRecord {
    LogRecord::CallInstruction { instruction }
}

pub fn ret(instruction: InstructionId) -> LogRecord {
    LogRecord::ReturnInstruction { instruction }
}

pub fn decl() -> LogRecord {
    LogRecord::AddrTakenDecl
}

/// A log of `len` declaration records with the given positions overwritten.
pub fn sparse_log(len: usize, at: Vec<(usize, LogRecord)>) -> RecordLog {
    let mut records = vec![decl(); len];
    for (idx, record) in at {
        records[idx] = record;
    }
    log(records)
}
