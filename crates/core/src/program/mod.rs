//! Program representation: how the slicer learns what defined a value.
//!
//! The slicer depends only on the `ProgramRepr` trait. `ProgramManifest` is a
//! serde-friendly implementation loaded from JSON or YAML, produced by
//! whatever tool assigned stable ids to the instrumented program.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{InstructionId, ValueId};

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("Unknown value id {0}")]
    UnknownValue(ValueId),
    #[error("Unknown instruction id {0}")]
    UnknownInstruction(InstructionId),
    #[error("Duplicate value id {0} in program manifest")]
    DuplicateValue(ValueId),
    #[error("Duplicate instruction id {0} in program manifest")]
    DuplicateInstruction(InstructionId),
    #[error("Failed to read program manifest at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse program manifest JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to parse program manifest YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// The construct that defines a value, with its relevant operands resolved to ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Definition {
    /// Memory load.
    Load,
    /// Field or offset access on a single base pointer.
    IndexedAccess { base: ValueId },
    /// Pointer type reinterpretation of a single operand.
    Reinterpret { operand: ValueId },
    /// Two-way conditional select.
    Select { if_true: ValueId, if_false: ValueId },
    /// Control-flow merge of several incoming values.
    Merge { incoming: Vec<ValueId> },
    /// Formal parameter at ordinal `arg_no`.
    Parameter { arg_no: u32 },
    /// Result of a call or invoke.
    CallResult,
    /// Stack allocation.
    StackAllocation,
    /// Global variable or function.
    Global,
    /// Anything the slicer has no rule for.
    #[serde(other)]
    Unclassified,
}

/// Instructions referenced by id from store, call, and return records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Instruction {
    Store { value: ValueId },
    Call { args: Vec<ValueId> },
    Invoke { args: Vec<ValueId> },
    Return {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<ValueId>,
    },
    /// Exception-unwinding return.
    Resume,
    #[serde(other)]
    Other,
}

impl Instruction {
    /// Actual arguments if this is a call site.
    pub fn call_arguments(&self) -> Option<&[ValueId]> {
        match self {
            Instruction::Call { args } | Instruction::Invoke { args } => Some(args),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Instruction::Store { .. } => "store",
            Instruction::Call { .. } => "call",
            Instruction::Invoke { .. } => "invoke",
            Instruction::Return { .. } => "return",
            Instruction::Resume => "resume",
            Instruction::Other => "other",
        }
    }
}

/// Read-only view of the instrumented program.
pub trait ProgramRepr {
    /// Defining construct of `value`.
    fn definition(&self, value: ValueId) -> Result<Definition, ProgramError>;

    /// Whether `value` is pointer-typed.
    fn is_pointer(&self, value: ValueId) -> Result<bool, ProgramError>;

    /// Instruction with id `id`.
    fn instruction(&self, id: InstructionId) -> Result<Instruction, ProgramError>;

    /// Human-readable description (`function:  text`).
    fn describe(&self, value: ValueId) -> String;
}

/// Description of one program value in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueInfo {
    pub id: ValueId,
    #[serde(default)]
    pub pointer: bool,
    /// Enclosing function, absent for globals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default)]
    pub text: String,
    pub definition: Definition,
}

/// Description of one instruction in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionInfo {
    pub id: InstructionId,
    #[serde(flatten)]
    pub instruction: Instruction,
}

/// Serializable program description, as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestFile {
    #[serde(default)]
    pub values: Vec<ValueInfo>,
    #[serde(default)]
    pub instructions: Vec<InstructionInfo>,
}

/// Indexed program manifest implementing `ProgramRepr`.
#[derive(Debug, Clone, Default)]
pub struct ProgramManifest {
    values: HashMap<ValueId, ValueInfo>,
    instructions: HashMap<InstructionId, Instruction>,
}

impl ProgramManifest {
    pub fn from_file(file: ManifestFile) -> Result<Self, ProgramError> {
        let mut values = HashMap::with_capacity(file.values.len());
        for info in file.values {
            let id = info.id;
            if values.insert(id, info).is_some() {
                return Err(ProgramError::DuplicateValue(id));
            }
        }
        let mut instructions = HashMap::with_capacity(file.instructions.len());
        for info in file.instructions {
            if instructions.insert(info.id, info.instruction).is_some() {
                return Err(ProgramError::DuplicateInstruction(info.id));
            }
        }
        Ok(Self { values, instructions })
    }

    pub fn from_json_str(body: &str) -> Result<Self, ProgramError> {
        Self::from_file(serde_json::from_str(body)?)
    }

    pub fn from_yaml_str(body: &str) -> Result<Self, ProgramError> {
        Self::from_file(serde_yaml::from_str(body)?)
    }

    /// Load a manifest, picking YAML for `.yaml`/`.yml` files and JSON otherwise.
    pub fn load(path: &Path) -> Result<Self, ProgramError> {
        let body = fs::read_to_string(path)
            .map_err(|source| ProgramError::Io { path: path.to_path_buf(), source })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&body),
            _ => Self::from_json_str(&body),
        }
    }

    pub fn value(&self, id: ValueId) -> Option<&ValueInfo> {
        self.values.get(&id)
    }

    fn value_info(&self, id: ValueId) -> Result<&ValueInfo, ProgramError> {
        self.values.get(&id).ok_or(ProgramError::UnknownValue(id))
    }
}

impl ProgramRepr for ProgramManifest {
    fn definition(&self, value: ValueId) -> Result<Definition, ProgramError> {
        Ok(self.value_info(value)?.definition.clone())
    }

    fn is_pointer(&self, value: ValueId) -> Result<bool, ProgramError> {
        Ok(self.value_info(value)?.pointer)
    }

    fn instruction(&self, id: InstructionId) -> Result<Instruction, ProgramError> {
        self.instructions.get(&id).cloned().ok_or(ProgramError::UnknownInstruction(id))
    }

    fn describe(&self, value: ValueId) -> String {
        match self.values.get(&value) {
            Some(ValueInfo { function: Some(func), text, .. }) => format!("{func}:  {text}"),
            Some(ValueInfo { text, .. }) => text.clone(),
            None => format!("<unknown value {value}>"),
        }
    }
}
