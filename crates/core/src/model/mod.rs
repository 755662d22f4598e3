//! Core data model: identifiers, log records, pointer labels, and trace entries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of a record in the log (0-based, file order).
pub type RecordId = u32;

/// Stable identifier of a program value.
pub type ValueId = u32;

/// Stable identifier of a program instruction.
pub type InstructionId = u32;

/// Runtime memory address.
pub type Address = u64;

/// One entry of a recorded execution log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogRecord {
    /// Declaration of an address-taken location. Carries nothing the slicer uses.
    AddrTakenDecl,
    /// Value `pointer_value` now points to `pointee`.
    ///
    /// `loaded_from` is set when the value was produced by a memory load.
    TopLevelPointTo {
        pointer_value: ValueId,
        pointee: Address,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        loaded_from: Option<Address>,
    },
    /// Store instruction `instruction` wrote a pointer into `pointer_address`.
    AddrTakenPointTo { instruction: InstructionId, pointer_address: Address },
    /// Call or invoke site `instruction` was entered.
    CallInstruction { instruction: InstructionId },
    /// Return point `instruction` was reached.
    ReturnInstruction { instruction: InstructionId },
}

impl LogRecord {
    /// Short snake_case name of the record kind, as used in the log format.
    pub fn kind_name(&self) -> &'static str {
        match self {
            LogRecord::AddrTakenDecl => "addr_taken_decl",
            LogRecord::TopLevelPointTo { .. } => "top_level_point_to",
            LogRecord::AddrTakenPointTo { .. } => "addr_taken_point_to",
            LogRecord::CallInstruction { .. } => "call_instruction",
            LogRecord::ReturnInstruction { .. } => "return_instruction",
        }
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogRecord::AddrTakenDecl => write!(f, "{}", self.kind_name()),
            LogRecord::TopLevelPointTo { pointer_value, pointee, loaded_from } => {
                write!(f, "{}\tvalue={} pointee=0x{:x}", self.kind_name(), pointer_value, pointee)?;
                if let Some(from) = loaded_from {
                    write!(f, " loaded_from=0x{from:x}")?;
                }
                Ok(())
            }
            LogRecord::AddrTakenPointTo { instruction, pointer_address } => write!(
                f,
                "{}\tinstruction={} address=0x{:x}",
                self.kind_name(),
                instruction,
                pointer_address
            ),
            LogRecord::CallInstruction { instruction }
            | LogRecord::ReturnInstruction { instruction } => {
                write!(f, "{}\tinstruction={}", self.kind_name(), instruction)
            }
        }
    }
}

/// Which of the two tracked pointers a state or trace entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerLabel {
    First,
    Second,
}

impl PointerLabel {
    pub const BOTH: [PointerLabel; 2] = [PointerLabel::First, PointerLabel::Second];

    pub fn index(self) -> usize {
        match self {
            PointerLabel::First => 0,
            PointerLabel::Second => 1,
        }
    }
}

impl fmt::Display for PointerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ptr{}", self.index() + 1)
    }
}

/// A single match in a pointer's slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEntry {
    pub record: RecordId,
    pub value: ValueId,
}

impl TraceEntry {
    pub fn new(record: RecordId, value: ValueId) -> Self {
        Self { record, value }
    }
}
