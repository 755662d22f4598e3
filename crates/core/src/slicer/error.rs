use thiserror::Error;

use crate::log::LogError;
use crate::model::{InstructionId, PointerLabel, RecordId, ValueId};
use crate::program::ProgramError;

/// Fatal slicing errors. Any of these aborts the run with no partial result.
#[derive(Debug, Error)]
pub enum SliceError {
    #[error("{label} start record {start} is beyond the end of a log of {len} records")]
    StartOutOfRange { label: PointerLabel, start: RecordId, len: u32 },

    #[error("{label} start record {record} is a {kind} record, not top_level_point_to")]
    StartNotTopLevel { label: PointerLabel, record: RecordId, kind: &'static str },

    #[error("{label} start record {record} holds value {value}, which is not pointer-typed")]
    NotAPointer { label: PointerLabel, record: RecordId, value: ValueId },

    #[error("Record {record} instruction {instruction}: expected {expected}, found {found}")]
    UnexpectedInstruction {
        record: RecordId,
        instruction: InstructionId,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{label} reached exception-unwinding return {instruction} at record {record}")]
    UnwindingReturn { label: PointerLabel, record: RecordId, instruction: InstructionId },

    #[error("{label} reached return {instruction} at record {record}, which returns no value")]
    VoidReturn { label: PointerLabel, record: RecordId, instruction: InstructionId },

    #[error("{label} needs arg {arg_no} of call {instruction} at record {record}, has {arg_count}")]
    ArgumentOutOfRange {
        label: PointerLabel,
        record: RecordId,
        instruction: InstructionId,
        arg_no: u32,
        arg_count: usize,
    },

    #[error("{label} matched load {value} at record {record}, which has no load address")]
    MissingLoadSource { label: PointerLabel, record: RecordId, value: ValueId },

    #[error("No records left to process")]
    LogExhausted,

    #[error(transparent)]
    Program(#[from] ProgramError),

    #[error(transparent)]
    Log(#[from] LogError),
}
