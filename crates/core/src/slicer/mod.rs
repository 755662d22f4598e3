//! Backward slicing of two tracked pointers through an execution log.
//!
//! The slicer walks the log from the last record to the first. Each tracked
//! pointer has a `TraceState` saying which record kind it waits for next:
//! - `TopLevelPointTo`: a points-to event for the value being chased.
//! - `AddrTakenPointTo`: a store to the address the value was loaded from.
//! - `CallInstruction`: the call site that passed the parameter being chased.
//! - `ReturnInstruction`: the return that produced the call result being chased.
//!
//! A chain ends at a stack allocation or global, at an unclassified
//! definition, at an uninstrumented callee, or when both chains match the
//! same record.

mod error;
mod resolver;
mod state;
mod tracker;

pub use error::SliceError;
pub use state::{Action, Termination, TraceState};
pub use tracker::{SliceOutcome, TraceSlicer};

use crate::log::LogSource;
use crate::model::RecordId;
use crate::program::ProgramRepr;

/// Slice both pointers from `starts` back through the whole of `log`.
pub fn slice<L, P>(log: &L, program: &P, starts: [RecordId; 2]) -> Result<SliceOutcome, SliceError>
where
    L: LogSource + ?Sized,
    P: ProgramRepr + ?Sized,
{
    let mut slicer = TraceSlicer::new(program, log.len(), starts)?;
    slicer.run(log)?;
    Ok(slicer.into_outcome())
}
