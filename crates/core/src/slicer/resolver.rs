use crate::model::{Address, RecordId};
use crate::program::{Definition, ProgramRepr};

use super::error::SliceError;
use super::state::{Action, TraceState, Termination};

/// Decide what `state` looks for next, given the value it just adopted at `record`.
///
/// `pointee` and `loaded_from` come from the top-level points-to record that
/// produced the match.
pub(super) fn track_source_pointer<P: ProgramRepr + ?Sized>(
    program: &P,
    state: &mut TraceState,
    record: RecordId,
    pointee: Address,
    loaded_from: Option<Address>,
) -> Result<(), SliceError> {
    let value = state.value_id;
    match program.definition(value)? {
        Definition::Load => {
            let Some(from) = loaded_from else {
                return Err(SliceError::MissingLoadSource { label: state.label, record, value });
            };
            state.address = from;
            state.action = Action::AddrTakenPointTo;
        }
        Definition::IndexedAccess { base } => state.value_id = base,
        Definition::Reinterpret { operand } => state.value_id = operand,
        Definition::Select { if_true, if_false } => {
            state.candidates.insert(if_true);
            state.candidates.insert(if_false);
            state.address = pointee;
        }
        Definition::Merge { incoming } => {
            state.candidates.extend(incoming);
            state.address = pointee;
        }
        Definition::Parameter { arg_no } => {
            state.action = Action::CallInstruction;
            state.arg_no = arg_no;
        }
        Definition::CallResult => state.action = Action::ReturnInstruction,
        Definition::StackAllocation | Definition::Global => {
            state.finish(Termination::RootStorage { value });
        }
        Definition::Unclassified => {
            tracing::warn!(
                label = %state.label,
                record,
                value,
                description = %program.describe(value),
                "unknown defining construct; ending slice"
            );
            state.finish(Termination::Unclassified { value });
        }
    }
    Ok(())
}
