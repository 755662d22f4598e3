use crate::log::LogSource;
use crate::model::{Address, InstructionId, LogRecord, PointerLabel, RecordId, ValueId};
use crate::program::{Instruction, ProgramRepr};
use crate::trace::{merge, MergeMode, MergedEntry};

use super::error::SliceError;
use super::resolver::track_source_pointer;
use super::state::{Action, Termination, TraceState};

/// Run context for one slicing pass: both tracking states and the backward record counter.
///
/// The counter starts at the log length. Each `step` decrements it once and
/// processes the record whose id equals the new counter value.
pub struct TraceSlicer<'p, P: ProgramRepr + ?Sized> {
    program: &'p P,
    current: RecordId,
    states: [TraceState; 2],
}

/// Final state of a slicing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceOutcome {
    pub states: [TraceState; 2],
    /// Id of the last record processed, or the log length if nothing was processed.
    pub stopped_at: RecordId,
}

impl SliceOutcome {
    pub fn state(&self, label: PointerLabel) -> &TraceState {
        &self.states[label.index()]
    }

    pub fn merged(&self, mode: MergeMode) -> Vec<MergedEntry> {
        merge(self.states[0].trace(), self.states[1].trace(), mode)
    }

    pub fn converged(&self) -> bool {
        self.states
            .iter()
            .any(|s| matches!(s.termination(), Some(Termination::Converged { .. })))
    }
}

impl<'p, P: ProgramRepr + ?Sized> TraceSlicer<'p, P> {
    /// Prepare a run over a log of `log_len` records, tracking pointers that start at `starts`.
    pub fn new(program: &'p P, log_len: u32, starts: [RecordId; 2]) -> Result<Self, SliceError> {
        for label in PointerLabel::BOTH {
            let start = starts[label.index()];
            if start >= log_len {
                return Err(SliceError::StartOutOfRange { label, start, len: log_len });
            }
        }
        Ok(Self {
            program,
            current: log_len,
            states: [
                TraceState::new(PointerLabel::First, starts[0]),
                TraceState::new(PointerLabel::Second, starts[1]),
            ],
        })
    }

    pub fn current_record_id(&self) -> RecordId {
        self.current
    }

    pub fn state(&self, label: PointerLabel) -> &TraceState {
        &self.states[label.index()]
    }

    pub fn all_ended(&self) -> bool {
        self.states.iter().all(TraceState::is_ended)
    }

    /// Walk the log backward until it is exhausted or both pointers have ended.
    pub fn run<L: LogSource + ?Sized>(&mut self, log: &L) -> Result<(), SliceError> {
        tracing::debug!(
            records = self.current,
            ptr1_start = self.states[0].start,
            ptr2_start = self.states[1].start,
            "starting backward slice"
        );
        while self.current > 0 && !self.all_ended() {
            let record = log.record(self.current - 1)?;
            self.step(&record)?;
        }
        tracing::debug!(
            stopped_at = self.current,
            ptr1_matches = self.states[0].trace.len(),
            ptr2_matches = self.states[1].trace.len(),
            "backward slice finished"
        );
        Ok(())
    }

    /// Process the record at the next lower position.
    pub fn step(&mut self, record: &LogRecord) -> Result<(), SliceError> {
        if self.current == 0 {
            return Err(SliceError::LogExhausted);
        }
        self.current -= 1;
        match *record {
            LogRecord::AddrTakenDecl => self.ensure_not_start(record),
            LogRecord::TopLevelPointTo { pointer_value, pointee, loaded_from } => {
                self.on_top_level_point_to(pointer_value, pointee, loaded_from)
            }
            LogRecord::AddrTakenPointTo { instruction, pointer_address } => {
                self.on_addr_taken_point_to(record, instruction, pointer_address)
            }
            LogRecord::CallInstruction { instruction } => self.on_call(record, instruction),
            LogRecord::ReturnInstruction { instruction } => self.on_return(record, instruction),
        }
    }

    pub fn into_outcome(self) -> SliceOutcome {
        SliceOutcome { states: self.states, stopped_at: self.current }
    }

    fn ensure_not_start(&self, record: &LogRecord) -> Result<(), SliceError> {
        match self.states.iter().find(|s| s.start == self.current) {
            Some(state) => Err(SliceError::StartNotTopLevel {
                label: state.label,
                record: self.current,
                kind: record.kind_name(),
            }),
            None => Ok(()),
        }
    }

    fn resolve_instruction(&self, id: InstructionId) -> Result<Instruction, SliceError> {
        Ok(self.program.instruction(id)?)
    }

    fn unexpected(
        &self,
        id: InstructionId,
        expected: &'static str,
        found: &Instruction,
    ) -> SliceError {
        SliceError::UnexpectedInstruction {
            record: self.current,
            instruction: id,
            expected,
            found: found.kind_name(),
        }
    }

    /// Both pointers explained by the same record: their provenance has merged.
    fn converge_if_shared(&mut self, matched: usize) {
        if matched == 2 {
            let record = self.current;
            tracing::debug!(record, "slices converged");
            for state in &mut self.states {
                state.converge(record);
            }
        }
    }

    fn on_top_level_point_to(
        &mut self,
        pointer_value: ValueId,
        pointee: Address,
        loaded_from: Option<Address>,
    ) -> Result<(), SliceError> {
        let current = self.current;
        let program = self.program;
        let mut matched = 0;

        for state in &mut self.states {
            if state.start == current {
                if !program.is_pointer(pointer_value)? {
                    return Err(SliceError::NotAPointer {
                        label: state.label,
                        record: current,
                        value: pointer_value,
                    });
                }
                state.value_id = pointer_value;
            }
            if !state.is_live(current) || state.action != Action::TopLevelPointTo {
                continue;
            }

            let accepted = if state.candidates.is_empty() {
                pointer_value == state.value_id
            } else if pointee == state.address && state.candidates.contains(&pointer_value) {
                // Select/merge: the operand whose pointee matches is the one that flowed here.
                state.candidates.clear();
                state.value_id = pointer_value;
                true
            } else {
                false
            };

            if accepted {
                matched += 1;
                state.record_match(current, state.value_id);
                track_source_pointer(program, state, current, pointee, loaded_from)?;
            }
        }

        self.converge_if_shared(matched);
        Ok(())
    }

    fn on_addr_taken_point_to(
        &mut self,
        record: &LogRecord,
        id: InstructionId,
        pointer_address: Address,
    ) -> Result<(), SliceError> {
        let stored = match self.resolve_instruction(id)? {
            Instruction::Store { value } => value,
            other => return Err(self.unexpected(id, "store", &other)),
        };
        self.ensure_not_start(record)?;

        let current = self.current;
        let mut matched = 0;
        for state in &mut self.states {
            if !state.is_live(current)
                || state.action != Action::AddrTakenPointTo
                || state.address != pointer_address
            {
                continue;
            }
            matched += 1;
            state.record_match(current, stored);
            state.action = Action::TopLevelPointTo;
            state.value_id = stored;
        }

        self.converge_if_shared(matched);
        Ok(())
    }

    fn on_call(&mut self, record: &LogRecord, id: InstructionId) -> Result<(), SliceError> {
        let instruction = self.resolve_instruction(id)?;
        let Some(args) = instruction.call_arguments() else {
            return Err(self.unexpected(id, "call or invoke", &instruction));
        };
        self.ensure_not_start(record)?;

        let current = self.current;
        let mut matched = 0;
        for state in &mut self.states {
            if !state.is_live(current) {
                continue;
            }
            match state.action {
                Action::ReturnInstruction => {
                    // No return was logged before this call, so the callee was not instrumented.
                    state.finish(Termination::OpaqueCallee { record: current });
                }
                Action::CallInstruction => {
                    let Some(&arg) = args.get(state.arg_no as usize) else {
                        return Err(SliceError::ArgumentOutOfRange {
                            label: state.label,
                            record: current,
                            instruction: id,
                            arg_no: state.arg_no,
                            arg_count: args.len(),
                        });
                    };
                    matched += 1;
                    state.record_match(current, arg);
                    state.action = Action::TopLevelPointTo;
                    state.value_id = arg;
                }
                Action::TopLevelPointTo | Action::AddrTakenPointTo => {}
            }
        }

        self.converge_if_shared(matched);
        Ok(())
    }

    fn on_return(&mut self, record: &LogRecord, id: InstructionId) -> Result<(), SliceError> {
        let instruction = self.resolve_instruction(id)?;
        let (returned, unwinding) = match instruction {
            Instruction::Return { value } => (value, false),
            Instruction::Resume => (None, true),
            other => return Err(self.unexpected(id, "return or resume", &other)),
        };
        self.ensure_not_start(record)?;

        let current = self.current;
        let mut matched = 0;
        for state in &mut self.states {
            if !state.is_live(current) || state.action != Action::ReturnInstruction {
                continue;
            }
            if unwinding {
                return Err(SliceError::UnwindingReturn {
                    label: state.label,
                    record: current,
                    instruction: id,
                });
            }
            let Some(value) = returned else {
                return Err(SliceError::VoidReturn {
                    label: state.label,
                    record: current,
                    instruction: id,
                });
            };
            matched += 1;
            state.record_match(current, value);
            state.action = Action::TopLevelPointTo;
            state.value_id = value;
        }

        self.converge_if_shared(matched);
        Ok(())
    }
}
