use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::{Address, PointerLabel, RecordId, TraceEntry, ValueId};

/// Record kind a tracked pointer is currently waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    #[default]
    TopLevelPointTo,
    AddrTakenPointTo,
    CallInstruction,
    ReturnInstruction,
}

/// Why a tracked pointer stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Termination {
    /// Reached a stack allocation or global.
    RootStorage { value: ValueId },
    /// Reached a definition with no tracking rule.
    Unclassified { value: ValueId },
    /// Waiting for a return but saw the call first: the callee was not instrumented.
    OpaqueCallee { record: RecordId },
    /// Both pointers matched the same record.
    Converged { record: RecordId },
}

/// Tracking state of one pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceState {
    pub(super) label: PointerLabel,
    pub(super) start: RecordId,
    pub(super) action: Action,
    pub(super) value_id: ValueId,
    pub(super) candidates: BTreeSet<ValueId>,
    pub(super) address: Address,
    pub(super) arg_no: u32,
    pub(super) trace: Vec<TraceEntry>,
    pub(super) termination: Option<Termination>,
}

impl TraceState {
    pub fn new(label: PointerLabel, start: RecordId) -> Self {
        Self {
            label,
            start,
            action: Action::TopLevelPointTo,
            value_id: 0,
            candidates: BTreeSet::new(),
            address: 0,
            arg_no: 0,
            trace: Vec::new(),
            termination: None,
        }
    }

    pub fn label(&self) -> PointerLabel {
        self.label
    }

    pub fn start(&self) -> RecordId {
        self.start
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn value_id(&self) -> ValueId {
        self.value_id
    }

    pub fn candidates(&self) -> &BTreeSet<ValueId> {
        &self.candidates
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn arg_no(&self) -> u32 {
        self.arg_no
    }

    /// Matches in backward-walk order (descending record id).
    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    pub fn is_ended(&self) -> bool {
        self.termination.is_some()
    }

    /// Active once the counter has reached the start record and until the state ends.
    pub fn is_live(&self, current: RecordId) -> bool {
        current <= self.start && !self.is_ended()
    }

    pub(super) fn record_match(&mut self, record: RecordId, value: ValueId) {
        debug_assert!(self.trace.last().map_or(true, |last| last.record > record));
        tracing::trace!(label = %self.label, record, value, "slice match");
        self.trace.push(TraceEntry::new(record, value));
    }

    /// Ends tracking. The first reason recorded wins.
    pub(super) fn finish(&mut self, reason: Termination) {
        if self.termination.is_none() {
            tracing::debug!(label = %self.label, ?reason, "tracking ended");
            self.termination = Some(reason);
        }
    }

    /// Ends tracking at a record shared with the other pointer. Replaces any
    /// reason the resolver set while handling that same record.
    pub(super) fn converge(&mut self, record: RecordId) {
        let reason = Termination::Converged { record };
        if let Some(previous) = self.termination.replace(reason) {
            tracing::debug!(label = %self.label, ?previous, record, "converged after ending");
        }
    }
}
