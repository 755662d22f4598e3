//! Slice reports: a serializable summary of a run and its tab-separated listing.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::model::{PointerLabel, RecordId, ValueId};
use crate::program::ProgramRepr;
use crate::slicer::{SliceOutcome, Termination};
use crate::trace::MergeMode;

/// Header line of the text listing.
pub const LISTING_HEADER: &str = "RecID\tPtr\tValueID\tFunc:  Inst/Arg";

/// One listed match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub record: RecordId,
    pub label: PointerLabel,
    pub value: ValueId,
    pub description: String,
}

impl ReportRow {
    fn render(&self, out: &mut String) {
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}",
            self.record, self.label, self.value, self.description
        );
    }
}

/// Slice of a single pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerSlice {
    pub label: PointerLabel,
    pub start: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub termination: Option<Termination>,
    pub rows: Vec<ReportRow>,
}

/// Identity of the inputs a report was produced from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFingerprint {
    pub log_path: String,
    pub log_sha256: String,
    pub program_path: String,
    pub program_sha256: String,
}

/// Result of a slicing run, ready for printing or JSON export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceReport {
    pub pointers: Vec<PointerSlice>,
    pub merged: Vec<ReportRow>,
    pub merge_mode: MergeMode,
    pub converged: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<InputFingerprint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
}

impl SliceReport {
    /// Build a report from a finished run, describing values through `program`.
    pub fn build<P: ProgramRepr + ?Sized>(
        outcome: &SliceOutcome,
        program: &P,
        merge_mode: MergeMode,
    ) -> Self {
        let row = |label: PointerLabel, record: RecordId, value: ValueId| ReportRow {
            record,
            label,
            value,
            description: program.describe(value),
        };

        let pointers = outcome
            .states
            .iter()
            .map(|state| PointerSlice {
                label: state.label(),
                start: state.start(),
                termination: state.termination(),
                rows: state.trace().iter().map(|e| row(state.label(), e.record, e.value)).collect(),
            })
            .collect();

        let merged = outcome
            .merged(merge_mode)
            .into_iter()
            .map(|m| row(m.label, m.entry.record, m.entry.value))
            .collect();

        Self {
            pointers,
            merged,
            merge_mode,
            converged: outcome.converged(),
            inputs: None,
            generated_at: None,
        }
    }

    pub fn with_inputs(mut self, inputs: InputFingerprint) -> Self {
        self.inputs = Some(inputs);
        self
    }

    pub fn with_generated_at(mut self, timestamp: impl Into<String>) -> Self {
        self.generated_at = Some(timestamp.into());
        self
    }

    /// Tab-separated listing: one section per pointer, then the merged timeline.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(LISTING_HEADER);
        out.push_str("\n\n");
        for pointer in &self.pointers {
            out.push_str(&format!("{}: \n", pointer.label));
            for row in &pointer.rows {
                row.render(&mut out);
            }
            out.push('\n');
        }
        out.push_str("Merged: \n");
        for row in &self.merged {
            row.render(&mut out);
        }
        out
    }
}
