//! Trace assembly: interleave the two per-pointer slices into one timeline.

use serde::{Deserialize, Serialize};

use crate::model::{PointerLabel, TraceEntry};

/// How the merged view treats the convergence record, which both slices contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMode {
    /// Emit the shared record once (strictly descending output).
    #[default]
    Dedup,
    /// Emit the shared record once per pointer.
    KeepBoth,
}

/// One row of the merged view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergedEntry {
    pub label: PointerLabel,
    pub entry: TraceEntry,
}

/// Merge two descending traces by always taking the head with the larger record id.
///
/// On a tie the first pointer's entry comes first; with `MergeMode::Dedup`
/// the second pointer's copy is dropped.
pub fn merge(
    first: &[TraceEntry],
    second: &[TraceEntry],
    mode: MergeMode,
) -> Vec<MergedEntry> {
    let mut out = Vec::with_capacity(first.len() + second.len());
    let (mut i, mut j) = (0, 0);

    while i < first.len() || j < second.len() {
        let take_first = match (first.get(i), second.get(j)) {
            (Some(a), Some(b)) => a.record >= b.record,
            (Some(_), None) => true,
            (None, _) => false,
        };
        if take_first {
            let entry = first[i];
            i += 1;
            out.push(MergedEntry { label: PointerLabel::First, entry });
            if mode == MergeMode::Dedup && second.get(j).is_some_and(|b| b.record == entry.record) {
                j += 1;
            }
        } else {
            out.push(MergedEntry { label: PointerLabel::Second, entry: second[j] });
            j += 1;
        }
    }

    out
}
