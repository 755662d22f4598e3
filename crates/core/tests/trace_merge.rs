use trace_slicer_core::model::{PointerLabel, TraceEntry};
use trace_slicer_core::trace::{merge, MergeMode, MergedEntry};

fn t(record: u32, value: u32) -> TraceEntry {
    TraceEntry::new(record, value)
}

fn rows(merged: &[MergedEntry]) -> Vec<(u32, PointerLabel)> {
    merged.iter().map(|m| (m.entry.record, m.label)).collect()
}

#[test]
fn interleaves_by_descending_record() {
    let first = [t(10, 1), t(7, 2), t(3, 2)];
    let second = [t(9, 5), t(8, 6), t(1, 7)];

    let merged = merge(&first, &second, MergeMode::Dedup);
    use PointerLabel::*;
    assert_eq!(
        rows(&merged),
        vec![(10, First), (9, Second), (8, Second), (7, First), (3, First), (1, Second)]
    );
}

#[test]
fn convergence_record_is_kept_once_or_twice_by_mode() {
    let first = [t(10, 1), t(4, 3)];
    let second = [t(8, 2), t(4, 3)];

    let dedup = merge(&first, &second, MergeMode::Dedup);
    assert_eq!(dedup.len(), 3);
    assert!(dedup.windows(2).all(|w| w[0].entry.record > w[1].entry.record));
    assert_eq!(dedup[2].label, PointerLabel::First);

    let both = merge(&first, &second, MergeMode::KeepBoth);
    assert_eq!(
        rows(&both),
        vec![
            (10, PointerLabel::First),
            (8, PointerLabel::Second),
            (4, PointerLabel::First),
            (4, PointerLabel::Second)
        ]
    );
}

#[test]
fn handles_empty_sides() {
    let first = [t(5, 1)];
    assert_eq!(merge(&first, &[], MergeMode::Dedup).len(), 1);
    assert_eq!(merge(&[], &first, MergeMode::Dedup)[0].label, PointerLabel::Second);
    assert!(merge(&[], &[], MergeMode::KeepBoth).is_empty());
}
