use trace_slicer_core::model::{LogRecord, PointerLabel};
use trace_slicer_core::version;

#[test]
fn version_is_non_empty() {
    let v = version();
    assert!(!v.is_empty());
}

#[test]
fn pointer_labels_print_one_based() {
    assert_eq!(PointerLabel::First.to_string(), "ptr1");
    assert_eq!(PointerLabel::Second.to_string(), "ptr2");
}

#[test]
fn record_display_shows_kind_and_payload() {
    let record = LogRecord::AddrTakenPointTo { instruction: 7, pointer_address: 0x40 };
    assert_eq!(record.to_string(), "addr_taken_point_to\tinstruction=7 address=0x40");
    assert_eq!(LogRecord::AddrTakenDecl.to_string(), "addr_taken_decl");
}
