use trace_slicer::sha256_file;
use tempfile::tempdir;

#[test]
fn sha256_file_matches_known_hash() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("abc.txt");
    std::fs::write(&path, b"abc").expect("write");

    let hash = sha256_file(&path).expect("hash");
    assert_eq!(hash, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
}

#[test]
fn sha256_file_reports_missing_file() {
    let tmp = tempdir().expect("tempdir");
    let err = sha256_file(&tmp.path().join("nope")).unwrap_err();
    assert!(err.to_string().contains("Failed to open file for hashing"));
}

#[test]
fn init_logging_can_be_called_twice() {
    trace_slicer::init_logging(false);
    trace_slicer::init_logging(true);
}
