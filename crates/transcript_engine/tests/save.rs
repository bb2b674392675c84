use std::fs;

use tempfile::TempDir;
use transcript_engine::{prepare_output_dir, DocumentWriter};

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("downloads");
    assert!(!new_dir.exists());
    prepare_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn write_replaces_existing_document() {
    let temp = TempDir::new().unwrap();
    let writer = DocumentWriter::new(temp.path().to_path_buf());

    let first = writer.write("Document_20233489.pdf", b"%PDF-1.4 v1").unwrap();
    assert_eq!(first.file_name().unwrap(), "Document_20233489.pdf");
    assert_eq!(fs::read(&first).unwrap(), b"%PDF-1.4 v1");

    // Re-running the same identifier refreshes the file in place.
    let second = writer.write("Document_20233489.pdf", b"%PDF-1.4 v2").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"%PDF-1.4 v2");
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = DocumentWriter::new(file_path.clone());
    let result = writer.write("Document_20233489.pdf", b"%PDF-1.4");
    assert!(result.is_err());
    assert!(!file_path.with_file_name("Document_20233489.pdf").exists());
}
