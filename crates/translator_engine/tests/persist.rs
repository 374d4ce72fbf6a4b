use std::fs;

use tempfile::TempDir;
use translator_engine::{ensure_output_dir, AtomicFileWriter, PersistError};

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("translations");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("translated_1.pdf", b"first").unwrap();
    assert_eq!(first.file_name().unwrap(), "translated_1.pdf");
    assert_eq!(fs::read(&first).unwrap(), b"first");

    let second = writer.write("translated_1.pdf", b"second").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"second");
}

#[test]
fn rejects_names_that_escape_the_output_dir() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().join("out"));

    for name in ["../evil.pdf", "nested/evil.pdf", ""] {
        let err = writer.write(name, b"x").unwrap_err();
        assert!(matches!(err, PersistError::FileName(_)), "{name}");
    }
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write("translated_1.pdf", b"data");
    assert!(result.is_err());
    assert!(!file_path.with_file_name("translated_1.pdf").exists());
}
