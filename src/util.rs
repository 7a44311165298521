//! Common utilities for playwright-pdf
//!
//! Small helpers shared between the real builder and the test fake.

use std::path::Path;

/// Normalize a download filename: lower-cased and guaranteed to end in
/// `.pdf` (idempotent)
pub fn normalize_pdf_file_name(name: &str) -> String {
    let name = name.to_lowercase();

    if name.ends_with(".pdf") {
        name
    } else {
        format!("{name}.pdf")
    }
}

/// Ensure a directory exists and is writable, creating it if necessary
///
/// Writability is probed with a throwaway file since permission bits alone
/// are not reliable across platforms.
pub fn ensure_dir_writable<P: AsRef<Path>>(path: P) -> Result<(), String> {
    let path = path.as_ref();

    if !path.exists() {
        std::fs::create_dir_all(path)
            .map_err(|e| format!("Failed to create directory [{}]: {}", path.display(), e))?;
    }

    let probe = path.join(".write_test");
    std::fs::write(&probe, b"test")
        .map_err(|_| format!("Directory [{}] is not writable", path.display()))?;
    let _ = std::fs::remove_file(probe);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_appends_suffix() {
        assert_eq!(normalize_pdf_file_name("invoice"), "invoice.pdf");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        assert_eq!(normalize_pdf_file_name("invoice.pdf"), "invoice.pdf");
    }

    #[test]
    fn test_normalize_lowercases() {
        assert_eq!(normalize_pdf_file_name("Invoice.PDF"), "invoice.pdf");
    }

    #[test]
    fn test_ensure_dir_writable_creates_missing_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");

        ensure_dir_writable(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
