//! JSON export/import at the file boundary.

use std::fs;
use std::path::Path;

use crate::document::store::DocumentStore;
use crate::errors::AppError;
use crate::storage::DocumentStorage;

/// Suggested filename for exported documents.
pub const EXPORT_FILENAME: &str = "cv-data.json";

/// Files must look like JSON before we read a byte of them.
pub fn is_json_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Reads a JSON file and replaces the whole document with its normalized
/// contents. The extension gate runs before any read; a parse failure
/// leaves the document untouched. The read is synchronous, so a second
/// import cannot start while this one is in flight.
pub fn import_from_file<S: DocumentStorage>(
    store: &mut DocumentStore<S>,
    path: &Path,
) -> Result<(), AppError> {
    if !is_json_file(path) {
        return Err(AppError::RejectedFileType(path.display().to_string()));
    }
    let text = fs::read_to_string(path)?;
    store.import_json(&text)
}

/// Writes the pretty-printed export to `path`.
pub fn export_to_file<S: DocumentStorage>(
    store: &DocumentStore<S>,
    path: &Path,
) -> Result<(), AppError> {
    fs::write(path, store.export_json())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn store() -> DocumentStore<MemoryStorage> {
        DocumentStore::open(MemoryStorage::new())
    }

    #[test]
    fn test_extension_gate() {
        assert!(is_json_file(Path::new("cv-data.json")));
        assert!(is_json_file(Path::new("CV.JSON")));
        assert!(!is_json_file(Path::new("cv-data.txt")));
        assert!(!is_json_file(Path::new("cv-data")));
    }

    #[test]
    fn test_import_rejects_non_json_path_before_reading() {
        let mut store = store();
        let before = store.document().clone();
        // The path does not exist; the gate must fire before any read.
        let err = import_from_file(&mut store, Path::new("/no/such/cv.txt")).unwrap_err();
        assert!(matches!(err, AppError::RejectedFileType(_)));
        assert_eq!(*store.document(), before);
    }

    #[test]
    fn test_import_from_file_replaces_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.json");
        fs::write(&path, r#"{"resumen": "imported"}"#).unwrap();

        let mut store = store();
        import_from_file(&mut store, &path).unwrap();
        assert_eq!(store.document().summary, "imported");
    }

    #[test]
    fn test_export_writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILENAME);

        let store = store();
        export_to_file(&store, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"personal\""));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(value.get("experiencia").is_some());
    }
}
