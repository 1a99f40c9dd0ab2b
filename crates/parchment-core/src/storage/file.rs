//! One JSON file per document, for native platforms.

use super::{BoxFuture, Storage, StorageError, StorageResult, check_id};
use crate::document::CanvasDocument;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const EXTENSION: &str = "json";

/// Stores documents as `<id>.json` in a directory, with the id percent-encoded.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Use `base_path`, creating it if needed.
    pub fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path).map_err(|source| StorageError::Io {
            path: base_path.clone(),
            source,
        })?;
        Ok(Self { base_path })
    }

    /// Storage under the user's data directory, e.g.
    /// `~/.local/share/parchment/documents` on Linux.
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io {
                path: PathBuf::new(),
                source: std::io::Error::new(ErrorKind::NotFound, "no data or home directory"),
            })?;
        Self::new(base.join("parchment").join("documents"))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// File for `id`. Bytes outside `[A-Za-z0-9_-]` are written as `%XX`.
    fn document_path(&self, id: &str) -> StorageResult<PathBuf> {
        check_id(id)?;
        Ok(self
            .base_path
            .join(format!("{}.{}", encode_id(id), EXTENSION)))
    }
}

fn is_plain(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_'
}

fn encode_id(id: &str) -> String {
    let mut stem = String::with_capacity(id.len());
    for byte in id.bytes() {
        if is_plain(byte) {
            stem.push(char::from(byte));
        } else {
            stem.push_str(&format!("%{:02X}", byte));
        }
    }
    stem
}

/// Inverse of [`encode_id`]. `None` for stems this storage did not write.
fn decode_id(stem: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(stem.len());
    let mut rest = stem.as_bytes();
    while let Some((&byte, tail)) = rest.split_first() {
        if byte == b'%' {
            let hex = std::str::from_utf8(tail.get(..2)?).ok()?;
            bytes.push(u8::from_str_radix(hex, 16).ok()?);
            rest = &tail[2..];
        } else if is_plain(byte) {
            bytes.push(byte);
            rest = tail;
        } else {
            return None;
        }
    }
    String::from_utf8(bytes).ok()
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl Storage for FileStorage {
    fn save(&self, id: &str, document: &CanvasDocument) -> BoxFuture<'_, StorageResult<()>> {
        let target = self
            .document_path(id)
            .and_then(|path| Ok((path, document.to_json_pretty()?)));
        Box::pin(async move {
            let (path, json) = target?;
            fs::write(&path, json).map_err(io_error(&path))?;
            log::debug!("Saved document to {}", path.display());
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<CanvasDocument>> {
        let path = self.document_path(id);
        let id = id.to_string();
        Box::pin(async move {
            let path = path?;
            let json = match fs::read_to_string(&path) {
                Ok(json) => json,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    return Err(StorageError::NotFound(id));
                }
                Err(e) => return Err(io_error(&path)(e)),
            };
            Ok(CanvasDocument::from_json(&json)?)
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.document_path(id);
        Box::pin(async move {
            let path = path?;
            match fs::remove_file(&path) {
                Err(e) if e.kind() != ErrorKind::NotFound => Err(io_error(&path)(e)),
                _ => Ok(()),
            }
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let entries = fs::read_dir(&self.base_path).map_err(io_error(&self.base_path))?;

            let mut ids: Vec<String> = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|ext| ext == EXTENSION))
                .filter_map(|path| decode_id(path.file_stem()?.to_str()?))
                .collect();
            ids.sort();
            Ok(ids)
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.document_path(id);
        Box::pin(async move { Ok(path?.is_file()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::TextAnnotation;
    use crate::storage::block_on;
    use kurbo::Point;
    use tempfile::tempdir;

    fn note(text: &str) -> CanvasDocument {
        let mut doc = CanvasDocument::default();
        doc.texts.push(TextAnnotation::new(
            Point::new(20.0, 40.0),
            text,
            "Virgil",
            24.0,
            "#2c3e50",
        ));
        doc
    }

    #[test]
    fn test_save_load() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        block_on(storage.save("poster", &note("Hello"))).unwrap();
        let loaded = block_on(storage.load("poster")).unwrap();

        assert_eq!(loaded.texts[0].text, "Hello");
        assert!(dir.path().join("poster.json").is_file());
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::new(&nested).unwrap();

        assert!(nested.is_dir());
        assert_eq!(storage.base_path(), nested.as_path());
    }

    #[test]
    fn test_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        let result = block_on(storage.load("nothing"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_list_only_json_files() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        block_on(storage.save("second", &note("2"))).unwrap();
        block_on(storage.save("first", &note("1"))).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();

        assert_eq!(block_on(storage.list()).unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_delete() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        block_on(storage.save("tmp", &note("x"))).unwrap();
        assert!(block_on(storage.exists("tmp")).unwrap());

        block_on(storage.delete("tmp")).unwrap();
        assert!(!block_on(storage.exists("tmp")).unwrap());
        block_on(storage.delete("tmp")).unwrap();
    }

    #[test]
    fn test_ids_map_to_distinct_files() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        block_on(storage.save("a/b", &note("first"))).unwrap();
        block_on(storage.save("a_b", &note("second"))).unwrap();
        block_on(storage.save("../escape:me", &note("safe"))).unwrap();

        assert!(dir.path().join("a%2Fb.json").is_file());
        assert!(dir.path().join("%2E%2E%2Fescape%3Ame.json").is_file());
        assert_eq!(block_on(storage.load("a/b")).unwrap().texts[0].text, "first");
        assert_eq!(block_on(storage.load("a_b")).unwrap().texts[0].text, "second");
        assert_eq!(
            block_on(storage.list()).unwrap(),
            vec!["../escape:me", "a/b", "a_b"]
        );
    }

    #[test]
    fn test_id_encoding_roundtrip() {
        for id in ["plain-id_1", "50%", "ünïcødé", "with space.json"] {
            assert_eq!(decode_id(&encode_id(id)).as_deref(), Some(id));
        }
        assert_eq!(decode_id("bad%2"), None);
        assert_eq!(decode_id("has.dot"), None);
    }

    #[test]
    fn test_list_skips_foreign_files() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        fs::write(dir.path().join("notes.v2.json"), "{}").unwrap();

        block_on(storage.save("kept", &note("x"))).unwrap();
        assert_eq!(block_on(storage.list()).unwrap(), vec!["kept"]);
    }

    #[test]
    fn test_unparseable_file() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();
        fs::write(dir.path().join("bad.json"), "not json").unwrap();

        let result = block_on(storage.load("bad"));
        assert!(matches!(result, Err(StorageError::Document(_))));
    }
}
