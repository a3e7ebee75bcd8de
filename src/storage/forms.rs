//! Form files - each stored form as a tiny HTML page on disk
//!
//! File layout:
//! ```text
//! <forms_dir>/
//!   form_<nanos>_<seq>.html
//! ```
//!
//! Files are written after the form is indexed; the index never waits on disk.

use crate::index::{FieldSet, FormId};
use crate::storage::error::{validate_name, StorageError, StorageResult};
use crate::storage::html::render_form_file;
use std::path::{Path, PathBuf};

/// Directory of rendered form files
#[derive(Debug, Clone)]
pub struct FormFileStore {
    dir: PathBuf,
}

impl FormFileStore {
    /// Open (creating if needed) the form directory
    pub async fn new(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file for an external form name
    pub fn path_for(&self, name: &str) -> StorageResult<PathBuf> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{}.html", name)))
    }

    /// Render and write a form file, returning its path
    pub async fn write(&self, id: FormId, fields: &FieldSet) -> StorageResult<PathBuf> {
        let name = id.name();
        let path = self.path_for(&name)?;

        tokio::fs::write(&path, render_form_file(&name, fields)).await?;

        tracing::debug!(form = %name, path = ?path, "Wrote form file");
        Ok(path)
    }

    /// Read a stored form file by external name
    pub async fn read(&self, name: &str) -> StorageResult<String> {
        let path = self.path_for(name)?;

        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_and_read() {
        let dir = tempdir().unwrap();
        let store = FormFileStore::new(dir.path().join("forms")).await.unwrap();

        let id = FormId::new(7, 1234);
        let fields = FieldSet::new().with("color", "red");
        let path = store.write(id, &fields).await.unwrap();

        assert_eq!(path, dir.path().join("forms").join("form_1234_7.html"));

        let content = store.read("form_1234_7").await.unwrap();
        assert!(content.contains(r#"name="color" value="red""#));
    }

    #[tokio::test]
    async fn test_read_missing() {
        let dir = tempdir().unwrap();
        let store = FormFileStore::new(dir.path()).await.unwrap();

        let err = store.read("form_0_0").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_read_rejects_traversal() {
        let dir = tempdir().unwrap();
        let store = FormFileStore::new(dir.path().join("forms")).await.unwrap();
        std::fs::write(dir.path().join("secret.html"), "nope").unwrap();

        let err = store.read("../secret").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidName(_)));
    }
}
