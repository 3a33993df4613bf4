//! Directory-backed blob store.
//!
//! Each slot `key` lives in `<root>/<key>.json`. Access is scoped to the root
//! directory through `cap-std`, so keys cannot escape it.

use crate::tool_registry::ports::{BlobStore, StoreError, StoreResult};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::fmt;
use std::io::ErrorKind;
use std::sync::Arc;

/// Blob store persisting each slot as a JSON file in one directory.
#[derive(Clone)]
pub struct FileBlobStore {
    dir: Arc<Dir>,
    root: Utf8PathBuf,
}

impl fmt::Debug for FileBlobStore {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("FileBlobStore")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl FileBlobStore {
    /// Opens `root`, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the directory cannot be created or
    /// opened.
    pub fn open(root: impl AsRef<Utf8Path>) -> StoreResult<Self> {
        let root_path = root.as_ref();
        Dir::create_ambient_dir_all(root_path, ambient_authority())?;
        let dir = Dir::open_ambient_dir(root_path, ambient_authority())?;
        Ok(Self {
            dir: Arc::new(dir),
            root: root_path.to_owned(),
        })
    }

    /// Returns the directory holding the slots.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    async fn run_blocking<F, T>(&self, operation: F) -> StoreResult<T>
    where
        F: FnOnce(&Dir) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || operation(&dir))
            .await
            .map_err(|err| StoreError::from(std::io::Error::other(err)))?
    }
}

fn slot_file_name(key: &str) -> StoreResult<String> {
    let is_valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|character| {
                character.is_ascii_alphanumeric() || matches!(character, '-' | '_' | '.')
            });
    if !is_valid {
        return Err(StoreError::InvalidKey(key.to_owned()));
    }
    Ok(format!("{key}.json"))
}

#[async_trait]
impl BlobStore for FileBlobStore {
    async fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let file_name = slot_file_name(key)?;
        self.run_blocking(move |dir| match dir.read_to_string(&file_name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        })
        .await
    }

    async fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        let file_name = slot_file_name(key)?;
        let staging_name = format!(".{file_name}.tmp");
        let contents = value.to_owned();
        self.run_blocking(move |dir| {
            dir.write(&staging_name, contents.as_bytes())?;
            dir.rename(&staging_name, dir, &file_name)?;
            Ok(())
        })
        .await
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        let file_name = slot_file_name(key)?;
        self.run_blocking(move |dir| match dir.remove_file(&file_name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        })
        .await
    }
}
