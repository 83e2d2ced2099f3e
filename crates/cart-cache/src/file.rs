//! Directory-backed blob store.

use crate::{BlobStore, CacheError};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

/// Stores each key as one file inside a directory.
///
/// Writes go to `{file}.tmp`, are synced, then renamed over the target, so a
/// crash mid-write leaves either the old snapshot or the new one.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|e| CacheError::OpenError(format!("{}: {}", root.display(), e)))?;
        Ok(Self { root })
    }

    /// Path of the file backing `key`.
    ///
    /// `[A-Za-z0-9.-]` is kept as is; every other byte, `_` included, is
    /// written as `_XX` hex so distinct keys never share a file.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len() + 5);
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'-') {
                name.push(byte as char);
            } else {
                name.push_str(&format!("_{:02X}", byte));
            }
        }
        name.push_str(".blob");
        self.root.join(name)
    }
}

impl BlobStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), CacheError> {
        let target = self.path_for(key);
        let tmp = target.with_extension("blob.tmp");

        let written = fs::File::create(&tmp)
            .and_then(|mut file| {
                file.write_all(bytes)?;
                file.sync_all()
            })
            .and_then(|()| fs::rename(&tmp, &target));

        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        tracing::trace!(path = %target.display(), len = bytes.len(), "blob written");
        Ok(())
    }
}
