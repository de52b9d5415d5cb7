use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::{error::Error, util::mkdir_if_not_exists};

/// A durable key-value slot store.  Values are read and written whole.
pub trait Storage {
    /// Returns `Ok(None)` when nothing was ever stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Error>;

    /// Replaces the contents stored under `key`.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), Error>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Error> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), Error> {
        (**self).set(key, value)
    }
}

/// One file per key under `base`.
pub struct FileStorage {
    base: PathBuf,
}

impl FileStorage {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Error> {
        match fs::read(self.key_path(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Error::StorageReadError(err.to_string())),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), Error> {
        let write = || -> io::Result<()> {
            mkdir_if_not_exists(&self.base)?;
            // Write next to the target and rename over it, a crash mid-write
            // leaves the previous contents in place.
            let mut file = NamedTempFile::new_in(&self.base)?;
            file.write_all(value)?;
            file.as_file().sync_all()?;
            file.persist(self.key_path(key)).map_err(|err| err.error)?;
            Ok(())
        };
        log::debug!("writing storage slot: {:?}", key);
        write().map_err(|err| Error::StorageWriteError(err.to_string()))
    }
}
