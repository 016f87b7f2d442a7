use crate::{KeyValueStore, KvError, Result as KvResult};

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

const ENTRY_SUFFIX: &str = ".entry";
const HASHED_SUFFIX: &str = ".hentry";

/// Longest encoded key used verbatim as a file name.
pub(crate) const MAX_ENCODED_NAME_LENGTH: usize = 200;

/// Directory-backed store: one file per key.
///
/// File names are the key with every byte outside `[A-Za-z0-9_-]`
/// percent-encoded, so any key maps to exactly one file and back. Keys whose
/// encoding exceeds [`MAX_ENCODED_NAME_LENGTH`] are stored under the SHA-256
/// of the key instead, with the encoded key on the first line of the file.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> KvResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| KvError::dir_creation(dir.clone(), e))?;
        debug!("Opened file store at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> EntryPath {
        let encoded = encode_key(key);
        if encoded.len() <= MAX_ENCODED_NAME_LENGTH {
            return EntryPath::Plain(self.dir.join(format!("{encoded}{ENTRY_SUFFIX}")));
        }

        let digest = hex::encode(Sha256::digest(key.as_bytes()));
        EntryPath::Hashed {
            path: self.dir.join(format!("{digest}{HASHED_SUFFIX}")),
            encoded,
        }
    }
}

enum EntryPath {
    Plain(PathBuf),
    Hashed { path: PathBuf, encoded: String },
}

impl EntryPath {
    fn path(&self) -> &Path {
        match self {
            Self::Plain(path) | Self::Hashed { path, .. } => path,
        }
    }

    fn contents(&self, value: &str) -> String {
        match self {
            Self::Plain(_) => value.to_string(),
            Self::Hashed { encoded, .. } => format!("{encoded}\n{value}"),
        }
    }

    fn value(&self, contents: String) -> Option<String> {
        match self {
            Self::Plain(_) => Some(contents),
            Self::Hashed { encoded, .. } => {
                let (stored, value) = contents.split_once('\n')?;
                (stored == encoded).then(|| value.to_string())
            }
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        let entry = self.entry_path(key);

        match fs::read_to_string(entry.path()) {
            Ok(contents) => Ok(entry.value(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(KvError::read(entry.path().to_path_buf(), e)),
        }
    }

    /// Writes with the atomic pattern: a temp file unique to this call,
    /// fsync, rename.
    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        let entry = self.entry_path(key);
        let final_path = entry.path();

        let mut temp =
            NamedTempFile::new_in(&self.dir).map_err(|e| KvError::write(self.dir.clone(), e))?;
        let temp_path = temp.path().to_path_buf();

        temp.write_all(entry.contents(value).as_bytes())
            .map_err(|e| KvError::write(temp_path.clone(), e))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| KvError::write(temp_path.clone(), e))?;

        // A failed persist drops the temp file, which deletes it.
        temp.persist(final_path)
            .map_err(|e| KvError::atomic_rename(temp_path, final_path.to_path_buf(), e.error))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> KvResult<bool> {
        let entry = self.entry_path(key);
        let path = entry.path();

        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(KvError::remove(path.to_path_buf(), e)),
        }
    }

    fn keys(&self) -> KvResult<Vec<String>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| KvError::read(self.dir.clone(), e))?;

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| KvError::read(self.dir.clone(), e))?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            let key = if let Some(encoded) = name.strip_suffix(ENTRY_SUFFIX) {
                decode_key(encoded)
            } else if name.ends_with(HASHED_SUFFIX) {
                let contents = match fs::read_to_string(entry.path()) {
                    Ok(contents) => contents,
                    Err(e) if e.kind() == ErrorKind::NotFound => continue,
                    Err(e) => return Err(KvError::read(entry.path(), e)),
                };
                contents
                    .split_once('\n')
                    .and_then(|(encoded, _)| decode_key(encoded))
            } else {
                continue;
            };
            match key {
                Some(key) => keys.push(key),
                None => warn!("Skipping undecodable entry file {name}"),
            }
        }

        keys.sort();
        Ok(keys)
    }
}

pub(crate) fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

pub(crate) fn decode_key(encoded: &str) -> Option<String> {
    let bytes = encoded.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = encoded.get(i + 1..i + 3)?;
            decoded.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(decoded).ok()
}
