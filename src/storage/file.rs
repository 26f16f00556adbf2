use super::KeyValueStore;
use crate::error::StorageError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// 磁盘上的条目外层结构
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEntry {
    value: String,
    expires_at_epoch_ms: i64,
}

/// 每个键一个 JSON 文件
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(key)))
    }
}

/// 键名转文件名：不安全的字节写成 `%XX`，`%` 本身也转义，不同的键不会落到同一个文件
fn file_stem(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for b in key.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b'_') {
            out.push(char::from(b));
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

fn remove_if_exists(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

impl KeyValueStore for FileStorage {
    fn read(&mut self, key: &str) -> Result<Option<String>, StorageError> {
        let p = self.entry_path(key);
        let bytes = match fs::read(&p) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let entry: StoredEntry = serde_json::from_slice(&bytes)?;

        if entry.expires_at_epoch_ms <= Utc::now().timestamp_millis() {
            tracing::debug!(path = %p.display(), "条目已过期，删除");
            remove_if_exists(&p)?;
            return Ok(None);
        }
        Ok(Some(entry.value))
    }

    fn write(
        &mut self,
        key: &str,
        value: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        let p = self.entry_path(key);
        let tmp = p.with_extension("json.tmp");

        let entry = StoredEntry {
            value: value.to_owned(),
            expires_at_epoch_ms: expires_at.timestamp_millis(),
        };
        fs::write(&tmp, serde_json::to_vec_pretty(&entry)?)?;

        // 原子性写入
        if let Err(e) = fs::rename(&tmp, &p) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        remove_if_exists(&self.entry_path(key))?;
        Ok(())
    }
}
