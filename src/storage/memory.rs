use super::KeyValueStore;
use crate::error::StorageError;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// 进程内存储，用于嵌入场景与测试
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, (String, DateTime<Utc>)>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn expires_at(&self, key: &str) -> Option<DateTime<Utc>> {
        self.entries.get(key).map(|(_, at)| *at)
    }
}

impl KeyValueStore for MemoryStorage {
    fn read(&mut self, key: &str) -> Result<Option<String>, StorageError> {
        let Some(expires_at) = self.expires_at(key) else {
            return Ok(None);
        };
        if expires_at <= Utc::now() {
            tracing::debug!(key, "条目已过期");
            self.entries.remove(key);
            return Ok(None);
        }
        Ok(self.entries.get(key).map(|(value, _)| value.clone()))
    }

    fn write(
        &mut self,
        key: &str,
        value: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        self.entries
            .insert(key.to_owned(), (value.to_owned(), expires_at));
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}
