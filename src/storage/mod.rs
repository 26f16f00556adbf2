//! 带过期时间的键值存储
//!
//! 设置以一条文本条目保存；条目过期后读取视为不存在。

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;
use chrono::{DateTime, Utc};

pub trait KeyValueStore {
    /// 读取未过期的条目；已过期的条目会被顺带删除
    fn read(&mut self, key: &str) -> Result<Option<String>, StorageError>;

    fn write(
        &mut self,
        key: &str,
        value: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StorageError>;

    /// 删除条目，不存在时不报错
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}
