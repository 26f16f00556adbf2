//! 键值存储相关错误

/// 存储后端错误类型
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 存储条目的外层结构无法解析
    #[error("JSON 序列化失败: {0}")]
    Serde(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));
        assert!(err.to_string().contains("IO 错误"));
    }
}
