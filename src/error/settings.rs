//! 设置读写与派生值相关错误

use super::StorageError;

/// 设置操作错误类型
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// 规则编号不在 {0,1,2,4,5} 内
    #[error("未知规则: {0}")]
    UnknownRule(u8),

    /// 不存在的设置项
    #[error("未知设置项: {0}")]
    UnknownKey(String),

    /// 值与设置项类型不符（或越界的枚举编号）
    #[error("设置项 {key} 的值无效: {source}")]
    InvalidValue {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// 时间控制选项越界
    #[error("时间控制选项越界: {0}")]
    InvalidThinkTimeOption(u8),

    /// 配置序号越界
    #[error("配置序号越界: {index}, 共 {count} 个配置")]
    ConfigIndexOutOfRange { index: usize, count: usize },

    /// 违反取值范围约束
    #[error("{field} 取值越界: {value}")]
    OutOfRange { field: &'static str, value: i64 },

    /// 底层存储失败
    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),

    /// 序列化失败
    #[error("JSON 序列化失败: {0}")]
    Serde(#[from] serde_json::Error),
}
