//! 命令行入口的顶层错误

use super::SettingsError;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("JSON 序列化失败: {0}")]
    Serde(#[from] serde_json::Error),
}
