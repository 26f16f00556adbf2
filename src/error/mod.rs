//! 统一错误处理模块
//!
//! 设置、存储与命令行入口各自的结构化错误类型。

mod app;
mod settings;
mod storage;

pub use app::AppError;
pub use settings::SettingsError;
pub use storage::StorageError;
