//! 五子棋客户端的用户设置：默认值、派生的引擎参数，
//! 以及按应用版本保存、30 天过期的持久化。

pub mod app;
pub mod cli;
pub mod error;
pub mod logging;
pub mod settings;
pub mod storage;
