use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "gomoku-settings", version, about = "五子棋客户端设置的查看与修改")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// 覆盖数据目录（默认走系统 data_local_dir）
    #[arg(long, env = "GOMOKU_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// 覆盖日志目录（默认 `{data_dir}/logs`）
    #[arg(long, env = "GOMOKU_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// 覆盖日志过滤（等价于设置 RUST_LOG）
    #[arg(long, env = "RUST_LOG")]
    pub log_filter: Option<String>,

    /// 覆盖应用版本号（决定读写哪一条保存的设置）
    #[arg(long, env = "GOMOKU_APP_VERSION")]
    pub app_version: Option<String>,

    /// 日志同时输出到 stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 打印全部设置（默认）
    Show,

    /// 打印单个设置项
    Get { key: String },

    /// 修改设置项，白名单内的键会被保存
    Set {
        key: String,
        /// JSON 字面量；无法解析时按字符串处理
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// 修改棋盘外观项
    SetBoard {
        key: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// 打印引擎实际使用的时间、深度、节点与规则
    Derived,

    /// 打印将被保存的设置项（启动时已从存储加载）
    Saved,

    /// 删除当前版本保存的设置
    Clear,

    /// 打印当前版本的存储键
    Key,
}

/// 命令行值 → JSON：`512`、`true`、`null` 按 JSON 解析，`zh-CN` 之类按字符串
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}
