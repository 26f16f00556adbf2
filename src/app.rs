//! 应用根：持有设置存储并执行命令行请求

use crate::cli::{Command, parse_value};
use crate::error::AppError;
use crate::settings::{HostCapabilities, Settings, SettingsStore};
use crate::storage::{FileStorage, KeyValueStore};
use directories::ProjectDirs;
use serde_json::{Value, json};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    /// 参与存储键的应用版本号
    pub version: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = ProjectDirs::from("dev", "gomoku", "gomoku-settings")
            .map(|p| p.data_local_dir().to_path_buf())
            .unwrap_or_else(|| std::env::temp_dir().join("gomoku-settings"));
        Self {
            data_dir,
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

impl AppConfig {
    pub fn storage_dir(&self) -> PathBuf {
        self.data_dir.join("storage")
    }
}

/// 以默认值创建设置，再尝试恢复已保存的部分
pub fn open_store(cfg: &AppConfig) -> Result<SettingsStore<FileStorage>, AppError> {
    let host = HostCapabilities::detect();
    tracing::info!(
        shared_memory_threads = host.shared_memory_threads,
        parallelism = host.parallelism,
        "宿主能力"
    );
    let mut store = SettingsStore::new(
        Settings::new(&host),
        FileStorage::new(cfg.storage_dir()),
        cfg.version.clone(),
    );
    let outcome = store.load()?;
    tracing::info!(?outcome, "启动时加载设置");
    Ok(store)
}

/// 引擎实际使用的参数
pub fn derived_values(settings: &Settings) -> Result<Value, AppError> {
    let rule = settings.game_rule()?;
    Ok(json!({
        "turnTime": settings.effective_turn_time(),
        "matchTime": settings.effective_match_time(),
        "depth": settings.depth(),
        "nodes": settings.nodes(),
        "gameRule": rule.code(),
        "configProfile": settings.config_profile()?,
        "threads": settings.threads,
        "strength": settings.strength,
        "hashSize": settings.hash_size,
        "candRange": settings.cand_range,
        "nbest": settings.nbest,
        "pondering": settings.pondering,
    }))
}

/// 执行一条命令，返回要打印的 JSON
pub fn run_command<S: KeyValueStore>(
    store: &mut SettingsStore<S>,
    command: Command,
) -> Result<Value, AppError> {
    let out = match command {
        Command::Show => serde_json::to_value(store.settings())?,
        Command::Get { key } => store.value(&key)?,
        Command::Set { key, value } => {
            store.set_value(&key, parse_value(&value))?;
            store.value(&key)?
        }
        Command::SetBoard { key, value } => {
            store.set_board_style(&key, parse_value(&value))?;
            store.board_style_value(&key)?
        }
        Command::Derived => derived_values(store.settings())?,
        Command::Saved => Value::Object(store.persisted_snapshot()?),
        Command::Clear => {
            store.clear()?;
            json!({ "cleared": store.storage_key() })
        }
        Command::Key => Value::String(store.storage_key()),
    };
    Ok(out)
}
