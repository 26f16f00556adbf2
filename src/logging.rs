use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_FILE: &str = "gomoku-settings.log";

/// 持有后台写线程，drop 时刷新日志
pub struct LogGuard(#[allow(dead_code)] Option<WorkerGuard>);

#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub dir: Option<PathBuf>,
    pub filter: Option<String>,
    /// 同时输出到 stderr
    pub stderr: bool,
}

fn build_filter(filter: Option<String>) -> EnvFilter {
    match filter {
        Some(s) if !s.trim().is_empty() => EnvFilter::new(s),
        _ => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    }
}

/// 依次尝试配置目录、`{data_dir}/logs`；都不可写时返回 None，只输出到 stderr
fn resolve_log_dir(data_dir: &Path, configured: Option<PathBuf>) -> Option<PathBuf> {
    configured
        .into_iter()
        .chain([data_dir.join("logs")])
        .find(|dir| fs::create_dir_all(dir).is_ok())
}

pub fn init(data_dir: &Path, cfg: LogConfig) -> LogGuard {
    let log_dir = resolve_log_dir(data_dir, cfg.dir);

    let (file_layer, guard) = match &log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };
    let stderr_layer = (cfg.stderr || log_dir.is_none())
        .then(|| fmt::layer().with_target(false).with_writer(std::io::stderr));

    let _ = tracing_subscriber::registry()
        .with(build_filter(cfg.filter))
        .with(file_layer)
        .with(stderr_layer)
        .try_init();

    match &log_dir {
        Some(dir) => tracing::debug!(log_dir = %dir.display(), "tracing 已初始化"),
        None => tracing::warn!("日志目录不可用，仅输出到 stderr"),
    }
    LogGuard(guard)
}
