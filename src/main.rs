use clap::Parser;
use gomoku_settings::app::{self, AppConfig};
use gomoku_settings::cli::{Cli, Command};
use gomoku_settings::error::AppError;
use gomoku_settings::logging;

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let mut cfg = AppConfig::default();
    if let Some(v) = cli.data_dir.clone() {
        cfg.data_dir = v;
    }
    if let Some(v) = cli.app_version.clone() {
        cfg.version = v;
    }

    let _log_guard = logging::init(
        &cfg.data_dir,
        logging::LogConfig {
            dir: cli.log_dir.clone(),
            filter: cli.log_filter.clone(),
            stderr: cli.verbose,
        },
    );
    tracing::info!(data_dir = %cfg.data_dir.display(), version = %cfg.version, "gomoku-settings 启动");

    let mut store = app::open_store(&cfg)?;
    let out = app::run_command(&mut store, cli.command.unwrap_or(Command::Show))?;
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
