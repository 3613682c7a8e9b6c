use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_FILTER: &str = "info,sqlx=warn,sea_orm=warn";

/// Каталог логов: рядом с исполняемым файлом, иначе target/logs
fn log_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("logs")))
        .unwrap_or_else(|| Path::new("target").join("logs"))
}

/// Инициализация системы трассировки (tracing)
///
/// Логи пишутся в:
/// - stdout (с цветами)
/// - logs/backend.log рядом с exe (без цветов)
///
/// Фильтр берётся из RUST_LOG, по умолчанию `info,sqlx=warn,sea_orm=warn`.
pub fn initialize() -> anyhow::Result<()> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir)
        .map_err(|e| anyhow::anyhow!("Cannot create log directory {}: {}", dir.display(), e))?;

    let log_file_path = dir.join("backend.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)
        .map_err(|e| anyhow::anyhow!("Cannot open log file {}: {}", log_file_path.display(), e))?;

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.into());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&filter))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    tracing::info!(
        log_file = %log_file_path.display(),
        filter = %filter,
        "Tracing initialized"
    );
    Ok(())
}
