use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};
use tokio::task;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};

#[allow(dead_code)]
pub struct LoggerGuard(WorkerGuard);

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

fn normalize_level(level: &str) -> &'static str {
    let lowered = level.trim().to_ascii_lowercase();
    LEVELS
        .iter()
        .copied()
        .find(|l| *l == lowered)
        .unwrap_or("info")
}

/// Install file + console logging.
///
/// The console layer writes to stderr; stdout belongs to the rendered views.
/// Must be called from inside a tokio runtime (spawns the cleanup task).
pub fn init_logging(
    log_dir: impl AsRef<Path>,
    prefix: &str,
    level: &str,
    retention_days: u64,
) -> anyhow::Result<LoggerGuard> {
    let log_dir = log_dir.as_ref().to_path_buf();
    let normalized = normalize_level(level);

    let builder = EnvFilter::builder().with_default_directive(normalized.parse()?);

    let rust_log = std::env::var("RUST_LOG").unwrap_or_default();
    let console_filter = builder.clone().parse_lossy(&rust_log);
    let file_filter = builder.parse_lossy(&rust_log);

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(&log_dir)
        .map_err(|e| anyhow::anyhow!("Failed to create log appender in '{}': {}", log_dir.display(), e))?;
    let (non_blocking, guard) = NonBlocking::new(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(file_filter);
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_filter(console_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    if !level.trim().eq_ignore_ascii_case(normalized) {
        tracing::warn!("Invalid log level '{}', defaulting to '{}'", level, normalized);
    }

    let max_age = Duration::from_secs(60 * 60 * 24 * retention_days.max(1));
    start_log_cleanup_task(log_dir, prefix.to_string(), max_age);

    Ok(LoggerGuard(guard))
}

fn start_log_cleanup_task(log_dir: PathBuf, prefix: String, max_age: Duration) {
    const CLEANUP_INTERVAL: Duration = Duration::from_secs(60 * 60);

    task::spawn(async move {
        loop {
            if let Err(e) = cleanup_old_logs(&log_dir, &prefix, max_age, SystemTime::now()) {
                tracing::warn!("Failed to delete old log file: {}", e);
            }
            tokio::time::sleep(CLEANUP_INTERVAL).await;
        }
    });
}

fn cleanup_old_logs(log_dir: &Path, prefix: &str, max_age: Duration, now: SystemTime) -> std::io::Result<usize> {
    let mut removed = 0;

    for entry in fs::read_dir(log_dir)? {
        let entry = entry?;
        let path = entry.path();

        if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
            if file_name.starts_with(prefix) && file_name.ends_with(".log") {
                let metadata = fs::metadata(&path)?;
                if let Ok(modified) = metadata.modified() {
                    if now.duration_since(modified).unwrap_or_default() > max_age {
                        fs::remove_file(&path)?;
                        removed += 1;
                        tracing::info!("Old log file deleted: {}", file_name);
                    }
                }
            }
        }
    }
    Ok(removed)
}
