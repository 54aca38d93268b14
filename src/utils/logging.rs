//! Система логирования с настройкой уровней через переменные окружения
//! Использует env_logger для гибкого управления логами

use env_logger::Env;

/// Инициализация системы логирования
///
/// Уровень берется из `RUST_LOG`, по умолчанию `info`:
/// ```bash
/// # Каждый запрос к API
/// RUST_LOG=cn_roundtrip::api=debug cargo run --bin roundtrip_sweep
/// ```
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .format_module_path(true)
        .format_target(false)
        .try_init();

    log::debug!("📝 Уровень логирования: {}", get_log_level());
}

/// Получить текущий уровень логирования
pub fn get_log_level() -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
}
