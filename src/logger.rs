use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 日志级别取自 `RUST_LOG`，默认为 `info`。重复调用是安全的（测试中会多次调用）。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
