//! 바이너리 공용 로그 초기화.

use tracing_subscriber::{fmt, EnvFilter};

/// `RUST_LOG`가 없으면 `default_directive` 수준으로 stderr 에 로그를 남긴다.
/// 두 번 호출해도 무해하다.
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
