use tracing_subscriber::EnvFilter;

/// stderr로 출력하는 tracing 구독자를 설치한다.
///
/// `RUST_LOG`가 설정되어 있으면 그것을, 아니면 `default_filter`를 쓴다.
/// 이미 설치된 경우 아무 일도 하지 않는다.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
