/// Install a global `tracing` subscriber for demos and tests.
///
/// Respects `RUST_LOG` when set; idempotent so test binaries can call it
/// from multiple entry points.
pub fn init() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .ok();
}
