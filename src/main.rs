use chrono::Local;
use match_tables::{info_time, process::process_site, Result, LOG_FILTER};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::new(LOG_FILTER))
        .init();

    let start_time = Local::now();
    let summary = process_site().await?;
    info_time!(
        start_time,
        "All done: {} matches written, {} pages failed",
        summary.matches.len(),
        summary.failed_urls.len()
    );

    Ok(())
}
