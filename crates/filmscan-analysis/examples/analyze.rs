//! Analyze a video file and print the report as JSON.
//!
//! Usage: `cargo run --example analyze -- /path/to/movie.mp4`

use filmscan_analysis::analyze_video;
use filmscan_models::AnalysisConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: analyze <video-file>"))?;

    let report = analyze_video(&path, AnalysisConfig::default()).await?;
    println!("{}", report.to_json()?);
    Ok(())
}
