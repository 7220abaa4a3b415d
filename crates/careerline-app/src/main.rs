// careerline entry point.
//
// Startup sequence:
// 1. Initialize tracing (stderr; stdout may carry the JSON output)
// 2. Load config
// 3. Load records, normalize, write processed dataset + nav entries

use careerline_app::config;
use careerline_app::pipeline;

use anyhow::Context;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("careerline starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: hitters={}, pitchers={}, strict={}",
        config.data.hitters, config.data.pitchers, config.normalize.strict
    );

    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    let summary = pipeline::run(&config, &cwd)?;
    info!(
        "Processed {} hitters, {} pitchers ({} nav entries)",
        summary.hitters, summary.pitchers, summary.nav_entries
    );

    Ok(())
}

/// Initialize tracing to stderr.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("careerline=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
