//! Waypoint TUI entry point.
//!
//! # Usage
//!
//! ```bash
//! # Default home in downtown Toronto, logs discarded
//! waypoint-tui
//!
//! # Elsewhere, with flaky services and a debug log
//! waypoint-tui --lat 45.5017 --lon -73.5673 --failure-rate 0.2 \
//!     --log-file waypoint.log --log-level debug
//! ```

use clap::Parser;
use waypoint_app::{App, Runtime};
use waypoint_tui::{Args, MapsLink, TerminalDriver};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    args.init_logging()?;

    let config = args.home_config()?;
    let bridge = args.services()?.bridge_with(MapsLink);

    tracing::info!(
        lat = config.home().lat(),
        lon = config.home().lon(),
        span_meters = config.span_meters(),
        seed = args.seed,
        failure_rate = args.failure_rate,
        "Waypoint starting"
    );

    let driver = TerminalDriver::new()?;
    let app = Runtime::new(driver, App::new(config), bridge).run().await?;

    tracing::info!(results = app.search().results().len(), "Waypoint stopped");
    Ok(())
}
