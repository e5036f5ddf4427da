use anyhow::Result;
use sensor_stats::cli;

// Main entry point
fn main() -> Result<()> {
    cli::handle_calls()
}
