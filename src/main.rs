use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use tracker::commands::Cli;

fn main() -> anyhow::Result<()> {
    let filter = if std::env::var("TRACKER_DEBUG").is_ok() {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    Cli::menu()
}
