use clap::Parser;
use tracing_subscriber::EnvFilter;

use cineshelf_designer_cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    // Quiet by default; `RUST_LOG=debug` shows load and edit details.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = run(cli)?;
    print!("{}", output);
    Ok(())
}
