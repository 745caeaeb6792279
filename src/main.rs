use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use jobwatch::cli::Cli;
use jobwatch::{FileBackend, WatchLoop};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli
        .to_config(&chrono::Local::now())
        .context("invalid arguments")?;
    info!(?config, "starting");

    let backend = Arc::new(FileBackend::new(&cli.backend_file));
    let mut watcher = WatchLoop::new(config, backend.clone(), backend)?;

    let mut stdout = std::io::stdout().lock();
    tokio::select! {
        result = watcher.run(&mut stdout) => {
            result.with_context(|| format!("watching {}", cli.job_queue))?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("interrupted");
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
