use clap::Parser;
use color_eyre::Result;
use es_index_memory::{
    init_errors,
    init_logging,
    Args,
    Config,
    ElasticsearchCollector,
    StatsReporter,
};
use eyre::Context as _;
use std::process::ExitCode;
use tracing::{
    debug,
    error,
    info,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(err) = init_errors().and_then(|_| init_logging(args.verbose)) {
        eprintln!("failed to initialize logging: {err:#}");
        return ExitCode::FAILURE;
    }

    match run(&args).await {
        Ok(()) => {
            info!("exited");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("exited with error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<()> {
    let config = Config::new(args).wrap_err("Loading configuration failed")?;
    debug!(url = %config.url, top = config.top, "Loaded configuration");

    let collector = ElasticsearchCollector::connect(&config.url)?;
    let report = StatsReporter::new(config.top).report(&collector).await?;
    debug!(fetched_at = %report.fetched_at, indices = report.entries.len(), "Fetched index stats");

    for line in report.lines() {
        info!("{line}");
    }

    Ok(())
}
