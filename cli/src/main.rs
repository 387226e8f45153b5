mod commands;
mod terminal;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use commands::CommandLine;
use pingrid_common::catalog::HostCatalog;
use pingrid_common::dialect::CommandDialect;
use pingrid_core::diagnostics::CommandRunner;
use pingrid_core::orchestrator::Orchestrator;
use terminal::grid::GridRenderer;
use terminal::{logging, print};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    logging::init(commands.verbose);

    let cfg = commands.config();
    let hosts = HostCatalog::new(cfg.hosts_file.clone())
        .load()
        .context("loading host list")?;

    let dialect = CommandDialect::detect(&cfg);
    info!(
        "probing {} hosts with `{}` and `{}`",
        hosts.len(),
        dialect.reachability,
        dialect.path_trace
    );

    let orchestrator = Orchestrator::new(
        Arc::new(CommandRunner::new(dialect)),
        Box::new(GridRenderer::stdout(cfg.columns)),
    );

    let start_time: Instant = Instant::now();
    logging::hold();
    let outcome = orchestrator.run(hosts).await;
    logging::release();
    let table = outcome.context("running diagnostics")?;

    print::header("diagnostics complete");
    print::summary(&table, start_time.elapsed());
    Ok(())
}
