mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;

fn init_tracing() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("CATALOG_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        // stdout carries the JSON envelope
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "catalog", &mut std::io::stdout());
        return Ok(());
    }

    let ctx = CliContext::load(&cli)?;

    match cli.command {
        Commands::Page(args) => handlers::page::handle(&ctx, args).await,
        Commands::Scroll(args) => handlers::scroll::handle(&ctx, args).await,
        Commands::Show(args) => handlers::show::handle(&ctx, args).await,
        Commands::Config => handlers::config::handle(&ctx),
        Commands::Completions { .. } => Ok(()),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing() {
        output::output_error(&format!("failed to open debug log: {:#}", e));
    }

    if let Err(e) = run(cli).await {
        tracing::debug!(error = ?e, "command failed");
        output::output_error(&format!("{:#}", e));
    }
}
