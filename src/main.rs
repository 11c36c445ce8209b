use clap::Parser;

use oddsync::cli::{cache, check, output, run, Cli, Commands};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    if let Err(e) = dispatch(&cli).await {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn dispatch(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Run(args) => run::execute(cli, args).await?,
        Commands::ClearCache => cache::execute(&cli.config).await?,
        Commands::CheckConfig => check::execute(&cli.config)?,
    }
    Ok(())
}
