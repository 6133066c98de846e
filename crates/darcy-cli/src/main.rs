use clap::Parser;
use darcy_cli::{Cli, Commands, DarcyConfig};
use tracing::error;
use tracing_subscriber::FmtSubscriber;

mod commands;

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Assemble { volume, out, dense } => {
            commands::assemble::handle(volume, out.as_deref(), *dense)
        }
        Commands::Solve {
            volume,
            out,
            backend,
            overrides,
            threads,
        } => {
            let config = DarcyConfig::resolve(cli.config.as_deref())?;
            commands::solve::handle(&config, volume, out.as_deref(), *backend, overrides, threads)
        }
        Commands::Inspect { volume } => commands::inspect::handle(volume),
    }
}

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    if let Err(err) = run(&cli) {
        error!("{err:#}");
        std::process::exit(1);
    }
}
