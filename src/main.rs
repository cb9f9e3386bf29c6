mod advances;
mod assets;
mod cache;
mod catalog;
mod cli;
mod client;
mod coerce;
mod error;
mod fmt;
mod models;
mod period;
mod reports;
mod settings;
mod source;

use clap::{CommandFactory, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands, Globals};

fn init_tracing(verbose: bool) {
    let default = if verbose { "gymbios=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let globals = Globals {
        snapshot: cli.snapshot,
        api_url: cli.api_url,
    };

    let result = match cli.command {
        Commands::Init {
            data_dir,
            company,
            currency,
            token,
        } => cli::init::run(&globals, data_dir, company, currency, token),
        Commands::Report(args) => cli::report::run(&globals, args),
        Commands::Assets { as_of, output } => cli::assets::run(&globals, as_of, output),
        Commands::Advances { schedule, output } => cli::advances::run(&globals, schedule, output),
        Commands::Members { refresh, output } => cli::catalog::members(&globals, refresh, output),
        Commands::Classes { refresh, output } => cli::catalog::classes(&globals, refresh, output),
        Commands::Status => {
            cli::status::run();
            Ok(())
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "gymbios", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
