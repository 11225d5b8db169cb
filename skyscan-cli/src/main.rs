use clap::Parser;
use skyscan_cli::{args::Cli, error::CliError, run};
use skyscan_store::app_config::Config;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "skyscan_cli=warn,skyscan_store=warn,skyscan_results=warn",
        1 => "skyscan_cli=info,skyscan_store=info,skyscan_results=info",
        _ => "skyscan_cli=debug,skyscan_store=debug,skyscan_results=debug",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => return report(CliError::Config(e.to_string())),
    };

    match run(cli, config).await {
        Ok(output) => {
            print!("{}", output.rendered);
            if output.search_failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => report(e),
    }
}

fn report(err: CliError) -> ExitCode {
    eprintln!("error: {}", err);
    err.exit_code()
}
