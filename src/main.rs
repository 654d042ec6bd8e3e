use anyhow::Result;
use clap::Parser;
use privat_rates::cli::OutputFormat;
use privat_rates::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Number of past days to fetch, today included (at most 10)
    #[arg(allow_negative_numbers = true)]
    days: i64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long)]
    config_path: Option<String>,

    /// Abort when a response lacks a requested currency
    #[arg(short, long)]
    strict: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

impl From<Cli> for privat_rates::RunOptions {
    fn from(cli: Cli) -> privat_rates::RunOptions {
        privat_rates::RunOptions {
            days: cli.days,
            config_path: cli.config_path,
            strict: cli.strict,
            format: cli.format,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = privat_rates::run(&cli.into()).await;

    match &result {
        Ok(output) => println!("{output}"),
        Err(e) => tracing::error!(error = %e, "Application failed"),
    }
    result.map(|_| ())
}
