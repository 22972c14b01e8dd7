use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ustva::{Config, Period, Result, elster, jes};

#[derive(Parser, Debug)]
#[command(
    name = "ustva",
    version,
    about = "Create an Elster UStVA XML document from a JES bookkeeping export"
)]
struct Cli {
    /// JES export (.jes archive)
    jes_file: PathBuf,

    /// Reporting period: month "1".."12", month range "1-3" or quarter "Q1".."Q4"
    period: Period,

    /// Configuration file with tax number, name, address and contact
    #[arg(short = 'c', long = "config", default_value = "ustva.json")]
    config: PathBuf,

    /// Output file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Log every contributing payment to stderr
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "ustva=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ustva: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::from_file(&cli.config)?;
    let ledger = jes::read_jes_file(&cli.jes_file)?;
    info!(
        receipts = ledger.receipts.len(),
        year = ledger.year(),
        period = %cli.period,
        "ledger loaded"
    );

    let today = chrono::Local::now().date_naive();
    let anmeldung = elster::build_declaration(&config, &ledger, cli.period, today)?;
    let bytes = elster::to_xml_bytes(&anmeldung)?;

    match &cli.output {
        Some(path) => fs::write(path, &bytes)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
