use circulation::application::service::LibraryService;
use circulation::domain::command::Operation;
use circulation::domain::money::Amount;
use circulation::error::LibraryError;
use circulation::infrastructure::in_memory::{InMemoryItemStore, InMemoryPatronStore};
use circulation::interfaces::catalog::Catalog;
use circulation::interfaces::csv::command_reader::CommandReader;
use circulation::interfaces::csv::report_writer::ReportWriter;
use clap::{Parser, ValueEnum};
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Report {
    /// Fine balance and checked-out items per patron
    Patrons,
    /// Location, holder and hold per item
    Items,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON catalog of items, patrons and settings
    catalog: PathBuf,

    /// Circulation commands CSV file, applied in order
    commands: PathBuf,

    /// Fine per overdue item per day. Overrides the catalog setting.
    #[arg(long)]
    fine_per_day: Option<Decimal>,

    /// Which report to print once all commands have run
    #[arg(long, value_enum, default_value = "patrons")]
    report: Report,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "circulation=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(io::stderr().is_terminal()),
        )
        .init();

    let cli = Cli::parse();

    let mut catalog = Catalog::from_path(&cli.catalog).into_diagnostic()?;
    if let Some(rate) = cli.fine_per_day {
        catalog.fine_per_day = Amount::new(rate).into_diagnostic()?;
    }

    let library = catalog.into_library(
        Box::new(InMemoryItemStore::new()),
        Box::new(InMemoryPatronStore::new()),
    );
    let handle = LibraryService::spawn(library);

    // Replay commands; bad rows and refused requests are logged and skipped
    let file = File::open(&cli.commands).into_diagnostic()?;
    let reader = CommandReader::new(file);
    for command in reader.commands() {
        let operation = match command.and_then(Operation::try_from) {
            Ok(operation) => operation,
            Err(e) => {
                warn!(error = %e, "Error reading command");
                continue;
            }
        };
        match handle.execute(operation).await {
            Ok(()) | Err(LibraryError::Circulation(_)) => {}
            Err(e) => return Err(e).into_diagnostic(),
        }
    }

    let snapshot = handle.snapshot().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = ReportWriter::new(stdout.lock());
    let written = match cli.report {
        Report::Patrons => writer.write_patrons(&snapshot.patrons),
        Report::Items => writer.write_items(&snapshot.items),
    };
    written.into_diagnostic()?;

    Ok(())
}
