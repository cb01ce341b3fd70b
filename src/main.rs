use std::io::{self, Write};
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use settle_eng::{Ledger, plan_settlements};
use settle_eng::config::{Cli, OutputFormat};
use settle_eng::csv::{
    read_expenses, read_participants, write_balances, write_expenses, write_settlements,
};
use settle_eng::export::TripExport;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.expenses.extension().is_none_or(|ext| ext != "csv") {
        warn!(path = %cli.expenses.display(), "input file seems to not be a csv file");
    }

    let mut ledger = Ledger::new(read_participants(&cli.people)?)?;
    let expenses = read_expenses(cli.expenses.clone())?;
    let (expense_sender, expense_receiver) = tokio::sync::mpsc::channel(16);

    let reader = tokio::spawn(async move {
        for result in expenses {
            match result {
                Ok(expense) => {
                    if expense_sender.send(expense).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("{e}");
                }
            }
        }
    });

    ledger.run(ReceiverStream::new(expense_receiver)).await;
    reader.await?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Csv => {
            let balances = ledger.balances();
            write_balances(&mut out, &ledger, &balances, cli.rate)?;
            writeln!(out)?;
            let settlements = plan_settlements(&balances);
            write_settlements(&mut out, &ledger, &settlements, cli.rate)?;
        }
        OutputFormat::Json => {
            TripExport::new(&ledger, Utc::now()).write(&mut out)?;
            writeln!(out)?;
        }
        OutputFormat::Expenses => write_expenses(&mut out, &ledger, cli.rate)?,
    }

    Ok(())
}
