//! Command line configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// What the binary prints to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Balances followed by the settlement plan, as csv.
    Csv,
    /// Full trip export as pretty JSON.
    Json,
    /// The admitted expenses, as csv.
    Expenses,
}

#[derive(Parser, Debug)]
#[command(name = "settle-eng")]
#[command(about = "Split shared trip expenses and plan who pays whom")]
pub struct Cli {
    /// Expenses csv: id,date,description,amount,paid_by,split_between,category
    pub expenses: PathBuf,

    /// Roster csv: id,name,color
    #[arg(long, env = "SETTLE_PEOPLE")]
    pub people: PathBuf,

    #[arg(long, value_enum, env = "SETTLE_FORMAT", default_value = "csv")]
    pub format: OutputFormat,

    /// Display-only multiplier applied to printed csv amounts.
    #[arg(long, env = "SETTLE_DISPLAY_RATE", default_value_t = 1.0)]
    pub rate: f64,
}
