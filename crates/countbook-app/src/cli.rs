// Command-line interface.

use clap::{Parser, Subcommand};
use countbook_core::ExportOrder;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "countbook", version, about = "Count-type tendency reports for pitch tracking data")]
pub struct Cli {
    /// SQLite database to use instead of the configured one.
    #[arg(long, global = true)]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load a tracking CSV into the database, replacing stored pitches.
    Import {
        csv: PathBuf,
    },
    /// Pitch tendencies by count type for a batter.
    Tendencies {
        #[arg(long)]
        batter: String,
        /// Row order for the CSV export: arrival or grouped.
        #[arg(long)]
        order: Option<ExportOrder>,
        /// Write the flat rows to this CSV file.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print the plain-text report instead of JSON summaries.
        #[arg(long)]
        text: bool,
    },
    /// Overall pitch-type distribution seen by a batter.
    PitchTypes {
        #[arg(long)]
        batter: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Hitting line (AVG/OBP/SLG) for a batter.
    Stats {
        #[arg(long)]
        batter: String,
    },
    /// One row per plate appearance for a batter.
    PlateAppearances {
        #[arg(long)]
        batter: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Pitch-type effectiveness for a pitcher.
    PitchMix {
        #[arg(long)]
        pitcher: String,
    },
    /// Swing, whiff and chase rates by count type for a batter.
    Discipline {
        #[arg(long)]
        batter: String,
    },
}
