// Command dispatch: load pitches, run the tendency engine, render output.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use countbook_core::discipline::DisciplineSummary;
use countbook_core::pitch_mix::PitchMix;
use countbook_core::plate_appearance::{summarize_plate_appearances, PlateAppearanceSummary};
use countbook_core::stats::HittingLine;
use countbook_core::{
    pitch_type_distribution, PitchObservation, PitchTypeShare, TendencyLedger, TendencyRow,
};
use countbook_store::{write_csv_file, PitchDatabase, PlayerFilter};
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::Command;
use crate::config::Config;

/// Load pitches for `filter` and convert them to observations, in arrival
/// order. Rows whose counts are not whole numbers are rejected and logged.
pub fn load_observations(db: &PitchDatabase, filter: &PlayerFilter) -> Result<Vec<PitchObservation>> {
    let raw = db.load_pitches(filter)?;
    let total = raw.len();
    let mut observations = Vec::with_capacity(total);
    for (idx, row) in raw.into_iter().enumerate() {
        match PitchObservation::try_from(row) {
            Ok(obs) => observations.push(obs),
            Err(e) => warn!("rejecting pitch {} for {:?}: {}", idx + 1, filter, e),
        }
    }
    info!(
        "loaded {} of {} pitches for {:?}",
        observations.len(),
        total,
        filter
    );
    Ok(observations)
}

/// Feed observations through a fresh ledger.
pub fn build_ledger(observations: Vec<PitchObservation>) -> TendencyLedger {
    let mut ledger = TendencyLedger::new();
    ledger.add_all(observations);
    info!(
        "ledger holds {} pitches across {} count types",
        ledger.len(),
        ledger.count_types_in_order().len()
    );
    ledger
}

/// Place a bare file name under the export directory; keep any other path.
pub fn resolve_out_path(export_dir: &str, out: &Path) -> Result<PathBuf> {
    let bare = out.parent().map_or(true, |p| p.as_os_str().is_empty());
    if !bare {
        return Ok(out.to_path_buf());
    }
    std::fs::create_dir_all(export_dir)
        .with_context(|| format!("failed to create export directory {export_dir}"))?;
    Ok(Path::new(export_dir).join(out))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize report")
}

/// Run one command and return what should be printed.
pub fn run(command: Command, db: &mut PitchDatabase, config: &Config) -> Result<String> {
    match command {
        Command::Import { csv } => {
            let file = File::open(&csv)
                .with_context(|| format!("failed to open {}", csv.display()))?;
            let report = db.import_csv(file, &csv.display().to_string())?;
            Ok(format!(
                "Imported {} pitches ({} skipped) as {}",
                report.rows_imported, report.rows_skipped, report.import_id
            ))
        }
        Command::Tendencies {
            batter,
            order,
            out,
            text,
        } => {
            let observations = load_observations(db, &PlayerFilter::Batter(batter))?;
            let ledger = build_ledger(observations);
            if let Some(out) = out {
                let path = resolve_out_path(&config.export.dir, &out)?;
                let rows = ledger.rows(order.unwrap_or(config.export.order));
                write_csv_file(&rows, TendencyRow::HEADERS, &path)?;
            }
            if text {
                Ok(ledger.to_string())
            } else {
                to_json(&ledger.summaries())
            }
        }
        Command::PitchTypes { batter, out } => {
            let observations = load_observations(db, &PlayerFilter::Batter(batter))?;
            let shares = pitch_type_distribution(&observations);
            if let Some(out) = out {
                let path = resolve_out_path(&config.export.dir, &out)?;
                write_csv_file(&shares, PitchTypeShare::HEADERS, &path)?;
            }
            to_json(&shares)
        }
        Command::Stats { batter } => {
            let observations = load_observations(db, &PlayerFilter::Batter(batter))?;
            to_json(&HittingLine::from_pitches(&observations))
        }
        Command::PlateAppearances { batter, out } => {
            let observations = load_observations(db, &PlayerFilter::Batter(batter))?;
            let summaries = summarize_plate_appearances(&observations);
            if let Some(out) = out {
                let path = resolve_out_path(&config.export.dir, &out)?;
                write_csv_file(&summaries, PlateAppearanceSummary::HEADERS, &path)?;
            }
            to_json(&summaries)
        }
        Command::PitchMix { pitcher } => {
            let observations = load_observations(db, &PlayerFilter::Pitcher(pitcher))?;
            let mix = PitchMix::from_pitches(&observations);
            let mut out = to_json(&mix)?;
            out.push('\n');
            out.push_str(mix.verdict.describe());
            Ok(out)
        }
        Command::Discipline { batter } => {
            let observations = load_observations(db, &PlayerFilter::Batter(batter))?;
            to_json(&DisciplineSummary::from_pitches(&observations))
        }
    }
}
