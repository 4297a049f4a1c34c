// End-to-end command tests: import the shared tracking fixture, then run
// each report command against it through the library API.

use std::fs;
use std::path::{Path, PathBuf};

use countbook_app::app;
use countbook_app::cli::{Cli, Command};
use countbook_app::config::{Config, ExportConfig, LoggingConfig};
use countbook_core::ExportOrder;
use countbook_store::PitchDatabase;

use clap::Parser;

/// Tracking fixture shared with the store crate (cwd is this crate's root).
const FIXTURE: &str = "../countbook-store/tests/fixtures/pitches.csv";

const CAULFIELD: &str = "Caulfield, Garen";

// ===========================================================================
// Test helpers
// ===========================================================================

fn scratch_config(name: &str, order: ExportOrder) -> Config {
    let dir = std::env::temp_dir().join(name);
    let _ = fs::remove_dir_all(&dir);
    Config {
        db_path: ":memory:".into(),
        export: ExportConfig {
            dir: dir.join("reports").display().to_string(),
            order,
        },
        logging: LoggingConfig {
            dir: dir.join("logs").display().to_string(),
            filter: "warn".into(),
        },
    }
}

fn imported_db(config: &Config) -> PitchDatabase {
    let mut db = PitchDatabase::open(&config.db_path).unwrap();
    let cli = Cli::try_parse_from(["countbook", "import", FIXTURE]).unwrap();
    let msg = app::run(cli.command, &mut db, config).unwrap();
    assert!(msg.starts_with("Imported 14 pitches (0 skipped)"), "{msg}");
    db
}

fn read_export(config: &Config, name: &str) -> String {
    fs::read_to_string(Path::new(&config.export.dir).join(name)).unwrap()
}

// ===========================================================================
// Tests
// ===========================================================================

#[test]
fn configured_grouped_order_applies_without_flag() {
    let config = scratch_config("countbook_cmd_grouped", ExportOrder::Grouped);
    let mut db = imported_db(&config);

    let cli = Cli::try_parse_from([
        "countbook",
        "tendencies",
        "--batter",
        CAULFIELD,
        "--out",
        "grouped.csv",
    ])
    .unwrap();
    app::run(cli.command, &mut db, &config).unwrap();

    let csv = read_export(&config, "grouped.csv");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 12);
    assert!(lines[1].starts_with("0-0 Count,Fastball,Undefined"));
    assert_eq!(
        lines[4],
        "0-0 Count,Cutter,Out,GroundBall,InPlay,30.0,28.0,55.0,2.1,0.6,First Base"
    );
    assert!(lines[5].starts_with("Neutral Count,Slider"));
    assert!(lines[11].starts_with("Full Count,Slider"));
}

#[test]
fn order_flag_overrides_config() {
    let config = scratch_config("countbook_cmd_arrival", ExportOrder::Grouped);
    let mut db = imported_db(&config);

    let command = Command::Tendencies {
        batter: CAULFIELD.into(),
        order: Some(ExportOrder::Arrival),
        out: Some(PathBuf::from("arrival.csv")),
        text: false,
    };
    app::run(command, &mut db, &config).unwrap();

    let csv = read_export(&config, "arrival.csv");
    let lines: Vec<&str> = csv.lines().collect();
    assert!(lines[2].starts_with("Neutral Count,Slider"));
    assert!(lines[4].starts_with("0-0 Count,ChangeUp"));
}

#[test]
fn plate_appearance_export() {
    let config = scratch_config("countbook_cmd_pa", ExportOrder::Arrival);
    let mut db = imported_db(&config);

    let command = Command::PlateAppearances {
        batter: CAULFIELD.into(),
        out: Some(PathBuf::from("pa.csv")),
    };
    let json = app::run(command, &mut db, &config).unwrap();
    let summaries: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(summaries.as_array().unwrap().len(), 4);
    assert_eq!(summaries[1]["result"], "Walk");

    let csv = read_export(&config, "pa.csv");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "sequence,batter,total_pitches,balls,strikes,result,hit_type"
    );
    assert_eq!(lines[1], "1,\"Caulfield, Garen\",3,1,1,Single,LineDrive");
}

#[test]
fn reimport_replaces_previous_pitches() {
    let config = scratch_config("countbook_cmd_reimport", ExportOrder::Arrival);
    let mut db = imported_db(&config);
    let cli = Cli::try_parse_from(["countbook", "import", FIXTURE]).unwrap();
    app::run(cli.command, &mut db, &config).unwrap();
    assert_eq!(db.pitch_count().unwrap(), 14);
}

#[test]
fn missing_csv_is_an_error() {
    let config = scratch_config("countbook_cmd_missing", ExportOrder::Arrival);
    let mut db = PitchDatabase::open(&config.db_path).unwrap();
    let command = Command::Import {
        csv: PathBuf::from("no/such/file.csv"),
    };
    let err = app::run(command, &mut db, &config).unwrap_err();
    assert!(err.to_string().contains("failed to open"));
}

#[test]
fn pitch_type_distribution_export() {
    let config = scratch_config("countbook_cmd_pitch_types", ExportOrder::Arrival);
    let mut db = imported_db(&config);

    let cli = Cli::try_parse_from([
        "countbook",
        "pitch-types",
        "--batter",
        CAULFIELD,
        "--out",
        "types.csv",
    ])
    .unwrap();
    let json = app::run(cli.command, &mut db, &config).unwrap();
    let shares: serde_json::Value = serde_json::from_str(&json).unwrap();
    let totals: Vec<(&str, u64)> = shares
        .as_array()
        .unwrap()
        .iter()
        .map(|s| {
            (
                s["TaggedPitchType"].as_str().unwrap(),
                s["Total"].as_u64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        totals,
        vec![("Fastball", 6), ("Slider", 3), ("ChangeUp", 1), ("Cutter", 1)]
    );

    let csv = read_export(&config, "types.csv");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "TaggedPitchType,Total,Percentage");
    assert_eq!(lines.len(), 5);
}

#[test]
fn empty_plate_appearance_export_has_header() {
    let config = scratch_config("countbook_cmd_pa_empty", ExportOrder::Arrival);
    let mut db = imported_db(&config);

    let command = Command::PlateAppearances {
        batter: "Nobody, Known".into(),
        out: Some(PathBuf::from("none.csv")),
    };
    app::run(command, &mut db, &config).unwrap();

    let csv = read_export(&config, "none.csv");
    assert_eq!(
        csv.trim_end(),
        "sequence,batter,total_pitches,balls,strikes,result,hit_type"
    );
}
