// End-to-end tests: CSV fixture -> SQLite store -> observations -> ledger -> CSV.

use std::fs::File;

use countbook_core::discipline::DisciplineSummary;
use countbook_core::pitch_mix::{PitchMix, Verdict};
use countbook_core::plate_appearance::summarize_plate_appearances;
use countbook_core::stats::HittingLine;
use countbook_core::{CountType, ExportOrder, PitchObservation, TendencyLedger, TendencyRow};
use countbook_store::{write_csv, PitchDatabase, PlayerFilter};

const FIXTURE: &str = "tests/fixtures/pitches.csv";

fn loaded_db() -> PitchDatabase {
    let mut db = PitchDatabase::open(":memory:").expect("in-memory database should open");
    let file = File::open(FIXTURE).expect("fixture should exist");
    let report = db.import_csv(file, FIXTURE).expect("import should succeed");
    assert_eq!(report.rows_imported, 14);
    assert_eq!(report.rows_skipped, 0);
    db
}

fn observations(db: &PitchDatabase, filter: PlayerFilter) -> Vec<PitchObservation> {
    db.load_pitches(&filter)
        .unwrap()
        .into_iter()
        .map(|raw| PitchObservation::try_from(raw).unwrap())
        .collect()
}

#[test]
fn batter_tendencies_from_fixture() {
    let db = loaded_db();
    let pitches = observations(&db, PlayerFilter::Batter("Caulfield, Garen".into()));
    assert_eq!(pitches.len(), 11);

    let mut ledger = TendencyLedger::new();
    ledger.add_all(pitches);
    assert_eq!(ledger.len(), 11);

    assert_eq!(
        ledger.count_types_in_order(),
        &[
            CountType::ZeroZero,
            CountType::Neutral,
            CountType::HittersCount,
            CountType::Full
        ]
    );
    assert_eq!(ledger.get_observations(CountType::ZeroZero).len(), 4);
    assert_eq!(ledger.get_observations(CountType::HittersCount).len(), 3);
    assert!(ledger.get_observations(CountType::PitchersCount).is_empty());

    let zero_zero = ledger.summarize(CountType::ZeroZero);
    assert_eq!(zero_zero.pitch_type_count("Fastball"), 2);
    assert_eq!(zero_zero.pitch_type_count("ChangeUp"), 1);
    assert_eq!(zero_zero.pitch_type_count("Cutter"), 1);

    let mut arrival = Vec::new();
    write_csv(&ledger.rows(ExportOrder::Arrival), TendencyRow::HEADERS, &mut arrival).unwrap();
    let arrival = String::from_utf8(arrival).unwrap();
    assert_eq!(arrival.lines().count(), 12);
    assert!(arrival.lines().nth(3).unwrap().starts_with("Neutral Count,Fastball,Single,LineDrive"));

    let grouped = ledger.rows(ExportOrder::Grouped);
    assert_eq!(grouped.len(), 11);
    assert!(grouped[..4].iter().all(|r| r.count_type == "0-0 Count"));
}

#[test]
fn batter_reports_from_fixture() {
    let db = loaded_db();
    let pitches = observations(&db, PlayerFilter::Batter("Caulfield, Garen".into()));

    let line = HittingLine::from_pitches(&pitches);
    assert_eq!(line.games, 2);
    assert_eq!(line.plate_appearances, 4);
    assert_eq!(line.at_bats, 3);
    assert_eq!(line.hits, 2);
    assert_eq!(line.walks, 1);
    assert!((line.slugging - 5.0 / 3.0).abs() < 1e-9);

    let pas = summarize_plate_appearances(&pitches);
    let totals: Vec<u32> = pas.iter().map(|pa| pa.total_pitches).collect();
    assert_eq!(totals, vec![3, 6, 1, 1]);
    assert_eq!(pas[1].result.as_deref(), Some("Walk"));

    let discipline = DisciplineSummary::from_pitches(&pitches);
    assert_eq!(discipline.overall.pitches, 11);
    assert_eq!(discipline.overall.swings, 4);
}

#[test]
fn pitcher_mix_from_fixture() {
    let db = loaded_db();
    let pitches = observations(&db, PlayerFilter::Pitcher("Berg, Jack".into()));
    assert_eq!(pitches.len(), 12);

    let mix = PitchMix::from_pitches(&pitches);
    assert_eq!(mix.games, 1);
    assert_eq!(mix.at_bats, 2);
    assert_eq!(mix.hits, 1);
    assert_eq!(mix.verdict, Verdict::BelowAverage);

    let top = mix.by_hits_allowed();
    assert_eq!(top[0].pitch_type.as_deref(), Some("Fastball"));
    assert_eq!(top[0].hits, 1);
}
