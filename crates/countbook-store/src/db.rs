// SQLite store for pitch-level tracking data.

use std::io::Read;

use anyhow::{Context, Result};
use countbook_core::RawPitch;
use rusqlite::{params, Connection, Row};
use tracing::{info, warn};

/// Which pitches to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerFilter {
    Batter(String),
    Pitcher(String),
    All,
}

/// Outcome of a CSV import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub import_id: String,
    pub rows_imported: usize,
    pub rows_skipped: usize,
}

/// A previously recorded import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRecord {
    pub import_id: String,
    pub source: String,
    pub rows: usize,
    pub skipped: usize,
    pub timestamp: String,
}

const PITCH_COLUMNS: &str = "batter, pitcher, game_id, pitch_of_pa, balls, strikes, pitch_type, \
     pitch_call, play_result, hit_type, korbb, angle, direction, distance, plate_loc_height, \
     plate_loc_side, exit_speed, rel_speed";

/// SQLite-backed store of pitches in arrival order.
pub struct PitchDatabase {
    conn: Connection,
}

impl PitchDatabase {
    /// Open (or create) a SQLite database at `path` and ensure all tables
    /// exist. Pass `":memory:"` for an ephemeral in-memory database.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )
        .context("failed to set database pragmas")?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS pitches (
                id               INTEGER PRIMARY KEY AUTOINCREMENT,
                import_id        TEXT NOT NULL,
                batter           TEXT,
                pitcher          TEXT,
                game_id          TEXT,
                pitch_of_pa      REAL,
                balls            REAL,
                strikes          REAL,
                pitch_type       TEXT,
                pitch_call       TEXT,
                play_result      TEXT,
                hit_type         TEXT,
                korbb            TEXT,
                angle            REAL,
                direction        REAL,
                distance         REAL,
                plate_loc_height REAL,
                plate_loc_side   REAL,
                exit_speed       REAL,
                rel_speed        REAL
            );

            CREATE TABLE IF NOT EXISTS imports (
                import_id TEXT PRIMARY KEY,
                source    TEXT NOT NULL,
                rows      INTEGER NOT NULL,
                skipped   INTEGER NOT NULL,
                timestamp TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            );

            CREATE INDEX IF NOT EXISTS idx_pitches_batter ON pitches(batter);
            CREATE INDEX IF NOT EXISTS idx_pitches_pitcher ON pitches(pitcher);
            ",
        )
        .context("failed to create database schema")?;

        Ok(Self { conn })
    }

    /// Generate an import ID from the current timestamp.
    pub fn generate_import_id() -> String {
        let now = chrono::Utc::now();
        now.format("import_%Y%m%d_%H%M%S_%3f").to_string()
    }

    /// Load a tracking CSV, replacing every stored pitch, in one transaction.
    ///
    /// Rows that fail to deserialize are skipped with a warning. Columns the
    /// store does not keep are ignored.
    pub fn import_csv<R: Read>(&mut self, rdr: R, source: &str) -> Result<ImportReport> {
        let import_id = Self::generate_import_id();
        let mut reader = csv::Reader::from_reader(rdr);

        let tx = self
            .conn
            .transaction()
            .context("failed to begin import transaction")?;
        tx.execute("DELETE FROM pitches", [])
            .context("failed to clear previous pitches")?;

        let mut rows_imported = 0usize;
        let mut rows_skipped = 0usize;
        {
            let mut stmt = tx
                .prepare(&format!(
                    "INSERT INTO pitches (import_id, {PITCH_COLUMNS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)"
                ))
                .context("failed to prepare pitch insert")?;

            for (line, result) in reader.deserialize::<RawPitch>().enumerate() {
                let raw = match result {
                    Ok(raw) => raw,
                    Err(e) => {
                        warn!("skipping malformed pitch row {}: {}", line + 1, e);
                        rows_skipped += 1;
                        continue;
                    }
                };
                stmt.execute(params![
                    import_id,
                    raw.batter.as_deref().map(str::trim),
                    raw.pitcher.as_deref().map(str::trim),
                    raw.game_id,
                    raw.pitch_of_pa,
                    raw.balls,
                    raw.strikes,
                    raw.pitch_type,
                    raw.pitch_call,
                    raw.play_result,
                    raw.hit_type,
                    raw.korbb,
                    raw.angle,
                    raw.direction,
                    raw.distance,
                    raw.plate_loc_height,
                    raw.plate_loc_side,
                    raw.exit_speed,
                    raw.release_speed,
                ])
                .context("failed to insert pitch")?;
                rows_imported += 1;
            }
        }

        tx.execute(
            "INSERT OR REPLACE INTO imports (import_id, source, rows, skipped) VALUES (?1, ?2, ?3, ?4)",
            params![import_id, source, rows_imported as i64, rows_skipped as i64],
        )
        .context("failed to record import")?;
        tx.commit().context("failed to commit import")?;

        info!(
            "imported {} pitches from {} ({} skipped)",
            rows_imported, source, rows_skipped
        );
        Ok(ImportReport {
            import_id,
            rows_imported,
            rows_skipped,
        })
    }

    /// Load pitches matching `filter`, in arrival order.
    pub fn load_pitches(&self, filter: &PlayerFilter) -> Result<Vec<RawPitch>> {
        let (clause, name) = match filter {
            PlayerFilter::Batter(name) => ("WHERE batter = ?1", Some(name.as_str())),
            PlayerFilter::Pitcher(name) => ("WHERE pitcher = ?1", Some(name.as_str())),
            PlayerFilter::All => ("", None),
        };
        let sql = format!("SELECT {PITCH_COLUMNS} FROM pitches {clause} ORDER BY id");
        let mut stmt = self
            .conn
            .prepare(&sql)
            .context("failed to prepare load_pitches query")?;

        let rows = match name {
            Some(name) => stmt.query_map(params![name], raw_from_row),
            None => stmt.query_map([], raw_from_row),
        }
        .context("failed to query pitches")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .context("failed to map pitch rows")?;

        Ok(rows)
    }

    /// Number of stored pitches.
    pub fn pitch_count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM pitches", [], |row| row.get(0))
            .context("failed to count pitches")?;
        Ok(n as usize)
    }

    /// The most recent import, if any.
    pub fn last_import(&self) -> Result<Option<ImportRecord>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT import_id, source, rows, skipped, timestamp
                 FROM imports ORDER BY rowid DESC LIMIT 1",
            )
            .context("failed to prepare last_import query")?;
        let mut rows = stmt
            .query_map([], |row| {
                Ok(ImportRecord {
                    import_id: row.get(0)?,
                    source: row.get(1)?,
                    rows: row.get::<_, i64>(2)? as usize,
                    skipped: row.get::<_, i64>(3)? as usize,
                    timestamp: row.get(4)?,
                })
            })
            .context("failed to query imports")?;
        let record = rows
            .next()
            .transpose()
            .context("failed to map import row")?;
        Ok(record)
    }
}

fn raw_from_row(row: &Row<'_>) -> rusqlite::Result<RawPitch> {
    Ok(RawPitch {
        batter: row.get(0)?,
        pitcher: row.get(1)?,
        game_id: row.get(2)?,
        pitch_of_pa: row.get(3)?,
        balls: row.get(4)?,
        strikes: row.get(5)?,
        pitch_type: row.get(6)?,
        pitch_call: row.get(7)?,
        play_result: row.get(8)?,
        hit_type: row.get(9)?,
        korbb: row.get(10)?,
        angle: row.get(11)?,
        direction: row.get(12)?,
        distance: row.get(13)?,
        plate_loc_height: row.get(14)?,
        plate_loc_side: row.get(15)?,
        exit_speed: row.get(16)?,
        release_speed: row.get(17)?,
    })
}
