// Storage and export collaborators for the tendency engine: the SQLite
// pitch store and CSV writers.

pub mod db;
pub mod export;

pub use db::{ImportReport, PitchDatabase, PlayerFilter};
pub use export::{write_csv, write_csv_file, ExportError};
