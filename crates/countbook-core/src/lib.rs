// Count-type tendency engine: pitch classification, grouping and reports.

pub mod count;
pub mod discipline;
pub mod hit_position;
pub mod ledger;
pub mod observation;
pub mod outcome;
pub mod pitch_mix;
pub mod plate_appearance;
pub mod stats;

pub use count::{classify, Count, CountType};
pub use hit_position::{classify_hit_position, HitPosition};
pub use ledger::{
    pitch_type_distribution, CountSummary, ExportOrder, PitchTypeShare, TendencyLedger, TendencyRow,
};
pub use observation::{ObservationError, PitchObservation, RawPitch};
