// Tendency ledger: pitches grouped by count type, with summaries and flat export.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::count::CountType;
use crate::hit_position::HitPosition;
use crate::observation::{label_or_undefined, PitchObservation};
use crate::outcome::ratio;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Count occurrences of each key, emitting keys in first-seen order.
pub fn first_seen_tally<K, I>(keys: I) -> Vec<(K, usize)>
where
    K: PartialEq,
    I: IntoIterator<Item = K>,
{
    let mut tally: Vec<(K, usize)> = Vec::new();
    for key in keys {
        match tally.iter_mut().find(|(k, _)| *k == key) {
            Some((_, n)) => *n += 1,
            None => tally.push((key, 1)),
        }
    }
    tally
}

/// One pitch type's share of everything a batter saw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchTypeShare {
    /// Pitch type label; untagged pitches report as `Unknown`.
    #[serde(rename = "TaggedPitchType")]
    pub pitch_type: String,
    #[serde(rename = "Total")]
    pub total: usize,
    /// Share of all pitches, 0 to 100.
    #[serde(rename = "Percentage")]
    pub percentage: f64,
}

impl PitchTypeShare {
    pub const HEADERS: &'static [&'static str] = &["TaggedPitchType", "Total", "Percentage"];
}

/// Overall pitch-type distribution across all count types, first-seen order.
pub fn pitch_type_distribution<'a, I>(pitches: I) -> Vec<PitchTypeShare>
where
    I: IntoIterator<Item = &'a PitchObservation>,
{
    let tally = first_seen_tally(pitches.into_iter().map(|o| o.pitch_type.as_deref()));
    let seen: usize = tally.iter().map(|(_, n)| n).sum();
    tally
        .into_iter()
        .map(|(pitch_type, total)| PitchTypeShare {
            pitch_type: pitch_type.unwrap_or("Unknown").to_string(),
            total,
            percentage: ratio(total as u32, seen as u32) * 100.0,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Summary and export types
// ---------------------------------------------------------------------------

/// Aggregate view of one count type's pitches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountSummary {
    pub count_type: CountType,
    pub total: usize,
    /// Pitch type frequencies in first-seen order. `None` is an untagged pitch.
    pub pitch_type_frequency: Vec<(Option<String>, usize)>,
    /// (play result, hit type) per pitch, in arrival order.
    pub outcomes: Vec<(Option<String>, Option<String>)>,
    /// Field zones of batted balls in first-seen order.
    pub hit_positions: Vec<(HitPosition, usize)>,
}

impl CountSummary {
    /// Frequency of a specific pitch type (0 when never seen).
    pub fn pitch_type_count(&self, pitch_type: &str) -> usize {
        self.pitch_type_frequency
            .iter()
            .find(|(pt, _)| pt.as_deref() == Some(pitch_type))
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

/// One flattened export row. Field names serialize to the report's CSV headers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TendencyRow {
    #[serde(rename = "Count Type")]
    pub count_type: String,
    #[serde(rename = "Pitch Type")]
    pub pitch_type: String,
    #[serde(rename = "PA_Result_Type")]
    pub play_result: String,
    #[serde(rename = "PA_Result_Outcome")]
    pub hit_type: String,
    #[serde(rename = "Pitch Call")]
    pub pitch_call: String,
    #[serde(rename = "Angle")]
    pub angle: Option<f64>,
    #[serde(rename = "Direction")]
    pub direction: Option<f64>,
    #[serde(rename = "Distance")]
    pub distance: Option<f64>,
    #[serde(rename = "PlateLocHeight")]
    pub plate_loc_height: Option<f64>,
    #[serde(rename = "PlateLocSide")]
    pub plate_loc_side: Option<f64>,
    #[serde(rename = "Hit Position")]
    pub hit_position: String,
}

impl TendencyRow {
    /// CSV header row, in field order.
    pub const HEADERS: &'static [&'static str] = &[
        "Count Type",
        "Pitch Type",
        "PA_Result_Type",
        "PA_Result_Outcome",
        "Pitch Call",
        "Angle",
        "Direction",
        "Distance",
        "PlateLocHeight",
        "PlateLocSide",
        "Hit Position",
    ];

    fn from_observation(count_type: CountType, obs: &PitchObservation) -> Self {
        Self {
            count_type: count_type.label().to_string(),
            pitch_type: label_or_undefined(&obs.pitch_type).to_string(),
            play_result: label_or_undefined(&obs.play_result).to_string(),
            hit_type: label_or_undefined(&obs.hit_type).to_string(),
            pitch_call: label_or_undefined(&obs.pitch_call).to_string(),
            angle: obs.batted_ball.map(|b| b.angle),
            direction: obs.batted_ball.map(|b| b.direction),
            distance: obs.batted_ball.map(|b| b.distance),
            plate_loc_height: obs.location.map(|l| l.height),
            plate_loc_side: obs.location.map(|l| l.side),
            hit_position: obs.hit_position().label().to_string(),
        }
    }
}

/// Row ordering for flat export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportOrder {
    /// Global pitch arrival order.
    #[default]
    Arrival,
    /// Grouped by count type (first-seen order), arrival order within a group.
    Grouped,
}

impl FromStr for ExportOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arrival" => Ok(ExportOrder::Arrival),
            "grouped" => Ok(ExportOrder::Grouped),
            other => Err(format!("unknown export order '{other}' (expected arrival or grouped)")),
        }
    }
}

// ---------------------------------------------------------------------------
// TendencyLedger
// ---------------------------------------------------------------------------

/// Per-count-type pitch sequences for a single analysis run.
///
/// Not synchronized; one producer owns a ledger.
#[derive(Debug, Default)]
pub struct TendencyLedger {
    by_count: HashMap<CountType, Vec<PitchObservation>>,
    /// Count types in the order they first received a pitch.
    first_seen: Vec<CountType>,
    /// Arrival order: (count type, index within that count type's sequence).
    arrivals: Vec<(CountType, usize)>,
}

impl TendencyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// File an observation under the count type of its own ball-strike count.
    pub fn add_observation(&mut self, observation: PitchObservation) {
        if !observation.count.is_standard() {
            debug!(count = %observation.count, "non-standard count, filing as neutral");
        }
        let count_type = observation.count_type();
        let seq = self.by_count.entry(count_type).or_default();
        if seq.is_empty() {
            self.first_seen.push(count_type);
        }
        self.arrivals.push((count_type, seq.len()));
        seq.push(observation);
    }

    pub fn add_all<I>(&mut self, observations: I)
    where
        I: IntoIterator<Item = PitchObservation>,
    {
        for obs in observations {
            self.add_observation(obs);
        }
    }

    /// Observations filed under `count_type`, in arrival order. Empty if none.
    pub fn get_observations(&self, count_type: CountType) -> &[PitchObservation] {
        self.by_count
            .get(&count_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Count types holding at least one observation.
    pub fn all_count_types(&self) -> HashSet<CountType> {
        self.first_seen.iter().copied().collect()
    }

    /// Count types holding at least one observation, in first-seen order.
    pub fn count_types_in_order(&self) -> &[CountType] {
        &self.first_seen
    }

    pub fn len(&self) -> usize {
        self.arrivals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty()
    }

    /// Empty the ledger, keeping allocated capacity for the next run.
    pub fn clear(&mut self) {
        for seq in self.by_count.values_mut() {
            seq.clear();
        }
        self.first_seen.clear();
        self.arrivals.clear();
    }

    /// Summarize one count type from the current contents.
    pub fn summarize(&self, count_type: CountType) -> CountSummary {
        let observations = self.get_observations(count_type);
        CountSummary {
            count_type,
            total: observations.len(),
            pitch_type_frequency: first_seen_tally(
                observations.iter().map(|o| o.pitch_type.clone()),
            ),
            outcomes: observations.iter().map(PitchObservation::outcome).collect(),
            hit_positions: first_seen_tally(
                observations
                    .iter()
                    .filter(|o| o.batted_ball.is_some())
                    .map(PitchObservation::hit_position),
            ),
        }
    }

    /// Summaries for every present count type, in first-seen order.
    pub fn summaries(&self) -> Vec<CountSummary> {
        self.first_seen
            .iter()
            .map(|ct| self.summarize(*ct))
            .collect()
    }

    /// Flatten every observation into a row, in global arrival order.
    pub fn to_rows(&self) -> Vec<TendencyRow> {
        self.arrivals
            .iter()
            .map(|&(ct, idx)| TendencyRow::from_observation(ct, &self.by_count[&ct][idx]))
            .collect()
    }

    /// Flatten every observation into a row, grouped by count type.
    pub fn to_rows_grouped(&self) -> Vec<TendencyRow> {
        self.first_seen
            .iter()
            .flat_map(|&ct| {
                self.get_observations(ct)
                    .iter()
                    .map(move |obs| TendencyRow::from_observation(ct, obs))
            })
            .collect()
    }

    pub fn rows(&self, order: ExportOrder) -> Vec<TendencyRow> {
        match order {
            ExportOrder::Arrival => self.to_rows(),
            ExportOrder::Grouped => self.to_rows_grouped(),
        }
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_else(|| "None".to_string())
}

impl fmt::Display for TendencyLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &ct in &self.first_seen {
            writeln!(f, "Count Type: {ct}")?;
            for obs in self.get_observations(ct) {
                let location = obs
                    .location
                    .map(|l| format!("({}, {})", l.height, l.side))
                    .unwrap_or_else(|| "None".to_string());
                writeln!(
                    f,
                    "  Pitch Type: {}, Result: {} {}, Pitch Call: {}, Angle: {}, Direction: {}, Distance: {}, Location: {}",
                    label_or_undefined(&obs.pitch_type),
                    label_or_undefined(&obs.play_result),
                    label_or_undefined(&obs.hit_type),
                    label_or_undefined(&obs.pitch_call),
                    fmt_opt(obs.batted_ball.map(|b| b.angle)),
                    fmt_opt(obs.batted_ball.map(|b| b.direction)),
                    fmt_opt(obs.batted_ball.map(|b| b.distance)),
                    location,
                )?;
            }
        }
        Ok(())
    }
}
