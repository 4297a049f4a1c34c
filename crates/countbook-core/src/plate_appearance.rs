// Plate-appearance summaries reconstructed from consecutive pitches.

use serde::Serialize;

use crate::observation::PitchObservation;

/// One plate appearance, summarized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlateAppearanceSummary {
    /// 1-based position of the plate appearance in the input.
    pub sequence: u32,
    pub batter: Option<String>,
    pub total_pitches: u32,
    pub balls: i32,
    pub strikes: i32,
    pub result: Option<String>,
    pub hit_type: Option<String>,
}

impl PlateAppearanceSummary {
    pub const HEADERS: &'static [&'static str] = &[
        "sequence",
        "batter",
        "total_pitches",
        "balls",
        "strikes",
        "result",
        "hit_type",
    ];

    fn open(sequence: u32, first: &PitchObservation) -> Self {
        Self {
            sequence,
            batter: first.batter.clone(),
            total_pitches: 0,
            balls: first.count.balls,
            strikes: first.count.strikes,
            result: None,
            hit_type: None,
        }
    }

    fn absorb(&mut self, obs: &PitchObservation, pitches_seen: u32) {
        self.total_pitches = pitches_seen.max(obs.pitch_of_pa.unwrap_or(0)).max(self.total_pitches);
        self.balls = self.balls.max(obs.count.balls);
        self.strikes = self.strikes.max(obs.count.strikes);
        if let Some(r) = obs.play_result.as_ref().or(obs.korbb.as_ref()) {
            self.result = Some(r.clone());
        }
        if let Some(h) = &obs.hit_type {
            self.hit_type = Some(h.clone());
        }
        if self.batter.is_none() {
            self.batter = obs.batter.clone();
        }
    }
}

/// Split an ordered pitch stream into plate appearances.
///
/// A new plate appearance starts on the first pitch, on any pitch numbered 1,
/// and whenever the pitch number fails to increase. Pitches without a number
/// stay in the current plate appearance.
pub fn summarize_plate_appearances<'a, I>(pitches: I) -> Vec<PlateAppearanceSummary>
where
    I: IntoIterator<Item = &'a PitchObservation>,
{
    let mut summaries: Vec<PlateAppearanceSummary> = Vec::new();
    let mut last_number: Option<u32> = None;
    let mut pitches_seen = 0u32;

    for obs in pitches {
        let starts_new = match (summaries.is_empty(), obs.pitch_of_pa, last_number) {
            (true, _, _) => true,
            (false, Some(1), _) => true,
            (false, Some(n), Some(prev)) => n <= prev,
            _ => false,
        };
        if starts_new {
            let sequence = summaries.len() as u32 + 1;
            summaries.push(PlateAppearanceSummary::open(sequence, obs));
            pitches_seen = 0;
            last_number = None;
        }
        pitches_seen += 1;
        if obs.pitch_of_pa.is_some() {
            last_number = obs.pitch_of_pa;
        }
        if let Some(current) = summaries.last_mut() {
            current.absorb(obs, pitches_seen);
        }
    }
    summaries
}

/// Pitches seen in each plate appearance, keyed by plate-appearance sequence.
pub fn pitches_per_plate_appearance(summaries: &[PlateAppearanceSummary]) -> Vec<(u32, u32)> {
    summaries
        .iter()
        .map(|pa| (pa.sequence, pa.total_pitches))
        .collect()
}
