// Pitch-type effectiveness for a pitcher: usage, hits allowed and speeds.

use serde::Serialize;
use std::collections::HashSet;

use crate::observation::PitchObservation;
use crate::outcome::{ratio, PaResult};

/// Opponent batting average below which a line is rated excellent.
pub const EXCELLENT_BELOW: f64 = 0.200;
/// Opponent batting average below which a line is rated solid.
pub const SOLID_BELOW: f64 = 0.300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Excellent,
    Solid,
    BelowAverage,
}

impl Verdict {
    pub fn from_average(avg: f64) -> Self {
        if avg < EXCELLENT_BELOW {
            Verdict::Excellent
        } else if avg < SOLID_BELOW {
            Verdict::Solid
        } else {
            Verdict::BelowAverage
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Verdict::Excellent => "Excellent: very few hits given up.",
            Verdict::Solid => "Solid performance.",
            Verdict::BelowAverage => "Average or below average; consider adjustments.",
        }
    }
}

/// Effectiveness of one pitch type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchTypeLine {
    pub pitch_type: Option<String>,
    pub total_pitches: u32,
    pub hits: u32,
    pub singles: u32,
    pub doubles: u32,
    pub triples: u32,
    pub home_runs: u32,
    pub avg_exit_speed: Option<f64>,
    pub avg_release_speed: Option<f64>,
    #[serde(skip)]
    exit_speed_sum: (f64, u32),
    #[serde(skip)]
    release_speed_sum: (f64, u32),
}

impl PitchTypeLine {
    fn new(pitch_type: Option<String>) -> Self {
        Self {
            pitch_type,
            total_pitches: 0,
            hits: 0,
            singles: 0,
            doubles: 0,
            triples: 0,
            home_runs: 0,
            avg_exit_speed: None,
            avg_release_speed: None,
            exit_speed_sum: (0.0, 0),
            release_speed_sum: (0.0, 0),
        }
    }

    fn add(&mut self, obs: &PitchObservation) {
        self.total_pitches += 1;
        if let Some(v) = obs.exit_speed {
            self.exit_speed_sum.0 += v;
            self.exit_speed_sum.1 += 1;
        }
        if let Some(v) = obs.release_speed {
            self.release_speed_sum.0 += v;
            self.release_speed_sum.1 += 1;
        }
        match PaResult::from_pitch(obs) {
            Some(PaResult::Single) => self.singles += 1,
            Some(PaResult::Double) => self.doubles += 1,
            Some(PaResult::Triple) => self.triples += 1,
            Some(PaResult::HomeRun) => self.home_runs += 1,
            _ => return,
        }
        self.hits += 1;
    }

    fn finish(&mut self) {
        self.avg_exit_speed = mean(self.exit_speed_sum);
        self.avg_release_speed = mean(self.release_speed_sum);
    }
}

fn mean((sum, n): (f64, u32)) -> Option<f64> {
    (n > 0).then(|| sum / n as f64)
}

/// Pitch-type breakdown and opponent line for one pitcher.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchMix {
    /// One line per pitch type, in first-seen order.
    pub lines: Vec<PitchTypeLine>,
    pub games: u32,
    pub at_bats: u32,
    pub hits: u32,
    pub opponent_average: f64,
    pub verdict: Verdict,
}

impl PitchMix {
    pub fn from_pitches<'a, I>(pitches: I) -> Self
    where
        I: IntoIterator<Item = &'a PitchObservation>,
    {
        let mut lines: Vec<PitchTypeLine> = Vec::new();
        let mut games: HashSet<&str> = HashSet::new();
        let mut at_bats = 0u32;
        let mut hits = 0u32;

        for obs in pitches {
            if let Some(game) = obs.game_id.as_deref() {
                games.insert(game);
            }
            let idx = match lines.iter().position(|l| l.pitch_type == obs.pitch_type) {
                Some(idx) => idx,
                None => {
                    lines.push(PitchTypeLine::new(obs.pitch_type.clone()));
                    lines.len() - 1
                }
            };
            lines[idx].add(obs);

            if let Some(result) = PaResult::from_pitch(obs) {
                if result.is_at_bat() {
                    at_bats += 1;
                }
                if result.is_hit() {
                    hits += 1;
                }
            }
        }
        for line in &mut lines {
            line.finish();
        }

        let opponent_average = ratio(hits, at_bats);
        PitchMix {
            lines,
            games: games.len() as u32,
            at_bats,
            hits,
            opponent_average,
            verdict: Verdict::from_average(opponent_average),
        }
    }

    /// Lines ordered by hits allowed, most first. Ties keep first-seen order.
    pub fn by_hits_allowed(&self) -> Vec<&PitchTypeLine> {
        let mut sorted: Vec<&PitchTypeLine> = self.lines.iter().collect();
        sorted.sort_by(|a, b| b.hits.cmp(&a.hits));
        sorted
    }
}
