// Season hitting line (AVG / OBP / SLG) built from pitch-level observations.

use serde::Serialize;
use std::collections::HashSet;

use crate::observation::PitchObservation;
use crate::outcome::{ratio, PaResult};

/// Counting and rate stats for one hitter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HittingLine {
    pub games: u32,
    pub plate_appearances: u32,
    pub at_bats: u32,
    pub hits: u32,
    pub singles: u32,
    pub doubles: u32,
    pub triples: u32,
    pub home_runs: u32,
    pub walks: u32,
    pub strikeouts: u32,
    pub hit_by_pitch: u32,
    pub sacrifices: u32,
    pub batting_average: f64,
    pub on_base_percentage: f64,
    pub slugging: f64,
}

impl HittingLine {
    /// Accumulate a hitting line over a batter's pitches.
    pub fn from_pitches<'a, I>(pitches: I) -> Self
    where
        I: IntoIterator<Item = &'a PitchObservation>,
    {
        let mut line = HittingLine::default();
        let mut games: HashSet<&str> = HashSet::new();

        for obs in pitches {
            if let Some(game) = obs.game_id.as_deref() {
                games.insert(game);
            }
            if let Some(result) = PaResult::from_pitch(obs) {
                line.record(&result);
            }
        }

        line.games = games.len() as u32;
        line.finish();
        line
    }

    fn record(&mut self, result: &PaResult) {
        self.plate_appearances += 1;
        if result.is_at_bat() {
            self.at_bats += 1;
        }
        match result {
            PaResult::Single => self.singles += 1,
            PaResult::Double => self.doubles += 1,
            PaResult::Triple => self.triples += 1,
            PaResult::HomeRun => self.home_runs += 1,
            PaResult::Walk => self.walks += 1,
            PaResult::Strikeout => self.strikeouts += 1,
            PaResult::HitByPitch => self.hit_by_pitch += 1,
            PaResult::Sacrifice => self.sacrifices += 1,
            PaResult::Other(_) => {}
        }
        if result.is_hit() {
            self.hits += 1;
        }
    }

    pub fn total_bases(&self) -> u32 {
        self.singles + 2 * self.doubles + 3 * self.triples + 4 * self.home_runs
    }

    fn finish(&mut self) {
        self.batting_average = ratio(self.hits, self.at_bats);
        self.on_base_percentage = ratio(
            self.hits + self.walks + self.hit_by_pitch,
            self.at_bats + self.walks + self.hit_by_pitch + self.sacrifices,
        );
        self.slugging = ratio(self.total_bases(), self.at_bats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ended(game: &str, result: &str) -> PitchObservation {
        PitchObservation::builder(1, 1)
            .game_id(game)
            .play_result(result)
            .build()
    }

    fn marker(game: &str, korbb: &str) -> PitchObservation {
        PitchObservation::builder(3, 2)
            .game_id(game)
            .korbb(korbb)
            .build()
    }

    #[test]
    fn empty_input_is_all_zero() {
        let line = HittingLine::from_pitches(&[] as &[PitchObservation]);
        assert_eq!(line, HittingLine::default());
    }

    #[test]
    fn rates_from_mixed_results() {
        let pitches = vec![
            PitchObservation::builder(0, 0).game_id("g1").pitch_call("StrikeCalled").build(),
            ended("g1", "Single"),
            ended("g1", "Out"),
            marker("g1", "Walk"),
            ended("g2", "Double"),
            marker("g2", "Strikeout"),
            ended("g2", "HomeRun"),
        ];
        let line = HittingLine::from_pitches(&pitches);

        assert_eq!(line.games, 2);
        assert_eq!(line.plate_appearances, 6);
        assert_eq!(line.at_bats, 5);
        assert_eq!(line.hits, 3);
        assert_eq!(line.walks, 1);
        assert_eq!(line.strikeouts, 1);
        assert_eq!(line.total_bases(), 7);
        assert!((line.batting_average - 0.6).abs() < 1e-9);
        assert!((line.on_base_percentage - 4.0 / 6.0).abs() < 1e-9);
        assert!((line.slugging - 1.4).abs() < 1e-9);
    }

    #[test]
    fn a_marker_counts_once() {
        let line = HittingLine::from_pitches(&[marker("g1", "Strikeout")]);
        assert_eq!(line.strikeouts, 1);
        assert_eq!(line.walks, 0);

        let line = HittingLine::from_pitches(&[marker("g1", "Walk")]);
        assert_eq!(line.walks, 1);
        assert_eq!(line.strikeouts, 0);
        assert_eq!(line.at_bats, 0);
        assert_eq!(line.batting_average, 0.0);
        assert!((line.on_base_percentage - 1.0).abs() < 1e-9);
    }

    #[test]
    fn sacrifice_and_hbp_are_not_at_bats() {
        let pitches = vec![
            ended("g1", "Sacrifice"),
            PitchObservation::builder(0, 1).pitch_call("HitByPitch").build(),
            ended("g1", "Triple"),
        ];
        let line = HittingLine::from_pitches(&pitches);
        assert_eq!(line.at_bats, 1);
        assert_eq!(line.sacrifices, 1);
        assert_eq!(line.hit_by_pitch, 1);
        assert!((line.batting_average - 1.0).abs() < 1e-9);
        assert!((line.on_base_percentage - 2.0 / 3.0).abs() < 1e-9);
        assert!((line.slugging - 3.0).abs() < 1e-9);
    }
}
