// Plate discipline: swing, whiff and chase rates overall and per count type.

use serde::Serialize;

use crate::count::CountType;
use crate::observation::{Location, PitchObservation};
use crate::outcome::ratio;

/// Half-width of the strike zone in feet, measured from the middle of the plate.
pub const ZONE_HALF_WIDTH_FT: f64 = 0.83;
pub const ZONE_BOTTOM_FT: f64 = 1.5;
pub const ZONE_TOP_FT: f64 = 3.5;

const SWING_CALLS: [&str; 5] = [
    "StrikeSwinging",
    "FoulBall",
    "FoulBallNotFieldable",
    "FoulBallFieldable",
    "InPlay",
];

pub fn is_swing(obs: &PitchObservation) -> bool {
    obs.pitch_call
        .as_deref()
        .is_some_and(|call| SWING_CALLS.contains(&call))
}

pub fn is_whiff(obs: &PitchObservation) -> bool {
    obs.pitch_call.as_deref() == Some("StrikeSwinging")
}

pub fn in_zone(loc: &Location) -> bool {
    loc.side.abs() <= ZONE_HALF_WIDTH_FT && (ZONE_BOTTOM_FT..=ZONE_TOP_FT).contains(&loc.height)
}

/// Swing decisions over a group of pitches.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisciplineLine {
    pub pitches: u32,
    pub swings: u32,
    pub whiffs: u32,
    pub out_of_zone: u32,
    pub chases: u32,
    pub swing_rate: f64,
    pub whiff_rate: f64,
    pub chase_rate: f64,
}

impl DisciplineLine {
    fn add(&mut self, obs: &PitchObservation) {
        self.pitches += 1;
        let swung = is_swing(obs);
        if swung {
            self.swings += 1;
        }
        if is_whiff(obs) {
            self.whiffs += 1;
        }
        if let Some(loc) = &obs.location {
            if !in_zone(loc) {
                self.out_of_zone += 1;
                if swung {
                    self.chases += 1;
                }
            }
        }
    }

    fn finish(&mut self) {
        self.swing_rate = ratio(self.swings, self.pitches);
        self.whiff_rate = ratio(self.whiffs, self.swings);
        self.chase_rate = ratio(self.chases, self.out_of_zone);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisciplineSummary {
    pub overall: DisciplineLine,
    /// Per count type, in first-seen order.
    pub by_count_type: Vec<(CountType, DisciplineLine)>,
}

impl DisciplineSummary {
    pub fn from_pitches<'a, I>(pitches: I) -> Self
    where
        I: IntoIterator<Item = &'a PitchObservation>,
    {
        let mut overall = DisciplineLine::default();
        let mut by_count_type: Vec<(CountType, DisciplineLine)> = Vec::new();

        for obs in pitches {
            overall.add(obs);
            let ct = obs.count_type();
            match by_count_type.iter_mut().find(|(k, _)| *k == ct) {
                Some((_, line)) => line.add(obs),
                None => {
                    let mut line = DisciplineLine::default();
                    line.add(obs);
                    by_count_type.push((ct, line));
                }
            }
        }

        overall.finish();
        for (_, line) in &mut by_count_type {
            line.finish();
        }
        DisciplineSummary {
            overall,
            by_count_type,
        }
    }

    pub fn for_count_type(&self, count_type: CountType) -> Option<&DisciplineLine> {
        self.by_count_type
            .iter()
            .find(|(ct, _)| *ct == count_type)
            .map(|(_, line)| line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitch(balls: i32, strikes: i32, call: &str, loc: Option<(f64, f64)>) -> PitchObservation {
        let mut b = PitchObservation::builder(balls, strikes).pitch_call(call);
        if let Some((h, s)) = loc {
            b = b.location(h, s);
        }
        b.build()
    }

    #[test]
    fn zone_edges() {
        assert!(in_zone(&Location { height: 1.5, side: 0.83 }));
        assert!(in_zone(&Location { height: 3.5, side: -0.83 }));
        assert!(!in_zone(&Location { height: 1.49, side: 0.0 }));
        assert!(!in_zone(&Location { height: 2.5, side: 0.9 }));
    }

    #[test]
    fn rates_overall_and_per_count() {
        let pitches = vec![
            pitch(0, 0, "StrikeCalled", Some((2.5, 0.0))),
            pitch(0, 1, "StrikeSwinging", Some((1.0, 0.2))),
            pitch(0, 2, "BallCalled", Some((4.0, 0.0))),
            pitch(0, 2, "FoulBallNotFieldable", Some((2.0, 1.2))),
            pitch(0, 2, "InPlay", None),
        ];
        let summary = DisciplineSummary::from_pitches(&pitches);

        let all = &summary.overall;
        assert_eq!(all.pitches, 5);
        assert_eq!(all.swings, 3);
        assert_eq!(all.whiffs, 1);
        assert_eq!(all.out_of_zone, 3);
        assert_eq!(all.chases, 2);
        assert!((all.swing_rate - 0.6).abs() < 1e-9);
        assert!((all.whiff_rate - 1.0 / 3.0).abs() < 1e-9);
        assert!((all.chase_rate - 2.0 / 3.0).abs() < 1e-9);

        let order: Vec<CountType> = summary.by_count_type.iter().map(|(ct, _)| *ct).collect();
        assert_eq!(
            order,
            vec![CountType::ZeroZero, CountType::Neutral, CountType::PitchersCount]
        );
        let two_strikes = summary.for_count_type(CountType::PitchersCount).unwrap();
        assert_eq!(two_strikes.pitches, 3);
        assert_eq!(two_strikes.swings, 2);
        assert_eq!(two_strikes.chases, 1);
        assert!(summary.for_count_type(CountType::Full).is_none());
    }

    #[test]
    fn no_pitches_means_zero_rates() {
        let summary = DisciplineSummary::from_pitches(&[] as &[PitchObservation]);
        assert_eq!(summary.overall, DisciplineLine::default());
        assert!(summary.by_count_type.is_empty());
    }
}
