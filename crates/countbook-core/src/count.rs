// Ball-strike count and the count-type classification used to group pitches.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Situational category of a ball-strike count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CountType {
    ZeroZero,
    Full,
    HittersCount,
    PitchersCount,
    Neutral,
}

impl CountType {
    /// All variants, in decision-table order.
    pub const ALL: [CountType; 5] = [
        CountType::ZeroZero,
        CountType::Full,
        CountType::HittersCount,
        CountType::PitchersCount,
        CountType::Neutral,
    ];

    /// Report label for this count type.
    pub fn label(&self) -> &'static str {
        match self {
            CountType::ZeroZero => "0-0 Count",
            CountType::Full => "Full Count",
            CountType::HittersCount => "Hitter's Count",
            CountType::PitchersCount => "Pitcher's Count",
            CountType::Neutral => "Neutral Count",
        }
    }

    /// Parse a report label back into a count type.
    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim();
        CountType::ALL.into_iter().find(|ct| ct.label() == s)
    }
}

impl fmt::Display for CountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a ball-strike count.
///
/// Rules are evaluated in order and the first match wins:
///
/// 1. 0-0 is `ZeroZero`
/// 2. 3-2 is `Full`
/// 3. 3-0, 3-1, 2-0 and 2-1 are `HittersCount`
/// 4. two strikes with fewer than three balls is `PitchersCount`
/// 5. everything else is `Neutral`
///
/// Total over all integers: pairs outside the 0..=3 / 0..=2 domain fall
/// through to `Neutral` instead of failing.
pub fn classify(balls: i32, strikes: i32) -> CountType {
    if balls == 0 && strikes == 0 {
        return CountType::ZeroZero;
    }
    if balls == 3 && strikes == 2 {
        return CountType::Full;
    }
    if (balls == 3 && strikes <= 1) || (balls == 2 && (strikes == 0 || strikes == 1)) {
        return CountType::HittersCount;
    }
    if strikes >= 2 && balls != 3 {
        return CountType::PitchersCount;
    }
    CountType::Neutral
}

/// A ball-strike count as recorded before a pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Count {
    pub balls: i32,
    pub strikes: i32,
}

impl Count {
    pub fn new(balls: i32, strikes: i32) -> Self {
        Self { balls, strikes }
    }

    pub fn count_type(&self) -> CountType {
        classify(self.balls, self.strikes)
    }

    /// Whether the count lies within standard rules (0-3 balls, 0-2 strikes).
    pub fn is_standard(&self) -> bool {
        (0..=3).contains(&self.balls) && (0..=2).contains(&self.strikes)
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.balls, self.strikes)
    }
}
