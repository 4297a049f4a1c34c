// Pitch-level observation records and their construction from raw rows.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::count::{Count, CountType};
use crate::hit_position::{classify_hit_position, HitPosition};

/// Sentinel text the tracking feed uses for "no value".
pub const UNDEFINED: &str = "Undefined";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ObservationError {
    #[error("missing {field} count")]
    MissingCount { field: &'static str },

    #[error("{field} count must be a whole number, got {value}")]
    NonIntegralCount { field: &'static str, value: f64 },
}

// ---------------------------------------------------------------------------
// Value types
// ---------------------------------------------------------------------------

/// Batted-ball trajectory metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BattedBall {
    /// Horizontal spray angle in degrees; negative is toward third base.
    pub angle: f64,
    pub direction: f64,
    /// Carry distance in feet.
    pub distance: f64,
}

impl BattedBall {
    /// Build from optional metrics. All three must be present and finite.
    pub fn from_parts(
        angle: Option<f64>,
        direction: Option<f64>,
        distance: Option<f64>,
    ) -> Option<Self> {
        match (angle, direction, distance) {
            (Some(angle), Some(direction), Some(distance))
                if angle.is_finite() && direction.is_finite() && distance.is_finite() =>
            {
                Some(Self {
                    angle,
                    direction,
                    distance,
                })
            }
            _ => None,
        }
    }

    pub fn hit_position(&self) -> HitPosition {
        classify_hit_position(self.angle, Some(self.distance))
    }
}

/// Pitch location as it crossed the plate, in feet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub height: f64,
    pub side: f64,
}

impl Location {
    pub fn from_parts(height: Option<f64>, side: Option<f64>) -> Option<Self> {
        match (height, side) {
            (Some(height), Some(side)) if height.is_finite() && side.is_finite() => {
                Some(Self { height, side })
            }
            _ => None,
        }
    }
}

/// Normalize a categorical label: trims it and maps blank or `Undefined`
/// text to `None`.
pub fn label(value: Option<&str>) -> Option<String> {
    let v = value?.trim();
    if v.is_empty() || v.eq_ignore_ascii_case(UNDEFINED) {
        None
    } else {
        Some(v.to_string())
    }
}

/// Render a categorical label for reports, using the feed's sentinel for `None`.
pub fn label_or_undefined(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(UNDEFINED)
}

// ---------------------------------------------------------------------------
// PitchObservation
// ---------------------------------------------------------------------------

/// One pitch as seen by the analysis. Counts are the count before the pitch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchObservation {
    pub count: Count,
    pub pitch_type: Option<String>,
    pub pitch_call: Option<String>,
    /// Plate-appearance result if the plate appearance ended on this pitch.
    pub play_result: Option<String>,
    pub hit_type: Option<String>,
    /// Strikeout / walk marker.
    pub korbb: Option<String>,
    pub batted_ball: Option<BattedBall>,
    pub location: Option<Location>,
    /// 1-based pitch number within the plate appearance.
    pub pitch_of_pa: Option<u32>,
    pub batter: Option<String>,
    pub pitcher: Option<String>,
    pub game_id: Option<String>,
    pub exit_speed: Option<f64>,
    pub release_speed: Option<f64>,
}

impl PitchObservation {
    /// Start building an observation for a pitch thrown in the given count.
    pub fn builder(balls: i32, strikes: i32) -> PitchObservationBuilder {
        PitchObservationBuilder {
            obs: PitchObservation {
                count: Count::new(balls, strikes),
                pitch_type: None,
                pitch_call: None,
                play_result: None,
                hit_type: None,
                korbb: None,
                batted_ball: None,
                location: None,
                pitch_of_pa: None,
                batter: None,
                pitcher: None,
                game_id: None,
                exit_speed: None,
                release_speed: None,
            },
        }
    }

    pub fn count_type(&self) -> CountType {
        self.count.count_type()
    }

    /// Field zone of the batted ball, or `NoHitPosition` when there was none.
    pub fn hit_position(&self) -> HitPosition {
        self.batted_ball
            .map(|b| b.hit_position())
            .unwrap_or(HitPosition::NoHitPosition)
    }

    /// The (play result, hit type) pair reported for this pitch.
    pub fn outcome(&self) -> (Option<String>, Option<String>) {
        (self.play_result.clone(), self.hit_type.clone())
    }
}

/// Builder for [`PitchObservation`]. Label setters normalize `Undefined`.
#[derive(Debug, Clone)]
pub struct PitchObservationBuilder {
    obs: PitchObservation,
}

impl PitchObservationBuilder {
    pub fn pitch_type(mut self, v: &str) -> Self {
        self.obs.pitch_type = label(Some(v));
        self
    }

    pub fn pitch_call(mut self, v: &str) -> Self {
        self.obs.pitch_call = label(Some(v));
        self
    }

    pub fn play_result(mut self, v: &str) -> Self {
        self.obs.play_result = label(Some(v));
        self
    }

    pub fn hit_type(mut self, v: &str) -> Self {
        self.obs.hit_type = label(Some(v));
        self
    }

    pub fn korbb(mut self, v: &str) -> Self {
        self.obs.korbb = label(Some(v));
        self
    }

    pub fn batted_ball(mut self, angle: f64, direction: f64, distance: f64) -> Self {
        self.obs.batted_ball = BattedBall::from_parts(Some(angle), Some(direction), Some(distance));
        self
    }

    pub fn location(mut self, height: f64, side: f64) -> Self {
        self.obs.location = Location::from_parts(Some(height), Some(side));
        self
    }

    pub fn pitch_of_pa(mut self, n: u32) -> Self {
        self.obs.pitch_of_pa = Some(n);
        self
    }

    pub fn batter(mut self, v: &str) -> Self {
        self.obs.batter = label(Some(v));
        self
    }

    pub fn pitcher(mut self, v: &str) -> Self {
        self.obs.pitcher = label(Some(v));
        self
    }

    pub fn game_id(mut self, v: &str) -> Self {
        self.obs.game_id = label(Some(v));
        self
    }

    pub fn exit_speed(mut self, mph: f64) -> Self {
        self.obs.exit_speed = Some(mph).filter(|v| v.is_finite());
        self
    }

    pub fn release_speed(mut self, mph: f64) -> Self {
        self.obs.release_speed = Some(mph).filter(|v| v.is_finite());
        self
    }

    pub fn build(self) -> PitchObservation {
        self.obs
    }
}

// ---------------------------------------------------------------------------
// Raw rows
// ---------------------------------------------------------------------------

/// Loosely typed pitch row as stored in the tracking export. Numeric columns
/// arrive as floating point and any column may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPitch {
    #[serde(rename = "Batter", default)]
    pub batter: Option<String>,
    #[serde(rename = "Pitcher", default)]
    pub pitcher: Option<String>,
    #[serde(rename = "GameID", default)]
    pub game_id: Option<String>,
    #[serde(rename = "PitchofPA", default)]
    pub pitch_of_pa: Option<f64>,
    #[serde(rename = "Balls", default)]
    pub balls: Option<f64>,
    #[serde(rename = "Strikes", default)]
    pub strikes: Option<f64>,
    #[serde(rename = "TaggedPitchType", default)]
    pub pitch_type: Option<String>,
    #[serde(rename = "PitchCall", default)]
    pub pitch_call: Option<String>,
    #[serde(rename = "PlayResult", default)]
    pub play_result: Option<String>,
    #[serde(rename = "TaggedHitType", default)]
    pub hit_type: Option<String>,
    #[serde(rename = "KorBB", default)]
    pub korbb: Option<String>,
    #[serde(rename = "Angle", default)]
    pub angle: Option<f64>,
    #[serde(rename = "Direction", default)]
    pub direction: Option<f64>,
    #[serde(rename = "Distance", default)]
    pub distance: Option<f64>,
    #[serde(rename = "PlateLocHeight", default)]
    pub plate_loc_height: Option<f64>,
    #[serde(rename = "PlateLocSide", default)]
    pub plate_loc_side: Option<f64>,
    #[serde(rename = "ExitSpeed", default)]
    pub exit_speed: Option<f64>,
    #[serde(rename = "RelSpeed", default)]
    pub release_speed: Option<f64>,
}

fn whole_count(field: &'static str, value: Option<f64>) -> Result<i32, ObservationError> {
    let value = value.ok_or(ObservationError::MissingCount { field })?;
    if !value.is_finite()
        || value.fract() != 0.0
        || value < i32::MIN as f64
        || value > i32::MAX as f64
    {
        return Err(ObservationError::NonIntegralCount { field, value });
    }
    Ok(value as i32)
}

impl TryFrom<RawPitch> for PitchObservation {
    type Error = ObservationError;

    fn try_from(raw: RawPitch) -> Result<Self, Self::Error> {
        let balls = whole_count("balls", raw.balls)?;
        let strikes = whole_count("strikes", raw.strikes)?;

        let pitch_of_pa = raw
            .pitch_of_pa
            .filter(|n| n.is_finite() && n.fract() == 0.0 && *n >= 1.0 && *n <= u32::MAX as f64)
            .map(|n| n as u32);

        Ok(PitchObservation {
            count: Count::new(balls, strikes),
            pitch_type: label(raw.pitch_type.as_deref()),
            pitch_call: label(raw.pitch_call.as_deref()),
            play_result: label(raw.play_result.as_deref()),
            hit_type: label(raw.hit_type.as_deref()),
            korbb: label(raw.korbb.as_deref()),
            batted_ball: BattedBall::from_parts(raw.angle, raw.direction, raw.distance),
            location: Location::from_parts(raw.plate_loc_height, raw.plate_loc_side),
            pitch_of_pa,
            batter: label(raw.batter.as_deref()),
            pitcher: label(raw.pitcher.as_deref()),
            game_id: label(raw.game_id.as_deref()),
            exit_speed: raw.exit_speed.filter(|v| v.is_finite()),
            release_speed: raw.release_speed.filter(|v| v.is_finite()),
        })
    }
}
