// Plate-appearance results read off the pitch that ended the plate appearance.

use serde::Serialize;

use crate::observation::PitchObservation;

/// How a plate appearance ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PaResult {
    Single,
    Double,
    Triple,
    HomeRun,
    Walk,
    Strikeout,
    HitByPitch,
    Sacrifice,
    /// Any other recorded play result (Out, Error, FieldersChoice, ...).
    Other(String),
}

impl PaResult {
    /// Read the result from a pitch, or `None` if the plate appearance
    /// continued past it. The strikeout/walk marker takes precedence, and a
    /// marker counts exactly once.
    pub fn from_pitch(obs: &PitchObservation) -> Option<Self> {
        match obs.korbb.as_deref() {
            Some("Strikeout") => return Some(PaResult::Strikeout),
            Some("Walk") => return Some(PaResult::Walk),
            _ => {}
        }
        if obs.pitch_call.as_deref() == Some("HitByPitch") {
            return Some(PaResult::HitByPitch);
        }
        let result = obs.play_result.as_deref()?;
        Some(match result {
            "Single" => PaResult::Single,
            "Double" => PaResult::Double,
            "Triple" => PaResult::Triple,
            "HomeRun" | "Homerun" => PaResult::HomeRun,
            "Sacrifice" => PaResult::Sacrifice,
            other => PaResult::Other(other.to_string()),
        })
    }

    pub fn is_hit(&self) -> bool {
        self.total_bases() > 0
    }

    /// Whether the plate appearance is charged as an at-bat.
    pub fn is_at_bat(&self) -> bool {
        !matches!(
            self,
            PaResult::Walk | PaResult::HitByPitch | PaResult::Sacrifice
        )
    }

    pub fn total_bases(&self) -> u32 {
        match self {
            PaResult::Single => 1,
            PaResult::Double => 2,
            PaResult::Triple => 3,
            PaResult::HomeRun => 4,
            _ => 0,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PaResult::Single => "Single",
            PaResult::Double => "Double",
            PaResult::Triple => "Triple",
            PaResult::HomeRun => "HomeRun",
            PaResult::Walk => "Walk",
            PaResult::Strikeout => "Strikeout",
            PaResult::HitByPitch => "HitByPitch",
            PaResult::Sacrifice => "Sacrifice",
            PaResult::Other(s) => s,
        }
    }
}

/// `num / den`, or 0.0 when the denominator is zero.
pub(crate) fn ratio(num: u32, den: u32) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}
