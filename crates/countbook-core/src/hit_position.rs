// Field-zone classification from batted-ball direction and distance.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Distance in feet at which a batted ball counts as reaching the outfield.
pub const OUTFIELD_DISTANCE_FT: f64 = 90.0;

/// Field zone a batted ball was hit to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitPosition {
    Shortstop,
    ThirdBase,
    UpTheMiddle,
    SecondBase,
    FirstBase,
    LeftCenterField,
    LeftField,
    CenterField,
    RightField,
    RightCenterField,
    FoulTerritory,
    NoHitPosition,
}

impl HitPosition {
    pub fn label(&self) -> &'static str {
        match self {
            HitPosition::Shortstop => "Shortstop",
            HitPosition::ThirdBase => "Third Base",
            HitPosition::UpTheMiddle => "Up The Middle",
            HitPosition::SecondBase => "Second Base",
            HitPosition::FirstBase => "First Base",
            HitPosition::LeftCenterField => "Left-Center Field",
            HitPosition::LeftField => "Left Field",
            HitPosition::CenterField => "Center Field",
            HitPosition::RightField => "Right Field",
            HitPosition::RightCenterField => "Right-Center Field",
            HitPosition::FoulTerritory => "Foul Territory",
            HitPosition::NoHitPosition => "No hit_position",
        }
    }

    /// Whether the zone is in the outfield.
    pub fn is_outfield(&self) -> bool {
        matches!(
            self,
            HitPosition::LeftCenterField
                | HitPosition::LeftField
                | HitPosition::CenterField
                | HitPosition::RightField
                | HitPosition::RightCenterField
        )
    }
}

impl fmt::Display for HitPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify where a batted ball went.
///
/// A missing (or NaN) distance yields `NoHitPosition`. Distances under 90 ft
/// map to infield zones, 90 ft and beyond to outfield zones. Angles outside
/// [-90, 90] (including NaN) are `FoulTerritory`.
pub fn classify_hit_position(angle: f64, distance: Option<f64>) -> HitPosition {
    let Some(distance) = distance.filter(|d| !d.is_nan()) else {
        return HitPosition::NoHitPosition;
    };

    if distance < OUTFIELD_DISTANCE_FT {
        if (-45.0..=-15.0).contains(&angle) {
            HitPosition::ThirdBase
        } else if angle > -15.0 && angle < 0.0 {
            HitPosition::UpTheMiddle
        } else if (0.0..15.0).contains(&angle) {
            HitPosition::SecondBase
        } else if (15.0..=45.0).contains(&angle) {
            HitPosition::FirstBase
        } else if (-90.0..-45.0).contains(&angle) {
            HitPosition::Shortstop
        } else if angle > 45.0 && angle <= 90.0 {
            HitPosition::SecondBase
        } else {
            HitPosition::FoulTerritory
        }
    } else if (-45.0..=-15.0).contains(&angle) {
        HitPosition::LeftField
    } else if angle > -15.0 && angle < 15.0 {
        HitPosition::CenterField
    } else if (15.0..=45.0).contains(&angle) {
        HitPosition::RightField
    } else if (-90.0..-45.0).contains(&angle) {
        HitPosition::LeftCenterField
    } else if angle > 45.0 && angle <= 90.0 {
        HitPosition::RightCenterField
    } else {
        HitPosition::FoulTerritory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_distance_has_no_position() {
        for angle in [-120.0, -45.0, 0.0, 30.0, 200.0, f64::NAN] {
            assert_eq!(classify_hit_position(angle, None), HitPosition::NoHitPosition);
        }
        assert_eq!(classify_hit_position(10.0, Some(f64::NAN)), HitPosition::NoHitPosition);
    }

    #[test]
    fn outfield_boundary_is_inclusive() {
        assert_eq!(classify_hit_position(-45.0, Some(89.0)), HitPosition::ThirdBase);
        assert_eq!(classify_hit_position(-45.0, Some(90.0)), HitPosition::LeftField);
    }

    #[test]
    fn infield_bands() {
        let d = Some(60.0);
        assert_eq!(classify_hit_position(-90.0, d), HitPosition::Shortstop);
        assert_eq!(classify_hit_position(-45.1, d), HitPosition::Shortstop);
        assert_eq!(classify_hit_position(-15.0, d), HitPosition::ThirdBase);
        assert_eq!(classify_hit_position(-14.9, d), HitPosition::UpTheMiddle);
        assert_eq!(classify_hit_position(0.0, d), HitPosition::SecondBase);
        assert_eq!(classify_hit_position(15.0, d), HitPosition::FirstBase);
        assert_eq!(classify_hit_position(45.0, d), HitPosition::FirstBase);
        assert_eq!(classify_hit_position(45.5, d), HitPosition::SecondBase);
        assert_eq!(classify_hit_position(90.0, d), HitPosition::SecondBase);
    }

    #[test]
    fn outfield_bands() {
        let d = Some(310.0);
        assert_eq!(classify_hit_position(-60.0, d), HitPosition::LeftCenterField);
        assert_eq!(classify_hit_position(-30.0, d), HitPosition::LeftField);
        assert_eq!(classify_hit_position(-15.0, d), HitPosition::LeftField);
        assert_eq!(classify_hit_position(0.0, d), HitPosition::CenterField);
        assert_eq!(classify_hit_position(14.9, d), HitPosition::CenterField);
        assert_eq!(classify_hit_position(15.0, d), HitPosition::RightField);
        assert_eq!(classify_hit_position(90.0, d), HitPosition::RightCenterField);
        assert!(classify_hit_position(0.0, d).is_outfield());
    }

    #[test]
    fn angles_beyond_the_lines_are_foul() {
        assert_eq!(classify_hit_position(-91.0, Some(50.0)), HitPosition::FoulTerritory);
        assert_eq!(classify_hit_position(95.0, Some(250.0)), HitPosition::FoulTerritory);
        assert_eq!(classify_hit_position(f64::NAN, Some(250.0)), HitPosition::FoulTerritory);
    }
}
