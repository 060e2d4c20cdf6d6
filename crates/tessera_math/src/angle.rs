//! Angles in degrees and radians.

use std::f32::consts::{FRAC_1_PI, PI};

/// An angle that can be read out in either unit. Lets constructors taking a
/// field of view accept degrees or radians explicitly.
pub trait Angle: Copy {
    fn degrees(self) -> f32;

    fn radians(self) -> f32;
}

/// An angle in degrees.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Degrees(pub f32);

/// An angle in radians.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Radians(pub f32);

impl Angle for Degrees {
    fn degrees(self) -> f32 {
        self.0
    }

    fn radians(self) -> f32 {
        degrees_to_radians(self.0)
    }
}

impl Angle for Radians {
    fn degrees(self) -> f32 {
        radians_to_degrees(self.0)
    }

    fn radians(self) -> f32 {
        self.0
    }
}

impl From<Radians> for Degrees {
    fn from(angle: Radians) -> Self {
        Self(angle.degrees())
    }
}

impl From<Degrees> for Radians {
    fn from(angle: Degrees) -> Self {
        Self(angle.radians())
    }
}

pub fn radians_to_degrees(radians: f32) -> f32 {
    radians * (180.0 * FRAC_1_PI)
}

pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * (PI / 180.0)
}
