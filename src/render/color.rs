//! Colors and the unsatisfied-clause color map

use crate::error::{Result, SatArtError};
use serde::{Deserialize, Serialize};

/// An 8-bit RGB color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const BLACK: Rgb = Rgb([0, 0, 0]);
    pub const WHITE: Rgb = Rgb([255, 255, 255]);
    pub const PURPLE: Rgb = Rgb([100, 0, 100]);
    pub const GREEN: Rgb = Rgb([0, 255, 0]);

    pub fn channels(&self) -> [u8; 3] {
        self.0
    }

    /// Blend `self` towards `other` by `x` in `[0, 1]`, truncating each channel
    pub fn lerp(&self, other: Rgb, x: f64) -> Rgb {
        let mut out = [0u8; 3];
        for (i, channel) in out.iter_mut().enumerate() {
            let value = (1.0 - x) * f64::from(self.0[i]) + x * f64::from(other.0[i]);
            *channel = value as u8;
        }
        Rgb(out)
    }
}

/// Maps an unsatisfied-clause count to a color.
///
/// The blend factor is `exp(-beta * unsatisfied)`, so satisfying
/// assignments get the `satisfied` color exactly and every further broken
/// clause decays towards `unsatisfied`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMap {
    unsatisfied: Rgb,
    satisfied: Rgb,
    beta: f64,
}

impl ColorMap {
    pub fn new(unsatisfied: Rgb, satisfied: Rgb, beta: f64) -> Result<Self> {
        if !beta.is_finite() || beta < 0.0 {
            return Err(SatArtError::InvalidArgument(format!(
                "beta must be a non-negative number, got {}",
                beta
            )));
        }
        Ok(Self {
            unsatisfied,
            satisfied,
            beta,
        })
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn unsatisfied(&self) -> Rgb {
        self.unsatisfied
    }

    pub fn satisfied(&self) -> Rgb {
        self.satisfied
    }

    /// Blend factor in `(0, 1]`
    #[inline]
    pub fn intensity(&self, unsatisfied_clauses: usize) -> f64 {
        (-self.beta * unsatisfied_clauses as f64).exp()
    }

    #[inline]
    pub fn color(&self, unsatisfied_clauses: usize) -> Rgb {
        self.unsatisfied
            .lerp(self.satisfied, self.intensity(unsatisfied_clauses))
    }
}

impl Default for ColorMap {
    fn default() -> Self {
        Self {
            unsatisfied: Rgb::BLACK,
            satisfied: Rgb::GREEN,
            beta: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(Rgb::BLACK.lerp(Rgb::WHITE, 0.0), Rgb::BLACK);
        assert_eq!(Rgb::BLACK.lerp(Rgb::WHITE, 1.0), Rgb::WHITE);
        assert_eq!(Rgb::PURPLE.lerp(Rgb::GREEN, 1.0), Rgb::GREEN);
    }

    #[test]
    fn test_lerp_truncates() {
        // 0.5 * 255 = 127.5
        assert_eq!(Rgb::BLACK.lerp(Rgb::WHITE, 0.5), Rgb([127, 127, 127]));
    }

    #[test]
    fn test_satisfied_assignment_gets_satisfied_color() {
        let map = ColorMap::new(Rgb::BLACK, Rgb::GREEN, 0.5).unwrap();
        assert_eq!(map.intensity(0), 1.0);
        assert_eq!(map.color(0), Rgb::GREEN);
    }

    #[test]
    fn test_decay() {
        let map = ColorMap::new(Rgb::BLACK, Rgb::GREEN, 1.0).unwrap();
        let one = map.color(1);
        // exp(-1) * 255 = 93.8
        assert_eq!(one, Rgb([0, 93, 0]));
        assert!(map.intensity(5) < map.intensity(4));
        assert_eq!(map.color(1000), Rgb::BLACK);
    }

    #[test]
    fn test_zero_beta_is_flat() {
        let map = ColorMap::new(Rgb::BLACK, Rgb::WHITE, 0.0).unwrap();
        assert_eq!(map.color(17), Rgb::WHITE);
    }

    #[test]
    fn test_invalid_beta() {
        assert!(ColorMap::new(Rgb::BLACK, Rgb::GREEN, -0.1).is_err());
        assert!(ColorMap::new(Rgb::BLACK, Rgb::GREEN, f64::NAN).is_err());
        assert!(ColorMap::new(Rgb::BLACK, Rgb::GREEN, f64::INFINITY).is_err());
    }
}
