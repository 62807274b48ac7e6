use serde::{Deserialize, Serialize};

/// Pitch length/width in normalized units (both axes run 0-100).
pub const PITCH_EXTENT: f64 = 100.0;

/// A location on the normalized pitch.
///
/// In the data frame `x` runs along the length of the pitch towards the
/// opponent goal and `y` across it. Vertical-pitch plots use the swapped frame,
/// see [`PitchPoint::to_vertical`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PitchPoint {
    pub x: f64,
    pub y: f64,
}

impl PitchPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert to the vertical-pitch frame (horizontal axis = width, vertical axis = length).
    pub fn to_vertical(self) -> Self {
        Self { x: self.y, y: self.x }
    }

    pub fn distance_to(self, other: PitchPoint) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    /// Both coordinates finite and inside the 0-100 pitch.
    pub fn is_on_pitch(self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && (0.0..=PITCH_EXTENT).contains(&self.x)
            && (0.0..=PITCH_EXTENT).contains(&self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_swap() {
        let p = PitchPoint::new(80.0, 20.0);
        assert_eq!(p.to_vertical(), PitchPoint::new(20.0, 80.0));
        assert_eq!(p.to_vertical().to_vertical(), p);
    }

    #[test]
    fn test_on_pitch() {
        assert!(PitchPoint::new(0.0, 100.0).is_on_pitch());
        assert!(!PitchPoint::new(-0.1, 50.0).is_on_pitch());
        assert!(!PitchPoint::new(f64::NAN, 50.0).is_on_pitch());
    }
}
