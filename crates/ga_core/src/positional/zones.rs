//! Tactical zone layouts on the 0-100 pitch (data frame: `x` = length, `y` = width).

use serde::{Deserialize, Serialize};

use crate::models::{PitchPoint, PITCH_EXTENT};

/// Length-axis band edges (thirds split again, boxes at 17 and 83).
pub const X_EDGES: [f64; 7] = [0.0, 17.0, 33.0, 50.0, 67.0, 83.0, 100.0];
/// Width-axis lane edges (touchline lanes, half-spaces, centre).
pub const Y_EDGES: [f64; 6] = [0.0, 21.1, 36.8, 63.2, 78.9, 100.0];

/// Zone partition used for binning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneLayout {
    /// 22 zones: wide lanes, penalty boxes and the central grid
    #[default]
    Full,
    /// 5 lanes along the length of the pitch
    Vertical,
    /// 6 bands across the pitch
    Horizontal,
}

/// A rectangle `[x_min, x_max) x [y_min, y_max)`, closed at the far touchline/goal line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub index: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Zone {
    pub fn contains(&self, p: PitchPoint) -> bool {
        in_interval(p.x, self.x_min, self.x_max) && in_interval(p.y, self.y_min, self.y_max)
    }

    pub fn centre(&self) -> PitchPoint {
        PitchPoint::new((self.x_min + self.x_max) / 2.0, (self.y_min + self.y_max) / 2.0)
    }

    pub fn area(&self) -> f64 {
        (self.x_max - self.x_min) * (self.y_max - self.y_min)
    }
}

fn in_interval(v: f64, lo: f64, hi: f64) -> bool {
    v >= lo && (v < hi || (hi >= PITCH_EXTENT && v <= hi))
}

impl ZoneLayout {
    /// Zones of the layout, indexed from 0.
    pub fn zones(self) -> Vec<Zone> {
        let mut rects: Vec<(f64, f64, f64, f64)> = Vec::new();
        match self {
            ZoneLayout::Full => {
                let (left, right) = (Y_EDGES[1], Y_EDGES[4]);
                let wide_x = [X_EDGES[0], X_EDGES[1], X_EDGES[3], X_EDGES[5], X_EDGES[6]];
                for (y0, y1) in [(Y_EDGES[0], left), (right, Y_EDGES[5])] {
                    for w in wide_x.windows(2) {
                        rects.push((w[0], w[1], y0, y1));
                    }
                }
                rects.push((X_EDGES[0], X_EDGES[1], left, right));
                rects.push((X_EDGES[5], X_EDGES[6], left, right));
                for y in Y_EDGES[1..5].windows(2) {
                    for x in X_EDGES[1..6].windows(2) {
                        rects.push((x[0], x[1], y[0], y[1]));
                    }
                }
            }
            ZoneLayout::Vertical => {
                for y in Y_EDGES.windows(2) {
                    rects.push((0.0, PITCH_EXTENT, y[0], y[1]));
                }
            }
            ZoneLayout::Horizontal => {
                for x in X_EDGES.windows(2) {
                    rects.push((x[0], x[1], 0.0, PITCH_EXTENT));
                }
            }
        }

        rects
            .into_iter()
            .enumerate()
            .map(|(index, (x_min, x_max, y_min, y_max))| Zone {
                index,
                x_min,
                x_max,
                y_min,
                y_max,
            })
            .collect()
    }

    /// Zone containing `p`, if it is on the pitch.
    pub fn locate(self, p: PitchPoint) -> Option<usize> {
        if !p.is_on_pitch() {
            return None;
        }
        self.zones().iter().find(|z| z.contains(p)).map(|z| z.index)
    }
}
