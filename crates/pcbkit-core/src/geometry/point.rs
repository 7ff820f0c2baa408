use crate::units::{Angle, Length, PositiveLength};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Mirror axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Mirror left/right (flip the X coordinate)
    Horizontal,
    /// Mirror top/bottom (flip the Y coordinate)
    Vertical,
}

/// Point in board coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: Length,
    pub y: Length,
}

impl Point {
    pub const fn new(x: Length, y: Length) -> Self {
        Self { x, y }
    }

    /// Creates a point from nanometre coordinates.
    pub const fn from_nm(x: i64, y: i64) -> Self {
        Self::new(Length::new(x), Length::new(y))
    }

    pub fn from_mm(x: f64, y: f64) -> Self {
        Self::new(Length::from_mm(x), Length::from_mm(y))
    }

    pub fn is_origin(&self) -> bool {
        self.x == Length::zero() && self.y == Length::zero()
    }

    pub fn mapped_to_grid(&self, interval: PositiveLength) -> Self {
        Self::new(self.x.mapped_to_grid(interval), self.y.mapped_to_grid(interval))
    }

    /// Euclidean distance, rounded to the nearest nanometre.
    pub fn distance_to(&self, other: &Point) -> Length {
        let dx = (other.x - self.x).to_nm() as f64;
        let dy = (other.y - self.y).to_nm() as f64;
        Length::new(dx.hypot(dy).round() as i64)
    }

    /// Rotates counter-clockwise around `center`.
    ///
    /// Multiples of 90° are computed with integer arithmetic so that repeated
    /// rotations return exactly to the starting point.
    pub fn rotated(&self, angle: Angle, center: Point) -> Self {
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        let (rx, ry) = match angle.quarter_turns() {
            Some(0) => (dx, dy),
            Some(1) => (-dy, dx),
            Some(2) => (-dx, -dy),
            Some(3) => (dy, -dx),
            _ => {
                let (sin, cos) = angle.to_rad().sin_cos();
                let fx = dx.to_nm() as f64;
                let fy = dy.to_nm() as f64;
                (
                    Length::new((fx * cos - fy * sin).round() as i64),
                    Length::new((fx * sin + fy * cos).round() as i64),
                )
            }
        };
        Self::new(center.x + rx, center.y + ry)
    }

    pub fn mirrored(&self, orientation: Orientation, center: Point) -> Self {
        match orientation {
            Orientation::Horizontal => Self::new(center.x + center.x - self.x, self.y),
            Orientation::Vertical => Self::new(self.x, center.y + center.y - self.y),
        }
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x.to_mm(), self.y.to_mm())
    }
}

/// Distance from `p` to the segment `a`-`b`.
pub fn distance_to_segment(p: &Point, a: &Point, b: &Point) -> Length {
    let ax = a.x.to_nm() as f64;
    let ay = a.y.to_nm() as f64;
    let bx = b.x.to_nm() as f64;
    let by = b.y.to_nm() as f64;
    let px = p.x.to_nm() as f64;
    let py = p.y.to_nm() as f64;
    let (vx, vy) = (bx - ax, by - ay);
    let len2 = vx * vx + vy * vy;
    if len2 == 0.0 {
        return p.distance_to(a);
    }
    let t = (((px - ax) * vx + (py - ay) * vy) / len2).clamp(0.0, 1.0);
    let (cx, cy) = (ax + t * vx, ay + t * vy);
    Length::new((px - cx).hypot(py - cy).round() as i64)
}
