//! Integer units
//!
//! All lengths are stored as nanometres in an `i64` and all angles as
//! micro-degrees, so geometry comparisons are exact and undo restores values
//! bit-for-bit.

use crate::error::{Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Nanometres per millimetre
pub const NM_PER_MM: i64 = 1_000_000;

/// Signed length in nanometres
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Length(i64);

impl Length {
    pub const fn new(nm: i64) -> Self {
        Self(nm)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    /// Converts millimetres to the nearest nanometre.
    pub fn from_mm(mm: f64) -> Self {
        Self((mm * NM_PER_MM as f64).round() as i64)
    }

    pub const fn to_nm(self) -> i64 {
        self.0
    }

    pub fn to_mm(self) -> f64 {
        self.0 as f64 / NM_PER_MM as f64
    }

    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Rounds to the nearest multiple of `interval`, halves away from zero.
    pub fn mapped_to_grid(self, interval: PositiveLength) -> Self {
        let grid = interval.to_nm();
        let rem = self.0.rem_euclid(grid);
        let base = self.0 - rem;
        // Exactly half way: round away from zero.
        let up = if self.0 >= 0 { rem * 2 >= grid } else { rem * 2 > grid };
        if up {
            Self(base + grid)
        } else {
            Self(base)
        }
    }
}

impl Add for Length {
    type Output = Length;
    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Length) {
        self.0 += rhs.0;
    }
}

impl Sub for Length {
    type Output = Length;
    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl SubAssign for Length {
    fn sub_assign(&mut self, rhs: Length) {
        self.0 -= rhs.0;
    }
}

impl Neg for Length {
    type Output = Length;
    fn neg(self) -> Length {
        Length(-self.0)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}mm", self.to_mm())
    }
}

/// Length which is guaranteed to be >= 0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UnsignedLength(Length);

impl UnsignedLength {
    pub fn new(nm: i64) -> Result<Self> {
        if nm < 0 {
            return Err(ValidationError::NegativeLength { value: nm }.into());
        }
        Ok(Self(Length(nm)))
    }

    pub const fn zero() -> Self {
        Self(Length(0))
    }

    /// Constant constructor; a negative value fails const evaluation.
    pub const fn new_const(nm: i64) -> Self {
        assert!(nm >= 0, "UnsignedLength must not be negative");
        Self(Length(nm))
    }

    pub const fn to_nm(self) -> i64 {
        self.0 .0
    }

    pub const fn length(self) -> Length {
        self.0
    }
}

impl TryFrom<i64> for UnsignedLength {
    type Error = crate::Error;
    fn try_from(nm: i64) -> Result<Self> {
        Self::new(nm)
    }
}

impl From<UnsignedLength> for i64 {
    fn from(l: UnsignedLength) -> i64 {
        l.to_nm()
    }
}

impl fmt::Display for UnsignedLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Length which is guaranteed to be > 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct PositiveLength(Length);

impl PositiveLength {
    pub fn new(nm: i64) -> Result<Self> {
        if nm <= 0 {
            return Err(ValidationError::NonPositiveLength { value: nm }.into());
        }
        Ok(Self(Length(nm)))
    }

    /// Constant constructor; a non-positive value fails const evaluation.
    pub const fn new_const(nm: i64) -> Self {
        assert!(nm > 0, "PositiveLength must be greater than zero");
        Self(Length(nm))
    }

    pub const fn to_nm(self) -> i64 {
        self.0 .0
    }

    pub const fn length(self) -> Length {
        self.0
    }

    pub fn to_unsigned(self) -> UnsignedLength {
        UnsignedLength(self.0)
    }
}

impl TryFrom<i64> for PositiveLength {
    type Error = crate::Error;
    fn try_from(nm: i64) -> Result<Self> {
        Self::new(nm)
    }
}

impl From<PositiveLength> for i64 {
    fn from(l: PositiveLength) -> i64 {
        l.to_nm()
    }
}

impl fmt::Display for PositiveLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Micro-degrees per degree
pub const MICRODEG_PER_DEG: i64 = 1_000_000;

/// Angle in micro-degrees
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Angle(i64);

impl Angle {
    pub const fn new(microdeg: i64) -> Self {
        Self(microdeg)
    }

    pub const fn deg0() -> Self {
        Self(0)
    }

    pub const fn deg90() -> Self {
        Self(90 * MICRODEG_PER_DEG)
    }

    pub const fn deg180() -> Self {
        Self(180 * MICRODEG_PER_DEG)
    }

    pub const fn deg270() -> Self {
        Self(270 * MICRODEG_PER_DEG)
    }

    pub fn from_deg(deg: f64) -> Self {
        Self((deg * MICRODEG_PER_DEG as f64).round() as i64)
    }

    pub const fn to_microdeg(self) -> i64 {
        self.0
    }

    pub fn to_deg(self) -> f64 {
        self.0 as f64 / MICRODEG_PER_DEG as f64
    }

    pub fn to_rad(self) -> f64 {
        self.to_deg().to_radians()
    }

    /// Maps the angle into the range [0°, 360°).
    pub fn mapped_to_0_360(self) -> Self {
        Self(self.0.rem_euclid(360 * MICRODEG_PER_DEG))
    }

    /// Returns `Some(n)` if the angle is `n * 90°` (n in 0..4 after mapping).
    pub fn quarter_turns(self) -> Option<u8> {
        let mapped = self.mapped_to_0_360().0;
        if mapped % (90 * MICRODEG_PER_DEG) == 0 {
            Some((mapped / (90 * MICRODEG_PER_DEG)) as u8)
        } else {
            None
        }
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0 + rhs.0)
    }
}

impl Sub for Angle {
    type Output = Angle;
    fn sub(self, rhs: Angle) -> Angle {
        Angle(self.0 - rhs.0)
    }
}

impl Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Angle {
        Angle(-self.0)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.to_deg())
    }
}
