//! Fixed point numbers with 3 fractional bits
//!
//! All geometry that needs sub-pixel placement (line end points, circle
//! centers, span edges) is expressed in [Fixed]. The raw value is the real
//! value multiplied by 8, so `1.5` is stored as `12`.
//!
//!     use gdraw::Fixed;
//!
//!     let v = Fixed::from_raw(-3);   // -0.375
//!     assert_eq!(v.integer(), -1);
//!     assert_eq!(v.fraction(), 5);
//!     assert_eq!(v.trunc(), 0);
//!

use std::convert::TryFrom;
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Number of fractional bits
pub const FIXED_SHIFT: i32 = 3;
/// Raw value of `1.0`
pub const FIXED_ONE: i32 = 1 << FIXED_SHIFT;
/// Mask of the fractional bits
pub const FIXED_MASK: i32 = FIXED_ONE - 1;
/// Largest integer a [Fixed] can hold
///
/// [Fixed]: struct.Fixed.html
pub const FIXED_INT_MAX: i16 = i16::MAX >> FIXED_SHIFT;
/// Smallest integer a [Fixed] can hold
///
/// [Fixed]: struct.Fixed.html
pub const FIXED_INT_MIN: i16 = i16::MIN >> FIXED_SHIFT;

/// Signed 16 bit fixed point value, 13 integer bits and 3 fractional bits
#[derive(Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed {
    raw: i16,
}

impl Fixed {
    pub const ZERO: Fixed = Fixed { raw: 0 };
    pub const HALF: Fixed = Fixed { raw: (FIXED_ONE / 2) as i16 };
    pub const ONE: Fixed = Fixed { raw: FIXED_ONE as i16 };

    /// Create from a raw value (real value * 8)
    pub const fn from_raw(raw: i16) -> Self {
        Fixed { raw }
    }
    /// Create from an integer, the fraction is zero
    ///
    /// Integers outside `FIXED_INT_MIN..=FIXED_INT_MAX` saturate; use
    /// [checked_from_int](#method.checked_from_int) to reject them.
    pub const fn from_int(v: i16) -> Self {
        if v > FIXED_INT_MAX {
            Fixed { raw: i16::MAX }
        } else if v < FIXED_INT_MIN {
            Fixed { raw: i16::MIN }
        } else {
            Fixed { raw: v << FIXED_SHIFT }
        }
    }
    /// Create from an integer, `None` if it does not fit
    ///
    ///     use gdraw::Fixed;
    ///     assert_eq!(Fixed::checked_from_int(4095), Some(Fixed::from_raw(32760)));
    ///     assert_eq!(Fixed::checked_from_int(4096), None);
    ///
    pub fn checked_from_int(v: i16) -> Option<Self> {
        Fixed::checked_from_raw_i32(i32::from(v) << FIXED_SHIFT)
    }
    /// Create from a wide raw value, saturating to the 16 bit range
    pub fn from_raw_i32(raw: i32) -> Self {
        let raw = raw.max(i32::from(i16::MIN)).min(i32::from(i16::MAX));
        Fixed { raw: raw as i16 }
    }
    /// Create from a wide raw value, `None` outside the 16 bit range
    pub fn checked_from_raw_i32(raw: i32) -> Option<Self> {
        i16::try_from(raw).ok().map(|raw| Fixed { raw })
    }
    /// Raw value
    pub const fn raw(self) -> i16 {
        self.raw
    }
    /// Raw value widened for intermediate arithmetic
    pub const fn raw32(self) -> i32 {
        self.raw as i32
    }
    /// Integer part, rounded toward negative infinity
    ///
    /// Together with [fraction](#method.fraction) this always satisfies
    /// `integer * 8 + fraction == raw`.
    pub const fn integer(self) -> i16 {
        self.raw >> FIXED_SHIFT
    }
    /// Fractional part in eighths, always in `0..8`
    pub const fn fraction(self) -> i16 {
        self.raw & FIXED_MASK as i16
    }
    /// Integer part, rounded toward zero
    pub const fn trunc(self) -> i16 {
        self.raw / FIXED_ONE as i16
    }
    /// Nearest integer, halves round up
    pub fn round(self) -> i16 {
        ((self.raw32() + FIXED_ONE / 2) >> FIXED_SHIFT) as i16
    }
    /// Smallest integer not less than the value
    pub fn ceil(self) -> i16 {
        ((self.raw32() + FIXED_MASK) >> FIXED_SHIFT) as i16
    }
    /// Multiply by an integer
    pub fn mul_int(self, v: i16) -> Self {
        Fixed::from_raw_i32(self.raw32() * i32::from(v))
    }
    pub fn abs(self) -> Self {
        Fixed { raw: self.raw.abs() }
    }
}

impl From<i16> for Fixed {
    fn from(v: i16) -> Self {
        Fixed::from_int(v)
    }
}

impl fmt::Debug for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}+{}/8", self.integer(), self.fraction())
    }
}

impl Add for Fixed {
    type Output = Fixed;
    fn add(self, other: Fixed) -> Fixed {
        Fixed { raw: self.raw + other.raw }
    }
}
impl Sub for Fixed {
    type Output = Fixed;
    fn sub(self, other: Fixed) -> Fixed {
        Fixed { raw: self.raw - other.raw }
    }
}
impl Neg for Fixed {
    type Output = Fixed;
    fn neg(self) -> Fixed {
        Fixed { raw: -self.raw }
    }
}
impl AddAssign for Fixed {
    fn add_assign(&mut self, other: Fixed) {
        self.raw += other.raw;
    }
}
impl SubAssign for Fixed {
    fn sub_assign(&mut self, other: Fixed) {
        self.raw -= other.raw;
    }
}
