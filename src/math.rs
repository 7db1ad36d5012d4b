//! Integer helpers shared by the geometric algorithms

/// Floor of the square root of `x`
///
/// Exact for every non-negative `i64`; border distances of circles and
/// capsules depend on this rounding.
///
///     use gdraw::integer_sqrt;
///     assert_eq!(integer_sqrt(0), 0);
///     assert_eq!(integer_sqrt(15), 3);
///     assert_eq!(integer_sqrt(16), 4);
///
pub fn integer_sqrt(x: i64) -> i64 {
    assert!(x >= 0, "integer_sqrt of negative value {}", x);
    let mut op = x as u64;
    let mut res = 0u64;
    let mut one = 1u64 << 62;
    while one > op {
        one >>= 2;
    }
    while one != 0 {
        if op >= res + one {
            op -= res + one;
            res = (res >> 1) + one;
        } else {
            res >>= 1;
        }
        one >>= 2;
    }
    res as i64
}

/// Quotient and remainder where the remainder takes the sign of the
/// numerator (or is zero)
///
/// Rotation sampling rounds the quotient using the remainder, which keeps
/// the result symmetric on both sides of the origin.
///
///     use gdraw::polar_div;
///     assert_eq!(polar_div(7, 2), (3, 1));
///     assert_eq!(polar_div(-7, 2), (-3, -1));
///     assert_eq!(polar_div(-7, -2), (3, -1));
///
pub fn polar_div(numerator: i64, denominator: i64) -> (i64, i64) {
    assert!(denominator != 0, "polar_div by zero");
    (numerator / denominator, numerator % denominator)
}

/// Divide and round the quotient to the nearest integer, halves away from zero
pub fn polar_div_round(numerator: i64, denominator: i64) -> i64 {
    let (q, r) = polar_div(numerator, denominator);
    if 2 * r.abs() >= denominator.abs() {
        if (numerator < 0) == (denominator < 0) { q + 1 } else { q - 1 }
    } else {
        q
    }
}

/// Division rounding toward negative infinity
pub fn div_floor(a: i64, b: i64) -> i64 {
    let (q, r) = polar_div(a, b);
    if r != 0 && ((r < 0) != (b < 0)) { q - 1 } else { q }
}

/// Division rounding toward positive infinity
pub fn div_ceil(a: i64, b: i64) -> i64 {
    let (q, r) = polar_div(a, b);
    if r != 0 && ((r < 0) == (b < 0)) { q + 1 } else { q }
}

/// Multiply two u8 values using fixed point math, `255 * 255 == 255`
///
/// See agg_color_rgba.h:395
pub fn multiply_u8(a: u8, b: u8) -> u8 {
    let base_shift = 8;
    let base_msb = 1 << (base_shift - 1);
    let (a,b) = (u32::from(a), u32::from(b));
    let t : u32  = a * b + base_msb;
    let tt : u32 = ((t >> base_shift) + t) >> base_shift;
    tt as u8
}
