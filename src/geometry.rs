//! Points, sizes and rectangles
//!
//! Integer types address pixels directly. The precise variants carry
//! [Fixed] coordinates and are used wherever sub-pixel placement matters.
//!
//! [Fixed]: ../fixed/struct.Fixed.html

use crate::fixed::Fixed;

use std::cmp::{max, min};
use std::ops::{Add, Sub};

/// Pixel location
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq,Hash)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

/// Width and Height in pixels
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq,Hash)]
pub struct Size {
    pub w: i16,
    pub h: i16,
}

/// Rectangle described by its top-left corner and size
///
/// A standardized rectangle has a non-negative size; it covers the pixels
/// `origin.x .. origin.x + size.w` and `origin.y .. origin.y + size.h`.
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq,Hash)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

/// Sub-pixel location
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq)]
pub struct PrecisePoint {
    pub x: Fixed,
    pub y: Fixed,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };
    pub const fn new(x: i16, y: i16) -> Self {
        Point { x, y }
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, o: Point) -> Point {
        Point::new(self.x + o.x, self.y + o.y)
    }
}
impl Sub for Point {
    type Output = Point;
    fn sub(self, o: Point) -> Point {
        Point::new(self.x - o.x, self.y - o.y)
    }
}

impl Size {
    pub const fn new(w: i16, h: i16) -> Self {
        Size { w, h }
    }
}

impl Rect {
    pub const ZERO: Rect = Rect { origin: Point::ZERO, size: Size { w: 0, h: 0 } };

    pub const fn new(x: i16, y: i16, w: i16, h: i16) -> Self {
        Rect { origin: Point { x, y }, size: Size { w, h } }
    }
    /// Smallest rectangle containing both corners, inclusive
    pub fn from_corners(x1: i16, y1: i16, x2: i16, y2: i16) -> Self {
        let (x1, x2) = (min(x1, x2), max(x1, x2));
        let (y1, y2) = (min(y1, y2), max(y1, y2));
        Rect::new(x1, y1, x2 - x1 + 1, y2 - y1 + 1)
    }
    /// Last column inside the rectangle (`x + w - 1`)
    pub fn max_x(&self) -> i16 {
        self.origin.x + self.size.w - 1
    }
    /// Last row inside the rectangle (`y + h - 1`)
    pub fn max_y(&self) -> i16 {
        self.origin.y + self.size.h - 1
    }
    pub fn is_empty(&self) -> bool {
        self.size.w <= 0 || self.size.h <= 0
    }
    /// Flip negative sizes so that the size is non-negative
    pub fn standardize(&mut self) {
        if self.size.w < 0 {
            self.origin.x += self.size.w;
            self.size.w = -self.size.w;
        }
        if self.size.h < 0 {
            self.origin.y += self.size.h;
            self.size.h = -self.size.h;
        }
    }
    /// Intersection of two rectangles
    ///
    /// An empty intersection keeps a zero size.
    ///
    ///     use gdraw::Rect;
    ///     let a = Rect::new(0,0,10,10);
    ///     assert_eq!(a.clip(&Rect::new(5,5,10,10)), Rect::new(5,5,5,5));
    ///     assert!(a.clip(&Rect::new(20,20,5,5)).is_empty());
    ///
    pub fn clip(&self, other: &Rect) -> Rect {
        let x1 = max(self.origin.x, other.origin.x);
        let y1 = max(self.origin.y, other.origin.y);
        let x2 = min(i32::from(self.origin.x) + i32::from(self.size.w),
                     i32::from(other.origin.x) + i32::from(other.size.w));
        let y2 = min(i32::from(self.origin.y) + i32::from(self.size.h),
                     i32::from(other.origin.y) + i32::from(other.size.h));
        let w = max(0, x2 - i32::from(x1)) as i16;
        let h = max(0, y2 - i32::from(y1)) as i16;
        if w == 0 || h == 0 {
            Rect::new(x1, y1, 0, 0)
        } else {
            Rect::new(x1, y1, w, h)
        }
    }
    /// Smallest rectangle containing both; empty rectangles are ignored
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x1 = min(self.origin.x, other.origin.x);
        let y1 = min(self.origin.y, other.origin.y);
        let x2 = max(self.max_x(), other.max_x());
        let y2 = max(self.max_y(), other.max_y());
        Rect::from_corners(x1, y1, x2, y2)
    }
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.origin.x && p.x <= self.max_x() &&
            p.y >= self.origin.y && p.y <= self.max_y()
    }
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.is_empty() || (self.contains_point(other.origin) &&
                             other.max_x() <= self.max_x() &&
                             other.max_y() <= self.max_y())
    }
    /// Move the rectangle by an offset
    pub fn offset(&self, by: Point) -> Rect {
        Rect { origin: self.origin + by, size: self.size }
    }
    /// Shrink the rectangle by `n` pixels on every side
    pub fn inset(&self, n: i16) -> Rect {
        let w = max(0, self.size.w - 2 * n);
        let h = max(0, self.size.h - 2 * n);
        Rect::new(self.origin.x + n, self.origin.y + n, w, h)
    }
    /// Center in pixel-center coordinates
    ///
    /// For an even size the center lies between two pixels.
    pub fn center_precise(&self) -> PrecisePoint {
        PrecisePoint {
            x: Fixed::from_raw_i32(i32::from(self.origin.x) * 8 + (i32::from(self.size.w) - 1) * 4),
            y: Fixed::from_raw_i32(i32::from(self.origin.y) * 8 + (i32::from(self.size.h) - 1) * 4),
        }
    }
}

impl PrecisePoint {
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        PrecisePoint { x, y }
    }
    /// Whether both coordinates have no fractional part
    pub fn is_integral(&self) -> bool {
        self.x.fraction() == 0 && self.y.fraction() == 0
    }
    /// Integer point, fractions dropped toward negative infinity
    pub fn to_point(&self) -> Point {
        Point::new(self.x.integer(), self.y.integer())
    }
    /// Precise point at a pixel, `None` outside the fixed point range
    pub fn checked_from(p: Point) -> Option<PrecisePoint> {
        Some(PrecisePoint::new(Fixed::checked_from_int(p.x)?, Fixed::checked_from_int(p.y)?))
    }
}

/// Saturates outside the fixed point range
impl From<Point> for PrecisePoint {
    fn from(p: Point) -> Self {
        PrecisePoint::new(Fixed::from_int(p.x), Fixed::from_int(p.y))
    }
}

impl Add for PrecisePoint {
    type Output = PrecisePoint;
    fn add(self, o: PrecisePoint) -> PrecisePoint {
        PrecisePoint::new(self.x + o.x, self.y + o.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_and_union() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(-5, 2, 10, 3);
        assert_eq!(a.clip(&b), Rect::new(0, 2, 5, 3));
        assert_eq!(a.union(&b), Rect::new(-5, 0, 15, 10));
        assert_eq!(a.union(&Rect::ZERO), a);
        assert!(a.clip(&Rect::new(10, 0, 5, 5)).is_empty());
    }

    #[test]
    fn standardize_negative_size() {
        let mut r = Rect::new(10, 10, -4, -2);
        r.standardize();
        assert_eq!(r, Rect::new(6, 8, 4, 2));
    }

    #[test]
    fn rect_center() {
        let c = Rect::new(0, 0, 5, 5).center_precise();
        assert_eq!(c, PrecisePoint::from(Point::new(2, 2)));
        let c = Rect::new(0, 0, 4, 4).center_precise();
        assert_eq!(c.x.raw(), 12);
    }

    #[test]
    fn precise_range() {
        assert!(PrecisePoint::checked_from(Point::new(-4096, 4095)).is_some());
        assert!(PrecisePoint::checked_from(Point::new(8212, 20)).is_none());
        assert!(PrecisePoint::checked_from(Point::new(0, -5000)).is_none());
    }
}
