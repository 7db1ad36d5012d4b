//! Lines
//!
//! How does this work
//!
//!   draw_line(p0, p1)
//!     stroke width > 1  -- capsule: rectangle between the end points plus
//!                          two round caps, filled one scan line at a time
//!       offset = perpendicular * half width      -- high precision sqrt
//!       corners p0 +- offset, p1 +- offset       -- top, left, right, bottom
//!       per scan line: margins from the corner edges, joined with the caps
//!       first and last scan line: partial coverage when antialiased
//!     antialiased       -- Wu: two straddling pixels per step
//!     otherwise         -- Bresenham
//!
//!   Horizontal, vertical and diagonal one pixel lines are exact in every
//!   mode.

use crate::backend::{assign_span, SpanAxis};
use crate::circle::fill_disc;
use crate::color::Color8;
use crate::context::GContext;
use crate::fixed::FIXED_ONE;
use crate::geometry::{Point, PrecisePoint};
use crate::math::{div_ceil, div_floor, integer_sqrt, polar_div, polar_div_round};

use std::cmp::{max, min};

const ONE: i64 = FIXED_ONE as i64;
const HALF: i64 = ONE / 2;
/// Extra precision of the edge offset, applied inside the square root
const OFFSET_PRECISION: i64 = 16;

/// Pixels of a line between two points, end points included
///
/// Steps along the longer axis; the error term decides when to step the
/// shorter one.
///
///     use gdraw::{BresenhamInterpolator, Point};
///     let px: Vec<_> = BresenhamInterpolator::new(Point::new(0,0), Point::new(4,2)).collect();
///     assert_eq!(px.len(), 5);
///     assert_eq!(px[0], Point::new(0,0));
///     assert_eq!(px[4], Point::new(4,2));
///
#[derive(Debug,Clone)]
pub struct BresenhamInterpolator {
    x: i16,
    y: i16,
    /// Line is primarily vertical
    ver: bool,
    inc_x: i16,
    inc_y: i16,
    major: i32,
    minor: i32,
    err: i32,
    remaining: i32,
}

impl BresenhamInterpolator {
    pub fn new(p0: Point, p1: Point) -> Self {
        let dx = (i32::from(p1.x) - i32::from(p0.x)).abs();
        let dy = (i32::from(p1.y) - i32::from(p0.y)).abs();
        let ver = dy > dx;
        let (major, minor) = if ver { (dy, dx) } else { (dx, dy) };
        BresenhamInterpolator {
            x: p0.x,
            y: p0.y,
            ver,
            inc_x: if p1.x >= p0.x { 1 } else { -1 },
            inc_y: if p1.y >= p0.y { 1 } else { -1 },
            major, minor,
            err: major / 2,
            remaining: major + 1,
        }
    }
}

impl Iterator for BresenhamInterpolator {
    type Item = Point;
    fn next(&mut self) -> Option<Point> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let p = Point::new(self.x, self.y);
        if self.remaining > 0 {
            self.err -= self.minor;
            let step_minor = self.err < 0;
            if step_minor {
                self.err += self.major;
            }
            if self.ver {
                self.y += self.inc_y;
                if step_minor { self.x += self.inc_x; }
            } else {
                self.x += self.inc_x;
                if step_minor { self.y += self.inc_y; }
            }
        }
        Some(p)
    }
}

/// Wu line steps
///
/// Each step covers one position on the major axis with two pixels whose
/// coverage sums to 255. End points are fully covered. Lines that are
/// horizontal, vertical or diagonal are not handled here.
#[derive(Debug,Clone)]
pub(crate) struct WuSteps {
    major: i16,
    minor: i16,
    end: i16,
    minor_inc: i16,
    ver: bool,
    adj: u16,
    acc: u16,
    started: bool,
    done: bool,
    last: Point,
}

impl WuSteps {
    pub(crate) fn new(p0: Point, p1: Point) -> Self {
        let ver = (p1.y - p0.y).abs() > (p1.x - p0.x).abs();
        // walk along the major axis in increasing order
        let (a, b) = if ver {
            if p0.y <= p1.y { (p0, p1) } else { (p1, p0) }
        } else if p0.x <= p1.x { (p0, p1) } else { (p1, p0) };
        let (major, minor, end, d_major, d_minor) = if ver {
            (a.y, a.x, b.y, b.y - a.y, b.x - a.x)
        } else {
            (a.x, a.y, b.x, b.x - a.x, b.y - a.y)
        };
        let adj = if d_major == 0 {
            0
        } else {
            ((u32::from(d_minor.unsigned_abs()) << 16) / u32::from(d_major.unsigned_abs())) as u16
        };
        WuSteps {
            major, minor, end, ver, adj,
            minor_inc: if d_minor >= 0 { 1 } else { -1 },
            acc: 0,
            started: false,
            done: false,
            last: b,
        }
    }
    fn point(&self, major: i16, minor: i16) -> Point {
        if self.ver { Point::new(minor, major) } else { Point::new(major, minor) }
    }
}

impl Iterator for WuSteps {
    type Item = ((Point, u8), (Point, u8));
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            let p = self.point(self.major, self.minor);
            if self.major == self.end {
                self.done = true;
            }
            return Some(((p, 255), (p, 0)));
        }
        self.major += 1;
        if self.major >= self.end {
            self.done = true;
            return Some(((self.last, 255), (self.last, 0)));
        }
        let (acc, carry) = self.acc.overflowing_add(self.adj);
        self.acc = acc;
        if carry {
            self.minor += self.minor_inc;
        }
        let w = (self.acc >> 8) as u8;
        let main = self.point(self.major, self.minor);
        let side = self.point(self.major, self.minor + self.minor_inc);
        Some(((main, 255 - w), (side, w)))
    }
}

fn bresenham_line(ctx: &mut GContext, p0: Point, p1: Point, color: Color8) {
    let imp = ctx.draw_implementation();
    if p0.y == p1.y {
        let (x1, x2) = (min(p0.x, p1.x), max(p0.x, p1.x));
        imp.blend_horizontal_line_raw(ctx, p0.y, x1, x2, color);
        return;
    }
    if p0.x == p1.x {
        let (y1, y2) = (min(p0.y, p1.y), max(p0.y, p1.y));
        imp.blend_vertical_line_raw(ctx, p0.x, y1, y2, color);
        return;
    }
    let clip = ctx.clip_rect();
    for p in BresenhamInterpolator::new(p0, p1) {
        if clip.contains_point(p) {
            imp.blend_horizontal_line_raw(ctx, p.y, p.x, p.x, color);
        }
    }
}

fn wu_line(ctx: &mut GContext, p0: Point, p1: Point, color: Color8) {
    let (dx, dy) = ((p1.x - p0.x).abs(), (p1.y - p0.y).abs());
    if dx == 0 || dy == 0 || dx == dy {
        return bresenham_line(ctx, p0, p1, color);
    }
    let imp = ctx.draw_implementation();
    let clip = ctx.clip_rect();
    for ((main, cm), (side, cs)) in WuSteps::new(p0, p1) {
        for &(p, c) in &[(main, cm), (side, cs)] {
            if c > 0 && clip.contains_point(p) {
                imp.blend_horizontal_line_raw(ctx, p.y, p.x, p.x, color.with_coverage(c));
            }
        }
    }
}

fn union(a: Option<(i64, i64)>, b: Option<(i64, i64)>) -> Option<(i64, i64)> {
    match (a, b) {
        (Some(a), Some(b)) => Some((min(a.0, b.0), max(a.1, b.1))),
        (a, None) => a,
        (None, b) => b,
    }
}

/// `u` on the edge from `a` to `b` at scan position `v`
///
/// Points are `(u, v)` in raw units and `a` has the smaller `v`. A flat
/// edge yields its outer end: the smaller `u` for a left margin, the
/// larger for a right one.
fn edge_at(a: (i64, i64), b: (i64, i64), v: i64, right: bool) -> i64 {
    let den = b.1 - a.1;
    if den == 0 {
        return if right { max(a.0, b.0) } else { min(a.0, b.0) };
    }
    let (q, r) = polar_div(2 * (b.0 - a.0) * (v - a.1) + den, 2 * den);
    // truncation rounds falling edges up and rising edges down, so a
    // falling edge steps back to round half up like a rising one
    let compensation = if r < 0 { -1 } else { 0 };
    a.0 + q + compensation
}

/// Rectangle between the offset corners of a wide line
///
/// The corners are sorted into the far top and bottom (smallest and
/// largest `v`) and the left and right ones in between. The left margin
/// runs top, left, bottom; the right margin top, right, bottom.
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
struct StrokeQuad {
    top: (i64, i64),
    left: (i64, i64),
    right: (i64, i64),
    bottom: (i64, i64),
}

impl StrokeQuad {
    fn new(corners: [(i64, i64); 4]) -> Self {
        let mut c = corners;
        c.sort_by_key(|&(u, v)| (v, u));
        let (top, bottom) = (c[0], c[3]);
        // which side of the top-bottom diagonal a corner lies on
        let side = |p: (i64, i64)| (p.0 - top.0) * (bottom.1 - top.1) - (bottom.0 - top.0) * (p.1 - top.1);
        let (left, right) = if side(c[1]) <= side(c[2]) { (c[1], c[2]) } else { (c[2], c[1]) };
        StrokeQuad { top, left, right, bottom }
    }
    /// Margins at scan position `v`
    fn span(&self, v: i64) -> Option<(i64, i64)> {
        if v < self.top.1 || v > self.bottom.1 {
            return None;
        }
        let lo = if v <= self.left.1 {
            edge_at(self.top, self.left, v, false)
        } else {
            edge_at(self.left, self.bottom, v, false)
        };
        let hi = if v <= self.right.1 {
            edge_at(self.top, self.right, v, true)
        } else {
            edge_at(self.right, self.bottom, v, true)
        };
        if lo <= hi { Some((lo, hi)) } else { None }
    }
}

/// Fill the pixels within `radius` (raw) of the segment `p0`-`p1`
///
/// Spans run along the larger component of the edge offset, so a mostly
/// horizontal line is filled column by column. Each scan line joins the
/// margins of the rectangle with those of the two cap circles. When
/// antialiased, a scan line whose pixel is only partly inside the
/// capsule's extent is drawn with that fraction of coverage.
fn stroke_capsule(ctx: &mut GContext, p0: PrecisePoint, p1: PrecisePoint, radius: i64, color: Color8) {
    if p0 == p1 {
        return fill_disc(ctx, p0, radius - HALF, color);
    }
    let (ax, ay) = (i64::from(p0.x.raw()), i64::from(p0.y.raw()));
    let (bx, by) = (i64::from(p1.x.raw()), i64::from(p1.y.raw()));
    let (dx, dy) = (bx - ax, by - ay);
    let len = integer_sqrt((dx * dx + dy * dy) * OFFSET_PRECISION * OFFSET_PRECISION);
    let ox = polar_div_round(-dy * radius * OFFSET_PRECISION, len);
    let oy = polar_div_round(dx * radius * OFFSET_PRECISION, len);

    let horizontal = ox.abs() >= oy.abs();
    let uv = |x: i64, y: i64| if horizontal { (x, y) } else { (y, x) };
    let axis = if horizontal { SpanAxis::Horizontal } else { SpanAxis::Vertical };
    let quad = StrokeQuad::new([uv(ax + ox, ay + oy), uv(ax - ox, ay - oy),
                                uv(bx + ox, by + oy), uv(bx - ox, by - oy)]);
    let caps = [uv(ax, ay), uv(bx, by)];
    let section = |v: i64| {
        let cap = |c: (i64, i64)| {
            let d = v - c.1;
            let r2 = radius * radius - d * d;
            if r2 < 0 {
                None
            } else {
                let h = integer_sqrt(r2);
                Some((c.0 - h, c.0 + h))
            }
        };
        union(quad.span(v), union(cap(caps[0]), cap(caps[1])))
    };

    let aa = ctx.antialiased();
    let clip = ctx.clip_rect();
    let (scan_lo, scan_hi) = if horizontal {
        (i64::from(clip.origin.y), i64::from(clip.max_y()))
    } else {
        (i64::from(clip.origin.x), i64::from(clip.max_x()))
    };
    let v_min = min(caps[0].1, caps[1].1) - radius;
    let v_max = max(caps[0].1, caps[1].1) + radius;
    let (first, last) = if aa {
        (div_floor(v_min - HALF, ONE) + 1, div_ceil(v_max + HALF, ONE) - 1)
    } else {
        (div_ceil(v_min, ONE), div_floor(v_max, ONE))
    };
    log::trace!("capsule {:?} {:?} radius {} quad {:?} scans {}..={}", p0, p1, radius, quad, first, last);
    for s in max(first, scan_lo) ..= min(last, scan_hi) {
        let v = s * ONE;
        let (lo, hi) = (max(v - HALF, v_min), min(v + HALF, v_max));
        let (sample, c) = if aa && hi - lo < ONE {
            (div_floor(lo + hi, 2), color.with_coverage(((hi - lo) * 255 / ONE) as u8))
        } else {
            (v, color)
        };
        if c.is_invisible() {
            continue;
        }
        if let Some((a, b)) = section(sample) {
            assign_span(ctx, axis, s as i16, a, b, aa, aa, c);
        }
    }
}

impl<'a> GContext<'a> {
    /// Draw a line with the stroke color and width
    ///
    ///     use gdraw::{Bitmap,BitmapFormat,Size,GContext,Point,Color8};
    ///
    ///     let mut bm = Bitmap::new(BitmapFormat::Bit8, Size::new(20,20));
    ///     let mut ctx = GContext::new(&mut bm);
    ///     ctx.set_stroke_color(Color8::RED);
    ///     ctx.draw_line(Point::new(2,3), Point::new(12,3));
    ///     drop(ctx);
    ///     assert_eq!(bm.get_color(2,3), Color8::RED);
    ///     assert_eq!(bm.get_color(12,3), Color8::RED);
    ///     assert_eq!(bm.get_color(13,3), Color8::CLEAR);
    ///
    pub fn draw_line(&mut self, p0: Point, p1: Point) {
        let color = self.draw_state().stroke_color;
        if !self.can_draw_with(color) {
            return;
        }
        let width = self.stroke_width_odd();
        if width > 1 {
            if let (Some(a), Some(b)) = (self.to_global_fixed(p0), self.to_global_fixed(p1)) {
                stroke_capsule(self, a, b, i64::from(width) * HALF, color);
            }
        } else {
            let (a, b) = (self.to_global(p0), self.to_global(p1));
            if self.antialiased() {
                wu_line(self, a, b, color);
            } else {
                bresenham_line(self, a, b, color);
            }
        }
        self.finish();
    }
    /// Draw a line between sub-pixel end points
    ///
    /// Wide strokes keep the sub-pixel placement; one pixel lines snap to
    /// the nearest pixels.
    pub fn draw_line_precise(&mut self, p0: PrecisePoint, p1: PrecisePoint) {
        let width = self.stroke_width_odd();
        if width <= 1 {
            let round = |p: PrecisePoint| Point::new(p.x.round(), p.y.round());
            self.draw_line(round(p0), round(p1));
            return;
        }
        let color = self.draw_state().stroke_color;
        if !self.can_draw_with(color) {
            return;
        }
        if let (Some(a), Some(b)) = (self.to_global_precise(p0), self.to_global_precise(p1)) {
            stroke_capsule(self, a, b, i64::from(width) * HALF, color);
        }
        self.finish();
    }
}
