//! Ovals, Arcs and Radial Fills
//!
//! How does this work
//!
//!   Every filled round shape goes through one scanline engine:
//!
//!   ```text
//!     fill_radial_precise( center, outer radii, inner radii, angles )
//!       EllipseDrawConfig        -- quadrants full / partial / empty
//!       for each row
//!         outer half width       -- integer_sqrt, exact
//!         inner half width       -- the hole, when inner radii are set
//!         split at the center column into a left and a right piece
//!         full quadrant          -- one span, antialiased ellipse edges
//!         partial quadrant       -- runs of pixels inside the angle sweep
//!   ```
//!
//!   Radii given to the engine are geometric: in raw fixed point units
//!   and measured to the edge of the shape. A circle of integer radius
//!   `r` around a pixel center has a geometric radius of `r + 1/2` and
//!   spans `2r + 1` pixels.
//!
//!   Circles, stroked circles, ovals, pies, rings and arcs all use it, so
//!   the same geometry always yields the same pixels.

use crate::backend::{assign_span, SpanAxis};
use crate::color::Color8;
use crate::context::GContext;
use crate::fixed::{Fixed, FIXED_ONE};
use crate::geometry::{Point, PrecisePoint, Rect};
use crate::math::{div_ceil, div_floor, integer_sqrt, polar_div_round};
use crate::trig::{angle_normalize, cos_lookup, sin_lookup, FULL_TURN, QUARTER_TURN, TRIG_MAX_RATIO};

use std::ops::{BitOr, BitOrAssign};

const ONE: i64 = FIXED_ONE as i64;
const HALF: i64 = ONE / 2;

/// Set of circle quadrants
///
/// Quadrants are numbered clockwise from 12 o'clock: 0 is top right, 1
/// bottom right, 2 bottom left and 3 top left.
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq,Hash)]
pub struct Quadrants {
    bits: u8,
}

impl Quadrants {
    pub const NONE: Quadrants = Quadrants { bits: 0 };
    pub const TOP_RIGHT: Quadrants = Quadrants { bits: 1 };
    pub const BOTTOM_RIGHT: Quadrants = Quadrants { bits: 2 };
    pub const BOTTOM_LEFT: Quadrants = Quadrants { bits: 4 };
    pub const TOP_LEFT: Quadrants = Quadrants { bits: 8 };
    pub const ALL: Quadrants = Quadrants { bits: 15 };

    /// Single quadrant by index, `0..4`
    pub const fn from_index(q: u8) -> Quadrants {
        Quadrants { bits: 1 << (q & 3) }
    }
    pub fn contains(self, other: Quadrants) -> bool {
        self.bits & other.bits == other.bits
    }
    pub fn intersects(self, other: Quadrants) -> bool {
        self.bits & other.bits != 0
    }
    pub fn is_empty(self) -> bool {
        self.bits == 0
    }
    /// Quadrant index of an offset from the center
    ///
    /// Offsets on an axis belong to the quadrant that starts there; the
    /// center itself belongs to none.
    pub fn index_of_offset(dx: i64, dy: i64) -> Option<u8> {
        if dx >= 0 && dy < 0 {
            Some(0)
        } else if dx > 0 && dy >= 0 {
            Some(1)
        } else if dx <= 0 && dy > 0 {
            Some(2)
        } else if dx < 0 && dy <= 0 {
            Some(3)
        } else {
            None
        }
    }
    /// Quadrants an offset touches, counting both sides of an axis
    pub(crate) fn touching_offset(dx: i64, dy: i64) -> Quadrants {
        let mut q = Quadrants::NONE;
        if dx >= 0 && dy <= 0 { q |= Quadrants::TOP_RIGHT; }
        if dx >= 0 && dy >= 0 { q |= Quadrants::BOTTOM_RIGHT; }
        if dx <= 0 && dy >= 0 { q |= Quadrants::BOTTOM_LEFT; }
        if dx <= 0 && dy <= 0 { q |= Quadrants::TOP_LEFT; }
        q
    }
}

impl BitOr for Quadrants {
    type Output = Quadrants;
    fn bitor(self, o: Quadrants) -> Quadrants {
        Quadrants { bits: self.bits | o.bits }
    }
}
impl BitOrAssign for Quadrants {
    fn bitor_assign(&mut self, o: Quadrants) {
        self.bits |= o.bits;
    }
}

#[derive(Debug,Copy,Clone,PartialEq,Eq)]
enum QuadrantFill {
    Empty,
    Partial,
    Full,
}

/// Angle range `[start, end)` classified by quadrant
///
///     use gdraw::{EllipseDrawConfig, Quadrants, QUARTER_TURN};
///     let c = EllipseDrawConfig::new(QUARTER_TURN / 2, 2 * QUARTER_TURN + QUARTER_TURN / 2);
///     assert_eq!(c.start_quadrant, 0);
///     assert_eq!(c.end_quadrant, 2);
///     assert_eq!(c.full_quadrants, Quadrants::BOTTOM_RIGHT);
///
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct EllipseDrawConfig {
    /// Start angle, normalized
    pub start: i32,
    /// Swept angle, `0 ..= FULL_TURN`
    pub range: i32,
    /// Quadrant holding the start angle
    pub start_quadrant: u8,
    /// Quadrant holding the last angle of the range
    pub end_quadrant: u8,
    /// Quadrants entirely inside the range
    pub full_quadrants: Quadrants,
    start_ray: (i64, i64),
    end_ray: (i64, i64),
}

impl EllipseDrawConfig {
    /// Classify `[angle_start, angle_end)`
    ///
    /// An end at or before the start is empty; a range of a full turn or
    /// more covers the whole ellipse.
    pub fn new(angle_start: i32, angle_end: i32) -> Self {
        let range = (i64::from(angle_end) - i64::from(angle_start)).max(0).min(i64::from(FULL_TURN)) as i32;
        let start = angle_normalize(angle_start);
        let mut cfg = EllipseDrawConfig {
            start, range,
            start_quadrant: (start / QUARTER_TURN) as u8,
            end_quadrant: 0,
            full_quadrants: Quadrants::NONE,
            start_ray: ray(start),
            end_ray: ray(start.wrapping_add(range)),
        };
        if range == 0 {
            cfg.end_quadrant = cfg.start_quadrant;
            return cfg;
        }
        if range >= FULL_TURN {
            cfg.start_quadrant = 0;
            cfg.end_quadrant = 3;
            cfg.full_quadrants = Quadrants::ALL;
            return cfg;
        }
        let last = start + range - 1;
        cfg.end_quadrant = ((last / QUARTER_TURN) % 4) as u8;
        for q in 0 .. 4 {
            for turn in 0 .. 2 {
                let lo = q * QUARTER_TURN + turn * FULL_TURN;
                if start <= lo && lo + QUARTER_TURN <= start + range {
                    cfg.full_quadrants |= Quadrants::from_index(q as u8);
                }
            }
        }
        cfg
    }
    pub fn is_empty(&self) -> bool {
        self.range == 0
    }
    pub fn is_full(&self) -> bool {
        self.range >= FULL_TURN
    }
    fn fill(&self, q: u8) -> QuadrantFill {
        if self.full_quadrants.contains(Quadrants::from_index(q)) {
            QuadrantFill::Full
        } else if !self.is_empty() && (q == self.start_quadrant || q == self.end_quadrant) {
            QuadrantFill::Partial
        } else {
            QuadrantFill::Empty
        }
    }
    /// Whether the direction of an offset from the center is in the range
    pub fn contains_offset(&self, dx: i64, dy: i64) -> bool {
        if self.is_full() {
            return true;
        }
        if self.is_empty() || (dx == 0 && dy == 0) {
            return false;
        }
        let after_start = half_plane(self.start_ray, dx, dy);
        let after_end = half_plane(self.end_ray, dx, dy);
        if self.range <= FULL_TURN / 2 {
            after_start && !after_end
        } else {
            after_start || !after_end
        }
    }
}

/// Screen direction of an angle, scaled by TRIG_MAX_RATIO
fn ray(angle: i32) -> (i64, i64) {
    (i64::from(sin_lookup(angle)), -i64::from(cos_lookup(angle)))
}

/// Clockwise angle from `v` to `(dx,dy)` is in `[0, half turn)`
fn half_plane(v: (i64, i64), dx: i64, dy: i64) -> bool {
    let cross = v.0 * dy - v.1 * dx;
    cross > 0 || (cross == 0 && v.0 * dx + v.1 * dy >= 0)
}

/// Point on an ellipse in raw units, exact on the axes
fn ellipse_point_raw(cx: i64, cy: i64, rx: i64, ry: i64, angle: i32) -> (i64, i64) {
    let angle = angle_normalize(angle);
    if angle % QUARTER_TURN == 0 {
        return match angle / QUARTER_TURN {
            0 => (cx, cy - ry),
            1 => (cx + rx, cy),
            2 => (cx, cy + ry),
            _ => (cx - rx, cy),
        };
    }
    let max = i64::from(TRIG_MAX_RATIO);
    (cx + polar_div_round(rx * i64::from(sin_lookup(angle)), max),
     cy - polar_div_round(ry * i64::from(cos_lookup(angle)), max))
}

/// Point at `angle` on the ellipse with radii `rx`, `ry` around `center`
///
///     use gdraw::{point_on_ellipse, PrecisePoint, Fixed, QUARTER_TURN, FULL_TURN};
///     let c = PrecisePoint::new(Fixed::from_int(10), Fixed::from_int(10));
///     let p = point_on_ellipse(c, Fixed::from_int(5), Fixed::from_int(3), QUARTER_TURN);
///     assert_eq!(p, PrecisePoint::new(Fixed::from_int(15), Fixed::from_int(10)));
///     let p = point_on_ellipse(c, Fixed::from_int(5), Fixed::from_int(3), FULL_TURN + 2 * QUARTER_TURN);
///     assert_eq!(p, PrecisePoint::new(Fixed::from_int(10), Fixed::from_int(13)));
///
pub fn point_on_ellipse(center: PrecisePoint, rx: Fixed, ry: Fixed, angle: i32) -> PrecisePoint {
    let (x, y) = ellipse_point_raw(i64::from(center.x.raw()), i64::from(center.y.raw()),
                                   i64::from(rx.raw()), i64::from(ry.raw()), angle);
    PrecisePoint::new(Fixed::from_raw_i32(x as i32), Fixed::from_raw_i32(y as i32))
}

/// Point at `angle` on the largest circle centered in `rect`
pub fn point_from_polar(rect: Rect, angle: i32) -> Point {
    let mut rect = rect;
    rect.standardize();
    let c = rect.center_precise();
    let side = i64::from(rect.size.w.min(rect.size.h));
    let r = (side - 1).max(0) * HALF;
    let (x, y) = ellipse_point_raw(i64::from(c.x.raw()), i64::from(c.y.raw()), r, r, angle);
    Point::new(Fixed::from_raw_i32(x as i32).round(), Fixed::from_raw_i32(y as i32).round())
}

/// Fill an elliptic ring, pie or disc
///
/// `outer` and `inner` are geometric radii in raw units (see the module
/// documentation); an inner radius of zero leaves no hole. `center` is
/// absolute.
pub(crate) fn fill_radial_precise(ctx: &mut GContext, center: PrecisePoint,
                                  outer: (i64, i64), inner: (i64, i64),
                                  config: &EllipseDrawConfig, color: Color8) {
    let (cx, cy) = (i64::from(center.x.raw()), i64::from(center.y.raw()));
    let (rxe, rye) = outer;
    if rxe <= 0 || rye <= 0 || config.is_empty() {
        return;
    }
    let (irx, iry) = inner;
    let hole = irx > 0 && iry > 0;
    let aa = ctx.antialiased();
    log::trace!("radial center {:?} outer {:?} inner {:?} {:?}", center, outer, inner, config);

    let clip = ctx.clip_rect();
    let y_first = div_ceil(cy - rye, ONE).max(i64::from(clip.origin.y));
    let y_last = div_floor(cy + rye, ONE).min(i64::from(clip.max_y()));
    for py in y_first ..= y_last {
        let dy = py * ONE - cy;
        let v = rye * rye - dy * dy;
        if v < 0 {
            continue;
        }
        let hw = integer_sqrt(v * rxe * rxe / (rye * rye));
        let hl = if hole {
            let w = iry * iry - dy * dy;
            if w > 0 {
                let y = div_ceil(w * irx * irx, iry * iry);
                if y >= 1 { Some(integer_sqrt(y - 1)) } else { None }
            } else {
                None
            }
        } else {
            None
        };
        let pieces = match hl {
            Some(hl) => [Some((cx - hw, cx - hl - 1)), Some((cx + hl + 1, cx + hw))],
            None => [Some((cx - hw, cx + hw)), None],
        };
        let left_max = if dy > 0 { cx } else { cx - 1 };
        let right_min = if dy < 0 { cx } else { cx + 1 };
        let (left_q, right_q) = (if dy > 0 { 2 } else { 3 }, if dy < 0 { 0 } else { 1 });
        for &(a, b) in pieces.iter().flatten() {
            if a > b {
                continue;
            }
            if a <= left_max {
                let (la, lb) = (a, b.min(left_max));
                row_piece(ctx, config, left_q, py, cx, dy, la, lb, aa, aa && lb == b, color);
            }
            if b >= right_min {
                let (ra, rb) = (a.max(right_min), b);
                row_piece(ctx, config, right_q, py, cx, dy, ra, rb, aa && ra == a, aa, color);
            }
            if dy == 0 && a <= cx && cx <= b && cx % ONE == 0 {
                assign_span(ctx, SpanAxis::Horizontal, py as i16, cx, cx, false, false, color);
            }
        }
    }
}

/// Draw the part of a row piece inside the angle range
#[allow(clippy::too_many_arguments)]
fn row_piece(ctx: &mut GContext, config: &EllipseDrawConfig, q: u8, py: i64, cx: i64, dy: i64,
             a: i64, b: i64, aa_a: bool, aa_b: bool, color: Color8) {
    let y = py as i16;
    match config.fill(q) {
        QuadrantFill::Empty => {},
        QuadrantFill::Full => assign_span(ctx, SpanAxis::Horizontal, y, a, b, aa_a, aa_b, color),
        QuadrantFill::Partial => {
            let clip = ctx.clip_rect();
            let first = div_ceil(a, ONE);
            let last = div_floor(b, ONE);
            let lo = first.max(i64::from(clip.origin.x) - 1);
            let hi = last.min(i64::from(clip.max_x()) + 1);
            let mut run: Option<i64> = None;
            for px in lo ..= hi + 1 {
                let inside = px <= hi && config.contains_offset(px * ONE - cx, dy);
                match (inside, run) {
                    (true, None) => run = Some(px),
                    (false, Some(start)) => {
                        let end = px - 1;
                        let (ra, lead) = if start == first { (a, aa_a) } else { (start * ONE, false) };
                        let (rb, trail) = if end == last { (b, aa_b) } else { (end * ONE, false) };
                        assign_span(ctx, SpanAxis::Horizontal, y, ra, rb, lead, trail, color);
                        run = None;
                    },
                    _ => {},
                }
            }
        },
    }
}

/// Center and centerline radii (raw) of the ellipse inscribed in `rect`
///
/// `None` when a corner of the rect is outside the fixed point range.
fn inscribed(ctx: &GContext, rect: Rect) -> Option<(PrecisePoint, i64, i64)> {
    let mut rect = rect;
    rect.standardize();
    let far = Point::new(rect.max_x().saturating_add(1), rect.max_y().saturating_add(1));
    if ctx.to_global_fixed(rect.origin).is_none() || ctx.to_global_fixed(far).is_none() {
        return None;
    }
    let center = ctx.to_global_precise(rect.center_precise())?;
    let rx = (i64::from(rect.size.w) - 1).max(0) * HALF;
    let ry = (i64::from(rect.size.h) - 1).max(0) * HALF;
    Some((center, rx, ry))
}

impl<'a> GContext<'a> {
    /// Fill the ellipse inscribed in `rect` with the fill color
    pub fn fill_oval(&mut self, rect: Rect) {
        let color = self.draw_state().fill_color;
        if !self.can_draw_with(color) {
            return;
        }
        if rect.size.w != 0 && rect.size.h != 0 {
            if let Some((center, rx, ry)) = inscribed(self, rect) {
                let cfg = EllipseDrawConfig::new(0, FULL_TURN);
                fill_radial_precise(self, center, (rx + HALF, ry + HALF), (0, 0), &cfg, color);
            }
        }
        self.finish();
    }
    /// Fill a ring sector of the ellipse inscribed in `rect`
    ///
    /// The ring is `inset` pixels thick, measured inward from the ellipse
    /// edge; an inset reaching the center fills a pie. Angles run clockwise
    /// from 12 o'clock over `[angle_start, angle_end)`.
    pub fn fill_radial(&mut self, rect: Rect, inset: u16, angle_start: i32, angle_end: i32) {
        let color = self.draw_state().fill_color;
        if !self.can_draw_with(color) {
            return;
        }
        let cfg = EllipseDrawConfig::new(angle_start, angle_end);
        if rect.size.w == 0 || rect.size.h == 0 || inset == 0 || cfg.is_empty() {
            self.finish();
            return;
        }
        let (center, rx, ry) = match inscribed(self, rect) {
            Some(e) => e,
            None => return self.finish(),
        };
        let outer = (rx + HALF, ry + HALF);
        let inset = i64::from(inset) * ONE;
        let inner = if outer.0 > inset && outer.1 > inset {
            (outer.0 - inset, outer.1 - inset)
        } else {
            (0, 0)
        };
        fill_radial_precise(self, center, outer, inner, &cfg, color);
        self.finish();
    }
    /// Stroke an arc of the ellipse inscribed in `rect`
    ///
    /// The stroke is centered on the ellipse and uses the stroke color and
    /// width. Wide strokes end in round caps.
    pub fn draw_arc(&mut self, rect: Rect, angle_start: i32, angle_end: i32) {
        let color = self.draw_state().stroke_color;
        if !self.can_draw_with(color) {
            return;
        }
        let cfg = EllipseDrawConfig::new(angle_start, angle_end);
        if cfg.is_empty() {
            self.finish();
            return;
        }
        let h = i64::from(self.stroke_width_odd() / 2) * ONE;
        let (center, rx, ry) = match inscribed(self, rect) {
            Some(e) => e,
            None => return self.finish(),
        };
        let outer = (rx + h + HALF, ry + h + HALF);
        let inner = if rx - h - HALF > 0 && ry - h - HALF > 0 {
            (rx - h - HALF, ry - h - HALF)
        } else {
            (0, 0)
        };
        fill_radial_precise(self, center, outer, inner, &cfg, color);
        if h > 0 && !cfg.is_full() {
            let full = EllipseDrawConfig::new(0, FULL_TURN);
            let (cx, cy) = (i64::from(center.x.raw()), i64::from(center.y.raw()));
            for &angle in &[angle_start, angle_end] {
                let (x, y) = ellipse_point_raw(cx, cy, rx, ry, angle);
                let p = PrecisePoint::new(Fixed::from_raw_i32(x as i32), Fixed::from_raw_i32(y as i32));
                fill_radial_precise(self, p, (h + HALF, h + HALF), (0, 0), &full, color);
            }
        }
        self.finish();
    }
}
