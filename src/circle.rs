//! Circles
//!
//! One pixel wide circles are traced directly: the midpoint algorithm when
//! antialiasing is off, an octant of exact border distances mirrored eight
//! ways when it is on. Wider strokes and filled circles go through the
//! scanline engine in [oval](../oval/index.html).

use crate::color::Color8;
use crate::context::GContext;
use crate::fixed::FIXED_ONE;
use crate::geometry::{Point, PrecisePoint};
use crate::math::integer_sqrt;
use crate::oval::{fill_radial_precise, EllipseDrawConfig, Quadrants};
use crate::trig::FULL_TURN;

use std::collections::BTreeMap;

const ONE: i64 = FIXED_ONE as i64;
const HALF: i64 = ONE / 2;

/// Midpoint circle, one quadrant at a time
///
/// Yields the circle pixels as offsets from the center, every offset once.
/// The set is symmetric under mirroring and quarter turns.
pub(crate) fn midpoint_offsets(radius: i16) -> Vec<(i16, i16)> {
    let mut out = Vec::new();
    if radius <= 0 {
        out.push((0, 0));
        return out;
    }
    let (mut x, mut y) = (radius, 0i16);
    let mut err = 1 - i32::from(radius);
    while x >= y {
        for &(a, b) in &[(x, y), (y, x)] {
            for &(sx, sy) in &[(1, 1), (1, -1), (-1, 1), (-1, -1)] {
                out.push((a * sx, b * sy));
            }
        }
        y += 1;
        if err < 0 {
            err += 2 * i32::from(y) + 1;
        } else {
            x -= 1;
            err += 2 * (i32::from(y) - i32::from(x)) + 1;
        }
    }
    out.sort();
    out.dedup();
    out
}

/// Trace a one pixel circle around an absolute center
///
/// Only pixels in `quadrants` are drawn; pixels on an axis belong to both
/// neighbouring quadrants.
pub(crate) fn midpoint_circle(ctx: &mut GContext, center: Point, radius: i16,
                              quadrants: Quadrants, color: Color8) {
    let imp = ctx.draw_implementation();
    for (dx, dy) in midpoint_offsets(radius) {
        if !Quadrants::touching_offset(i64::from(dx), i64::from(dy)).intersects(quadrants) {
            continue;
        }
        let (x, y) = (center.x + dx, center.y + dy);
        imp.blend_horizontal_line_raw(ctx, y, x, x, color);
    }
}

/// Antialiased one pixel circle
///
/// One octant of exact border positions is computed and mirrored eight
/// ways. Pixels reached from two octants keep the larger coverage.
pub(crate) fn antialiased_offsets(radius: i16) -> BTreeMap<(i16, i16), u8> {
    let mut px = BTreeMap::new();
    let r = i64::from(radius) * ONE;
    let mut dy = 0i64;
    loop {
        let x = integer_sqrt(r * r - dy * dy * ONE * ONE);
        if dy * ONE > x {
            break;
        }
        let (xi, frac) = ((x / ONE) as i16, x % ONE);
        let near = ((ONE - frac) * 255 / ONE) as u8;
        let far = (frac * 255 / ONE) as u8;
        for &(a, c) in &[(xi, near), (xi + 1, far)] {
            if c == 0 {
                continue;
            }
            let b = dy as i16;
            for &(u, v) in &[(a, b), (b, a)] {
                for &(sx, sy) in &[(1, 1), (1, -1), (-1, 1), (-1, -1)] {
                    let e = px.entry((u * sx, v * sy)).or_insert(0u8);
                    *e = (*e).max(c);
                }
            }
        }
        dy += 1;
    }
    px
}

impl<'a> GContext<'a> {
    /// Stroke a circle with the stroke color and width
    ///
    /// A one pixel stroke traces the circle; wider strokes fill a ring
    /// centered on it. With radius 0 a wide stroke is a filled circle of
    /// half the stroke width.
    pub fn draw_circle(&mut self, center: Point, radius: u16) {
        let color = self.draw_state().stroke_color;
        if !self.can_draw_with(color) {
            return;
        }
        let radius = radius.min(i16::MAX as u16) as i16;
        let width = self.stroke_width_odd();
        if width > 1 {
            let c = match self.to_global_fixed(center) {
                Some(c) => c,
                None => return self.finish(),
            };
            let h = i64::from(width / 2) * ONE;
            let r = i64::from(radius) * ONE;
            let inner = if r - h - HALF > 0 { (r - h - HALF, r - h - HALF) } else { (0, 0) };
            let cfg = EllipseDrawConfig::new(0, FULL_TURN);
            fill_radial_precise(self, c, (r + h + HALF, r + h + HALF), inner, &cfg, color);
        } else if self.antialiased() && radius > 0 {
            let c = self.to_global(center);
            let imp = self.draw_implementation();
            for ((dx, dy), coverage) in antialiased_offsets(radius) {
                let (x, y) = (c.x + dx, c.y + dy);
                imp.blend_horizontal_line_raw(self, y, x, x, color.with_coverage(coverage));
            }
        } else {
            let c = self.to_global(center);
            midpoint_circle(self, c, radius, Quadrants::ALL, color);
        }
        self.finish();
    }
    /// Fill a circle with the fill color
    ///
    /// Covers the pixels whose centers are at most `radius + 1/2` away
    /// from `center`, `2 * radius + 1` pixels across.
    pub fn fill_circle(&mut self, center: Point, radius: u16) {
        let color = self.draw_state().fill_color;
        if !self.can_draw_with(color) {
            return;
        }
        if let Some(c) = self.to_global_fixed(center) {
            fill_disc(self, c, i64::from(radius) * ONE, color);
        }
        self.finish();
    }
}

/// Filled disc around an absolute center, `radius` in raw units
pub(crate) fn fill_disc(ctx: &mut GContext, center: PrecisePoint, radius: i64, color: Color8) {
    let cfg = EllipseDrawConfig::new(0, FULL_TURN);
    fill_radial_precise(ctx, center, (radius + HALF, radius + HALF), (0, 0), &cfg, color);
}
