//! Pixel Backend
//!
//! Every primitive draws through the six span operations of a
//! [DrawImplementation]. The span operations are provided methods built on
//! a single per-pixel [plot](trait.DrawImplementation.html#tymethod.plot);
//! bitmap blits use [blit_pixel](trait.DrawImplementation.html#tymethod.blit_pixel)
//! instead, since they combine with the destination by compositing mode.
//! An implementation only decides where a pixel goes:
//!
//!   - [DefaultDrawImplementation] writes into the destination bitmap,
//!     attenuated by the mask in use, if any
//!   - [MaskRecordingDrawImplementation] accumulates opacity into the mask
//!     attached for recording
//!
//! All coordinates are absolute; primitives translate by the drawing box
//! before calling in. Every written pixel is inside the clip box, the
//! destination bounds and the stored window of its row. Each plotted pixel
//! is added to the context's touched rect, which becomes the dirty rect of
//! the primitive.
//!
//! [DrawImplementation]: trait.DrawImplementation.html
//! [DefaultDrawImplementation]: struct.DefaultDrawImplementation.html
//! [MaskRecordingDrawImplementation]: struct.MaskRecordingDrawImplementation.html

use crate::bitmap::BitmapFormat;
use crate::color::{Color8, CompOp};
use crate::context::GContext;
use crate::fixed::{Fixed, FIXED_ONE};
use crate::geometry::Point;
use crate::mask::{APPLY_LUT, MASK_OPAQUE};
use crate::math::{div_ceil, div_floor};

use std::cmp::{max, min};

/// Span writing operations
pub trait DrawImplementation: Sync {
    /// Write one pixel; the color alpha already carries its coverage
    ///
    /// Callers guarantee the pixel is inside the effective clip.
    fn plot(&self, ctx: &mut GContext, x: i16, y: i16, color: Color8);

    /// Combine one source pixel of a blit with the destination by `op`
    ///
    /// Same clip guarantee as [plot](#tymethod.plot).
    fn blit_pixel(&self, ctx: &mut GContext, x: i16, y: i16, src: Color8, op: CompOp, tint: Color8);

    /// Fill row `y` from `x1` to `x2` with single pixel antialiased ends
    fn assign_horizontal_line(&self, ctx: &mut GContext, y: i16, x1: Fixed, x2: Fixed, color: Color8) {
        let clip = ctx.clip_rect();
        self.assign_horizontal_line_delta(ctx, y, x1, x2, 1, 1, clip.origin.x, clip.max_x(), color);
    }
    /// Fill column `x` from `y1` to `y2` with single pixel antialiased ends
    fn assign_vertical_line(&self, ctx: &mut GContext, x: i16, y1: Fixed, y2: Fixed, color: Color8) {
        let clip = ctx.clip_rect();
        self.assign_vertical_line_delta(ctx, x, y1, y2, 1, 1, clip.origin.y, clip.max_y(), color);
    }
    /// Blend `color` into the pixels `x1..=x2` of row `y`
    fn blend_horizontal_line_raw(&self, ctx: &mut GContext, y: i16, x1: i16, x2: i16, color: Color8) {
        if color.is_invisible() {
            return;
        }
        if let Some((lo, hi)) = row_clip(ctx, y, i16::MIN, i16::MAX) {
            for x in max(x1, lo) ..= min(x2, hi) {
                self.plot(ctx, x, y, color);
                ctx.touch(x, y);
            }
        }
    }
    /// Blend `color` into the pixels `y1..=y2` of column `x`
    fn blend_vertical_line_raw(&self, ctx: &mut GContext, x: i16, y1: i16, y2: i16, color: Color8) {
        if color.is_invisible() {
            return;
        }
        let clip = ctx.clip_rect();
        for y in max(y1, clip.origin.y) ..= min(y2, clip.max_y()) {
            if column_visible(ctx, x, y) {
                self.plot(ctx, x, y, color);
                ctx.touch(x, y);
            }
        }
    }
    /// Fill row `y` between the precise edges `x1` and `x2`
    ///
    /// Pixels strictly between the edges get full coverage. Outside each
    /// edge a ramp of `left_aa` (`right_aa`) pixels fades linearly to zero;
    /// with a ramp of one the boundary pixel gets `ONE - fraction` on the
    /// leading edge and `fraction` on the trailing edge. A ramp of zero is
    /// a hard edge. Nothing is written outside `clip_min..=clip_max`.
    fn assign_horizontal_line_delta(&self, ctx: &mut GContext, y: i16, x1: Fixed, x2: Fixed,
                                    left_aa: u8, right_aa: u8,
                                    clip_min: i16, clip_max: i16, color: Color8) {
        if color.is_invisible() || x1 > x2 {
            return;
        }
        let (lo, hi) = match row_clip(ctx, y, clip_min, clip_max) {
            Some(w) => w,
            None => return,
        };
        log::trace!("hline y {} x {:?} .. {:?} aa {}/{}", y, x1, x2, left_aa, right_aa);
        for (x, coverage) in SpanCoverage::new(x1, x2, left_aa, right_aa, lo, hi) {
            let c = color.with_coverage(coverage);
            if !c.is_invisible() {
                self.plot(ctx, x, y, c);
                ctx.touch(x, y);
            }
        }
    }
    /// Fill column `x` between the precise edges `y1` and `y2`
    ///
    /// Vertical counterpart of
    /// [assign_horizontal_line_delta](#method.assign_horizontal_line_delta).
    fn assign_vertical_line_delta(&self, ctx: &mut GContext, x: i16, y1: Fixed, y2: Fixed,
                                  top_aa: u8, bottom_aa: u8,
                                  clip_min: i16, clip_max: i16, color: Color8) {
        if color.is_invisible() || y1 > y2 {
            return;
        }
        let clip = ctx.clip_rect();
        if x < clip.origin.x || x > clip.max_x() {
            return;
        }
        let lo = max(clip_min, clip.origin.y);
        let hi = min(clip_max, clip.max_y());
        if lo > hi {
            return;
        }
        log::trace!("vline x {} y {:?} .. {:?} aa {}/{}", x, y1, y2, top_aa, bottom_aa);
        for (y, coverage) in SpanCoverage::new(y1, y2, top_aa, bottom_aa, lo, hi) {
            let c = color.with_coverage(coverage);
            if !c.is_invisible() && column_visible(ctx, x, y) {
                self.plot(ctx, x, y, c);
                ctx.touch(x, y);
            }
        }
    }
}

/// Direction of the spans a primitive emits
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub(crate) enum SpanAxis {
    /// Spans along a row
    Horizontal,
    /// Spans along a column
    Vertical,
}

/// Fill the pixel centers in the raw interval `a..=b` of one row or column
///
/// Ends flagged as antialiased become ramps of one pixel centered on the
/// interval end, so a run of width `b - a` covers exactly that much. The
/// other ends are hard cuts.
pub(crate) fn assign_span(ctx: &mut GContext, axis: SpanAxis, scan: i16, a: i64, b: i64,
                          aa_lead: bool, aa_trail: bool, color: Color8) {
    if a > b {
        return;
    }
    let half = i64::from(FIXED_ONE / 2);
    let mut x1 = if aa_lead { a + half } else { a };
    let mut x2 = if aa_trail { b - half } else { b };
    if x1 > x2 {
        let mid = div_floor(a + b, 2);
        x1 = mid;
        x2 = mid;
    }
    let clamp = |v: i64| Fixed::from_raw_i32(v.max(i64::from(i32::MIN)).min(i64::from(i32::MAX)) as i32);
    let (x1, x2) = (clamp(x1), clamp(x2));
    let (l, r) = (aa_lead as u8, aa_trail as u8);
    let clip = ctx.clip_rect();
    let imp = ctx.draw_implementation();
    match axis {
        SpanAxis::Horizontal => {
            imp.assign_horizontal_line_delta(ctx, scan, x1, x2, l, r, clip.origin.x, clip.max_x(), color)
        },
        SpanAxis::Vertical => {
            imp.assign_vertical_line_delta(ctx, scan, x1, x2, l, r, clip.origin.y, clip.max_y(), color)
        },
    }
}

/// Columns of row `y` inside the clip, the destination and `lo..=hi`
fn row_clip(ctx: &GContext, y: i16, lo: i16, hi: i16) -> Option<(i16, i16)> {
    let clip = ctx.clip_rect();
    if clip.is_empty() || y < clip.origin.y || y > clip.max_y() {
        return None;
    }
    let (min_x, max_x) = ctx.dest().row_window(y)?;
    let lo = max(max(lo, clip.origin.x), min_x);
    let hi = min(min(hi, clip.max_x()), max_x);
    if lo > hi { None } else { Some((lo, hi)) }
}

fn column_visible(ctx: &GContext, x: i16, y: i16) -> bool {
    ctx.clip_rect().contains_point(Point::new(x, y)) && ctx.dest().contains(x, y)
}

/// Pixels and coverage (`0..=255`) of one antialiased span
///
/// Positions are pixel centers; the ramps extend past the edges.
struct SpanCoverage {
    lead: i32,
    trail: i32,
    lead_len: i32,
    trail_len: i32,
    pos: i32,
    end: i32,
}

impl SpanCoverage {
    fn new(p1: Fixed, p2: Fixed, lead_len: u8, trail_len: u8, lo: i16, hi: i16) -> Self {
        let (lead_len, trail_len) = (i32::from(lead_len), i32::from(trail_len));
        let lead = p1.raw32();
        let trail = p2.raw32();
        // first and last pixel with any coverage
        let first = if lead_len == 0 {
            i32::from(p1.ceil())
        } else {
            div_floor(i64::from(lead - lead_len * FIXED_ONE), i64::from(FIXED_ONE)) as i32 + 1
        };
        let last = if trail_len == 0 {
            i32::from(p2.integer())
        } else {
            div_ceil(i64::from(trail + trail_len * FIXED_ONE), i64::from(FIXED_ONE)) as i32 - 1
        };
        SpanCoverage {
            lead, trail, lead_len, trail_len,
            pos: max(first, i32::from(lo)),
            end: min(last, i32::from(hi)),
        }
    }
    fn coverage(&self, p: i32) -> u8 {
        let c = p * FIXED_ONE;
        if c < self.lead {
            let dist = c - (self.lead - self.lead_len * FIXED_ONE);
            (dist * 255 / (self.lead_len * FIXED_ONE)) as u8
        } else if c > self.trail {
            let dist = self.trail + self.trail_len * FIXED_ONE - c;
            (dist * 255 / (self.trail_len * FIXED_ONE)) as u8
        } else {
            255
        }
    }
}

impl Iterator for SpanCoverage {
    type Item = (i16, u8);
    fn next(&mut self) -> Option<(i16, u8)> {
        while self.pos <= self.end {
            let p = self.pos;
            self.pos += 1;
            let c = self.coverage(p);
            if c > 0 {
                return Some((p as i16, c));
            }
        }
        None
    }
}

/// Writes pixels into the destination bitmap
#[derive(Debug,Default,Copy,Clone)]
pub struct DefaultDrawImplementation;

/// Records pixel opacity into the attached mask
#[derive(Debug,Default,Copy,Clone)]
pub struct MaskRecordingDrawImplementation;

pub static DEFAULT_DRAW_IMPLEMENTATION: DefaultDrawImplementation = DefaultDrawImplementation;
pub static MASK_RECORDING_DRAW_IMPLEMENTATION: MaskRecordingDrawImplementation = MaskRecordingDrawImplementation;

impl DrawImplementation for DefaultDrawImplementation {
    fn plot(&self, ctx: &mut GContext, x: i16, y: i16, color: Color8) {
        let color = match ctx.mask_in_use() {
            Some(mask) => {
                let m = mask.value(x, y);
                color.with_alpha(APPLY_LUT[color.a() as usize][m as usize])
            },
            None => color,
        };
        if color.is_invisible() {
            return;
        }
        let dest = ctx.dest_mut();
        match dest.format() {
            BitmapFormat::Bit1 => {
                if color.a() >= 2 {
                    dest.put_bit(x, y, color.to_bit());
                }
            },
            BitmapFormat::Bit8 | BitmapFormat::Bit8Circular => {
                let i = dest.byte_index(x, y);
                let old = Color8 { argb: dest.data()[i] };
                dest.data_mut()[i] = color.blend_over(old).argb;
            },
            _ => {},
        }
    }
    fn blit_pixel(&self, ctx: &mut GContext, x: i16, y: i16, src: Color8, op: CompOp, tint: Color8) {
        let m = match ctx.mask_in_use() {
            Some(mask) => mask.value(x, y),
            None => MASK_OPAQUE,
        };
        if m == 0 {
            return;
        }
        let dest = ctx.dest_mut();
        match dest.format() {
            BitmapFormat::Bit1 => {
                if src.is_invisible() || m < 2 {
                    return;
                }
                let bit = op.apply_bit(src.to_bit(), dest.get_bit(x, y));
                dest.put_bit(x, y, bit);
            },
            BitmapFormat::Bit8 | BitmapFormat::Bit8Circular => {
                let old = dest.get_color(x, y);
                let mut c = op.composite(src, old, tint);
                if m < MASK_OPAQUE {
                    // the mask weighs the composited pixel against the old one
                    c = c.with_alpha(APPLY_LUT[c.a() as usize][m as usize]).blend_over(old);
                }
                dest.set_color(x, y, c);
            },
            _ => {},
        }
    }
}

impl DrawImplementation for MaskRecordingDrawImplementation {
    fn plot(&self, ctx: &mut GContext, x: i16, y: i16, color: Color8) {
        if let Some(mask) = ctx.mask_recording() {
            mask.record(x, y, color);
        }
    }
    /// Records the source pixel's opacity; the mode does not apply
    fn blit_pixel(&self, ctx: &mut GContext, x: i16, y: i16, src: Color8, _op: CompOp, _tint: Color8) {
        self.plot(ctx, x, y, src);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::Bitmap;
    use crate::geometry::{Rect, Size};

    fn span(x1: i16, x2: i16, l: u8, r: u8) -> Vec<(i16, u8)> {
        SpanCoverage::new(Fixed::from_raw(x1), Fixed::from_raw(x2), l, r, -100, 100).collect()
    }

    #[test]
    fn integral_span_has_no_ramps() {
        assert_eq!(span(16, 32, 1, 1), vec![(2, 255), (3, 255), (4, 255)]);
        assert_eq!(span(16, 32, 0, 0), vec![(2, 255), (3, 255), (4, 255)]);
    }

    #[test]
    fn fractional_edges() {
        // 2.25 ..= 3.5
        let s = span(18, 28, 1, 1);
        assert_eq!(s, vec![(2, 191), (3, 255), (4, 127)]);
        let s = span(18, 28, 0, 0);
        assert_eq!(s, vec![(3, 255)]);
    }

    #[test]
    fn wide_ramp_fades_out() {
        let s = span(16, 16, 4, 0);
        assert_eq!(s, vec![(-1, 63), (0, 127), (1, 191), (2, 255)]);
    }

    #[test]
    fn ramps_respect_clip_window() {
        let s: Vec<_> = SpanCoverage::new(Fixed::from_raw(18), Fixed::from_raw(28), 1, 1, 3, 3).collect();
        assert_eq!(s, vec![(3, 255)]);
    }

    #[test]
    fn clipped_to_context() {
        let mut bm = Bitmap::new(BitmapFormat::Bit8, Size::new(8, 8));
        {
            let mut ctx = GContext::new(&mut bm);
            ctx.set_clip_box(Rect::new(2, 2, 4, 4));
            let imp = ctx.draw_implementation();
            imp.assign_horizontal_line(&mut ctx, 3, Fixed::from_int(-5), Fixed::from_int(20), Color8::RED);
            imp.blend_vertical_line_raw(&mut ctx, 0, 0, 7, Color8::RED);
            imp.blend_horizontal_line_raw(&mut ctx, 1, 0, 7, Color8::RED);
        }
        for x in 0 .. 8 {
            let expect = if x >= 2 && x < 6 { Color8::RED } else { Color8::CLEAR };
            assert_eq!(bm.get_color(x, 3), expect, "x {}", x);
            assert_eq!(bm.get_color(0, x), Color8::CLEAR);
            assert_eq!(bm.get_color(x, 1), Color8::CLEAR);
        }
    }

    #[test]
    fn plotted_pixels_are_touched() {
        let mut bm = Bitmap::new(BitmapFormat::Bit8, Size::new(8, 8));
        let mut ctx = GContext::new(&mut bm);
        ctx.set_clip_box(Rect::new(2, 2, 4, 4));
        let imp = ctx.draw_implementation();
        imp.assign_horizontal_line(&mut ctx, 3, Fixed::from_int(-5), Fixed::from_int(20), Color8::RED);
        imp.blend_vertical_line_raw(&mut ctx, 4, 0, 7, Color8::RED);
        ctx.finish();
        assert_eq!(ctx.dirty_rect(), Rect::new(2, 2, 4, 4));
        // outside the clip box nothing is plotted
        ctx.reset_dirty_rect();
        imp.blend_horizontal_line_raw(&mut ctx, 0, 0, 7, Color8::RED);
        ctx.finish();
        assert!(ctx.dirty_rect().is_empty());
    }

    #[test]
    fn monochrome_threshold() {
        let mut bm = Bitmap::new(BitmapFormat::Bit1, Size::new(8, 1));
        {
            let mut ctx = GContext::new(&mut bm);
            let imp = ctx.draw_implementation();
            imp.blend_horizontal_line_raw(&mut ctx, 0, 0, 1, Color8::WHITE.with_alpha(1));
            imp.blend_horizontal_line_raw(&mut ctx, 0, 2, 3, Color8::WHITE.with_alpha(2));
        }
        assert_eq!(bm.data()[0], 0b0000_1100);
    }
}
