//! Bitmap blitting
//!
//! How does this work
//!
//!   draw_bitmap_in_rect(src, rect)
//!     rect + drawing box origin           -- absolute, unclipped
//!     clip to clip box and destination    -- rows and columns to write
//!     source offset = (clipped - unclipped) mod source size
//!     per pixel: DrawImplementation::blit_pixel(src, mode, tint)
//!
//!   draw_rotated_bitmap(src, src_ic, angle, dest_ic)
//!     window = rotated source corners around dest_ic
//!     per pixel: rotate back by -angle, sample the source
//!       monochrome destination: 3x3 weighted vote
//!       color destination:      nearest source pixel
//!
//! Like every other primitive, blits go through the context's draw
//! implementation: a mask in use attenuates them and a mask attached for
//! recording receives their opacity instead of the destination.

use crate::bitmap::{Bitmap, BitmapFormat};
use crate::color::{Color8, CompOp};
use crate::context::GContext;
use crate::geometry::{Point, Rect};
use crate::math::polar_div_round;
use crate::trig::{angle_normalize, cos_lookup, sin_lookup, TRIG_MAX_RATIO};

use std::cmp::{max, min};

/// Hooks around a bitmap blit
///
/// `pre` runs before anything is drawn and may adjust the context or the
/// destination rect; `bitmap` may substitute the source; `post` runs last.
/// Both hooks run even when the blit draws nothing.
pub trait BitmapProcessor {
    fn pre(&mut self, _ctx: &mut GContext, _rect: &mut Rect) {}
    fn bitmap(&self) -> Option<&Bitmap> {
        None
    }
    fn post(&mut self, _ctx: &mut GContext, _rect: Rect) {}
}

/// Weights of the 3x3 neighbourhood vote, summing to 16
const VOTE_WEIGHTS: [[u8; 3]; 3] = [[1, 2, 1], [2, 4, 2], [1, 2, 1]];
/// Votes needed to draw the foreground color
const VOTE_THRESHOLD: u8 = 8;

/// Source pixel and the mode it is combined with
///
/// Monochrome sources become the foreground/background pair of the mode
/// and are then assigned; on color destinations they are still tinted.
/// `None` leaves the destination pixel alone.
fn source_pixel(src: &Bitmap, x: i16, y: i16, op: CompOp, color_dest: bool) -> Option<(Color8, CompOp)> {
    if src.format() != BitmapFormat::Bit1 {
        return Some((src.get_color(x, y), op));
    }
    let (fg, bg) = op.monochrome_colors();
    let c = if src.get_bit(x, y) { fg } else { bg };
    if c.is_invisible() {
        return None;
    }
    let op = if op == CompOp::Tint && color_dest { CompOp::Tint } else { CompOp::Assign };
    Some((c, op))
}

fn blit_tiled(ctx: &mut GContext, src: &Bitmap, global: Rect) {
    let area = global.clip(&ctx.clip_rect());
    let sb = src.bounds();
    if area.is_empty() || sb.is_empty() {
        log::trace!("blit {:?}: nothing to draw", global);
        return;
    }
    let state = ctx.draw_state();
    let (op, tint) = (state.compositing_mode, state.tint_color);
    let color_dest = ctx.dest().format().is_color();
    let imp = ctx.draw_implementation();
    for y in area.origin.y ..= area.max_y() {
        let (x1, x2) = match ctx.dest().row_window(y) {
            Some((lo, hi)) => (max(lo, area.origin.x), min(hi, area.max_x())),
            None => continue,
        };
        let sy = sb.origin.y + (y - global.origin.y) % sb.size.h;
        for x in x1 ..= x2 {
            let sx = sb.origin.x + (x - global.origin.x) % sb.size.w;
            if let Some((c, op)) = source_pixel(src, sx, sy, op, color_dest) {
                imp.blit_pixel(ctx, x, y, c, op, tint);
                ctx.touch(x, y);
            }
        }
    }
}

/// Weighted vote of the set pixels around `(x,y)`
fn vote(src: &Bitmap, x: i16, y: i16) -> u8 {
    let mut votes = 0;
    for (j, row) in VOTE_WEIGHTS.iter().enumerate() {
        for (i, w) in row.iter().enumerate() {
            let c = src.get_color(x + i as i16 - 1, y + j as i16 - 1);
            if !c.is_invisible() && c.to_bit() {
                votes += w;
            }
        }
    }
    votes
}

impl<'a> GContext<'a> {
    /// Draw a bitmap into a rect, repeating it when the rect is larger
    ///
    ///     use gdraw::{Bitmap,BitmapFormat,Size,GContext,Rect,Color8};
    ///
    ///     let mut tile = Bitmap::new(BitmapFormat::Bit8, Size::new(2,1));
    ///     tile.set_color(0, 0, Color8::RED);
    ///     tile.set_color(1, 0, Color8::BLUE);
    ///     let mut bm = Bitmap::new(BitmapFormat::Bit8, Size::new(8,2));
    ///     let mut ctx = GContext::new(&mut bm);
    ///     ctx.draw_bitmap_in_rect(&tile, Rect::new(1,0,5,2));
    ///     drop(ctx);
    ///     assert_eq!(bm.get_color(1,1), Color8::RED);
    ///     assert_eq!(bm.get_color(4,0), Color8::BLUE);
    ///     assert_eq!(bm.get_color(5,0), Color8::RED);
    ///     assert_eq!(bm.get_color(6,0), Color8::CLEAR);
    ///
    pub fn draw_bitmap_in_rect(&mut self, src: &Bitmap, rect: Rect) {
        if !self.can_draw() {
            return;
        }
        let global = rect.offset(self.draw_state().drawing_box.origin);
        blit_tiled(self, src, global);
        self.finish();
    }
    /// Draw a bitmap with hooks run before and after
    pub fn draw_bitmap_in_rect_processed(&mut self, src: &Bitmap, rect: Rect,
                                         processor: &mut dyn BitmapProcessor) {
        let mut rect = rect;
        processor.pre(self, &mut rect);
        {
            let src = processor.bitmap().unwrap_or(src);
            self.draw_bitmap_in_rect(src, rect);
        }
        processor.post(self, rect);
    }
    /// Draw a bitmap rotated clockwise by `angle` around `src_ic`
    ///
    /// The source point `src_ic` lands on `dest_ic`. An angle of zero is a
    /// plain blit. Transparent source pixels are skipped.
    pub fn draw_rotated_bitmap(&mut self, src: &Bitmap, src_ic: Point, angle: i32, dest_ic: Point) {
        if !self.can_draw() {
            return;
        }
        let angle = angle_normalize(angle);
        let sb = src.bounds();
        if angle == 0 {
            let at = dest_ic - (src_ic - sb.origin);
            self.draw_bitmap_in_rect(src, Rect::new(at.x, at.y, sb.size.w, sb.size.h));
            return;
        }
        let center = self.to_global(dest_ic);
        let (sin, cos) = (i64::from(sin_lookup(angle)), i64::from(cos_lookup(angle)));
        let ratio = i64::from(TRIG_MAX_RATIO);

        let corners = [
            (sb.origin.x, sb.origin.y), (sb.max_x() + 1, sb.origin.y),
            (sb.origin.x, sb.max_y() + 1), (sb.max_x() + 1, sb.max_y() + 1),
        ];
        let (mut x_lo, mut x_hi, mut y_lo, mut y_hi) = (i64::MAX, i64::MIN, i64::MAX, i64::MIN);
        for &(x, y) in &corners {
            let (dx, dy) = (i64::from(x - src_ic.x), i64::from(y - src_ic.y));
            let rx = polar_div_round(dx * cos - dy * sin, ratio);
            let ry = polar_div_round(dx * sin + dy * cos, ratio);
            x_lo = min(x_lo, rx);
            x_hi = max(x_hi, rx);
            y_lo = min(y_lo, ry);
            y_hi = max(y_hi, ry);
        }
        let window = Rect::from_corners((x_lo - 1) as i16 + center.x, (y_lo - 1) as i16 + center.y,
                                        (x_hi + 1) as i16 + center.x, (y_hi + 1) as i16 + center.y);
        let area = window.clip(&self.clip_rect());
        log::trace!("rotated blit angle {} window {:?} area {:?}", angle, window, area);
        if area.is_empty() || sb.is_empty() {
            self.finish();
            return;
        }
        let state = self.draw_state();
        let (op, tint) = (state.compositing_mode, state.tint_color);
        let monochrome = self.dest().format() == BitmapFormat::Bit1;
        let imp = self.draw_implementation();
        for y in area.origin.y ..= area.max_y() {
            for x in area.origin.x ..= area.max_x() {
                if !self.dest().contains(x, y) {
                    continue;
                }
                let (dx, dy) = (i64::from(x - center.x), i64::from(y - center.y));
                let sx = polar_div_round(dx * cos + dy * sin, ratio) + i64::from(src_ic.x);
                let sy = polar_div_round(dy * cos - dx * sin, ratio) + i64::from(src_ic.y);
                let (sx, sy) = (sx as i16, sy as i16);
                if !sb.contains_point(Point::new(sx, sy)) {
                    continue;
                }
                let pixel = if monochrome {
                    let (fg, bg) = op.monochrome_colors();
                    let c = if vote(src, sx, sy) >= VOTE_THRESHOLD { fg } else { bg };
                    Some((c, CompOp::Assign))
                } else {
                    source_pixel(src, sx, sy, op, true)
                };
                match pixel {
                    Some((c, op)) if !c.is_invisible() => {
                        imp.blit_pixel(self, x, y, c, op, tint);
                        self.touch(x, y);
                    },
                    _ => {},
                }
            }
        }
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::trig::FULL_TURN;

    fn pattern(w: i16, h: i16) -> Bitmap {
        let mut bm = Bitmap::new(BitmapFormat::Bit8, Size::new(w, h));
        for y in 0 .. h {
            for x in 0 .. w {
                bm.set_color(x, y, Color8 { argb: 0xC0 | ((x * 7 + y * 3) as u8 & 0x3F) });
            }
        }
        bm
    }

    #[test]
    fn negative_origin_keeps_phase() {
        let src = pattern(4, 4);
        let mut bm = Bitmap::new(BitmapFormat::Bit8, Size::new(10, 10));
        {
            let mut ctx = GContext::new(&mut bm);
            ctx.draw_bitmap_in_rect(&src, Rect::new(-2, -1, 4, 4));
            assert_eq!(ctx.dirty_rect(), Rect::new(0, 0, 2, 3));
        }
        assert_eq!(bm.get_color(0, 0), src.get_color(2, 1));
        assert_eq!(bm.get_color(1, 2), src.get_color(3, 3));
        assert_eq!(bm.get_color(2, 0), Color8::CLEAR);
    }

    #[test]
    fn monochrome_source_on_color() {
        let mut src = Bitmap::new(BitmapFormat::Bit1, Size::new(2, 1));
        src.set_color(0, 0, Color8::WHITE);
        let mut bm = Bitmap::new(BitmapFormat::Bit8, Size::new(4, 1));
        bm.fill(Color8::RED);
        {
            let mut ctx = GContext::new(&mut bm);
            ctx.set_compositing_mode(CompOp::Or);
            ctx.draw_bitmap_in_rect(&src, Rect::new(0, 0, 4, 1));
        }
        assert_eq!(bm.get_color(0, 0), Color8::WHITE);
        assert_eq!(bm.get_color(1, 0), Color8::RED);
        assert_eq!(bm.get_color(2, 0), Color8::WHITE);
    }

    #[test]
    fn monochrome_compositing() {
        let mut src = Bitmap::new(BitmapFormat::Bit1, Size::new(2, 1));
        src.set_color(0, 0, Color8::WHITE);
        let mut bm = Bitmap::new(BitmapFormat::Bit1, Size::new(2, 2));
        bm.set_color(1, 0, Color8::WHITE);
        bm.set_color(1, 1, Color8::WHITE);
        {
            let mut ctx = GContext::new(&mut bm);
            ctx.set_compositing_mode(CompOp::And);
            ctx.draw_bitmap_in_rect(&src, Rect::new(0, 0, 2, 1));
            ctx.set_compositing_mode(CompOp::AssignInverted);
            ctx.draw_bitmap_in_rect(&src, Rect::new(0, 1, 2, 1));
        }
        assert_eq!(bm.get_color(0, 0), Color8::BLACK);
        assert_eq!(bm.get_color(1, 0), Color8::BLACK);
        assert_eq!(bm.get_color(0, 1), Color8::BLACK);
        assert_eq!(bm.get_color(1, 1), Color8::WHITE);
    }

    #[test]
    fn quarter_turn() {
        let src = pattern(3, 2);
        let mut bm = Bitmap::new(BitmapFormat::Bit8, Size::new(10, 10));
        {
            let mut ctx = GContext::new(&mut bm);
            ctx.draw_rotated_bitmap(&src, Point::new(0, 0), FULL_TURN / 4, Point::new(5, 5));
        }
        // clockwise: source x runs down, source y runs left
        assert_eq!(bm.get_color(5, 5), src.get_color(0, 0));
        assert_eq!(bm.get_color(5, 7), src.get_color(2, 0));
        assert_eq!(bm.get_color(4, 5), src.get_color(0, 1));
        assert_eq!(bm.get_color(4, 7), src.get_color(2, 1));
        assert_eq!(bm.get_color(6, 5), Color8::CLEAR);
        assert_eq!(bm.get_color(3, 5), Color8::CLEAR);
    }

    #[test]
    fn monochrome_vote_keeps_blocks() {
        let mut src = Bitmap::new(BitmapFormat::Bit1, Size::new(8, 8));
        for x in 0 .. 4 {
            src.set_color(x, 0, Color8::WHITE);
            src.set_color(x, 1, Color8::WHITE);
        }
        let mut bm = Bitmap::new(BitmapFormat::Bit1, Size::new(20, 20));
        {
            let mut ctx = GContext::new(&mut bm);
            ctx.draw_rotated_bitmap(&src, Point::new(0, 0), FULL_TURN / 2, Point::new(10, 10));
        }
        let mut white = Vec::new();
        for y in 0 .. 20 {
            for x in 0 .. 20 {
                if bm.get_color(x, y) == Color8::WHITE {
                    white.push((x, y));
                }
            }
        }
        assert_eq!(white.len(), 8);
        assert!(white.iter().all(|&(x, y)| x >= 7 && x <= 10 && y >= 9 && y <= 10));
    }
}
