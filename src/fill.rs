//! Pixels and rectangles

use crate::circle::midpoint_circle;
use crate::context::GContext;
use crate::geometry::{Point, Rect};
use crate::oval::Quadrants;

use std::cmp::min;

impl<'a> GContext<'a> {
    /// Set a single pixel to the stroke color
    pub fn draw_pixel(&mut self, p: Point) {
        let color = self.draw_state().stroke_color;
        if !self.can_draw_with(color) {
            return;
        }
        let p = self.to_global(p);
        self.draw_implementation().blend_horizontal_line_raw(self, p.y, p.x, p.x, color);
        self.finish();
    }
    /// Fill a rectangle with the fill color
    ///
    ///     use gdraw::{Bitmap,BitmapFormat,Size,GContext,Rect,Color8};
    ///
    ///     let mut bm = Bitmap::new(BitmapFormat::Bit8, Size::new(10,10));
    ///     let mut ctx = GContext::new(&mut bm);
    ///     ctx.set_fill_color(Color8::GREEN);
    ///     ctx.fill_rect(Rect::new(2,2,3,4));
    ///     assert_eq!(ctx.dirty_rect(), Rect::new(2,2,3,4));
    ///     drop(ctx);
    ///     assert_eq!(bm.get_color(4,5), Color8::GREEN);
    ///     assert_eq!(bm.get_color(5,5), Color8::CLEAR);
    ///
    pub fn fill_rect(&mut self, rect: Rect) {
        let color = self.draw_state().fill_color;
        if !self.can_draw_with(color) {
            return;
        }
        let mut r = rect;
        r.standardize();
        let r = r.offset(self.draw_state().drawing_box.origin);
        let area = r.clip(&self.clip_rect());
        if area.is_empty() {
            log::trace!("fill_rect {:?}: empty clip", rect);
            self.finish();
            return;
        }
        let imp = self.draw_implementation();
        for y in area.origin.y ..= area.max_y() {
            imp.blend_horizontal_line_raw(self, y, area.origin.x, area.max_x(), color);
        }
        self.finish();
    }
    /// Outline a rectangle one pixel wide with the stroke color
    ///
    /// Corner pixels are drawn once.
    pub fn draw_rect(&mut self, rect: Rect) {
        let color = self.draw_state().stroke_color;
        if !self.can_draw_with(color) {
            return;
        }
        let mut r = rect;
        r.standardize();
        if r.is_empty() {
            self.finish();
            return;
        }
        let r = r.offset(self.draw_state().drawing_box.origin);
        let imp = self.draw_implementation();
        let (x1, y1, x2, y2) = (r.origin.x, r.origin.y, r.max_x(), r.max_y());
        imp.blend_horizontal_line_raw(self, y1, x1, x2, color);
        if y2 > y1 {
            imp.blend_horizontal_line_raw(self, y2, x1, x2, color);
        }
        if y2 - y1 > 1 {
            imp.blend_vertical_line_raw(self, x1, y1 + 1, y2 - 1, color);
            if x2 > x1 {
                imp.blend_vertical_line_raw(self, x2, y1 + 1, y2 - 1, color);
            }
        }
        self.finish();
    }
    /// Outline a rectangle with rounded corners
    ///
    /// The corners are quarter circles of `radius`, limited so that
    /// opposite corners never overlap.
    pub fn draw_round_rect(&mut self, rect: Rect, radius: u16) {
        let color = self.draw_state().stroke_color;
        if !self.can_draw_with(color) {
            return;
        }
        let mut r = rect;
        r.standardize();
        if r.is_empty() {
            self.finish();
            return;
        }
        let max_radius = (min(r.size.w, r.size.h) - 1) / 2;
        let radius = min(i32::from(radius), i32::from(max_radius)) as i16;
        if radius <= 0 {
            self.draw_rect(rect);
            return;
        }
        let r = r.offset(self.draw_state().drawing_box.origin);
        let (x1, y1, x2, y2) = (r.origin.x, r.origin.y, r.max_x(), r.max_y());
        let (cl, cr) = (x1 + radius, x2 - radius);
        let (ct, cb) = (y1 + radius, y2 - radius);
        let imp = self.draw_implementation();
        if cr - cl > 1 {
            imp.blend_horizontal_line_raw(self, y1, cl + 1, cr - 1, color);
            imp.blend_horizontal_line_raw(self, y2, cl + 1, cr - 1, color);
        }
        if cb - ct > 1 {
            imp.blend_vertical_line_raw(self, x1, ct + 1, cb - 1, color);
            imp.blend_vertical_line_raw(self, x2, ct + 1, cb - 1, color);
        }
        let corners = [
            (Point::new(cl, ct), Quadrants::TOP_LEFT),
            (Point::new(cr, ct), Quadrants::TOP_RIGHT),
            (Point::new(cr, cb), Quadrants::BOTTOM_RIGHT),
            (Point::new(cl, cb), Quadrants::BOTTOM_LEFT),
        ];
        for &(center, quadrant) in &corners {
            midpoint_circle(self, center, radius, quadrant, color);
        }
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::{Bitmap, BitmapFormat};
    use crate::color::Color8;
    use crate::geometry::Size;

    fn count(bm: &Bitmap, c: Color8) -> usize {
        let s = bm.size();
        (0 .. s.h).flat_map(|y| (0 .. s.w).map(move |x| (x, y)))
            .filter(|&(x, y)| bm.get_color(x, y) == c)
            .count()
    }

    #[test]
    fn outline_corners_once() {
        let mut bm = Bitmap::new(BitmapFormat::Bit8, Size::new(12, 12));
        {
            let mut ctx = GContext::new(&mut bm);
            ctx.set_stroke_color(Color8::WHITE);
            ctx.draw_rect(Rect::new(1, 1, 5, 4));
            assert_eq!(ctx.dirty_rect(), Rect::new(1, 1, 5, 4));
        }
        assert_eq!(count(&bm, Color8::WHITE), 2 * 5 + 2 * 2);
        assert_eq!(bm.get_color(1, 1), Color8::WHITE);
        assert_eq!(bm.get_color(5, 4), Color8::WHITE);
        assert_eq!(bm.get_color(3, 2), Color8::CLEAR);
    }

    #[test]
    fn fill_is_clipped() {
        let mut bm = Bitmap::new(BitmapFormat::Bit8, Size::new(10, 10));
        {
            let mut ctx = GContext::new(&mut bm);
            ctx.set_fill_color(Color8::RED);
            ctx.set_clip_box(Rect::new(0, 0, 5, 5));
            ctx.fill_rect(Rect::new(3, 3, 10, 10));
            assert_eq!(ctx.dirty_rect(), Rect::new(3, 3, 2, 2));
        }
        assert_eq!(count(&bm, Color8::RED), 4);
    }

    #[test]
    fn pixel_uses_drawing_box() {
        let mut bm = Bitmap::new(BitmapFormat::Bit1, Size::new(16, 16));
        {
            let mut ctx = GContext::new(&mut bm);
            ctx.set_stroke_color(Color8::WHITE);
            ctx.set_drawing_box(Rect::new(4, 4, 8, 8));
            ctx.draw_pixel(Point::new(1, 2));
        }
        assert_eq!(bm.get_color(5, 6), Color8::WHITE);
        assert_eq!(count(&bm, Color8::WHITE), 1);
    }

    #[test]
    fn round_corners() {
        let mut bm = Bitmap::new(BitmapFormat::Bit8, Size::new(20, 20));
        {
            let mut ctx = GContext::new(&mut bm);
            ctx.set_stroke_color(Color8::BLUE);
            ctx.draw_round_rect(Rect::new(2, 2, 12, 10), 3);
            assert_eq!(ctx.dirty_rect(), Rect::new(2, 2, 12, 10));
        }
        assert_eq!(bm.get_color(2, 2), Color8::CLEAR);
        assert_eq!(bm.get_color(13, 11), Color8::CLEAR);
        assert_eq!(bm.get_color(5, 2), Color8::BLUE);
        assert_eq!(bm.get_color(2, 5), Color8::BLUE);
        assert_eq!(bm.get_color(10, 11), Color8::BLUE);
        assert_eq!(bm.get_color(13, 8), Color8::BLUE);
        for y in 0 .. 20 {
            for x in 0 .. 20 {
                if bm.get_color(x, y) == Color8::BLUE {
                    assert!(x >= 2 && x <= 13 && y >= 2 && y <= 11, "({},{})", x, y);
                }
            }
        }
    }
}
