extern crate gdraw;

use gdraw::{Bitmap, BitmapFormat, Color8, Fixed, GContext, Point, PixelData, PrecisePoint, Rect, Size};
use test_log::test;

fn set_pixels(bm: &Bitmap, c: Color8) -> Vec<(i16, i16)> {
    let s = bm.size();
    let mut out = vec![];
    for y in 0 .. s.h {
        for x in 0 .. s.w {
            if bm.get_color(x, y) == c {
                out.push((x, y));
            }
        }
    }
    out
}

#[test]
fn single_point_line_on_monochrome() {
    let mut bm = Bitmap::new(BitmapFormat::Bit1, Size::new(144, 168));
    let mut dirty = vec![];
    {
        let mut ctx = GContext::new(&mut bm);
        ctx.set_dirty_listener(|r| dirty.push(r));
        ctx.set_stroke_color(Color8::WHITE);
        ctx.set_stroke_width(1);
        ctx.draw_line(Point::new(10, 10), Point::new(10, 10));
    }
    assert_eq!(set_pixels(&bm, Color8::WHITE), vec![(10, 10)]);
    assert_eq!(dirty, vec![Rect::new(10, 10, 1, 1)]);
}

#[test]
fn horizontal_line_is_exact() {
    for &aa in &[false, true] {
        let mut bm = Bitmap::new(BitmapFormat::Bit8, Size::new(20, 5));
        {
            let mut ctx = GContext::new(&mut bm);
            ctx.set_antialiased(aa);
            ctx.set_stroke_color(Color8::GREEN);
            ctx.draw_line(Point::new(0, 0), Point::new(10, 0));
            assert_eq!(ctx.dirty_rect(), Rect::new(0, 0, 11, 1));
        }
        let px: Vec<_> = (0 ..= 10).map(|x| (x, 0)).collect();
        assert_eq!(set_pixels(&bm, Color8::GREEN), px);
        assert_eq!(set_pixels(&bm, Color8::CLEAR).len(), 20 * 5 - 11);
    }
}

#[test]
fn diagonal_line_is_exact() {
    let mut bm = Bitmap::new(BitmapFormat::Bit8, Size::new(12, 12));
    {
        let mut ctx = GContext::new(&mut bm);
        ctx.set_stroke_color(Color8::RED);
        ctx.draw_line(Point::new(9, 1), Point::new(1, 9));
    }
    let px = set_pixels(&bm, Color8::RED);
    assert_eq!(px.len(), 9);
    assert!(px.iter().all(|&(x, y)| x + y == 10));
}

#[test]
fn antialiased_line_stays_near() {
    let mut bm = Bitmap::new(BitmapFormat::Bit8, Size::new(40, 20));
    {
        let mut ctx = GContext::new(&mut bm);
        ctx.set_stroke_color(Color8::WHITE);
        ctx.draw_line(Point::new(2, 3), Point::new(30, 12));
    }
    assert_eq!(bm.get_color(2, 3), Color8::WHITE);
    assert_eq!(bm.get_color(30, 12), Color8::WHITE);
    for (x, y) in (0 .. 20).flat_map(|y| (0 .. 40).map(move |x| (x, y))) {
        if bm.get_color(x, y).is_invisible() {
            continue;
        }
        assert!(x >= 2 && x <= 30, "({},{})", x, y);
        // distance to the line, scaled by its length
        let d = (9 * (i32::from(x) - 2) - 28 * (i32::from(y) - 3)).abs();
        assert!(d * d <= 2 * (28 * 28 + 9 * 9), "({},{}) too far", x, y);
    }
}

#[test]
fn wide_dot_is_a_filled_circle() {
    let center = Point::new(15, 15);
    let mut dot = Bitmap::new(BitmapFormat::Bit8, Size::new(30, 30));
    let mut disc = dot.clone();
    {
        let mut ctx = GContext::new(&mut dot);
        ctx.set_stroke_color(Color8::RED);
        ctx.set_stroke_width(5);
        ctx.draw_line(center, center);
    }
    {
        let mut ctx = GContext::new(&mut disc);
        ctx.set_fill_color(Color8::RED);
        ctx.fill_circle(center, 2);
    }
    assert_eq!(dot.pixeldata(), disc.pixeldata());
    assert!(!set_pixels(&dot, Color8::RED).is_empty());
}

#[test]
fn wide_line_covers_its_axis() {
    let mut bm = Bitmap::new(BitmapFormat::Bit8, Size::new(50, 50));
    {
        let mut ctx = GContext::new(&mut bm);
        ctx.set_antialiased(false);
        ctx.set_stroke_color(Color8::BLUE);
        // even widths round up
        ctx.set_stroke_width(4);
        ctx.draw_line(Point::new(10, 10), Point::new(40, 40));
    }
    for i in 10 ..= 40 {
        assert_eq!(bm.get_color(i, i), Color8::BLUE);
        assert_eq!(bm.get_color(i + 1, i), Color8::BLUE);
        assert_eq!(bm.get_color(i, i + 1), Color8::BLUE);
    }
    assert!(bm.get_color(10, 40).is_invisible());
    assert!(bm.get_color(40, 10).is_invisible());
}

#[test]
fn subpixel_caps_are_partially_covered() {
    let mut bm = Bitmap::new(BitmapFormat::Bit8, Size::new(30, 20));
    bm.fill(Color8::BLACK);
    {
        let mut ctx = GContext::new(&mut bm);
        ctx.set_stroke_color(Color8::RED);
        ctx.set_stroke_width(3);
        // 5.5 to 20.5 on row 10
        let at = |x: i16| PrecisePoint::new(Fixed::from_raw(x), Fixed::from_int(10));
        ctx.draw_line_precise(at(44), at(164));
    }
    for &x in &[4, 22] {
        let c = bm.get_color(x, 10);
        assert!(c.r() >= 1 && c.r() < 3, "x {} {:?}", x, c);
    }
    for x in 5 ..= 21 {
        assert_eq!(bm.get_color(x, 10), Color8::RED, "x {}", x);
    }
    assert_eq!(bm.get_color(3, 10), Color8::BLACK);
    assert_eq!(bm.get_color(23, 10), Color8::BLACK);
    assert_eq!(bm.get_color(4, 9), Color8::BLACK);
}
