extern crate gdraw;

use gdraw::{Bitmap, BitmapFormat, Color8, GContext, Point, PixelData, Rect, Size};
use gdraw::{FULL_TURN, QUARTER_TURN};

fn drawn(bm: &Bitmap) -> Vec<(i16, i16)> {
    let s = bm.size();
    let mut out = vec![];
    for y in 0 .. s.h {
        for x in 0 .. s.w {
            if !bm.get_color(x, y).is_invisible() {
                out.push((x, y));
            }
        }
    }
    out
}

fn draw<F: FnOnce(&mut GContext)>(f: F) -> Bitmap {
    let mut bm = Bitmap::new(BitmapFormat::Bit8, Size::new(40, 40));
    {
        let mut ctx = GContext::new(&mut bm);
        ctx.set_stroke_color(Color8::RED);
        ctx.set_fill_color(Color8::RED);
        f(&mut ctx);
    }
    bm
}

#[test]
fn zero_radius_wide_circle_is_a_disc() {
    for &aa in &[false, true] {
        let ring = draw(|ctx| {
            ctx.set_antialiased(aa);
            ctx.set_stroke_width(5);
            ctx.draw_circle(Point::new(20, 20), 0);
        });
        let disc = draw(|ctx| {
            ctx.set_antialiased(aa);
            ctx.fill_circle(Point::new(20, 20), 2);
        });
        assert_eq!(ring.pixeldata(), disc.pixeldata());
    }
}

#[test]
fn full_radial_is_an_oval() {
    let rect = Rect::new(5, 8, 20, 14);
    for &aa in &[false, true] {
        let radial = draw(|ctx| {
            ctx.set_antialiased(aa);
            ctx.fill_radial(rect, 20, 0, FULL_TURN);
        });
        let oval = draw(|ctx| {
            ctx.set_antialiased(aa);
            ctx.fill_oval(rect);
        });
        assert_eq!(radial.pixeldata(), oval.pixeldata());
        assert!(!drawn(&oval).is_empty());
    }
}

#[test]
fn oval_is_mirror_symmetric() {
    let bm = draw(|ctx| {
        ctx.set_antialiased(false);
        ctx.fill_oval(Rect::new(3, 5, 25, 15));
    });
    let px = drawn(&bm);
    for &(x, y) in &px {
        assert!(x >= 3 && x <= 27 && y >= 5 && y <= 19, "({},{})", x, y);
        assert!(px.contains(&(30 - x, y)), "({},{})", x, y);
        assert!(px.contains(&(x, 24 - y)), "({},{})", x, y);
    }
    assert!(px.contains(&(3, 12)));
    assert!(px.contains(&(15, 5)));
}

#[test]
fn empty_arc_draws_nothing() {
    let mut dirty = vec![];
    let mut bm = Bitmap::new(BitmapFormat::Bit8, Size::new(40, 40));
    {
        let mut ctx = GContext::new(&mut bm);
        ctx.set_dirty_listener(|r| dirty.push(r));
        ctx.set_stroke_color(Color8::RED);
        ctx.set_stroke_width(3);
        ctx.draw_arc(Rect::new(5, 5, 30, 30), QUARTER_TURN, QUARTER_TURN);
        assert!(ctx.dirty_rect().is_empty());
    }
    assert!(drawn(&bm).is_empty());
    assert!(dirty.iter().all(|r| r.is_empty()));
}

#[test]
fn quadrant_arc_is_confined() {
    let bm = draw(|ctx| {
        ctx.set_antialiased(false);
        ctx.draw_arc(Rect::new(10, 10, 21, 21), 0, QUARTER_TURN);
    });
    let px = drawn(&bm);
    assert!(!px.is_empty());
    for &(x, y) in &px {
        assert!(x >= 20 && y <= 20, "({},{}) outside the first quadrant", x, y);
    }
}

#[test]
fn wide_ring_has_a_hole() {
    let bm = draw(|ctx| {
        ctx.set_stroke_width(3);
        ctx.draw_circle(Point::new(20, 20), 12);
    });
    assert!(bm.get_color(20, 20).is_invisible());
    assert_eq!(bm.get_color(20, 8), Color8::RED);
    assert_eq!(bm.get_color(32, 20), Color8::RED);
    assert!(bm.get_color(20, 4).is_invisible());
}

#[test]
fn even_height_oval_is_mirror_symmetric() {
    let bm = draw(|ctx| {
        ctx.set_antialiased(false);
        ctx.fill_oval(Rect::new(3, 5, 24, 14));
    });
    let px = drawn(&bm);
    for &(x, y) in &px {
        assert!(x >= 3 && x <= 26 && y >= 5 && y <= 18, "({},{})", x, y);
        assert!(px.contains(&(29 - x, y)), "({},{})", x, y);
        assert!(px.contains(&(x, 23 - y)), "({},{})", x, y);
    }
    for p in &[(3, 11), (3, 12), (14, 5), (15, 18)] {
        assert!(px.contains(p), "{:?}", p);
    }
    let mut rows: Vec<_> = px.iter().map(|p| p.1).collect();
    rows.dedup();
    assert_eq!(rows.len(), 14);
}

#[test]
fn quadrant_pie_dirty_rect_is_exact() {
    let mut bm = Bitmap::new(BitmapFormat::Bit8, Size::new(40, 40));
    let dirty = {
        let mut ctx = GContext::new(&mut bm);
        ctx.set_fill_color(Color8::RED);
        ctx.fill_radial(Rect::new(0, 0, 31, 31), 40, QUARTER_TURN, 2 * QUARTER_TURN);
        ctx.dirty_rect()
    };
    let px = drawn(&bm);
    assert!(!px.is_empty());
    let x1 = px.iter().map(|p| p.0).min().unwrap();
    let x2 = px.iter().map(|p| p.0).max().unwrap();
    let y1 = px.iter().map(|p| p.1).min().unwrap();
    let y2 = px.iter().map(|p| p.1).max().unwrap();
    assert_eq!(dirty, Rect::new(x1, y1, x2 - x1 + 1, y2 - y1 + 1));
    assert!(x1 >= 15 && y1 >= 15, "{:?}", dirty);
}

#[test]
fn out_of_range_center_draws_nothing() {
    let mut dirty = vec![];
    let mut bm = Bitmap::new(BitmapFormat::Bit8, Size::new(40, 40));
    {
        let mut ctx = GContext::new(&mut bm);
        ctx.set_dirty_listener(|r| dirty.push(r));
        ctx.set_fill_color(Color8::RED);
        ctx.set_stroke_color(Color8::RED);
        // 8212 wraps to 20 when scaled into 13.3 fixed point
        ctx.fill_circle(Point::new(8212, 20), 3);
        ctx.fill_oval(Rect::new(8200, 10, 20, 20));
        ctx.set_stroke_width(3);
        ctx.draw_circle(Point::new(8212, 20), 3);
        ctx.draw_line(Point::new(8212, 20), Point::new(8232, 20));
        assert!(ctx.dirty_rect().is_empty());
    }
    assert!(drawn(&bm).is_empty());
    assert_eq!(dirty.len(), 4);
    assert!(dirty.iter().all(|r| r.is_empty()));
}
