extern crate gdraw;

use gdraw::{Bitmap, BitmapFormat, Color8, DrawMask, Error, GContext, PixelData, Point, Rect, Size};
use test_log::test;

#[test]
fn locked_context_draws_nothing() {
    let mut bm = Bitmap::new(BitmapFormat::Bit8, Size::new(20, 20));
    {
        let mut ctx = GContext::new(&mut bm);
        ctx.set_fill_color(Color8::RED);
        {
            let fb = ctx.capture_frame_buffer().unwrap();
            fb.set_color(0, 0, Color8::BLUE);
        }
        assert!(ctx.is_locked());
        ctx.fill_rect(Rect::new(0, 0, 20, 20));
        ctx.fill_circle(Point::new(10, 10), 5);
        assert!(ctx.dirty_rect().is_empty());
        match ctx.capture_frame_buffer() {
            Err(Error::FrameBufferLocked) => {},
            other => panic!("nested capture: {:?}", other.map(|_| ())),
        }
        assert!(ctx.release_frame_buffer());
        assert!(!ctx.release_frame_buffer());
        assert_eq!(ctx.dirty_rect(), Rect::new(0, 0, 20, 20));
    }
    assert_eq!(bm.get_color(0, 0), Color8::BLUE);
    assert_eq!(bm.get_color(10, 10), Color8::CLEAR);
}

#[test]
fn paletted_destination_is_ignored() {
    let pal = [Color8::BLACK, Color8::WHITE];
    let mut bm = Bitmap::with_palette(BitmapFormat::Bit1Palette, Size::new(8, 8), &pal);
    {
        let mut ctx = GContext::new(&mut bm);
        ctx.set_fill_color(Color8::WHITE);
        ctx.fill_rect(Rect::new(0, 0, 8, 8));
        assert!(ctx.dirty_rect().is_empty());
    }
    assert!(bm.pixeldata().iter().all(|&b| b == 0));
}

#[test]
fn state_is_restored_after_nested_drawing() {
    let mut bm = Bitmap::new(BitmapFormat::Bit8, Size::new(30, 30));
    {
        let mut ctx = GContext::new(&mut bm);
        ctx.set_fill_color(Color8::GREEN);
        let saved = ctx.draw_state();
        ctx.move_draw_box(Point::new(10, 10));
        ctx.set_fill_color(Color8::RED);
        ctx.fill_rect(Rect::new(0, 0, 2, 2));
        ctx.set_draw_state(saved);
        ctx.fill_rect(Rect::new(0, 0, 2, 2));
        assert_eq!(ctx.dirty_rect(), Rect::new(0, 0, 12, 12));
    }
    assert_eq!(bm.get_color(11, 11), Color8::RED);
    assert_eq!(bm.get_color(1, 1), Color8::GREEN);
}

#[test]
fn round_display_rows() {
    let mut bm = Bitmap::new_circular(40);
    {
        let mut ctx = GContext::new(&mut bm);
        ctx.set_fill_color(Color8::YELLOW);
        ctx.fill_rect(Rect::new(0, 0, 40, 40));
        ctx.set_stroke_color(Color8::BLUE);
        ctx.draw_line(Point::new(0, 20), Point::new(39, 20));
        assert_eq!(ctx.dirty_rect(), Rect::new(0, 0, 40, 40));
    }
    assert_eq!(bm.get_color(0, 0), Color8::CLEAR);
    assert_eq!(bm.get_color(20, 20), Color8::BLUE);
    assert_eq!(bm.get_color(20, 2), Color8::YELLOW);
    assert!(bm.pixeldata().iter().all(|&b| b == Color8::YELLOW.argb || b == Color8::BLUE.argb));
}

#[test]
fn opaque_mask_leaves_drawing_unchanged() {
    let size = Size::new(24, 16);
    let mut plain = Bitmap::new(BitmapFormat::Bit8, size);
    {
        let mut ctx = GContext::new(&mut plain);
        ctx.set_fill_color(Color8::RED);
        ctx.fill_rect(Rect::new(0, 0, 24, 16));
    }
    let mut masked = Bitmap::new(BitmapFormat::Bit8, size);
    {
        let mut ctx = GContext::new(&mut masked);
        let mask = DrawMask::new(&ctx, true).unwrap();
        assert!(ctx.mask_record(mask).is_none());
        ctx.set_fill_color(Color8::WHITE);
        ctx.fill_rect(Rect::new(0, 0, 24, 16));
        // recording does not touch the destination
        assert!(ctx.dirty_rect().is_empty());
        let mask = ctx.mask_detach().unwrap();
        for y in 0 .. 16 {
            for x in 0 .. 24 {
                assert_eq!(mask.value(x, y), 3);
            }
        }
        ctx.mask_use(mask);
        ctx.set_fill_color(Color8::RED);
        ctx.fill_rect(Rect::new(0, 0, 24, 16));
        ctx.mask_detach().unwrap().destroy();
    }
    assert_eq!(masked.pixeldata(), plain.pixeldata());
}

#[test]
fn mask_shapes_later_drawing() {
    let mut bm = Bitmap::new(BitmapFormat::Bit8, Size::new(30, 30));
    {
        let mut ctx = GContext::new(&mut bm);
        let mask = DrawMask::new(&ctx, true).unwrap();
        ctx.mask_record(mask);
        ctx.set_fill_color(Color8::WHITE);
        ctx.set_antialiased(false);
        ctx.fill_circle(Point::new(15, 15), 6);
        let mask = ctx.mask_detach().unwrap();
        ctx.mask_use(mask);
        ctx.set_fill_color(Color8::GREEN);
        ctx.fill_rect(Rect::new(0, 0, 30, 30));
        ctx.mask_detach();
    }
    assert_eq!(bm.get_color(15, 15), Color8::GREEN);
    assert_eq!(bm.get_color(21, 15), Color8::GREEN);
    assert_eq!(bm.get_color(22, 15), Color8::CLEAR);
    assert_eq!(bm.get_color(2, 2), Color8::CLEAR);
}

#[test]
fn mask_needs_color_destination() {
    let mut bm = Bitmap::new(BitmapFormat::Bit1, Size::new(8, 8));
    let ctx = GContext::new(&mut bm);
    match DrawMask::new(&ctx, true) {
        Err(Error::UnsupportedFormat(BitmapFormat::Bit1)) => {},
        other => panic!("unexpected {:?}", other.map(|m| m.size())),
    }
}

#[test]
fn snapshot_roundtrip() {
    let mut bm = Bitmap::new(BitmapFormat::Bit8, Size::new(32, 24));
    {
        let mut ctx = GContext::new(&mut bm);
        ctx.set_fill_color(Color8::RED);
        ctx.fill_oval(Rect::new(2, 2, 28, 20));
        ctx.set_stroke_color(Color8::WHITE);
        ctx.draw_line(Point::new(0, 23), Point::new(31, 0));
    }
    let dir = std::env::temp_dir();
    let a = dir.join(format!("gdraw_snapshot_{}_a.png", std::process::id()));
    let b = dir.join(format!("gdraw_snapshot_{}_b.png", std::process::id()));
    bm.to_file(&a).unwrap();
    bm.to_file(&b).unwrap();
    let (data, w, h) = gdraw::read_file(&a).unwrap();
    assert_eq!((w, h), (32, 24));
    assert_eq!(data, bm.to_rgb());
    assert!(gdraw::img_diff(&a, &b).unwrap());
    std::fs::remove_file(&a).unwrap();
    std::fs::remove_file(&b).unwrap();
}
