//! Fixed-point 2D rasterizer for small displays
//!
//! Lines, circles, ovals, arcs, rectangles and bitmaps drawn into 1 bit
//! and 8 bit (ARGB2222) frame buffers with integer-only arithmetic.
//!
//! # Example
//!
//!     use gdraw::{Bitmap,BitmapFormat,Size,GContext,Point,Rect,Color8};
//!
//!     let mut bm = Bitmap::new(BitmapFormat::Bit8, Size::new(64,64));
//!     let mut ctx = GContext::new(&mut bm);
//!     ctx.set_fill_color(Color8::BLUE);
//!     ctx.fill_rect(Rect::new(0,0,64,64));
//!     ctx.set_stroke_color(Color8::YELLOW);
//!     ctx.set_stroke_width(3);
//!     ctx.draw_line(Point::new(8,8), Point::new(56,40));
//!     ctx.fill_circle(Point::new(32,48), 10);
//!     drop(ctx);
//!     assert_eq!(bm.get_color(32,48), Color8::BLUE);
//!     assert_eq!(bm.get_color(8,8), Color8::YELLOW);
//!
//! How does this work
//!
//!    ctx = GContext( bitmap )           -- draw state, clip, dirty rect
//!    ctx.draw_*() / ctx.fill_*()
//!      drawing box offset, clip
//!      geometry in fixed point           -- line, circle, oval, blit
//!      DrawImplementation                -- six span operations
//!        DefaultDrawImplementation       -- mask in use, composite
//!        MaskRecordingDrawImplementation -- opacity into a DrawMask
//!      finish()                          -- dirty rect to the listener

pub mod error;
pub mod fixed;
pub mod math;
pub mod geometry;
pub mod trig;
pub mod color;
pub mod bitmap;
pub mod context;
pub mod backend;
pub mod mask;
pub mod line;
pub mod oval;
pub mod circle;
pub mod fill;
pub mod blit;
pub mod snapshot;

pub use error::*;
pub use fixed::*;
pub use math::*;
pub use geometry::*;
pub use trig::*;
pub use color::*;
pub use bitmap::*;
pub use context::*;
pub use backend::*;
pub use mask::*;
pub use line::*;
pub use oval::*;
pub use blit::*;
pub use snapshot::*;

/// Access to raw pixel data
pub trait PixelData {
    fn pixeldata(&self) -> &[u8];
}
