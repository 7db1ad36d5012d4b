//! Draw Masks
//!
//! A [DrawMask] holds a 2 bit opacity per destination pixel. While attached
//! for recording, drawing writes opacity into the mask instead of the
//! destination: brighter colors record more opacity. While attached for
//! use, every pixel written to the destination has its alpha scaled by the
//! mask value under it.
//!
//!     use gdraw::{Bitmap,BitmapFormat,Size,GContext,DrawMask,Rect,Color8};
//!
//!     let mut bm = Bitmap::new(BitmapFormat::Bit8, Size::new(20,20));
//!     let mut ctx = GContext::new(&mut bm);
//!     let mask = DrawMask::new(&ctx, true).unwrap();
//!     ctx.mask_record(mask);
//!     ctx.set_fill_color(Color8::WHITE);
//!     ctx.fill_rect(Rect::new(0,0,10,20));
//!     let mask = ctx.mask_detach().unwrap();
//!     assert_eq!(mask.value(5,5), 3);
//!     assert_eq!(mask.value(15,5), 0);
//!
//!     ctx.mask_use(mask);
//!     ctx.set_fill_color(Color8::RED);
//!     ctx.fill_rect(Rect::new(0,0,20,20));
//!     ctx.mask_detach().unwrap().destroy();
//!     drop(ctx);
//!     assert_eq!(bm.get_color(5,5), Color8::RED);
//!     assert_eq!(bm.get_color(15,5), Color8::CLEAR);
//!
//! [DrawMask]: struct.DrawMask.html

use crate::color::Color8;
use crate::context::GContext;
use crate::error::{Error, Result};
use crate::fixed::Fixed;
use crate::geometry::Size;

use std::cmp::{max, min};

const fn build_apply_lut() -> [[u8; 4]; 4] {
    let mut lut = [[0u8; 4]; 4];
    let mut a = 0;
    while a < 4 {
        let mut m = 0;
        while m < 4 {
            lut[a][m] = ((a * m + 1) / 3) as u8;
            m += 1;
        }
        a += 1;
    }
    lut
}

const fn build_record_lut() -> [[[u8; 4]; 4]; 4] {
    let mut lut = [[[0u8; 4]; 4]; 4];
    let mut a = 0;
    while a < 4 {
        let mut m = 0;
        while m < 4 {
            let mut l = 0;
            while l < 4 {
                lut[a][m][l] = ((l * a + m * (3 - a) + 1) / 3) as u8;
                l += 1;
            }
            m += 1;
        }
        a += 1;
    }
    lut
}

/// Source alpha scaled by mask value, `[alpha][mask]`
pub static APPLY_LUT: [[u8; 4]; 4] = build_apply_lut();

/// New mask value, `[alpha][mask][luminance]`
pub static RECORD_LUT: [[[u8; 4]; 4]; 4] = build_record_lut();

/// Mask value of a fully opaque pixel
pub const MASK_OPAQUE: u8 = 3;

/// Whether a mask row needs per pixel lookups
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum MaskRowKind {
    /// Every pixel of the row is fully opaque
    Opaque,
    /// Pixel values must be read from the opacity plane
    PerPixel,
}

/// Row descriptor of a mask
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct MaskRow {
    pub kind: MaskRowKind,
    /// Leftmost recorded pixel; greater than `max_x` when nothing was recorded
    pub min_x: Fixed,
    /// Rightmost recorded pixel
    pub max_x: Fixed,
}

impl MaskRow {
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x
    }
}

/// Per pixel opacity plane matching a destination bitmap
#[derive(Debug,Clone)]
pub struct DrawMask {
    rows: Vec<MaskRow>,
    plane: Vec<u8>,
    size: Size,
}

impl DrawMask {
    /// Create a mask for the destination of `ctx`
    ///
    /// The mask starts fully transparent or fully opaque. Only 8 bit
    /// destinations support masking.
    pub fn new(ctx: &GContext, transparent: bool) -> Result<DrawMask> {
        let dest = ctx.dest();
        if !dest.format().is_color() {
            log::warn!("draw mask unsupported for {:?}", dest.format());
            return Err(Error::UnsupportedFormat(dest.format()));
        }
        let size = dest.size();
        let bytes = (size.w as usize * size.h as usize + 3) / 4;
        let mut plane = Vec::new();
        if plane.try_reserve_exact(bytes).is_err() {
            log::warn!("draw mask allocation of {} bytes failed", bytes);
            return Err(Error::AllocationFailure { bytes });
        }
        plane.resize(bytes, if transparent { 0x00 } else { 0xFF });
        let rows = (0 .. size.h).map(|y| {
            let row = dest.data_row(y);
            if transparent {
                MaskRow {
                    kind: MaskRowKind::PerPixel,
                    min_x: Fixed::from_int(row.max_x + 1),
                    max_x: Fixed::from_int(row.min_x - 1),
                }
            } else {
                MaskRow {
                    kind: MaskRowKind::Opaque,
                    min_x: Fixed::from_int(row.min_x),
                    max_x: Fixed::from_int(row.max_x),
                }
            }
        }).collect();
        log::debug!("draw mask {}x{} created, transparent {}", size.w, size.h, transparent);
        Ok(DrawMask { rows, plane, size })
    }
    /// Release the mask
    pub fn destroy(self) {
        log::debug!("draw mask {}x{} destroyed", self.size.w, self.size.h);
    }
    pub fn size(&self) -> Size {
        self.size
    }
    /// Row descriptors, one per destination row
    pub fn rows(&self) -> &[MaskRow] {
        &self.rows
    }
    /// Opacity at `(x,y)` in `0..=3`; outside the mask reads 0
    pub fn value(&self, x: i16, y: i16) -> u8 {
        if x < 0 || y < 0 || x >= self.size.w || y >= self.size.h {
            return 0;
        }
        if self.rows[y as usize].kind == MaskRowKind::Opaque {
            return MASK_OPAQUE;
        }
        let (i, shift) = self.index(x, y);
        (self.plane[i] >> shift) & 3
    }
    fn index(&self, x: i16, y: i16) -> (usize, u32) {
        let n = y as usize * self.size.w as usize + x as usize;
        (n / 4, (n % 4) as u32 * 2)
    }
    /// Accumulate a drawn pixel into the mask
    pub(crate) fn record(&mut self, x: i16, y: i16, color: Color8) {
        if x < 0 || y < 0 || x >= self.size.w || y >= self.size.h {
            return;
        }
        let old = self.value(x, y);
        let new = RECORD_LUT[color.a() as usize][old as usize][color.luminance() as usize];
        let (i, shift) = self.index(x, y);
        self.plane[i] = (self.plane[i] & !(3 << shift)) | (new << shift);
        let row = &mut self.rows[y as usize];
        if new != MASK_OPAQUE {
            row.kind = MaskRowKind::PerPixel;
        }
        let fx = Fixed::from_int(x);
        if row.is_empty() {
            row.min_x = fx;
            row.max_x = fx;
        } else {
            row.min_x = min(row.min_x, fx);
            row.max_x = max(row.max_x, fx);
        }
    }
}
