//! Bitmaps
//!
//! A [Bitmap] is both the destination frame buffer and the source of blits.
//! Pixel data is stored row-major; rectangular formats use a fixed row
//! stride, [BitmapFormat::Bit8Circular] uses one [RowInfo] per row so that
//! only the visible pixels of a round display are stored.
//!
//! [Bitmap]: struct.Bitmap.html
//! [RowInfo]: struct.RowInfo.html
//! [BitmapFormat::Bit8Circular]: enum.BitmapFormat.html#variant.Bit8Circular

use crate::color::{Color8, Rgba8};
use crate::geometry::{Rect, Size};
use crate::math::integer_sqrt;

use std::path::Path;

/// Pixel Format of a Bitmap
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum BitmapFormat {
    /// 1 bit per pixel, least significant bit first, rows padded to 32 bits
    Bit1,
    /// 8 bit `Color8` per pixel
    Bit8,
    /// 1 bit palette index per pixel, most significant bit first
    Bit1Palette,
    /// 2 bit palette index per pixel, most significant bits first
    Bit2Palette,
    /// 4 bit palette index per pixel, most significant bits first
    Bit4Palette,
    /// 8 bit `Color8` per pixel, rows of a round display packed back to back
    Bit8Circular,
}

impl BitmapFormat {
    /// Bits used to store one pixel
    pub fn bits_per_pixel(self) -> usize {
        match self {
            BitmapFormat::Bit1 | BitmapFormat::Bit1Palette => 1,
            BitmapFormat::Bit2Palette => 2,
            BitmapFormat::Bit4Palette => 4,
            BitmapFormat::Bit8 | BitmapFormat::Bit8Circular => 8,
        }
    }
    /// Pixels are indices into a palette
    pub fn is_palettized(self) -> bool {
        match self {
            BitmapFormat::Bit1Palette | BitmapFormat::Bit2Palette |
            BitmapFormat::Bit4Palette => true,
            _ => false,
        }
    }
    /// Pixels hold full 8 bit colors
    pub fn is_color(self) -> bool {
        self == BitmapFormat::Bit8 || self == BitmapFormat::Bit8Circular
    }
    fn stride(self, width: usize) -> usize {
        match self {
            BitmapFormat::Bit1 => (width + 31) / 32 * 4,
            _ => (width * self.bits_per_pixel() + 7) / 8,
        }
    }
}

/// Location and valid pixel range of one data row
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq)]
pub struct RowInfo {
    /// Byte offset of the pixel at `min_x`
    pub offset: usize,
    /// First pixel stored in this row
    pub min_x: i16,
    /// Last pixel stored in this row
    pub max_x: i16,
}

/// Pixel storage with its format and geometry
#[derive(Debug,Clone)]
pub struct Bitmap {
    data: Vec<u8>,
    format: BitmapFormat,
    size: Size,
    bounds: Rect,
    stride: usize,
    rows: Option<Vec<RowInfo>>,
    palette: Vec<Color8>,
}

impl Bitmap {
    /// Create a new zeroed bitmap of width * height pixels
    ///
    ///     use gdraw::{Bitmap,BitmapFormat,Size};
    ///     let bm = Bitmap::new(BitmapFormat::Bit1, Size::new(144,168));
    ///     assert_eq!(bm.stride(), 20);
    ///     assert_eq!(bm.data().len(), 20 * 168);
    ///
    pub fn new(format: BitmapFormat, size: Size) -> Self {
        assert!(!format.is_palettized(), "palettized bitmaps need a palette");
        assert!(format != BitmapFormat::Bit8Circular, "use Bitmap::new_circular");
        Self::with_layout(format, size, Vec::new())
    }
    /// Create a new palettized bitmap; pixels start at palette index 0
    pub fn with_palette(format: BitmapFormat, size: Size, palette: &[Color8]) -> Self {
        assert!(format.is_palettized(), "{:?} has no palette", format);
        assert!(!palette.is_empty(), "empty palette");
        Self::with_layout(format, size, palette.to_vec())
    }
    fn with_layout(format: BitmapFormat, size: Size, palette: Vec<Color8>) -> Self {
        assert!(size.w > 0 && size.h > 0, "Cannot create bitmap with 0 width or height");
        let stride = format.stride(size.w as usize);
        Bitmap {
            data: vec![0u8; stride * size.h as usize],
            format, size, stride, palette,
            bounds: Rect::new(0, 0, size.w, size.h),
            rows: None,
        }
    }
    /// Wrap existing pixel data using a row stride
    pub fn from_data(format: BitmapFormat, size: Size, stride: usize, data: Vec<u8>) -> Self {
        assert!(!format.is_palettized() && format != BitmapFormat::Bit8Circular);
        assert!(size.w > 0 && size.h > 0, "Cannot create bitmap with 0 width or height");
        assert!(stride >= format.stride(size.w as usize), "stride too small");
        assert!(data.len() >= stride * size.h as usize, "data too short");
        Bitmap {
            data, format, size, stride,
            bounds: Rect::new(0, 0, size.w, size.h),
            rows: None,
            palette: Vec::new(),
        }
    }
    /// Create the frame buffer of a round display with the given diameter
    ///
    /// Every row stores only the pixels whose centers fall inside the
    /// circle.
    pub fn new_circular(diameter: i16) -> Self {
        assert!(diameter > 0, "Cannot create bitmap with 0 diameter");
        let d = i64::from(diameter);
        let mut rows = Vec::with_capacity(diameter as usize);
        let mut offset = 0;
        for y in 0 .. d {
            let dy = 2 * y + 1 - d;
            let span = integer_sqrt(d * d - dy * dy);
            let min_x = (d - 1 - span + 1).max(0) / 2;
            let max_x = d - 1 - min_x;
            rows.push(RowInfo { offset, min_x: min_x as i16, max_x: max_x as i16 });
            offset += (max_x - min_x + 1) as usize;
        }
        log::debug!("circular bitmap: diameter {} stores {} bytes", diameter, offset);
        Bitmap {
            data: vec![0u8; offset],
            format: BitmapFormat::Bit8Circular,
            size: Size::new(diameter, diameter),
            bounds: Rect::new(0, 0, diameter, diameter),
            stride: 0,
            rows: Some(rows),
            palette: Vec::new(),
        }
    }
    pub fn format(&self) -> BitmapFormat {
        self.format
    }
    /// Size of the stored pixel data
    pub fn size(&self) -> Size {
        self.size
    }
    /// Region of the bitmap that may be read or drawn
    pub fn bounds(&self) -> Rect {
        self.bounds
    }
    /// Restrict the readable and drawable region; clipped to the data size
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds.clip(&Rect::new(0, 0, self.size.w, self.size.h));
    }
    /// Bytes per row for rectangular formats, 0 for circular ones
    pub fn stride(&self) -> usize {
        self.stride
    }
    pub fn palette(&self) -> &[Color8] {
        &self.palette
    }
    /// Raw pixel data
    pub fn data(&self) -> &[u8] {
        &self.data
    }
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
    /// Storage description of row `y`
    pub fn data_row(&self, y: i16) -> RowInfo {
        debug_assert!(y >= 0 && y < self.size.h);
        match self.rows {
            Some(ref rows) => rows[y as usize],
            None => RowInfo {
                offset: y as usize * self.stride,
                min_x: 0,
                max_x: self.size.w - 1,
            },
        }
    }
    /// Pixels of row `y` that are both stored and inside the bounds
    pub fn row_window(&self, y: i16) -> Option<(i16, i16)> {
        if y < self.bounds.origin.y || y > self.bounds.max_y() {
            return None;
        }
        let row = self.data_row(y);
        let min_x = row.min_x.max(self.bounds.origin.x);
        let max_x = row.max_x.min(self.bounds.max_x());
        if min_x > max_x {
            None
        } else {
            Some((min_x, max_x))
        }
    }
    /// Whether pixel `(x,y)` is stored and inside the bounds
    pub fn contains(&self, x: i16, y: i16) -> bool {
        match self.row_window(y) {
            Some((min_x, max_x)) => x >= min_x && x <= max_x,
            None => false,
        }
    }
    /// Byte index holding an 8 bit pixel
    pub(crate) fn byte_index(&self, x: i16, y: i16) -> usize {
        let row = self.data_row(y);
        row.offset + (x - row.min_x) as usize
    }
    pub(crate) fn get_bit(&self, x: i16, y: i16) -> bool {
        let row = self.data_row(y);
        let byte = self.data[row.offset + x as usize / 8];
        byte & (1 << (x % 8)) != 0
    }
    pub(crate) fn put_bit(&mut self, x: i16, y: i16, bit: bool) {
        let row = self.data_row(y);
        let i = row.offset + x as usize / 8;
        if bit {
            self.data[i] |= 1 << (x % 8);
        } else {
            self.data[i] &= !(1 << (x % 8));
        }
    }
    /// Palette index of a pixel in a palettized bitmap
    pub fn get_index(&self, x: i16, y: i16) -> u8 {
        let bpp = self.format.bits_per_pixel();
        let per_byte = 8 / bpp;
        let row = self.data_row(y);
        let byte = self.data[row.offset + x as usize / per_byte];
        let shift = (per_byte - 1 - x as usize % per_byte) * bpp;
        (byte >> shift) & ((1u16 << bpp) - 1) as u8
    }
    /// Set the palette index of a pixel in a palettized bitmap
    pub fn set_index(&mut self, x: i16, y: i16, index: u8) {
        assert!(self.format.is_palettized());
        if !self.contains(x, y) {
            return;
        }
        let bpp = self.format.bits_per_pixel();
        let per_byte = 8 / bpp;
        let mask = ((1u16 << bpp) - 1) as u8;
        let row = self.data_row(y);
        let i = row.offset + x as usize / per_byte;
        let shift = (per_byte - 1 - x as usize % per_byte) * bpp;
        self.data[i] = (self.data[i] & !(mask << shift)) | ((index & mask) << shift);
    }
    /// Color of the pixel at `(x,y)`
    ///
    /// Pixels outside the stored region read as [Color8::CLEAR].
    ///
    /// [Color8::CLEAR]: struct.Color8.html#associatedconstant.CLEAR
    pub fn get_color(&self, x: i16, y: i16) -> Color8 {
        if !self.contains(x, y) {
            return Color8::CLEAR;
        }
        match self.format {
            BitmapFormat::Bit1 => Color8::from_bit(self.get_bit(x, y)),
            BitmapFormat::Bit8 | BitmapFormat::Bit8Circular => {
                Color8 { argb: self.data[self.byte_index(x, y)] }
            }
            _ => {
                let i = self.get_index(x, y) as usize;
                self.palette.get(i).cloned().unwrap_or(Color8::CLEAR)
            }
        }
    }
    /// Store a color at `(x,y)` without any blending
    ///
    /// Monochrome formats store the thresholded color; palettized formats
    /// store the first palette entry equal to the color, if any.
    pub fn set_color(&mut self, x: i16, y: i16, c: Color8) {
        if !self.contains(x, y) {
            return;
        }
        match self.format {
            BitmapFormat::Bit1 => self.put_bit(x, y, c.to_bit()),
            BitmapFormat::Bit8 | BitmapFormat::Bit8Circular => {
                let i = self.byte_index(x, y);
                self.data[i] = c.argb;
            }
            _ => {
                if let Some(i) = self.palette.iter().position(|&p| p == c) {
                    self.set_index(x, y, i as u8);
                }
            }
        }
    }
    /// Set every pixel inside the bounds to a color
    pub fn fill(&mut self, c: Color8) {
        let b = self.bounds;
        for y in b.origin.y ..= b.max_y() {
            if let Some((x1, x2)) = self.row_window(y) {
                for x in x1 ..= x2 {
                    self.set_color(x, y, c);
                }
            }
        }
    }
    /// Pixels as 8 bit RGB triples over the full data size
    ///
    /// Pixels that are not stored (corners of a round display) are black.
    pub fn to_rgb(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size.w as usize * self.size.h as usize * 3);
        for y in 0 .. self.size.h {
            for x in 0 .. self.size.w {
                let c = self.get_color(x, y);
                let c = if c.is_invisible() { Color8::BLACK } else { c };
                out.extend_from_slice(&Rgba8::from(c).rgb());
            }
        }
        out
    }
    /// Write the bitmap as a PNG image
    pub fn to_file<P: AsRef<Path>>(&self, filename: P) -> crate::Result<()> {
        crate::snapshot::write_file(&self.to_rgb(), self.size.w as usize,
                                    self.size.h as usize, filename)
    }
}

impl crate::PixelData for Bitmap {
    fn pixeldata(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monochrome_packing() {
        let mut bm = Bitmap::new(BitmapFormat::Bit1, Size::new(10, 2));
        assert_eq!(bm.stride(), 4);
        bm.set_color(0, 0, Color8::WHITE);
        bm.set_color(9, 1, Color8::WHITE);
        assert_eq!(bm.data()[0], 0b0000_0001);
        assert_eq!(bm.data()[4 + 1], 0b0000_0010);
        assert_eq!(bm.get_color(9, 1), Color8::WHITE);
        assert_eq!(bm.get_color(8, 1), Color8::BLACK);
        assert_eq!(bm.get_color(10, 1), Color8::CLEAR);
    }

    #[test]
    fn palette_packing() {
        let pal = [Color8::BLACK, Color8::RED, Color8::GREEN, Color8::BLUE];
        let mut bm = Bitmap::with_palette(BitmapFormat::Bit2Palette, Size::new(5, 1), &pal);
        assert_eq!(bm.stride(), 2);
        bm.set_index(0, 0, 3);
        bm.set_color(1, 0, Color8::RED);
        bm.set_index(4, 0, 2);
        assert_eq!(bm.data()[0], 0b11_01_00_00);
        assert_eq!(bm.data()[1], 0b10_00_00_00);
        assert_eq!(bm.get_color(0, 0), Color8::BLUE);
        assert_eq!(bm.get_color(1, 0), Color8::RED);
        assert_eq!(bm.get_color(4, 0), Color8::GREEN);
    }

    #[test]
    fn circular_rows() {
        let bm = Bitmap::new_circular(180);
        let top = bm.data_row(0);
        let mid = bm.data_row(90);
        assert!(top.min_x > 60, "{:?}", top);
        assert_eq!(top.min_x + top.max_x, 179);
        assert_eq!((mid.min_x, mid.max_x), (0, 179));
        for y in 0 .. 90 {
            assert_eq!(bm.data_row(y).min_x, bm.data_row(179 - y).min_x);
        }
        let last = bm.data_row(179);
        assert_eq!(last.offset + (last.max_x - last.min_x) as usize + 1, bm.data().len());
        assert!(!bm.contains(0, 0));
        assert!(bm.contains(90, 0));
    }

    #[test]
    fn bounds_window() {
        let mut bm = Bitmap::new(BitmapFormat::Bit8, Size::new(20, 20));
        bm.set_bounds(Rect::new(5, 5, 100, 5));
        assert_eq!(bm.bounds(), Rect::new(5, 5, 15, 5));
        assert_eq!(bm.row_window(4), None);
        assert_eq!(bm.row_window(5), Some((5, 19)));
        bm.fill(Color8::RED);
        assert_eq!(bm.get_color(5, 5), Color8::RED);
        assert_eq!(bm.data()[0], 0);
    }
}
