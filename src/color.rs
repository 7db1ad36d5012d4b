//! Colors
//!
//! Destinations store colors as [Color8], one byte per pixel with two bits
//! for each of alpha, red, green and blue. [Rgba8] is the 8 bit per channel
//! form used when exporting images.
//!
//! [Color8]: struct.Color8.html
//! [Rgba8]: struct.Rgba8.html

use crate::math::multiply_u8;

/// Color with 2 bits per component, packed as `0bAARRGGBB`
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq,Hash)]
pub struct Color8 {
    pub argb: u8,
}

impl Color8 {
    pub const CLEAR: Color8 = Color8 { argb: 0x00 };
    pub const BLACK: Color8 = Color8 { argb: 0xC0 };
    pub const WHITE: Color8 = Color8 { argb: 0xFF };
    pub const RED: Color8 = Color8 { argb: 0xF0 };
    pub const GREEN: Color8 = Color8 { argb: 0xCC };
    pub const BLUE: Color8 = Color8 { argb: 0xC3 };
    pub const YELLOW: Color8 = Color8 { argb: 0xFC };
    pub const DARK_GRAY: Color8 = Color8 { argb: 0xD5 };
    pub const LIGHT_GRAY: Color8 = Color8 { argb: 0xEA };

    /// Create from 2 bit components (values above 3 are masked)
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color8 { argb: ((a & 3) << 6) | ((r & 3) << 4) | ((g & 3) << 2) | (b & 3) }
    }
    /// Create an opaque color from 2 bit components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color8::new(3, r, g, b)
    }
    /// Reduce 8 bit components, keeping the two most significant bits
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color8::new(a >> 6, r >> 6, g >> 6, b >> 6)
    }
    pub const fn a(self) -> u8 { self.argb >> 6 }
    pub const fn r(self) -> u8 { (self.argb >> 4) & 3 }
    pub const fn g(self) -> u8 { (self.argb >> 2) & 3 }
    pub const fn b(self) -> u8 { self.argb & 3 }

    /// Same color with a different 2 bit alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Color8 { argb: (self.argb & 0x3F) | ((a & 3) << 6) }
    }
    /// Whether drawing with this color can change a pixel
    pub fn is_invisible(self) -> bool {
        self.a() == 0
    }
    pub fn is_opaque(self) -> bool {
        self.a() == 3
    }
    /// Color with its red, green and blue components inverted
    pub fn inverted(self) -> Self {
        Color8 { argb: self.argb ^ 0x3F }
    }
    /// Perceived brightness on a `0..=3` scale
    pub fn luminance(self) -> u8 {
        let (r, g, b) = (u32::from(self.r()), u32::from(self.g()), u32::from(self.b()));
        ((r * 77 + g * 150 + b * 29 + 128) >> 8) as u8
    }
    /// Monochrome value: `true` for white
    pub fn to_bit(self) -> bool {
        self.luminance() >= 2
    }
    /// Color from a monochrome value
    pub fn from_bit(bit: bool) -> Self {
        if bit { Color8::WHITE } else { Color8::BLACK }
    }
    /// Scale the alpha by a coverage value in `0..=255`
    ///
    ///     use gdraw::Color8;
    ///     assert_eq!(Color8::RED.with_coverage(255), Color8::RED);
    ///     assert_eq!(Color8::RED.with_coverage(128).a(), 2);
    ///     assert!(Color8::RED.with_coverage(0).is_invisible());
    ///
    pub fn with_coverage(self, coverage: u8) -> Self {
        let a8 = self.a() * 85;
        let a8 = multiply_u8(a8, coverage);
        self.with_alpha(((u32::from(a8) + 42) / 85) as u8)
    }
    /// Composite `self` over an opaque `dest`
    ///
    /// Each channel is `(src * a + dst * (3 - a)) / 3`.
    ///
    ///     use gdraw::Color8;
    ///     let half = Color8::WHITE.with_alpha(2);
    ///     assert_eq!(half.blend_over(Color8::BLACK), Color8::rgb(2,2,2));
    ///
    pub fn blend_over(self, dest: Color8) -> Color8 {
        let a = self.a();
        match a {
            0 => dest,
            3 => self,
            _ => {
                let mix = |s: u8, d: u8| (s * a + d * (3 - a)) / 3;
                Color8::new(3, mix(self.r(), dest.r()), mix(self.g(), dest.g()),
                            mix(self.b(), dest.b()))
            }
        }
    }
}

/// Reduced color for monochrome palette targets
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum Color2 {
    Black,
    White,
    Clear,
}

impl From<Color2> for Color8 {
    fn from(c: Color2) -> Color8 {
        match c {
            Color2::Black => Color8::BLACK,
            Color2::White => Color8::WHITE,
            Color2::Clear => Color8::CLEAR,
        }
    }
}

/// Color as Red, Green, Blue, and Alpha
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq)]
pub struct Rgba8 {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Rgba8 {
    /// Create new color
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba8 { r, g, b, a }
    }
    /// Red, green and blue, dropping alpha
    pub fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Each 2 bit component scaled to `0..=255`
impl From<Color8> for Rgba8 {
    fn from(c: Color8) -> Rgba8 {
        Rgba8::new(c.r() * 85, c.g() * 85, c.b() * 85, c.a() * 85)
    }
}

/// How drawn pixels combine with the destination
///
/// Monochrome destinations apply the first six modes as bit operations. On
/// 8 bit destinations `Assign` copies, `AssignInverted` copies the inverted
/// color, `Tint` replaces the source color by the tint color while keeping
/// the source alpha, and the remaining modes composite source-over.
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum CompOp {
    Assign,
    AssignInverted,
    Or,
    And,
    Clear,
    Set,
    Tint,
}

impl Default for CompOp {
    fn default() -> CompOp {
        CompOp::Assign
    }
}

impl CompOp {
    /// Combine a source bit with a destination bit
    pub fn apply_bit(self, src: bool, dest: bool) -> bool {
        match self {
            CompOp::Assign => src,
            CompOp::AssignInverted => !src,
            CompOp::Or => dest | src,
            CompOp::And => dest & src,
            CompOp::Clear => dest & !src,
            CompOp::Set | CompOp::Tint => dest | !src,
        }
    }
    /// Foreground and background colors a monochrome source maps to
    ///
    /// A set (white) source bit draws the foreground, an unset bit the
    /// background. [Color8::CLEAR] leaves the destination untouched.
    ///
    /// [Color8::CLEAR]: struct.Color8.html#associatedconstant.CLEAR
    pub fn monochrome_colors(self) -> (Color8, Color8) {
        match self {
            CompOp::Assign => (Color8::WHITE, Color8::BLACK),
            CompOp::AssignInverted => (Color8::BLACK, Color8::WHITE),
            CompOp::Or => (Color8::WHITE, Color8::CLEAR),
            CompOp::And => (Color8::CLEAR, Color8::BLACK),
            CompOp::Clear => (Color8::BLACK, Color8::CLEAR),
            CompOp::Set | CompOp::Tint => (Color8::CLEAR, Color8::WHITE),
        }
    }
    /// Color written when compositing `src` onto an 8 bit `dest`
    pub fn composite(self, src: Color8, dest: Color8, tint: Color8) -> Color8 {
        match self {
            CompOp::Assign => src,
            CompOp::AssignInverted => src.inverted(),
            CompOp::Tint => tint.with_alpha(src.a()).blend_over(dest),
            _ => src.blend_over(dest),
        }
    }
}
