//! Graphics Context and Draw State
//!
//! How does this work
//!    ctx = GContext( Bitmap )
//!    ctx.set_*()          -- configure the DrawState
//!    ctx.draw_*(), fill_*()
//!      translate by drawing_box.origin
//!      clip against clip_box and the destination bounds
//!      emit spans through the DrawImplementation
//!        DefaultDrawImplementation      -- frame buffer, masked if a mask is in use
//!        MaskRecordingDrawImplementation -- opacity into the attached DrawMask
//!        every plotted pixel grows the touched rect
//!      finish()                         -- mark_dirty(touched rect), then reset it

use crate::backend::{DrawImplementation, DEFAULT_DRAW_IMPLEMENTATION, MASK_RECORDING_DRAW_IMPLEMENTATION};
use crate::bitmap::Bitmap;
use crate::color::{Color2, Color8, CompOp};
use crate::error::{Error, Result};
use crate::fixed::{Fixed, FIXED_SHIFT};
use crate::geometry::{Point, PrecisePoint, Rect};
use crate::mask::DrawMask;

/// Rendering configuration
///
/// Plain value: save it with [GContext::draw_state] and put it back with
/// [GContext::set_draw_state] around nested drawing.
///
/// [GContext::draw_state]: struct.GContext.html#method.draw_state
/// [GContext::set_draw_state]: struct.GContext.html#method.set_draw_state
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct DrawState {
    pub stroke_color: Color8,
    pub fill_color: Color8,
    pub text_color: Color8,
    pub tint_color: Color8,
    pub compositing_mode: CompOp,
    /// Width of stroked lines, circles and arcs
    pub stroke_width: u8,
    pub antialiased: bool,
    /// Absolute region outside of which nothing is drawn
    pub clip_box: Rect,
    /// Absolute placement of the caller's local coordinate space
    pub drawing_box: Rect,
}

impl DrawState {
    fn new(bounds: Rect) -> Self {
        DrawState {
            stroke_color: Color8::BLACK,
            fill_color: Color8::BLACK,
            text_color: Color8::BLACK,
            tint_color: Color8::WHITE,
            compositing_mode: CompOp::Assign,
            stroke_width: 1,
            antialiased: true,
            clip_box: bounds,
            drawing_box: bounds,
        }
    }
}

struct AttachedMask {
    mask: DrawMask,
    recording: bool,
}

/// Destination bitmap plus the state used to draw into it
pub struct GContext<'a> {
    dest: &'a mut Bitmap,
    draw_state: DrawState,
    lock: bool,
    mask: Option<AttachedMask>,
    dirty: Rect,
    /// Pixels plotted by the primitive in progress
    touched: Rect,
    dirty_listener: Option<Box<dyn FnMut(Rect) + 'a>>,
}

impl<'a> GContext<'a> {
    /// Create a context drawing into `dest`
    ///
    /// Clip box and drawing box start out as the bitmap bounds.
    pub fn new(dest: &'a mut Bitmap) -> Self {
        let bounds = dest.bounds();
        GContext {
            dest,
            draw_state: DrawState::new(bounds),
            lock: false,
            mask: None,
            dirty: Rect::ZERO,
            touched: Rect::ZERO,
            dirty_listener: None,
        }
    }
    /// Destination bitmap
    pub fn dest(&self) -> &Bitmap {
        self.dest
    }
    pub(crate) fn dest_mut(&mut self) -> &mut Bitmap {
        self.dest
    }
    /// Copy of the current draw state
    pub fn draw_state(&self) -> DrawState {
        self.draw_state
    }
    /// Replace the draw state, typically with one saved earlier
    pub fn set_draw_state(&mut self, state: DrawState) {
        self.draw_state = state;
    }
    pub fn set_stroke_color(&mut self, c: Color8) {
        self.draw_state.stroke_color = c;
    }
    pub fn set_stroke_color_2bit(&mut self, c: Color2) {
        self.set_stroke_color(c.into());
    }
    pub fn set_fill_color(&mut self, c: Color8) {
        self.draw_state.fill_color = c;
    }
    pub fn set_fill_color_2bit(&mut self, c: Color2) {
        self.set_fill_color(c.into());
    }
    pub fn set_text_color(&mut self, c: Color8) {
        self.draw_state.text_color = c;
    }
    pub fn set_text_color_2bit(&mut self, c: Color2) {
        self.set_text_color(c.into());
    }
    pub fn set_tint_color(&mut self, c: Color8) {
        self.draw_state.tint_color = c;
    }
    pub fn set_tint_color_2bit(&mut self, c: Color2) {
        self.set_tint_color(c.into());
    }
    pub fn set_compositing_mode(&mut self, mode: CompOp) {
        self.draw_state.compositing_mode = mode;
    }
    pub fn set_antialiased(&mut self, enable: bool) {
        self.draw_state.antialiased = enable;
    }
    /// Set the stroke width; zero is ignored
    pub fn set_stroke_width(&mut self, width: u8) {
        if width > 0 {
            self.draw_state.stroke_width = width;
        }
    }
    /// Set the absolute clip box, limited to the destination bounds
    pub fn set_clip_box(&mut self, clip: Rect) {
        self.draw_state.clip_box = clip.clip(&self.dest.bounds());
    }
    /// Set the absolute drawing box
    pub fn set_drawing_box(&mut self, rect: Rect) {
        self.draw_state.drawing_box = rect;
    }
    /// Shift the drawing box, entering a nested coordinate frame
    pub fn move_draw_box(&mut self, offset: Point) {
        self.draw_state.drawing_box.origin = self.draw_state.drawing_box.origin + offset;
    }

    /// Take direct access to the frame buffer
    ///
    /// Until [release_frame_buffer](#method.release_frame_buffer) is called
    /// every drawing call is a no-op. Capturing twice fails.
    pub fn capture_frame_buffer(&mut self) -> Result<&mut Bitmap> {
        if self.lock {
            log::debug!("frame buffer capture rejected: already captured");
            return Err(Error::FrameBufferLocked);
        }
        self.lock = true;
        Ok(&mut *self.dest)
    }
    /// Give back the frame buffer; returns false if it was not captured
    ///
    /// The whole destination is marked dirty since its content is unknown.
    pub fn release_frame_buffer(&mut self) -> bool {
        if !self.lock {
            return false;
        }
        self.lock = false;
        let bounds = self.dest.bounds();
        self.mark_dirty(bounds);
        true
    }
    pub fn is_locked(&self) -> bool {
        self.lock
    }

    /// Receive every rect reported dirty by a drawing call
    pub fn set_dirty_listener<F: FnMut(Rect) + 'a>(&mut self, f: F) {
        self.dirty_listener = Some(Box::new(f));
    }
    /// Union of all rects marked dirty since the last reset
    pub fn dirty_rect(&self) -> Rect {
        self.dirty
    }
    pub fn reset_dirty_rect(&mut self) {
        self.dirty = Rect::ZERO;
    }
    /// Report a touched region, limited to the destination bounds
    pub(crate) fn mark_dirty(&mut self, rect: Rect) {
        let rect = rect.clip(&self.dest.bounds());
        if !rect.is_empty() {
            self.dirty = self.dirty.union(&rect);
        }
        log::trace!("mark_dirty {:?}", rect);
        if let Some(ref mut f) = self.dirty_listener {
            f(rect);
        }
    }

    /// Attach a mask; subsequent drawing records opacity into it
    ///
    /// Returns the previously attached mask, if any.
    pub fn mask_record(&mut self, mask: DrawMask) -> Option<DrawMask> {
        log::debug!("mask attached for recording");
        self.attach(mask, true)
    }
    /// Attach a mask; subsequent drawing is attenuated by it
    ///
    /// Returns the previously attached mask, if any.
    pub fn mask_use(&mut self, mask: DrawMask) -> Option<DrawMask> {
        log::debug!("mask attached for use");
        self.attach(mask, false)
    }
    /// Detach and return the attached mask
    pub fn mask_detach(&mut self) -> Option<DrawMask> {
        self.mask.take().map(|m| m.mask)
    }
    fn attach(&mut self, mask: DrawMask, recording: bool) -> Option<DrawMask> {
        self.mask.replace(AttachedMask { mask, recording }).map(|m| m.mask)
    }
    /// Mask attenuating frame buffer writes, if one is in use
    pub(crate) fn mask_in_use(&self) -> Option<&DrawMask> {
        match self.mask {
            Some(AttachedMask { ref mask, recording: false }) => Some(mask),
            _ => None,
        }
    }
    /// Mask receiving recorded opacity, if one is attached for recording
    pub(crate) fn mask_recording(&mut self) -> Option<&mut DrawMask> {
        match self.mask {
            Some(AttachedMask { ref mut mask, recording: true }) => Some(mask),
            _ => None,
        }
    }
    /// Span operations for the current mode
    pub(crate) fn draw_implementation(&self) -> &'static dyn DrawImplementation {
        match self.mask {
            Some(AttachedMask { recording: true, .. }) => &MASK_RECORDING_DRAW_IMPLEMENTATION,
            _ => &DEFAULT_DRAW_IMPLEMENTATION,
        }
    }

    /// Whether drawing may proceed; logs the reason when not
    pub(crate) fn can_draw(&self) -> bool {
        if self.lock {
            log::trace!("draw skipped: {}", Error::InvalidContext);
            return false;
        }
        if self.dest.format().is_palettized() {
            log::trace!("draw skipped: palettized destination");
            return false;
        }
        true
    }
    /// Whether a primitive drawn in `color` can change anything
    pub(crate) fn can_draw_with(&self, color: Color8) -> bool {
        if !self.can_draw() {
            return false;
        }
        if color.is_invisible() {
            log::trace!("draw skipped: invisible color");
            return false;
        }
        true
    }
    /// Grow the touched rect by one plotted pixel
    pub(crate) fn touch(&mut self, x: i16, y: i16) {
        self.touched = self.touched.union(&Rect::new(x, y, 1, 1));
    }
    /// Report the pixels plotted since the last call, which may be none
    ///
    /// Recording into a mask leaves the destination untouched and reports
    /// nothing.
    pub(crate) fn finish(&mut self) {
        let touched = std::mem::replace(&mut self.touched, Rect::ZERO);
        if self.mask_recording().is_some() {
            return;
        }
        if touched.is_empty() {
            log::trace!("draw finished: {}", Error::EmptyRegion);
        }
        self.mark_dirty(touched);
    }
    /// Antialiasing requested and supported by the destination
    pub(crate) fn antialiased(&self) -> bool {
        self.draw_state.antialiased && self.dest.format().is_color()
    }
    /// Stroke width rounded up to an odd value
    pub(crate) fn stroke_width_odd(&self) -> u8 {
        let w = self.draw_state.stroke_width;
        if w % 2 == 0 { w.saturating_add(1) } else { w }
    }
    /// Effective clip: clip box within the destination bounds
    pub(crate) fn clip_rect(&self) -> Rect {
        self.draw_state.clip_box.clip(&self.dest.bounds())
    }
    /// Local coordinates to absolute ones
    pub(crate) fn to_global(&self, p: Point) -> Point {
        p + self.draw_state.drawing_box.origin
    }
    /// Local precise coordinates to absolute ones
    ///
    /// `None` when the result leaves the fixed point range.
    pub(crate) fn to_global_precise(&self, p: PrecisePoint) -> Option<PrecisePoint> {
        let o = self.draw_state.drawing_box.origin;
        let x = Fixed::checked_from_raw_i32(p.x.raw32() + (i32::from(o.x) << FIXED_SHIFT))?;
        let y = Fixed::checked_from_raw_i32(p.y.raw32() + (i32::from(o.y) << FIXED_SHIFT))?;
        Some(PrecisePoint::new(x, y))
    }
    /// Local pixel to an absolute precise point, `None` out of range
    pub(crate) fn to_global_fixed(&self, p: Point) -> Option<PrecisePoint> {
        let precise = PrecisePoint::checked_from(p).and_then(|q| self.to_global_precise(q));
        if precise.is_none() {
            log::trace!("draw skipped: {:?} outside the fixed point range", p);
        }
        precise
    }
}
