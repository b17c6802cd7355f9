//! Hardware seams: addressable strips and the PWM duty register.
//!
//! The two physical strips are addressed by the animations as one
//! continuous array. `ws2` is the left end and is wired back to front,
//! so combined index 0 is the last physical pixel of `ws2`; `ws1` follows
//! in its natural order.

use crate::OutputDriver;
use crate::color::{BLACK, Rgb, dim_color};

/// One addressable strip
///
/// Pixel colors are stored unscaled; the global brightness is applied
/// when the buffer is committed to the hardware.
pub trait PixelSurface {
    /// Number of physical pixels
    fn num_pixels(&self) -> usize;

    /// Set a pixel color. Out-of-range indices are ignored.
    fn set_pixel(&mut self, index: usize, color: Rgb);

    /// Read back a pixel color. Out-of-range indices read as black.
    fn pixel(&self, index: usize) -> Rgb;

    /// Set the global brightness scalar
    fn set_brightness(&mut self, brightness: u8);

    /// Current global brightness scalar
    fn brightness(&self) -> u8;

    /// Push the buffer to the hardware
    fn commit(&mut self);

    /// Set every pixel to `color`
    fn fill(&mut self, color: Rgb) {
        for i in 0..self.num_pixels() {
            self.set_pixel(i, color);
        }
    }

    /// Set every pixel to black
    fn clear(&mut self) {
        self.fill(BLACK);
    }
}

/// One PWM output with an 8-bit duty
pub trait DutyChannel {
    /// Write a new duty
    fn write(&mut self, duty: u8);

    /// Read back the duty currently applied
    fn read(&self) -> u8;
}

/// Physical addressable strips
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StripId {
    /// Right strip, forward order in the combined array
    Ws1,
    /// Left strip, reversed in the combined array
    Ws2,
}

/// Physical location of a combined pixel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRef {
    pub strip: StripId,
    pub index: usize,
}

/// Map a combined index onto a physical pixel
///
/// Returns `None` when `index` is past the end of the combined array.
pub const fn locate(ws2_len: usize, ws1_len: usize, index: usize) -> Option<PixelRef> {
    if index < ws2_len {
        return Some(PixelRef {
            strip: StripId::Ws2,
            index: ws2_len - 1 - index,
        });
    }
    let right = index - ws2_len;
    if right < ws1_len {
        return Some(PixelRef {
            strip: StripId::Ws1,
            index: right,
        });
    }
    None
}

/// Both strips viewed as one logical array
///
/// A missing strip contributes zero pixels; every operation on it is
/// skipped.
pub struct CombinedSurface<'a, S: PixelSurface> {
    ws1: Option<&'a mut S>,
    ws2: Option<&'a mut S>,
}

impl<'a, S: PixelSurface> CombinedSurface<'a, S> {
    pub fn new(ws1: Option<&'a mut S>, ws2: Option<&'a mut S>) -> Self {
        Self { ws1, ws2 }
    }

    fn ws1_len(&self) -> usize {
        self.ws1.as_ref().map_or(0, |s| s.num_pixels())
    }

    fn ws2_len(&self) -> usize {
        self.ws2.as_ref().map_or(0, |s| s.num_pixels())
    }

    /// Total number of combined pixels
    pub fn len(&self) -> usize {
        self.ws1_len() + self.ws2_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Physical location of a combined index
    pub fn locate(&self, index: usize) -> Option<PixelRef> {
        locate(self.ws2_len(), self.ws1_len(), index)
    }

    fn strip_mut(&mut self, id: StripId) -> Option<&mut S> {
        match id {
            StripId::Ws1 => self.ws1.as_deref_mut(),
            StripId::Ws2 => self.ws2.as_deref_mut(),
        }
    }

    fn strip(&self, id: StripId) -> Option<&S> {
        match id {
            StripId::Ws1 => self.ws1.as_deref(),
            StripId::Ws2 => self.ws2.as_deref(),
        }
    }

    /// Set the color of a combined pixel
    pub fn set(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.locate(index) {
            self.set_physical(pixel, color);
        }
    }

    /// Set a pixel by its physical position, bypassing the combined mapping
    pub fn set_physical(&mut self, pixel: PixelRef, color: Rgb) {
        if let Some(strip) = self.strip_mut(pixel.strip) {
            strip.set_pixel(pixel.index, color);
        }
    }

    /// Read back the color of a combined pixel
    pub fn get(&self, index: usize) -> Rgb {
        self.locate(index)
            .and_then(|pixel| self.strip(pixel.strip).map(|s| s.pixel(pixel.index)))
            .unwrap_or(BLACK)
    }

    /// Run `f` on each present strip, left (`ws2`) first
    pub fn for_each_strip(&mut self, mut f: impl FnMut(&mut S)) {
        if let Some(strip) = self.ws2.as_deref_mut() {
            f(strip);
        }
        if let Some(strip) = self.ws1.as_deref_mut() {
            f(strip);
        }
    }

    pub fn fill(&mut self, color: Rgb) {
        self.for_each_strip(|s| s.fill(color));
    }

    pub fn clear(&mut self) {
        self.for_each_strip(S::clear);
    }

    pub fn set_brightness(&mut self, brightness: u8) {
        self.for_each_strip(|s| s.set_brightness(brightness));
    }

    pub fn commit(&mut self) {
        self.for_each_strip(S::commit);
    }

    /// Set brightness on both strips and push them out
    pub fn show(&mut self, brightness: u8) {
        self.for_each_strip(|s| {
            s.set_brightness(brightness);
            s.commit();
        });
    }
}

/// In-memory strip of `N` pixels that commits through an [`OutputDriver`]
///
/// The driver receives the brightness-scaled frame.
pub struct StripBuffer<D: OutputDriver, const N: usize> {
    driver: D,
    pixels: [Rgb; N],
    brightness: u8,
}

impl<D: OutputDriver, const N: usize> StripBuffer<D, N> {
    pub const fn new(driver: D) -> Self {
        Self {
            driver,
            pixels: [BLACK; N],
            brightness: 255,
        }
    }

    /// Unscaled pixel colors
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }
}

impl<D: OutputDriver, const N: usize> PixelSurface for StripBuffer<D, N> {
    fn num_pixels(&self) -> usize {
        N
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    fn pixel(&self, index: usize) -> Rgb {
        self.pixels.get(index).copied().unwrap_or(BLACK)
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    fn brightness(&self) -> u8 {
        self.brightness
    }

    fn commit(&mut self) {
        let mut frame = self.pixels;
        for pixel in &mut frame {
            *pixel = dim_color(*pixel, self.brightness);
        }
        self.driver.write(&frame);
    }
}
