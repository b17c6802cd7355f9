//! Solid-color descriptors shared between the command and render contexts.
//!
//! A descriptor is written by whoever handles commands and read by the
//! render loop. The hand-off is one critical-section protected value plus
//! one atomic dirty flag per channel: writers update the descriptor first
//! and assert the flag last, the render loop clears the flag and then reads
//! the descriptor. A reader may still see an intermediate state for one
//! frame; the next dirty mark converges it.

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, Ordering};

use critical_section::Mutex;

use crate::color::{Rgb, WHITE};

/// Desired state of one light channel
///
/// `color` has no meaning for the PWM channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StripState {
    pub brightness: u8,
    pub color: Rgb,
    pub on: bool,
}

impl StripState {
    /// Power-up state of the PWM channel
    pub const DIM_DEFAULT: Self = Self {
        brightness: 255,
        color: WHITE,
        on: true,
    };

    /// Power-up state of an addressable strip
    pub const STRIP_DEFAULT: Self = Self {
        brightness: 128,
        color: WHITE,
        on: true,
    };

    /// Brightness to put on the hardware, 0 when switched off
    pub const fn output_brightness(self) -> u8 {
        if self.on { self.brightness } else { 0 }
    }
}

impl Default for StripState {
    fn default() -> Self {
        Self::STRIP_DEFAULT
    }
}

/// A [`StripState`] with a dirty flag, safe to share across contexts
pub struct SharedStrip {
    state: Mutex<Cell<StripState>>,
    dirty: AtomicBool,
}

impl SharedStrip {
    pub const fn new(state: StripState) -> Self {
        Self {
            state: Mutex::new(Cell::new(state)),
            dirty: AtomicBool::new(false),
        }
    }

    /// Like [`Self::new`], already flagged for the first push
    pub const fn new_dirty(state: StripState) -> Self {
        Self {
            state: Mutex::new(Cell::new(state)),
            dirty: AtomicBool::new(true),
        }
    }

    /// Copy of the current descriptor
    pub fn get(&self) -> StripState {
        critical_section::with(|cs| self.state.borrow(cs).get())
    }

    /// Modify the descriptor and mark it dirty
    pub fn update(&self, f: impl FnOnce(&mut StripState)) {
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut state = cell.get();
            f(&mut state);
            cell.set(state);
        });
        self.mark_dirty();
    }

    pub fn turn_on(&self) {
        self.update(|s| s.on = true);
    }

    pub fn turn_off(&self) {
        self.update(|s| s.on = false);
    }

    pub fn set_brightness(&self, brightness: u8) {
        self.update(|s| s.brightness = brightness);
    }

    pub fn set_color(&self, color: Rgb) {
        self.update(|s| s.color = color);
    }

    /// Request the descriptor to be pushed on the next idle frame
    pub fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Consume the dirty flag
    ///
    /// Returns the descriptor to apply, or `None` when nothing changed.
    /// Only the render loop calls this.
    pub fn take_dirty(&self) -> Option<StripState> {
        if !self.dirty.load(Ordering::Acquire) {
            return None;
        }
        self.dirty.store(false, Ordering::Release);
        Some(self.get())
    }
}
