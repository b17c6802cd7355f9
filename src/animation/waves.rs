//! Slow blue/cyan waves
//!
//! The phase advances a fixed step per rendered frame, so the speed is tied
//! to the frame rate rather than to wall time. Each strip carries one full
//! sine period. Never finishes on its own.

use embassy_time::Instant;

use super::{Animation, Progress};
use crate::{
    color::Rgb,
    math8::clamp8,
    surface::{CombinedSurface, DutyChannel, PixelSurface},
};

/// Phase advance per frame, in radians
pub(crate) const PHASE_STEP: f32 = 0.02;
/// Contrast curve applied to the raw sine
const CONTRAST: f32 = 1.8;
const BRIGHTNESS: u8 = 220;

#[derive(Debug, Clone, Default)]
pub struct WavesAnimation {
    phase: f32,
}

impl WavesAnimation {
    pub const fn new() -> Self {
        Self { phase: 0.0 }
    }

    /// Wave color for relative position `x` (0.0-1.0) at `phase`
    pub fn color_at(x: f32, phase: f32) -> Rgb {
        let raw = (libm::sinf(x * core::f32::consts::TAU + phase) + 1.0) / 2.0;
        let wave = libm::powf(raw, CONTRAST);
        Rgb {
            r: clamp8(5.0 * wave),
            g: clamp8(50.0 + 180.0 * wave),
            b: clamp8(100.0 + 155.0 * wave),
        }
    }
}

impl Animation for WavesAnimation {
    fn render<S: PixelSurface, D: DutyChannel>(
        &mut self,
        _now: Instant,
        surface: &mut CombinedSurface<'_, S>,
        _duty: &mut D,
    ) -> Progress {
        self.phase += PHASE_STEP;
        if self.phase >= core::f32::consts::TAU {
            self.phase -= core::f32::consts::TAU;
        }
        let phase = self.phase;

        surface.for_each_strip(|strip| {
            let n = strip.num_pixels();
            #[allow(clippy::cast_precision_loss)]
            let len = n.max(1) as f32;
            for i in 0..n {
                #[allow(clippy::cast_precision_loss)]
                let x = i as f32 / len;
                strip.set_pixel(i, Self::color_at(x, phase));
            }
            strip.set_brightness(BRIGHTNESS);
            strip.commit();
        });
        Progress::Running
    }
}
