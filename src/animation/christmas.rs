//! Christmas: alternating warm-gold bands that march along the strip
//!
//! The combined array is split into bands of [`GROUP_SIZE`] pixels. Every
//! other band is lit during the "on" part of each period, and the pattern
//! shifts by one band per period. A slow sine stretches and shrinks the
//! period so the march speeds up and slows down.
//!
//! Pixels are never hard-switched on: lit pixels ease in and out at the
//! edges of the on phase and every frame moves them only part of the way
//! towards their target.

use embassy_time::Instant;

use super::{Animation, Progress};
use crate::{
    color::{BLACK, Rgb, rgb_from_u32},
    math8::{approach8, ease_cos, round8},
    surface::{CombinedSurface, DutyChannel, PixelSurface},
};

#[allow(clippy::unreadable_literal)]
const WARM_GOLD: Rgb = rgb_from_u32(0xFF6E0A);

/// Pixels per band
pub(crate) const GROUP_SIZE: usize = 6;

const BASE_ON_MS: f32 = 1500.0;
const BASE_OFF_MS: f32 = 800.0;
const BASE_FADE_MS: f32 = 50.0;
/// Speed modulation frequency, radians per second
const MODULATION_FREQ: f32 = 0.9;
const MIN_SPEED_MULT: f32 = 0.6;
const SPEED_MULT_RANGE: f32 = 0.6;

/// Time constant of the per-frame exponential blend
const SMOOTHING_MS: f32 = 120.0;
/// Minimum blend fraction so every frame makes progress
const MIN_BLEND: f32 = 0.02;
const PERCEPTUAL_CURVE: f32 = 1.8;

/// On/off timings for the current moment
///
/// Both lengths scale with the speed multiplier, which swings between
/// 0.6 and 1.2 of the base timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    pub on_ms: u64,
    pub off_ms: u64,
    /// Length of the ease at each edge of the on phase
    pub fade_ms: u64,
}

impl Cadence {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn at(elapsed_ms: u64) -> Self {
        let seconds = elapsed_ms as f32 / 1000.0;
        let osc = (libm::sinf(seconds * MODULATION_FREQ) + 1.0) * 0.5;
        let mult = MIN_SPEED_MULT + SPEED_MULT_RANGE * osc;

        let on_ms = (BASE_ON_MS * mult + 0.5) as u64;
        let off_ms = (BASE_OFF_MS * mult + 0.5) as u64;
        let fade_ms = BASE_FADE_MS.min(on_ms as f32 * 0.45) as u64;
        Self {
            on_ms,
            off_ms,
            fade_ms,
        }
    }

    /// One band step: on phase plus off phase
    pub const fn period(self) -> u64 {
        self.on_ms + self.off_ms
    }

    /// Eased level (0.0-1.0) of a lit band `within` ms into the period
    #[allow(clippy::cast_precision_loss)]
    fn envelope(self, within: u64) -> f32 {
        let alpha = if self.fade_ms == 0 {
            1.0
        } else if within < self.fade_ms {
            ease_cos(within as f32 / self.fade_ms as f32)
        } else if within > self.on_ms.saturating_sub(self.fade_ms) {
            let remaining = self.on_ms.saturating_sub(within);
            ease_cos(remaining as f32 / self.fade_ms as f32)
        } else {
            1.0
        };
        libm::powf(alpha, PERCEPTUAL_CURVE)
    }
}

#[derive(Debug, Clone)]
pub struct ChristmasAnimation {
    started: Instant,
    last_render: Option<Instant>,
    phase_offset: u8,
}

impl ChristmasAnimation {
    pub fn new(started: Instant) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let phase_offset = (started.as_millis() % 5) as u8;
        Self {
            started,
            last_render: None,
            phase_offset,
        }
    }

    /// Fraction of the remaining distance covered this frame
    #[allow(clippy::cast_precision_loss)]
    fn blend_amount(&self, now: Instant) -> f32 {
        let dt = self
            .last_render
            .map_or(0, |last| now.saturating_duration_since(last).as_millis());
        (dt as f32 / SMOOTHING_MS).clamp(MIN_BLEND, 1.0)
    }
}

impl Animation for ChristmasAnimation {
    fn render<S: PixelSurface, D: DutyChannel>(
        &mut self,
        now: Instant,
        surface: &mut CombinedSurface<'_, S>,
        duty: &mut D,
    ) -> Progress {
        // The dim light and the bands never show together
        if duty.read() > 0 {
            return Progress::Yielded;
        }

        let total = surface.len();
        if total == 0 {
            return Progress::Running;
        }

        let elapsed = now.saturating_duration_since(self.started).as_millis();
        let cadence = Cadence::at(elapsed);
        let period = cadence.period().max(1);
        let group_count = total.div_ceil(GROUP_SIZE) as u64;
        let offset = (elapsed / period + u64::from(self.phase_offset)) % group_count;
        let within = elapsed % period;
        let on_phase = within < cadence.on_ms;

        let alpha = cadence.envelope(within);
        let target = Rgb {
            r: round8(f32::from(WARM_GOLD.r) * alpha),
            g: round8(f32::from(WARM_GOLD.g) * alpha),
            b: round8(f32::from(WARM_GOLD.b) * alpha),
        };
        let amount = self.blend_amount(now);

        for ci in 0..total {
            let group = (ci / GROUP_SIZE) as u64;
            let lit = on_phase && (group + offset) % 2 == 0;
            if !lit {
                surface.set(ci, BLACK);
                continue;
            }

            let previous = surface.get(ci);
            let blended = Rgb {
                r: approach8(previous.r, target.r, amount),
                g: approach8(previous.g, target.g, amount),
                b: approach8(previous.b, target.b, amount),
            };
            surface.set(ci, blended);
        }
        surface.show(255);

        self.last_render = Some(now);
        Progress::Running
    }
}
