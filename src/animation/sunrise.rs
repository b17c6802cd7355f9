//! Two-stage sunrise
//!
//! - Stage 1 (first half): a red band grows from combined index 0 while
//!   its intensity rises; the PWM light stays off.
//! - Stage 2 (second half): every pixel ramps red -> white while the PWM
//!   light fades in.
//!
//! Ends on full white with the PWM light at full duty.

use embassy_time::{Duration, Instant};

use super::{Animation, Progress};
use crate::{
    color::{BLACK, Rgb, WHITE},
    math8::{clamp8, progress, round8},
    surface::{CombinedSurface, DutyChannel, PixelRef, PixelSurface, StripId},
};

/// Faint red placed on the first physical pixel of the left strip at start
const SEED: Rgb = Rgb { r: 5, g: 0, b: 0 };
const SEED_BRIGHTNESS: u8 = 50;
/// Strip brightness while the red band is drawn
const DRAW_BRIGHTNESS: u8 = 120;

#[derive(Debug, Clone)]
pub struct SunriseAnimation {
    started: Instant,
    duration: Duration,
}

impl SunriseAnimation {
    pub const fn new(started: Instant, duration: Duration) -> Self {
        Self { started, duration }
    }

    fn draw_band<S: PixelSurface>(surface: &mut CombinedSurface<'_, S>, stage: f32) {
        let total = surface.len();
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let lit = (libm::ceilf(stage * total as f32) as usize).min(total);
        let red = Rgb {
            r: clamp8(5.0 + stage * 200.0),
            g: 0,
            b: 0,
        };

        for ci in 0..total {
            surface.set(ci, if ci < lit { red } else { BLACK });
        }
        surface.show(DRAW_BRIGHTNESS);
    }

    fn draw_dawn<S: PixelSurface>(surface: &mut CombinedSurface<'_, S>, stage: f32) {
        let color = Rgb {
            r: clamp8(150.0 + stage * 105.0),
            g: clamp8(stage * 255.0),
            b: clamp8(stage * 255.0),
        };
        surface.fill(color);
        surface.show(255);
    }
}

impl Animation for SunriseAnimation {
    fn prime<S: PixelSurface, D: DutyChannel>(
        &mut self,
        surface: &mut CombinedSurface<'_, S>,
        duty: &mut D,
    ) {
        duty.write(0);
        surface.clear();
        surface.set_physical(
            PixelRef {
                strip: StripId::Ws2,
                index: 0,
            },
            SEED,
        );
        surface.show(SEED_BRIGHTNESS);
    }

    fn render<S: PixelSurface, D: DutyChannel>(
        &mut self,
        now: Instant,
        surface: &mut CombinedSurface<'_, S>,
        duty: &mut D,
    ) -> Progress {
        let p = progress(now.saturating_duration_since(self.started), self.duration);

        if p >= 1.0 {
            surface.fill(WHITE);
            surface.show(255);
            duty.write(255);
            return Progress::Finished;
        }

        if p < 0.5 {
            Self::draw_band(surface, p * 2.0);
            duty.write(0);
        } else {
            let stage = (p - 0.5) * 2.0;
            Self::draw_dawn(surface, stage);
            duty.write(round8(stage * 255.0));
        }
        Progress::Running
    }
}
