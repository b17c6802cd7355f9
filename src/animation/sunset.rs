//! Two-stage sunset, the mirror image of the sunrise
//!
//! The combined array is walked back to front so the light drains in the
//! opposite direction to the sunrise fill.
//!
//! - Stage 1: white -> red on every pixel, PWM light fades out.
//! - Stage 2: the red band shrinks and darkens, strip brightness follows.

use embassy_time::{Duration, Instant};

use super::{Animation, Progress};
use crate::{
    color::{BLACK, Rgb, WHITE},
    math8::{clamp8, progress},
    surface::{CombinedSurface, DutyChannel, PixelSurface},
};

#[derive(Debug, Clone)]
pub struct SunsetAnimation {
    started: Instant,
    duration: Duration,
}

impl SunsetAnimation {
    pub const fn new(started: Instant, duration: Duration) -> Self {
        Self { started, duration }
    }

    fn draw_dusk<S: PixelSurface>(surface: &mut CombinedSurface<'_, S>, stage: f32) {
        let color = Rgb {
            r: clamp8(255.0 - stage * 50.0),
            g: clamp8(255.0 - stage * 255.0),
            b: clamp8(255.0 - stage * 255.0),
        };
        let total = surface.len();
        for ci in 0..total {
            surface.set(total - 1 - ci, color);
        }
        surface.show(255);
    }

    fn draw_band<S: PixelSurface>(surface: &mut CombinedSurface<'_, S>, stage: f32) {
        let total = surface.len();
        let level = clamp8(255.0 - stage * 255.0);
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let lit = (libm::ceilf((1.0 - stage) * total as f32).max(0.0) as usize).min(total);
        let red = Rgb {
            r: level,
            g: 0,
            b: 0,
        };

        for ci in 0..total {
            surface.set(total - 1 - ci, if ci < lit { red } else { BLACK });
        }
        surface.show(level);
    }
}

impl Animation for SunsetAnimation {
    fn prime<S: PixelSurface, D: DutyChannel>(
        &mut self,
        surface: &mut CombinedSurface<'_, S>,
        duty: &mut D,
    ) {
        surface.fill(WHITE);
        surface.show(255);
        duty.write(255);
    }

    fn render<S: PixelSurface, D: DutyChannel>(
        &mut self,
        now: Instant,
        surface: &mut CombinedSurface<'_, S>,
        duty: &mut D,
    ) -> Progress {
        let p = progress(now.saturating_duration_since(self.started), self.duration);

        if p >= 1.0 {
            // Brightness is left where stage 2 put it
            surface.clear();
            surface.commit();
            duty.write(0);
            return Progress::Finished;
        }

        if p < 0.5 {
            let stage = p * 2.0;
            Self::draw_dusk(surface, stage);
            duty.write(clamp8(255.0 - stage * 255.0));
        } else {
            Self::draw_band(surface, (p - 0.5) * 2.0);
            duty.write(0);
        }
        Progress::Running
    }
}
