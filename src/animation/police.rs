//! Police double-flash strobe
//!
//! Driven purely by time since start on an 800 ms cycle: two red flashes,
//! two blue flashes, then a longer blackout. The PWM light is held off for
//! the whole run and restored when the animation is stopped.

use embassy_time::Instant;

use super::{Animation, Progress};
use crate::{
    color::Rgb,
    surface::{CombinedSurface, DutyChannel, PixelSurface},
};

/// Length of one full strobe cycle
pub(crate) const CYCLE_MS: u64 = 800;

const RED: Rgb = Rgb { r: 220, g: 0, b: 0 };
const BLUE: Rgb = Rgb { r: 0, g: 0, b: 220 };

/// Cycle segments as (end of segment in ms, color shown)
const SEGMENTS: [(u64, Option<Rgb>); 8] = [
    (100, Some(RED)),
    (170, None),
    (270, Some(RED)),
    (350, None),
    (450, Some(BLUE)),
    (520, None),
    (620, Some(BLUE)),
    (CYCLE_MS, None),
];

#[derive(Debug, Clone)]
pub struct PoliceAnimation {
    started: Instant,
    saved_duty: u8,
}

impl PoliceAnimation {
    pub const fn new(started: Instant) -> Self {
        Self {
            started,
            saved_duty: 0,
        }
    }

    /// Color shown at `phase` ms into the cycle, `None` while dark
    pub fn color_at(phase: u64) -> Option<Rgb> {
        let phase = phase % CYCLE_MS;
        SEGMENTS
            .iter()
            .find(|(end, _)| phase < *end)
            .and_then(|(_, color)| *color)
    }
}

impl Animation for PoliceAnimation {
    fn prime<S: PixelSurface, D: DutyChannel>(
        &mut self,
        surface: &mut CombinedSurface<'_, S>,
        duty: &mut D,
    ) {
        self.saved_duty = duty.read();
        duty.write(0);
        surface.clear();
        surface.commit();
    }

    fn render<S: PixelSurface, D: DutyChannel>(
        &mut self,
        now: Instant,
        surface: &mut CombinedSurface<'_, S>,
        duty: &mut D,
    ) -> Progress {
        let phase = now.saturating_duration_since(self.started).as_millis();

        duty.write(0);
        match Self::color_at(phase) {
            Some(color) => {
                surface.fill(color);
                surface.show(255);
            }
            None => {
                surface.clear();
                surface.commit();
            }
        }
        Progress::Running
    }

    fn stop<D: DutyChannel>(&mut self, duty: &mut D) {
        duty.write(self.saved_duty);
    }
}
