use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::animation::{AnimationKind, AnimationSlot, Progress};
use crate::strip_state::StripState;
use crate::surface::{CombinedSurface, DutyChannel, PixelSurface, StripId};

/// Brightness and power of a strip as read back from the hardware
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StripReadback {
    pub on: bool,
    pub brightness: u8,
}

/// Animation engine - owns the outputs and the running animation
///
/// Either strip may be absent; everything that would touch it is skipped.
pub struct AnimationEngine<S: PixelSurface, D: DutyChannel> {
    ws1: Option<S>,
    ws2: Option<S>,
    duty: D,
    current: Option<AnimationSlot>,
}

impl<S: PixelSurface, D: DutyChannel> AnimationEngine<S, D> {
    pub const fn new(ws1: Option<S>, ws2: Option<S>, duty: D) -> Self {
        Self {
            ws1,
            ws2,
            duty,
            current: None,
        }
    }

    fn split(&mut self) -> (CombinedSurface<'_, S>, &mut D) {
        (
            CombinedSurface::new(self.ws1.as_mut(), self.ws2.as_mut()),
            &mut self.duty,
        )
    }

    /// Replace the running animation with `kind`
    ///
    /// `duration` drives sunrise and sunset; the other animations run until
    /// stopped. Starting [`AnimationKind::None`] is the same as [`Self::stop`].
    pub fn start(&mut self, kind: AnimationKind, duration: Duration, now: Instant) {
        let Some(mut slot) = kind.to_slot(now, duration) else {
            self.stop();
            return;
        };

        #[cfg(feature = "esp32-log")]
        println!(
            "[AnimationEngine.start] {} for {}ms",
            kind.as_str(),
            duration.as_millis()
        );

        let (mut surface, duty) = self.split();
        slot.prime(&mut surface, duty);
        self.current = Some(slot);
    }

    /// Stop the running animation, if any
    pub fn stop(&mut self) {
        let Some(mut slot) = self.current.take() else {
            return;
        };

        #[cfg(feature = "esp32-log")]
        println!("[AnimationEngine.stop] {}", slot.kind().as_str());

        slot.stop(&mut self.duty);
    }

    pub fn current_animation(&self) -> AnimationKind {
        self.current
            .as_ref()
            .map_or(AnimationKind::None, AnimationSlot::kind)
    }

    pub fn is_animating(&self) -> bool {
        self.current.is_some()
    }

    /// Advance the running animation by one frame
    ///
    /// Returns `None` when nothing is running.
    pub fn render(&mut self, now: Instant) -> Option<Progress> {
        let mut slot = self.current.take()?;
        let (mut surface, duty) = self.split();
        let progress = slot.render(now, &mut surface, duty);

        if progress == Progress::Finished {
            #[cfg(feature = "esp32-log")]
            println!("[AnimationEngine.render] {} finished", slot.kind().as_str());
            return Some(progress);
        }
        self.current = Some(slot);
        Some(progress)
    }

    /// Push a solid-color descriptor to one strip
    pub fn apply_solid(&mut self, strip: StripId, state: StripState) {
        let Some(surface) = self.strip_mut(strip) else {
            return;
        };
        surface.set_brightness(state.output_brightness());
        surface.fill(state.color);
        surface.commit();
    }

    /// Clear and push both strips
    pub fn blackout(&mut self) {
        let (mut surface, _) = self.split();
        surface.clear();
        surface.commit();
    }

    pub fn set_duty(&mut self, duty: u8) {
        self.duty.write(duty);
    }

    pub fn duty(&self) -> u8 {
        self.duty.read()
    }

    /// Hardware view of a strip, `None` when the strip is absent
    pub fn readback(&self, strip: StripId) -> Option<StripReadback> {
        self.strip(strip).map(|surface| {
            let brightness = surface.brightness();
            StripReadback {
                on: brightness > 0,
                brightness,
            }
        })
    }

    pub fn strip(&self, strip: StripId) -> Option<&S> {
        match strip {
            StripId::Ws1 => self.ws1.as_ref(),
            StripId::Ws2 => self.ws2.as_ref(),
        }
    }

    fn strip_mut(&mut self, strip: StripId) -> Option<&mut S> {
        match strip {
            StripId::Ws1 => self.ws1.as_mut(),
            StripId::Ws2 => self.ws2.as_mut(),
        }
    }

    pub fn duty_channel(&self) -> &D {
        &self.duty
    }
}
