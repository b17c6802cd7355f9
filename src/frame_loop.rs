//! Main-loop driver and frame pacing.
//!
//! One [`FrameLoop::tick`] is one main-loop iteration: drain animation
//! requests, apply the dim channel, evaluate the schedule, render the
//! running animation and, when nothing animates, push dirty solid colors.
//! The caller is responsible for sleeping between frames.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::animation::{AnimationKind, Progress};
use crate::clock::WallClock;
use crate::control::{AnimationRequest, ChannelId, LampControl};
use crate::engine::{AnimationEngine, StripReadback};
use crate::scheduler::{Scheduler, SchedulerConfig};
use crate::surface::{DutyChannel, PixelSurface, StripId};

/// Default target frame rate (60 FPS).
pub const DEFAULT_FPS: u32 = 60;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Configuration for the frame loop
#[derive(Debug, Clone, Copy)]
pub struct LampConfig {
    /// Target time between two frames
    pub frame_duration: Duration,
    /// Scheduler evaluation settings
    pub scheduler: SchedulerConfig,
    /// Install the built-in daily schedule
    pub default_schedule: bool,
}

impl Default for LampConfig {
    fn default() -> Self {
        Self {
            frame_duration: DEFAULT_FRAME_DURATION,
            scheduler: SchedulerConfig::default(),
            default_schedule: true,
        }
    }
}

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Hardware-level status for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LampStatus {
    pub animation: AnimationKind,
    pub dim_duty: u8,
    pub ws1: Option<StripReadback>,
    pub ws2: Option<StripReadback>,
}

/// Main-loop owner of the engine and the scheduler
pub struct FrameLoop<'a, S: PixelSurface, D: DutyChannel, const QUEUE: usize> {
    engine: AnimationEngine<S, D>,
    scheduler: Scheduler,
    control: &'a LampControl<QUEUE>,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<'a, S: PixelSurface, D: DutyChannel, const QUEUE: usize> FrameLoop<'a, S, D, QUEUE> {
    pub fn new(
        engine: AnimationEngine<S, D>,
        control: &'a LampControl<QUEUE>,
        config: &LampConfig,
    ) -> Self {
        let scheduler = if config.default_schedule {
            Scheduler::new(config.scheduler)
        } else {
            Scheduler::empty(config.scheduler)
        };
        Self {
            engine,
            scheduler,
            control,
            next_frame: Instant::from_millis(0),
            frame_duration: config.frame_duration,
        }
    }

    /// Run one iteration and return timing information.
    ///
    /// If we have fallen more than two frames behind, the backlog is
    /// dropped instead of rendered in a burst.
    pub fn tick(&mut self, now: Instant, clock: Option<WallClock>) -> FrameResult {
        let max_drift = self.frame_duration.as_millis() * 2;
        if now.as_millis() > self.next_frame.as_millis() + max_drift {
            self.next_frame = now;
        }

        self.step(now, clock);

        self.next_frame += self.frame_duration;
        let sleep_duration = if self.next_frame > now {
            self.next_frame.saturating_duration_since(now)
        } else {
            Duration::from_millis(0)
        };

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    /// Run one iteration without frame pacing
    pub fn step(&mut self, now: Instant, clock: Option<WallClock>) {
        self.process_requests(now);

        if let Some(dim) = self.control.channel(ChannelId::Dim).take_dirty() {
            self.engine.set_duty(dim.output_brightness());
        }

        self.scheduler.tick(now, clock, &mut self.engine);

        if self.engine.render(now) == Some(Progress::Yielded) {
            self.control.channel(ChannelId::Ws1).mark_dirty();
            self.control.channel(ChannelId::Ws2).mark_dirty();
        }
        self.control.publish_current(self.engine.current_animation());

        if !self.engine.is_animating() {
            self.push_solid_colors();
        }
    }

    fn process_requests(&mut self, now: Instant) {
        while let Some(request) = self.control.next_request() {
            #[cfg(feature = "esp32-log")]
            println!("[FrameLoop.process_requests] {:?}", request);

            match request {
                AnimationRequest::Start { kind, duration } => {
                    self.engine.start(kind, duration, now);
                }
                AnimationRequest::Stop => self.engine.stop(),
            }
        }
    }

    fn push_solid_colors(&mut self) {
        for (channel, strip) in [(ChannelId::Ws1, StripId::Ws1), (ChannelId::Ws2, StripId::Ws2)] {
            if self.engine.strip(strip).is_none() {
                continue;
            }
            if let Some(state) = self.control.channel(channel).take_dirty() {
                self.engine.apply_solid(strip, state);
            }
        }
    }

    /// Current animation plus what the hardware actually shows
    pub fn status(&self) -> LampStatus {
        LampStatus {
            animation: self.engine.current_animation(),
            dim_duty: self.engine.duty(),
            ws1: self.engine.readback(StripId::Ws1),
            ws2: self.engine.readback(StripId::Ws2),
        }
    }

    pub fn engine(&self) -> &AnimationEngine<S, D> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut AnimationEngine<S, D> {
        &mut self.engine
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }
}
