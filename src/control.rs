//! Command surface shared with the request-handling context
//!
//! Solid-color changes go straight into the per-channel descriptors and
//! their dirty flags. Animation start/stop requests are queued in a small
//! bounded deque guarded by a critical section and drained by the frame
//! loop at the start of the next frame.

use core::cell::RefCell;
use core::sync::atomic::{AtomicU8, Ordering};

use critical_section::Mutex;
use embassy_time::Duration;
use heapless::Deque;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::animation::AnimationKind;
use crate::color::Rgb;
use crate::strip_state::{SharedStrip, StripState};

/// Default depth of the animation request queue
pub const DEFAULT_REQUEST_QUEUE: usize = 4;

/// Light channels addressable by commands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelId {
    /// PWM-dimmed plain strip
    Dim,
    Ws1,
    Ws2,
}

/// Animation change requested from outside the render loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationRequest {
    Start {
        kind: AnimationKind,
        duration: Duration,
    },
    Stop,
}

/// Error returned by the command surface
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandError {
    /// The animation name is not known
    UnknownAnimation,
    /// The request queue is full; the request was dropped
    QueueFull,
}

/// Shared state between the command handler and the render loop
pub struct LampControl<const QUEUE: usize = DEFAULT_REQUEST_QUEUE> {
    dim: SharedStrip,
    ws1: SharedStrip,
    ws2: SharedStrip,
    requests: Mutex<RefCell<Deque<AnimationRequest, QUEUE>>>,
    current: AtomicU8,
}

impl<const QUEUE: usize> Default for LampControl<QUEUE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const QUEUE: usize> LampControl<QUEUE> {
    /// Power-up descriptors, every channel marked for its first push
    pub const fn new() -> Self {
        Self::with_states(
            StripState::DIM_DEFAULT,
            StripState::STRIP_DEFAULT,
            StripState::STRIP_DEFAULT,
        )
    }

    pub const fn with_states(dim: StripState, ws1: StripState, ws2: StripState) -> Self {
        Self {
            dim: SharedStrip::new_dirty(dim),
            ws1: SharedStrip::new_dirty(ws1),
            ws2: SharedStrip::new_dirty(ws2),
            requests: Mutex::new(RefCell::new(Deque::new())),
            current: AtomicU8::new(AnimationKind::None.as_raw()),
        }
    }

    pub const fn channel(&self, id: ChannelId) -> &SharedStrip {
        match id {
            ChannelId::Dim => &self.dim,
            ChannelId::Ws1 => &self.ws1,
            ChannelId::Ws2 => &self.ws2,
        }
    }

    fn channels(&self) -> [&SharedStrip; 3] {
        [&self.dim, &self.ws1, &self.ws2]
    }

    pub fn turn_on(&self, id: ChannelId) {
        self.channel(id).turn_on();
    }

    pub fn turn_off(&self, id: ChannelId) {
        self.channel(id).turn_off();
    }

    pub fn set_brightness(&self, id: ChannelId, brightness: u8) {
        self.channel(id).set_brightness(brightness);
    }

    pub fn set_color(&self, id: ChannelId, color: Rgb) {
        self.channel(id).set_color(color);
    }

    /// Set brightness and color together, flagging the channel once
    pub fn set_solid(&self, id: ChannelId, brightness: u8, color: Rgb) {
        self.channel(id).update(|state| {
            state.brightness = brightness;
            state.color = color;
        });
    }

    pub fn on_all(&self) {
        for channel in self.channels() {
            channel.turn_on();
        }
    }

    pub fn off_all(&self) {
        for channel in self.channels() {
            channel.turn_off();
        }
    }

    fn enqueue(&self, request: AnimationRequest) -> Result<(), CommandError> {
        critical_section::with(|cs| {
            self.requests
                .borrow(cs)
                .borrow_mut()
                .push_back(request)
                .map_err(|_dropped| {
                    #[cfg(feature = "esp32-log")]
                    println!("[LampControl.enqueue] queue full, dropping {:?}", _dropped);
                    CommandError::QueueFull
                })
        })
    }

    /// Request an animation start
    ///
    /// Without a duration the animation's default applies.
    pub fn start_animation(
        &self,
        kind: AnimationKind,
        duration: Option<Duration>,
    ) -> Result<(), CommandError> {
        if kind == AnimationKind::None {
            return self.stop_animation();
        }
        self.enqueue(AnimationRequest::Start {
            kind,
            duration: duration.unwrap_or(kind.default_duration()),
        })
    }

    /// Request an animation start by name (case-insensitive)
    pub fn start_animation_by_name(
        &self,
        name: &str,
        duration: Option<Duration>,
    ) -> Result<AnimationKind, CommandError> {
        let kind = AnimationKind::parse_from_str(name).ok_or(CommandError::UnknownAnimation)?;
        self.start_animation(kind, duration)?;
        Ok(kind)
    }

    pub fn stop_animation(&self) -> Result<(), CommandError> {
        self.enqueue(AnimationRequest::Stop)
    }

    /// Animation running as of the last rendered frame
    pub fn current_animation(&self) -> AnimationKind {
        AnimationKind::from_raw(self.current.load(Ordering::Acquire)).unwrap_or_default()
    }

    pub(crate) fn publish_current(&self, kind: AnimationKind) {
        self.current.store(kind.as_raw(), Ordering::Release);
    }

    pub(crate) fn next_request(&self) -> Option<AnimationRequest> {
        critical_section::with(|cs| self.requests.borrow(cs).borrow_mut().pop_front())
    }
}
