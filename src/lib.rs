#![no_std]

pub mod animation;
pub mod clock;
pub mod color;
pub mod control;
pub mod engine;
pub mod frame_loop;
pub mod math8;
pub mod scheduler;
pub mod strip_state;
pub mod surface;

pub use animation::{AnimationKind, Progress};
pub use clock::{TimeFrame, TimeOfDay, WallClock};
pub use control::{AnimationRequest, ChannelId, CommandError, LampControl};
pub use engine::{AnimationEngine, StripReadback};
pub use frame_loop::{FrameLoop, FrameResult, LampConfig, LampStatus};
pub use scheduler::{EntrySnapshot, FollowUp, MAX_ENTRIES, ScheduleEntry, Scheduler, SchedulerConfig};
pub use strip_state::{SharedStrip, StripState};
pub use surface::{CombinedSurface, DutyChannel, PixelRef, PixelSurface, StripBuffer, StripId};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// [`StripBuffer`] pushes its brightness-scaled frame through it.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}
