//! Animation system with compile-time known variants
//!
//! Each running animation is stored in [`AnimationSlot`], a tagged union
//! that carries only the state its variant needs. Adding an animation is a
//! code change: a new file, a new [`AnimationKind`] and a new slot arm.

mod christmas;
mod police;
mod sunrise;
mod sunset;
mod waves;

use embassy_time::{Duration, Instant};

pub use christmas::{Cadence, ChristmasAnimation};
pub use police::PoliceAnimation;
pub use sunrise::SunriseAnimation;
pub use sunset::SunsetAnimation;
pub use waves::WavesAnimation;

use crate::surface::{CombinedSurface, DutyChannel, PixelSurface};

const ANIMATION_NAME_NONE: &str = "None";
const ANIMATION_NAME_SUNRISE: &str = "Sunrise";
const ANIMATION_NAME_SUNSET: &str = "Sunset";
const ANIMATION_NAME_WAVES: &str = "Waves";
const ANIMATION_NAME_POLICE: &str = "Police";
const ANIMATION_NAME_CHRISTMAS: &str = "Christmas";

const ANIMATION_ID_NONE: u8 = 0;
const ANIMATION_ID_SUNRISE: u8 = 1;
const ANIMATION_ID_SUNSET: u8 = 2;
const ANIMATION_ID_WAVES: u8 = 3;
const ANIMATION_ID_POLICE: u8 = 4;
const ANIMATION_ID_CHRISTMAS: u8 = 5;

/// Duration used for sunrise/sunset when a command does not give one
pub const DEFAULT_TWILIGHT_DURATION: Duration = Duration::from_secs(20 * 60);

/// Duration used for every other animation when a command does not give one
pub const DEFAULT_DURATION: Duration = Duration::from_secs(30);

/// Outcome of rendering one frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// The animation drew a frame and keeps running
    Running,
    /// The animation drew its final frame and must be dropped
    Finished,
    /// The animation skipped this frame in favour of the solid-color path
    Yielded,
}

pub(crate) trait Animation {
    /// Prepare the hardware when the animation starts
    fn prime<S: PixelSurface, D: DutyChannel>(
        &mut self,
        _surface: &mut CombinedSurface<'_, S>,
        _duty: &mut D,
    ) {
    }

    /// Render a single frame
    fn render<S: PixelSurface, D: DutyChannel>(
        &mut self,
        now: Instant,
        surface: &mut CombinedSurface<'_, S>,
        duty: &mut D,
    ) -> Progress;

    /// Undo side effects when the animation is stopped externally
    fn stop<D: DutyChannel>(&mut self, _duty: &mut D) {}
}

/// Known animations that can be requested
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum AnimationKind {
    #[default]
    None = ANIMATION_ID_NONE,
    Sunrise = ANIMATION_ID_SUNRISE,
    Sunset = ANIMATION_ID_SUNSET,
    Waves = ANIMATION_ID_WAVES,
    Police = ANIMATION_ID_POLICE,
    Christmas = ANIMATION_ID_CHRISTMAS,
}

impl AnimationKind {
    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            ANIMATION_ID_NONE => Self::None,
            ANIMATION_ID_SUNRISE => Self::Sunrise,
            ANIMATION_ID_SUNSET => Self::Sunset,
            ANIMATION_ID_WAVES => Self::Waves,
            ANIMATION_ID_POLICE => Self::Police,
            ANIMATION_ID_CHRISTMAS => Self::Christmas,
            _ => return None,
        })
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => ANIMATION_NAME_NONE,
            Self::Sunrise => ANIMATION_NAME_SUNRISE,
            Self::Sunset => ANIMATION_NAME_SUNSET,
            Self::Waves => ANIMATION_NAME_WAVES,
            Self::Police => ANIMATION_NAME_POLICE,
            Self::Christmas => ANIMATION_NAME_CHRISTMAS,
        }
    }

    /// Parse an animation name, ignoring ASCII case
    pub fn parse_from_str(s: &str) -> Option<Self> {
        [
            Self::None,
            Self::Sunrise,
            Self::Sunset,
            Self::Waves,
            Self::Police,
            Self::Christmas,
        ]
        .into_iter()
        .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
    }

    /// Duration applied when a start request carries none
    pub const fn default_duration(self) -> Duration {
        match self {
            Self::Sunrise | Self::Sunset => DEFAULT_TWILIGHT_DURATION,
            _ => DEFAULT_DURATION,
        }
    }

    /// Build the running state for this animation
    ///
    /// Returns `None` for [`AnimationKind::None`].
    pub(crate) fn to_slot(self, now: Instant, duration: Duration) -> Option<AnimationSlot> {
        Some(match self {
            Self::None => return None,
            Self::Sunrise => AnimationSlot::Sunrise(SunriseAnimation::new(now, duration)),
            Self::Sunset => AnimationSlot::Sunset(SunsetAnimation::new(now, duration)),
            Self::Waves => AnimationSlot::Waves(WavesAnimation::new()),
            Self::Police => AnimationSlot::Police(PoliceAnimation::new(now)),
            Self::Christmas => AnimationSlot::Christmas(ChristmasAnimation::new(now)),
        })
    }
}

impl core::fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Animation slot - enum containing every running animation state
#[derive(Debug, Clone)]
pub(crate) enum AnimationSlot {
    Sunrise(SunriseAnimation),
    Sunset(SunsetAnimation),
    Waves(WavesAnimation),
    Police(PoliceAnimation),
    Christmas(ChristmasAnimation),
}

impl AnimationSlot {
    pub(crate) fn kind(&self) -> AnimationKind {
        match self {
            Self::Sunrise(_) => AnimationKind::Sunrise,
            Self::Sunset(_) => AnimationKind::Sunset,
            Self::Waves(_) => AnimationKind::Waves,
            Self::Police(_) => AnimationKind::Police,
            Self::Christmas(_) => AnimationKind::Christmas,
        }
    }

    pub(crate) fn prime<S: PixelSurface, D: DutyChannel>(
        &mut self,
        surface: &mut CombinedSurface<'_, S>,
        duty: &mut D,
    ) {
        match self {
            Self::Sunrise(animation) => animation.prime(surface, duty),
            Self::Sunset(animation) => animation.prime(surface, duty),
            Self::Waves(animation) => animation.prime(surface, duty),
            Self::Police(animation) => animation.prime(surface, duty),
            Self::Christmas(animation) => animation.prime(surface, duty),
        }
    }

    pub(crate) fn render<S: PixelSurface, D: DutyChannel>(
        &mut self,
        now: Instant,
        surface: &mut CombinedSurface<'_, S>,
        duty: &mut D,
    ) -> Progress {
        match self {
            Self::Sunrise(animation) => animation.render(now, surface, duty),
            Self::Sunset(animation) => animation.render(now, surface, duty),
            Self::Waves(animation) => animation.render(now, surface, duty),
            Self::Police(animation) => animation.render(now, surface, duty),
            Self::Christmas(animation) => animation.render(now, surface, duty),
        }
    }

    pub(crate) fn stop<D: DutyChannel>(&mut self, duty: &mut D) {
        match self {
            Self::Sunrise(animation) => Animation::stop(animation, duty),
            Self::Sunset(animation) => Animation::stop(animation, duty),
            Self::Waves(animation) => Animation::stop(animation, duty),
            Self::Police(animation) => Animation::stop(animation, duty),
            Self::Christmas(animation) => Animation::stop(animation, duty),
        }
    }
}
