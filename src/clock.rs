//! Wall-clock time of day as seen by the scheduler.
//!
//! Acquiring the time (NTP, RTC, time zones) happens outside this crate;
//! the caller hands in the current hour and minute in both frames.

/// Hour and minute of the day
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    /// Returns `None` for an out-of-range hour or minute
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }
}

/// Reference frame of a trigger time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeFrame {
    Utc,
    Local,
}

impl TimeFrame {
    pub const fn is_utc(self) -> bool {
        matches!(self, Self::Utc)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Utc => "UTC",
            Self::Local => "local",
        }
    }
}

/// Current time of day in both reference frames
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallClock {
    pub utc: TimeOfDay,
    pub local: TimeOfDay,
}

impl WallClock {
    pub const fn new(utc: TimeOfDay, local: TimeOfDay) -> Self {
        Self { utc, local }
    }

    /// Clock where local time equals UTC
    pub const fn utc_only(time: TimeOfDay) -> Self {
        Self {
            utc: time,
            local: time,
        }
    }

    /// Time of day in `frame`
    pub const fn in_frame(&self, frame: TimeFrame) -> TimeOfDay {
        match frame {
            TimeFrame::Utc => self.utc,
            TimeFrame::Local => self.local,
        }
    }
}
