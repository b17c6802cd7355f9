//! Daily animation scheduler
//!
//! Holds up to [`MAX_ENTRIES`] daily triggers. An entry fires once while the
//! wall clock sits on its minute, starts its animation and, once the
//! configured duration has passed, runs its follow-up action exactly once.

use core::fmt;

use embassy_time::{Duration, Instant};
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::animation::AnimationKind;
use crate::clock::{TimeFrame, TimeOfDay, WallClock};
use crate::engine::AnimationEngine;
use crate::surface::{DutyChannel, PixelSurface};

/// Schedule capacity
pub const MAX_ENTRIES: usize = 8;

/// Default spacing between two schedule evaluations
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(1);

const FOLLOW_UP_ID_NONE: u8 = 0;
const FOLLOW_UP_ID_START_WAVES: u8 = 1;
const FOLLOW_UP_ID_STOP_ALL: u8 = 2;
const FOLLOW_UP_ID_TURN_OFF_ALL: u8 = 3;
const FOLLOW_UP_ID_SUNRISE_AT_FULL_PWM: u8 = 4;

/// Action run once a triggered animation's window has elapsed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum FollowUp {
    #[default]
    None = FOLLOW_UP_ID_NONE,
    /// Start the waves animation
    StartWaves = FOLLOW_UP_ID_START_WAVES,
    /// Stop whatever animation is running
    StopAll = FOLLOW_UP_ID_STOP_ALL,
    /// Stop, switch the PWM light off and clear both strips
    TurnOffAll = FOLLOW_UP_ID_TURN_OFF_ALL,
    /// Restart the sunrise and force the PWM light to full
    SunriseAtFullPwm = FOLLOW_UP_ID_SUNRISE_AT_FULL_PWM,
}

impl FollowUp {
    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            FOLLOW_UP_ID_NONE => Self::None,
            FOLLOW_UP_ID_START_WAVES => Self::StartWaves,
            FOLLOW_UP_ID_STOP_ALL => Self::StopAll,
            FOLLOW_UP_ID_TURN_OFF_ALL => Self::TurnOffAll,
            FOLLOW_UP_ID_SUNRISE_AT_FULL_PWM => Self::SunriseAtFullPwm,
            _ => return None,
        })
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::StartWaves => "waves",
            Self::StopAll => "stop",
            Self::TurnOffAll => "off",
            Self::SunriseAtFullPwm => "sunrise_full_pwm",
        }
    }

    fn perform<S: PixelSurface, D: DutyChannel>(
        self,
        now: Instant,
        engine: &mut AnimationEngine<S, D>,
    ) {
        #[cfg(feature = "esp32-log")]
        println!("[Scheduler.follow_up] {}", self.as_str());

        match self {
            Self::None => {}
            Self::StartWaves => {
                engine.start(AnimationKind::Waves, Duration::from_millis(0), now);
            }
            Self::StopAll => engine.stop(),
            Self::TurnOffAll => {
                engine.stop();
                engine.set_duty(0);
                engine.blackout();
            }
            Self::SunriseAtFullPwm => {
                // Literal sequence: the fresh sunrise primes the PWM to 0,
                // then the PWM is forced to full right away.
                engine.stop();
                engine.start(AnimationKind::Sunrise, Duration::from_millis(0), now);
                engine.set_duty(255);
            }
        }
    }
}

/// One daily trigger
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub hour: u8,
    pub minute: u8,
    pub frame: TimeFrame,
    pub animation: AnimationKind,
    pub duration: Duration,
    pub follow_up: FollowUp,
    fired_today: bool,
    end_at: Option<Instant>,
}

impl ScheduleEntry {
    pub const fn daily(
        hour: u8,
        minute: u8,
        frame: TimeFrame,
        animation: AnimationKind,
        duration: Duration,
        follow_up: FollowUp,
    ) -> Self {
        Self {
            hour,
            minute,
            frame,
            animation,
            duration,
            follow_up,
            fired_today: false,
            end_at: None,
        }
    }

    pub const fn is_utc(&self) -> bool {
        self.frame.is_utc()
    }

    /// Whether the entry already fired during the current trigger minute
    pub const fn fired_today(&self) -> bool {
        self.fired_today
    }

    /// When the pending follow-up is due, `None` once it has run
    pub const fn end_at(&self) -> Option<Instant> {
        self.end_at
    }

    fn matches(&self, clock: &WallClock) -> bool {
        let time = clock.in_frame(self.frame);
        time.hour == self.hour && time.minute == self.minute
    }

    fn snapshot(&self) -> EntrySnapshot {
        EntrySnapshot {
            hour: self.hour,
            minute: self.minute,
            frame: self.frame,
            animation: self.animation,
            duration: self.duration,
            follow_up: self.follow_up,
        }
    }
}

/// Read-only view of a schedule entry for status reporting
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntrySnapshot {
    pub hour: u8,
    pub minute: u8,
    pub frame: TimeFrame,
    pub animation: AnimationKind,
    pub duration: Duration,
    pub follow_up: FollowUp,
}

impl EntrySnapshot {
    pub const fn is_utc(&self) -> bool {
        self.frame.is_utc()
    }
}

impl fmt::Display for EntrySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = (self.duration.as_millis() + 30_000) / 60_000;
        write!(
            f,
            "{:02}:{:02} ({}) {} for {}m",
            self.hour,
            self.minute,
            self.frame.as_str(),
            self.animation,
            minutes
        )?;
        if self.follow_up != FollowUp::None {
            write!(f, " -> {}", self.follow_up.as_str())?;
        }
        Ok(())
    }
}

/// Configuration for the scheduler
#[derive(Debug, Clone, Copy)]
pub struct SchedulerConfig {
    /// Minimum monotonic time between two evaluations
    pub check_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            check_interval: DEFAULT_CHECK_INTERVAL,
        }
    }
}

/// Built-in daily schedule
pub const DEFAULT_SCHEDULE: [ScheduleEntry; 3] = [
    ScheduleEntry::daily(
        6,
        0,
        TimeFrame::Utc,
        AnimationKind::Sunrise,
        Duration::from_secs(60 * 60),
        FollowUp::StartWaves,
    ),
    ScheduleEntry::daily(
        20,
        10,
        TimeFrame::Utc,
        AnimationKind::Sunset,
        Duration::from_secs(60 * 60),
        FollowUp::TurnOffAll,
    ),
    ScheduleEntry::daily(
        10,
        0,
        TimeFrame::Utc,
        AnimationKind::Police,
        Duration::from_secs(30),
        FollowUp::SunriseAtFullPwm,
    ),
];

/// Fixed-capacity daily scheduler
#[derive(Debug, Clone)]
pub struct Scheduler {
    entries: Vec<ScheduleEntry, MAX_ENTRIES>,
    config: SchedulerConfig,
    last_check: Option<Instant>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

impl Scheduler {
    /// Create a scheduler pre-loaded with [`DEFAULT_SCHEDULE`]
    pub fn new(config: SchedulerConfig) -> Self {
        let mut scheduler = Self::empty(config);
        for entry in DEFAULT_SCHEDULE {
            let _ = scheduler.push(entry);
        }
        scheduler
    }

    /// Create a scheduler with no entries
    pub const fn empty(config: SchedulerConfig) -> Self {
        Self {
            entries: Vec::new(),
            config,
            last_check: None,
        }
    }

    /// Register a daily trigger
    ///
    /// When all slots are taken, or `hour`/`minute` is out of range, the
    /// schedule is left untouched and the entry is handed back.
    pub fn add_daily_entry(
        &mut self,
        hour: u8,
        minute: u8,
        frame: TimeFrame,
        animation: AnimationKind,
        duration: Duration,
        follow_up: FollowUp,
    ) -> Result<(), ScheduleEntry> {
        self.push(ScheduleEntry::daily(
            hour, minute, frame, animation, duration, follow_up,
        ))
    }

    /// Register a prepared entry, see [`Self::add_daily_entry`]
    pub fn push(&mut self, entry: ScheduleEntry) -> Result<(), ScheduleEntry> {
        if TimeOfDay::new(entry.hour, entry.minute).is_none() {
            #[cfg(feature = "esp32-log")]
            println!(
                "[Scheduler.push] invalid time {:02}:{:02}",
                entry.hour, entry.minute
            );
            return Err(entry);
        }
        self.entries.push(entry).inspect_err(|_rejected| {
            #[cfg(feature = "esp32-log")]
            println!(
                "[Scheduler.push] schedule full, dropping {:02}:{:02}",
                _rejected.hour, _rejected.minute
            );
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Ordered read-only listing of all entries
    pub fn snapshot(&self) -> impl Iterator<Item = EntrySnapshot> + '_ {
        self.entries.iter().map(ScheduleEntry::snapshot)
    }

    /// Evaluate the schedule
    ///
    /// Call every main-loop iteration; evaluation is rate limited to
    /// [`SchedulerConfig::check_interval`]. Without a wall clock no entry can
    /// trigger, but pending follow-ups still run.
    pub fn tick<S: PixelSurface, D: DutyChannel>(
        &mut self,
        now: Instant,
        clock: Option<WallClock>,
        engine: &mut AnimationEngine<S, D>,
    ) {
        if let Some(last) = self.last_check {
            if now.saturating_duration_since(last) < self.config.check_interval {
                return;
            }
        }
        self.last_check = Some(now);

        for entry in &mut self.entries {
            if let Some(clock) = &clock {
                if entry.matches(clock) {
                    if !entry.fired_today {
                        #[cfg(feature = "esp32-log")]
                        println!(
                            "[Scheduler.tick] {:02}:{:02} starts {}",
                            entry.hour,
                            entry.minute,
                            entry.animation.as_str()
                        );
                        engine.start(entry.animation, entry.duration, now);
                        let end_at = now.checked_add(entry.duration).unwrap_or(Instant::MAX);
                        entry.end_at = Some(end_at);
                        entry.fired_today = true;
                    }
                } else {
                    entry.fired_today = false;
                }
            }

            if let Some(end_at) = entry.end_at {
                if now >= end_at {
                    entry.end_at = None;
                    entry.follow_up.perform(now, engine);
                }
            }
        }
    }
}
