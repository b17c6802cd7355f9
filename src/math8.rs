//! Small numeric helpers shared by the animations.
//!
//! Integer helpers follow the 8-bit `FastLED` conventions. Float helpers
//! convert animation math back into channel values without ever leaving
//! the `0..=255` range.

use embassy_time::Duration;

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Ratio of `elapsed` to `duration`, clamped to `0.0..=1.0`
///
/// A zero duration counts as one millisecond, so it completes immediately.
#[allow(clippy::cast_precision_loss)]
pub fn progress(elapsed: Duration, duration: Duration) -> f32 {
    let total = duration.as_millis().max(1);
    let ratio = elapsed.as_millis() as f32 / total as f32;
    ratio.clamp(0.0, 1.0)
}

/// Truncate a float into a channel value
///
/// Negative values and NaN map to 0, anything above 255 maps to 255.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn clamp8(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0) as u8
}

/// Round a float to the nearest channel value
#[inline]
pub fn round8(value: f32) -> u8 {
    clamp8(value + 0.5)
}

/// Cosine ease, 0.0 at `t = 0` and 1.0 at `t = 1`
#[inline]
pub fn ease_cos(t: f32) -> f32 {
    0.5 - 0.5 * libm::cosf(t.clamp(0.0, 1.0) * core::f32::consts::PI)
}

/// Move `current` towards `target` by the fraction `amount`
///
/// The result always lies between the two inputs.
#[inline]
pub fn approach8(current: u8, target: u8, amount: f32) -> u8 {
    let current_f = f32::from(current);
    let delta = f32::from(target) - current_f;
    round8(current_f + delta * amount.clamp(0.0, 1.0))
}
