//! Channel pulse-width domain: range constants, clamping, percent mapping.

/// Shortest legal channel pulse width in microseconds (full deflection low).
pub const CHANNEL_MIN_US: u16 = 1000;

/// Longest legal channel pulse width in microseconds (full deflection high).
pub const CHANNEL_MAX_US: u16 = 2000;

/// Stick-center pulse width in microseconds.
pub const CHANNEL_NEUTRAL_US: u16 = 1500;

/// Clamp a pulse width into `[CHANNEL_MIN_US, CHANNEL_MAX_US]`.
#[inline]
#[must_use]
pub const fn clamp_pulse_us(us: u16) -> u16 {
    if us < CHANNEL_MIN_US {
        CHANNEL_MIN_US
    } else if us > CHANNEL_MAX_US {
        CHANNEL_MAX_US
    } else {
        us
    }
}

/// Map a percentage linearly onto the pulse-width range.
///
/// 0 maps to [`CHANNEL_MIN_US`], 50 to [`CHANNEL_NEUTRAL_US`], 100 to
/// [`CHANNEL_MAX_US`]. Inputs above 100 are clamped to 100.
#[inline]
#[must_use]
pub const fn percent_to_pulse_us(percent: u8) -> u16 {
    let percent = if percent > 100 { 100 } else { percent };
    let span = (CHANNEL_MAX_US - CHANNEL_MIN_US) as u32;
    CHANNEL_MIN_US + (percent as u32 * span / 100) as u16
}
