//! PPM output configuration.

use embedded_hal::digital::PinState;

use crate::{DEFAULT_CHANNELS, DEFAULT_FRAME_US, DEFAULT_TICK_US};

/// Logic level of the active pulse.
///
/// `Normal` pulses high and idles low; `Inverted` mirrors every level, for
/// open-collector trainer ports and inverting line drivers.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    #[default]
    Normal,
    Inverted,
}

impl Polarity {
    /// Pin state during the active pulse.
    #[inline]
    #[must_use]
    pub const fn active(self) -> PinState {
        match self {
            Self::Normal => PinState::High,
            Self::Inverted => PinState::Low,
        }
    }

    /// Pin state between pulses and while disabled.
    #[inline]
    #[must_use]
    pub const fn idle(self) -> PinState {
        match self {
            Self::Normal => PinState::Low,
            Self::Inverted => PinState::High,
        }
    }
}

/// PPM generator configuration.
///
/// `Default` gives the classic trainer-port signal: 8 channels, normal
/// polarity, 10 us tick, 22.5 ms frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PpmConfig {
    /// Channels per frame, clamped to `1..=MAX_CHANNELS` when applied.
    pub channel_count: usize,
    /// Logic level of the active pulse.
    pub polarity: Polarity,
    /// Period of the driving timer tick in microseconds (minimum 1).
    pub tick_us: u32,
    /// Frame length in microseconds.
    pub frame_us: u32,
}

impl Default for PpmConfig {
    fn default() -> Self {
        Self {
            channel_count: DEFAULT_CHANNELS,
            polarity: Polarity::Normal,
            tick_us: DEFAULT_TICK_US,
            frame_us: DEFAULT_FRAME_US,
        }
    }
}
