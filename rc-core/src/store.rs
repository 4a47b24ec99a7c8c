//! Shared channel store bridging the application and interrupt contexts.

use portable_atomic::{AtomicU16, Ordering};

use crate::channel::{clamp_pulse_us, percent_to_pulse_us, CHANNEL_NEUTRAL_US};

/// Number of channel slots in a [`ChannelStore`].
pub const MAX_CHANNELS: usize = 10;

/// Fixed array of channel pulse widths shared across execution contexts.
///
/// The store is the hand-off point between the application loop deciding
/// channel values and the consumers emitting them (a PPM tick in interrupt
/// context, a frame builder in a lower-priority task). Each slot is a single
/// 16-bit atomic: a reader preempting a writer mid-update sees either the
/// old or the new value, never a torn mix. Slots are independent, so
/// `Relaxed` ordering is sufficient.
///
/// All writes clamp into the legal pulse-width range, so readers never have
/// to re-validate what they load.
///
/// # Example
///
/// ```
/// use rc_core::{ChannelStore, CHANNEL_MAX_US};
///
/// static CHANNELS: ChannelStore = ChannelStore::new();
///
/// CHANNELS.set(3, 9999); // clamped
/// assert_eq!(CHANNELS.get(3), CHANNEL_MAX_US);
/// ```
pub struct ChannelStore {
    channels: [AtomicU16; MAX_CHANNELS],
}

impl ChannelStore {
    /// Create a store with every channel at [`CHANNEL_NEUTRAL_US`].
    ///
    /// `const`, so a store can live in a plain `static` shared between
    /// contexts without any init ceremony.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            channels: [const { AtomicU16::new(CHANNEL_NEUTRAL_US) }; MAX_CHANNELS],
        }
    }

    /// Set a channel to a pulse width in microseconds, clamped into
    /// `[CHANNEL_MIN_US, CHANNEL_MAX_US]`.
    ///
    /// `channel` must be below [`MAX_CHANNELS`]; out-of-range indices are
    /// debug-asserted and ignored in release builds.
    #[inline]
    pub fn set(&self, channel: usize, us: u16) {
        debug_assert!(channel < MAX_CHANNELS, "channel index out of range");
        if let Some(slot) = self.channels.get(channel) {
            slot.store(clamp_pulse_us(us), Ordering::Relaxed);
        }
    }

    /// Set a channel from a percentage (0-100, clamped) of its range.
    #[inline]
    pub fn set_percent(&self, channel: usize, percent: u8) {
        self.set(channel, percent_to_pulse_us(percent));
    }

    /// Read a channel's current pulse width.
    ///
    /// A single atomic load, safe to call from a context that preempts the
    /// writer. Out-of-range indices are debug-asserted and read as
    /// [`CHANNEL_NEUTRAL_US`] in release builds.
    #[inline]
    #[must_use]
    pub fn get(&self, channel: usize) -> u16 {
        debug_assert!(channel < MAX_CHANNELS, "channel index out of range");
        match self.channels.get(channel) {
            Some(slot) => slot.load(Ordering::Relaxed),
            None => CHANNEL_NEUTRAL_US,
        }
    }

    /// Copy all channels out with one atomic load per slot.
    ///
    /// Each element is tear-free on its own; the array as a whole is not a
    /// single atomic snapshot, which is fine for consumers that treat
    /// channels independently.
    #[must_use]
    pub fn snapshot(&self) -> [u16; MAX_CHANNELS] {
        let mut out = [CHANNEL_NEUTRAL_US; MAX_CHANNELS];
        for (value, slot) in out.iter_mut().zip(self.channels.iter()) {
            *value = slot.load(Ordering::Relaxed);
        }
        out
    }
}

impl Default for ChannelStore {
    fn default() -> Self {
        Self::new()
    }
}
