//! IBUS channel-frame building.
//!
//! [`FrameBuilder`] assembles frames into an owned, reused buffer while
//! accumulating the checksum incrementally, so a frame costs no allocation
//! and no second pass over the bytes.
//!
//! # Example
//!
//! ```
//! use ibus_proto::FrameBuilder;
//!
//! let mut builder = FrameBuilder::new(10);
//! loop {
//!     builder.begin();
//!     builder.write_channels(&[1500; 10]);
//!     builder.end();
//!     // hand builder.frame() to the transport
//!     # break;
//! }
//! ```

use crate::checksum::Checksum;

/// Command byte identifying a channel-data frame.
pub const CHANNEL_COMMAND: u8 = 0x40;

/// Size of the internal frame buffer in bytes.
pub const BUFFER_SIZE: usize = 128;

/// Frame bytes that are not channel data: length, command, checksum.
pub const FRAME_OVERHEAD: usize = 4;

/// Most channels a frame can carry: `(BUFFER_SIZE - FRAME_OVERHEAD) / 2`.
pub const MAX_CHANNELS: usize = (BUFFER_SIZE - FRAME_OVERHEAD) / 2;

/// Builder for IBUS channel frames.
///
/// A builder is created once for a fixed channel count and reused for every
/// frame: each [`begin`](Self::begin) resets the write position and checksum
/// and overwrites the previous frame in place.
///
/// The `begin` / `write_channel` x N / `end` cycle is a caller contract:
/// [`write_channel`](Self::write_channel) must be called exactly
/// `channel_count` times between `begin` and `end`. Violations are
/// debug-asserted and rendered harmless in release builds, but the resulting
/// frame is garbage a receiver will reject by checksum.
///
/// Taking `&mut self` throughout means the type system already serializes
/// access; the builder needs no internal locking.
pub struct FrameBuilder {
    buf: [u8; BUFFER_SIZE],
    pos: usize,
    checksum: Checksum,
    channel_count: usize,
    frame_len: usize,
}

impl FrameBuilder {
    /// Create a builder for frames carrying `channel_count` channels.
    ///
    /// `channel_count` must be in `1..=MAX_CHANNELS`; out-of-range counts
    /// are debug-asserted and clamped.
    #[must_use]
    pub fn new(channel_count: usize) -> Self {
        debug_assert!(
            (1..=MAX_CHANNELS).contains(&channel_count),
            "channel count out of range"
        );
        Self {
            buf: [0; BUFFER_SIZE],
            pos: 0,
            checksum: Checksum::new(),
            channel_count: channel_count.clamp(1, MAX_CHANNELS),
            frame_len: 0,
        }
    }

    /// Start a new frame.
    ///
    /// Resets the checksum and write position, then writes the length and
    /// command header bytes through the checksummed path. Any previously
    /// built frame is discarded.
    pub fn begin(&mut self) {
        self.pos = 0;
        self.frame_len = 0;
        self.checksum = Checksum::new();
        let len = (FRAME_OVERHEAD + 2 * self.channel_count) as u8;
        self.push(len);
        self.push(CHANNEL_COMMAND);
    }

    /// Append one channel value as two little-endian bytes.
    ///
    /// Values are written as given; range policy belongs to the producer.
    /// Calls beyond the declared channel count are debug-asserted and
    /// dropped.
    #[inline]
    pub fn write_channel(&mut self, us: u16) {
        debug_assert!(self.pos >= 2, "write_channel before begin");
        let payload_end = 2 + 2 * self.channel_count;
        debug_assert!(
            self.pos + 2 <= payload_end,
            "more channels than declared"
        );
        if self.pos + 2 > payload_end {
            return;
        }
        let [lo, hi] = us.to_le_bytes();
        self.push(lo);
        self.push(hi);
    }

    /// Append channel values from a slice.
    #[inline]
    pub fn write_channels(&mut self, channels: &[u16]) {
        for &us in channels {
            self.write_channel(us);
        }
    }

    /// Finish the frame.
    ///
    /// Appends the checksum little-endian (the checksum bytes are not
    /// themselves checksummed) and records the frame length. After `end`,
    /// [`frame`](Self::frame) returns the complete transmittable packet.
    pub fn end(&mut self) {
        let [lo, hi] = self.checksum.value().to_le_bytes();
        self.push_raw(lo);
        self.push_raw(hi);
        self.frame_len = self.pos;
    }

    /// The last completely built frame; empty before the first
    /// [`end`](Self::end) and during a build.
    #[inline]
    #[must_use]
    pub fn frame(&self) -> &[u8] {
        &self.buf[..self.frame_len]
    }

    /// Length in bytes of the last built frame (0 before the first `end`).
    #[inline]
    #[must_use]
    pub const fn frame_len(&self) -> usize {
        self.frame_len
    }

    /// Number of channels this builder frames.
    #[inline]
    #[must_use]
    pub const fn channel_count(&self) -> usize {
        self.channel_count
    }

    /// Send the built frame to an `embedded_io::Write` sink.
    ///
    /// # Errors
    ///
    /// Propagates the sink's error type.
    #[cfg(feature = "embedded-io")]
    pub fn write_to<W: embedded_io::Write>(&self, writer: &mut W) -> Result<(), W::Error> {
        writer.write_all(self.frame())
    }

    /// Copy the built frame into a `heapless::Vec`.
    ///
    /// Returns `None` if `N` is smaller than the frame.
    #[cfg(feature = "heapless")]
    #[must_use]
    pub fn frame_to_vec<const N: usize>(&self) -> Option<heapless::Vec<u8, N>> {
        heapless::Vec::from_slice(self.frame()).ok()
    }

    /// Write one byte and fold it into the running checksum.
    #[inline]
    fn push(&mut self, byte: u8) {
        self.checksum.update(byte);
        self.push_raw(byte);
    }

    /// Write one byte without touching the checksum.
    #[inline]
    fn push_raw(&mut self, byte: u8) {
        debug_assert!(self.pos < BUFFER_SIZE, "frame buffer overflow");
        if let Some(slot) = self.buf.get_mut(self.pos) {
            *slot = byte;
            self.pos += 1;
        }
    }
}
