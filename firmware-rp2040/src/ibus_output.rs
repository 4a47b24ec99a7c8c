//! IBUS frame streaming over UART.
//!
//! Snapshots the shared [`ChannelStore`] into an IBUS channel frame and
//! DMA-writes it to a UART transmitter. The frame buffer lives inside the
//! [`FrameBuilder`] and is reused for every frame.

use embassy_rp::uart::{Async, Error as UartError, UartTx};
use embassy_time::Duration;
use ibus_proto::FrameBuilder;
use rc_core::ChannelStore;

/// FlySky receivers emit one channel frame every 7 ms.
pub const IBUS_FRAME_PERIOD: Duration = Duration::from_millis(7);

/// IBUS serial rate (8N1).
pub const IBUS_BAUD: u32 = 115_200;

/// Streams IBUS channel frames from a [`ChannelStore`] to a UART.
pub struct IbusStreamer<'d> {
    tx: UartTx<'d, Async>,
    builder: FrameBuilder,
    store: &'d ChannelStore,
    channel_count: usize,
}

impl<'d> IbusStreamer<'d> {
    /// Create a streamer sending `channel_count` channels per frame.
    ///
    /// `channel_count` is clamped to the store's capacity.
    ///
    /// # Arguments
    /// * `tx` - UART transmitter configured for [`IBUS_BAUD`], 8N1
    /// * `store` - shared channel values to snapshot each frame
    #[must_use]
    pub fn new(tx: UartTx<'d, Async>, store: &'d ChannelStore, channel_count: usize) -> Self {
        let channel_count = channel_count.clamp(1, rc_core::MAX_CHANNELS);
        Self {
            tx,
            builder: FrameBuilder::new(channel_count),
            store,
            channel_count,
        }
    }

    /// Snapshot the store, build one frame, and transmit it.
    ///
    /// Each channel value is read atomically, so a concurrent write never
    /// tears a value; a write landing mid-snapshot simply makes this frame
    /// mix old and new channels, which the next frame corrects.
    pub async fn send_frame(&mut self) -> Result<(), UartError> {
        let snapshot = self.store.snapshot();
        self.builder.begin();
        self.builder.write_channels(&snapshot[..self.channel_count]);
        self.builder.end();
        self.tx.write(self.builder.frame()).await
    }

    /// Channels per frame.
    #[inline]
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channel_count
    }
}
