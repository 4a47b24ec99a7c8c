//! IBUS channel-frame building and checksum.
//!
//! This crate builds the transmitter side of the FlySky IBUS serial
//! protocol: fixed-layout binary frames carrying up to 62 channel values,
//! ready to hand to any byte transport.
//!
//! - **Framing**: [`FrameBuilder`] - begin/write/end cycle over a reused
//!   internal buffer
//! - **Checksum**: [`Checksum`] / [`calculate_checksum()`] - the additive
//!   complement IBUS uses in place of a CRC
//!
//! # Frame Format
//!
//! ```text
//! [len][0x40][ch1_lo][ch1_hi]...[chN_lo][chN_hi][cksum_lo][cksum_hi]
//! ```
//!
//! - `len` - total frame length in bytes, `4 + 2 * N`
//! - `0x40` - channel-data command byte
//! - `chX` - channel pulse width in microseconds, little-endian u16
//! - `cksum` - `0xFFFF` minus the wrapping sum of all preceding bytes,
//!   little-endian
//!
//! # Example
//!
//! ```
//! use ibus_proto::FrameBuilder;
//!
//! let mut builder = FrameBuilder::new(2);
//! builder.begin();
//! builder.write_channel(1500);
//! builder.write_channel(1000);
//! builder.end();
//!
//! assert_eq!(
//!     builder.frame(),
//!     &[0x08, 0x40, 0xDC, 0x05, 0xE8, 0x03, 0xEB, 0xFD]
//! );
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`heapless`**: Enable `frame_to_vec()` for DMA-owned buffers
//! - **`embedded-io`**: Enable `write_to()` for I/O peripherals
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod checksum;
pub mod frame;

// Re-export main items at crate root
pub use checksum::{calculate_checksum, Checksum};
pub use frame::{FrameBuilder, BUFFER_SIZE, CHANNEL_COMMAND, FRAME_OVERHEAD, MAX_CHANNELS};
