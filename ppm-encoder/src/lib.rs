//! Tick-driven PPM pulse-train generation for RC trainer ports.
//!
//! Pulse-Position Modulation packs several RC channels onto a single wire:
//! each channel is a fixed-width active pulse followed by an idle space, and
//! the pause after the last channel stretches to a fixed frame length so the
//! receiver can re-synchronize.
//!
//! ```text
//!    ch0        ch1             ch7        sync gap          ch0
//!   _____      _____           _____                        _____
//! _|     |____|     |__ ... __|     |______________________|     |__
//!  |<500>|<-->|
//!   pulse space = value - 500 us       idles to 22500 us
//! ```
//!
//! With every channel at neutral (1500 us) the default frame is eight
//! 500 us pulses separated by 1000 us spaces, then a 10500 us gap.
//!
//! # Design
//!
//! [`PpmGenerator`] is a state machine advanced by [`tick()`] at a fixed
//! period from whatever periodic context the platform provides: a timer
//! interrupt, a high-priority async ticker. It drives any
//! [`embedded_hal::digital::OutputPin`] and reads channel values from a
//! shared [`ChannelStore`], so the application keeps writing channels while
//! the waveform runs.
//!
//! Edges are quantized to the tick period. With the default 10 us tick the
//! 500 us pulse is exact, and frame boundaries stay locked to the frame
//! grid within one tick no matter how long the generator runs.
//!
//! [`tick()`]: PpmGenerator::tick
//!
//! # Example
//!
//! ```
//! use embedded_hal::digital::{ErrorType, OutputPin};
//! use ppm_encoder::{ChannelStore, PpmConfig, PpmGenerator};
//!
//! struct NullPin;
//! impl ErrorType for NullPin {
//!     type Error = core::convert::Infallible;
//! }
//! impl OutputPin for NullPin {
//!     fn set_low(&mut self) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//!     fn set_high(&mut self) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//! }
//!
//! static CHANNELS: ChannelStore = ChannelStore::new();
//!
//! let mut ppm = PpmGenerator::new(NullPin, &CHANNELS, PpmConfig::default());
//! ppm.enable();
//!
//! // from the periodic timer context:
//! ppm.tick();
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod generator;

// Re-export main items at crate root
pub use config::{Polarity, PpmConfig};
pub use generator::PpmGenerator;
pub use rc_core::ChannelStore;

/// Fixed active-pulse width of every channel slot, in microseconds.
pub const PULSE_WIDTH_US: u32 = 500;

/// Default frame length in microseconds (the classic 22.5 ms trainer-port
/// frame).
pub const DEFAULT_FRAME_US: u32 = 22_500;

/// Default number of channels per frame.
pub const DEFAULT_CHANNELS: usize = 8;

/// Default timer tick period in microseconds.
pub const DEFAULT_TICK_US: u32 = 10;

/// Most channels a frame can carry (the shared store's capacity).
pub const MAX_CHANNELS: usize = rc_core::MAX_CHANNELS;
