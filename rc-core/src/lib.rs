//! Platform-agnostic channel values and shared state for RC signal encoders.
//!
//! This crate provides the core data model shared by every signal encoder in
//! the workspace: channel values as pulse widths in microseconds, and a
//! [`ChannelStore`] that carries them from the application context that
//! decides them to the interrupt context that emits them.
//!
//! # Overview
//!
//! The crate is organized into two modules:
//!
//! - [`channel`]: Pulse-width range constants, clamping, percent mapping
//! - [`store`]: The shared [`ChannelStore`]
//!
//! # Channel Values
//!
//! A channel value is a pulse width in microseconds:
//!
//! | Value | Meaning |
//! |-------|---------|
//! | 1000  | Full deflection low ([`CHANNEL_MIN_US`]) |
//! | 1500  | Stick center ([`CHANNEL_NEUTRAL_US`]) |
//! | 2000  | Full deflection high ([`CHANNEL_MAX_US`]) |
//!
//! Every write path clamps into this range, so a consumer reading the store
//! never has to re-validate.
//!
//! # Concurrency
//!
//! [`ChannelStore`] is built for one logical writer (the application loop)
//! and readers that may preempt it at any instant (a timer tick emitting a
//! waveform). Each slot is a single 16-bit atomic, so a reader can never
//! observe a half-written value and no critical section is required.
//!
//! # Example
//!
//! ```
//! use rc_core::{ChannelStore, CHANNEL_NEUTRAL_US};
//!
//! static CHANNELS: ChannelStore = ChannelStore::new();
//!
//! CHANNELS.set(0, 1750);
//! CHANNELS.set_percent(1, 25);
//!
//! assert_eq!(CHANNELS.get(0), 1750);
//! assert_eq!(CHANNELS.get(1), 1250);
//! assert_eq!(CHANNELS.get(2), CHANNEL_NEUTRAL_US);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod channel;
pub mod store;

// Re-export main items at crate root
pub use channel::{
    clamp_pulse_us, percent_to_pulse_us, CHANNEL_MAX_US, CHANNEL_MIN_US, CHANNEL_NEUTRAL_US,
};
pub use store::{ChannelStore, MAX_CHANNELS};
