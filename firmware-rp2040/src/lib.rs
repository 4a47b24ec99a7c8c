//! RC signal encoder firmware for the Raspberry Pi Pico (RP2040).
//!
//! This crate provides the embedded implementation of the signal-encoding
//! layer of an RC-style game controller: it drives a PPM pulse train on a
//! GPIO pin and streams IBUS channel frames over UART, both fed from one
//! shared set of channel values.
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Holds channel pulse widths in a shared [`ChannelStore`]
//! 2. Emits a PPM frame every 22.5 ms on the PPM pin (trainer-port style)
//! 3. Transmits an IBUS channel frame every 7 ms on UART0 (115200 baud, 8N1)
//!
//! # Hardware Configuration
//!
//! | Function | GPIO | Description |
//! |----------|------|-------------|
//! | PPM out  | 15   | PPM pulse train output |
//! | UART0 TX | 0    | IBUS frame stream |
//! | LED      | 25   | On-board LED (liveness indicator) |
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime with two executors:
//!
//! - **PPM tick task**: runs on an `InterruptExecutor` bound to `SWI_IRQ_1`,
//!   so its 10 us tick preempts thread-mode code exactly like a hardware
//!   timer interrupt would. It owns the [`PpmOutput`] waveform generator.
//! - **IBUS task**: thread-mode task that snapshots the store and writes a
//!   frame to UART every [`IBUS_FRAME_PERIOD`].
//! - **Sweep task**: thread-mode placeholder for the control-input layer;
//!   sweeps channel 0 and blinks the LED.
//!
//! The application context talks to the tick context through a
//! [`PpmControl`] signal ("latest value wins") and through the lock-free
//! [`ChannelStore`]; neither path blocks the tick.
//!
//! # Modules
//!
//! - [`ppm_output`]: the PPM tick loop ([`PpmOutput`], [`PpmControl`])
//! - [`ibus_output`]: IBUS framing onto UART ([`IbusStreamer`])
//!
//! # Features
//!
//! - **`dev-panic`** (default): use `panic-probe` for development (prints
//!   panic info via RTT)
//! - **`prod-panic`**: use `panic-reset` for production (silent reset)
//! - **`inverted-ppm`**: emit the PPM train active-low for open-collector
//!   trainer ports
//!
//! # Re-exports
//!
//! This crate re-exports the public items of [`rc_core`] and the encoder
//! configuration types, so the binary only needs to depend on this crate.

#![no_std]

// The panic behaviors link conflicting panic handlers
#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - pick one panic handler");

// Re-export core types for convenience
pub use rc_core::{
    clamp_pulse_us, percent_to_pulse_us, ChannelStore, CHANNEL_MAX_US, CHANNEL_MIN_US,
    CHANNEL_NEUTRAL_US, MAX_CHANNELS,
};

pub use ppm_encoder::{Polarity, PpmConfig};

pub mod ibus_output;
pub mod ppm_output;

pub use ibus_output::{IbusStreamer, IBUS_BAUD, IBUS_FRAME_PERIOD};
pub use ppm_output::{PpmControl, PpmOutput};
