//! PPM waveform output on a GPIO pin.
//!
//! Wraps a [`PpmGenerator`] in the tick loop that drives it. The loop is
//! meant to run on a high-priority interrupt executor so each tick lands
//! with interrupt latency rather than thread-scheduling latency.

use defmt::info;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Output;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};
use ppm_encoder::{PpmConfig, PpmGenerator};
use rc_core::ChannelStore;

/// Enable/disable requests from the application into the tick context.
///
/// A `Signal` gives "latest value wins" semantics: if the application
/// toggles faster than the tick loop picks requests up, only the final
/// state matters.
pub type PpmControl = Signal<CriticalSectionRawMutex, bool>;

/// PPM waveform output: a [`PpmGenerator`] plus its tick timing.
///
/// Construct in `main`, then hand to the tick task and call
/// [`drive`](Self::drive).
pub struct PpmOutput<'a> {
    generator: PpmGenerator<'a, Output<'static>>,
    tick: Duration,
}

impl<'a> PpmOutput<'a> {
    /// Create the waveform generator on `pin`, reading values from `store`.
    ///
    /// The pin is parked at the configured idle level; the waveform starts
    /// once `true` arrives on the control signal.
    #[must_use]
    pub fn new(pin: Output<'static>, store: &'a ChannelStore, config: PpmConfig) -> Self {
        let tick = Duration::from_micros(u64::from(config.tick_us.max(1)));
        Self {
            generator: PpmGenerator::new(pin, store, config),
            tick,
        }
    }

    /// Run the tick loop forever.
    ///
    /// Each tick advances the waveform by one quantum; control-signal
    /// arrivals enable or disable the output between ticks. Enabling
    /// restarts the ticker so the first pulse gets a full tick period.
    pub async fn drive(&mut self, control: &PpmControl) -> ! {
        let mut ticker = Ticker::every(self.tick);
        loop {
            match select(ticker.next(), control.wait()).await {
                Either::First(()) => self.generator.tick(),
                Either::Second(true) => {
                    self.generator.enable();
                    ticker.reset();
                    info!("PPM output enabled");
                }
                Either::Second(false) => {
                    self.generator.disable();
                    info!("PPM output disabled");
                }
            }
        }
    }
}
