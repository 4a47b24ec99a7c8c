//! The PPM waveform state machine.

use embedded_hal::digital::OutputPin;
use rc_core::ChannelStore;

use crate::config::{Polarity, PpmConfig};
use crate::{MAX_CHANNELS, PULSE_WIDTH_US};

/// Where in the frame the generator currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// Emitting a slot's fixed-width active pulse.
    Pulse,
    /// Emitting the idle remainder of a slot.
    Space,
    /// Idling out the end of the frame after the last slot.
    FrameGap,
}

/// PPM pulse-train generator over an [`OutputPin`].
///
/// Advance the generator by calling [`tick`](Self::tick) once per fixed
/// timer period from the platform's periodic context. Channel values come
/// from a shared [`ChannelStore`], which the application keeps writing
/// while the waveform runs; the store's atomic slots make that safe without
/// any locking here.
///
/// The generator starts disabled with the pin parked at the idle level.
/// [`enable`](Self::enable) begins a frame; [`disable`](Self::disable)
/// stops output immediately.
pub struct PpmGenerator<'a, P: OutputPin> {
    pin: P,
    store: &'a ChannelStore,
    channel_count: usize,
    polarity: Polarity,
    tick_us: u32,
    frame_us: u32,
    enabled: bool,
    phase: Phase,
    current_channel: usize,
    phase_elapsed_us: u32,
    phase_target_us: u32,
    frame_elapsed_us: u32,
}

impl<'a, P: OutputPin> PpmGenerator<'a, P> {
    /// Create a generator reading channel values from `store`.
    ///
    /// The pin is driven to the idle level and the generator starts
    /// disabled; call [`enable`](Self::enable) once the periodic tick is
    /// armed. `config.channel_count` is clamped to `1..=MAX_CHANNELS` and
    /// `config.tick_us` to at least 1.
    pub fn new(mut pin: P, store: &'a ChannelStore, config: PpmConfig) -> Self {
        let _ = pin.set_state(config.polarity.idle());
        Self {
            pin,
            store,
            channel_count: config.channel_count.clamp(1, MAX_CHANNELS),
            polarity: config.polarity,
            tick_us: config.tick_us.max(1),
            frame_us: config.frame_us,
            enabled: false,
            phase: Phase::FrameGap,
            current_channel: 0,
            phase_elapsed_us: 0,
            phase_target_us: 0,
            frame_elapsed_us: 0,
        }
    }

    /// Begin emitting frames, starting at channel 0's pulse.
    ///
    /// The first active edge is driven immediately and the armed tick times
    /// it out. Re-enabling an already enabled generator also restarts at
    /// the top of a frame.
    pub fn enable(&mut self) {
        self.enabled = true;
        self.phase_elapsed_us = 0;
        self.frame_elapsed_us = 0;
        self.current_channel = 0;
        self.enter_pulse();
    }

    /// Stop emitting and park the pin at the idle level, even mid-pulse.
    ///
    /// Stored channel values are untouched; [`enable`](Self::enable)
    /// resumes at the start of a fresh frame.
    pub fn disable(&mut self) {
        self.enabled = false;
        let _ = self.pin.set_state(self.polarity.idle());
    }

    /// Whether the generator is currently emitting.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Channels per frame.
    #[inline]
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channel_count
    }

    /// Advance the waveform by one timer tick (`tick_us` microseconds).
    ///
    /// Must be called from exactly one context at a fixed period. Never
    /// blocks, never allocates, never fails; while the generator is
    /// disabled this is a no-op.
    pub fn tick(&mut self) {
        if !self.enabled {
            return;
        }
        self.phase_elapsed_us = self.phase_elapsed_us.saturating_add(self.tick_us);
        self.frame_elapsed_us = self.frame_elapsed_us.saturating_add(self.tick_us);
        if self.phase_elapsed_us < self.phase_target_us {
            return;
        }
        self.phase_elapsed_us = 0;
        match self.phase {
            Phase::Pulse => self.enter_space(),
            Phase::Space => {
                self.current_channel += 1;
                if self.current_channel < self.channel_count {
                    self.enter_pulse();
                } else if self.frame_elapsed_us < self.frame_us {
                    self.enter_gap();
                } else {
                    // Slots consumed the whole frame: the gap clamps to
                    // zero and the next frame starts immediately.
                    self.start_frame();
                }
            }
            Phase::FrameGap => self.start_frame(),
        }
    }

    fn enter_pulse(&mut self) {
        self.phase = Phase::Pulse;
        self.phase_target_us = PULSE_WIDTH_US;
        let _ = self.pin.set_state(self.polarity.active());
    }

    fn enter_space(&mut self) {
        self.phase = Phase::Space;
        // Store values are clamped to [CHANNEL_MIN_US, CHANNEL_MAX_US] at
        // write time, so the space is always at least 500 us. The value is
        // latched here: a concurrent set() lands in this channel's next
        // slot.
        let width = u32::from(self.store.get(self.current_channel));
        self.phase_target_us = width - PULSE_WIDTH_US;
        let _ = self.pin.set_state(self.polarity.idle());
    }

    fn enter_gap(&mut self) {
        self.phase = Phase::FrameGap;
        self.phase_target_us = self.frame_us - self.frame_elapsed_us;
        // Pin is already idle from the final space.
    }

    fn start_frame(&mut self) {
        // The sub-tick overshoot carries into the new frame so boundaries
        // stay locked to the frame_us grid; a genuine overrun starts fresh.
        let excess = self.frame_elapsed_us.saturating_sub(self.frame_us);
        self.frame_elapsed_us = if excess < self.tick_us { excess } else { 0 };
        self.current_channel = 0;
        self.enter_pulse();
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::sync::{Arc, Mutex};
    use std::vec::Vec;

    use super::*;
    use crate::{DEFAULT_FRAME_US, DEFAULT_TICK_US};
    use rc_core::CHANNEL_NEUTRAL_US;

    /// Test pin whose level is observable through a shared handle.
    struct TestPin {
        level: Arc<Mutex<bool>>,
    }

    impl TestPin {
        fn new() -> (Self, Arc<Mutex<bool>>) {
            let level = Arc::new(Mutex::new(false));
            (
                Self {
                    level: Arc::clone(&level),
                },
                level,
            )
        }
    }

    impl embedded_hal::digital::ErrorType for TestPin {
        type Error = core::convert::Infallible;
    }

    impl OutputPin for TestPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            *self.level.lock().unwrap() = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            *self.level.lock().unwrap() = true;
            Ok(())
        }
    }

    /// Advance `ticks` ticks and return the waveform as `(level, us)` run
    /// lengths. The level is sampled before each tick, so each sample
    /// represents the `tick_us` interval that follows it.
    fn record(
        gen: &mut PpmGenerator<'_, TestPin>,
        level: &Arc<Mutex<bool>>,
        ticks: u32,
        tick_us: u32,
    ) -> Vec<(bool, u32)> {
        let mut runs: Vec<(bool, u32)> = Vec::new();
        for _ in 0..ticks {
            let lv = *level.lock().unwrap();
            match runs.last_mut() {
                Some((last, dur)) if *last == lv => *dur += tick_us,
                _ => runs.push((lv, tick_us)),
            }
            gen.tick();
        }
        runs
    }

    fn ticks_per_default_frame() -> u32 {
        DEFAULT_FRAME_US / DEFAULT_TICK_US
    }

    // --- Waveform tests ---

    #[test]
    fn test_default_frame_all_neutral() {
        let store = ChannelStore::new();
        let (pin, level) = TestPin::new();
        let mut gen = PpmGenerator::new(pin, &store, PpmConfig::default());
        gen.enable();

        let runs = record(&mut gen, &level, ticks_per_default_frame(), DEFAULT_TICK_US);

        // 8 slots of 500 us pulse + 1000 us space; the final space merges
        // with the 10500 us sync gap into one idle run.
        assert_eq!(runs.len(), 16);
        for slot in 0..8 {
            assert_eq!(runs[slot * 2], (true, PULSE_WIDTH_US), "slot {}", slot);
        }
        for slot in 0..7 {
            assert_eq!(runs[slot * 2 + 1], (false, 1000), "slot {}", slot);
        }
        assert_eq!(runs[15], (false, 1000 + 10_500));
        assert_eq!(runs.iter().map(|r| r.1).sum::<u32>(), DEFAULT_FRAME_US);
    }

    #[test]
    fn test_pulse_width_fixed_for_any_value() {
        let store = ChannelStore::new();
        let values = [1000, 2000, 1250, 1780, 1500, 1000, 2000, 1500];
        for (ch, &us) in values.iter().enumerate() {
            store.set(ch, us);
        }
        let (pin, level) = TestPin::new();
        let mut gen = PpmGenerator::new(pin, &store, PpmConfig::default());
        gen.enable();

        let runs = record(&mut gen, &level, ticks_per_default_frame(), DEFAULT_TICK_US);

        assert_eq!(runs.len(), 16);
        for slot in 0..8 {
            assert_eq!(runs[slot * 2], (true, PULSE_WIDTH_US), "slot {}", slot);
        }
        // Spaces stretch and shrink with the value; pulses never do.
        assert_eq!(runs[1], (false, 500));
        assert_eq!(runs[3], (false, 1500));
        assert_eq!(runs[7], (false, 1280));
        assert_eq!(runs.iter().map(|r| r.1).sum::<u32>(), DEFAULT_FRAME_US);
    }

    #[test]
    fn test_gap_fills_frame_to_configured_length() {
        let store = ChannelStore::new();
        store.set(0, 1200);
        store.set(1, 1800);
        let config = PpmConfig {
            channel_count: 2,
            frame_us: 10_000,
            ..PpmConfig::default()
        };
        let (pin, level) = TestPin::new();
        let mut gen = PpmGenerator::new(pin, &store, config);
        gen.enable();

        let runs = record(&mut gen, &level, 1000, DEFAULT_TICK_US);

        assert_eq!(runs.len(), 4);
        assert_eq!(runs[0], (true, 500));
        assert_eq!(runs[1], (false, 700));
        assert_eq!(runs[2], (true, 500));
        // 1300 us space merged with the 7000 us gap
        assert_eq!(runs[3], (false, 8300));
        assert_eq!(runs.iter().map(|r| r.1).sum::<u32>(), 10_000);
    }

    #[test]
    fn test_overrun_clamps_gap_to_zero() {
        // Three neutral slots are 4500 us, longer than the 4000 us frame:
        // the next frame must start immediately with no idle stretch.
        let store = ChannelStore::new();
        let config = PpmConfig {
            channel_count: 3,
            frame_us: 4_000,
            ..PpmConfig::default()
        };
        let (pin, level) = TestPin::new();
        let mut gen = PpmGenerator::new(pin, &store, config);
        gen.enable();

        let runs = record(&mut gen, &level, 910, DEFAULT_TICK_US);

        assert_eq!(runs[4], (true, 500));
        assert_eq!(runs[5], (false, 1000));
        // Straight into the next frame's first pulse, not a gap.
        assert_eq!(runs[6], (true, 500));
        assert_eq!(runs[7], (false, 1000));
    }

    #[test]
    fn test_channel_value_change_applies_next_frame() {
        let store = ChannelStore::new();
        let (pin, level) = TestPin::new();
        let mut gen = PpmGenerator::new(pin, &store, PpmConfig::default());
        gen.enable();

        // Tick into channel 0's space, then change channel 0.
        for _ in 0..60 {
            gen.tick();
        }
        store.set(0, 2000);

        // The in-flight slot still uses the width latched at slot entry.
        let runs = record(&mut gen, &level, 100, DEFAULT_TICK_US);
        assert_eq!(runs[0], (false, 900)); // space completes 1500 us total
        assert!(runs[1].0);

        // Run out the rest of the frame (160 ticks consumed so far); the
        // next frame picks up the write.
        for _ in 0..(DEFAULT_FRAME_US / DEFAULT_TICK_US - 160) {
            gen.tick();
        }
        let runs = record(&mut gen, &level, 210, DEFAULT_TICK_US);
        assert_eq!(runs[0], (true, 500));
        assert_eq!(runs[1], (false, 1500));
    }

    // --- Enable/disable tests ---

    #[test]
    fn test_starts_disabled_at_idle() {
        let store = ChannelStore::new();
        let (pin, level) = TestPin::new();
        let mut gen = PpmGenerator::new(pin, &store, PpmConfig::default());

        assert!(!gen.is_enabled());
        for _ in 0..100 {
            gen.tick();
        }
        assert!(!*level.lock().unwrap());
    }

    #[test]
    fn test_disable_parks_pin_mid_pulse() {
        let store = ChannelStore::new();
        let (pin, level) = TestPin::new();
        let mut gen = PpmGenerator::new(pin, &store, PpmConfig::default());
        gen.enable();

        for _ in 0..20 {
            gen.tick();
        }
        assert!(*level.lock().unwrap()); // mid-pulse

        gen.disable();
        assert!(!*level.lock().unwrap());
        assert!(!gen.is_enabled());

        // Ticks while disabled must not move the pin.
        for _ in 0..1000 {
            gen.tick();
        }
        assert!(!*level.lock().unwrap());
    }

    #[test]
    fn test_reenable_restarts_at_first_channel() {
        let store = ChannelStore::new();
        store.set(0, 1200);
        let (pin, level) = TestPin::new();
        let mut gen = PpmGenerator::new(pin, &store, PpmConfig::default());
        gen.enable();

        // Stop somewhere inside the frame, past channel 0.
        for _ in 0..500 {
            gen.tick();
        }
        gen.disable();
        gen.enable();

        // Channel 0's distinctive 700 us space proves the frame restarted.
        let runs = record(&mut gen, &level, 120, DEFAULT_TICK_US);
        assert_eq!(runs[0], (true, 500));
        assert_eq!(runs[1], (false, 700));
    }

    // --- Polarity tests ---

    #[test]
    fn test_inverted_polarity_mirrors_levels() {
        let store = ChannelStore::new();
        let config = PpmConfig {
            polarity: Polarity::Inverted,
            ..PpmConfig::default()
        };
        let (pin, level) = TestPin::new();
        let mut gen = PpmGenerator::new(pin, &store, config);

        // Idle is high before the first frame.
        assert!(*level.lock().unwrap());
        gen.enable();

        let runs = record(&mut gen, &level, ticks_per_default_frame(), DEFAULT_TICK_US);
        assert_eq!(runs.len(), 16);
        for slot in 0..8 {
            assert_eq!(runs[slot * 2], (false, PULSE_WIDTH_US), "slot {}", slot);
        }
        assert!(runs[15].0);

        gen.disable();
        assert!(*level.lock().unwrap());
    }

    // --- Configuration tests ---

    #[test]
    fn test_channel_count_clamped_to_store_capacity() {
        let store = ChannelStore::new();
        let config = PpmConfig {
            channel_count: 99,
            ..PpmConfig::default()
        };
        let (pin, level) = TestPin::new();
        let mut gen = PpmGenerator::new(pin, &store, config);
        assert_eq!(gen.channel_count(), MAX_CHANNELS);
        gen.enable();

        // 10 neutral slots and a gap still fit the default frame.
        let runs = record(&mut gen, &level, ticks_per_default_frame(), DEFAULT_TICK_US);
        let pulses = runs.iter().filter(|r| r.0).count();
        assert_eq!(pulses, MAX_CHANNELS);
        assert_eq!(runs.iter().map(|r| r.1).sum::<u32>(), DEFAULT_FRAME_US);
    }

    #[test]
    fn test_zero_config_values_clamped() {
        let store = ChannelStore::new();
        let config = PpmConfig {
            channel_count: 0,
            tick_us: 0,
            ..PpmConfig::default()
        };
        let (pin, level) = TestPin::new();
        let mut gen = PpmGenerator::new(pin, &store, config);
        assert_eq!(gen.channel_count(), 1);
        gen.enable();

        // With the tick clamped to 1 us, 500 ticks end the first pulse.
        for _ in 0..500 {
            gen.tick();
        }
        assert!(!*level.lock().unwrap());
    }

    // --- Timing tests ---

    #[test]
    fn test_frame_boundaries_locked_over_1000_frames() {
        // A tick that divides neither the pulse nor the frame length is the
        // worst case for accumulated drift.
        let tick_us = 7u32;
        let store = ChannelStore::new();
        let config = PpmConfig {
            tick_us,
            ..PpmConfig::default()
        };
        let (pin, level) = TestPin::new();
        let mut gen = PpmGenerator::new(pin, &store, config);
        gen.enable();

        let mut edges: Vec<u64> = Vec::new();
        let mut prev = false;
        let mut now: u64 = 0;
        for _ in 0..3_220_000u32 {
            let lv = *level.lock().unwrap();
            if lv && !prev {
                edges.push(now);
            }
            prev = lv;
            gen.tick();
            now += u64::from(tick_us);
        }

        // Every frame emits 8 rising edges, so frame k opens at edge 8k.
        assert!(edges.len() > 8_000);
        for frame in 0..=1000u64 {
            let ideal = frame * u64::from(DEFAULT_FRAME_US);
            let actual = edges[(frame * 8) as usize];
            assert!(
                actual >= ideal && actual - ideal < u64::from(tick_us),
                "frame {} opened at {} us, ideal {} us",
                frame,
                actual,
                ideal
            );
        }
    }

    #[test]
    fn test_neutral_store_matches_neutral_constant() {
        let store = ChannelStore::new();
        let (pin, level) = TestPin::new();
        let mut gen = PpmGenerator::new(pin, &store, PpmConfig::default());
        gen.enable();

        // One full neutral slot: 500 us pulse, then the space completing
        // CHANNEL_NEUTRAL_US.
        let runs = record(&mut gen, &level, 150, DEFAULT_TICK_US);
        assert_eq!(runs[0], (true, PULSE_WIDTH_US));
        assert_eq!(
            runs[0].1 + runs[1].1,
            u32::from(CHANNEL_NEUTRAL_US)
        );
    }
}
