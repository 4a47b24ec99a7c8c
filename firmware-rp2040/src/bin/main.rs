#![no_std]
#![no_main]

use defmt::{error, info, unwrap};
use defmt_rtt as _;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::gpio::{Level, Output};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::uart::{Config as UartConfig, UartTx};
use embassy_sync::signal::Signal;
use embassy_time::{Ticker, Timer};
use rc_encoder_rp2040::{
    ChannelStore, IbusStreamer, Polarity, PpmConfig, PpmControl, PpmOutput, IBUS_BAUD,
    IBUS_FRAME_PERIOD,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

/// Channels sent in each IBUS frame; matches the PPM channel count.
const IBUS_CHANNELS: usize = 8;

/// Channel values shared by the application writer and both encoder tasks.
/// Atomic slots make it safe to write from thread mode while the tick task
/// reads from interrupt context.
static CHANNELS: ChannelStore = ChannelStore::new();

/// Enable/disable requests for the PPM tick task (latest value wins).
static PPM_CONTROL: StaticCell<PpmControl> = StaticCell::new();

/// High-priority executor for the PPM tick. Runs in the `SWI_IRQ_1`
/// software interrupt so ticks preempt the thread-mode tasks below.
static PPM_EXECUTOR: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    PPM_EXECUTOR.on_interrupt()
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("RC signal encoder starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    let control: &'static PpmControl = PPM_CONTROL.init(Signal::new());

    // --- PPM Setup ---
    #[cfg(not(feature = "inverted-ppm"))]
    let polarity = Polarity::Normal;
    #[cfg(feature = "inverted-ppm")]
    let polarity = Polarity::Inverted;

    let idle = match polarity {
        Polarity::Normal => Level::Low,
        Polarity::Inverted => Level::High,
    };
    let ppm_pin = Output::new(p.PIN_15, idle);
    let ppm = PpmOutput::new(
        ppm_pin,
        &CHANNELS,
        PpmConfig {
            polarity,
            ..PpmConfig::default()
        },
    );

    // --- UART Setup (IBUS) ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = IBUS_BAUD;

    let uart_tx = UartTx::new(
        p.UART0,
        p.PIN_0, // TX
        p.DMA_CH0,
        uart_config,
    );
    let ibus = IbusStreamer::new(uart_tx, &CHANNELS, IBUS_CHANNELS);

    // On-board LED as a liveness indicator
    let led = Output::new(p.PIN_25, Level::Low);

    // The tick task runs on its own interrupt executor so thread-mode work
    // can never delay a pulse edge.
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let high_spawner = PPM_EXECUTOR.start(interrupt::SWI_IRQ_1);
    unwrap!(high_spawner.spawn(ppm_task(ppm, control)));

    unwrap!(spawner.spawn(ibus_task(ibus)));
    unwrap!(spawner.spawn(sweep_task(&CHANNELS, control, led)));

    info!("RC signal encoder initialized");
}

/// PPM tick task - advances the waveform generator on the high-priority
/// executor.
#[embassy_executor::task]
async fn ppm_task(mut output: PpmOutput<'static>, control: &'static PpmControl) {
    output.drive(control).await
}

/// IBUS task - transmits one channel frame per period.
#[embassy_executor::task]
async fn ibus_task(mut ibus: IbusStreamer<'static>) {
    let mut ticker = Ticker::every(IBUS_FRAME_PERIOD);
    loop {
        ticker.next().await;
        if let Err(e) = ibus.send_frame().await {
            error!("IBUS write error: {:?}", e);
        }
    }
}

/// Placeholder for the control-input layer: sweeps channel 0 across its
/// range so both outputs show movement, and blinks the LED.
#[embassy_executor::task]
async fn sweep_task(
    channels: &'static ChannelStore,
    control: &'static PpmControl,
    mut led: Output<'static>,
) {
    // Everything is armed; start the waveform.
    control.signal(true);

    let mut percent: u8 = 0;
    let mut rising = true;
    loop {
        channels.set_percent(0, percent);
        if rising {
            percent += 5;
            if percent >= 100 {
                rising = false;
            }
        } else {
            percent -= 5;
            if percent == 0 {
                rising = true;
            }
        }
        led.toggle();
        Timer::after_millis(100).await;
    }
}
