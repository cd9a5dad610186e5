//! Dialog Demo Firmware for Raspberry Pi Pico 2 (RP2350)
//!
//! Shows the modal dialogs on the Pimoroni PIM715 Display Pack 2.8".
//!
//! # Architecture
//!
//! - Button task: polls and debounces the six buttons, publishes events on
//!   the static event bus
//! - Main task: draws the home screen and runs the demo dialogs, which
//!   receive their input from the bus
//!
//! # Button Controls
//!
//! - **A**: CONFIRM (also starts a demo round from the home screen)
//! - **B**: CANCEL
//! - **X** / **Y**: UP / DOWN (hold to auto-repeat)
//! - **GPIO10** / **GPIO11**: LEFT (delete) / RIGHT (append)

#![no_std]
#![no_main]
// Crate-level lints (match lib.rs for consistency)
#![allow(clippy::cast_possible_truncation)]

mod display;
mod host;
mod screens;

use defmt::info;
use dialogs_pico2::config::BUTTON_POLL_MS;
use dialogs_pico2::dialog::{Alphabet, ConfirmDialog, TextDialog, TextResult};
use dialogs_pico2::input::{Button, ButtonEvent, ButtonPad, EventBus, EventKind};
use dialogs_pico2::log_buffer::{self, LOG_BUFFER, LogBuffer};
use dialogs_pico2::{log_debug, log_error, log_info, log_warn};
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::Spi;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Duration, Instant, Ticker};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use {defmt_rtt as _, panic_probe as _};

use crate::display::{display_spi_config, init_display};
use crate::host::{DeviceHost, HOME_SCOPE};
use crate::screens::Screen;

// =============================================================================
// Button Input
// =============================================================================

/// Button events for every dialog on the device.
static BUS: EventBus<CriticalSectionRawMutex> = EventBus::new();

/// Logical button of each polled input, in the order they are read.
const BUTTON_MAP: [Button; 6] = [
    Button::Confirm,
    Button::Cancel,
    Button::Up,
    Button::Down,
    Button::Left,
    Button::Right,
];

/// Button polling task.
///
/// Buttons that change in the same poll are published as one event, so a
/// chord like UP+DOWN reaches the dialogs together.
#[embassy_executor::task]
async fn button_task(inputs: [Input<'static>; 6]) {
    info!("Button task started");

    let mut pad = ButtonPad::new(BUTTON_MAP);
    let mut ticker = Ticker::every(Duration::from_millis(BUTTON_POLL_MS));

    loop {
        let levels = core::array::from_fn(|i| inputs[i].is_low());
        let (down, up) = pad.poll(levels, Instant::now().as_millis());

        for event in [down, up].into_iter().flatten() {
            let edge = match event {
                ButtonEvent::Down(_) => "down",
                ButtonEvent::Up(_) => "up",
            };
            for button in event.buttons().iter() {
                log_debug!("{} {}", button.name(), edge);
            }
            BUS.emit(HOME_SCOPE, event);
        }

        ticker.next().await;
    }
}

// =============================================================================
// Demo Flow
// =============================================================================

/// Wait on the home screen until CONFIRM is pressed.
async fn wait_for_start() {
    let listener = match BUS.register(EventKind::ButtonDown, HOME_SCOPE) {
        Ok(listener) => listener,
        Err(err) => {
            log_error!("Home: {}", err);
            return;
        }
    };

    while let Some(buttons) = BUS.receive(listener).await {
        if buttons.contains(Button::Confirm) {
            break;
        }
    }
    BUS.deregister(listener);
}

/// One round: offer to clear the logs, then ask for a PIN.
async fn demo_round<D>(display: &mut D)
where
    D: DrawTarget<Color = Rgb565>,
{
    let host = DeviceHost::new(&BUS);
    let mut screen = Screen::new(display, host.overlays());
    screen.refresh();

    wait_for_start().await;

    let clear_logs = || {
        if let Ok(mut buffer) = LOG_BUFFER.try_lock() {
            *buffer = LogBuffer::new();
        }
    };
    let confirm = match ConfirmDialog::new("Delete logs?", &host) {
        Ok(dialog) => dialog.on_yes(&clear_logs),
        Err(err) => {
            log_warn!("Confirm: {}", err);
            return;
        }
    };
    if confirm.run(&mut screen).await {
        log_info!("Logs cleared");
    }

    let prompt = ["Enter PIN", "(digits)"];
    let pin = match TextDialog::new(&prompt, &host, true) {
        Ok(dialog) => dialog.with_alphabet(Alphabet::DIGITS),
        Err(err) => {
            log_warn!("PIN: {}", err);
            return;
        }
    };
    match pin.run(&mut screen).await {
        TextResult::Submitted(pin) => log_info!("PIN entered, {} digits", pin.len()),
        TextResult::Cancelled => log_info!("PIN entry cancelled"),
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Dialog demo starting...");

    let p = embassy_rp::init(Default::default());
    log_buffer::set_clock(|| Instant::now().as_millis() as u32);

    // Initialize display pins
    // PIM715 pinout: CS=17, DC=16, CLK=18, MOSI=19, Backlight=20
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let _backlight = Output::new(p.PIN_20, Level::High); // Turn on backlight

    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, display_spi_config());
    let Some(mut display) = init_display(spi, cs, dc) else {
        defmt::panic!("Display init failed");
    };
    log_info!("Display initialized");

    // Initialize buttons (active-low with internal pull-up)
    // PIM715: A=12, B=13, X=14, Y=15; LEFT/RIGHT on external buttons at 10/11
    let buttons = [
        Input::new(p.PIN_12, Pull::Up),
        Input::new(p.PIN_13, Pull::Up),
        Input::new(p.PIN_14, Pull::Up),
        Input::new(p.PIN_15, Pull::Up),
        Input::new(p.PIN_10, Pull::Up),
        Input::new(p.PIN_11, Pull::Up),
    ];
    spawner.spawn(button_task(buttons)).unwrap();
    info!("Button task spawned");

    loop {
        demo_round(&mut display).await;
    }
}
