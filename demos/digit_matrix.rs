#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::convert::Infallible;

use defmt::Display2Format;
use digit_matrix::animation::{AnimationController, Command, RenderOutcome};
use digit_matrix::button::{BUTTON_EVENTS, Button, ButtonId, button_task};
use digit_matrix::display::StatusDisplay;
use digit_matrix::grid::MATRIX_LEN;
use digit_matrix::irqs::Uart0Irqs;
use digit_matrix::serial_console::{CONSOLE_BAUD, SerialConsole};
use digit_matrix::status::{
    Indicator, IndicatorLeds, StatusMessage, button_line, power_line, received_line,
};
use digit_matrix::ws2812::{PioBus, Transmit, Ws2812Pio};
use digit_matrix::Result;
use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_rp::gpio::{Level, Output};
use embassy_rp::uart::{self, BufferedUart};
use embedded_io_async::{Read, Write};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

static UART_TX_BUFFER: StaticCell<[u8; 64]> = StaticCell::new();
static UART_RX_BUFFER: StaticCell<[u8; 64]> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    // Matrix first: its PIO program must be loaded before anything can render.
    let (pio_bus, sm0) = PioBus::init_pio0(p.PIO0);
    let matrix = Ws2812Pio::<_, 0, MATRIX_LEN>::new(pio_bus, sm0, p.PIN_7);
    let mut controller = AnimationController::new(matrix);
    controller.clear().await?;

    let mut uart_config = uart::Config::default();
    uart_config.baudrate = CONSOLE_BAUD;
    let uart = BufferedUart::new(
        p.UART0,
        p.PIN_0,
        p.PIN_1,
        Uart0Irqs,
        UART_TX_BUFFER.init([0; 64]),
        UART_RX_BUFFER.init([0; 64]),
        uart_config,
    );
    let mut console = SerialConsole::new(uart);

    let mut display = StatusDisplay::new(p.I2C1, p.PIN_14, p.PIN_15)?;

    let mut green_led = Output::new(p.PIN_11, Level::Low);
    let mut blue_led = Output::new(p.PIN_12, Level::Low);
    let mut indicators = IndicatorLeds::new();

    spawner.spawn(button_task(Button::new(p.PIN_5, ButtonId::A), &BUTTON_EVENTS))?;
    spawner.spawn(button_task(Button::new(p.PIN_6, ButtonId::B), &BUTTON_EVENTS))?;

    defmt::info!("digit matrix ready");
    log_console_error(console.prompt().await);

    loop {
        match select(console.read_byte(), BUTTON_EVENTS.receive()).await {
            Either::First(Ok(byte)) => {
                on_received(byte, &mut controller, &mut console, &mut display).await?;
                log_console_error(console.prompt().await);
            }
            Either::First(Err(err)) => defmt::warn!("console read: {}", Display2Format(&err)),
            Either::Second(button) => {
                let message = indicators.toggle(button);
                let level = Level::from(indicators.is_on(Indicator::for_button(button)));
                match button {
                    ButtonId::A => green_led.set_level(level),
                    ButtonId::B => blue_led.set_level(level),
                }
                log_console_error(console.write_line("").await);
                log_console_error(console.write_line(button_line(button)).await);
                log_display_error(display.show(&message));
            }
        }
    }
}

/// Echoes `byte`, runs the matrix command it names (if any), and updates the display.
///
/// Only a matrix failure is returned; console and display problems are logged.
async fn on_received<T, P>(
    byte: u8,
    controller: &mut AnimationController<T>,
    console: &mut SerialConsole<P>,
    display: &mut StatusDisplay,
) -> Result<()>
where
    T: Transmit<MATRIX_LEN>,
    P: Read + Write,
{
    log_console_error(console.write_line("").await);
    log_console_error(console.write_line(&received_line(byte)).await);
    if let Some(line) = power_line(byte) {
        log_console_error(console.write_line(line).await);
    }

    if let Some(command) = Command::from_received(byte) {
        match controller.apply(command).await? {
            RenderOutcome::Rendered => defmt::info!("matrix: {}", controller.state()),
            RenderOutcome::Ignored => defmt::warn!("matrix: {} ignored", command),
        }
    }

    log_display_error(display.show(&StatusMessage::for_received(byte)));
    Ok(())
}

fn log_console_error(result: Result<()>) {
    if let Err(err) = result {
        defmt::warn!("console write: {}", Display2Format(&err));
    }
}

fn log_display_error(result: Result<()>) {
    if let Err(err) = result {
        defmt::warn!("status display: {}", Display2Format(&err));
    }
}
