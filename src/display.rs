//! SSD1306 128×64 status display on I2C1.
//!
//! The panel is driven in buffered graphics mode: [`StatusDisplay::show`] redraws the whole
//! buffer for one [`StatusMessage`] and flushes it in a single I2C burst.

use embassy_rp::Peri;
use embassy_rp::i2c::{self, Blocking, I2c};
use embassy_rp::peripherals::{I2C1, PIN_14, PIN_15};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, Point};
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::Drawable;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::{DisplayConfig, DisplayRotation, DisplaySize128x64, I2CInterface};
use ssd1306::{I2CDisplayInterface, Ssd1306};

use crate::status::StatusMessage;
use crate::{Error, Result};

/// I2C clock for the display bus.
pub const DISPLAY_I2C_HZ: u32 = 400_000;

type Panel = Ssd1306<
    I2CInterface<I2c<'static, I2C1, Blocking>>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

/// The board's status display.
pub struct StatusDisplay {
    panel: Panel,
}

impl StatusDisplay {
    /// Brings up I2C1 on SDA GPIO 14 / SCL GPIO 15 and initializes the panel at 0x3C, blank.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Display`] if the panel does not answer its init sequence.
    pub fn new(
        i2c: Peri<'static, I2C1>,
        sda: Peri<'static, PIN_14>,
        scl: Peri<'static, PIN_15>,
    ) -> Result<Self> {
        let mut config = i2c::Config::default();
        config.frequency = DISPLAY_I2C_HZ;
        let bus = I2c::new_blocking(i2c, scl, sda, config);

        let interface = I2CDisplayInterface::new(bus);
        let mut panel = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        panel.init().map_err(|_| Error::Display)?;
        panel.clear_buffer();
        panel.flush().map_err(|_| Error::Display)?;
        defmt::info!("display: SSD1306 ready at {} Hz", DISPLAY_I2C_HZ);
        Ok(Self { panel })
    }

    /// Replaces the screen with `message`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Display`] if drawing or the flush fails.
    pub fn show(&mut self, message: &StatusMessage) -> Result<()> {
        self.panel.clear_buffer();
        draw_status(&mut self.panel, message).map_err(|_| Error::Display)?;
        self.panel.flush().map_err(|_| Error::Display)
    }
}

fn draw_status<D: DrawTarget<Color = BinaryColor>>(
    target: &mut D,
    message: &StatusMessage,
) -> core::result::Result<(), D::Error> {
    let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    for line in &message.lines() {
        Text::with_baseline(&line.text, Point::new(line.x, line.y), style, Baseline::Top)
            .draw(target)?;
    }
    Ok(())
}
