//! What the board tells its user: status display screens, serial console lines, and the
//! on/off state of the two indicator LEDs.
//!
//! Everything here is plain data so the main loop's feedback can be checked on the host.
//! Drawing a [`StatusMessage`] onto the panel lives in the target-only `display` module.

use core::fmt::Write;

use heapless::String;

use crate::button::ButtonId;

/// Prompt printed before waiting for each console byte.
pub const CONSOLE_PROMPT: &str = "Enter a character or a digit 0-9: ";

/// Longest status line, in characters.
pub const LINE_CAPACITY: usize = 20;

/// One line of text at a fixed position on the 128×64 panel.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatusLine {
    /// The text, at most [`LINE_CAPACITY`] characters.
    pub text: String<LINE_CAPACITY>,
    /// Left edge in pixels.
    pub x: i32,
    /// Top edge in pixels.
    pub y: i32,
}

/// A full screen of feedback, replacing whatever the display showed before.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub enum StatusMessage {
    /// A console byte that is not a digit (including the `L` and `D` commands).
    CharReceived(u8),
    /// A digit was received and the matrix now shows it.
    MatrixUpdated(u8),
    /// An indicator LED was toggled.
    Indicator {
        /// Which LED.
        led: Indicator,
        /// Its new state.
        on: bool,
    },
}

impl StatusMessage {
    /// The screen to show after receiving `byte` on the console.
    #[must_use]
    pub const fn for_received(byte: u8) -> Self {
        if byte.is_ascii_digit() {
            Self::MatrixUpdated(byte - b'0')
        } else {
            Self::CharReceived(byte)
        }
    }

    /// The text lines of this screen, top to bottom.
    #[must_use]
    pub fn lines(&self) -> heapless::Vec<StatusLine, 3> {
        let mut lines = heapless::Vec::new();
        let mut push = |x: i32, y: i32, args: core::fmt::Arguments<'_>| {
            let mut text = String::new();
            // Every fixed line fits; an overlong piece would be dropped, not truncated.
            let _ = text.write_fmt(args);
            let _ = lines.push(StatusLine { text, x, y });
        };
        match *self {
            Self::CharReceived(byte) => {
                push(20, 30, format_args!("CHAR RECEIVED"));
                push(45, 50, format_args!("{}", char::from(byte)));
            }
            Self::MatrixUpdated(digit) => {
                push(10, 15, format_args!("MATRIX UPDATED"));
                push(25, 37, format_args!("NUMBER"));
                push(40, 50, format_args!("{digit}"));
            }
            Self::Indicator { led, on } => {
                push(10, 30, format_args!("{}: {}", led.label(), on_off(on)));
            }
        }
        lines
    }
}

const fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}

/// Line echoed to the console for a received byte.
#[must_use]
pub fn received_line(byte: u8) -> String<16> {
    let mut line = String::new();
    let _ = write!(line, "Received: {}", char::from(byte));
    line
}

/// Extra console line for the matrix power commands, if `byte` is one.
#[must_use]
pub const fn power_line(byte: u8) -> Option<&'static str> {
    match byte {
        b'D' | b'd' => Some("Turning LED matrix off..."),
        b'L' | b'l' => Some("Turning LED matrix on..."),
        _ => None,
    }
}

/// Console line for an accepted button press.
#[must_use]
pub const fn button_line(button: ButtonId) -> &'static str {
    match button {
        ButtonId::A => "Button A pressed",
        ButtonId::B => "Button B pressed",
    }
}

// ============================================================================
// Indicator LEDs
// ============================================================================

/// The two single-color indicator LEDs.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, defmt::Format)]
pub enum Indicator {
    /// Green LED, toggled by button A.
    Green,
    /// Blue LED, toggled by button B.
    Blue,
}

impl Indicator {
    /// The LED a button toggles.
    #[must_use]
    pub const fn for_button(button: ButtonId) -> Self {
        match button {
            ButtonId::A => Self::Green,
            ButtonId::B => Self::Blue,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Green => "GREEN LED",
            Self::Blue => "BLUE LED",
        }
    }
}

/// On/off state of both indicator LEDs. Both start off.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct IndicatorLeds {
    green: bool,
    blue: bool,
}

impl IndicatorLeds {
    /// Both LEDs off.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            green: false,
            blue: false,
        }
    }

    /// Flips the LED `button` controls and returns the screen announcing its new state.
    pub const fn toggle(&mut self, button: ButtonId) -> StatusMessage {
        let led = Indicator::for_button(button);
        let on = match led {
            Indicator::Green => {
                self.green = !self.green;
                self.green
            }
            Indicator::Blue => {
                self.blue = !self.blue;
                self.blue
            }
        };
        StatusMessage::Indicator { led, on }
    }

    /// Whether `led` is lit.
    #[must_use]
    pub const fn is_on(&self, led: Indicator) -> bool {
        match led {
            Indicator::Green => self.green,
            Indicator::Blue => self.blue,
        }
    }
}
