//! The animation controller: the only owner of the LED matrix and its on/off state.
//!
//! Everything that changes the matrix goes through [`AnimationController::render`] or
//! [`AnimationController::clear`]. Each call builds a complete frame and sends it before
//! returning, and the controller holds its transmitter by value, so two transmissions can
//! never overlap.

use crate::Result;
use crate::color::Color;
use crate::frame::{Frame, MatrixFrame};
use crate::grid::MATRIX_LEN;
use crate::pattern::lookup;
use crate::ws2812::Transmit;

/// Color used by every command that lights the matrix.
pub const DEFAULT_ON_COLOR: Color = Color::new(0.3, 0.0, 0.0);

/// Symbol shown when the matrix is switched on without naming a digit.
///
/// Power-on always shows this symbol, not whatever was on screen before the last clear.
pub const POWER_ON_SYMBOL: u8 = 0;

/// What the matrix is currently showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, defmt::Format)]
pub enum AnimationState {
    /// Every LED dark.
    #[default]
    Off,
    /// A digit glyph painted in one color.
    On {
        /// The digit on screen.
        symbol: u8,
        /// The color of its lit cells.
        color: Color,
    },
}

/// Whether a render reached the wire.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
#[must_use]
pub enum RenderOutcome {
    /// The frame was built and transmitted.
    Rendered,
    /// The symbol had no pattern; neither the state nor the matrix changed.
    Ignored,
}

/// A matrix operation decoded from outside input.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub enum Command {
    /// Show a digit `0..=9`.
    Digit(u8),
    /// Light the matrix with [`POWER_ON_SYMBOL`].
    PowerOn,
    /// Turn every LED off.
    PowerOff,
}

impl Command {
    /// Decodes a byte received on the serial console.
    ///
    /// `'0'..='9'` select a digit, `'L'`/`'l'` power on, and `'D'`/`'d'` power off. Any
    /// other byte returns `None` and leaves the matrix alone.
    #[must_use]
    pub const fn from_received(byte: u8) -> Option<Self> {
        match byte {
            b'0'..=b'9' => Some(Self::Digit(byte - b'0')),
            b'L' | b'l' => Some(Self::PowerOn),
            b'D' | b'd' => Some(Self::PowerOff),
            _ => None,
        }
    }
}

/// Owns the transmitter and the [`AnimationState`] of the board's matrix.
pub struct AnimationController<T> {
    transmitter: T,
    state: AnimationState,
    last_frame: Option<MatrixFrame>,
}

impl<T: Transmit<MATRIX_LEN>> AnimationController<T> {
    /// Takes ownership of a ready transmitter. Starts [`AnimationState::Off`] without
    /// touching the wire.
    pub const fn new(transmitter: T) -> Self {
        Self {
            transmitter,
            state: AnimationState::Off,
            last_frame: None,
        }
    }

    /// Shows the glyph for `symbol` in `color`, replacing whatever was on the matrix.
    ///
    /// # Errors
    ///
    /// Propagates a transmitter failure. The state is already `On` at that point.
    pub async fn render(&mut self, symbol: u8, color: Color) -> Result<RenderOutcome> {
        let Some(pattern) = lookup(symbol) else {
            return Ok(RenderOutcome::Ignored);
        };
        self.state = AnimationState::On { symbol, color };
        self.send(Frame::from_pattern(pattern, color)).await?;
        Ok(RenderOutcome::Rendered)
    }

    /// Turns every LED off. Always transmits, even when already off.
    ///
    /// # Errors
    ///
    /// Propagates a transmitter failure. The state is already `Off` at that point.
    pub async fn clear(&mut self) -> Result<()> {
        self.state = AnimationState::Off;
        self.send(Frame::new()).await
    }

    /// Runs one decoded command.
    ///
    /// # Errors
    ///
    /// Propagates a transmitter failure.
    pub async fn apply(&mut self, command: Command) -> Result<RenderOutcome> {
        match command {
            Command::Digit(symbol) => self.render(symbol, DEFAULT_ON_COLOR).await,
            Command::PowerOn => self.render(POWER_ON_SYMBOL, DEFAULT_ON_COLOR).await,
            Command::PowerOff => {
                self.clear().await?;
                Ok(RenderOutcome::Rendered)
            }
        }
    }

    /// What the matrix is showing.
    #[must_use]
    pub const fn state(&self) -> AnimationState {
        self.state
    }

    /// The last frame handed to the transmitter, if any.
    #[must_use]
    pub const fn last_frame(&self) -> Option<&MatrixFrame> {
        self.last_frame.as_ref()
    }

    /// The owned transmitter.
    #[must_use]
    pub const fn transmitter(&self) -> &T {
        &self.transmitter
    }

    async fn send(&mut self, frame: MatrixFrame) -> Result<()> {
        self.last_frame = Some(frame);
        self.transmitter.transmit(&frame).await
    }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;

    use super::{AnimationController, AnimationState, Command, DEFAULT_ON_COLOR, RenderOutcome};
    use crate::Result;
    use crate::color::{Color, ColorWord, to_word};
    use crate::frame::{Frame, MatrixFrame};
    use crate::grid::MATRIX_LEN;
    use crate::pattern::DIGIT_PATTERNS;
    use crate::ws2812::Transmit;

    #[derive(Default)]
    struct Recorder {
        frames: heapless::Vec<MatrixFrame, 8>,
    }

    impl Transmit<MATRIX_LEN> for Recorder {
        async fn transmit(&mut self, frame: &MatrixFrame) -> Result<()> {
            assert!(self.frames.push(*frame).is_ok(), "recorder full");
            Ok(())
        }
    }

    fn controller() -> AnimationController<Recorder> {
        AnimationController::new(Recorder::default())
    }

    #[test]
    fn commands_decode_from_console_bytes() {
        assert_eq!(Command::from_received(b'7'), Some(Command::Digit(7)));
        assert_eq!(Command::from_received(b'l'), Some(Command::PowerOn));
        assert_eq!(Command::from_received(b'L'), Some(Command::PowerOn));
        assert_eq!(Command::from_received(b'd'), Some(Command::PowerOff));
        assert_eq!(Command::from_received(b'D'), Some(Command::PowerOff));
        assert_eq!(Command::from_received(b'x'), None);
        assert_eq!(Command::from_received(b'\n'), None);
    }

    #[test]
    fn render_paints_lit_cells_only() {
        let mut controller = controller();
        let outcome = block_on(controller.render(1, DEFAULT_ON_COLOR));
        assert!(matches!(outcome, Ok(RenderOutcome::Rendered)));
        assert_eq!(
            controller.state(),
            AnimationState::On {
                symbol: 1,
                color: DEFAULT_ON_COLOR
            }
        );

        let word = to_word(DEFAULT_ON_COLOR);
        let frame = controller.transmitter().frames[0];
        for (index, slot) in frame.iter().enumerate() {
            let expected = if DIGIT_PATTERNS[1].is_lit(index) {
                word
            } else {
                ColorWord::ZERO
            };
            assert_eq!(*slot, expected, "LED {index}");
        }
    }

    #[test]
    fn invalid_symbol_changes_nothing() {
        let mut controller = controller();
        assert!(block_on(controller.render(3, Color::WHITE)).is_ok());
        let outcome = block_on(controller.render(10, Color::WHITE));
        assert!(matches!(outcome, Ok(RenderOutcome::Ignored)));
        assert_eq!(controller.transmitter().frames.len(), 1);
        assert!(matches!(
            controller.state(),
            AnimationState::On { symbol: 3, .. }
        ));
    }

    #[test]
    fn clear_always_retransmits() {
        let mut controller = controller();
        assert!(block_on(controller.clear()).is_ok());
        assert!(block_on(controller.clear()).is_ok());
        let frames = &controller.transmitter().frames;
        assert_eq!(frames.len(), 2);
        assert!(frames.iter().all(Frame::is_dark));
        assert_eq!(controller.state(), AnimationState::Off);
    }

    #[test]
    fn power_on_shows_symbol_zero() {
        let mut controller = controller();
        assert!(block_on(controller.apply(Command::Digit(5))).is_ok());
        assert!(block_on(controller.apply(Command::PowerOff)).is_ok());
        assert!(block_on(controller.apply(Command::PowerOn)).is_ok());
        assert!(matches!(
            controller.state(),
            AnimationState::On { symbol: 0, .. }
        ));
        assert_eq!(
            controller.last_frame(),
            Some(&Frame::from_pattern(&DIGIT_PATTERNS[0], DEFAULT_ON_COLOR))
        );
    }
}
