#![allow(missing_docs)]
//! Host-level tests for the animation controller against a recording transmitter.

use digit_matrix::Result;
use digit_matrix::animation::{
    AnimationController, AnimationState, Command, DEFAULT_ON_COLOR, RenderOutcome,
};
use digit_matrix::color::{Color, ColorWord, to_word};
use digit_matrix::frame::{Frame, MatrixFrame};
use digit_matrix::grid::MATRIX_LEN;
use digit_matrix::pattern::{DIGIT_PATTERNS, lookup};
use digit_matrix::ws2812::Transmit;
use embassy_futures::block_on;

#[derive(Default)]
struct RecordingTransmitter {
    frames: Vec<MatrixFrame>,
}

impl Transmit<MATRIX_LEN> for RecordingTransmitter {
    async fn transmit(&mut self, frame: &MatrixFrame) -> Result<()> {
        self.frames.push(*frame);
        Ok(())
    }
}

fn new_controller() -> AnimationController<RecordingTransmitter> {
    AnimationController::new(RecordingTransmitter::default())
}

fn frames(controller: &AnimationController<RecordingTransmitter>) -> &[MatrixFrame] {
    &controller.transmitter().frames
}

#[test]
fn render_then_clear_ends_dark() {
    for symbol in 0..10 {
        for color in [Color::WHITE, DEFAULT_ON_COLOR, Color::new(0.1, 0.9, 0.4)] {
            let mut controller = new_controller();
            assert!(block_on(controller.render(symbol, color)).is_ok());
            assert!(block_on(controller.clear()).is_ok());
            let sent = frames(&controller);
            assert_eq!(sent.len(), 2);
            assert!(sent[1].is_dark());
            assert_eq!(controller.state(), AnimationState::Off);
        }
    }
}

#[test]
fn renders_do_not_bleed_into_each_other() {
    let color = Color::new(0.5, 0.25, 0.0);
    for first in 0..10 {
        for second in 0..10 {
            let mut chained = new_controller();
            assert!(block_on(chained.render(first, color)).is_ok());
            assert!(block_on(chained.render(second, color)).is_ok());

            let mut fresh = new_controller();
            assert!(block_on(fresh.render(second, color)).is_ok());

            assert_eq!(chained.last_frame(), fresh.last_frame());
            assert_eq!(chained.state(), fresh.state());
        }
    }
}

#[test]
fn one_transmit_per_operation() {
    let mut controller = new_controller();
    let commands = [
        Command::Digit(3),
        Command::PowerOff,
        Command::PowerOff,
        Command::PowerOn,
        Command::Digit(9),
    ];
    for command in commands {
        assert!(matches!(
            block_on(controller.apply(command)),
            Ok(RenderOutcome::Rendered)
        ));
    }
    assert_eq!(frames(&controller).len(), commands.len());
    assert_eq!(frames(&controller)[1], frames(&controller)[2]);
}

#[test]
fn console_bytes_drive_the_matrix() {
    let mut controller = new_controller();
    for byte in *b"7xL?d" {
        if let Some(command) = Command::from_received(byte) {
            assert!(block_on(controller.apply(command)).is_ok());
        }
    }
    // '7', 'L', and 'd' transmit; 'x' and '?' never reach the controller.
    let sent = frames(&controller);
    assert_eq!(sent.len(), 3);
    assert_eq!(
        sent[0],
        Frame::from_pattern(&DIGIT_PATTERNS[7], DEFAULT_ON_COLOR)
    );
    assert_eq!(
        sent[1],
        Frame::from_pattern(&DIGIT_PATTERNS[0], DEFAULT_ON_COLOR)
    );
    assert!(sent[2].is_dark());
}

#[test]
fn digit_one_lights_exactly_its_cells() {
    let mut controller = new_controller();
    assert!(block_on(controller.apply(Command::Digit(1))).is_ok());
    let Some(pattern) = lookup(1) else {
        panic!("digit 1 missing");
    };
    let word = to_word(DEFAULT_ON_COLOR);
    assert_eq!((word.green(), word.red(), word.blue()), (0, 77, 0));

    let sent = frames(&controller);
    let lit: Vec<usize> = (0..MATRIX_LEN).filter(|&index| pattern.is_lit(index)).collect();
    assert_eq!(lit.len(), 8);
    for (index, slot) in sent[0].iter().enumerate() {
        if lit.contains(&index) {
            assert_eq!(*slot, word);
        } else {
            assert_eq!(*slot, ColorWord::ZERO);
        }
    }
}

#[test]
fn out_of_range_symbol_is_a_no_op() {
    let mut controller = new_controller();
    assert!(matches!(
        block_on(controller.render(42, Color::WHITE)),
        Ok(RenderOutcome::Ignored)
    ));
    assert!(frames(&controller).is_empty());
    assert_eq!(controller.state(), AnimationState::Off);
    assert!(controller.last_frame().is_none());
}
