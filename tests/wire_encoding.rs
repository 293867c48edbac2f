#![allow(missing_docs)]
//! Host-level tests for the WS2812 pulse encoding of whole frames.

use digit_matrix::Error;
use digit_matrix::color::{Color, ColorWord, to_word};
use digit_matrix::frame::{Frame, MatrixFrame};
use digit_matrix::pattern::lookup;
use digit_matrix::ws2812::{
    BIT_PERIOD_NS, CYCLES_PER_BIT, Pulse, decode_frame, encode_frame, frame_duration,
};

fn boundary_frame() -> Frame<12> {
    let words = [
        0x00_00_00, 0xFF_FF_FF, 0xAA_55_AA, 0x55_AA_55, 0x80_00_00, 0x01_00_00, 0x00_80_00,
        0x00_01_00, 0x00_00_80, 0x00_00_01, 0x00_4D_00, 0x12_34_56,
    ];
    Frame::from(words.map(ColorWord::from_bits))
}

#[test]
fn frames_survive_the_wire() {
    let frame = boundary_frame();
    let decoded = decode_frame::<12>(encode_frame(&frame));
    assert!(matches!(decoded, Ok(decoded) if decoded == frame));
}

#[test]
fn digit_frames_survive_the_wire() {
    for symbol in 0..10 {
        let Some(pattern) = lookup(symbol) else {
            panic!("digit {symbol} missing");
        };
        let frame: MatrixFrame = Frame::from_pattern(pattern, Color::new(0.3, 0.0, 0.0));
        let decoded = decode_frame::<25>(encode_frame(&frame));
        assert!(matches!(decoded, Ok(decoded) if decoded == frame), "digit {symbol}");
    }
}

#[test]
fn every_pulse_is_one_bit_period() {
    let frame = boundary_frame();
    let mut count = 0;
    for pulse in encode_frame(&frame) {
        assert_eq!(pulse.high_cycles + pulse.low_cycles, CYCLES_PER_BIT);
        assert!(pulse == Pulse::ONE || pulse == Pulse::ZERO);
        count += 1;
    }
    assert_eq!(count, 12 * 24);
    assert!(Pulse::ONE.high_ns() * 2 > BIT_PERIOD_NS);
    assert!(Pulse::ZERO.high_ns() * 2 < BIT_PERIOD_NS);
}

#[test]
fn dim_red_word_bits() {
    let word = to_word(Color::new(0.3, 0.0, 0.0));
    let frame = Frame::<1>::filled(word);
    let bits: Vec<bool> = encode_frame(&frame).map(|pulse| pulse == Pulse::ONE).collect();
    // Green byte first, then red 77 = 0b0100_1101, then blue.
    let expected_red = [false, true, false, false, true, true, false, true];
    assert!(bits[..8].iter().all(|&bit| !bit));
    assert_eq!(&bits[8..16], &expected_red);
    assert!(bits[16..].iter().all(|&bit| !bit));
}

#[test]
fn frame_sized_streams_only() {
    let frame = boundary_frame();
    let short = encode_frame(&frame).take(12 * 24 - 1);
    assert!(matches!(
        decode_frame::<12>(short),
        Err(Error::PulseStreamTruncated { bits: 287 })
    ));
    assert!(matches!(
        decode_frame::<11>(encode_frame(&frame)),
        Err(Error::PulseStreamTooLong { capacity: 11 })
    ));
    // A few stray bits past the last word are extra, not missing.
    let one_word = Frame::<1>::filled(ColorWord::MAX);
    let with_stray_bits = encode_frame(&one_word).chain(std::iter::repeat_n(Pulse::ZERO, 5));
    assert!(matches!(
        decode_frame::<1>(with_stray_bits),
        Err(Error::PulseStreamTooLong { capacity: 1 })
    ));
}

#[test]
fn back_to_back_frames_respect_the_reset_gap() {
    let one_led = frame_duration(1);
    assert_eq!(one_led.as_micros(), 30 + 55);
    assert!(frame_duration(25) > frame_duration(24));
}
