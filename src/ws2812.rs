//! WS2812 bit-serial encoding: the pulse timing model and the transmitter seam.
//!
//! Each color word goes out most-significant bit first. Every bit occupies one bit period of
//! [`CYCLES_PER_BIT`] PIO cycles at 800 kHz (1.25 µs), split into a high and a low phase:
//!
//! ```text
//!          |<------- 10 cycles ------->|
//! "1"   ___|‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾|______|___   high T1+T2 = 7, low T3 = 3
//! "0"   ___|‾‾‾‾‾‾|____________________|___   high T1 = 2, low T2+T3 = 8
//! ```
//!
//! After the last bit the line idles low for at least [`RESET_GAP_US`] so the chain latches
//! the frame. The target transmitter, [`Ws2812Pio`], runs the same T1/T2/T3 timing on a PIO
//! state machine; the functions here model it so the encoding can be checked on the host.

#[cfg(not(feature = "host"))]
mod pio_transmitter;

#[cfg(not(feature = "host"))]
pub use pio_transmitter::{PioBus, Ws2812Pio};

use embassy_time::Duration;

use crate::Result;
use crate::color::ColorWord;
use crate::error::Error;
use crate::frame::Frame;

/// Cycles the line is high at the start of every bit.
pub const T1: u8 = 2;
/// Cycles that are high for a "1" and low for a "0".
pub const T2: u8 = 5;
/// Cycles the line is low at the end of every bit.
pub const T3: u8 = 3;
/// PIO cycles per transmitted bit.
pub const CYCLES_PER_BIT: u8 = T1 + T2 + T3;

/// Nominal WS2812 bit rate.
pub const BIT_RATE_KHZ: u32 = 800;

/// Length of one bit period in nanoseconds.
pub const BIT_PERIOD_NS: u64 = 1_000_000 / BIT_RATE_KHZ as u64;

/// Idle time after a frame before the chain accepts the next one. WS2812 needs at least 50 µs.
pub const RESET_GAP_US: u64 = 55;

/// How long to wait once the TX FIFO reads empty before the frame counts as latched.
///
/// The last word may have only just left the FIFO, so this covers its full 24 bits, a final
/// "1" high phase, the reset gap, and one timer tick (a timer may fire up to a tick early).
pub const LATCH_WAIT_US: u64 = (ColorWord::BITS as u64 * BIT_PERIOD_NS + Pulse::ONE.high_ns())
    .div_ceil(1_000)
    + RESET_GAP_US
    + 1;

/// One bit on the wire, measured in PIO cycles.
#[derive(Clone, Copy, Debug, Eq, PartialEq, defmt::Format)]
pub struct Pulse {
    /// Cycles spent high at the start of the bit period.
    pub high_cycles: u8,
    /// Cycles spent low at the end of the bit period.
    pub low_cycles: u8,
}

impl Pulse {
    /// The pulse shape of a "1" bit.
    pub const ONE: Self = Self {
        high_cycles: T1 + T2,
        low_cycles: T3,
    };

    /// The pulse shape of a "0" bit.
    pub const ZERO: Self = Self {
        high_cycles: T1,
        low_cycles: T2 + T3,
    };

    /// High phase duration in nanoseconds.
    #[must_use]
    pub const fn high_ns(self) -> u64 {
        self.high_cycles as u64 * BIT_PERIOD_NS / CYCLES_PER_BIT as u64
    }

    /// Low phase duration in nanoseconds.
    #[must_use]
    pub const fn low_ns(self) -> u64 {
        self.low_cycles as u64 * BIT_PERIOD_NS / CYCLES_PER_BIT as u64
    }
}

/// The pulse that encodes `bit`.
#[must_use]
pub const fn pulse_for_bit(bit: bool) -> Pulse {
    if bit { Pulse::ONE } else { Pulse::ZERO }
}

/// The 24 pulses of one color word, most-significant bit first.
pub fn encode_word(word: ColorWord) -> impl Iterator<Item = Pulse> {
    (0..ColorWord::BITS)
        .rev()
        .map(move |shift| pulse_for_bit((word.bits() >> shift) & 1 == 1))
}

/// Every pulse of a frame, in wiring order.
pub fn encode_frame<const N: usize>(frame: &Frame<N>) -> impl Iterator<Item = Pulse> + '_ {
    frame.iter().flat_map(|&word| encode_word(word))
}

/// Classifies a pulse: a high phase longer than half the bit period is a "1".
///
/// # Errors
///
/// Returns [`Error::MalformedPulse`] if the pulse does not span exactly one bit period.
pub fn decode_pulse(pulse: Pulse) -> Result<bool> {
    if u16::from(pulse.high_cycles) + u16::from(pulse.low_cycles) != u16::from(CYCLES_PER_BIT) {
        return Err(Error::MalformedPulse {
            high_cycles: pulse.high_cycles,
            low_cycles: pulse.low_cycles,
        });
    }
    Ok(u16::from(pulse.high_cycles) * 2 > u16::from(CYCLES_PER_BIT))
}

/// Rebuilds a frame from the pulses a receiver would see.
///
/// # Errors
///
/// Returns [`Error::PulseStreamTruncated`] if the stream stops short of `N` full words,
/// [`Error::PulseStreamTooLong`] if it carries even one bit more, and [`Error::MalformedPulse`] for a
/// pulse that is not one bit period long.
pub fn decode_frame<const N: usize>(pulses: impl IntoIterator<Item = Pulse>) -> Result<Frame<N>> {
    let mut frame = Frame::<N>::new();
    let capacity_bits = N * ColorWord::BITS as usize;
    let mut bit_count = 0_usize;
    let mut accumulator = 0_u32;

    for pulse in pulses {
        if bit_count == capacity_bits {
            return Err(Error::PulseStreamTooLong { capacity: N });
        }
        accumulator = (accumulator << 1) | u32::from(decode_pulse(pulse)?);
        bit_count += 1;
        if bit_count % ColorWord::BITS as usize == 0 {
            let word_index = bit_count / ColorWord::BITS as usize - 1;
            if let Some(slot) = frame.get_mut(word_index) {
                *slot = ColorWord::from_bits(accumulator);
            }
            accumulator = 0;
        }
    }

    if bit_count < capacity_bits {
        return Err(Error::PulseStreamTruncated { bits: bit_count });
    }
    Ok(frame)
}

/// Wire time for a frame of `len` LEDs, including the reset gap.
#[must_use]
pub const fn frame_duration(len: usize) -> Duration {
    let bits = len as u64 * ColorWord::BITS as u64;
    Duration::from_nanos(bits * BIT_PERIOD_NS + RESET_GAP_US * 1_000)
}

/// Sends whole frames down the LED chain.
///
/// Implementations return only after the frame and its reset gap are complete, so callers
/// may transmit again immediately. The LEDs never acknowledge, so `Ok(())` means "sent",
/// not "displayed".
pub trait Transmit<const N: usize> {
    /// Streams `frame` to the chain.
    ///
    /// # Errors
    ///
    /// Implementations report only configuration failures; the wire itself cannot fail.
    async fn transmit(&mut self, frame: &Frame<N>) -> Result<()>;
}
