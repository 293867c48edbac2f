//! Firmware library for a Pico 1 board with a 5×5 WS2812 digit matrix, an SSD1306 status
//! display, two push-buttons with indicator LEDs, and a serial command console.
//!
//! The matrix path runs leaves first:
//!
//! - [`grid`]: how `(x, y)` cells map onto the LED chain's wiring order.
//! - [`pattern`]: the digit glyphs, stored in wiring order.
//! - [`color`]: logical colors to 24-bit GRB [`ColorWord`](color::ColorWord)s.
//! - [`frame`]: one color word per LED, always whole-grid.
//! - [`ws2812`]: the bit timing model and the PIO transmitter.
//! - [`animation`]: the controller that owns the transmitter and the on/off state.
//!
//! [`button`], [`status`], [`serial_console`], and `display` are the glue around it.
//!
//! # Glossary
//!
//! - **PIO ([Programmable I/O](https://medium.com/data-science/nine-pico-pio-wats-with-rust-part-1-9d062067dc25)):**
//!   small state machines that generate the WS2812 pulses without CPU timing.
//! - **Reset gap:** the idle-low period after a frame that makes the chain latch it.
#![cfg_attr(not(feature = "host"), no_std)]
#![cfg_attr(not(feature = "host"), no_main)]
#![allow(async_fn_in_trait, reason = "single-threaded embedded")]

// Compile-time checks: the board must be selected (unless testing with host feature)
#[cfg(all(not(feature = "pico1"), not(feature = "host")))]
compile_error!("Must enable the board feature 'pico1' (or 'host' for tests)");

#[cfg(all(not(feature = "arm"), not(feature = "host")))]
compile_error!("Must enable the architecture feature 'arm' (or 'host' for tests)");

#[cfg(all(feature = "pico1", feature = "host"))]
compile_error!("Cannot enable both 'pico1' and 'host' features simultaneously");

pub mod animation;
pub mod button;
pub mod color;
#[cfg(not(feature = "host"))]
pub mod display;
mod error;
pub mod frame;
pub mod grid;
// Interrupt bindings shared by the PIO transmitter and the console UART
#[cfg(not(feature = "host"))]
#[doc(hidden)]
pub mod irqs;
pub mod pattern;
pub mod serial_console;
pub mod status;
pub mod ws2812;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
