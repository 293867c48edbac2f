//! A whole-grid transmission frame: one [`ColorWord`] per LED, in wiring order.

use core::ops::{Deref, DerefMut};

use crate::color::{Color, ColorWord, to_word};
use crate::grid::MATRIX_LEN;
use crate::pattern::Pattern;

/// Color words for every LED on the chain, in the order they go out on the wire.
///
/// Frames deref to `[ColorWord; N]`. There are no partial updates: every transmission
/// sends a complete frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame<const N: usize>(pub [ColorWord; N]);

/// A frame sized for the board's matrix.
pub type MatrixFrame = Frame<MATRIX_LEN>;

impl<const N: usize> Frame<N> {
    /// Number of LEDs in this frame.
    pub const LEN: usize = N;

    /// Create a new blank (all zero) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([ColorWord::ZERO; N])
    }

    /// Create a frame filled with a single color word.
    #[must_use]
    pub const fn filled(word: ColorWord) -> Self {
        Self([word; N])
    }

    /// Paints `color` onto the lit cells of `pattern`, dimmed by each cell's intensity.
    /// Unlit cells get [`ColorWord::ZERO`].
    #[must_use]
    pub fn from_pattern(pattern: &Pattern<N>, color: Color) -> Self {
        let word = to_word(color);
        let mut frame = Self::new();
        for (slot, &intensity) in frame.iter_mut().zip(pattern.iter()) {
            *slot = word.scaled(intensity);
        }
        frame
    }

    /// Whether every word in the frame is [`ColorWord::ZERO`].
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.iter().all(|&word| word == ColorWord::ZERO)
    }
}

impl<const N: usize> Deref for Frame<N> {
    type Target = [ColorWord; N];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const N: usize> DerefMut for Frame<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const N: usize> From<[ColorWord; N]> for Frame<N> {
    fn from(array: [ColorWord; N]) -> Self {
        Self(array)
    }
}

impl<const N: usize> Default for Frame<N> {
    fn default() -> Self {
        Self::new()
    }
}
