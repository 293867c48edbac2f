//! Static per-digit intensity masks for the LED matrix.
//!
//! Glyphs are written in visual order (top row first, left to right) and converted at
//! compile time into wiring order through [`MATRIX_LAYOUT`], so a [`Pattern`] can be zipped
//! directly against a [`Frame`](crate::frame::Frame).

use core::ops::Deref;

use crate::grid::{GridLayout, MATRIX_HEIGHT, MATRIX_LAYOUT, MATRIX_LEN, MATRIX_WIDTH};

/// Intensity of a fully lit cell.
pub const LIT: u8 = u8::MAX;

/// Intensity of an unlit cell.
pub const UNLIT: u8 = 0;

/// Number of symbols in the pattern table (digits `0..=9`).
pub const SYMBOL_COUNT: usize = 10;

/// Per-cell intensity mask, in wiring order.
///
/// Derefs to `[u8; N]`. Intensity `0` is unlit and `255` is fully lit; values in between
/// dim the cell proportionally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pattern<const N: usize>([u8; N]);

/// A pattern sized for the board's matrix.
pub type MatrixPattern = Pattern<MATRIX_LEN>;

impl<const N: usize> Pattern<N> {
    /// Number of cells in this pattern.
    pub const LEN: usize = N;

    /// A pattern with every cell unlit.
    pub const BLANK: Self = Self([UNLIT; N]);

    /// Wraps intensities that are already in wiring order.
    #[must_use]
    pub const fn new(intensities: [u8; N]) -> Self {
        Self(intensities)
    }

    /// Builds a pattern from ASCII art rows, top row first: `#` is lit, anything else unlit.
    ///
    /// ```rust,no_run
    /// use digit_matrix::grid::GridLayout;
    /// use digit_matrix::pattern::{LIT, Pattern, UNLIT};
    ///
    /// const LAYOUT: GridLayout<4, 2, 2> = GridLayout::serpentine_row_major();
    /// const DIAGONAL: Pattern<4> = Pattern::from_ascii([b"#.", b".#"], &LAYOUT);
    /// // LED order: (0,0) (1,0) (1,1) (0,1)
    /// assert_eq!(*DIAGONAL, [LIT, UNLIT, LIT, UNLIT]);
    /// ```
    #[must_use]
    pub const fn from_ascii<const W: usize, const H: usize>(
        rows: [&[u8; W]; H],
        layout: &GridLayout<N, W, H>,
    ) -> Self {
        let mut intensities = [UNLIT; N];
        let map = layout.index_to_xy();
        let mut led_index = 0;
        while led_index < N {
            let (x, y) = map[led_index];
            if rows[y as usize][x as usize] == b'#' {
                intensities[led_index] = LIT;
            }
            led_index += 1;
        }
        Self(intensities)
    }

    /// Intensity of the cell at `index` in wiring order, or `None` if out of range.
    #[must_use]
    pub fn intensity(&self, index: usize) -> Option<u8> {
        self.0.get(index).copied()
    }

    /// Whether the cell at `index` is lit at all.
    #[must_use]
    pub fn is_lit(&self, index: usize) -> bool {
        self.intensity(index).is_some_and(|intensity| intensity > UNLIT)
    }

    /// Number of cells with nonzero intensity.
    #[must_use]
    pub fn lit_count(&self) -> usize {
        self.0.iter().filter(|&&intensity| intensity > UNLIT).count()
    }
}

impl<const N: usize> Deref for Pattern<N> {
    type Target = [u8; N];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const N: usize> Default for Pattern<N> {
    fn default() -> Self {
        Self::BLANK
    }
}

const fn glyph(rows: [&[u8; MATRIX_WIDTH]; MATRIX_HEIGHT]) -> MatrixPattern {
    Pattern::from_ascii(rows, &MATRIX_LAYOUT)
}

/// The digit glyphs, indexed by digit.
pub const DIGIT_PATTERNS: [MatrixPattern; SYMBOL_COUNT] = [
    glyph([b".###.", b"#...#", b"#...#", b"#...#", b".###."]),
    glyph([b"..#..", b".##..", b"..#..", b"..#..", b".###."]),
    glyph([b".###.", b"....#", b".###.", b"#....", b"#####"]),
    glyph([b"####.", b"....#", b".###.", b"....#", b"####."]),
    glyph([b"#...#", b"#...#", b"#####", b"....#", b"....#"]),
    glyph([b"#####", b"#....", b"####.", b"....#", b"####."]),
    glyph([b".###.", b"#....", b"####.", b"#...#", b".###."]),
    glyph([b"#####", b"....#", b"...#.", b"..#..", b"..#.."]),
    glyph([b".###.", b"#...#", b".###.", b"#...#", b".###."]),
    glyph([b".###.", b"#...#", b".####", b"....#", b".###."]),
];

/// Returns the pattern for `symbol`, or `None` when `symbol` is not a digit `0..=9`.
#[must_use]
pub fn lookup(symbol: u8) -> Option<&'static MatrixPattern> {
    DIGIT_PATTERNS.get(usize::from(symbol))
}
