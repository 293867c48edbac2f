//! Compile-time description of the LED matrix geometry and wiring.
//!
//! See [`GridLayout`] for how `(x, y)` cells map onto the order of LEDs on the data wire,
//! and [`MATRIX_LAYOUT`] for the wiring of the board's 5×5 matrix.

/// Number of columns on the board's LED matrix.
pub const MATRIX_WIDTH: usize = 5;

/// Number of rows on the board's LED matrix.
pub const MATRIX_HEIGHT: usize = 5;

/// Number of LEDs on the board's LED matrix.
pub const MATRIX_LEN: usize = MATRIX_WIDTH * MATRIX_HEIGHT;

/// Wiring of the board's 5×5 matrix.
///
/// The data wire enters at the bottom-right LED and snakes upward row by row:
///
/// ```text
///   LED24  LED23  LED22  LED21  LED20
///   LED15  LED16  LED17  LED18  LED19
///   LED14  LED13  LED12  LED11  LED10
///   LED5   LED6   LED7   LED8   LED9
///   LED4   LED3   LED2   LED1   LED0
/// ```
pub const MATRIX_LAYOUT: GridLayout<MATRIX_LEN, MATRIX_WIDTH, MATRIX_HEIGHT> =
    GridLayout::serpentine_row_major().rotate_180();

/// Compile-time description of grid geometry and wiring.
///
/// `GridLayout` maps each position in the LED chain (the order in which color words travel
/// down the data wire) to an `(x, y)` cell. Coordinates use a screen-style convention:
/// `(0, 0)` is the top-left corner, `x` increases to the right, and `y` increases downward.
///
/// Layouts are validated when they are built, which for `const` layouts means at compile
/// time: every coordinate must be in bounds, every cell must appear exactly once, and
/// `W * H` must equal `N`.
///
/// ```rust,no_run
/// use digit_matrix::grid::GridLayout;
///
/// const SERPENTINE: GridLayout<6, 3, 2> = GridLayout::serpentine_row_major();
/// const EXPECTED: GridLayout<6, 3, 2> =
///     GridLayout::new([(0, 0), (1, 0), (2, 0), (2, 1), (1, 1), (0, 1)]);
/// const _: () = assert!(SERPENTINE.equals(&EXPECTED));
/// ```
///
/// ```text
/// Strip snakes across rows (3×2 example):
///   LED0  LED1  LED2
///   LED5  LED4  LED3
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout<const N: usize, const W: usize, const H: usize> {
    map: [(u8, u8); N],
}

impl<const N: usize, const W: usize, const H: usize> GridLayout<N, W, H> {
    /// Builds a layout from the `(x, y)` cell of each LED, listed in wiring order.
    ///
    /// # Panics
    ///
    /// Panics (at compile time for `const` layouts) if a cell is out of bounds, repeated,
    /// or missing.
    #[must_use]
    pub const fn new(map: [(u8, u8); N]) -> Self {
        assert!(W > 0 && H > 0, "W and H must be positive");
        assert!(W * H == N, "W*H must equal N");
        assert!(W <= u8::MAX as usize && H <= u8::MAX as usize, "W and H must fit in u8");

        let mut seen = [false; N];
        let mut index = 0;
        while index < N {
            let (x, y) = map[index];
            let x = x as usize;
            let y = y as usize;
            assert!(x < W, "column out of bounds");
            assert!(y < H, "row out of bounds");

            let cell = y * W + x;
            assert!(!seen[cell], "duplicate (x, y) in layout");
            seen[cell] = true;
            index += 1;
        }

        let mut cell = 0;
        while cell < N {
            assert!(seen[cell], "layout does not cover every cell");
            cell += 1;
        }

        Self { map }
    }

    /// Serpentine row-major wiring: even rows run left-to-right, odd rows right-to-left.
    #[must_use]
    pub const fn serpentine_row_major() -> Self {
        assert!(W > 0 && H > 0, "W and H must be positive");
        assert!(W * H == N, "W*H must equal N");

        let mut map = [(0_u8, 0_u8); N];
        let mut y_index = 0;
        while y_index < H {
            let mut x_index = 0;
            while x_index < W {
                let led_index = if y_index % 2 == 0 {
                    y_index * W + x_index
                } else {
                    y_index * W + (W - 1 - x_index)
                };
                map[led_index] = (x_index as u8, y_index as u8);
                x_index += 1;
            }
            y_index += 1;
        }
        Self::new(map)
    }

    /// Plain row-major wiring: every row runs left-to-right.
    #[must_use]
    pub const fn row_major() -> Self {
        assert!(W > 0 && H > 0, "W and H must be positive");
        assert!(W * H == N, "W*H must equal N");

        let mut map = [(0_u8, 0_u8); N];
        let mut led_index = 0;
        while led_index < N {
            map[led_index] = ((led_index % W) as u8, (led_index / W) as u8);
            led_index += 1;
        }
        Self::new(map)
    }

    /// Rotate 90° clockwise (dims swap).
    #[must_use]
    pub const fn rotate_cw(self) -> GridLayout<N, H, W> {
        let mut out = [(0_u8, 0_u8); N];
        let mut index = 0;
        while index < N {
            let (x, y) = self.map[index];
            out[index] = ((H - 1 - y as usize) as u8, x);
            index += 1;
        }
        GridLayout::<N, H, W>::new(out)
    }

    /// Rotate 180°.
    #[must_use]
    pub const fn rotate_180(self) -> Self {
        self.rotate_cw().rotate_cw()
    }

    /// Flip horizontally (mirror columns).
    #[must_use]
    pub const fn flip_h(self) -> Self {
        let mut out = [(0_u8, 0_u8); N];
        let mut index = 0;
        while index < N {
            let (x, y) = self.map[index];
            out[index] = ((W - 1 - x as usize) as u8, y);
            index += 1;
        }
        Self::new(out)
    }

    /// Flip vertically (mirror rows).
    #[must_use]
    pub const fn flip_v(self) -> Self {
        let mut out = [(0_u8, 0_u8); N];
        let mut index = 0;
        while index < N {
            let (x, y) = self.map[index];
            out[index] = (x, (H - 1 - y as usize) as u8);
            index += 1;
        }
        Self::new(out)
    }

    /// Return the array mapping wiring order to `(x, y)` cells.
    #[must_use]
    pub const fn index_to_xy(&self) -> &[(u8, u8); N] {
        &self.map
    }

    /// Return the array mapping row-major cell number (`y * W + x`) to wiring order.
    #[must_use]
    pub const fn xy_to_index(&self) -> [u8; N] {
        assert!(N <= u8::MAX as usize + 1, "LED count must fit in u8 indexes");

        let mut inverse = [0_u8; N];
        let mut led_index = 0;
        while led_index < N {
            let (x, y) = self.map[led_index];
            inverse[y as usize * W + x as usize] = led_index as u8;
            led_index += 1;
        }
        inverse
    }

    /// Const equality helper for compile-time checks.
    #[must_use]
    pub const fn equals(&self, other: &Self) -> bool {
        let mut index = 0;
        while index < N {
            if self.map[index].0 != other.map[index].0 || self.map[index].1 != other.map[index].1
            {
                return false;
            }
            index += 1;
        }
        true
    }

    /// Number of columns in the layout.
    #[must_use]
    pub const fn width(&self) -> usize {
        W
    }

    /// Number of rows in the layout.
    #[must_use]
    pub const fn height(&self) -> usize {
        H
    }

    /// Total number of LEDs in the layout.
    #[must_use]
    pub const fn len(&self) -> usize {
        N
    }
}

#[cfg(test)]
mod tests {
    use super::{GridLayout, MATRIX_LAYOUT};

    #[test]
    fn matrix_starts_bottom_right_and_snakes_up() {
        let map = MATRIX_LAYOUT.index_to_xy();
        assert_eq!(map[0], (4, 4));
        assert_eq!(map[4], (0, 4));
        assert_eq!(map[5], (0, 3));
        assert_eq!(map[9], (4, 3));
        assert_eq!(map[10], (4, 2));
        assert_eq!(map[14], (0, 2));
        assert_eq!(map[24], (0, 0));
    }

    #[test]
    fn xy_to_index_inverts_index_to_xy() {
        let inverse = MATRIX_LAYOUT.xy_to_index();
        for (led_index, &(x, y)) in MATRIX_LAYOUT.index_to_xy().iter().enumerate() {
            assert_eq!(usize::from(inverse[usize::from(y) * 5 + usize::from(x)]), led_index);
        }
    }

    #[test]
    fn flips_compose_to_rotate_180() {
        const SERPENTINE: GridLayout<6, 3, 2> = GridLayout::serpentine_row_major();
        assert_eq!(SERPENTINE.flip_h().flip_v(), SERPENTINE.rotate_180());
    }

    #[test]
    fn row_major_rotated_cw() {
        const MAP: GridLayout<6, 3, 2> = GridLayout::row_major();
        let rotated = MAP.rotate_cw();
        assert_eq!(
            *rotated.index_to_xy(),
            [(1, 0), (1, 1), (1, 2), (0, 0), (0, 1), (0, 2)]
        );
    }
}
