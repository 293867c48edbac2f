//! Conversion from logical colors to WS2812 color words.
//!
//! A [`Color`] is three `f32` channel intensities in `[0.0, 1.0]`. [`to_word`] clamps them,
//! scales them to 8 bits, runs them through the compile-time correction table (gamma curve
//! plus brightness cap), and packs the result into a [`ColorWord`] in the green-red-blue
//! order the LEDs expect on the wire.

use smart_leds::RGB8;

// ============================================================================
// Gamma Correction
// ============================================================================

/// Gamma correction mode applied by [`to_word`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, defmt::Format)]
pub enum Gamma {
    /// Linear gamma (no correction). Gamma = 1.0
    #[default]
    Linear,
    /// Standard gamma 2.2 correction for perceived brightness.
    Gamma2_2,
}

/// Gamma curve used for every color word this firmware sends.
///
/// Linear, so a channel at 0.3 goes out as 77.
pub const COLOR_GAMMA: Gamma = Gamma::Linear;

/// Brightness cap (0–255) applied after gamma correction.
pub const MAX_BRIGHTNESS: u8 = u8::MAX;

/// Gamma 2.2 lookup table for 8-bit values: `corrected = (value/255)^2.2 * 255`.
pub(crate) const GAMMA_2_2_TABLE: [u8; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2,
    3, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 6, 6, 6, 6, 7, 7, 7, 8, 8, 8, 9, 9, 9, 10, 10, 11, 11,
    11, 12, 12, 13, 13, 13, 14, 14, 15, 15, 16, 16, 17, 17, 18, 18, 19, 19, 20, 20, 21, 22, 22, 23,
    23, 24, 25, 25, 26, 26, 27, 28, 28, 29, 30, 30, 31, 32, 33, 33, 34, 35, 35, 36, 37, 38, 39, 39,
    40, 41, 42, 43, 43, 44, 45, 46, 47, 48, 49, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61,
    62, 63, 64, 65, 66, 67, 68, 69, 70, 71, 73, 74, 75, 76, 77, 78, 79, 81, 82, 83, 84, 85, 87, 88,
    89, 90, 91, 93, 94, 95, 97, 98, 99, 100, 102, 103, 105, 106, 107, 109, 110, 111, 113, 114, 116,
    117, 119, 120, 121, 123, 124, 126, 127, 129, 130, 132, 133, 135, 137, 138, 140, 141, 143, 145,
    146, 148, 149, 151, 153, 154, 156, 158, 159, 161, 163, 165, 166, 168, 170, 172, 173, 175, 177,
    179, 181, 182, 184, 186, 188, 190, 192, 194, 196, 197, 199, 201, 203, 205, 207, 209, 211, 213,
    215, 217, 219, 221, 223, 225, 227, 229, 231, 234, 236, 238, 240, 242, 244, 246, 248, 251, 253,
    255,
];

/// Generate a combined gamma correction and brightness scaling lookup table.
///
/// `table[level]` is `gamma(level)` scaled by `max_brightness / 255`. Both steps are
/// monotonic, so the table is too.
#[must_use]
pub const fn generate_combo_table(gamma: Gamma, max_brightness: u8) -> [u8; 256] {
    let mut result = [0_u8; 256];
    let mut index = 0;
    while index < 256 {
        let gamma_corrected = match gamma {
            Gamma::Linear => index as u8,
            Gamma::Gamma2_2 => GAMMA_2_2_TABLE[index],
        };
        result[index] = ((gamma_corrected as u16 * max_brightness as u16) / 255) as u8;
        index += 1;
    }
    result
}

const CORRECTION_TABLE: [u8; 256] = generate_combo_table(COLOR_GAMMA, MAX_BRIGHTNESS);

// ============================================================================
// Color
// ============================================================================

/// A logical color: each channel is an intensity in `[0.0, 1.0]`.
///
/// Out-of-range channels are clamped by [`to_word`], not rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq, defmt::Format)]
pub struct Color {
    /// Red intensity.
    pub r: f32,
    /// Green intensity.
    pub g: f32,
    /// Blue intensity.
    pub b: f32,
}

impl Color {
    /// All channels off.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    /// All channels fully on.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Creates a color from channel intensities.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Maps a channel intensity to an 8-bit level: clamp to `[0, 1]`, scale, round.
///
/// NaN maps to 0.
#[must_use]
pub fn channel_level(intensity: f32) -> u8 {
    if intensity.is_nan() {
        return 0;
    }
    let clamped = intensity.clamp(0.0, 1.0);
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "clamped to [0, 255.5)"
    )]
    let level = (clamped * 255.0 + 0.5) as u8;
    level
}

/// Converts a logical color to its on-the-wire color word.
///
/// Deterministic and monotonic per channel. `to_word(Color::BLACK)` is [`ColorWord::ZERO`]
/// and, with the shipped linear policy, `to_word(Color::WHITE)` is [`ColorWord::MAX`].
#[must_use]
pub fn to_word(color: Color) -> ColorWord {
    let correct = |intensity: f32| CORRECTION_TABLE[usize::from(channel_level(intensity))];
    let pixel = RGB8::new(correct(color.r), correct(color.g), correct(color.b));
    ColorWord::from(pixel)
}

// ============================================================================
// ColorWord
// ============================================================================

/// A 24-bit WS2812 color word: green, red, blue, 8 bits each, sent most-significant bit first.
///
/// Bits 23..16 hold green, 15..8 red, 7..0 blue. Only [`to_word`] and the frame builders
/// construct these from colors; decoding a pulse stream rebuilds them from raw bits.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, defmt::Format)]
pub struct ColorWord(u32);

impl ColorWord {
    /// Number of bits a color word occupies on the wire.
    pub const BITS: u32 = 24;

    /// Every LED channel off.
    pub const ZERO: Self = Self(0);

    /// Every LED channel at full level.
    pub const MAX: Self = Self(0x00FF_FFFF);

    /// Packs three channel levels in wire order.
    #[must_use]
    pub const fn from_grb(green: u8, red: u8, blue: u8) -> Self {
        Self(((green as u32) << 16) | ((red as u32) << 8) | blue as u32)
    }

    /// Rebuilds a word from its low 24 bits; higher bits are dropped.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits & Self::MAX.0)
    }

    /// The 24 wire bits, right-aligned.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// The word left-aligned in 32 bits, as the PIO shifts it out of its OSR.
    #[must_use]
    pub const fn fifo_word(self) -> u32 {
        self.0 << 8
    }

    /// Green channel level.
    #[must_use]
    pub const fn green(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Red channel level.
    #[must_use]
    pub const fn red(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel level.
    #[must_use]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Dims every channel by a cell intensity (255 keeps the word, 0 zeroes it).
    #[must_use]
    pub const fn scaled(self, intensity: u8) -> Self {
        Self::from_grb(
            scale(self.green(), intensity),
            scale(self.red(), intensity),
            scale(self.blue(), intensity),
        )
    }
}

/// Reorders an 8-bit RGB pixel into wire order. No correction is applied.
impl From<RGB8> for ColorWord {
    fn from(pixel: RGB8) -> Self {
        Self::from_grb(pixel.g, pixel.r, pixel.b)
    }
}

const fn scale(value: u8, intensity: u8) -> u8 {
    ((value as u16 * intensity as u16) / 255) as u8
}

#[cfg(test)]
mod tests {
    use smart_leds::colors;

    use super::{Color, ColorWord, Gamma, channel_level, generate_combo_table, to_word};

    #[test]
    fn black_and_white_hit_the_word_extremes() {
        assert_eq!(to_word(Color::BLACK), ColorWord::ZERO);
        assert_eq!(to_word(Color::WHITE), ColorWord::MAX);
    }

    #[test]
    fn dim_red_lands_in_the_red_byte() {
        let word = to_word(Color::new(0.3, 0.0, 0.0));
        assert_eq!((word.green(), word.red(), word.blue()), (0, 77, 0));
        assert_eq!(word.bits(), 0x00_4D_00);
        assert_eq!(word.fifo_word(), 0x00_4D_00_00);
    }

    #[test]
    fn out_of_range_channels_are_clamped() {
        assert_eq!(channel_level(-3.0), 0);
        assert_eq!(channel_level(7.5), 255);
        assert_eq!(channel_level(f32::NAN), 0);
        assert_eq!(to_word(Color::new(2.0, -1.0, 1.0)), to_word(Color::new(1.0, 0.0, 1.0)));
    }

    #[test]
    fn each_channel_is_monotonic() {
        let mut previous = ColorWord::ZERO;
        for step in 0..=100_u8 {
            let intensity = f32::from(step) / 100.0;
            let red = to_word(Color::new(intensity, 0.0, 0.0));
            let green = to_word(Color::new(0.0, intensity, 0.0));
            let blue = to_word(Color::new(0.0, 0.0, intensity));
            assert!(red.red() >= previous.red());
            assert!(green.green() >= previous.green());
            assert!(blue.blue() >= previous.blue());
            previous = ColorWord::from_grb(green.green(), red.red(), blue.blue());
        }
    }

    #[test]
    fn gamma_and_brightness_tables_stay_monotonic() {
        let table = generate_combo_table(Gamma::Gamma2_2, 128);
        assert_eq!(table[0], 0);
        assert_eq!(table[255], 128);
        assert!(table.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn scaling_by_intensity() {
        let word = ColorWord::from_grb(200, 100, 50);
        assert_eq!(word.scaled(255), word);
        assert_eq!(word.scaled(0), ColorWord::ZERO);
        assert_eq!(word.scaled(128), ColorWord::from_grb(100, 50, 25));
    }

    #[test]
    fn rgb8_pixels_are_reordered_to_grb() {
        let word = ColorWord::from(colors::ORANGE);
        assert_eq!(word, ColorWord::from_grb(0xA5, 0xFF, 0x00));
        assert_eq!(word.fifo_word(), 0xA5_FF_00_00);
    }

    #[test]
    fn full_channels_match_the_named_pixels() {
        assert_eq!(to_word(Color::new(1.0, 0.0, 0.0)), ColorWord::from(colors::RED));
        assert_eq!(to_word(Color::WHITE), ColorWord::from(colors::WHITE));
    }
}
