/// Saturation of every non-base program color, in percent.
pub const SATURATION: f64 = 80.0;

/// Lightness of every non-base program color, in percent.
pub const LIGHTNESS: f64 = 80.0;

/// A cell color.
///
/// Colors are stored exactly rather than as pixels so they can be hashed and compared. A
/// program of length `n` hands out `White` to its first instruction and `Hsl { step: i, steps:
/// n - 1 }` to instruction `i`, which places it at hue `i / (n - 1) * 360`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// The reserved base color. Every cell starts out this way.
    White,

    /// A point on the hue circle, `step / steps` of the way around.
    Hsl { step: usize, steps: usize },
}

impl Color {
    /// Hue in degrees. `White` has no hue and returns `None`.
    pub fn hue(&self) -> Option<f64> {
        match *self {
            Color::White => None,
            Color::Hsl { step, steps } => Some(step as f64 / steps as f64 * 360.0),
        }
    }

    /// Convert to 8 bit RGB.
    ///
    /// See: https://en.wikipedia.org/wiki/HSL_and_HSV#HSL_to_RGB
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        let Some(hue) = self.hue() else {
            return (0xFF, 0xFF, 0xFF);
        };

        let s = SATURATION / 100.0;
        let l = LIGHTNESS / 100.0;

        let a = s * l.min(1.0 - l);
        let f = |n: f64| {
            let k = (n + hue / 30.0) % 12.0;
            let v = l - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0);

            (v * 255.0).round() as u8
        };

        (f(0.0), f(8.0), f(4.0))
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.hue() {
            None => write!(f, "white"),
            Some(hue) => write!(f, "hsl({hue}, {SATURATION}%, {LIGHTNESS}%)"),
        }
    }
}
