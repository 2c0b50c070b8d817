use image::Rgba;

/// An opaque RGB color. Alpha in the source buffer is ignored throughout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_rgba(pixel: &Rgba<u8>) -> Self {
        Self::new(pixel[0], pixel[1], pixel[2])
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }

    /// Euclidean distance in RGB space
    pub fn distance(self, other: Color) -> f64 {
        let dr = self.r as f64 - other.r as f64;
        let dg = self.g as f64 - other.g as f64;
        let db = self.b as f64 - other.b as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Perceptual brightness in [0.0, 1.0]
    ///
    /// Formula: L = (0.299*R + 0.587*G + 0.114*B) / 255
    ///
    /// Evaluated on integer weights so that black is exactly 0.0 and white
    /// exactly 1.0.
    pub fn luminance(self) -> f64 {
        let weighted = 299 * self.r as u32 + 587 * self.g as u32 + 114 * self.b as u32;
        weighted as f64 / 255_000.0
    }
}

/// Running per-channel sum used for block and border averages
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorSum {
    r: u64,
    g: u64,
    b: u64,
    count: u64,
}

impl ColorSum {
    pub fn add(&mut self, color: Color) {
        self.r += color.r as u64;
        self.g += color.g as u64;
        self.b += color.b as u64;
        self.count += 1;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Unrounded channel means, or `None` when nothing was added
    pub fn mean_f64(&self) -> Option<[f64; 3]> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f64;
        Some([self.r as f64 / n, self.g as f64 / n, self.b as f64 / n])
    }

    /// Channel means rounded half-up, or `None` when nothing was added
    pub fn mean(&self) -> Option<Color> {
        if self.count == 0 {
            return None;
        }
        // (2*sum + n) / (2*n) == floor(sum/n + 0.5) without float error
        let round = |sum: u64| ((2 * sum + self.count) / (2 * self.count)) as u8;
        Some(Color::new(round(self.r), round(self.g), round(self.b)))
    }
}

impl FromIterator<Color> for ColorSum {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        let mut sum = ColorSum::default();
        for color in iter {
            sum.add(color);
        }
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_black_white() {
        let d = Color::BLACK.distance(Color::WHITE);
        assert!((d - (3.0f64 * 255.0 * 255.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Color::new(10, 200, 30);
        let b = Color::new(90, 20, 250);
        assert_eq!(a.distance(b), b.distance(a));
        assert_eq!(a.distance(a), 0.0);
    }

    #[test]
    fn test_luminance_extremes() {
        assert_eq!(Color::BLACK.luminance(), 0.0);
        assert_eq!(Color::WHITE.luminance(), 1.0);
    }

    #[test]
    fn test_luminance_weights() {
        let green = Color::new(0, 255, 0).luminance();
        let red = Color::new(255, 0, 0).luminance();
        let blue = Color::new(0, 0, 255).luminance();
        assert!(green > red && red > blue);
        assert!((red - 0.299).abs() < 1e-9);
    }

    #[test]
    fn test_mean_of_identical_colors_is_exact() {
        for value in [0u8, 1, 127, 128, 254, 255] {
            let c = Color::new(value, 255 - value, value / 3);
            let sum: ColorSum = std::iter::repeat_n(c, 7).collect();
            assert_eq!(sum.mean(), Some(c));
        }
    }

    #[test]
    fn test_mean_rounds_half_up() {
        let sum: ColorSum = [Color::new(0, 1, 2), Color::new(1, 2, 2)].into_iter().collect();
        assert_eq!(sum.mean(), Some(Color::new(1, 2, 2)));
    }

    #[test]
    fn test_empty_sum_has_no_mean() {
        assert_eq!(ColorSum::default().mean(), None);
        assert_eq!(ColorSum::default().mean_f64(), None);
    }
}
