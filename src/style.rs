//! Colors and the key palette used to tell channels apart.

/// RGBA color in linear space.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit components.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
}

/// Dash pattern of a line key, as alternating on/off lengths in pixels.
///
/// Key 0 is solid; higher keys cycle through the dashed patterns.
pub fn dash_pattern(key: usize) -> &'static [f32] {
    const PATTERNS: [&[f32]; 5] = [
        &[6.0, 3.0],
        &[2.0, 2.0],
        &[8.0, 3.0, 2.0, 3.0],
        &[10.0, 5.0],
        &[4.0, 2.0, 1.0, 2.0, 1.0, 2.0],
    ];
    if key == 0 {
        return &[];
    }
    PATTERNS[(key - 1) % PATTERNS.len()]
}

/// Visual theme for plots.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Theme {
    /// Surface background.
    pub background: Color,
    /// Default foreground for grids, text and data.
    pub foreground: Color,
    /// Palette indexed by color key.
    pub keys: Vec<Color>,
}

impl Theme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Color for a color key, cycling through the palette.
    pub fn key_color(&self, key: usize) -> Color {
        if self.keys.is_empty() {
            return self.foreground;
        }
        self.keys[key % self.keys.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            foreground: Color::BLACK,
            keys: vec![
                Color::BLACK,
                Color::rgb8(0x1f, 0x77, 0xb4),
                Color::rgb8(0xd6, 0x27, 0x28),
                Color::rgb8(0x2c, 0xa0, 0x2c),
                Color::rgb8(0xff, 0x7f, 0x0e),
                Color::rgb8(0x94, 0x67, 0xbd),
                Color::rgb8(0x8c, 0x56, 0x4b),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_key_zero_is_solid() {
        assert!(dash_pattern(0).is_empty());
        assert!(!dash_pattern(1).is_empty());
        assert_eq!(dash_pattern(1), dash_pattern(6));
    }

    #[test]
    fn key_colors_cycle() {
        let theme = Theme::default();
        let n = theme.keys.len();
        assert_eq!(theme.key_color(1), theme.key_color(n + 1));
    }
}
