//! Cell color types.
//!
//! `Color` is the three-way split every escape-sequence color channel
//! resolves to: the terminal default, a 256-palette index, or a direct
//! 24-bit value. Palette resolution happens in the renderer, not here.

use std::fmt;

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A cell color: default, indexed into the 256-color palette, or direct RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// The configured default foreground or background.
    #[default]
    Default,
    /// One of the 256 palette entries.
    Indexed(u8),
    /// A direct truecolor value.
    Rgb(Rgb),
}

impl Color {
    /// Whether this is the default color.
    pub fn is_default(self) -> bool {
        self == Self::Default
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, Rgb};

    #[test]
    fn default_color_is_default_variant() {
        assert_eq!(Color::default(), Color::Default);
        assert!(Color::Default.is_default());
        assert!(!Color::Indexed(3).is_default());
        assert!(!Color::Rgb(Rgb::new(1, 2, 3)).is_default());
    }

    #[test]
    fn rgb_display() {
        assert_eq!(Rgb::new(255, 0, 128).to_string(), "#ff0080");
    }

    #[test]
    fn rgb_converts_into_color() {
        let color: Color = Rgb::new(10, 20, 30).into();
        assert_eq!(color, Color::Rgb(Rgb::new(10, 20, 30)));
    }

    #[test]
    fn color_fits_in_four_bytes() {
        assert!(std::mem::size_of::<Color>() <= 4);
    }
}
