//! Opaque 8-bit RGB colors

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::HalftoneError;

/// RGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to an `image` pixel
    #[inline]
    pub fn to_pixel(self) -> image::Rgb<u8> {
        image::Rgb([self.r, self.g, self.b])
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Parses `(r,g,b)` or `r,g,b`; whitespace anywhere is ignored
impl FromStr for Color {
    type Err = HalftoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let inner = compact
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(compact.as_str());

        let channels: Vec<u8> = inner
            .split(',')
            .map(str::parse::<u8>)
            .collect::<Result<_, _>>()
            .map_err(|_| HalftoneError::InvalidColor(s.to_string()))?;

        match channels[..] {
            [r, g, b] => Ok(Self::rgb(r, g, b)),
            _ => Err(HalftoneError::InvalidColor(s.to_string())),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = HalftoneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{},{})", self.r, self.g, self.b)
    }
}
