//! Hex color parsing and alpha blending.

use std::str::FromStr;

use thiserror::Error;

use crate::util::format_number;

/// Error returned when a color is not a `#rrggbb` triplet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color `{input}` must start with `#`")]
    MissingHash { input: String },
    #[error("color `{input}` must be 7 characters (`#rrggbb`), got {len}")]
    Length { input: String, len: usize },
    #[error("color `{input}` contains non-hex digits")]
    InvalidDigit { input: String },
}

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Substituted when a stored color cannot be parsed.
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    /// Parses a `#rrggbb` string. Hex digits may be upper or lower case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cineshelf_designer::Rgb;
    ///
    /// let c = Rgb::parse_hex("#112233").unwrap();
    /// assert_eq!((c.r, c.g, c.b), (17, 34, 51));
    /// assert!(Rgb::parse_hex("#1234").is_err());
    /// ```
    pub fn parse_hex(input: &str) -> Result<Rgb, ColorParseError> {
        let digits = input
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash {
                input: input.to_string(),
            })?;

        if input.chars().count() != 7 {
            return Err(ColorParseError::Length {
                input: input.to_string(),
                len: input.chars().count(),
            });
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit {
                input: input.to_string(),
            });
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| ColorParseError::InvalidDigit {
                input: input.to_string(),
            })
        };

        Ok(Rgb {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Renders `rgba(r, g, b, alpha)`; alpha is clamped to 0..=1.
    pub fn with_alpha(self, alpha: f64) -> String {
        let alpha = if alpha.is_finite() { alpha.clamp(0.0, 1.0) } else { 1.0 };
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            format_number(alpha)
        )
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::parse_hex(s)
    }
}

/// Converts `#rrggbb` plus a separate opacity into an `rgba(..)` string.
pub fn hex_to_rgba(hex: &str, alpha: f64) -> Result<String, ColorParseError> {
    Ok(Rgb::parse_hex(hex)?.with_alpha(alpha))
}
