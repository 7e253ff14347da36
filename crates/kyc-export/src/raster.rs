//! Captured page images

use crate::error::CaptureError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Opaque white
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Parse `#RRGGBB` (case-insensitive)
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Uppercase `#RRGGBB`
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color '{text}'")))
    }
}

/// Options handed to the capture surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureOptions {
    /// Device pixels per layout pixel
    pub scale: f32,
    /// Fill behind transparent content
    pub background: Rgb,
    /// Render colors in plain RGB
    pub force_rgb: bool,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            background: Rgb::WHITE,
            force_rgb: true,
        }
    }
}

/// Row-major RGB8 pixel buffer
#[derive(Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Wrap a pixel buffer
    ///
    /// # Errors
    /// `CaptureError::InvalidImage` if either dimension is zero or the buffer
    /// is not exactly `width * height * 3` bytes
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, CaptureError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(3));
        if width == 0 || height == 0 || expected != Some(pixels.len()) {
            return Err(CaptureError::InvalidImage {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Single-color image
    ///
    /// # Errors
    /// `CaptureError::InvalidImage` if either dimension is zero
    pub fn filled(width: u32, height: u32, color: Rgb) -> Result<Self, CaptureError> {
        let count = width as usize * height as usize;
        let pixels = [color.0, color.1, color.2].repeat(count);
        Self::new(width, height, pixels)
    }

    /// Width in pixels
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGB bytes
    #[inline]
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let color = Rgb::from_hex("#105173").unwrap();
        assert_eq!(color, Rgb(0x10, 0x51, 0x73));
        assert_eq!(color.to_hex(), "#105173");
        assert_eq!(Rgb::from_hex("#2563eb"), Some(Rgb(0x25, 0x63, 0xEB)));
    }

    #[test]
    fn bad_hex() {
        assert_eq!(Rgb::from_hex("105173"), None);
        assert_eq!(Rgb::from_hex("#10517"), None);
        assert_eq!(Rgb::from_hex("#GG5173"), None);
        assert_eq!(Rgb::from_hex("#1051é"), None);
    }

    #[test]
    fn capture_defaults() {
        let options = CaptureOptions::default();
        assert!((options.scale - 2.0).abs() < f32::EPSILON);
        assert_eq!(options.background, Rgb::WHITE);
        assert!(options.force_rgb);
    }

    #[test]
    fn buffer_must_match_dimensions() {
        assert!(RasterImage::new(2, 2, vec![0; 12]).is_ok());
        assert_eq!(
            RasterImage::new(2, 2, vec![0; 11]),
            Err(CaptureError::InvalidImage {
                width: 2,
                height: 2,
                len: 11
            })
        );
        assert!(RasterImage::new(0, 4, Vec::new()).is_err());
    }

    #[test]
    fn filled_image() {
        let image = RasterImage::filled(3, 1, Rgb(1, 2, 3)).unwrap();
        assert_eq!(image.pixels(), &[1, 2, 3, 1, 2, 3, 1, 2, 3]);
    }
}
