//! User-facing settings

use crate::error::OnboardingError;
use kyc_export::Rgb;
use serde::{Deserialize, Serialize};

/// Accent colors offered in the settings panel, default first
pub const ACCENT_PALETTE: [&str; 7] = [
    "#105173", "#2563EB", "#7C3AED", "#DB2777", "#059669", "#DC2626", "#D97706",
];

/// Default accent color
pub const DEFAULT_ACCENT: &str = ACCENT_PALETTE[0];

/// Accent color picked from [`ACCENT_PALETTE`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccentColor(Rgb);

impl AccentColor {
    /// Parse a palette color (case-insensitive hex)
    ///
    /// # Errors
    /// `OnboardingError::UnknownAccent` if `hex` is not in the palette
    pub fn parse(hex: &str) -> Result<Self, OnboardingError> {
        Rgb::from_hex(hex.trim())
            .filter(|rgb| ACCENT_PALETTE.contains(&rgb.to_hex().as_str()))
            .map(Self)
            .ok_or_else(|| OnboardingError::UnknownAccent(hex.to_string()))
    }

    /// Color value
    #[inline]
    #[must_use]
    pub fn rgb(self) -> Rgb {
        self.0
    }

    /// Uppercase `#RRGGBB`
    #[must_use]
    pub fn hex(self) -> String {
        self.0.to_hex()
    }

    /// Every palette color
    pub fn palette() -> impl Iterator<Item = AccentColor> {
        ACCENT_PALETTE
            .iter()
            .filter_map(|hex| Rgb::from_hex(hex))
            .map(Self)
    }
}

impl Default for AccentColor {
    fn default() -> Self {
        Self(Rgb(0x10, 0x51, 0x73))
    }
}

impl TryFrom<String> for AccentColor {
    type Error = OnboardingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AccentColor> for String {
    fn from(color: AccentColor) -> Self {
        color.hex()
    }
}

/// Session settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Accent color of headers and buttons
    pub accent: AccentColor,
}
