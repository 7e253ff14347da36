//! Fitting captured images onto document pages

use serde::{Deserialize, Serialize};

/// Points per millimetre (1 pt = 1/72 in)
pub const POINTS_PER_MM: f64 = 72.0 / 25.4;

/// Physical page size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    /// Width in millimetres
    pub width_mm: f64,
    /// Height in millimetres
    pub height_mm: f64,
}

impl PageSize {
    /// ISO A4 portrait
    pub const A4: PageSize = PageSize {
        width_mm: 210.0,
        height_mm: 297.0,
    };

    /// Width in points
    #[inline]
    #[must_use]
    pub fn width_pt(&self) -> f64 {
        self.width_mm * POINTS_PER_MM
    }

    /// Height in points
    #[inline]
    #[must_use]
    pub fn height_pt(&self) -> f64 {
        self.height_mm * POINTS_PER_MM
    }

    /// Check both dimensions are positive and finite
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width_mm.is_finite()
            && self.height_mm.is_finite()
            && self.width_mm > 0.0
            && self.height_mm > 0.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// Image rectangle on a page, in millimetres from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Left offset
    pub x_mm: f64,
    /// Top offset
    pub y_mm: f64,
    /// Drawn width
    pub width_mm: f64,
    /// Drawn height
    pub height_mm: f64,
}

/// Fit an image to the page width, shrinking to the page height if needed
///
/// The image keeps its aspect ratio, is centred horizontally and is anchored
/// to the top edge.
#[must_use]
pub fn fit_to_page(width_px: u32, height_px: u32, page: PageSize) -> Placement {
    let (w, h) = (f64::from(width_px.max(1)), f64::from(height_px.max(1)));

    let mut width_mm = page.width_mm;
    let mut height_mm = h * width_mm / w;
    if height_mm > page.height_mm {
        height_mm = page.height_mm;
        width_mm = w * height_mm / h;
    }

    Placement {
        x_mm: (page.width_mm - width_mm) / 2.0,
        y_mm: 0.0,
        width_mm,
        height_mm,
    }
}
