use crate::error::{AppError, AppResult};

/// Conversion factor between millimetres and PDF points (1 pt = 1/72 inch).
const PT_PER_MM: f64 = 72.0 / 25.4;

/// Standard page size presets.
///
/// The output page is always a fixed size chosen from configuration; it is
/// never derived from the uploaded image's aspect ratio or DPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    A4,
    Letter,
    Legal,
}

impl PageSize {
    /// Parse a preset name as it appears in configuration (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "a4" => Some(Self::A4),
            "letter" => Some(Self::Letter),
            "legal" => Some(Self::Legal),
            _ => None,
        }
    }

    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (f64, f64) {
        match self {
            Self::A4 => (210.0, 297.0),
            Self::Letter => (215.9, 279.4),
            Self::Legal => (215.9, 355.6),
        }
    }

    /// Page geometry in PDF points.
    pub fn geometry(&self) -> PageGeometry {
        let (w_mm, h_mm) = self.dimensions_mm();
        PageGeometry {
            width: w_mm * PT_PER_MM,
            height: h_mm * PT_PER_MM,
        }
    }
}

/// Page dimensions in PDF points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
}

impl PageGeometry {
    pub fn width_mm(&self) -> f64 {
        self.width / PT_PER_MM
    }

    pub fn height_mm(&self) -> f64 {
        self.height / PT_PER_MM
    }
}

/// Uniform scale factor and page offsets placing a raster on a page.
///
/// The scaled image never overflows either page dimension; the shorter-ratio
/// axis becomes exactly page-filling and the margin on the other axis is
/// split evenly, centering the image both ways.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementTransform {
    pub scale: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlacementTransform {
    /// Compute the scale-to-fit transform for an image of the given pixel
    /// dimensions on the given page.
    ///
    /// Upscaling is allowed: a small image grows until one axis fills the
    /// page. Zero dimensions cannot come out of a successful decode but are
    /// guarded so the ratio math never divides by zero.
    pub fn fit(image_width: u32, image_height: u32, page: &PageGeometry) -> AppResult<Self> {
        if image_width == 0 || image_height == 0 {
            return Err(AppError::InvalidDimensions);
        }

        let width_ratio = page.width / image_width as f64;
        let height_ratio = page.height / image_height as f64;
        let scale = width_ratio.min(height_ratio);

        let width = image_width as f64 * scale;
        let height = image_height as f64 * scale;

        Ok(Self {
            scale,
            x: (page.width - width) / 2.0,
            y: (page.height - height) / 2.0,
            width,
            height,
        })
    }
}
