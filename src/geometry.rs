use crate::error::{ConvertError, Result};
use crate::types::{ImageSize, NormalizedBox};

// Pixel-space bounds of a `bndbox` node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBox {
    pub xmin: i64,
    pub ymin: i64,
    pub xmax: i64,
    pub ymax: i64,
}

/// Express `value` pixels as a percentage of `extent` pixels. Not clamped.
pub fn to_percent(value: f64, extent: u32) -> f64 {
    value / extent as f64 * 100.0
}

/// Fail unless both image dimensions are usable as divisors.
pub fn ensure_non_zero(size: ImageSize) -> Result<()> {
    if size.height == 0 || size.width == 0 {
        return Err(ConvertError::ZeroDimension {
            height: size.height,
            width: size.width,
        });
    }
    Ok(())
}

impl PixelBox {
    /// Project the box into percent-of-image space.
    ///
    /// Extents are taken in `f64` so any pair of `i64` bounds is representable.
    pub fn normalize(&self, size: ImageSize, label: String) -> NormalizedBox {
        NormalizedBox {
            x: to_percent(self.xmin as f64, size.width),
            y: to_percent(self.ymin as f64, size.height),
            width: to_percent(self.xmax as f64 - self.xmin as f64, size.width),
            height: to_percent(self.ymax as f64 - self.ymin as f64, size.height),
            label,
        }
    }
}
