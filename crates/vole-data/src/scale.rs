// Pixel scaling — raw bytes into a caller-chosen floating-point range

use crate::error::{DataError, Result};

/// Target range for normalized pixel values.
///
/// Construction enforces `min < max`; the default is `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRange {
    min: f32,
    max: f32,
}

impl Default for PixelRange {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl PixelRange {
    pub fn new(min: f32, max: f32) -> Result<Self> {
        // `!(min < max)` also rejects NaN bounds
        if !(min < max) {
            return Err(DataError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Linearly map one pixel byte into the range: 0 lands on `min`,
    /// 255 on `max`.
    pub fn scale(&self, byte: u8) -> f32 {
        (self.max - self.min) * byte as f32 / 255.0 + self.min
    }

    /// Scale a whole raw record, preserving pixel order.
    pub fn scale_record(&self, raw: &[u8]) -> Vec<f32> {
        raw.iter().map(|&b| self.scale(b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_map_to_bounds() {
        let unit = PixelRange::default();
        assert_eq!(unit.scale(0), 0.0);
        assert_eq!(unit.scale(255), 1.0);

        let sym = PixelRange::new(-1.0, 1.0).unwrap();
        assert_eq!(sym.scale(0), -1.0);
        assert_eq!(sym.scale(255), 1.0);
    }

    #[test]
    fn test_midpoint_value() {
        let unit = PixelRange::default();
        assert!((unit.scale(128) - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_scale_is_monotonic() {
        let range = PixelRange::new(-0.5, 2.0).unwrap();
        let mut prev = range.scale(0);
        for b in 1..=255u8 {
            let cur = range.scale(b);
            assert!(cur > prev, "scale({b}) = {cur} not above {prev}");
            prev = cur;
        }
    }

    #[test]
    fn test_scale_record_preserves_order() {
        let unit = PixelRange::default();
        let out = unit.scale_record(&[0, 128, 255]);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0], 0.0);
        assert!((out[1] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(out[2], 1.0);
    }

    #[test]
    fn test_degenerate_ranges_rejected() {
        assert!(matches!(
            PixelRange::new(1.0, 1.0),
            Err(DataError::InvalidRange { .. })
        ));
        assert!(matches!(
            PixelRange::new(2.0, -1.0),
            Err(DataError::InvalidRange { .. })
        ));
        assert!(PixelRange::new(f32::NAN, 1.0).is_err());
    }
}
