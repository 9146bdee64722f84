//! Read-only view over a decoded image's RGBA samples.

use image::{DynamicImage, GenericImageView};
use palette::Srgb;

use crate::color::Color;
use crate::error::ExtractError;

/// Decoded image: row-major RGBA bytes, origin at the top-left corner.
///
/// Immutable once built. A new image means a new buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps raw RGBA samples, e.g. the contents of a canvas `ImageData`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ExtractError> {
        if width == 0 || height == 0 {
            return Err(ExtractError::InvalidDimensions);
        }
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(ExtractError::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_image(img: &DynamicImage) -> Result<Self, ExtractError> {
        let (w, h) = img.dimensions();
        Self::new(w, h, img.to_rgba8().into_raw())
    }

    /// Decodes an encoded image (PNG, JPEG, ...) into RGBA samples.
    pub fn decode(bytes: &[u8]) -> Result<Self, ExtractError> {
        let img = image::load_from_memory(bytes)?;
        Self::from_image(&img)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len() / 4
    }

    pub fn as_rgba(&self) -> &[u8] {
        &self.data
    }

    /// Returns the color under buffer-space coordinates `(x, y)`.
    ///
    /// Coordinates are floored to pixel indices; anything outside
    /// `[0, width) x [0, height)` (or NaN) yields `None`.
    pub fn color_at(&self, x: f64, y: f64) -> Option<Color> {
        let (x, y) = (x.floor(), y.floor());
        if !(x >= 0.0 && y >= 0.0 && x < self.width as f64 && y < self.height as f64) {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some(Color::from_rgba8([px[0], px[1], px[2], px[3]]))
    }

    /// RGB of the `index`-th pixel in row-major order, alpha dropped.
    pub fn rgb_at_index(&self, index: usize) -> Option<Srgb<u8>> {
        let idx = index.checked_mul(4)?;
        let px = self.data.get(idx..idx + 3)?;
        Some(Srgb::new(px[0], px[1], px[2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn two_by_two() -> PixelBuffer {
        #[rustfmt::skip]
        let data = vec![
            255, 0, 0, 255,   255, 0, 0, 255,
            0, 255, 0, 255,   0, 0, 255, 128,
        ];
        PixelBuffer::new(2, 2, data).unwrap()
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(matches!(
            PixelBuffer::new(0, 4, vec![]),
            Err(ExtractError::InvalidDimensions)
        ));
    }

    #[test]
    fn rejects_wrong_length() {
        let err = PixelBuffer::new(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::BufferLength {
                expected: 16,
                actual: 15
            }
        ));
    }

    #[test]
    fn corners_are_readable() {
        let buf = two_by_two();
        assert_eq!(buf.color_at(0.0, 0.0), Some(Color::new(255, 0, 0, 1.0)));
        let last = buf.color_at(1.0, 1.0).unwrap();
        assert_eq!((last.r, last.g, last.b), (0, 0, 255));
        assert!((last.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn fractional_coordinates_are_floored() {
        let buf = two_by_two();
        let c = buf.color_at(0.99, 1.5).unwrap();
        assert_eq!((c.r, c.g, c.b), (0, 255, 0));
    }

    #[test]
    fn out_of_range_is_none() {
        let buf = two_by_two();
        assert_eq!(buf.color_at(2.0, 0.0), None);
        assert_eq!(buf.color_at(-1.0, 0.0), None);
        assert_eq!(buf.color_at(-0.5, 0.0), None);
        assert_eq!(buf.color_at(0.0, 2.0), None);
        assert_eq!(buf.color_at(f64::NAN, 0.0), None);
    }

    #[test]
    fn x_past_row_end_does_not_wrap_into_next_row() {
        let buf = two_by_two();
        assert_eq!(buf.color_at(3.0, 0.0), None);
    }

    #[test]
    fn rgb_at_index_drops_alpha() {
        let buf = two_by_two();
        assert_eq!(buf.rgb_at_index(3), Some(Srgb::new(0, 0, 255)));
        assert_eq!(buf.rgb_at_index(4), None);
    }

    #[test]
    fn decodes_png_bytes() {
        let img = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        let mut png = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();

        let buf = PixelBuffer::decode(&png).unwrap();
        assert_eq!((buf.width(), buf.height()), (3, 2));
        assert_eq!(buf.pixel_count(), 6);
        assert_eq!(buf.color_at(2.0, 1.0), Some(Color::new(10, 20, 30, 1.0)));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(matches!(
            PixelBuffer::decode(b"not an image"),
            Err(ExtractError::Decode(_))
        ));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn extent_corners_hit_and_edges_miss(w in 1u32..16, h in 1u32..16) {
                let buf = PixelBuffer::new(w, h, vec![7; (w * h * 4) as usize]).unwrap();
                prop_assert!(buf.color_at(0.0, 0.0).is_some());
                prop_assert!(buf.color_at((w - 1) as f64, (h - 1) as f64).is_some());
                prop_assert!(buf.color_at(w as f64, 0.0).is_none());
                prop_assert!(buf.color_at(-1.0, 0.0).is_none());
            }
        }
    }
}
