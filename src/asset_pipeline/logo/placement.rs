//! Centering of the logo on the display canvas.
//!
//! Only the logo's own pixels are encoded; the firmware draws them at the
//! offsets computed here.

use image::RgbImage;
use image::imageops;

use crate::asset_pipeline::config::{Canvas, OversizePolicy};
use crate::asset_pipeline::common::warning::StructuralWarning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub width: u32,
    pub height: u32,
    pub offset_x: i32,
    pub offset_y: i32,
}

impl Placement {
    /// Floor-divided centering offsets; negative when the image is larger
    /// than the canvas.
    pub fn centered(canvas: Canvas, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            offset_x: (canvas.width as i64 - width as i64).div_euclid(2) as i32,
            offset_y: (canvas.height as i64 - height as i64).div_euclid(2) as i32,
        }
    }

    pub fn exceeds(&self, canvas: Canvas) -> bool {
        self.width > canvas.width || self.height > canvas.height
    }

    /// Percentage of canvas pixels that are not encoded.
    pub fn reduction_percent(&self, canvas: Canvas) -> f64 {
        let encoded = self.width as f64 * self.height as f64;
        100.0 * (1.0 - encoded / canvas.pixel_count() as f64)
    }
}

/// Applies the oversize policy and returns the image to encode with its
/// placement.
pub fn place(
    image: RgbImage,
    canvas: Canvas,
    policy: OversizePolicy,
) -> (RgbImage, Placement, Option<StructuralWarning>) {
    let (width, height) = image.dimensions();
    let placement = Placement::centered(canvas, width, height);

    if !placement.exceeds(canvas) {
        return (image, placement, None);
    }

    let warning = StructuralWarning::OversizedImage {
        width,
        height,
        canvas_width: canvas.width,
        canvas_height: canvas.height,
        cropped: policy == OversizePolicy::Crop,
    };

    match policy {
        OversizePolicy::Warn => (image, placement, Some(warning)),
        OversizePolicy::Crop => {
            let crop_w = width.min(canvas.width);
            let crop_h = height.min(canvas.height);
            let x = (width - crop_w) / 2;
            let y = (height - crop_h) / 2;
            let cropped = imageops::crop_imm(&image, x, y, crop_w, crop_h).to_image();
            (cropped, Placement::centered(canvas, crop_w, crop_h), Some(warning))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_centering_uses_floor_division() {
        let canvas = Canvas::default();

        let p = Placement::centered(canvas, 100, 50);
        assert_eq!((p.offset_x, p.offset_y), (70, 95));

        let p = Placement::centered(canvas, 101, 240);
        assert_eq!((p.offset_x, p.offset_y), (69, 0));

        let p = Placement::centered(canvas, 241, 300);
        assert_eq!((p.offset_x, p.offset_y), (-1, -30));
    }

    #[test]
    fn test_reduction() {
        let canvas = Canvas::default();
        let p = Placement::centered(canvas, 120, 120);

        assert!((p.reduction_percent(canvas) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_fitting_image_is_untouched() {
        let image = RgbImage::new(200, 100);
        let (out, placement, warning) = place(image, Canvas::default(), OversizePolicy::Crop);

        assert_eq!(out.dimensions(), (200, 100));
        assert_eq!((placement.offset_x, placement.offset_y), (20, 70));
        assert!(warning.is_none());
    }

    #[test]
    fn test_oversized_warns_and_keeps_negative_offsets() {
        let image = RgbImage::new(300, 100);
        let (out, placement, warning) = place(image, Canvas::default(), OversizePolicy::Warn);

        assert_eq!(out.dimensions(), (300, 100));
        assert_eq!(placement.offset_x, -30);
        assert!(matches!(
            warning,
            Some(StructuralWarning::OversizedImage { cropped: false, .. })
        ));
    }

    #[test]
    fn test_oversized_crop_keeps_center() {
        let image = RgbImage::from_fn(300, 250, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 0]));
        let (out, placement, warning) = place(image, Canvas::default(), OversizePolicy::Crop);

        assert_eq!(out.dimensions(), (240, 240));
        assert_eq!((placement.offset_x, placement.offset_y), (0, 0));
        // crop starts at (30, 5)
        assert_eq!(out.get_pixel(0, 0), &Rgb([30, 5, 0]));
        assert!(matches!(
            warning,
            Some(StructuralWarning::OversizedImage { cropped: true, .. })
        ));
    }
}
