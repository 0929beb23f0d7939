//! Frame conversion and transformation utilities.

use super::types::{CameraError, Frame, Resolution};

/// Mirror a frame horizontally (flip left-right).
pub fn mirror_horizontal(frame: &mut Frame) {
    let width = frame.width as usize;
    let height = frame.height as usize;
    let bpp = frame.bytes_per_pixel();

    for y in 0..height {
        let row_start = y * width * bpp;
        let row = &mut frame.data[row_start..row_start + width * bpp];

        for x in 0..width / 2 {
            let left = x * bpp;
            let right = (width - 1 - x) * bpp;
            for i in 0..bpp {
                row.swap(left + i, right + i);
            }
        }
    }
}

/// Check that a frame's buffer matches its declared dimensions.
pub fn check_layout(frame: &Frame) -> Result<(), CameraError> {
    if frame.width == 0 || frame.height == 0 {
        return Err(CameraError::EncodeFailed(format!(
            "frame has zero size ({}x{})",
            frame.width, frame.height
        )));
    }
    let expected = frame.resolution().pixel_count() * frame.bytes_per_pixel();
    if frame.data.len() != expected {
        return Err(CameraError::EncodeFailed(format!(
            "frame buffer is {} bytes, expected {} for {}x{}",
            frame.data.len(),
            expected,
            frame.width,
            frame.height
        )));
    }
    Ok(())
}

/// Convert a decoded RGB image into a frame.
pub fn from_rgb_image(image: image::RgbImage) -> Frame {
    let (width, height) = image.dimensions();
    Frame::rgb(width, height, image.into_raw())
}

/// Render a diagonal RGB gradient, offset by `phase` so consecutive frames differ.
pub fn gradient(resolution: Resolution, phase: u8) -> Frame {
    let Resolution { width, height } = resolution;
    let mut data = Vec::with_capacity(resolution.pixel_count() * 3);
    for y in 0..height {
        for x in 0..width {
            let r = ((x * 255) / width.max(1)) as u8;
            let g = ((y * 255) / height.max(1)) as u8;
            let b = r.wrapping_add(g).wrapping_add(phase);
            data.extend_from_slice(&[r, g, b]);
        }
    }
    Frame::rgb(width, height, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_horizontal_2x1() {
        let mut frame = Frame::rgb(2, 1, vec![1, 2, 3, 4, 5, 6]);
        mirror_horizontal(&mut frame);
        assert_eq!(frame.data, vec![4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn test_mirror_horizontal_3x2() {
        let mut frame = Frame::rgb(
            3,
            2,
            vec![
                1, 1, 1, 2, 2, 2, 3, 3, 3, // Row 0: A, B, C
                4, 4, 4, 5, 5, 5, 6, 6, 6, // Row 1: D, E, F
            ],
        );
        mirror_horizontal(&mut frame);
        assert_eq!(
            frame.data,
            vec![
                3, 3, 3, 2, 2, 2, 1, 1, 1, // Row 0: C, B, A
                6, 6, 6, 5, 5, 5, 4, 4, 4, // Row 1: F, E, D
            ]
        );
    }

    #[test]
    fn test_mirror_horizontal_single_pixel() {
        let mut frame = Frame::rgb(1, 1, vec![1, 2, 3]);
        mirror_horizontal(&mut frame);
        assert_eq!(frame.data, vec![1, 2, 3]);
    }

    #[test]
    fn test_check_layout_rejects_short_buffer() {
        let frame = Frame::rgb(2, 2, vec![0; 5]);
        assert!(matches!(
            check_layout(&frame),
            Err(CameraError::EncodeFailed(_))
        ));
    }

    #[test]
    fn test_check_layout_rejects_zero_size() {
        let frame = Frame::rgb(0, 4, Vec::new());
        assert!(check_layout(&frame).is_err());
    }

    #[test]
    fn test_gradient_has_requested_size() {
        let frame = gradient(Resolution { width: 8, height: 4 }, 0);
        assert_eq!(frame.width, 8);
        assert_eq!(frame.height, 4);
        assert!(check_layout(&frame).is_ok());
    }

    #[test]
    fn test_from_rgb_image_keeps_dimensions() {
        let image = image::RgbImage::from_pixel(5, 3, image::Rgb([10, 20, 30]));
        let frame = from_rgb_image(image);
        assert_eq!(frame.resolution(), Resolution { width: 5, height: 3 });
        assert_eq!(&frame.data[..3], &[10, 20, 30]);
    }
}
