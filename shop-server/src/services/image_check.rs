//! Product image validation
//!
//! Uploaded images must decode and fall inside the allowed resolution
//! window before they are written to disk.
//!
//! The `legacy-image-bounds` feature reproduces the bounds check of
//! the system this one replaces, which rejected images *smaller* than
//! the maximum resolution and never checked the file size. It exists
//! for byte-compatible migration runs only.

use thiserror::Error;

/// Minimum accepted resolution (width, height)
pub const MIN_RESOLUTION: (u32, u32) = (200, 200);
/// Maximum accepted resolution (width, height)
pub const MAX_RESOLUTION: (u32, u32) = (800, 800);
/// Maximum accepted file size in bytes
pub const MAX_IMAGE_SIZE: usize = 3 * 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("Разрешение изображения меньше минимального: {0}x{1}")]
    ResolutionTooSmall(u32, u32),

    #[error("Разрешение изображения больше максимального: {0}x{1}")]
    ResolutionTooLarge(u32, u32),

    #[error("Размер изображения не должен превышать 3MB")]
    FileTooLarge(usize),

    #[error("Невозможно прочитать изображение: {0}")]
    Decode(String),
}

/// Validate a raw uploaded image
pub fn validate_image(data: &[u8]) -> Result<(), ImageError> {
    #[cfg(not(feature = "legacy-image-bounds"))]
    if data.len() > MAX_IMAGE_SIZE {
        return Err(ImageError::FileTooLarge(data.len()));
    }

    let img = image::load_from_memory(data).map_err(|e| ImageError::Decode(e.to_string()))?;
    let (width, height) = (img.width(), img.height());

    if height < MIN_RESOLUTION.1 || width < MIN_RESOLUTION.0 {
        return Err(ImageError::ResolutionTooSmall(width, height));
    }

    #[cfg(feature = "legacy-image-bounds")]
    if height < MAX_RESOLUTION.1 || width < MAX_RESOLUTION.0 {
        return Err(ImageError::ResolutionTooLarge(width, height));
    }

    #[cfg(not(feature = "legacy-image-bounds"))]
    if height > MAX_RESOLUTION.1 || width > MAX_RESOLUTION.0 {
        return Err(ImageError::ResolutionTooLarge(width, height));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::new(width, height);
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn rejects_garbage_bytes() {
        let err = validate_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ImageError::Decode(_)));
    }

    #[test]
    fn rejects_image_below_minimum() {
        let err = validate_image(&png_bytes(150, 150)).unwrap_err();
        assert_eq!(err, ImageError::ResolutionTooSmall(150, 150));
    }

    #[cfg(not(feature = "legacy-image-bounds"))]
    #[test]
    fn rejects_file_above_size_limit_before_decoding() {
        let data = vec![0u8; MAX_IMAGE_SIZE + 1];
        let err = validate_image(&data).unwrap_err();
        assert_eq!(err, ImageError::FileTooLarge(MAX_IMAGE_SIZE + 1));
    }

    #[cfg(not(feature = "legacy-image-bounds"))]
    #[test]
    fn accepts_image_at_maximum() {
        assert!(validate_image(&png_bytes(800, 800)).is_ok());
    }

    #[cfg(not(feature = "legacy-image-bounds"))]
    #[test]
    fn rejects_image_above_maximum() {
        let err = validate_image(&png_bytes(900, 900)).unwrap_err();
        assert_eq!(err, ImageError::ResolutionTooLarge(900, 900));
    }

    #[cfg(not(feature = "legacy-image-bounds"))]
    #[test]
    fn rejects_one_oversized_dimension() {
        let err = validate_image(&png_bytes(900, 400)).unwrap_err();
        assert_eq!(err, ImageError::ResolutionTooLarge(900, 400));
    }

    #[cfg(feature = "legacy-image-bounds")]
    #[test]
    fn legacy_rejects_image_below_maximum() {
        let err = validate_image(&png_bytes(500, 500)).unwrap_err();
        assert_eq!(err, ImageError::ResolutionTooLarge(500, 500));
    }

    #[cfg(feature = "legacy-image-bounds")]
    #[test]
    fn legacy_accepts_oversized_image() {
        assert!(validate_image(&png_bytes(900, 900)).is_ok());
    }
}
