//! Decoding of downloaded image bodies.

use std::io::Cursor;

use image::{GenericImageView, ImageFormat, ImageReader};
use imageapi_core::ImageInfo;

/// Decode `data` and report its dimensions and detected format.
pub fn inspect(data: &[u8]) -> Result<ImageInfo, image::ImageError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)?;
    let format = reader
        .format()
        .map(|f| format!("{:?}", f))
        .unwrap_or_else(|| "unknown".to_string());
    let img = reader.decode()?;

    let (width, height) = img.dimensions();

    Ok(ImageInfo {
        width,
        height,
        format,
        size_bytes: data.len() as u64,
    })
}

/// MIME type for an upload, guessed from the file extension.
pub fn mime_for_path(path: &std::path::Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|f| f.to_mime_type())
        .unwrap_or("application/octet-stream")
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use std::path::Path;

    fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = ImageBuffer::from_pixel(width, height, Rgb([200u8, 40, 90]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    #[test]
    fn inspects_png() {
        let data = encode(12, 7, ImageFormat::Png);
        let info = inspect(&data).unwrap();
        assert_eq!((info.width, info.height), (12, 7));
        assert_eq!(info.format, "Png");
        assert_eq!(info.size_bytes, data.len() as u64);
        assert!(info.has_pixels());
    }

    #[test]
    fn inspects_jpeg() {
        let data = encode(16, 16, ImageFormat::Jpeg);
        let info = inspect(&data).unwrap();
        assert_eq!((info.width, info.height), (16, 16));
        assert_eq!(info.format, "Jpeg");
    }

    #[test]
    fn rejects_non_image_body() {
        assert!(inspect(b"<html>Image not found</html>").is_err());
    }

    #[test]
    fn mime_from_extension() {
        assert_eq!(mime_for_path(Path::new("test.jpg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("dir/cat.PNG")), "image/png");
        assert_eq!(mime_for_path(Path::new("anim.gif")), "image/gif");
        assert_eq!(mime_for_path(Path::new("notes")), "application/octet-stream");
    }
}
