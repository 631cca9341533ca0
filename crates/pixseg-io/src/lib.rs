//! pixseg-io - Image I/O for pixseg
//!
//! Decoding and encoding is delegated to the `image` crate. Every decoded
//! image is converted to 8-bit RGB: gray inputs replicate the gray value
//! into all three channels and alpha is dropped.
//!
//! # Examples
//!
//! ```no_run
//! use pixseg_io::{read_image, write_image};
//!
//! let raster = read_image("input.png").unwrap();
//! write_image(&raster, "copy.png").unwrap();
//! ```

use image::{DynamicImage, RgbImage};
use pixseg_core::Raster;
use std::path::Path;
use thiserror::Error;

pub use image::ImageFormat;

/// Errors that can occur while reading or writing images
#[derive(Debug, Error)]
pub enum IoError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixseg_core::Error),

    /// The file could not be opened or decoded
    #[error("failed to decode '{path}': {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    /// The image could not be encoded or written
    #[error("failed to encode '{path}': {source}")]
    Encode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    /// The output format could not be determined from the path
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for I/O operations
pub type IoResult<T> = Result<T, IoError>;

/// Read an image file into an RGB raster.
///
/// The format is detected from the file contents.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let path = path.as_ref();
    let img = image::ImageReader::open(path)
        .map_err(|e| IoError::Decode {
            path: path.display().to_string(),
            source: image::ImageError::IoError(e),
        })?
        .with_guessed_format()
        .map_err(|e| IoError::Decode {
            path: path.display().to_string(),
            source: image::ImageError::IoError(e),
        })?
        .decode()
        .map_err(|source| IoError::Decode {
            path: path.display().to_string(),
            source,
        })?;
    log::debug!(
        "decoded {} ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );
    dynamic_to_raster(img)
}

/// Decode an in-memory encoded image into an RGB raster.
pub fn read_image_mem(bytes: &[u8]) -> IoResult<Raster> {
    let img = image::load_from_memory(bytes).map_err(|source| IoError::Decode {
        path: "<memory>".to_string(),
        source,
    })?;
    dynamic_to_raster(img)
}

/// Write a raster, choosing the format from the file extension.
pub fn write_image<P: AsRef<Path>>(raster: &Raster, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)
        .map_err(|_| IoError::UnsupportedFormat(path.display().to_string()))?;
    write_image_format(raster, path, format)
}

/// Write a raster in an explicit format.
pub fn write_image_format<P: AsRef<Path>>(
    raster: &Raster,
    path: P,
    format: ImageFormat,
) -> IoResult<()> {
    let path = path.as_ref();
    let buffer = raster_to_rgb_image(raster);
    buffer
        .save_with_format(path, format)
        .map_err(|source| IoError::Encode {
            path: path.display().to_string(),
            source,
        })?;
    log::debug!(
        "wrote {} ({}x{}, {:?})",
        path.display(),
        raster.width(),
        raster.height(),
        format
    );
    Ok(())
}

fn dynamic_to_raster(img: DynamicImage) -> IoResult<Raster> {
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(Raster::from_rgb_bytes(width, height, rgb.as_raw())?)
}

fn raster_to_rgb_image(raster: &Raster) -> RgbImage {
    let (width, height) = (raster.width(), raster.height());
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb(raster.get_pixel_unchecked(x, y).to_array())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixseg_core::Rgb;

    fn temp_path(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join("pixseg-io-tests");
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn test_png_write_then_read() {
        let raster =
            Raster::from_fn(5, 3, |x, y| Rgb::new(x as u8 * 40, y as u8 * 80, 7)).unwrap();
        let path = temp_path("write_then_read.png");
        write_image(&raster, &path).unwrap();

        let back = read_image(&path).unwrap();
        assert!(back.sizes_equal(&raster));
        assert_eq!(back.data(), raster.data());
    }

    #[test]
    fn test_gray_input_is_replicated() {
        let gray = image::GrayImage::from_fn(2, 2, |x, y| image::Luma([(x + 2 * y) as u8 * 50]));
        let mut bytes = Vec::new();
        DynamicImage::ImageLuma8(gray)
            .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        let raster = read_image_mem(&bytes).unwrap();
        assert_eq!(raster.get_pixel(1, 1), Some(Rgb::gray(150)));
        assert_eq!(raster.get_pixel(0, 1), Some(Rgb::gray(100)));
    }

    #[test]
    fn test_missing_file_is_decode_error() {
        let err = read_image(temp_path("does_not_exist.png")).unwrap_err();
        assert!(matches!(err, IoError::Decode { .. }));
    }

    #[test]
    fn test_unknown_extension() {
        let raster = Raster::new(1, 1).unwrap();
        let err = write_image(&raster, temp_path("out.unknownext")).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }
}
