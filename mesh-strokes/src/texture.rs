use std::path::Path;

use crate::error::{Error, Result};

/// A decoded W×H RGB raster. Alpha is dropped on load; input is assumed
/// opaque.
pub struct Texture {
    image: image::RgbImage,
}

impl Texture {
    pub fn from_rgb_image(image: image::RgbImage) -> Result<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(Error::invalid_input("quantize", "texture has zero size"));
        }
        Ok(Texture { image })
    }

    /// Load a PNG or JPEG texture from disk, dropping alpha.
    pub fn load(path: &Path) -> Result<Self> {
        let reader = image::io::Reader::open(path)
            .map_err(|source| Error::io(path, source))?
            .with_guessed_format()
            .map_err(|source| Error::io(path, source))?;

        let format = reader.format();
        if !matches!(format, Some(image::ImageFormat::Png) | Some(image::ImageFormat::Jpeg)) {
            return Err(Error::invalid_input(
                "quantize",
                format!("unsupported texture format for {}", path.display()),
            ));
        }

        let decoded = reader
            .decode()
            .map_err(|source| Error::Image { path: path.to_path_buf(), source })?;

        Texture::from_rgb_image(decoded.into_rgb8())
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> image::Rgb<u8> {
        *self.image.get_pixel(x, y)
    }

    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, image::Rgb<u8>)> + '_ {
        self.image
            .enumerate_pixels()
            .map(|(x, y, pixel)| (x, y, *pixel))
    }
}
