use crate::color::{Color, Palette};
use crate::error::Result;
use crate::texture::Texture;

/// A W×H image whose pixels are palette indices, row-major.
pub struct IndexedImage {
    pub width: u32,
    pub height: u32,
    pub indices: Vec<u8>,
}

impl IndexedImage {
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.indices[(y * self.width + x) as usize]
    }
}

/// Map each texel to the nearest palette color by squared Euclidean RGB
/// distance, ties broken by lowest palette index. No dithering.
pub fn quantize(texture: &Texture, palette: &Palette) -> Result<IndexedImage> {
    if palette.is_empty() {
        return Err(crate::error::Error::invalid_input("quantize", "palette must not be empty"));
    }

    let width = texture.width();
    let height = texture.height();
    let mut indices = Vec::with_capacity((width * height) as usize);

    for (_, _, pixel) in texture.pixels() {
        let color = Color::from_rgb(pixel);
        indices.push(palette.nearest_index(color) as u8);
    }

    Ok(IndexedImage { width, height, indices })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_texture(width: u32, height: u32, color: image::Rgb<u8>) -> Texture {
        let image = image::RgbImage::from_pixel(width, height, color);
        Texture::from_rgb_image(image).unwrap()
    }

    #[test]
    fn assigns_nearest_palette_color() {
        let palette = Palette::new(vec![Color::new(255, 0, 0), Color::new(0, 0, 255)]).unwrap();
        let texture = solid_texture(4, 4, image::Rgb([250, 5, 5]));
        let indexed = quantize(&texture, &palette).unwrap();
        assert!(indexed.indices.iter().all(|&i| i == 0));
    }

    #[test]
    fn idempotent_on_already_quantized_image() {
        let palette = Palette::new(vec![Color::new(255, 0, 0), Color::new(0, 0, 255)]).unwrap();
        let texture = solid_texture(2, 2, image::Rgb([255, 0, 0]));
        let first = quantize(&texture, &palette).unwrap();

        let mut rebuilt = image::RgbImage::new(2, 2);
        for (x, y, _) in texture.pixels() {
            let idx = first.get(x, y);
            rebuilt.put_pixel(x, y, palette.get(idx as usize).unwrap().to_rgb());
        }
        let rebuilt_texture = Texture::from_rgb_image(rebuilt).unwrap();
        let second = quantize(&rebuilt_texture, &palette).unwrap();
        assert_eq!(first.indices, second.indices);
    }

    #[test]
    fn single_color_palette_covers_every_pixel() {
        let palette = Palette::new(vec![Color::new(10, 20, 30)]).unwrap();
        let texture = solid_texture(3, 3, image::Rgb([200, 200, 200]));
        let indexed = quantize(&texture, &palette).unwrap();
        assert!(indexed.indices.iter().all(|&i| i == 0));
    }
}
