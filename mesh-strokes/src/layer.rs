use crate::color::Palette;
use crate::quantize::IndexedImage;

/// A binary W×H image tagged with a palette color index: 255 where a texel
/// was assigned to `color`, else 0.
pub struct Layer {
    pub color: usize,
    pub width: u32,
    pub height: u32,
    pub mask: Vec<u8>,
}

impl Layer {
    pub fn is_foreground(&self, x: u32, y: u32) -> bool {
        self.mask[(y * self.width + x) as usize] != 0
    }
}

/// Produce exactly one binary layer per palette entry, in palette index
/// order. Layers partition the image: every pixel is assigned to exactly
/// one layer because [`crate::quantize::quantize`] assigns a single index
/// per pixel.
pub fn split(indexed: &IndexedImage, palette: &Palette) -> Vec<Layer> {
    let pixel_count = (indexed.width * indexed.height) as usize;
    let mut layers: Vec<Layer> = (0..palette.len())
        .map(|color| Layer {
            color,
            width: indexed.width,
            height: indexed.height,
            mask: vec![0u8; pixel_count],
        })
        .collect();

    for (pixel_index, &color_index) in indexed.indices.iter().enumerate() {
        layers[color_index as usize].mask[pixel_index] = 255;
    }

    layers
}
