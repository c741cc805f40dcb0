use crate::data::PixelGrid;
use image::{DynamicImage, ImageBuffer, Rgb};

/// ITU-R BT.601 luma weights
pub const LUMA_RED: f64 = 0.299;
pub const LUMA_GREEN: f64 = 0.587;
pub const LUMA_BLUE: f64 = 0.114;

/// 16-bit RGB image, the depth luminance is computed at
pub type Rgb16Image = ImageBuffer<Rgb<u16>, Vec<u16>>;

/// Convert a decoded image of any pixel type to an 8-bit luminance grid.
///
/// Channels are read at 16-bit depth (8-bit sources scale by 257) and alpha
/// is dropped before weighting.
pub fn extract_luminance(image: &DynamicImage) -> PixelGrid {
    luminance_from_rgb16(&image.to_rgb16())
}

/// Luminance of an image whose channels are already 16-bit
pub fn luminance_from_rgb16(image: &Rgb16Image) -> PixelGrid {
    let (width, height) = image.dimensions();
    PixelGrid::from_fn(height as usize, width as usize, |y, x| {
        let Rgb([r, g, b]) = *image.get_pixel(x as u32, y as u32);
        luma(r, g, b)
    })
}

/// `floor((0.299 R + 0.587 G + 0.114 B) / 256)` for 16-bit channels
#[inline]
pub fn luma(r: u16, g: u16, b: u16) -> u8 {
    let lum = LUMA_RED * f64::from(r) + LUMA_GREEN * f64::from(g) + LUMA_BLUE * f64::from(b);
    // float -> int casts truncate and saturate
    (lum / 256.0) as u8
}
