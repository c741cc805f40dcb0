use crate::data::{extract_luminance, PixelGrid};
use crate::utils::grid_to_grayimage;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::path::Path;

pub fn load_image<P: AsRef<Path>>(path: P) -> crate::Result<DynamicImage> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(anyhow::anyhow!(
            "Image file does not exist: {}",
            path.display()
        ));
    }

    // format comes from the file's magic bytes, not its extension
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(img)
}

/// Decode an image file straight into a luminance grid
pub fn load_luminance<P: AsRef<Path>>(path: P) -> crate::Result<PixelGrid> {
    let img = load_image(path)?;
    validate_image_size(&img, 1)?;
    Ok(extract_luminance(&img))
}

/// Encode a grid as an 8-bit grayscale PNG whatever the path's extension
pub fn save_grid<P: AsRef<Path>>(grid: &PixelGrid, path: P) -> crate::Result<()> {
    let gray = grid_to_grayimage(grid)?;
    gray.save_with_format(path.as_ref(), ImageFormat::Png)?;
    Ok(())
}

pub fn validate_image_size(img: &DynamicImage, min_size: u32) -> crate::Result<()> {
    if img.width() < min_size || img.height() < min_size {
        return Err(anyhow::anyhow!("Image too small: {}x{}, minimum: {}x{}",
                          img.width(), img.height(), min_size, min_size));
    }
    Ok(())
}
