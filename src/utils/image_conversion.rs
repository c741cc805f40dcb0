use crate::data::PixelGrid;
use crate::Result;
use image::GrayImage;

/// Convert a PixelGrid to a GrayImage for encoding
pub fn grid_to_grayimage(grid: &PixelGrid) -> Result<GrayImage> {
    let (height, width) = grid.dimensions();

    let gray_image = GrayImage::from_raw(width as u32, height as u32, grid.as_raw().to_vec())
        .ok_or_else(|| anyhow::anyhow!("Failed to create GrayImage from {}x{} grid", width, height))?;

    Ok(gray_image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_grid_to_grayimage_keeps_layout() {
        let grid = PixelGrid::from_fn(3, 5, |y, x| (x + 10 * y) as u8);
        let image = grid_to_grayimage(&grid).unwrap();
        assert_eq!(image.dimensions(), (5, 3));
        assert_eq!(*image.get_pixel(4, 2), Luma([24]));
        assert_eq!(*image.get_pixel(1, 0), Luma([1]));
    }
}
