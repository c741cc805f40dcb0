use crate::data::{GridView, PixelGrid};
use crate::filter::Region;

/// Half-width of the filter window
pub const RADIUS: usize = 2;
pub const WINDOW_SIZE: usize = 2 * RADIUS + 1;
pub const WINDOW_AREA: usize = WINDOW_SIZE * WINDOW_SIZE;
/// Index of the median in a sorted window (13th of 25)
pub const MEDIAN_INDEX: usize = WINDOW_AREA / 2;

/// Apply the 5x5 median filter to `region` of `source`.
///
/// The result has the region's dimensions; its row 0 is global row
/// `region.start_y`. Only pixels at least `RADIUS` away from every edge of
/// the region are filtered. Everything else stays 0.
///
/// `region` must lie inside `source`; violating that is a caller bug and
/// panics.
pub fn filter_region(region: &Region, source: &GridView<'_>) -> PixelGrid {
    assert!(
        source.contains(region),
        "region {:?} outside {}x{} grid",
        region,
        source.height(),
        source.width()
    );

    let mut filtered = PixelGrid::new(region.height(), region.width());
    let mut window = [0i32; WINDOW_AREA];

    for y in region.start_y + RADIUS..region.end_y.saturating_sub(RADIUS) {
        let out_row = filtered.row_mut(y - region.start_y);
        for x in region.start_x + RADIUS..region.end_x.saturating_sub(RADIUS) {
            out_row[x - region.start_x] = window_median(source, y, x, &mut window);
        }
    }

    filtered
}

/// Median of the 5x5 neighbourhood centred on `(y, x)`
#[inline]
fn window_median(source: &GridView<'_>, y: usize, x: usize, window: &mut [i32; WINDOW_AREA]) -> u8 {
    let mut count = 0;
    for k in y - RADIUS..=y + RADIUS {
        let row = source.row(k);
        for &sample in &row[x - RADIUS..=x + RADIUS] {
            window[count] = i32::from(sample);
            count += 1;
        }
    }

    window.sort_unstable();
    // samples came from u8, so the median fits
    window[MEDIAN_INDEX] as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_constants() {
        assert_eq!(WINDOW_SIZE, 5);
        assert_eq!(WINDOW_AREA, 25);
        assert_eq!(MEDIAN_INDEX, 12);
    }

    #[test]
    fn test_median_is_thirteenth_smallest() {
        // 5x5 grid holding 0..25 in scrambled order: the centre median is 12
        let grid = PixelGrid::from_fn(5, 5, |y, x| ((y * 5 + x) * 7 % 25) as u8);
        let out = filter_region(&Region::new(0, 5, 0, 5), &grid.view());
        assert_eq!(out.get(2, 2), 12);
    }

    #[test]
    fn test_median_rejects_salt_noise() {
        let grid = PixelGrid::from_fn(7, 7, |y, x| match (y, x) {
            (3, 3) => 255,
            (2, 4) => 0,
            _ => 50,
        });
        let out = filter_region(&Region::new(0, 7, 0, 7), &grid.view());
        assert_eq!(out.get(3, 3), 50);
    }

    #[test]
    fn test_small_region_is_all_zero() {
        let grid = PixelGrid::filled(4, 9, 200);
        let out = filter_region(&Region::new(0, 4, 0, 9), &grid.view());
        assert_eq!(out.dimensions(), (4, 9));
        assert!(out.as_raw().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_subregion_is_relative_to_region_origin() {
        let grid = PixelGrid::filled(12, 12, 77);
        let region = Region::new(3, 10, 2, 9);
        let out = filter_region(&region, &grid.view());
        assert_eq!(out.dimensions(), (7, 7));
        assert_eq!(out.get(2, 2), 77);
        assert_eq!(out.get(4, 4), 77);
        assert_eq!(out.get(1, 3), 0);
        assert_eq!(out.get(5, 3), 0);
    }

    #[test]
    #[should_panic]
    fn test_region_outside_grid_panics() {
        let grid = PixelGrid::new(5, 5);
        filter_region(&Region::new(0, 6, 0, 5), &grid.view());
    }
}
