use crate::error::FilterError;
use crate::filter::Region;

/// Owned row-major grid of 8-bit luminance samples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    height: usize,
    width: usize,
    data: Vec<u8>,
}

impl PixelGrid {
    /// Create a grid with every sample set to 0
    pub fn new(height: usize, width: usize) -> Self {
        Self::filled(height, width, 0)
    }

    /// Create a grid with every sample set to `value`
    pub fn filled(height: usize, width: usize, value: u8) -> Self {
        Self {
            height,
            width,
            data: vec![value; height * width],
        }
    }

    /// Wrap existing row-major samples; the length must match the dimensions
    pub fn from_raw(height: usize, width: usize, data: Vec<u8>) -> Result<Self, FilterError> {
        let expected = height * width;
        if data.len() != expected {
            return Err(FilterError::GridSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { height, width, data })
    }

    /// Build a grid by evaluating `f(y, x)` for every coordinate
    pub fn from_fn<F>(height: usize, width: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> u8,
    {
        let mut data = Vec::with_capacity(height * width);
        for y in 0..height {
            for x in 0..width {
                data.push(f(y, x));
            }
        }
        Self { height, width, data }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn get(&self, y: usize, x: usize) -> u8 {
        self.data[self.index(y, x)]
    }

    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.width;
        &mut self.data[start..start + self.width]
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Borrow the grid as a read-only view
    pub fn view(&self) -> GridView<'_> {
        GridView {
            data: &self.data,
            height: self.height,
            width: self.width,
        }
    }

    /// Copy the rows `[offset, offset + len)` into a new grid
    pub fn rows_range(&self, offset: usize, len: usize) -> PixelGrid {
        let start = offset * self.width;
        let end = (offset + len) * self.width;
        PixelGrid {
            height: len,
            width: self.width,
            data: self.data[start..end].to_vec(),
        }
    }

    /// Copy every row of `partial` into this grid starting at global row `start_y`
    pub fn paste_rows(&mut self, start_y: usize, partial: &PixelGrid) {
        assert_eq!(
            partial.width, self.width,
            "partial grid width {} does not match output width {}",
            partial.width, self.width
        );
        for i in 0..partial.height {
            self.row_mut(start_y + i).copy_from_slice(partial.row(i));
        }
    }

    #[inline]
    fn index(&self, y: usize, x: usize) -> usize {
        assert!(
            y < self.height && x < self.width,
            "grid access ({}, {}) outside {}x{}",
            y,
            x,
            self.height,
            self.width
        );
        y * self.width + x
    }
}

/// Read-only, zero-copy view over a [`PixelGrid`]
///
/// Views are `Copy` and `Sync`, so any number of band workers can read the
/// same backing grid at once. The borrow keeps the grid alive and unmodified
/// for as long as a view exists.
#[derive(Debug, Clone, Copy)]
pub struct GridView<'a> {
    data: &'a [u8],
    height: usize,
    width: usize,
}

impl<'a> GridView<'a> {
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Sample at `(y, x)`. Out-of-range coordinates panic.
    #[inline]
    pub fn get(&self, y: usize, x: usize) -> u8 {
        assert!(
            y < self.height && x < self.width,
            "view access ({}, {}) outside {}x{}",
            y,
            x,
            self.height,
            self.width
        );
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    /// Whether `region` lies entirely inside the viewed grid
    pub fn contains(&self, region: &Region) -> bool {
        region.start_y <= region.end_y
            && region.start_x <= region.end_x
            && region.end_y <= self.height
            && region.end_x <= self.width
    }
}
