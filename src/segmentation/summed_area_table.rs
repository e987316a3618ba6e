use image::Primitive;

/// Summed-area table over a single-channel grid
///
/// Each entry holds the sum of every value in the rectangle spanning the
/// origin `(0, 0)` and that entry, so any axis-aligned window sum costs four
/// lookups regardless of the window size.
pub struct SummedAreaTable<T> {
    data: Vec<T>,
    width: u32,
    height: u32,
}

impl<T> SummedAreaTable<T>
where
    T: Primitive,
{
    /// Builds a table from a value function evaluated once per grid cell.
    ///
    /// # Arguments
    /// * `width` - Grid width
    /// * `height` - Grid height
    /// * `value` - Value of cell `(x, y)`
    pub fn from_fn<F>(width: u32, height: u32, value: F) -> Self
    where
        F: Fn(u32, u32) -> T,
    {
        let mut data = vec![T::zero(); width as usize * height as usize];
        let row_len = width as usize;

        for y in 0..height {
            let row = y as usize * row_len;
            for x in 0..width {
                let index = row + x as usize;
                // sat(x, y) = v(x, y) + sat(x-1, y) + sat(x, y-1) - sat(x-1, y-1)
                let mut sum = value(x, y);
                if x > 0 {
                    sum = sum + data[index - 1];
                }
                if y > 0 {
                    sum = sum + data[index - row_len];
                }
                if x > 0 && y > 0 {
                    sum = sum - data[index - row_len - 1];
                }
                data[index] = sum;
            }
        }

        Self {
            data,
            width,
            height,
        }
    }

    /// Builds a table from row-major single-channel data.
    #[cfg(test)]
    pub fn from_data(data: &[T], width: u32, height: u32) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize);
        Self::from_fn(width, height, |x, y| data[(y * width + x) as usize])
    }

    /// Table value at `(x, y)`; zero outside the grid.
    #[must_use]
    pub fn get(&self, x: i64, y: i64) -> T {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            T::zero()
        } else {
            self.data[y as usize * self.width as usize + x as usize]
        }
    }

    /// Sum of the values in the inclusive rectangle `(x1, y1)..=(x2, y2)`,
    /// clipped to the grid.
    #[must_use]
    pub fn rectangle_sum(&self, x1: i64, y1: i64, x2: i64, y2: i64) -> T {
        let x1 = x1.max(0);
        let y1 = y1.max(0);
        let x2 = x2.min(i64::from(self.width) - 1);
        let y2 = y2.min(i64::from(self.height) - 1);

        if x1 > x2 || y1 > y2 {
            return T::zero();
        }

        // Sum = sat(x2, y2) - sat(x1-1, y2) - sat(x2, y1-1) + sat(x1-1, y1-1),
        // grouped so unsigned sums never underflow.
        let included = self.get(x2, y2) + self.get(x1 - 1, y1 - 1);
        let excluded = self.get(x2, y1 - 1) + self.get(x1 - 1, y2);
        included - excluded
    }

    #[cfg(test)]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[cfg(test)]
    pub const fn height(&self) -> u32 {
        self.height
    }
}
