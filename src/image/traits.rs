/// Row access shared by the owned float grid and borrowed 8-bit views.
pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// The `width()` samples of row `y`, without padding.
    fn row(&self, y: usize) -> &[Self::Pixel];

    /// Pair of consecutive rows `y` and `y + 1`, as read by 2x2 stencils.
    fn row_pair(&self, y: usize) -> (&[Self::Pixel], &[Self::Pixel]) {
        (self.row(y), self.row(y + 1))
    }
}

/// Row-wise write access for rasters that own their storage.
pub trait ImageViewMut: ImageView {
    fn row_mut(&mut self, y: usize) -> &mut [Self::Pixel];
}
