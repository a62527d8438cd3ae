use super::ImageView;

/// Borrowed 8-bit grayscale view, typically straight from a decoder buffer.
#[derive(Clone, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// True when the backing slice is large enough for `h` rows of `stride` bytes.
    pub fn is_well_formed(&self) -> bool {
        self.stride >= self.w
            && (self.h == 0 || self.data.len() >= (self.h - 1) * self.stride + self.w)
    }
}

impl<'a> ImageView for ImageU8<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}
