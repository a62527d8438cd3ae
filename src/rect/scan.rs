use super::{Rectangle, BOUNDARY_EPS};

/// Iterator over the grid pixels inside a rectangle, row by row.
///
/// Scans the clipped bounding box of the corners and keeps the pixels whose
/// centres pass [`Rectangle::contains`].
pub struct RectPixels<'a> {
    rect: &'a Rectangle,
    x0: i64,
    x1: i64,
    y1: i64,
    x: i64,
    y: i64,
}

impl<'a> RectPixels<'a> {
    pub(super) fn new(rect: &'a Rectangle, width: usize, height: usize) -> Self {
        let corners = rect.corners();
        let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
        for (cx, cy) in corners {
            min_x = min_x.min(cx);
            max_x = max_x.max(cx);
            min_y = min_y.min(cy);
            max_y = max_y.max(cy);
        }
        let finite = min_x.is_finite() && max_x.is_finite() && min_y.is_finite() && max_y.is_finite();
        if !finite || width == 0 || height == 0 {
            return Self::empty(rect);
        }
        let x0 = ((min_x - BOUNDARY_EPS).ceil() as i64).max(0);
        let x1 = ((max_x + BOUNDARY_EPS).floor() as i64).min(width as i64 - 1);
        let y0 = ((min_y - BOUNDARY_EPS).ceil() as i64).max(0);
        let y1 = ((max_y + BOUNDARY_EPS).floor() as i64).min(height as i64 - 1);
        Self {
            rect,
            x0,
            x1,
            y1,
            x: x0,
            y: y0,
        }
    }

    fn empty(rect: &'a Rectangle) -> Self {
        Self {
            rect,
            x0: 0,
            x1: -1,
            y1: -1,
            x: 0,
            y: 0,
        }
    }
}

impl<'a> Iterator for RectPixels<'a> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while self.y <= self.y1 {
            while self.x <= self.x1 {
                let (x, y) = (self.x, self.y);
                self.x += 1;
                if self.rect.contains(x as f64, y as f64) {
                    return Some((x as usize, y as usize));
                }
            }
            self.x = self.x0;
            self.y += 1;
        }
        None
    }
}
