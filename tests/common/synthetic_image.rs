use lsd_detector::image::ImageF32;

/// Uniform image.
pub fn flat(width: usize, height: usize, value: f32) -> ImageF32 {
    ImageF32::filled(width, height, value)
}

/// Black square with the half-plane `x - y >= offset` bright: a single
/// 45° edge running from the top border to the right border.
pub fn diagonal_half_plane(size: usize, offset: i64) -> ImageF32 {
    let mut img = ImageF32::new(size, size);
    for y in 0..size {
        for x in 0..size {
            if x as i64 - y as i64 >= offset {
                img.set(x, y, 255.0);
            }
        }
    }
    img
}

/// Black square with a one-pixel bright 45° line: pixels
/// `(start + i, start + i)` for `i` in `0..count`.
pub fn diagonal_line(size: usize, start: usize, count: usize) -> ImageF32 {
    let mut img = ImageF32::new(size, size);
    for i in 0..count {
        img.set(start + i, start + i, 255.0);
    }
    img
}

/// Dark on the left of `split_x`, bright from it on.
pub fn vertical_step(width: usize, height: usize, split_x: usize) -> ImageF32 {
    let mut img = ImageF32::new(width, height);
    for y in 0..height {
        for x in split_x..width {
            img.set(x, y, 200.0);
        }
    }
    img
}

/// Bright axis-aligned box covering `[x0, x1) × [y0, y1)` on a dark field.
pub fn bright_box(width: usize, height: usize, x0: usize, y0: usize, x1: usize, y1: usize) -> ImageF32 {
    assert!(x0 < x1 && x1 <= width && y0 < y1 && y1 <= height, "box must fit the image");
    let mut img = ImageF32::filled(width, height, 20.0);
    for y in y0..y1 {
        for x in x0..x1 {
            img.set(x, y, 200.0);
        }
    }
    img
}

/// 100×100 scene: a box in the lower-left quadrant and a bright diagonal
/// half-plane in the upper-right corner.
pub fn shapes_scene() -> ImageF32 {
    let mut img = bright_box(100, 100, 15, 55, 45, 85);
    for y in 0..100usize {
        for x in 0..100usize {
            if x as i64 - y as i64 >= 50 {
                img.set(x, y, 230.0);
            }
        }
    }
    img
}
