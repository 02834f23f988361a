use crate::picture::{Color, Picture};

/// Bresenham segment rasterizer. Every pixel between the endpoints is
/// written exactly once with integer decisions only; a zero-length segment
/// plots a single pixel. No clipping happens here.
pub fn draw_line(picture: &mut Picture, x0: isize, y0: isize, x1: isize, y1: isize, color: &Color) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let step_x = if x0 < x1 { 1 } else { -1 };
    let step_y = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        picture.put_pixel(x, y, color);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += step_x;
        }
        if e2 <= dx {
            err += dx;
            y += step_y;
        }
    }
}
