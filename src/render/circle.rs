use crate::picture::{Color, Picture};

/// Midpoint circle outline: walks one octant with an integer decision
/// variable and mirrors every step into the other seven. Radius 0 plots the
/// center pixel.
pub fn draw_circle(picture: &mut Picture, cx: isize, cy: isize, radius: isize, color: &Color) {
    let mut x = 0;
    let mut y = radius;
    let mut p = 1 - radius;

    while x <= y {
        let points = [
            (cx + x, cy + y),
            (cx - x, cy + y),
            (cx + x, cy - y),
            (cx - x, cy - y),
            (cx + y, cy + x),
            (cx - y, cy + x),
            (cx + y, cy - x),
            (cx - y, cy - x),
        ];
        for (px, py) in points {
            picture.put_pixel(px, py, color);
        }

        if p < 0 {
            p += 2 * x + 3;
        } else {
            p += 2 * (x - y) + 5;
            y -= 1;
        }
        x += 1;
    }
}

/// Dense fill: tests every pixel of the bounding square against the circle
/// equation. O(r^2), fine for the small circles scenes actually use.
pub fn fill_circle(picture: &mut Picture, cx: isize, cy: isize, radius: isize, color: &Color) {
    for y in cy - radius..=cy + radius {
        for x in cx - radius..=cx + radius {
            if (x - cx) * (x - cx) + (y - cy) * (y - cy) <= radius * radius {
                picture.put_pixel(x, y, color);
            }
        }
    }
}
