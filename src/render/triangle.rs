use crate::picture::{Color, Picture};
use crate::render::line::draw_line;

/// Signed area of the triangle a-b-c (doubled). The sign says which side of
/// the directed line a->b the point c lies on.
pub fn edge_function(a: &[f32; 2], b: &[f32; 2], c: &[f32; 2]) -> f32 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

/// Solid fill: every pixel of the bounding box whose three edge functions
/// agree with the triangle's winding is written. Pixels exactly on an edge
/// shared by two triangles can be claimed by both; that ambiguity is part of
/// the sampling rule.
pub fn fill_triangle(picture: &mut Picture, a: [f32; 2], b: [f32; 2], c: [f32; 2], color: &Color) {
    let area = edge_function(&a, &b, &c);
    if area == 0.0 {
        return;
    }
    let clockwise = area < 0.0;

    let min_x = a[0].min(b[0]).min(c[0]) as isize;
    let min_y = a[1].min(b[1]).min(c[1]) as isize;
    let max_x = a[0].max(b[0]).max(c[0]) as isize;
    let max_y = a[1].max(b[1]).max(c[1]) as isize;

    for py in min_y..max_y {
        for px in min_x..max_x {
            let p = [px as f32, py as f32];
            let abp = edge_function(&a, &b, &p);
            let bcp = edge_function(&b, &c, &p);
            let cap = edge_function(&c, &a, &p);

            let inside = if clockwise {
                abp <= 0.0 && bcp <= 0.0 && cap <= 0.0
            } else {
                abp >= 0.0 && bcp >= 0.0 && cap >= 0.0
            };

            if inside {
                picture.put_pixel(px, py, color);
            }
        }
    }
}

/// Fill with one color per vertex, blended per pixel by barycentric weights
/// (each weight is a sub-triangle edge function over the full area). A
/// zero-area triangle contributes nothing.
pub fn fill_triangle_interpolated(
    picture: &mut Picture,
    a: [f32; 2],
    b: [f32; 2],
    c: [f32; 2],
    color_a: &Color,
    color_b: &Color,
    color_c: &Color,
) {
    let area = edge_function(&a, &b, &c);
    if area == 0.0 {
        return;
    }
    let clockwise = area < 0.0;

    let min_x = a[0].min(b[0]).min(c[0]) as isize;
    let min_y = a[1].min(b[1]).min(c[1]) as isize;
    let max_x = a[0].max(b[0]).max(c[0]) as isize;
    let max_y = a[1].max(b[1]).max(c[1]) as isize;

    for py in min_y..max_y {
        for px in min_x..max_x {
            let p = [px as f32, py as f32];
            let abp = edge_function(&a, &b, &p);
            let bcp = edge_function(&b, &c, &p);
            let cap = edge_function(&c, &a, &p);

            let inside = if clockwise {
                abp <= 0.0 && bcp <= 0.0 && cap <= 0.0
            } else {
                abp >= 0.0 && bcp >= 0.0 && cap >= 0.0
            };

            if inside {
                let weight_a = bcp / area;
                let weight_b = cap / area;
                let weight_c = abp / area;

                let color = Color::new(
                    (weight_a * color_a.r as f32 + weight_b * color_b.r as f32 + weight_c * color_c.r as f32).round() as i32,
                    (weight_a * color_a.g as f32 + weight_b * color_b.g as f32 + weight_c * color_c.g as f32).round() as i32,
                    (weight_a * color_a.b as f32 + weight_b * color_b.b as f32 + weight_c * color_c.b as f32).round() as i32,
                );

                picture.put_pixel(px, py, &color);
            }
        }
    }
}

/// Outline mode: just the three edges, no interior fill.
pub fn draw_triangle(picture: &mut Picture, a: [f32; 2], b: [f32; 2], c: [f32; 2], color: &Color) {
    draw_line(picture, a[0] as isize, a[1] as isize, b[0] as isize, b[1] as isize, color);
    draw_line(picture, b[0] as isize, b[1] as isize, c[0] as isize, c[1] as isize, color);
    draw_line(picture, c[0] as isize, c[1] as isize, a[0] as isize, a[1] as isize, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BLACK;

    #[test]
    fn fill_contains_interior_and_excludes_far_corner() {
        let mut picture = Picture::new(16, 16, &BLACK);
        let white = Color::new(255, 255, 255);
        fill_triangle(&mut picture, [0.0, 0.0], [10.0, 0.0], [0.0, 10.0], &white);

        assert_eq!(picture.get_pixel(2, 2), Some(white));
        assert_eq!(picture.get_pixel(9, 9), Some(BLACK));
    }

    #[test]
    fn both_windings_fill_the_same_pixels() {
        let white = Color::new(255, 255, 255);

        let mut ccw = Picture::new(16, 16, &BLACK);
        fill_triangle(&mut ccw, [0.0, 0.0], [10.0, 0.0], [0.0, 10.0], &white);

        let mut cw = Picture::new(16, 16, &BLACK);
        fill_triangle(&mut cw, [0.0, 0.0], [0.0, 10.0], [10.0, 0.0], &white);

        assert_eq!(ccw.data, cw.data);
    }

    #[test]
    fn degenerate_triangle_contributes_no_pixels() {
        let mut picture = Picture::new(16, 16, &BLACK);
        fill_triangle(&mut picture, [1.0, 1.0], [5.0, 5.0], [9.0, 9.0], &Color::new(255, 0, 0));
        assert!(picture.data.iter().all(|&byte| byte == 0));

        fill_triangle_interpolated(
            &mut picture,
            [1.0, 1.0],
            [5.0, 5.0],
            [9.0, 9.0],
            &Color::new(255, 0, 0),
            &Color::new(0, 255, 0),
            &Color::new(0, 0, 255),
        );
        assert!(picture.data.iter().all(|&byte| byte == 0));
    }

    #[test]
    fn interpolated_channels_balance_at_the_centroid() {
        let mut picture = Picture::new(64, 64, &BLACK);
        fill_triangle_interpolated(
            &mut picture,
            [0.0, 0.0],
            [60.0, 0.0],
            [0.0, 60.0],
            &Color::new(255, 0, 0),
            &Color::new(0, 255, 0),
            &Color::new(0, 0, 255),
        );

        let centroid = picture.get_pixel(20, 20).unwrap();
        let channels = [centroid.r as i32, centroid.g as i32, centroid.b as i32];
        for pair in channels.windows(2) {
            assert!((pair[0] - pair[1]).abs() <= 8, "unbalanced centroid {:?}", channels);
        }
    }

    #[test]
    fn interpolation_hits_pure_vertex_colors_at_the_corners() {
        let mut picture = Picture::new(64, 64, &BLACK);
        fill_triangle_interpolated(
            &mut picture,
            [0.0, 0.0],
            [60.0, 0.0],
            [0.0, 60.0],
            &Color::new(255, 0, 0),
            &Color::new(0, 255, 0),
            &Color::new(0, 0, 255),
        );

        let near_a = picture.get_pixel(0, 0).unwrap();
        assert!(near_a.r > 250 && near_a.g < 5 && near_a.b < 5);
    }

    #[test]
    fn outline_mode_leaves_the_interior_empty() {
        let mut picture = Picture::new(32, 32, &BLACK);
        let white = Color::new(255, 255, 255);
        draw_triangle(&mut picture, [0.0, 0.0], [20.0, 0.0], [0.0, 20.0], &white);

        assert_eq!(picture.get_pixel(1, 0), Some(white));
        assert_eq!(picture.get_pixel(0, 1), Some(white));
        assert_eq!(picture.get_pixel(5, 5), Some(BLACK));
    }
}
