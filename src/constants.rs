#![allow(dead_code)]
use crate::picture::Color;

/* CONFIG */
pub const DEFAULT_SCENE: &str = "scenes/showcase.rscn";
pub const DEFAULT_PICTURE_DIMENSIONS: (usize, usize) = (500, 500);
pub const DEFAULT_BACKGROUND_COLOR: Color = WHITE;
pub const DEFAULT_SPHERE_SECTORS: usize = 36;
pub const DEFAULT_SPHERE_STACKS: usize = 18;
// used when the scene defines no lights at all so geometry isn't pitch black
pub const FALLBACK_AMBIENT_INTENSITY: f32 = 0.2;
// the z-buffer already resolves occlusion and imported meshes don't
// guarantee consistent winding, so culling stays off unless asked for
pub const ENABLE_BACK_FACE_CULLING: bool = false;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShadingMode {
    Wireframe,
    Random,
    Flat,
}
pub const DEFAULT_SHADING_MODE: ShadingMode = ShadingMode::Flat;

/* COLORS */
pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };
pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
pub const RED: Color = Color { r: 255, g: 0, b: 0 };
pub const GREEN: Color = Color { r: 0, g: 255, b: 0 };
pub const BLUE: Color = Color { r: 0, g: 0, b: 255 };
pub const CYAN: Color = Color { r: 0, g: 255, b: 255 };
pub const YELLOW: Color = Color { r: 255, g: 255, b: 0 };
pub const MAGENTA: Color = Color { r: 255, g: 0, b: 255 };
