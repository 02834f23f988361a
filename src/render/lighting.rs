use crate::constants::FALLBACK_AMBIENT_INTENSITY;
use crate::vector::{dot_product, magnitude, normalize_vector};

type Vector = [f32; 3];

pub struct DirectionalLight {
    pub direction: Vector,
    pub intensity: f32,
}

/// At most one ambient and one directional light, per the scene format.
pub struct LightingConfig {
    pub ambient_intensity: Option<f32>,
    pub directional: Option<DirectionalLight>,
}

impl LightingConfig {
    pub fn unlit() -> Self {
        Self { ambient_intensity: None, directional: None }
    }
}

/// Flat shading intensity for one face:
/// `ambient + max(0, normal . light) * directional`.
///
/// A scene with no lights at all falls back to a low ambient constant so
/// geometry stays visible. A zero-length light direction contributes nothing
/// instead of dividing by zero.
pub fn get_illumination(normal: &Vector, config: &LightingConfig) -> f32 {
    if config.ambient_intensity.is_none() && config.directional.is_none() {
        return FALLBACK_AMBIENT_INTENSITY;
    }

    let normal = normalize_vector(normal);
    let mut total = config.ambient_intensity.unwrap_or(0.0);

    if let Some(light) = &config.directional
        && magnitude(&light.direction) > 0.0
    {
        let light_direction = normalize_vector(&light.direction);
        total += f32::max(0.0, dot_product(&normal, &light_direction)) * light.intensity;
    }

    total
}
