pub mod circle;
pub mod lighting;
pub mod line;
pub mod scan_line;
pub mod triangle;

pub use crate::picture::Picture;
pub use lighting::{DirectionalLight, LightingConfig, get_illumination};
