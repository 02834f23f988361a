mod camera;
mod constants;
mod geometry;
mod matrix;
mod picture;
mod render;
mod scene;
mod vector;

use std::{env, error::Error};

#[show_image::main]
fn main() -> Result<(), Box<dyn Error>> {
    let arguments: Vec<String> = env::args().collect();

    if arguments.len() < 2 {
        println!("A scene file wasn't provided. '{}' was chosen by default.", constants::DEFAULT_SCENE);
        scene::run_scene(constants::DEFAULT_SCENE)?;
    } else {
        for path in &arguments[1..] {
            println!("Rendering scene '{}'.", path);
            scene::run_scene(path)?;
        }
    }

    Ok(())
}
