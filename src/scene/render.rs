use std::{collections::HashMap, error::Error};

use rand::Rng;

use crate::{
    camera::{Camera, Projection},
    constants::{
        DEFAULT_BACKGROUND_COLOR, DEFAULT_PICTURE_DIMENSIONS, DEFAULT_SHADING_MODE,
        DEFAULT_SPHERE_SECTORS, DEFAULT_SPHERE_STACKS, ENABLE_BACK_FACE_CULLING, ShadingMode,
    },
    geometry::{Mesh, cube_mesh, sphere_mesh},
    matrix::{
        Matrix3, Matrix4, Transform2d, Transform3d, apply_3, apply_4, compose_2d, compose_3d,
        identity_4, multiply_4, translation_3d,
    },
    picture::{Color, Picture},
    render::{
        DirectionalLight, LightingConfig, get_illumination,
        circle::{draw_circle, fill_circle},
        line::draw_line,
        scan_line::fill_polygon,
        triangle::{draw_triangle, fill_triangle, fill_triangle_interpolated},
    },
    vector::{cross_product, dot_product, magnitude, normalize_vector, subtract_vectors},
};
use super::{mesh::load_mesh, parser::Command};

/// Per-object result: a missing material reference skips just that object
/// (the caller prints the reason and the rest of the scene still renders);
/// everything else that goes wrong is a hard error.
pub enum RenderOutcome {
    Drawn,
    Skipped(String),
}

struct SceneContext {
    picture: Picture,
    materials: HashMap<String, Color>,
    camera: Option<Camera>,
    projection: Projection,
    ortho_bounds: Option<[f32; 4]>,
    // rebuilt when the camera or projection changes, reused for every
    // object in between
    view_projection: Matrix4,
    lighting_config: LightingConfig,
    shading_mode: ShadingMode,
    pending_2d: Vec<Transform2d>,
    pending_3d: Vec<Transform3d>,
}

impl SceneContext {
    fn new() -> Self {
        Self {
            picture: Picture::new(
                DEFAULT_PICTURE_DIMENSIONS.0,
                DEFAULT_PICTURE_DIMENSIONS.1,
                &DEFAULT_BACKGROUND_COLOR,
            ),
            materials: HashMap::new(),
            camera: None,
            projection: Projection::None,
            ortho_bounds: None,
            view_projection: identity_4(),
            lighting_config: LightingConfig::unlit(),
            shading_mode: DEFAULT_SHADING_MODE,
            pending_2d: vec![],
            pending_3d: vec![],
        }
    }

    fn recompute_view_projection(&mut self) {
        self.view_projection = match &mut self.camera {
            Some(camera) => {
                camera.ortho_bounds = self.ortho_bounds;
                multiply_4(&camera.projection_matrix(self.projection), &camera.view_matrix())
            }
            None => identity_4(),
        };
    }

    fn resolve_material(&self, name: &str) -> Option<Color> {
        self.materials.get(name).copied()
    }

    fn take_transforms_2d(&mut self) -> Result<Vec<Transform2d>, Box<dyn Error>> {
        if !self.pending_3d.is_empty() {
            return Err("3D transform steps cannot apply to a 2D shape".into());
        }
        Ok(std::mem::take(&mut self.pending_2d))
    }

    fn take_transforms_3d(&mut self) -> Result<Vec<Transform3d>, Box<dyn Error>> {
        if !self.pending_2d.is_empty() {
            return Err("2D transform steps cannot apply to a 3D solid".into());
        }
        Ok(std::mem::take(&mut self.pending_3d))
    }
}

pub fn evaluate_commands(commands: Vec<Command>) -> Result<Picture, Box<dyn Error>> {
    let mut context = SceneContext::new();

    for command in commands {
        execute_command(command, &mut context)?;
    }

    Ok(context.picture)
}

fn report(outcome: RenderOutcome) {
    if let RenderOutcome::Skipped(reason) = outcome {
        eprintln!("Warning: {}", reason);
    }
}

fn execute_command(command: Command, context: &mut SceneContext) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Display => {
            context.picture.display()?;
        }

        Command::Save { file_path } => {
            context.picture.save_as_file(&file_path)?;
        }

        Command::Clear => {
            context.picture.clear();
            context.pending_2d.clear();
            context.pending_3d.clear();
        }

        Command::SetCanvas { width, height, r, g, b } => {
            context.picture = Picture::new(width, height, &Color::new(r, g, b));
            if let Some(camera) = &mut context.camera {
                camera.aspect_ratio = width as f32 / height as f32;
            }
            context.recompute_view_projection();
        }

        Command::DefineMaterial { name, r, g, b } => {
            context.materials.insert(name, Color::new(r, g, b));
        }

        Command::SetCamera { position, target, up, fov, near, far } => {
            context.camera = Some(Camera {
                position,
                target,
                up: normalize_vector(&up),
                fov,
                aspect_ratio: context.picture.xres as f32 / context.picture.yres as f32,
                near,
                far,
                ortho_bounds: context.ortho_bounds,
            });
            context.recompute_view_projection();
        }

        Command::SetProjection { kind, bounds } => {
            context.ortho_bounds = bounds;
            context.projection = match kind.as_str() {
                "perspective" => Projection::Perspective,
                "orthographic" => Projection::Orthographic,
                other => {
                    eprintln!("Unknown projection kind '{}', using the identity projection", other);
                    Projection::None
                }
            };
            context.recompute_view_projection();
        }

        Command::SetAmbient { intensity } => {
            context.lighting_config.ambient_intensity = Some(intensity);
        }

        Command::AddLight { direction, intensity } => {
            context.lighting_config.directional = Some(DirectionalLight { direction, intensity });
        }

        Command::SetShading { shading_mode } => {
            context.shading_mode = shading_mode;
        }

        Command::Move { a, b, c } => match c {
            Some(c) => context.pending_3d.push(Transform3d::Translate(a, b, c)),
            None => context.pending_2d.push(Transform2d::Translate(a, b)),
        },

        Command::Scale { a, b, c } => match c {
            Some(c) => context.pending_3d.push(Transform3d::Scale(a, b, c)),
            None => context.pending_2d.push(Transform2d::Scale(a, b)),
        },

        Command::Rotate { axis, degrees } => match axis {
            Some(axis) => context.pending_3d.push(Transform3d::Rotate(axis, degrees)),
            None => context.pending_2d.push(Transform2d::Rotate(degrees)),
        },

        Command::Line { material, start, end } => {
            report(render_line(context, &material, start, end)?);
        }

        Command::Circle { material, center, radius, filled } => {
            report(render_circle(context, &material, center, radius, filled)?);
        }

        Command::Triangle { materials, vertices, outline } => {
            report(render_triangle(context, &materials, vertices, outline)?);
        }

        Command::Polygon { material, vertices } => {
            report(render_polygon(context, &material, &vertices)?);
        }

        Command::Box { material, edge_material, center, width, height, depth } => {
            let mesh = cube_mesh(width, height, depth);
            report(render_solid(context, &material, &edge_material, &mesh, center, "box")?);
        }

        Command::Sphere { material, edge_material, center, radius, sectors, stacks } => {
            let mesh = sphere_mesh(
                radius,
                sectors.unwrap_or(DEFAULT_SPHERE_SECTORS),
                stacks.unwrap_or(DEFAULT_SPHERE_STACKS),
            );
            report(render_solid(context, &material, &edge_material, &mesh, center, "sphere")?);
        }

        Command::Mesh { material, edge_material, file_path } => {
            let mesh = load_mesh(&file_path)?;
            report(render_solid(context, &material, &edge_material, &mesh, [0.0, 0.0, 0.0], "mesh")?);
        }
    }

    Ok(())
}

fn render_line(
    context: &mut SceneContext,
    material: &str,
    start: [f32; 2],
    end: [f32; 2],
) -> Result<RenderOutcome, Box<dyn Error>> {
    let steps = context.take_transforms_2d()?;

    let Some(color) = context.resolve_material(material) else {
        return Ok(RenderOutcome::Skipped(format!("material '{}' is not defined, skipping line", material)));
    };

    let net = compose_2d(&steps);
    let (x0, y0) = transform_to_screen(context, &net, start);
    let (x1, y1) = transform_to_screen(context, &net, end);
    draw_line(&mut context.picture, x0, y0, x1, y1, &color);

    Ok(RenderOutcome::Drawn)
}

fn render_circle(
    context: &mut SceneContext,
    material: &str,
    center: [f32; 2],
    radius: f32,
    filled: bool,
) -> Result<RenderOutcome, Box<dyn Error>> {
    let steps = context.take_transforms_2d()?;

    let Some(color) = context.resolve_material(material) else {
        return Ok(RenderOutcome::Skipped(format!("material '{}' is not defined, skipping circle", material)));
    };

    // transforms place the center; the radius itself stays untouched since
    // a non-uniform scale has no circle to map to
    let net = compose_2d(&steps);
    let (cx, cy) = transform_to_screen(context, &net, center);
    let radius = radius.round() as isize;

    if filled {
        fill_circle(&mut context.picture, cx, cy, radius, &color);
    } else {
        draw_circle(&mut context.picture, cx, cy, radius, &color);
    }

    Ok(RenderOutcome::Drawn)
}

fn render_triangle(
    context: &mut SceneContext,
    materials: &[String],
    vertices: [[f32; 2]; 3],
    outline: bool,
) -> Result<RenderOutcome, Box<dyn Error>> {
    let steps = context.take_transforms_2d()?;

    let mut colors = vec![];
    for name in materials {
        match context.resolve_material(name) {
            Some(color) => colors.push(color),
            None => {
                return Ok(RenderOutcome::Skipped(format!("material '{}' is not defined, skipping triangle", name)));
            }
        }
    }

    let net = compose_2d(&steps);
    let screen: Vec<[f32; 2]> = vertices
        .iter()
        .map(|&vertex| {
            let (x, y) = transform_to_screen(context, &net, vertex);
            [x as f32, y as f32]
        })
        .collect();

    if outline {
        draw_triangle(&mut context.picture, screen[0], screen[1], screen[2], &colors[0]);
    } else if colors.len() == 3 {
        fill_triangle_interpolated(
            &mut context.picture,
            screen[0],
            screen[1],
            screen[2],
            &colors[0],
            &colors[1],
            &colors[2],
        );
    } else {
        fill_triangle(&mut context.picture, screen[0], screen[1], screen[2], &colors[0]);
    }

    Ok(RenderOutcome::Drawn)
}

fn render_polygon(
    context: &mut SceneContext,
    material: &str,
    vertices: &[[f32; 2]],
) -> Result<RenderOutcome, Box<dyn Error>> {
    let steps = context.take_transforms_2d()?;

    let Some(color) = context.resolve_material(material) else {
        return Ok(RenderOutcome::Skipped(format!("material '{}' is not defined, skipping polygon", material)));
    };

    let net = compose_2d(&steps);
    let screen: Vec<[f32; 3]> = vertices
        .iter()
        .map(|&vertex| {
            let (x, y) = transform_to_screen(context, &net, vertex);
            [x as f32, y as f32, 0.0]
        })
        .collect();

    fill_polygon(&mut context.picture, &screen, &color, false);

    Ok(RenderOutcome::Drawn)
}

// shared pipeline for boxes, spheres and imported meshes
fn render_solid(
    context: &mut SceneContext,
    material: &str,
    edge_material: &Option<String>,
    mesh: &Mesh,
    center: [f32; 3],
    kind: &str,
) -> Result<RenderOutcome, Box<dyn Error>> {
    let steps = context.take_transforms_3d()?;

    let Some(color) = context.resolve_material(material) else {
        return Ok(RenderOutcome::Skipped(format!("material '{}' is not defined, skipping {}", material, kind)));
    };

    let edge_color = match edge_material {
        Some(name) => match context.resolve_material(name) {
            Some(color) => Some(color),
            None => {
                return Ok(RenderOutcome::Skipped(format!("edge material '{}' is not defined, skipping {}", name, kind)));
            }
        },
        None => None,
    };

    // solids are generated around their local origin; the authored steps
    // run first and the placement translation last
    let model = multiply_4(
        &translation_3d(center[0], center[1], center[2]),
        &compose_3d(&steps),
    );

    let world: Vec<[f32; 4]> = mesh.vertices.iter().map(|v| apply_4(&model, v)).collect();
    let projected: Vec<Option<[f32; 3]>> = world.iter().map(|v| project_vertex(context, v)).collect();

    for face in &mesh.faces {
        // flat shading wants the world-space normal, before projection
        let a = subtract_vectors(&xyz(&world[face[1]]), &xyz(&world[face[0]]));
        let b = subtract_vectors(&xyz(&world[face[2]]), &xyz(&world[face[0]]));
        let normal = cross_product(&a, &b);
        if magnitude(&normal) == 0.0 {
            // degenerate face, nothing to shade
            continue;
        }
        let normal = normalize_vector(&normal);

        if ENABLE_BACK_FACE_CULLING
            && let Some(camera) = &context.camera
        {
            let to_eye = subtract_vectors(&camera.position, &xyz(&world[face[0]]));
            if dot_product(&normal, &to_eye) <= 0.0 {
                continue;
            }
        }

        let screen: Option<Vec<[f32; 3]>> = face.iter().map(|&index| projected[index]).collect();
        let Some(screen) = screen else {
            // a vertex landed on the camera plane, skip the face
            continue;
        };

        match context.shading_mode {
            ShadingMode::Wireframe => {}
            ShadingMode::Random => {
                let mut rng = rand::rng();
                let face_color = Color::new(
                    rng.random::<u8>() as i32,
                    rng.random::<u8>() as i32,
                    rng.random::<u8>() as i32,
                );
                fill_polygon(&mut context.picture, &screen, &face_color, true);
            }
            ShadingMode::Flat => {
                let intensity = get_illumination(&normal, &context.lighting_config);
                fill_polygon(&mut context.picture, &screen, &color.shade(intensity), true);
            }
        }
    }

    // the wireframe overlay runs after every fill so silhouette edges stay
    // visible on top of shaded faces
    if context.shading_mode == ShadingMode::Wireframe || edge_color.is_some() {
        let stroke = edge_color.unwrap_or(color);
        for &(a, b) in &mesh.edges {
            if let (Some(p), Some(q)) = (projected[a], projected[b]) {
                draw_line(
                    &mut context.picture,
                    p[0] as isize,
                    p[1] as isize,
                    q[0] as isize,
                    q[1] as isize,
                    &stroke,
                );
            }
        }
    }

    Ok(RenderOutcome::Drawn)
}

fn transform_to_screen(context: &SceneContext, net: &Matrix3, point: [f32; 2]) -> (isize, isize) {
    let transformed = apply_3(net, &[point[0], point[1], 1.0]);
    context.picture.world_to_screen(transformed[0], transformed[1])
}

/// World -> clip -> screen for one homogeneous vertex. Returns screen x/y
/// plus the pre-divide clip-space z kept for the depth test, or `None` when
/// the homogeneous w collapses to zero.
fn project_vertex(context: &SceneContext, vertex: &[f32; 4]) -> Option<[f32; 3]> {
    let clip = apply_4(&context.view_projection, vertex);

    if clip[3].abs() < 1e-6 {
        return None;
    }

    let half_width = context.picture.xres as f32 / 2.0;
    let half_height = context.picture.yres as f32 / 2.0;
    let (x, y) = context
        .picture
        .world_to_screen(clip[0] / clip[3] * half_width, clip[1] / clip[3] * half_height);

    Some([x as f32, y as f32, clip[2]])
}

fn xyz(vertex: &[f32; 4]) -> [f32; 3] {
    [vertex[0], vertex[1], vertex[2]]
}
