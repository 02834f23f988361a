use std::{collections::VecDeque, error::Error};

use crate::constants::ShadingMode;
use crate::matrix::Rotation;
use super::tokens::{Function, Token, TokenType};

/// The tagged scene-object/command type the executor dispatches on. Shape
/// variants carry exactly the fields their kind needs; material references
/// stay names here and resolve (or fail to) at render time.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Display,
    Save { file_path: String },
    Clear,
    SetCanvas { width: usize, height: usize, r: i32, g: i32, b: i32 },
    DefineMaterial { name: String, r: i32, g: i32, b: i32 },
    SetCamera {
        position: [f32; 3],
        target: [f32; 3],
        up: [f32; 3],
        fov: f32,
        near: f32,
        far: f32,
    },
    SetProjection { kind: String, bounds: Option<[f32; 4]> },
    SetAmbient { intensity: f32 },
    AddLight { direction: [f32; 3], intensity: f32 },
    SetShading { shading_mode: ShadingMode },
    // transform steps accumulate until the next shape consumes them;
    // the optional third component selects a 3D step over a 2D one
    Move { a: f32, b: f32, c: Option<f32> },
    Scale { a: f32, b: f32, c: Option<f32> },
    Rotate { axis: Option<Rotation>, degrees: f32 },
    Line { material: String, start: [f32; 2], end: [f32; 2] },
    Circle { material: String, center: [f32; 2], radius: f32, filled: bool },
    Triangle { materials: Vec<String>, vertices: [[f32; 2]; 3], outline: bool },
    Polygon { material: String, vertices: Vec<[f32; 2]> },
    Box {
        material: String,
        edge_material: Option<String>,
        center: [f32; 3],
        width: f32,
        height: f32,
        depth: f32,
    },
    Sphere {
        material: String,
        edge_material: Option<String>,
        center: [f32; 3],
        radius: f32,
        sectors: Option<usize>,
        stacks: Option<usize>,
    },
    Mesh { material: String, edge_material: Option<String>, file_path: String },
}

pub struct Parser {
    stack: VecDeque<Token>,
}

impl Parser {
    pub fn new() -> Self {
        Self { stack: VecDeque::new() }
    }

    fn pop(&mut self) -> Result<Token, Box<dyn Error>> {
        if let Some(token) = self.stack.pop_front() {
            Ok(token)
        } else {
            Err("Expected token but stack was empty.".into())
        }
    }

    fn pop_optional_type(&mut self, token_type: TokenType) -> Option<String> {
        if let Some(token) = self.stack.front()
            && token.token_type == token_type
        {
            let token = self.stack.pop_front().unwrap();
            return Some(token.value);
        }

        None
    }

    fn pop_number(&mut self) -> Result<f32, Box<dyn Error>> {
        Parser::convert_to_f32(self.pop()?.value)
    }

    fn pop_optional_number(&mut self) -> Result<Option<f32>, Box<dyn Error>> {
        match self.pop_optional_type(TokenType::Number) {
            Some(value) => Ok(Some(Parser::convert_to_f32(value)?)),
            None => Ok(None),
        }
    }

    pub fn generate_command_list(&mut self, tokens: VecDeque<Token>) -> Result<Vec<Command>, Box<dyn Error>> {
        let mut commands: Vec<Command> = vec![];

        self.stack = tokens;

        while !self.stack.is_empty() {
            let token = self.pop()?;

            match token.token_type {
                TokenType::Command(function) => {
                    commands.push(
                        match function {
                            Function::Display => Command::Display,
                            Function::Save => self.handle_save()?,
                            Function::Clear => Command::Clear,
                            Function::SetCanvas => self.handle_set_canvas()?,
                            Function::DefineMaterial => self.handle_define_material()?,
                            Function::SetCamera => self.handle_set_camera()?,
                            Function::SetProjection => self.handle_set_projection()?,
                            Function::SetAmbient => self.handle_set_ambient()?,
                            Function::AddLight => self.handle_add_light()?,
                            Function::SetShading => self.handle_set_shading()?,
                            Function::Move => self.handle_move()?,
                            Function::Scale => self.handle_scale()?,
                            Function::Rotate => self.handle_rotate()?,
                            Function::Line => self.handle_line()?,
                            Function::Circle => self.handle_circle()?,
                            Function::Triangle => self.handle_triangle()?,
                            Function::Polygon => self.handle_polygon()?,
                            Function::Box => self.handle_box()?,
                            Function::Sphere => self.handle_sphere()?,
                            Function::Mesh => self.handle_mesh()?,
                        }
                    )
                }

                _ => {
                    return Err(format!("Unexpected token: {} ({:?})", token.value, token.token_type).into())
                }
            }
        }

        Ok(commands)
    }

    fn handle_save(&mut self) -> Result<Command, Box<dyn Error>> {
        let file_path = self.pop()?.value;

        Ok(Command::Save { file_path })
    }

    fn handle_set_canvas(&mut self) -> Result<Command, Box<dyn Error>> {
        let width = Parser::convert_to_usize(self.pop()?.value)?;
        let height = Parser::convert_to_usize(self.pop()?.value)?;
        let r = self.pop_number()? as i32;
        let g = self.pop_number()? as i32;
        let b = self.pop_number()? as i32;

        Ok(Command::SetCanvas { width, height, r, g, b })
    }

    fn handle_define_material(&mut self) -> Result<Command, Box<dyn Error>> {
        let name = self.pop()?.value;
        let r = self.pop_number()? as i32;
        let g = self.pop_number()? as i32;
        let b = self.pop_number()? as i32;

        Ok(Command::DefineMaterial { name, r, g, b })
    }

    fn handle_set_camera(&mut self) -> Result<Command, Box<dyn Error>> {
        let position = [self.pop_number()?, self.pop_number()?, self.pop_number()?];
        let target = [self.pop_number()?, self.pop_number()?, self.pop_number()?];
        let up = [self.pop_number()?, self.pop_number()?, self.pop_number()?];
        let fov = self.pop_number()?;
        let near = self.pop_number()?;
        let far = self.pop_number()?;

        Ok(Command::SetCamera { position, target, up, fov, near, far })
    }

    fn handle_set_projection(&mut self) -> Result<Command, Box<dyn Error>> {
        let kind = self.pop()?.value;

        // orthographic bounds come as all four of left/right/bottom/top or
        // not at all
        let bounds = match self.pop_optional_number()? {
            Some(left) => Some([left, self.pop_number()?, self.pop_number()?, self.pop_number()?]),
            None => None,
        };

        Ok(Command::SetProjection { kind, bounds })
    }

    fn handle_set_ambient(&mut self) -> Result<Command, Box<dyn Error>> {
        let intensity = self.pop_number()?;

        Ok(Command::SetAmbient { intensity })
    }

    fn handle_add_light(&mut self) -> Result<Command, Box<dyn Error>> {
        let direction = [self.pop_number()?, self.pop_number()?, self.pop_number()?];
        let intensity = self.pop_number()?;

        Ok(Command::AddLight { direction, intensity })
    }

    fn handle_set_shading(&mut self) -> Result<Command, Box<dyn Error>> {
        let mode_str = self.pop()?.value.to_lowercase();
        let shading_mode = match mode_str.as_str() {
            "wireframe" => ShadingMode::Wireframe,
            "random" => ShadingMode::Random,
            "flat" => ShadingMode::Flat,
            _ => return Err(format!("Invalid shading mode: {}", mode_str).into()),
        };

        Ok(Command::SetShading { shading_mode })
    }

    fn handle_move(&mut self) -> Result<Command, Box<dyn Error>> {
        let a = self.pop_number()?;
        let b = self.pop_number()?;
        let c = self.pop_optional_number()?;

        Ok(Command::Move { a, b, c })
    }

    fn handle_scale(&mut self) -> Result<Command, Box<dyn Error>> {
        let a = self.pop_number()?;
        let b = self.pop_number()?;
        let c = self.pop_optional_number()?;

        Ok(Command::Scale { a, b, c })
    }

    fn handle_rotate(&mut self) -> Result<Command, Box<dyn Error>> {
        let axis = match self.pop_optional_type(TokenType::AxisOfRotation) {
            Some(axis_str) => Some(match axis_str.as_str() {
                "x" => Rotation::X,
                "y" => Rotation::Y,
                "z" => Rotation::Z,
                _ => return Err(format!("Invalid rotation axis: {}", axis_str).into()),
            }),
            None => None,
        };
        let degrees = self.pop_number()?;

        Ok(Command::Rotate { axis, degrees })
    }

    fn handle_line(&mut self) -> Result<Command, Box<dyn Error>> {
        let material = self.pop()?.value;
        let start = [self.pop_number()?, self.pop_number()?];
        let end = [self.pop_number()?, self.pop_number()?];

        Ok(Command::Line { material, start, end })
    }

    fn handle_circle(&mut self) -> Result<Command, Box<dyn Error>> {
        let material = self.pop()?.value;
        let center = [self.pop_number()?, self.pop_number()?];
        let radius = self.pop_number()?;
        let filled = self.pop_flag("fill")?;

        Ok(Command::Circle { material, center, radius, filled })
    }

    fn handle_triangle(&mut self) -> Result<Command, Box<dyn Error>> {
        // one material fills flat, three interpolate per vertex
        let mut materials = vec![self.pop()?.value];
        if let Some(second) = self.pop_optional_type(TokenType::Identifier) {
            let third = self
                .pop_optional_type(TokenType::Identifier)
                .ok_or("A triangle takes one or three materials")?;
            materials.push(second);
            materials.push(third);
        }

        let vertices = [
            [self.pop_number()?, self.pop_number()?],
            [self.pop_number()?, self.pop_number()?],
            [self.pop_number()?, self.pop_number()?],
        ];
        let outline = self.pop_flag("outline")?;

        Ok(Command::Triangle { materials, vertices, outline })
    }

    fn handle_polygon(&mut self) -> Result<Command, Box<dyn Error>> {
        let material = self.pop()?.value;

        let mut vertices: Vec<[f32; 2]> = vec![];
        while let Some(x) = self.pop_optional_number()? {
            let y = self.pop_number()?;
            vertices.push([x, y]);
        }

        if vertices.len() < 3 {
            return Err(format!("A polygon needs at least 3 vertices, got {}", vertices.len()).into());
        }

        Ok(Command::Polygon { material, vertices })
    }

    fn handle_box(&mut self) -> Result<Command, Box<dyn Error>> {
        let material = self.pop()?.value;
        let edge_material = self.pop_optional_type(TokenType::Identifier);
        let center = [self.pop_number()?, self.pop_number()?, self.pop_number()?];
        let width = self.pop_number()?;
        let height = self.pop_number()?;
        let depth = self.pop_number()?;

        Ok(Command::Box { material, edge_material, center, width, height, depth })
    }

    fn handle_sphere(&mut self) -> Result<Command, Box<dyn Error>> {
        let material = self.pop()?.value;
        let edge_material = self.pop_optional_type(TokenType::Identifier);
        let center = [self.pop_number()?, self.pop_number()?, self.pop_number()?];
        let radius = self.pop_number()?;

        // tessellation comes as both of sectors/stacks or neither
        let (sectors, stacks) = match self.pop_optional_number()? {
            Some(sectors) => (Some(sectors as usize), Some(self.pop_number()? as usize)),
            None => (None, None),
        };

        Ok(Command::Sphere { material, edge_material, center, radius, sectors, stacks })
    }

    fn handle_mesh(&mut self) -> Result<Command, Box<dyn Error>> {
        let material = self.pop()?.value;
        let edge_material = self.pop_optional_type(TokenType::Identifier);
        let file_path = self.pop()?.value;

        Ok(Command::Mesh { material, edge_material, file_path })
    }

    // trailing mode words like `fill` and `outline`
    fn pop_flag(&mut self, flag: &str) -> Result<bool, Box<dyn Error>> {
        match self.pop_optional_type(TokenType::Identifier) {
            Some(word) if word == flag => Ok(true),
            Some(word) => Err(format!("Unexpected word '{}', did you mean '{}'?", word, flag).into()),
            None => Ok(false),
        }
    }

    fn convert_to_f32(parameter: String) -> Result<f32, Box<dyn Error>> {
        parameter.parse::<f32>().map_err(|_| format!("Error parsing f32: {}", parameter).into())
    }

    fn convert_to_usize(parameter: String) -> Result<usize, Box<dyn Error>> {
        parameter.parse::<usize>().map_err(|_| format!("Error parsing usize: {}", parameter).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(function: Function) -> Token {
        Token { value: String::new(), token_type: TokenType::Command(function) }
    }

    fn number(value: &str) -> Token {
        Token { value: value.to_string(), token_type: TokenType::Number }
    }

    fn identifier(value: &str) -> Token {
        Token { value: value.to_string(), token_type: TokenType::Identifier }
    }

    fn axis(value: &str) -> Token {
        Token { value: value.to_string(), token_type: TokenType::AxisOfRotation }
    }

    fn parse(tokens: Vec<Token>) -> Result<Vec<Command>, Box<dyn Error>> {
        Parser::new().generate_command_list(tokens.into())
    }

    #[test]
    fn triangle_with_one_material_fills_flat() {
        let commands = parse(vec![
            command(Function::Triangle),
            identifier("red"),
            number("0"), number("0"),
            number("10"), number("0"),
            number("0"), number("10"),
        ])
        .unwrap();

        assert_eq!(
            commands,
            vec![Command::Triangle {
                materials: vec!["red".to_string()],
                vertices: [[0.0, 0.0], [10.0, 0.0], [0.0, 10.0]],
                outline: false,
            }]
        );
    }

    #[test]
    fn triangle_with_three_materials_and_outline_flag() {
        let commands = parse(vec![
            command(Function::Triangle),
            identifier("red"), identifier("green"), identifier("blue"),
            number("0"), number("0"),
            number("10"), number("0"),
            number("0"), number("10"),
            identifier("outline"),
        ])
        .unwrap();

        match &commands[0] {
            Command::Triangle { materials, outline, .. } => {
                assert_eq!(materials, &["red", "green", "blue"]);
                assert!(outline);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn triangle_with_two_materials_is_rejected() {
        let error = parse(vec![
            command(Function::Triangle),
            identifier("red"), identifier("green"),
            number("0"), number("0"),
            number("10"), number("0"),
            number("0"), number("10"),
        ])
        .unwrap_err();
        assert!(error.to_string().contains("one or three"));
    }

    #[test]
    fn rotate_without_axis_is_a_2d_step() {
        let commands = parse(vec![command(Function::Rotate), number("45")]).unwrap();
        assert_eq!(commands, vec![Command::Rotate { axis: None, degrees: 45.0 }]);
    }

    #[test]
    fn rotate_with_axis_is_a_3d_step() {
        let commands = parse(vec![command(Function::Rotate), axis("y"), number("-30")]).unwrap();
        assert_eq!(commands, vec![Command::Rotate { axis: Some(Rotation::Y), degrees: -30.0 }]);
    }

    #[test]
    fn move_arity_selects_dimension() {
        let commands = parse(vec![
            command(Function::Move), number("1"), number("2"),
            command(Function::Move), number("1"), number("2"), number("3"),
        ])
        .unwrap();
        assert_eq!(commands[0], Command::Move { a: 1.0, b: 2.0, c: None });
        assert_eq!(commands[1], Command::Move { a: 1.0, b: 2.0, c: Some(3.0) });
    }

    #[test]
    fn polygon_collects_vertex_pairs_until_the_next_command() {
        let commands = parse(vec![
            command(Function::Polygon),
            identifier("red"),
            number("0"), number("0"),
            number("10"), number("0"),
            number("10"), number("10"),
            number("0"), number("10"),
            command(Function::Clear),
        ])
        .unwrap();

        match &commands[0] {
            Command::Polygon { vertices, .. } => assert_eq!(vertices.len(), 4),
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(commands[1], Command::Clear);
    }

    #[test]
    fn polygon_with_two_vertices_is_rejected() {
        let error = parse(vec![
            command(Function::Polygon),
            identifier("red"),
            number("0"), number("0"),
            number("10"), number("0"),
        ])
        .unwrap_err();
        assert!(error.to_string().contains("at least 3"));
    }

    #[test]
    fn sphere_tessellation_is_optional() {
        let commands = parse(vec![
            command(Function::Sphere),
            identifier("red"),
            number("0"), number("0"), number("0"), number("5"),
        ])
        .unwrap();
        match &commands[0] {
            Command::Sphere { sectors, stacks, edge_material, .. } => {
                assert_eq!(*sectors, None);
                assert_eq!(*stacks, None);
                assert_eq!(*edge_material, None);
            }
            other => panic!("unexpected command {:?}", other),
        }

        let commands = parse(vec![
            command(Function::Sphere),
            identifier("red"), identifier("black"),
            number("0"), number("0"), number("0"), number("5"),
            number("12"), number("6"),
        ])
        .unwrap();
        match &commands[0] {
            Command::Sphere { sectors, stacks, edge_material, .. } => {
                assert_eq!(*sectors, Some(12));
                assert_eq!(*stacks, Some(6));
                assert_eq!(edge_material.as_deref(), Some("black"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn projection_bounds_are_all_or_nothing() {
        let commands = parse(vec![
            command(Function::SetProjection),
            identifier("orthographic"),
            number("-2"), number("2"), number("-1"), number("1"),
        ])
        .unwrap();
        assert_eq!(
            commands[0],
            Command::SetProjection {
                kind: "orthographic".to_string(),
                bounds: Some([-2.0, 2.0, -1.0, 1.0]),
            }
        );

        let commands = parse(vec![command(Function::SetProjection), identifier("perspective")]).unwrap();
        assert_eq!(
            commands[0],
            Command::SetProjection { kind: "perspective".to_string(), bounds: None }
        );
    }

    #[test]
    fn unexpected_trailing_word_is_an_error() {
        let error = parse(vec![
            command(Function::Circle),
            identifier("red"),
            number("0"), number("0"), number("5"),
            identifier("filled"),
        ])
        .unwrap_err();
        assert!(error.to_string().contains("fill"));
    }

    #[test]
    fn stray_non_command_token_is_an_error() {
        let error = parse(vec![number("42")]).unwrap_err();
        assert!(error.to_string().contains("Unexpected token"));
    }
}
