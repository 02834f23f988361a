mod lexer;
mod mesh;
mod parser;
mod render;
mod tokens;

use std::{
    collections::HashMap,
    error::Error,
    fs::File,
    io::{self, BufRead},
    path::Path,
    sync::LazyLock,
};

use parser::Parser;
use render::evaluate_commands;
use tokens::{Function, TokenType};

pub(crate) static KEYWORDS: LazyLock<HashMap<&str, TokenType>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    map.insert("display", TokenType::Command(Function::Display));
    map.insert("save", TokenType::Command(Function::Save));
    map.insert("clear", TokenType::Command(Function::Clear));
    map.insert("canvas", TokenType::Command(Function::SetCanvas));
    map.insert("material", TokenType::Command(Function::DefineMaterial));
    map.insert("camera", TokenType::Command(Function::SetCamera));
    map.insert("projection", TokenType::Command(Function::SetProjection));

    map.insert("move", TokenType::Command(Function::Move));
    map.insert("scale", TokenType::Command(Function::Scale));
    map.insert("rotate", TokenType::Command(Function::Rotate));
    map.insert("x", TokenType::AxisOfRotation);
    map.insert("y", TokenType::AxisOfRotation);
    map.insert("z", TokenType::AxisOfRotation);

    map.insert("line", TokenType::Command(Function::Line));
    map.insert("circle", TokenType::Command(Function::Circle));
    map.insert("triangle", TokenType::Command(Function::Triangle));
    map.insert("polygon", TokenType::Command(Function::Polygon));

    map.insert("box", TokenType::Command(Function::Box));
    map.insert("sphere", TokenType::Command(Function::Sphere));
    map.insert("mesh", TokenType::Command(Function::Mesh));

    map.insert("ambient", TokenType::Command(Function::SetAmbient));
    map.insert("light", TokenType::Command(Function::AddLight));
    map.insert("shading", TokenType::Command(Function::SetShading));

    map
});

pub fn run_scene(path: &str) -> Result<(), Box<dyn Error>> {
    let tokens = lexer::tokenize(path, KEYWORDS.clone())?;

    let commands = Parser::new().generate_command_list(tokens)?;

    evaluate_commands(commands)?;

    Ok(())
}

pub(crate) fn read_lines<P>(file_path: P) -> io::Result<io::Lines<io::BufReader<File>>>
where P: AsRef<Path> {
    let file = File::open(file_path)?;
    Ok(io::BufReader::new(file).lines())
}
