#[derive(Debug)]
pub struct Token {
    pub value: String,
    pub token_type: TokenType,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TokenType {
    Command(Function),
    AxisOfRotation,
    Number,
    FilePath,
    Identifier,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Function {
    // GENERAL
    Display,
    Save,
    Clear,
    SetCanvas,
    DefineMaterial,
    SetCamera,
    SetProjection,

    // TRANSFORMATIONS
    Move,
    Scale,
    Rotate,

    // 2D SHAPES
    Line,
    Circle,
    Triangle,
    Polygon,

    // 3D SOLIDS
    Box,
    Sphere,
    Mesh,

    // LIGHTING
    SetAmbient,
    AddLight,
    SetShading,
}
