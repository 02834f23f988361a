use std::{
    collections::{HashMap, VecDeque},
    error::Error,
};

use regex::Regex;
use super::{read_lines, tokens::{Token, TokenType}};

pub fn tokenize(path: &str, keywords: HashMap<&str, TokenType>) -> Result<VecDeque<Token>, Box<dyn Error>> {
    let token_regex = Regex::new(r"(?x)
        (?P<Comment>//) |
        (?P<WhiteSpace> \s+) |
        (?P<Number> -?(\d+\.?\d*|\.\d+)) |
        (?P<FilePath>(?:\./|\../|[A-Za-z0-9_\-]+/)*[A-Za-z0-9_\-]+\.[A-Za-z0-9]+) |
        (?P<Identifier> [a-zA-Z_][a-zA-Z0-9_]*) |
        (?P<Unknown> \S)"
    ).unwrap();

    let mut tokens: VecDeque<Token> = VecDeque::new();
    let lines = read_lines(path).map_err(|_| format!("Scene file '{}' not found", path))?;

    for (line_number, line) in lines.map_while(Result::ok).enumerate() {
        let line = line.trim();

        for captures in token_regex.captures_iter(line) {
            if captures.name("Comment").is_some() {
                break;
            } else if captures.name("WhiteSpace").is_some() {
                continue;
            } else if let Some(number) = captures.name("Number") {
                tokens.push_back(Token {
                    value: number.as_str().to_string(),
                    token_type: TokenType::Number,
                });
            } else if let Some(file_path) = captures.name("FilePath") {
                tokens.push_back(Token {
                    value: file_path.as_str().to_string(),
                    token_type: TokenType::FilePath,
                });
            } else if let Some(identifier) = captures.name("Identifier") {
                let identifier = identifier.as_str();

                let token_type = keywords.get(identifier).cloned().unwrap_or(TokenType::Identifier);

                tokens.push_back(Token {
                    value: identifier.to_string(),
                    token_type,
                });
            } else if let Some(unknown) = captures.name("Unknown") {
                return Err(format!("{}:{} Token not recognized: {}", path, line_number + 1, unknown.as_str()).into());
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::tokens::Function;
    use crate::scene::KEYWORDS;
    use std::{env, fs};

    fn tokenize_source(name: &str, source: &str) -> Result<VecDeque<Token>, Box<dyn Error>> {
        let path = env::temp_dir().join(name);
        fs::write(&path, source).unwrap();
        tokenize(path.to_str().unwrap(), KEYWORDS.clone())
    }

    #[test]
    fn classifies_keywords_numbers_and_identifiers() {
        let tokens = tokenize_source(
            "lexer_basic.rscn",
            "material red 255 0 0\ncircle red -10 2.5 30",
        )
        .unwrap();

        let types: Vec<TokenType> = tokens.iter().map(|t| t.token_type).collect();
        assert_eq!(
            types,
            vec![
                TokenType::Command(Function::DefineMaterial),
                TokenType::Identifier,
                TokenType::Number,
                TokenType::Number,
                TokenType::Number,
                TokenType::Command(Function::Circle),
                TokenType::Identifier,
                TokenType::Number,
                TokenType::Number,
                TokenType::Number,
            ]
        );
        assert_eq!(tokens[7].value, "-10");
        assert_eq!(tokens[8].value, "2.5");
    }

    #[test]
    fn comments_run_to_the_end_of_the_line() {
        let tokens = tokenize_source(
            "lexer_comment.rscn",
            "clear // everything after this is ignored 1 2 3\nsave out.png",
        )
        .unwrap();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].token_type, TokenType::Command(Function::Clear));
        assert_eq!(tokens[1].token_type, TokenType::Command(Function::Save));
        assert_eq!(tokens[2].token_type, TokenType::FilePath);
    }

    #[test]
    fn file_paths_keep_their_directories() {
        let tokens = tokenize_source("lexer_path.rscn", "mesh steel models/teapot.stl").unwrap();
        assert_eq!(tokens[2].token_type, TokenType::FilePath);
        assert_eq!(tokens[2].value, "models/teapot.stl");
    }

    #[test]
    fn unknown_characters_are_reported_with_a_line_number() {
        let error = tokenize_source("lexer_unknown.rscn", "clear\n material red 1 2 3 @").unwrap_err();
        assert!(error.to_string().contains(":2"));
        assert!(error.to_string().contains("@"));
    }
}
