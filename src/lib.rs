//! Translates weasel scripts into Go source.
//!
//! The pipeline is lexer -> parser -> generator. Every stage stops at its
//! first error, which [`compile`] reports tagged with the failing [`Stage`].

pub mod codegen;
pub mod error;
pub mod syntax;

pub use codegen::{GeneratorOptions, GoGenerator};
pub use error::{CompileError, GenerateError, LexError, ParseError, Position, Stage};
pub use syntax::{parse, Lexer, Node, Parser, Program, Token, TokenKind};

/// Compiles UTF-8 encoded source into Go source bytes.
pub fn compile(source: &[u8]) -> Result<Vec<u8>, CompileError> {
    compile_with(source, &GeneratorOptions::default())
}

pub fn compile_with(source: &[u8], options: &GeneratorOptions) -> Result<Vec<u8>, CompileError> {
    let src = std::str::from_utf8(source).map_err(|why| LexError::IoFailure(why.to_string()))?;
    let out = compile_str_with(src, options)?;
    Ok(out.into_bytes())
}

pub fn compile_str(src: &str) -> Result<String, CompileError> {
    compile_str_with(src, &GeneratorOptions::default())
}

pub fn compile_str_with(src: &str, options: &GeneratorOptions) -> Result<String, CompileError> {
    log::debug!("parsing {} bytes", src.len());
    let program = Parser::new(src).parse_program()?;

    log::debug!("generating {} top-level statements", program.statements.len());
    let out = GoGenerator::new(options.clone()).generate(&program)?;

    Ok(out)
}
