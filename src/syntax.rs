pub mod ast;
mod expr_parser;
pub mod lexer;
mod parser;
pub mod token;

pub use ast::{BinaryOperator, Node, Program};
pub use lexer::{tokenize, Lexer};
pub use parser::{Parser, MAX_NESTING};
pub use token::{Token, TokenKind};

use crate::error::{PResult, ParseError};

/// Word that introduces a function definition.
pub const FUNCTION_KEYWORD: &str = "fun";

pub trait ExprParser<'src> {
    /// Parses one expression, returned wrapped in [`Node::Expression`].
    fn parse_expr(&mut self) -> PResult<Node>;
    fn parse_atom_expr(&mut self) -> PResult<Node>;
    fn parse_integer_expr(&mut self, digits: &'src str) -> PResult<Node>;
    fn parse_call_expr(&mut self, name: &'src str) -> PResult<Node>;
}

impl ParseError {
    pub(crate) fn unexpected(expected: impl Into<String>, found: &Token<'_>) -> Self {
        let expected = expected.into();
        if found.is(TokenKind::EndOfInput) {
            return Self::UnexpectedEndOfInput { expected };
        }
        Self::UnexpectedToken {
            expected,
            actual: format!("{found} at {}", found.pos),
        }
    }
}

pub fn parse(src: &str) -> PResult<Program> {
    Parser::new(src).parse_program()
}
