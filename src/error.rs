use std::fmt;

use thiserror::Error;

/// 1-based location of a lexeme in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated string literal starting at {0}")]
    UnterminatedString(Position),

    #[error("unknown character `{ch}` at {pos}")]
    UnknownCharacter { ch: char, pos: Position },

    #[error("cannot read source: {0}")]
    IoFailure(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {expected}, found {actual}")]
    UnexpectedToken { expected: String, actual: String },

    #[error("expected {expected}, found end of input")]
    UnexpectedEndOfInput { expected: String },

    #[error("nesting deeper than {limit} levels at {pos}")]
    NestingTooDeep { limit: usize, pos: Position },

    #[error(transparent)]
    Lex(#[from] LexError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("unsupported statement: {0}")]
    UnsupportedStatement(String),

    #[error("unsupported expression: {0}")]
    UnsupportedExpression(String),

    #[error("unsupported call argument: {0}")]
    UnsupportedCallArgument(String),
}

/// The pipeline stage a [`CompileError`] originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Lex,
    Parse,
    Generate,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("lex error: {0}")]
    Lex(LexError),

    #[error("parse error: {0}")]
    Parse(ParseError),

    #[error("generate error: {0}")]
    Generate(#[from] GenerateError),
}

impl CompileError {
    pub fn stage(&self) -> Stage {
        match self {
            Self::Lex(_) => Stage::Lex,
            Self::Parse(_) => Stage::Parse,
            Self::Generate(_) => Stage::Generate,
        }
    }
}

impl From<LexError> for CompileError {
    fn from(err: LexError) -> Self {
        Self::Lex(err)
    }
}

// Lexical failures reach the driver through the parser, which pulls tokens lazily.
impl From<ParseError> for CompileError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Lex(err) => Self::Lex(err),
            other => Self::Parse(other),
        }
    }
}

pub type LResult<T> = Result<T, LexError>;
pub type PResult<T> = Result<T, ParseError>;
pub type GResult<T> = Result<T, GenerateError>;
