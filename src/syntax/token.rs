use std::fmt;

use crate::error::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Word,
    String,
    Integer,
    Comma,

    Plus,
    Minus,
    Mult,
    Div,

    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,

    EndOfInput,
}

impl TokenKind {
    /// Kinds whose lexeme is kept in [`Token::text`].
    pub fn has_text(self) -> bool {
        matches!(self, Self::Word | Self::String | Self::Integer)
    }

    /// Human readable form used in "expected ..." messages.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Word => "identifier",
            Self::String => "string literal",
            Self::Integer => "integer literal",
            Self::Comma => "`,`",
            Self::Plus => "`+`",
            Self::Minus => "`-`",
            Self::Mult => "`*`",
            Self::Div => "`/`",
            Self::OpenParen => "`(`",
            Self::CloseParen => "`)`",
            Self::OpenBrace => "`{`",
            Self::CloseBrace => "`}`",
            Self::EndOfInput => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Word => "Word",
            Self::String => "String",
            Self::Integer => "Integer",
            Self::Comma => "Comma",
            Self::Plus => "Plus",
            Self::Minus => "Minus",
            Self::Mult => "Mult",
            Self::Div => "Div",
            Self::OpenParen => "OpenParen",
            Self::CloseParen => "CloseParen",
            Self::OpenBrace => "OpenBrace",
            Self::CloseBrace => "CloseBrace",
            Self::EndOfInput => "EndOfInput",
        };
        f.write_str(name)
    }
}

/// A lexeme borrowed from the source.
///
/// `text` is empty for punctuation, operators and [`TokenKind::EndOfInput`].
/// A `String` token keeps both of its quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub pos: Position,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, text: &'src str, pos: Position) -> Self {
        Self { kind, text, pos }
    }

    pub fn punct(kind: TokenKind, pos: Position) -> Self {
        Self::new(kind, "", pos)
    }

    pub fn end_of_input(pos: Position) -> Self {
        Self::punct(TokenKind::EndOfInput, pos)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_exact(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    /// The lexeme, or `None` for kinds that carry no text.
    pub fn lexeme(&self) -> Option<&'src str> {
        if self.kind.has_text() {
            Some(self.text)
        } else {
            None
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lexeme() {
            Some(text) => write!(f, "<token={}, value={}>", self.kind, text),
            None => write!(f, "<token={}>", self.kind),
        }
    }
}
