use std::{iter::Peekable, str::CharIndices};

use super::token::{Token, TokenKind};
use crate::error::{LResult, LexError, PResult, ParseError, Position};

/// On-demand tokenizer with a single token of lookahead.
pub struct Lexer<'src> {
    src: &'src str,
    chars: Peekable<CharIndices<'src>>,
    line: usize,
    column: usize,
    peeked: Option<Token<'src>>,
    finished: bool,
}

impl<'src> Iterator for Lexer<'src> {
    type Item = LResult<Token<'src>>;

    /// Yields every token up to and including the first `EndOfInput`.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let tok = self.next_token();
        match &tok {
            Ok(t) if t.is(TokenKind::EndOfInput) => self.finished = true,
            Err(_) => self.finished = true,
            Ok(_) => (),
        }
        Some(tok)
    }
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Self {
        Self {
            src,
            chars: src.char_indices().peekable(),
            line: 1,
            column: 1,
            peeked: None,
            finished: false,
        }
    }

    /// Returns the next token without consuming it.
    pub fn peek(&mut self) -> LResult<Token<'src>> {
        if let Some(tok) = self.peeked {
            return Ok(tok);
        }
        let tok = self.read_token()?;
        self.peeked = Some(tok);
        Ok(tok)
    }

    /// Consumes the next token, handing out a pending peeked one first.
    pub fn next_token(&mut self) -> LResult<Token<'src>> {
        match self.peeked.take() {
            Some(tok) => Ok(tok),
            None => self.read_token(),
        }
    }

    pub fn expect_kind(&mut self, kind: TokenKind) -> PResult<Token<'src>> {
        let tok = self.next_token()?;
        if tok.is(kind) {
            return Ok(tok);
        }
        Err(ParseError::unexpected(kind.describe(), &tok))
    }

    pub fn expect_exact(&mut self, kind: TokenKind, text: &str) -> PResult<Token<'src>> {
        let tok = self.next_token()?;
        if tok.is_exact(kind, text) {
            return Ok(tok);
        }
        Err(ParseError::unexpected(format!("`{text}`"), &tok))
    }

    fn current_pos(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn advance(&mut self) -> Option<(usize, char)> {
        let (off, c) = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some((off, c))
    }

    fn read_token(&mut self) -> LResult<Token<'src>> {
        loop {
            let pos = self.current_pos();
            let (off, c) = match self.advance() {
                None => return Ok(Token::end_of_input(pos)),
                Some(next) => next,
            };

            let tok = match c {
                '(' => Token::punct(TokenKind::OpenParen, pos),
                ')' => Token::punct(TokenKind::CloseParen, pos),
                '{' => Token::punct(TokenKind::OpenBrace, pos),
                '}' => Token::punct(TokenKind::CloseBrace, pos),
                ',' => Token::punct(TokenKind::Comma, pos),
                '+' => Token::punct(TokenKind::Plus, pos),
                '-' => Token::punct(TokenKind::Minus, pos),
                '*' => Token::punct(TokenKind::Mult, pos),
                '/' => {
                    if let Some(&(_, '/')) = self.chars.peek() {
                        self.skip_line();
                        continue;
                    }
                    Token::punct(TokenKind::Div, pos)
                }
                '"' => self.read_string(off, pos)?,
                c if c.is_whitespace() => continue,
                c if c.is_ascii_digit() => self.read_integer(off, pos),
                c if Self::is_word_start(c) => self.read_word(off, pos),
                ch => return Err(LexError::UnknownCharacter { ch, pos }),
            };

            log::trace!("{tok} at {pos}");
            return Ok(tok);
        }
    }

    fn slice_until<P>(&mut self, from_off: usize, predicate: P) -> &'src str
    where
        P: Fn(char) -> bool,
    {
        while let Some(&(off, c)) = self.chars.peek() {
            if predicate(c) {
                return &self.src[from_off..off];
            }
            self.advance();
        }
        &self.src[from_off..]
    }

    fn read_integer(&mut self, from_off: usize, pos: Position) -> Token<'src> {
        let s = self.slice_until(from_off, |c| !c.is_ascii_digit());
        Token::new(TokenKind::Integer, s, pos)
    }

    fn read_word(&mut self, from_off: usize, pos: Position) -> Token<'src> {
        let s = self.slice_until(from_off, |c| !Self::is_word_part(c));
        Token::new(TokenKind::Word, s, pos)
    }

    // No escapes: the literal ends at the very next quote.
    fn read_string(&mut self, from_off: usize, pos: Position) -> LResult<Token<'src>> {
        loop {
            match self.advance() {
                None => return Err(LexError::UnterminatedString(pos)),
                Some((off, '"')) => {
                    return Ok(Token::new(TokenKind::String, &self.src[from_off..=off], pos))
                }
                Some(_) => (),
            }
        }
    }

    fn skip_line(&mut self) {
        while let Some((_, c)) = self.advance() {
            if c == '\n' {
                break;
            }
        }
    }

    fn is_word_start(c: char) -> bool {
        c.is_alphabetic() || c == '_'
    }

    fn is_word_part(c: char) -> bool {
        Self::is_word_start(c) || c.is_ascii_digit()
    }
}

/// Collects the whole token stream, including the final `EndOfInput`.
pub fn tokenize(src: &str) -> LResult<Vec<Token<'_>>> {
    Lexer::new(src).collect()
}

#[cfg(test)]
mod test {
    use super::{tokenize, Lexer};
    use crate::{
        error::{LexError, ParseError, Position},
        syntax::token::TokenKind,
    };

    fn kinds(s: &str) -> Vec<TokenKind> {
        tokenize(s).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn punctuation_is_one_token_per_char() {
        use TokenKind::*;

        assert_eq!(
            kinds("(){},+-*/"),
            &[
                OpenParen, CloseParen, OpenBrace, CloseBrace, Comma, Plus, Minus, Mult, Div,
                EndOfInput
            ]
        );
        assert_eq!(kinds("((--"), &[OpenParen, OpenParen, Minus, Minus, EndOfInput]);
    }

    #[test]
    fn words_integers_and_strings() {
        let tokens = tokenize("print_2(\"a b\", 42)  _x 12ab").unwrap();
        let texts: Vec<_> = tokens.iter().map(|t| (t.kind, t.text)).collect();

        assert_eq!(
            texts,
            &[
                (TokenKind::Word, "print_2"),
                (TokenKind::OpenParen, ""),
                (TokenKind::String, "\"a b\""),
                (TokenKind::Comma, ""),
                (TokenKind::Integer, "42"),
                (TokenKind::CloseParen, ""),
                (TokenKind::Word, "_x"),
                (TokenKind::Integer, "12"),
                (TokenKind::Word, "ab"),
                (TokenKind::EndOfInput, ""),
            ]
        );
    }

    #[test]
    fn string_has_no_escapes() {
        let tokens = tokenize(r#""a\" b"#).unwrap();

        assert_eq!(tokens[0].text, r#""a\""#);
        assert_eq!(tokens[1].text, "b");
    }

    #[test]
    fn comments_and_division() {
        use TokenKind::*;

        assert_eq!(kinds("1 / 2 // 3 + 4\n5"), &[Integer, Div, Integer, Integer, EndOfInput]);
        assert_eq!(kinds("// only a comment"), &[EndOfInput]);
        assert_eq!(kinds("8/"), &[Integer, Div, EndOfInput]);
    }

    #[test]
    fn peek_is_idempotent() {
        let mut lexer = Lexer::new("foo bar");

        let first = lexer.peek().unwrap();
        let second = lexer.peek().unwrap();
        assert_eq!(first, second);
        assert_eq!(lexer.next_token().unwrap(), first);
        assert_eq!(lexer.next_token().unwrap().text, "bar");
    }

    #[test]
    fn end_of_input_is_stable() {
        let mut lexer = Lexer::new("x");

        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Word);
        for _ in 0..3 {
            assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EndOfInput);
            assert_eq!(lexer.peek().unwrap().kind, TokenKind::EndOfInput);
        }
    }

    #[test]
    fn unterminated_string() {
        for src in ["\"abc", "print(\"abc)", "\""] {
            assert!(matches!(
                tokenize(src),
                Err(LexError::UnterminatedString(_))
            ));
        }
    }

    #[test]
    fn unknown_character() {
        assert_eq!(
            tokenize("foo\n  $").unwrap_err(),
            LexError::UnknownCharacter {
                ch: '$',
                pos: Position::new(2, 3)
            }
        );
        assert!(matches!(
            tokenize("1 = 2"),
            Err(LexError::UnknownCharacter { ch: '=', .. })
        ));
    }

    #[test]
    fn positions() {
        let tokens = tokenize("fun\n  main()").unwrap();

        assert_eq!(tokens[0].pos, Position::new(1, 1));
        assert_eq!(tokens[1].pos, Position::new(2, 3));
        assert_eq!(tokens[2].pos, Position::new(2, 7));
    }

    #[test]
    fn expect_helpers() {
        let mut lexer = Lexer::new("fun main");

        assert!(lexer.expect_exact(TokenKind::Word, "fun").is_ok());
        assert!(matches!(
            lexer.expect_kind(TokenKind::OpenParen),
            Err(ParseError::UnexpectedToken { .. })
        ));
        assert!(matches!(
            lexer.expect_kind(TokenKind::OpenParen),
            Err(ParseError::UnexpectedEndOfInput { .. })
        ));
    }
}
