use crate::{
    error::{PResult, ParseError},
    syntax::{
        ast::{Node, Program},
        lexer::Lexer,
        token::TokenKind,
        ExprParser, FUNCTION_KEYWORD,
    },
};

/// Deepest nesting of expressions and function bodies the parser accepts.
pub const MAX_NESTING: usize = 256;

/// Recursive descent parser over a [`Lexer`], one token of lookahead.
pub struct Parser<'src> {
    pub(super) lexer: Lexer<'src>,
    depth: usize,
}

impl<'src> Parser<'src> {
    pub fn new(src: &'src str) -> Self {
        Self::from_lexer(Lexer::new(src))
    }

    pub fn from_lexer(lexer: Lexer<'src>) -> Self {
        Self { lexer, depth: 0 }
    }

    /// Parses statements until end of input. The first failure aborts the parse.
    pub fn parse_program(&mut self) -> PResult<Program> {
        let mut statements = vec![];

        while let Some(stmt) = self.parse_stmt()? {
            log::debug!("parsed {stmt}");
            statements.push(stmt);
        }

        Ok(Program::new(statements))
    }

    /// Returns `None` once end of input is reached.
    pub fn parse_stmt(&mut self) -> PResult<Option<Node>> {
        let peek = self.lexer.peek()?;

        if peek.is(TokenKind::EndOfInput) {
            return Ok(None);
        }
        if peek.is_exact(TokenKind::Word, FUNCTION_KEYWORD) {
            let decl = self.parse_fn_decl()?;
            return Ok(Some(Node::stmt(decl)));
        }

        let expr = self.parse_expr()?;
        Ok(Some(Node::stmt(expr)))
    }

    fn parse_fn_decl(&mut self) -> PResult<Node> {
        self.enter()?;
        let decl = self.parse_fn_body();
        self.leave();
        decl
    }

    fn parse_fn_body(&mut self) -> PResult<Node> {
        self.lexer.expect_exact(TokenKind::Word, FUNCTION_KEYWORD)?;
        let name = self.lexer.expect_kind(TokenKind::Word)?.text;

        // TODO: parameters; only `()` is accepted for now
        self.lexer.expect_kind(TokenKind::OpenParen)?;
        self.lexer.expect_kind(TokenKind::CloseParen)?;
        self.lexer.expect_kind(TokenKind::OpenBrace)?;

        let mut body = vec![];
        loop {
            if self.lexer.peek()?.is(TokenKind::CloseBrace) {
                self.bump()?;
                break;
            }

            let stmt = match self.parse_stmt()? {
                Some(stmt) => stmt,
                None => {
                    return Err(ParseError::UnexpectedEndOfInput {
                        expected: "statement or `}`".into(),
                    })
                }
            };
            body.push(stmt);
        }

        Ok(Node::function(name, body))
    }

    pub(super) fn bump(&mut self) -> PResult<()> {
        let _ = self.lexer.next_token()?;
        Ok(())
    }

    // Keeps recursion, and the drop of the resulting tree, off the end of the stack.
    pub(super) fn enter(&mut self) -> PResult<()> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING,
                pos: self.lexer.peek()?.pos,
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(super) fn leave(&mut self) {
        self.depth -= 1;
    }
}

#[cfg(test)]
mod test {
    use super::{Parser, MAX_NESTING};
    use crate::{
        error::{LexError, ParseError, Position},
        syntax::{
            ast::{Node, Program},
            parse,
        },
    };

    #[test]
    fn parse_function_definition() {
        let program = parse("fun main() { print(\"hi\") }").unwrap();
        let expected = Program::new(vec![Node::stmt(Node::function(
            "main",
            vec![Node::stmt(Node::expr(Node::call(
                "print",
                vec![Node::expr(Node::string("\"hi\""))],
            )))],
        ))]);

        assert_eq!(program, expected);
    }

    #[test]
    fn parse_empty_and_nested_functions() {
        let program = parse("fun outer() { fun inner() {} inner() }").unwrap();

        assert_eq!(
            program.to_string(),
            "(program (stmt (fun outer (stmt (fun inner)) (stmt (expr (call inner))))))"
        );
        assert_eq!(parse("").unwrap(), Program::default());
        assert_eq!(parse("  // nothing here\n").unwrap(), Program::default());
    }

    #[test]
    fn parse_statements_in_order() {
        let mut parser = Parser::new("\"a\" 1 f()");

        assert_eq!(
            parser.parse_stmt().unwrap(),
            Some(Node::stmt(Node::expr(Node::string("\"a\""))))
        );
        assert_eq!(
            parser.parse_stmt().unwrap(),
            Some(Node::stmt(Node::expr(Node::integer("1"))))
        );
        assert_eq!(
            parser.parse_stmt().unwrap(),
            Some(Node::stmt(Node::expr(Node::call("f", vec![]))))
        );
        assert_eq!(parser.parse_stmt().unwrap(), None);
        assert_eq!(parser.parse_stmt().unwrap(), None);
    }

    #[test]
    fn missing_closing_brace_is_an_error() {
        assert_eq!(
            parse("fun main() { print(1)").unwrap_err(),
            ParseError::UnexpectedEndOfInput {
                expected: "statement or `}`".into()
            }
        );
    }

    #[test]
    fn function_parameters_are_rejected() {
        assert!(matches!(
            parse("fun main(x) {}"),
            Err(ParseError::UnexpectedToken { expected, .. }) if expected == "`)`"
        ));
    }

    #[test]
    fn function_needs_a_name() {
        assert!(matches!(
            parse("fun 1() {}"),
            Err(ParseError::UnexpectedToken { expected, .. }) if expected == "identifier"
        ));
        assert!(matches!(
            parse("fun"),
            Err(ParseError::UnexpectedEndOfInput { .. })
        ));
    }

    #[test]
    fn stray_tokens_are_rejected() {
        assert!(matches!(
            parse("}"),
            Err(ParseError::UnexpectedToken { expected, actual })
                if expected == "expression" && actual == "<token=CloseBrace> at 1:1"
        ));
        assert!(matches!(
            parse("foo"),
            Err(ParseError::UnexpectedEndOfInput { expected }) if expected == "`(`"
        ));
    }

    #[test]
    fn lex_errors_surface_through_parser() {
        assert!(matches!(
            parse("print(\"oops)"),
            Err(ParseError::Lex(LexError::UnterminatedString(_)))
        ));
    }

    fn nested_calls(depth: usize) -> String {
        format!("{}{}", "f(".repeat(depth), ")".repeat(depth))
    }

    #[test]
    fn nesting_up_to_the_limit_is_accepted() {
        assert!(parse(&nested_calls(MAX_NESTING)).is_ok());

        let chain = format!("{}1", "1+".repeat(MAX_NESTING - 1));
        assert!(parse(&chain).is_ok());
    }

    #[test]
    fn nesting_past_the_limit_is_rejected() {
        assert_eq!(
            parse(&nested_calls(MAX_NESTING + 1)).unwrap_err(),
            ParseError::NestingTooDeep {
                limit: MAX_NESTING,
                pos: Position::new(1, 2 * MAX_NESTING + 1)
            }
        );

        for src in [
            nested_calls(5_000),
            format!("{}1", "1+".repeat(50_000)),
            format!("{}{}", "fun f() {".repeat(5_000), "}".repeat(5_000)),
        ] {
            assert!(matches!(
                parse(&src),
                Err(ParseError::NestingTooDeep { limit: MAX_NESTING, .. })
            ));
        }
    }

    #[test]
    fn depth_is_released_between_statements() {
        let src = nested_calls(MAX_NESTING).repeat(3);
        assert_eq!(parse(&src).unwrap().statements.len(), 3);
    }
}
