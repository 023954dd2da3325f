use crate::error::{PResult, ParseError};

use super::{
    ast::{BinaryOperator, Node},
    token::TokenKind,
    ExprParser, Parser,
};

impl<'src> ExprParser<'src> for Parser<'src> {
    fn parse_expr(&mut self) -> PResult<Node> {
        self.enter()?;
        let expr = self.parse_atom_expr();
        self.leave();
        expr
    }

    fn parse_atom_expr(&mut self) -> PResult<Node> {
        let tok = self.lexer.next_token()?;

        match tok.kind {
            TokenKind::String => Ok(Node::expr(Node::string(tok.text))),
            TokenKind::Integer => self.parse_integer_expr(tok.text),
            TokenKind::Word => {
                let peek = self.lexer.peek()?;
                if !peek.is(TokenKind::OpenParen) {
                    return Err(ParseError::unexpected("`(`", &peek));
                }
                self.bump()?;
                self.parse_call_expr(tok.text)
            }
            _ => Err(ParseError::unexpected("expression", &tok)),
        }
    }

    // The right operand is a full expression, so chains group to the right:
    // `1 - 2 - 3` is `1 - (2 - 3)`.
    fn parse_integer_expr(&mut self, digits: &'src str) -> PResult<Node> {
        let left = Node::expr(Node::integer(digits));

        let op = match self.lexer.peek()?.kind {
            TokenKind::Plus => BinaryOperator::Add,
            TokenKind::Minus => BinaryOperator::Sub,
            TokenKind::Mult => BinaryOperator::Mul,
            TokenKind::Div => BinaryOperator::Div,
            _ => return Ok(left),
        };
        self.bump()?;

        let right = self.parse_expr()?;
        Ok(Node::expr(Node::binary(op, left, right)))
    }

    fn parse_call_expr(&mut self, name: &'src str) -> PResult<Node> {
        let mut args = vec![];

        match self.lexer.peek()?.kind {
            TokenKind::CloseParen => (),
            _ => {
                args.push(self.parse_expr()?);

                loop {
                    let tok = self.lexer.peek()?;
                    match tok.kind {
                        TokenKind::CloseParen => break,
                        TokenKind::Comma => {
                            self.bump()?;
                            args.push(self.parse_expr()?);
                        }
                        _ => return Err(ParseError::unexpected("`,` or `)`", &tok)),
                    }
                }
            }
        }
        self.bump()?;

        Ok(Node::expr(Node::call(name, args)))
    }
}
