use crate::{Expr, Term};

use super::error::{ParseError, ParseErrorKind};
use super::lexer::{Token, TokenKind};

const EXPECT_EXPR: &str = "expression";
const EXPECT_TERM: &str = "variable or literal";

/// Parsed node together with its height. Height grows with nesting only;
/// a run of one connective is a single node.
type Node = (Expr, usize);

/// Recursive-descent parser over a token stream.
///
/// Precedence, lowest first: implies < or < and < not < comparison < primary.
pub(crate) struct Grammar<'a> {
    source: &'a str,
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Grammar<'a> {
    pub(crate) fn new(source: &'a str, tokens: &'a [Token], max_depth: usize) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            depth: 0,
            max_depth,
        }
    }

    /// Parse a complete condition; leftover tokens are an error.
    pub(crate) fn parse_condition(mut self) -> Result<Expr, ParseError> {
        let (expr, _) = self.expr()?;
        match self.peek() {
            None => Ok(expr),
            Some(token) => Err(self.error_at(
                token.start,
                ParseErrorKind::TrailingInput {
                    found: token.kind.to_string(),
                },
            )),
        }
    }

    // -- Cursor -------------------------------------------------------------

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> Option<&'a Token> {
        match self.peek() {
            Some(token) if token.kind == *kind => self.bump(),
            _ => None,
        }
    }

    fn end_offset(&self) -> usize {
        self.source.len()
    }

    fn error_at(&self, at: usize, kind: ParseErrorKind) -> ParseError {
        ParseError::at(self.source, at, kind)
    }

    /// Error for the current token (or end of input) not being `expected`.
    fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(token) => self.error_at(
                token.start,
                ParseErrorKind::UnexpectedToken {
                    found: token.kind.to_string(),
                    expected: expected.to_owned(),
                },
            ),
            None => self.error_at(
                self.end_offset(),
                ParseErrorKind::UnexpectedEnd {
                    expected: expected.to_owned(),
                },
            ),
        }
    }

    // -- Nesting guard ------------------------------------------------------

    fn enter(&mut self, at: usize) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(self.too_deep(at));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn too_deep(&self, at: usize) -> ParseError {
        self.error_at(
            at,
            ParseErrorKind::TooDeep {
                limit: self.max_depth,
            },
        )
    }

    /// Wrap `operands` in one connective node, or pass a single operand
    /// through unchanged.
    fn chain(
        &self,
        at: usize,
        mut operands: Vec<Node>,
        build: fn(Vec<Expr>) -> Expr,
    ) -> Result<Node, ParseError> {
        if operands.len() == 1 {
            if let Some(node) = operands.pop() {
                return Ok(node);
            }
        }
        let height = operands.iter().map(|(_, h)| *h).max().unwrap_or(0) + 1;
        if height > self.max_depth {
            return Err(self.too_deep(at));
        }
        let args = operands.into_iter().map(|(expr, _)| expr).collect();
        Ok((build(args), height))
    }

    // -- Expressions --------------------------------------------------------

    fn expr(&mut self) -> Result<Node, ParseError> {
        self.implies_expr()
    }

    fn implies_expr(&mut self) -> Result<Node, ParseError> {
        let left = self.or_expr()?;
        let Some(op) = self.eat(&TokenKind::Implies) else {
            return Ok(left);
        };
        self.enter(op.start)?;
        let right = self.implies_expr();
        self.leave();
        let ((left, lh), (right, rh)) = (left, right?);
        let height = lh.max(rh) + 1;
        if height > self.max_depth {
            return Err(self.too_deep(op.start));
        }
        Ok((Expr::Implies(Box::new(left), Box::new(right)), height))
    }

    fn or_expr(&mut self) -> Result<Node, ParseError> {
        let start = self.peek().map_or(self.end_offset(), |t| t.start);
        let mut operands = vec![self.and_expr()?];
        while self.eat(&TokenKind::Or).is_some() {
            operands.push(self.and_expr()?);
        }
        self.chain(start, operands, Expr::Or)
    }

    fn and_expr(&mut self) -> Result<Node, ParseError> {
        let start = self.peek().map_or(self.end_offset(), |t| t.start);
        let mut operands = vec![self.unary()?];
        while self.eat(&TokenKind::And).is_some() {
            operands.push(self.unary()?);
        }
        self.chain(start, operands, Expr::And)
    }

    fn unary(&mut self) -> Result<Node, ParseError> {
        let Some(op) = self.eat(&TokenKind::Not) else {
            return self.primary();
        };
        self.enter(op.start)?;
        let inner = self.unary();
        self.leave();
        let (inner, height) = inner?;
        if height + 1 > self.max_depth {
            return Err(self.too_deep(op.start));
        }
        Ok((Expr::Not(Box::new(inner)), height + 1))
    }

    fn primary(&mut self) -> Result<Node, ParseError> {
        let Some(token) = self.peek() else {
            return Err(self.unexpected(EXPECT_EXPR));
        };
        match &token.kind {
            TokenKind::LParen => {
                self.bump();
                self.enter(token.start)?;
                let inner = self.expr();
                self.leave();
                let inner = inner?;
                if self.eat(&TokenKind::RParen).is_none() {
                    return Err(self.unexpected("')'"));
                }
                if let Some(next) = self.peek() {
                    if let TokenKind::Op(op) = &next.kind {
                        return Err(self.error_at(
                            next.start,
                            ParseErrorKind::OperatorOnExpression { op: op.to_string() },
                        ));
                    }
                }
                Ok(inner)
            }
            TokenKind::Ident(_) | TokenKind::Literal(_) => self.comparison_or_term(),
            _ => Err(self.unexpected(EXPECT_EXPR)),
        }
    }

    /// `term op term`, or a lone term used as a predicate.
    fn comparison_or_term(&mut self) -> Result<Node, ParseError> {
        let left = self.term()?;
        let op = match self.peek().map(|t| &t.kind) {
            Some(TokenKind::Op(op)) => *op,
            _ => {
                let expr = match left {
                    Term::Variable(name) => Expr::Variable(name),
                    Term::Literal(value) => Expr::Literal(value),
                };
                return Ok((expr, 1));
            }
        };
        self.bump();
        let right = self.term()?;
        Ok((Expr::Compare { op, left, right }, 1))
    }

    fn term(&mut self) -> Result<Term, ParseError> {
        let term = match self.peek().map(|t| &t.kind) {
            Some(TokenKind::Ident(name)) => Term::Variable(name.clone()),
            Some(TokenKind::Literal(value)) => Term::Literal(value.clone()),
            _ => return Err(self.unexpected(EXPECT_TERM)),
        };
        self.bump();
        Ok(term)
    }
}
