//! Recursive-descent parser
//!
//! Single pass, one token of lookahead, no backtracking. Parser state is an
//! explicit value (token slice plus cursor index), so parses are reentrant.
//!
//! Grammar (statements are `;`-terminated; EOF is the sentinel token):
//!
//! ```text
//! Program    := (Statement ';')* EOF
//! Statement  := OriginStmt | RotStmt | ScaleStmt | ForStmt
//! OriginStmt := ORIGIN IS '(' Expr ',' Expr ')'
//! RotStmt    := ROT IS Expr
//! ScaleStmt  := SCALE IS '(' Expr ',' Expr ')'
//! ForStmt    := FOR T FROM Expr TO Expr STEP Expr DRAW '(' Expr ',' Expr ')'
//! Expr       := Term (('+'|'-') Term)*          // left-assoc
//! Term       := Unary (('*'|'/') Unary)*        // left-assoc
//! Unary      := ('+'|'-') Unary | Power
//! Power      := Atom ('**' Power)?              // right-assoc
//! Atom       := NUMBER | T | FUNC '(' Expr ')' | '(' Expr ')'
//! ```

use crate::ast::{BinaryOp, Expr, Program, Statement, UnaryOp};
use crate::errors::{ParseError, named_source};
use crate::lexer::{Token, TokenKind};
use crate::log::debug;

/// Parse a token sequence into a program.
///
/// `source` is the text the tokens came from; it is only used to attach
/// source snippets to errors.
pub fn parse(tokens: &[Token], source: &str) -> Result<Program, ParseError> {
    let mut parser = Parser {
        tokens,
        source,
        pos: 0,
    };
    let mut statements = Vec::new();
    while parser.current()?.kind != TokenKind::Eof {
        statements.push(parser.statement()?);
        parser.expect(TokenKind::Semicolon)?;
    }
    debug!(statements = statements.len(), "parsed program");
    Ok(Program { statements })
}

struct Parser<'a> {
    tokens: &'a [Token],
    source: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn current(&self) -> Result<&Token, ParseError> {
        // The Eof sentinel is never consumed, so overrunning it means the
        // token stream was malformed.
        self.tokens.get(self.pos).ok_or(ParseError::CursorOverrun)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        let token = self.current()?;
        if token.kind == kind {
            self.advance();
            return Ok(());
        }
        Err(ParseError::UnexpectedToken {
            expected: kind.to_string(),
            found: token.describe(),
            src: named_source(self.source),
            span: token.span,
        })
    }

    fn statement(&mut self) -> Result<Statement, ParseError> {
        let token = self.current()?;
        match token.kind {
            TokenKind::Origin => self.origin_statement(),
            TokenKind::Rot => self.rot_statement(),
            TokenKind::Scale => self.scale_statement(),
            TokenKind::For => self.for_statement(),
            _ => Err(ParseError::UnexpectedStatement {
                src: named_source(self.source),
                span: token.span,
            }),
        }
    }

    /// ORIGIN IS '(' Expr ',' Expr ')'
    fn origin_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::Origin)?;
        self.expect(TokenKind::Is)?;
        self.expect(TokenKind::LParen)?;
        let x = self.expr()?;
        self.expect(TokenKind::Comma)?;
        let y = self.expr()?;
        self.expect(TokenKind::RParen)?;
        Ok(Statement::Origin { x, y })
    }

    /// ROT IS Expr
    fn rot_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::Rot)?;
        self.expect(TokenKind::Is)?;
        let angle = self.expr()?;
        Ok(Statement::Rotate { angle })
    }

    /// SCALE IS '(' Expr ',' Expr ')'
    fn scale_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::Scale)?;
        self.expect(TokenKind::Is)?;
        self.expect(TokenKind::LParen)?;
        let x = self.expr()?;
        self.expect(TokenKind::Comma)?;
        let y = self.expr()?;
        self.expect(TokenKind::RParen)?;
        Ok(Statement::Scale { x, y })
    }

    /// FOR T FROM Expr TO Expr STEP Expr DRAW '(' Expr ',' Expr ')'
    fn for_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::For)?;
        self.expect(TokenKind::T)?;
        self.expect(TokenKind::From)?;
        let begin = self.expr()?;
        self.expect(TokenKind::To)?;
        let end = self.expr()?;
        self.expect(TokenKind::Step)?;
        let step = self.expr()?;
        self.expect(TokenKind::Draw)?;
        self.expect(TokenKind::LParen)?;
        let x = self.expr()?;
        self.expect(TokenKind::Comma)?;
        let y = self.expr()?;
        self.expect(TokenKind::RParen)?;
        Ok(Statement::ForDraw {
            begin,
            end,
            step,
            x,
            y,
        })
    }

    /// Additive level, left-associative.
    fn expr(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.term()?;
        loop {
            let op = match self.current()?.kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.term()?;
            left = Expr::Binary(Box::new(left), op, Box::new(right));
        }
        Ok(left)
    }

    /// Multiplicative level, left-associative.
    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.unary()?;
        loop {
            let op = match self.current()?.kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.unary()?;
            left = Expr::Binary(Box::new(left), op, Box::new(right));
        }
        Ok(left)
    }

    /// Unary sign. The operand is a full Unary, so `-a**b` is `-(a**b)`.
    fn unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.current()?.kind {
            TokenKind::Plus => UnaryOp::Pos,
            TokenKind::Minus => UnaryOp::Neg,
            _ => return self.power(),
        };
        self.advance();
        let operand = self.unary()?;
        Ok(Expr::Unary(op, Box::new(operand)))
    }

    /// Power level, right-associative: `a**b**c` is `a**(b**c)`. The right
    /// operand is another Power, not a Unary, so `2**-3` does not parse.
    fn power(&mut self) -> Result<Expr, ParseError> {
        let left = self.atom()?;
        if self.current()?.kind == TokenKind::Power {
            self.advance();
            let right = self.power()?;
            return Ok(Expr::Binary(Box::new(left), BinaryOp::Pow, Box::new(right)));
        }
        Ok(left)
    }

    fn atom(&mut self) -> Result<Expr, ParseError> {
        let token = self.current()?.clone();
        match token.kind {
            TokenKind::Const => {
                self.advance();
                Ok(Expr::Number {
                    value: token.value,
                    label: token.lexeme,
                })
            }
            TokenKind::T => {
                self.advance();
                Ok(Expr::T)
            }
            TokenKind::Func => {
                // The lexer binds the operation when it builds the token
                let func = token.func.ok_or_else(|| ParseError::UnexpectedTerminal {
                    found: token.describe(),
                    src: named_source(self.source),
                    span: token.span,
                })?;
                self.advance();
                self.expect(TokenKind::LParen)?;
                let operand = self.expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(Expr::Func(func, Box::new(operand)))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            _ => Err(ParseError::UnexpectedTerminal {
                found: token.describe(),
                src: named_source(self.source),
                span: token.span,
            }),
        }
    }
}
