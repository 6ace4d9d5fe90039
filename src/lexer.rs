//! Lexical analysis
//!
//! Turns raw program text into a flat [`Token`] sequence ending in exactly
//! one [`TokenKind::Eof`] sentinel. Input is case-folded to uppercase while
//! scanning, so keywords and constants match case-insensitively; no user
//! identifiers exist outside the fixed keyword table.

use std::fmt;

use miette::SourceSpan;

use crate::ast::Func;
use crate::errors::{LexError, named_source};

/// All token kinds the lexer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Statement keywords
    Origin,
    Scale,
    Rot,
    Is,
    For,
    From,
    To,
    Step,
    Draw,
    /// The loop parameter keyword
    T,
    // Punctuation
    Semicolon,
    LParen,
    RParen,
    Comma,
    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    /// The two-character power operator `**`
    Power,
    /// Numeric literal or named constant (PI, E)
    Const,
    /// Built-in function name; the token carries which one
    Func,
    /// End-of-input sentinel, always the last token
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Diagnostic names match the language's published token vocabulary.
        let name = match self {
            TokenKind::Origin => "ORIGIN",
            TokenKind::Scale => "SCALE",
            TokenKind::Rot => "ROT",
            TokenKind::Is => "IS",
            TokenKind::For => "FOR",
            TokenKind::From => "FROM",
            TokenKind::To => "TO",
            TokenKind::Step => "STEP",
            TokenKind::Draw => "DRAW",
            TokenKind::T => "T",
            TokenKind::Semicolon => "SEMICO",
            TokenKind::LParen => "L_BRACKET",
            TokenKind::RParen => "R_BRACKET",
            TokenKind::Comma => "COMMA",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "MUL",
            TokenKind::Slash => "DIV",
            TokenKind::Power => "POWER",
            TokenKind::Const => "CONST_ID",
            TokenKind::Func => "FUNC",
            TokenKind::Eof => "NONTOKEN",
        };
        f.write_str(name)
    }
}

/// One lexed token. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Uppercased source text of the token
    pub lexeme: String,
    /// Numeric value; meaningful only for [`TokenKind::Const`]
    pub value: f64,
    /// Bound operation; present only for [`TokenKind::Func`]
    pub func: Option<Func>,
    /// Byte range in the original source, for diagnostics
    pub span: SourceSpan,
}

impl Token {
    fn simple(kind: TokenKind, lexeme: impl Into<String>, span: SourceSpan) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            value: 0.0,
            func: None,
            span,
        }
    }

    /// Human-readable form of the lexeme for error messages.
    pub fn describe(&self) -> String {
        if self.kind == TokenKind::Eof {
            "<end of input>".to_string()
        } else {
            self.lexeme.clone()
        }
    }
}

/// The fixed keyword / constant / function table. Letter runs are looked up
/// whole; anything not in this table is a lex error.
fn lookup_keyword(word: &str) -> Option<(TokenKind, f64, Option<Func>)> {
    use TokenKind as TK;
    Some(match word {
        "PI" => (TK::Const, std::f64::consts::PI, None),
        "E" => (TK::Const, std::f64::consts::E, None),
        "T" => (TK::T, 0.0, None),
        "ORIGIN" => (TK::Origin, 0.0, None),
        "SCALE" => (TK::Scale, 0.0, None),
        "ROT" => (TK::Rot, 0.0, None),
        "IS" => (TK::Is, 0.0, None),
        "FOR" => (TK::For, 0.0, None),
        "FROM" => (TK::From, 0.0, None),
        "TO" => (TK::To, 0.0, None),
        "STEP" => (TK::Step, 0.0, None),
        "DRAW" => (TK::Draw, 0.0, None),
        "SIN" => (TK::Func, 0.0, Some(Func::Sin)),
        "COS" => (TK::Func, 0.0, Some(Func::Cos)),
        "TAN" => (TK::Func, 0.0, Some(Func::Tan)),
        "LN" => (TK::Func, 0.0, Some(Func::Ln)),
        "EXP" => (TK::Func, 0.0, Some(Func::Exp)),
        "SQRT" => (TK::Func, 0.0, Some(Func::Sqrt)),
        _ => return None,
    })
}

/// Tokenize a whole program.
///
/// On success the returned sequence always ends with exactly one
/// [`TokenKind::Eof`] token, even for empty input. On failure no partial
/// token stream is returned.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let chars: Vec<(usize, char)> = source.char_indices().collect();
    let mut tokens = Vec::new();
    let mut line = 1usize;
    let mut i = 0usize;

    // Byte offset just past the char at index `i`, for span ends.
    let offset_after = |i: usize| chars.get(i).map_or(source.len(), |&(pos, _)| pos);

    while let Some(&(pos, raw)) = chars.get(i) {
        let ch = raw.to_ascii_uppercase();
        match ch {
            '\n' => {
                line += 1;
                i += 1;
            }
            ' ' | '\t' | '\r' => i += 1,
            _ if raw.is_alphabetic() => {
                // Maximal letter run, looked up whole in the keyword table
                let mut word = String::new();
                while let Some(&(_, c)) = chars.get(i) {
                    if !c.is_alphabetic() {
                        break;
                    }
                    word.push(c.to_ascii_uppercase());
                    i += 1;
                }
                let span = (pos, offset_after(i) - pos).into();
                match lookup_keyword(&word) {
                    Some((kind, value, func)) => tokens.push(Token {
                        kind,
                        lexeme: word,
                        value,
                        func,
                        span,
                    }),
                    None => {
                        return Err(LexError::UnknownKeyword {
                            word,
                            line,
                            src: named_source(source),
                            span,
                        });
                    }
                }
            }
            _ if ch.is_ascii_digit() => {
                // Digits, optionally followed by '.' and more digits.
                // A trailing bare '.' is still a legal literal.
                let mut lexeme = String::new();
                while let Some(&(_, c)) = chars.get(i) {
                    if !c.is_ascii_digit() {
                        break;
                    }
                    lexeme.push(c);
                    i += 1;
                }
                if let Some(&(_, '.')) = chars.get(i) {
                    lexeme.push('.');
                    i += 1;
                    while let Some(&(_, c)) = chars.get(i) {
                        if !c.is_ascii_digit() {
                            break;
                        }
                        lexeme.push(c);
                        i += 1;
                    }
                }
                let span = (pos, offset_after(i) - pos).into();
                // Cannot fail: the lexeme is digits with at most one dot
                let value = lexeme.parse().unwrap_or_default();
                tokens.push(Token {
                    kind: TokenKind::Const,
                    lexeme,
                    value,
                    func: None,
                    span,
                });
            }
            ';' => {
                tokens.push(Token::simple(TokenKind::Semicolon, ";", (pos, 1).into()));
                i += 1;
            }
            '(' => {
                tokens.push(Token::simple(TokenKind::LParen, "(", (pos, 1).into()));
                i += 1;
            }
            ')' => {
                tokens.push(Token::simple(TokenKind::RParen, ")", (pos, 1).into()));
                i += 1;
            }
            ',' => {
                tokens.push(Token::simple(TokenKind::Comma, ",", (pos, 1).into()));
                i += 1;
            }
            '+' => {
                tokens.push(Token::simple(TokenKind::Plus, "+", (pos, 1).into()));
                i += 1;
            }
            '*' => {
                if matches!(chars.get(i + 1), Some(&(_, '*'))) {
                    tokens.push(Token::simple(TokenKind::Power, "**", (pos, 2).into()));
                    i += 2;
                } else {
                    tokens.push(Token::simple(TokenKind::Star, "*", (pos, 1).into()));
                    i += 1;
                }
            }
            '-' => {
                if matches!(chars.get(i + 1), Some(&(_, '-'))) {
                    i = skip_comment(&chars, i + 2);
                } else {
                    tokens.push(Token::simple(TokenKind::Minus, "-", (pos, 1).into()));
                    i += 1;
                }
            }
            '/' => {
                if matches!(chars.get(i + 1), Some(&(_, '/'))) {
                    i = skip_comment(&chars, i + 2);
                } else {
                    tokens.push(Token::simple(TokenKind::Slash, "/", (pos, 1).into()));
                    i += 1;
                }
            }
            _ => {
                return Err(LexError::UnexpectedChar {
                    ch: raw,
                    line,
                    src: named_source(source),
                    span: (pos, raw.len_utf8()).into(),
                });
            }
        }
    }

    tokens.push(Token::simple(TokenKind::Eof, "", (source.len(), 0).into()));
    Ok(tokens)
}

/// Consume a line comment: everything up to, not including, the next
/// newline. The newline itself is left for the main loop so it still bumps
/// the line counter.
fn skip_comment(chars: &[(usize, char)], mut i: usize) -> usize {
    while let Some(&(_, c)) = chars.get(i) {
        if c == '\n' {
            break;
        }
        i += 1;
    }
    i
}

/// Informational token listing: index, kind, lexeme, value, and the bound
/// function (or `nil`). Tab-separated, one token per line. Not consumed by
/// later pipeline stages.
pub fn token_listing(tokens: &[Token]) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        let func = token.func.map_or("nil", Func::name);
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            i + 1,
            token.kind,
            token.lexeme,
            token.value,
            func
        );
    }
    out
}
