//! Error types with rich diagnostics using miette
//!
//! One enum per pipeline stage. Every error is a value returned to the
//! caller; nothing in the interpreter panics on user input, and no partial
//! token stream, statement list, or bitmap survives a failure.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Wrap the raw program text for miette source snippets.
pub(crate) fn named_source(source: &str) -> NamedSource<String> {
    NamedSource::new("<input>", source.to_string())
}

// ============================================================================
// Lex Errors
// ============================================================================

/// Errors that occur during tokenization
#[derive(Error, Diagnostic, Debug)]
pub enum LexError {
    #[error("line {line}: unexpected token '{word}'")]
    #[diagnostic(code(curvelang::lex::unknown_keyword))]
    UnknownKeyword {
        word: String,
        line: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a keyword, constant, or function")]
        span: SourceSpan,
    },

    #[error("line {line}: unexpected character '{ch}'")]
    #[diagnostic(code(curvelang::lex::unexpected_char))]
    UnexpectedChar {
        ch: char,
        line: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("no lexical rule matches this character")]
        span: SourceSpan,
    },
}

// ============================================================================
// Parse Errors
// ============================================================================

/// Errors that occur during parsing
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("expected '{expected}', found '{found}'")]
    #[diagnostic(code(curvelang::parse::unexpected_token))]
    UnexpectedToken {
        expected: String,
        found: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("expected '{expected}' here")]
        span: SourceSpan,
    },

    #[error("unexpected terminal symbol '{found}'")]
    #[diagnostic(code(curvelang::parse::unexpected_terminal))]
    UnexpectedTerminal {
        found: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("expected a number, T, a function call, or '('")]
        span: SourceSpan,
    },

    #[error("unexpected statement")]
    #[diagnostic(
        code(curvelang::parse::unexpected_statement),
        help("a statement starts with ORIGIN, ROT, SCALE, or FOR")
    )]
    UnexpectedStatement {
        #[source_code]
        src: NamedSource<String>,
        #[label("not the start of a statement")]
        span: SourceSpan,
    },

    #[error("token index out of range")]
    #[diagnostic(code(curvelang::parse::cursor_overrun))]
    CursorOverrun,
}

// ============================================================================
// Semantic Errors
// ============================================================================

/// Errors that occur while evaluating expressions or rendering
#[derive(Error, Diagnostic, Debug)]
pub enum SemanticError {
    #[error("division by zero")]
    #[diagnostic(code(curvelang::eval::division_by_zero))]
    DivisionByZero,

    #[error("draw loop exceeded {limit} iterations")]
    #[diagnostic(
        code(curvelang::render::iteration_limit),
        help("a FOR loop with STEP <= 0 never terminates; raise or remove the cap if the sweep is genuinely long")
    )]
    IterationLimit { limit: u64 },
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Any error an interpretation run can produce.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Semantic(#[from] SemanticError),
}
