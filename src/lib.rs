//! An interpreter for a tiny parametric-curve drawing language.
//!
//! Programs set a coordinate origin, a rotation angle, and scale factors,
//! then sweep a parameter T through expressions for x(T) and y(T):
//!
//! ```text
//! ORIGIN IS (250, 250);
//! FOR T FROM 0 TO 2*PI STEP PI/500 DRAW (100*COS(T), 100*SIN(T));
//! ```
//!
//! The pipeline is text -> tokens -> statements -> bitmap: [`lexer::tokenize`]
//! produces a token sequence, [`parse::parse`] builds the statement list, and
//! [`render::render`] walks it into a fixed 500x500 RGBA [`Bitmap`]. Encoding
//! the bitmap to a file format and transporting it are the caller's business,
//! as is serializing the [`TreeNode`] projection for debug views.
//!
//! Keywords match case-insensitively; `--` and `//` start line comments.
//! All errors are structured values ([`Error`]) carrying miette diagnostics;
//! a failed run never yields a partial token stream, statement list, or
//! bitmap, and never affects later runs.

pub mod ast;
pub mod bitmap;
pub mod errors;
pub mod lexer;
mod log;
pub mod parse;
pub mod render;

pub use ast::{Expr, Program, Statement, TreeNode, program_tree};
pub use bitmap::Bitmap;
pub use errors::Error;
pub use render::RenderOptions;

/// Interpret a program source and render it to a bitmap.
pub fn interpret(source: &str) -> Result<Bitmap, Error> {
    interpret_with(source, RenderOptions::default())
}

/// Interpret with explicit render options (e.g. an iteration cap for callers
/// that need bounded execution).
pub fn interpret_with(source: &str, options: RenderOptions) -> Result<Bitmap, Error> {
    let tokens = lexer::tokenize(source)?;
    log::debug!(tokens = tokens.len(), "tokenized");
    let program = parse::parse(&tokens, source)?;
    let bitmap = render::render_with(&program, options)?;
    Ok(bitmap)
}
