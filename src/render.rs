//! Rasterization of parsed curve programs
//!
//! This module is organized into submodules:
//! - `context`: the mutable transform state and render options
//! - `eval`: expression evaluation
//!
//! `render` walks statements once, in document order: ORIGIN/ROT/SCALE
//! overwrite the transform state, and each FOR..DRAW sweeps T, maps every
//! (x, y) through the live transform, and plots into the bitmap.

pub mod context;
pub mod eval;

pub use context::{RenderOptions, Transform};

use glam::DVec2;

use crate::ast::{Program, Statement};
use crate::bitmap::{Bitmap, CURVE_COLOR};
use crate::errors::SemanticError;
use crate::log::debug;
use eval::eval_expr;

/// Render a program into a fresh bitmap with default options.
pub fn render(program: &Program) -> Result<Bitmap, SemanticError> {
    render_with(program, RenderOptions::default())
}

/// Render a program into a fresh bitmap.
///
/// Exactly one bitmap per call; on error nothing is returned, never a
/// partial image. With default options a FOR loop whose step is not positive
/// never terminates; callers that need bounded execution set
/// [`RenderOptions::max_iterations`].
pub fn render_with(program: &Program, options: RenderOptions) -> Result<Bitmap, SemanticError> {
    let mut transform = Transform::default();
    let mut bitmap = Bitmap::new();

    for statement in &program.statements {
        match statement {
            Statement::Origin { x, y } => {
                transform.origin = DVec2::new(eval_expr(x, 0.0)?, eval_expr(y, 0.0)?);
            }
            Statement::Rotate { angle } => {
                transform.angle = eval_expr(angle, 0.0)?;
            }
            Statement::Scale { x, y } => {
                transform.scale = DVec2::new(eval_expr(x, 0.0)?, eval_expr(y, 0.0)?);
            }
            Statement::ForDraw {
                begin,
                end,
                step,
                x,
                y,
            } => {
                // Loop bounds are evaluated once, at T=0
                let mut t = eval_expr(begin, 0.0)?;
                let end = eval_expr(end, 0.0)?;
                let step = eval_expr(step, 0.0)?;
                let mut iterations: u64 = 0;
                while t <= end {
                    if let Some(limit) = options.max_iterations {
                        if iterations >= limit {
                            return Err(SemanticError::IterationLimit { limit });
                        }
                    }
                    let point = DVec2::new(eval_expr(x, t)?, eval_expr(y, t)?);
                    bitmap.plot(transform.apply(point), CURVE_COLOR);
                    t += step;
                    iterations += 1;
                }
                debug!(iterations, "draw loop finished");
            }
        }
    }

    Ok(bitmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parse::parse;

    fn render_source(source: &str) -> Result<Bitmap, SemanticError> {
        render(&parse(&tokenize(source).unwrap(), source).unwrap())
    }

    #[test]
    fn empty_program_renders_empty_bitmap() {
        let bitmap = render_source("").unwrap();
        assert!(bitmap.plotted().is_empty());
    }

    #[test]
    fn single_iteration_plots_one_pixel() {
        let bitmap = render_source("FOR T FROM 0 TO 0 STEP 1 DRAW (T, T);").unwrap();
        assert_eq!(bitmap.plotted(), [(0, 0)]);
    }

    #[test]
    fn origin_translates_plots() {
        let bitmap = render_source("ORIGIN IS (100, 200); FOR T FROM 1 TO 3 STEP 1 DRAW (T, T);")
            .unwrap();
        assert_eq!(bitmap.plotted(), [(101, 201), (102, 202), (103, 203)]);
    }

    #[test]
    fn rotation_uses_the_clockwise_convention() {
        // Quarter turn maps (x, y) to (y, -x): the point (50, 10) lands at
        // origin + (10, -50)
        let bitmap = render_source(
            "ORIGIN IS (250, 250); ROT IS PI/2;\n\
             FOR T FROM 0 TO 0 STEP 1 DRAW (50, 10);",
        )
        .unwrap();
        assert_eq!(bitmap.plotted(), [(260, 200)]);
    }

    #[test]
    fn scale_multiplies_before_rotation_and_translation() {
        let bitmap = render_source(
            "SCALE IS (2, 3); ORIGIN IS (10, 10);\n\
             FOR T FROM 1 TO 1 STEP 1 DRAW (T, T);",
        )
        .unwrap();
        assert_eq!(bitmap.plotted(), [(12, 13)]);
    }

    #[test]
    fn transform_state_is_not_retroactive() {
        // The SCALE after the loop must not move the already-plotted pixel
        let source = "FOR T FROM 1 TO 1 STEP 1 DRAW (T, T); SCALE IS (100, 100);";
        let bitmap = render_source(source).unwrap();
        assert_eq!(bitmap.plotted(), [(1, 1)]);
    }

    #[test]
    fn later_statements_overwrite_transform_state() {
        let bitmap = render_source(
            "ORIGIN IS (5, 5); ORIGIN IS (20, 30);\n\
             FOR T FROM 0 TO 0 STEP 1 DRAW (0, 0);",
        )
        .unwrap();
        assert_eq!(bitmap.plotted(), [(20, 30)]);
    }

    #[test]
    fn out_of_canvas_points_are_dropped_silently() {
        let bitmap =
            render_source("FOR T FROM 0 TO 10 STEP 1 DRAW (T*1000, T*1000);").unwrap();
        assert_eq!(bitmap.plotted(), [(0, 0)]);
    }

    #[test]
    fn division_by_zero_aborts_the_render() {
        let err = render_source("FOR T FROM 0 TO 1 STEP 1 DRAW (1/T, 0);").unwrap_err();
        assert!(matches!(err, SemanticError::DivisionByZero));
    }

    #[test]
    fn iteration_cap_bounds_a_stuck_loop() {
        let source = "FOR T FROM 0 TO 1 STEP 0 DRAW (T, T);";
        let program = parse(&tokenize(source).unwrap(), source).unwrap();
        let err = render_with(
            &program,
            RenderOptions {
                max_iterations: Some(1000),
            },
        )
        .unwrap_err();
        assert!(matches!(err, SemanticError::IterationLimit { limit: 1000 }));
    }

    #[test]
    fn iteration_cap_does_not_trip_short_loops() {
        let source = "FOR T FROM 0 TO 5 STEP 1 DRAW (T, 0);";
        let program = parse(&tokenize(source).unwrap(), source).unwrap();
        let bitmap = render_with(
            &program,
            RenderOptions {
                max_iterations: Some(1000),
            },
        )
        .unwrap();
        assert_eq!(bitmap.plotted().len(), 6);
    }

    #[test]
    fn loop_bounds_are_evaluated_at_t_zero() {
        // end = T+2 reads T=0, so the sweep is 0..=2, not unbounded
        let bitmap = render_source("FOR T FROM T TO T+2 STEP 1 DRAW (T, 0);").unwrap();
        assert_eq!(bitmap.plotted(), [(0, 0), (1, 0), (2, 0)]);
    }
}
