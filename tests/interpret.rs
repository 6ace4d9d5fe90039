//! End-to-end scenarios: source text in, bitmap (or structured error) out.

use curvelang::errors::{LexError, ParseError};
use curvelang::{Error, RenderOptions, interpret, interpret_with, lexer, parse, program_tree};

#[test]
fn single_point_program() {
    let bitmap = interpret("FOR T FROM 0 TO 0 STEP 1 DRAW (T, T);").unwrap();
    assert_eq!(bitmap.plotted(), [(0, 0)]);
    assert_eq!(bitmap.pixel(0, 0), Some([0, 0, 255, 255]));
}

#[test]
fn circle_pixels_lie_on_the_circle() {
    let bitmap = interpret(
        "ORIGIN IS (250,250); FOR T FROM 0 TO 6.28 STEP 0.1 DRAW (50*COS(T), 50*SIN(T));",
    )
    .unwrap();
    let plotted = bitmap.plotted();
    assert!(!plotted.is_empty());
    for (x, y) in plotted {
        let dx = f64::from(x) - 250.0;
        let dy = f64::from(y) - 250.0;
        let radius = (dx * dx + dy * dy).sqrt();
        // Truncation moves a pixel at most one unit off the ideal circle
        assert!(
            (radius - 50.0).abs() < 1.5,
            "pixel ({x}, {y}) at radius {radius}"
        );
    }
}

#[test]
fn unknown_token_fails_lexing() {
    match interpret("FOO;") {
        Err(Error::Lex(LexError::UnknownKeyword { word, line, .. })) => {
            assert_eq!(word, "FOO");
            assert_eq!(line, 1);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn transform_state_is_not_retroactive() {
    // A SCALE after a FOR must not move the FOR's already-rendered points
    let with_scale =
        interpret("ORIGIN IS (100,100); FOR T FROM 0 TO 5 STEP 1 DRAW (T, T); SCALE IS (9, 9);")
            .unwrap();
    let without =
        interpret("ORIGIN IS (100,100); FOR T FROM 0 TO 5 STEP 1 DRAW (T, T);").unwrap();
    assert_eq!(with_scale, without);
}

#[test]
fn full_program_with_comments_and_mixed_case() {
    let bitmap = interpret(
        "-- plot a short diagonal\n\
         origin is (10, 20); // translated\n\
         for t from 0 to 2 step 1 draw (t, t);",
    )
    .unwrap();
    assert_eq!(bitmap.plotted(), [(10, 20), (11, 21), (12, 22)]);
}

#[test]
fn stuck_loop_is_caught_only_with_a_cap() {
    let err = interpret_with(
        "FOR T FROM 0 TO 1 STEP 0 DRAW (T, T);",
        RenderOptions {
            max_iterations: Some(10_000),
        },
    )
    .unwrap_err();
    assert!(matches!(err, Error::Semantic(_)));
}

#[test]
fn failed_runs_do_not_poison_later_ones() {
    assert!(interpret("ROT IS 1/0;").is_err());
    // Same inputs, independent outcomes
    let bitmap = interpret("FOR T FROM 0 TO 0 STEP 1 DRAW (T, T);").unwrap();
    assert_eq!(bitmap.plotted(), [(0, 0)]);
    assert!(interpret("ROT IS 1/0;").is_err());
}

#[test]
fn parse_error_names_what_was_expected() {
    let source = "ORIGIN IS 1, 2);";
    let tokens = lexer::tokenize(source).unwrap();
    let err = parse::parse(&tokens, source).unwrap_err();
    match err {
        ParseError::UnexpectedToken {
            expected, found, ..
        } => {
            assert_eq!(expected, "L_BRACKET");
            assert_eq!(found, "1");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn tree_projection_exposes_statement_slots() {
    let source = "SCALE IS (2, SIN(T));";
    let tokens = lexer::tokenize(source).unwrap();
    let program = parse::parse(&tokens, source).unwrap();
    let tree = program_tree(&program);

    assert_eq!(tree.name, "All Statements");
    let statement = &tree.children[0].children[0];
    assert_eq!(statement.name, "SCALE");
    assert_eq!(statement.children[0].name, "x");
    assert_eq!(statement.children[1].name, "y");
    let sin = &statement.children[1].children[0];
    assert_eq!(sin.name, "SIN");
    assert_eq!(sin.children[0].name, "T");
    // Named constants keep their lexeme as the display label
    let constant = &statement.children[0].children[0];
    assert_eq!(constant.name, "2");
}

#[test]
fn token_listing_reports_every_token() {
    let tokens = lexer::tokenize("FOR T FROM 0 TO 1 STEP 0.5 DRAW (T, SIN(T));").unwrap();
    let listing = lexer::token_listing(&tokens);
    assert_eq!(listing.lines().count(), tokens.len());
    assert!(listing.contains("FUNC\tSIN\t0\tSIN"));
    assert!(listing.lines().last().unwrap().starts_with(&tokens.len().to_string()));
    assert!(listing.contains("NONTOKEN"));
}
