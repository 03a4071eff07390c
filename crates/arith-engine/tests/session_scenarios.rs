//! End-to-end scenarios: raw input through normalization, lexing,
//! bracket validation and evaluation

#![allow(clippy::expect_used, clippy::unwrap_used)]

use arith_engine::prelude::*;

fn process(raw: &str) -> Outcome {
    Engine::new().process(raw)
}

fn session(raw: &str) -> ExpressionSession {
    Engine::new()
        .session(raw)
        .expect("input should not normalize to empty")
}

// ===== Normalization =====

#[test]
fn test_bracket_styles_are_unified() {
    assert_eq!(normalize("{a}+[b]+(c)"), "(a)+(b)+(c)");
}

#[test]
fn test_empty_groups_collapse_fully() {
    assert_eq!(normalize("(()(()))"), "");
    assert_eq!(process("(()(()))"), Outcome::Empty);
    assert_eq!(
        process("[{}]").to_string(),
        "Your expression is equivalent to empty, try another!"
    );
}

#[test]
fn test_whitespace_is_dropped() {
    assert_eq!(normalize(" 112 + 3 "), "112+3");
}

#[test]
fn test_implicit_multiplication_at_every_boundary() {
    assert_eq!(
        normalize("1(2)3+(4)(5)+1,(2),3"),
        "1*(2)*3+(4)*(5)+1,*(2)*,3"
    );
}

// ===== Arithmetic =====

#[test]
fn test_basic_arithmetic() {
    assert_eq!(process("1+5"), Outcome::Value(6.0));
    assert_eq!(process("1-5"), Outcome::Value(-4.0));
    assert_eq!(process("2*5"), Outcome::Value(10.0));
    assert_eq!(process("8/4"), Outcome::Value(2.0));
}

#[test]
fn test_precedence_and_associativity() {
    assert_eq!(process("2+3*4"), Outcome::Value(14.0));
    assert_eq!(process("10-4-3"), Outcome::Value(3.0));
    assert_eq!(process("64/4/2"), Outcome::Value(8.0));
    assert_eq!(process("(2+3)*4"), Outcome::Value(20.0));
}

#[test]
fn test_unary_minus() {
    assert_eq!(process("-5*(-5)"), Outcome::Value(25.0));
    assert_eq!(process("-(2+3)"), Outcome::Value(-5.0));
}

#[test]
fn test_comma_decimal_separator() {
    assert_eq!(process("0,5+(1,5*3)"), Outcome::Value(5.0));
    assert_eq!(process("0.5+(1.5*3)"), Outcome::Value(5.0));
}

#[test]
fn test_implicit_multiplication_evaluates() {
    assert_eq!(process("2(3)(4)"), Outcome::Value(24.0));
    assert_eq!(process("(1+1)3"), Outcome::Value(6.0));
}

// ===== Lexical errors =====

#[test]
fn test_unexpected_operators() {
    let session = session("*2+(/4)+(-5)+(5*)+*5");
    assert_eq!(session.error_count(), 4);
    assert_eq!(
        session.errors().iter().cloned().collect::<Vec<_>>(),
        vec![
            SyntaxError::UnexpectedOperator {
                symbol: '*',
                position: 1
            },
            SyntaxError::UnexpectedOperator {
                symbol: '/',
                position: 5
            },
            SyntaxError::UnexpectedOperator {
                symbol: '*',
                position: 16
            },
            SyntaxError::UnexpectedOperator {
                symbol: '*',
                position: 19
            },
        ]
    );
    assert!(session.result().is_nan());
}

#[test]
fn test_second_point() {
    let session = session("25,23,23+245,23,13");
    assert_eq!(session.count_of(ErrorKind::SecondPoint), 2);
    let positions: Vec<_> = session.errors().iter().filter_map(SyntaxError::position).collect();
    assert_eq!(positions, vec![6, 16]);
}

#[test]
fn test_unsupported_symbols() {
    let session = session("25a+24v");
    assert_eq!(
        session.errors().iter().cloned().collect::<Vec<_>>(),
        vec![
            SyntaxError::UnsupportedSymbol {
                symbol: 'a',
                position: 3
            },
            SyntaxError::UnsupportedSymbol {
                symbol: 'v',
                position: 7
            },
        ]
    );
}

// ===== Structural errors =====

#[test]
fn test_closing_bracket_without_opener() {
    let session = session("123)+23");
    assert_eq!(session.error_count(), 1);
    assert_eq!(
        session.errors().get(0),
        Some(&SyntaxError::ClosingBrackets { position: 4 })
    );
}

#[test]
fn test_excess_closing_bracket_later_in_expression() {
    let session = session("(1+1)*(3+2))+24");
    assert_eq!(
        session.errors().iter().cloned().collect::<Vec<_>>(),
        vec![SyntaxError::ClosingBrackets { position: 12 }]
    );
}

#[test]
fn test_missing_closing_brackets() {
    let session = session("25+5*(25+23*(35+5)+(35");
    assert_eq!(
        session.errors().iter().cloned().collect::<Vec<_>>(),
        vec![SyntaxError::OpeningBrackets { missing: 2 }]
    );
    assert_eq!(
        session.errors().combined(),
        "Error: 2 more closing brackets expected\n"
    );
}

#[test]
fn test_nesting_limit() {
    let engine = Engine::with_config(EngineConfig::new().with_max_nesting_depth(8)).unwrap();
    let deep = format!("{}7{}", "(".repeat(20), ")".repeat(20));
    let outcome = engine.process(&deep);
    assert_eq!(outcome.errors().len(), 1);
    assert_eq!(outcome.errors()[0].kind(), ErrorKind::NestingTooDeep);

    let within = format!("{}7{}", "(".repeat(5), ")".repeat(5));
    assert_eq!(engine.process(&within), Outcome::Value(7.0));
}

// ===== Special values =====

#[test]
fn test_positive_infinity() {
    let session = session("1/0");
    assert!(session.is_clean());
    assert_eq!(session.result(), f64::INFINITY);
    assert_eq!(session.first_infinity_position(), Some(2));
}

#[test]
fn test_negative_infinity() {
    let session = session("-1/0");
    assert!(session.is_clean());
    assert_eq!(session.result(), f64::NEG_INFINITY);
    assert_eq!(session.first_infinity_position(), Some(3));
    assert_eq!(
        process("-1/0"),
        Outcome::Infinite {
            position: 3,
            negative: true
        }
    );
}

#[test]
fn test_not_a_number() {
    let session = session("0/0");
    assert!(session.is_clean());
    assert!(session.result().is_nan());
    assert_eq!(session.first_nan_position(), Some(2));
}

#[test]
fn test_huge_literal_overflows_without_errors() {
    let literal = "9".repeat(2000);
    let outcome = process(&format!("{literal}+1"));
    assert!(matches!(
        outcome,
        Outcome::Infinite {
            negative: false,
            ..
        }
    ));
}

// ===== Rendering =====

#[test]
fn test_rejected_rendering_lists_every_error() {
    assert_eq!(
        process("2..5 + x").to_string(),
        "Your trimmed expression: 2,,5+x\n\
         Error: second or more point in number at position 3\n\
         Error: unsupported symbol 'x' at position 6"
    );
}

#[test]
fn test_memory_substitution_feeds_engine() {
    let engine = Engine::new();
    let mut memory = Memory::new();
    memory.remember(&engine.process("3-10"));
    let input = memory.substitute("ME*2");
    assert_eq!(input, "(-7)*2");
    assert_eq!(engine.process(&input), Outcome::Value(-14.0));
}
