//! Tokens and the error-tolerant tokenizer
//!
//! The tokenizer never stops at the first problem: every anomaly becomes a
//! [`SyntaxError`] and scanning continues, so a user sees all of them at once.

use crate::core::errors::SyntaxError;
use crate::core::operations::{is_operator_char, Operation};
use crate::core::preprocess::DECIMAL_SEPARATOR;
use serde::{Deserialize, Serialize};

/// Token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// Numeric literal text, digits and separators as written
    Number(String),
    /// Binary or unary operator
    Operator(Operation),
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
}

/// A token and the character offset where it starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// What was read
    pub kind: TokenKind,
    /// Character offset in the wrapped expression
    pub offset: usize,
}

impl Token {
    /// Creates a token
    #[must_use]
    pub const fn new(kind: TokenKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// Length in characters
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.kind {
            TokenKind::Number(text) => text.chars().count(),
            TokenKind::Operator(_) | TokenKind::LeftParen | TokenKind::RightParen => 1,
        }
    }

    /// Tokens always cover at least one character
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Offset just past the token
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.len()
    }

    /// First character of the token's text
    #[must_use]
    pub fn first_char(&self) -> char {
        match &self.kind {
            TokenKind::Number(text) => text.chars().next().unwrap_or('0'),
            TokenKind::Operator(op) => op.symbol(),
            TokenKind::LeftParen => '(',
            TokenKind::RightParen => ')',
        }
    }

    /// Returns true if this token is a left parenthesis
    #[must_use]
    pub const fn is_left_paren(&self) -> bool {
        matches!(self.kind, TokenKind::LeftParen)
    }

    /// Returns true if this token is a right parenthesis
    #[must_use]
    pub const fn is_right_paren(&self) -> bool {
        matches!(self.kind, TokenKind::RightParen)
    }

    /// Parses a number literal, reading `,` as the decimal point.
    ///
    /// Overflowing literals parse to infinity. Returns `None` for
    /// non-number tokens and for literals with more than one separator.
    #[must_use]
    pub fn number_value(&self) -> Option<f64> {
        match &self.kind {
            TokenKind::Number(text) => parse_literal(text),
            _ => None,
        }
    }
}

fn parse_literal(text: &str) -> Option<f64> {
    let dotted: String = text
        .chars()
        .map(|c| if c == DECIMAL_SEPARATOR { '.' } else { c })
        .collect();
    dotted.parse::<f64>().ok()
}

/// Tokens plus the lexical errors found while producing them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tokenized {
    /// Emitted tokens, in order
    pub tokens: Vec<Token>,
    /// Lexical errors, in scan order
    pub errors: Vec<SyntaxError>,
}

/// Tokenizer over a normalized expression wrapped in its outer bracket pair
#[derive(Debug)]
pub struct Tokenizer {
    chars: Vec<char>,
    pos: usize,
}

impl Tokenizer {
    /// Creates a tokenizer for the given wrapped expression
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    /// Wraps a normalized expression in the synthetic outer brackets and tokenizes it
    #[must_use]
    pub fn tokenize_wrapped(expression: &str) -> Tokenized {
        Self::new(&wrap(expression)).tokenize()
    }

    /// Scans the whole input
    #[must_use]
    pub fn tokenize(mut self) -> Tokenized {
        let mut out = Tokenized::default();
        while let Some(c) = self.current_char() {
            let start = self.pos;
            match c {
                '(' => {
                    out.tokens.push(Token::new(TokenKind::LeftParen, start));
                    self.advance();
                }
                ')' => {
                    out.tokens.push(Token::new(TokenKind::RightParen, start));
                    self.advance();
                }
                c if is_operator_char(c) => {
                    if self.misplaced_operator(c) {
                        out.errors.push(SyntaxError::UnexpectedOperator {
                            symbol: c,
                            position: start,
                        });
                    }
                    if let Some(op) = Operation::from_char(c) {
                        out.tokens.push(Token::new(TokenKind::Operator(op), start));
                    }
                    self.advance();
                }
                c if c.is_ascii_digit() => {
                    let text = self.read_number(&mut out.errors);
                    out.tokens.push(Token::new(TokenKind::Number(text), start));
                }
                other => {
                    out.errors.push(SyntaxError::UnsupportedSymbol {
                        symbol: other,
                        position: start,
                    });
                    self.advance();
                }
            }
        }
        out
    }

    fn current_char(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn misplaced_operator(&self, c: char) -> bool {
        let prev = self.pos.checked_sub(1).and_then(|i| self.chars.get(i)).copied();
        let next = self.chars.get(self.pos + 1).copied();
        let after_open = prev == Some('(') && c != '-';
        let before_close = next == Some(')');
        let after_operator = prev.is_some_and(is_operator_char);
        after_open || before_close || after_operator
    }

    fn read_number(&mut self, errors: &mut Vec<SyntaxError>) -> String {
        let mut text = String::new();
        let mut has_separator = false;

        while let Some(ch) = self.current_char() {
            if ch == DECIMAL_SEPARATOR {
                if has_separator {
                    errors.push(SyntaxError::SecondPoint { position: self.pos });
                }
                has_separator = true;
            } else if !ch.is_ascii_digit() {
                break;
            }
            text.push(ch);
            self.advance();
        }
        text
    }
}

/// Surrounds an expression with the synthetic outer bracket pair
#[must_use]
pub fn wrap(expression: &str) -> String {
    format!("({expression})")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind.clone()).collect()
    }

    #[test]
    fn test_tokenize_simple() {
        let out = Tokenizer::tokenize_wrapped("12+3,5");
        assert!(out.errors.is_empty());
        assert_eq!(
            kinds(&out.tokens),
            vec![
                TokenKind::LeftParen,
                TokenKind::Number("12".into()),
                TokenKind::Operator(Operation::Add),
                TokenKind::Number("3,5".into()),
                TokenKind::RightParen,
            ]
        );
        let offsets: Vec<usize> = out.tokens.iter().map(|t| t.offset).collect();
        assert_eq!(offsets, vec![0, 1, 3, 4, 7]);
    }

    #[test]
    fn test_unexpected_operators() {
        let out = Tokenizer::tokenize_wrapped("*2+(/4)+(-5)+(5*)+*5");
        assert_eq!(
            out.errors,
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
        // flagged operators are still emitted
        let operators = out
            .tokens
            .iter()
            .filter(|t| matches!(t.kind, TokenKind::Operator(_)))
            .count();
        assert_eq!(operators, 9);
    }

    #[test]
    fn test_leading_minus_is_allowed() {
        let out = Tokenizer::tokenize_wrapped("-5*(-5)");
        assert!(out.errors.is_empty());
    }

    #[test]
    fn test_operator_with_several_faults_reported_once() {
        // '+' follows '(' and precedes ')'
        let out = Tokenizer::tokenize_wrapped("+");
        assert_eq!(out.errors.len(), 1);
    }

    #[test]
    fn test_second_point() {
        let out = Tokenizer::tokenize_wrapped("25,23,23+245,23,13");
        assert_eq!(
            out.errors,
            vec![
                SyntaxError::SecondPoint { position: 6 },
                SyntaxError::SecondPoint { position: 16 },
            ]
        );
        // the extra separator stays in the literal
        assert_eq!(out.tokens[1].kind, TokenKind::Number("25,23,23".into()));
        assert_eq!(out.tokens[1].number_value(), None);
    }

    #[test]
    fn test_unsupported_symbols_skipped() {
        let out = Tokenizer::tokenize_wrapped("25a+24v");
        assert_eq!(
            out.errors,
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
        assert_eq!(out.tokens.len(), 5);
    }

    #[test]
    fn test_leading_separator_is_unsupported() {
        let out = Tokenizer::tokenize_wrapped(",5");
        assert_eq!(
            out.errors,
            vec![SyntaxError::UnsupportedSymbol {
                symbol: ',',
                position: 1
            }]
        );
    }

    #[test]
    fn test_number_value() {
        let token = Token::new(TokenKind::Number("0,5".into()), 0);
        assert_eq!(token.number_value(), Some(0.5));
        assert_eq!(token.len(), 3);
        assert_eq!(token.end(), 3);
        let trailing = Token::new(TokenKind::Number("7,".into()), 0);
        assert_eq!(trailing.number_value(), Some(7.0));
        assert_eq!(Token::new(TokenKind::LeftParen, 0).number_value(), None);
    }

    #[test]
    fn test_huge_literal_overflows_to_infinity() {
        let token = Token::new(TokenKind::Number("9".repeat(400)), 0);
        assert_eq!(token.number_value(), Some(f64::INFINITY));
    }

    #[test]
    fn test_first_char() {
        assert_eq!(Token::new(TokenKind::RightParen, 0).first_char(), ')');
        assert_eq!(
            Token::new(TokenKind::Operator(Operation::Divide), 0).first_char(),
            '/'
        );
        assert_eq!(Token::new(TokenKind::Number("42".into()), 0).first_char(), '4');
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("1+2"), "(1+2)");
    }
}
