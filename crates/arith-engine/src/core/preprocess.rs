//! Input normalization
//!
//! Turns whatever the user typed into the canonical form the tokenizer
//! expects: one bracket style, no empty groups, no whitespace, `,` as the
//! decimal separator and explicit `*` wherever multiplication was implied.

/// Canonical decimal separator
pub const DECIMAL_SEPARATOR: char = ',';

/// Normalizes raw input. Total: never fails, may return an empty string.
///
/// ```rust
/// use arith_engine::core::preprocess::normalize;
///
/// assert_eq!(normalize("{a}+[b]+(c)"), "(a)+(b)+(c)");
/// assert_eq!(normalize("2(3.5)"), "2*(3,5)");
/// assert_eq!(normalize("(()(()))"), "");
/// ```
#[must_use]
pub fn normalize(raw: &str) -> String {
    let unified: String = raw.chars().map(unify_bracket).collect();
    let collapsed = collapse_empty_groups(&unified);
    let compact: String = collapsed.chars().filter(|c| !c.is_whitespace()).collect();
    // `( )` only becomes an empty group once the space is gone
    let compact = collapse_empty_groups(&compact);
    let separated: String = compact
        .chars()
        .map(|c| if c == '.' { DECIMAL_SEPARATOR } else { c })
        .collect();
    insert_implicit_multiplication(&separated)
}

/// Maps `{`/`[` to `(` and `}`/`]` to `)`
#[must_use]
pub const fn unify_bracket(c: char) -> char {
    match c {
        '{' | '[' => '(',
        '}' | ']' => ')',
        other => other,
    }
}

/// Removes `()` until none is left.
///
/// Rewriting `()` to nothing has a unique normal form, so a single stack
/// pass gives the same output as repeated substring replacement.
#[must_use]
pub fn collapse_empty_groups(input: &str) -> String {
    let mut out: Vec<char> = Vec::with_capacity(input.len());
    for c in input.chars() {
        if c == ')' && out.last() == Some(&'(') {
            out.pop();
        } else {
            out.push(c);
        }
    }
    out.into_iter().collect()
}

/// Inserts `*` at `)(`, `<digit>(`, `,(`, `)<digit>` and `),`.
///
/// The inserted `*` never forms a boundary itself, so checking each
/// adjacent pair of the input once covers every rewrite.
#[must_use]
pub fn insert_implicit_multiplication(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 2);
    let mut prev: Option<char> = None;
    for c in input.chars() {
        if let Some(p) = prev {
            if is_implicit_boundary(p, c) {
                out.push('*');
            }
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

fn is_implicit_boundary(prev: char, next: char) -> bool {
    let opens_group = next == '(';
    let continues_number = next.is_ascii_digit() || next == DECIMAL_SEPARATOR;
    (opens_group && (prev == ')' || prev.is_ascii_digit() || prev == DECIMAL_SEPARATOR))
        || (prev == ')' && continues_number)
}
