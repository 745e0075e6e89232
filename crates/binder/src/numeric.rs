//! Two-stage number parsing for integer fields.
//!
//! The first stage accepts anything that reads as a number (fractions,
//! exponents, grouped thousands). The second stage only accepts a plain
//! base-10 `i32`. Splitting them lets callers tell "not a number" apart from
//! "a number, but not a whole one".

/// How a raw value reads as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericShape {
    /// A base-10 integer that fits in `i32`.
    Whole(i32),
    /// A number, but fractional, exponent-form, grouped, or out of `i32` range.
    NotWhole,
    /// Not a number at all.
    NotANumber,
}

/// Classify a raw value.
#[must_use]
pub fn classify(raw: &str) -> NumericShape {
    let trimmed = trim_number_whitespace(raw);
    if !is_general_number(trimmed) {
        return NumericShape::NotANumber;
    }
    trimmed
        .parse::<i32>()
        .map_or(NumericShape::NotWhole, NumericShape::Whole)
}

// Leading/trailing white space accepted around numbers: tab through carriage
// return, plus space.
fn trim_number_whitespace(raw: &str) -> &str {
    raw.trim_matches(|ch: char| matches!(ch, '\t' | '\n' | '\u{0b}' | '\u{0c}' | '\r' | ' '))
}

fn is_general_number(value: &str) -> bool {
    let (sign, unsigned) = match value.strip_prefix(['+', '-']) {
        Some(rest) => (value.get(..1).unwrap_or_default(), rest),
        None => ("", value),
    };

    if unsigned.eq_ignore_ascii_case("infinity") || unsigned.eq_ignore_ascii_case("nan") {
        return true;
    }
    if !unsigned
        .chars()
        .all(|ch| ch.is_ascii_digit() || matches!(ch, '.' | ',' | 'e' | 'E' | '+' | '-'))
    {
        return false;
    }

    let split_at = unsigned.find(['.', 'e', 'E']).unwrap_or(unsigned.len());
    let (integral, tail) = unsigned.split_at(split_at);
    if tail.contains(',') {
        return false;
    }
    if integral.contains(',') && !integral.starts_with(|ch: char| ch.is_ascii_digit()) {
        return false;
    }

    let ungrouped: String = integral.chars().filter(|ch| *ch != ',').collect();
    format!("{sign}{ungrouped}{tail}").parse::<f64>().is_ok()
}
