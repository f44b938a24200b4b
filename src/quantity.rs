use serde::{Deserialize, Serialize};
use std::fmt;

/// Amount attached to an ingredient, cookware or timer.
///
/// Recipe text is informal, so anything that does not read as a plain number
/// or a simple fraction is kept verbatim as a literal ("a pinch", "1,5").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(f64),
    Literal(String),
}

impl Quantity {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Quantity::Number(n) => Some(*n),
            Quantity::Literal(_) => None,
        }
    }

    /// True for the empty literal, which renders as nothing.
    pub fn is_blank(&self) -> bool {
        matches!(self, Quantity::Literal(s) if s.is_empty())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Number(n) => write!(f, "{}", n),
            Quantity::Literal(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Quantity {
    fn from(n: f64) -> Self {
        Quantity::Number(n)
    }
}

/// Classified like a span in a brace group: `"2"` and `"1/2"` become numbers.
impl From<&str> for Quantity {
    fn from(s: &str) -> Self {
        parse_quantity(s).unwrap_or_else(|| Quantity::Literal(s.to_string()))
    }
}

impl From<String> for Quantity {
    fn from(s: String) -> Self {
        parse_quantity(&s).unwrap_or(Quantity::Literal(s))
    }
}

/// Classify a raw quantity span.
///
/// Returns `None` when the span is empty after trimming so the caller can
/// substitute its default.
pub fn parse_quantity(raw: &str) -> Option<Quantity> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if value.contains('/') {
        let quotient = split_fraction(value).and_then(|(numerator, denominator)| {
            if has_leading_zero(numerator) || has_leading_zero(denominator) {
                return None;
            }
            let n = parse_number(numerator)?;
            let d = parse_number(denominator)?;
            Some(n / d).filter(|q| q.is_finite())
        });

        return Some(match quotient {
            Some(q) => Quantity::Number(q),
            None => Quantity::Literal(value.to_string()),
        });
    }

    Some(match parse_number(value) {
        Some(n) => Quantity::Number(n),
        None => Quantity::Literal(value.to_string()),
    })
}

/// Parse `raw` if present and non-empty, otherwise fall back to `default`.
pub fn normalize_quantity(raw: Option<&str>, default: &Quantity) -> Quantity {
    raw.and_then(parse_quantity).unwrap_or_else(|| default.clone())
}

/// Trimmed units, or `default` when the span is missing or blank.
pub fn normalize_units(raw: Option<&str>, default: &str) -> String {
    match raw.map(str::trim) {
        Some(units) if !units.is_empty() => units.to_string(),
        _ => default.to_string(),
    }
}

/// Split `a/b` into exactly two non-empty trimmed parts.
pub(crate) fn split_fraction(value: &str) -> Option<(&str, &str)> {
    let mut parts = value.split('/');
    let numerator = parts.next()?.trim();
    let denominator = parts.next()?.trim();
    if parts.next().is_some() || numerator.is_empty() || denominator.is_empty() {
        return None;
    }
    Some((numerator, denominator))
}

/// "01/2" stays literal: a leading zero on either side blocks reduction.
pub(crate) fn has_leading_zero(part: &str) -> bool {
    part.starts_with('0')
}

fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}
