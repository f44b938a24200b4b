//! Per-line recognition of Cooklang entities.
//!
//! A line is scanned left to right. At each sigil the recognizers are tried
//! in a fixed order and the first one that succeeds claims the span:
//!
//! 1. metadata (`>> key: value`, only at the start of the line)
//! 2. multiword ingredient (`@ground pepper{1%tsp}`)
//! 3. single-word ingredient (`@salt`)
//! 4. multiword cookware (`#frying pan{}`)
//! 5. single-word cookware (`#pot`)
//! 6. timer (`~{10%minutes}`, `~eggs{3%min}`)
//!
//! Everything between matches is plain text and is left to the caller.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Characters that open an entity
pub(crate) const SIGILS: [char; 3] = ['@', '#', '~'];

/// Sigil followed by one unbroken word: no whitespace, no punctuation, no sigil
static SINGLE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s\p{Zs}\p{P}~]+").expect("single word pattern is valid"));

#[derive(Debug, Clone, PartialEq)]
pub enum Token<'a> {
    Metadata {
        key: &'a str,
        value: &'a str,
    },
    /// `quantity` is `None` for the single-word form
    Ingredient {
        name: &'a str,
        quantity: Option<&'a str>,
        units: Option<&'a str>,
    },
    /// `quantity` is `None` for the single-word form
    Cookware {
        name: &'a str,
        quantity: Option<&'a str>,
    },
    Timer {
        name: &'a str,
        quantity: &'a str,
        units: Option<&'a str>,
    },
}

impl Token<'_> {
    /// Ingredient or cookware written without a brace group.
    pub fn is_single_word(&self) -> bool {
        matches!(
            self,
            Token::Ingredient { quantity: None, .. } | Token::Cookware { quantity: None, .. }
        )
    }
}

/// A recognized token and the byte range it covers in the line.
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a> {
    pub token: Token<'a>,
    pub span: Range<usize>,
}

/// Contents of a closed `{...}` group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BraceGroup<'a> {
    pub quantity: &'a str,
    pub units: Option<&'a str>,
    /// Byte offset just past the closing brace
    pub end: usize,
}

/// Find the leftmost token starting at or after `offset`.
///
/// The scan holds no state between calls: resume from `span.end` of the
/// returned match to continue through the line.
pub fn next_token(line: &str, offset: usize) -> Option<Match<'_>> {
    if offset == 0 {
        if let Some((key, value)) = metadata(line) {
            return Some(Match {
                token: Token::Metadata { key, value },
                span: 0..line.len(),
            });
        }
    }

    let mut from = offset;
    while from < line.len() {
        let pos = from + line[from..].find(is_sigil)?;
        if let Some(found) = recognize_at(line, pos) {
            return Some(found);
        }
        from = pos + 1;
    }

    None
}

/// Every token in the line, in order.
pub fn tokenize(line: &str) -> Vec<Match<'_>> {
    let mut matches = Vec::new();
    let mut offset = 0;
    while let Some(found) = next_token(line, offset) {
        offset = found.span.end;
        matches.push(found);
    }
    matches
}

fn recognize_at(line: &str, pos: usize) -> Option<Match<'_>> {
    let start = pos + 1;
    match line.as_bytes()[pos] {
        b'@' => multiword_ingredient(line, pos).or_else(|| {
            single_word(line, start).map(|name| Match {
                token: Token::Ingredient {
                    name,
                    quantity: None,
                    units: None,
                },
                span: pos..start + name.len(),
            })
        }),
        b'#' => multiword_cookware(line, pos).or_else(|| {
            single_word(line, start).map(|name| Match {
                token: Token::Cookware {
                    name,
                    quantity: None,
                },
                span: pos..start + name.len(),
            })
        }),
        b'~' => timer(line, pos),
        _ => None,
    }
}

fn multiword_ingredient(line: &str, pos: usize) -> Option<Match<'_>> {
    let (name, open) = multiword_name(line, pos + 1)?;
    let group = brace_group(line, open, true)?;
    Some(Match {
        token: Token::Ingredient {
            name,
            quantity: Some(group.quantity),
            units: group.units,
        },
        span: pos..group.end,
    })
}

fn multiword_cookware(line: &str, pos: usize) -> Option<Match<'_>> {
    let (name, open) = multiword_name(line, pos + 1)?;
    let group = brace_group(line, open, false)?;
    Some(Match {
        token: Token::Cookware {
            name,
            quantity: Some(group.quantity),
        },
        span: pos..group.end,
    })
}

fn timer(line: &str, pos: usize) -> Option<Match<'_>> {
    let start = pos + 1;
    let open = start + find_open_brace(&line[start..])?;
    let group = brace_group(line, open, true)?;
    Some(Match {
        token: Token::Timer {
            name: &line[start..open],
            quantity: group.quantity,
            units: group.units,
        },
        span: pos..group.end,
    })
}

/// `>>` then `key: value`; the key ends at the first colon that leaves a
/// non-empty key and something after it.
pub(crate) fn metadata(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix(">>")?;
    rest.match_indices(':').find_map(|(i, _)| {
        let key = rest[..i].trim();
        let value = &rest[i + 1..];
        (!key.is_empty() && !value.is_empty()).then(|| (key, value.trim()))
    })
}

/// Name of a multiword entity starting at `start` and the offset of its `{`.
pub(crate) fn multiword_name(line: &str, start: usize) -> Option<(&str, usize)> {
    let rest = &line[start..];
    let open = find_open_brace(rest)?;
    let name = &rest[..open];
    (!name.trim().is_empty()).then_some((name, start + open))
}

pub(crate) fn single_word(line: &str, start: usize) -> Option<&str> {
    SINGLE_WORD.find(&line[start..]).map(|m| m.as_str())
}

/// Offset of the first `{` in `text`, unless another sigil or `[` comes first.
pub(crate) fn find_open_brace(text: &str) -> Option<usize> {
    let i = text.find(|c: char| c == '{' || is_name_stop(c))?;
    (text.as_bytes()[i] == b'{').then_some(i)
}

/// Parse the brace group opening at `open`, closed by the first `}`.
///
/// With `units` set, the first `%` followed by at least one character splits
/// quantity from units.
pub(crate) fn brace_group(line: &str, open: usize, units: bool) -> Option<BraceGroup<'_>> {
    let inner_start = open + 1;
    let close = inner_start + line[inner_start..].find('}')?;
    let inner = &line[inner_start..close];

    let (quantity, units) = match inner.find('%') {
        Some(p) if units && p + 1 < inner.len() => (&inner[..p], Some(&inner[p + 1..])),
        _ => (inner, None),
    };

    Some(BraceGroup {
        quantity,
        units,
        end: close + 1,
    })
}

pub(crate) fn is_sigil(c: char) -> bool {
    SIGILS.contains(&c)
}

fn is_name_stop(c: char) -> bool {
    is_sigil(c) || c == '['
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(line: &str) -> Vec<Token<'_>> {
        tokenize(line).into_iter().map(|m| m.token).collect()
    }

    #[test]
    fn test_metadata_line() {
        assert_eq!(
            tokenize(">> servings: 2 people"),
            vec![Match {
                token: Token::Metadata {
                    key: "servings",
                    value: "2 people",
                },
                span: 0..21,
            }]
        );
    }

    #[test]
    fn test_metadata_value_keeps_later_colons() {
        assert_eq!(
            tokens(">> source: https://example.com"),
            vec![Token::Metadata {
                key: "source",
                value: "https://example.com",
            }]
        );
    }

    #[test]
    fn test_metadata_only_at_line_start() {
        assert!(tokens("Note >> key: value").is_empty());
        assert!(tokens(">> no colon here").is_empty());
    }

    #[test]
    fn test_multiword_ingredient() {
        assert_eq!(
            tokens("Add @ground black pepper{1%tsp}."),
            vec![Token::Ingredient {
                name: "ground black pepper",
                quantity: Some("1"),
                units: Some("tsp"),
            }]
        );
    }

    #[test]
    fn test_single_word_ingredient_stops_at_punctuation() {
        let found = tokenize("Season with @salt, then serve");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].span, 12..17);
        assert_eq!(
            found[0].token,
            Token::Ingredient {
                name: "salt",
                quantity: None,
                units: None,
            }
        );
    }

    #[test]
    fn test_single_word_stops_at_timer_sigil() {
        assert_eq!(
            tokens("Add @salt~{2%min} now"),
            vec![
                Token::Ingredient {
                    name: "salt",
                    quantity: None,
                    units: None,
                },
                Token::Timer {
                    name: "",
                    quantity: "2",
                    units: Some("min"),
                },
            ]
        );
    }

    #[test]
    fn test_multiword_name_cannot_cross_sigil() {
        assert_eq!(
            tokens("@salt and #pan{}"),
            vec![
                Token::Ingredient {
                    name: "salt",
                    quantity: None,
                    units: None,
                },
                Token::Cookware {
                    name: "pan",
                    quantity: Some(""),
                },
            ]
        );
    }

    #[test]
    fn test_cookware_keeps_percent_in_quantity() {
        assert_eq!(
            tokens("#pot{2%large}"),
            vec![Token::Cookware {
                name: "pot",
                quantity: Some("2%large"),
            }]
        );
    }

    #[test]
    fn test_timer_with_and_without_name() {
        assert_eq!(
            tokens("Boil ~{10%minutes} then ~rest{5%min}"),
            vec![
                Token::Timer {
                    name: "",
                    quantity: "10",
                    units: Some("minutes"),
                },
                Token::Timer {
                    name: "rest",
                    quantity: "5",
                    units: Some("min"),
                },
            ]
        );
    }

    #[test]
    fn test_timer_needs_braces() {
        assert!(tokens("wait ~ten minutes").is_empty());
    }

    #[test]
    fn test_unclosed_brace_falls_back_to_single_word() {
        assert_eq!(
            tokens("@flour{2"),
            vec![Token::Ingredient {
                name: "flour",
                quantity: None,
                units: None,
            }]
        );
    }

    #[test]
    fn test_empty_name_is_not_an_entity() {
        assert!(tokens("@{2} and #{}").is_empty());
    }

    #[test]
    fn test_units_need_content_after_percent() {
        assert_eq!(
            brace_group("{1%}", 0, true),
            Some(BraceGroup {
                quantity: "1%",
                units: None,
                end: 4,
            })
        );
    }

    #[test]
    fn test_next_token_resumes_from_offset() {
        let line = "@a then @b";
        let first = next_token(line, 0).unwrap();
        let second = next_token(line, first.span.end).unwrap();
        assert_eq!(second.span, 8..10);
        assert!(next_token(line, second.span.end).is_none());
    }

    #[test]
    fn test_unicode_names() {
        assert_eq!(
            tokens("Dodaj @jajka i @mąkę{200%g}"),
            vec![
                Token::Ingredient {
                    name: "jajka",
                    quantity: None,
                    units: None,
                },
                Token::Ingredient {
                    name: "mąkę",
                    quantity: Some("200"),
                    units: Some("g"),
                },
            ]
        );
    }
}
