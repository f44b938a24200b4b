use serde::Serialize;
use std::fmt;
use std::ops::Range;

use crate::tokens::{self, Match};

/// Something in the source that looked like markup but was kept as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// `@{...}` or `#{...}`: a brace group with no name before it
    EmptyName,
    /// A brace group that never closes on its line
    UnclosedBrace,
    /// `~name` with no `{...}` after it
    TimerWithoutBraces,
    /// A `>>` line that is not `key: value`
    MalformedMetadata,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            DiagnosticKind::EmptyName => "entity has an empty name",
            DiagnosticKind::UnclosedBrace => "brace group is never closed",
            DiagnosticKind::TimerWithoutBraces => "timer is missing its {...} group",
            DiagnosticKind::MalformedMetadata => "metadata line is not `>> key: value`",
        };
        f.write_str(message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// 1-based line number in the source
    pub line: usize,
    /// Byte range within that line
    pub span: Range<usize>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, columns {}-{}: {}",
            self.line, self.span.start, self.span.end, self.kind
        )
    }
}

/// Look for malformed entities in a line that has already been tokenized.
pub(crate) fn inspect_line(
    line_number: usize,
    line: &str,
    matches: &[Match<'_>],
) -> Vec<Diagnostic> {
    let mut found = Vec::new();
    let mut push = |kind, span| {
        found.push(Diagnostic {
            kind,
            line: line_number,
            span,
        })
    };

    if line.starts_with(">>") && tokens::metadata(line).is_none() {
        push(DiagnosticKind::MalformedMetadata, 0..line.len());
    }

    for (pos, sigil) in line.match_indices(tokens::is_sigil) {
        let claimed = matches.iter().any(|m| {
            m.span.contains(&pos) && (m.span.start != pos || !m.token.is_single_word())
        });
        if claimed {
            continue;
        }

        let kind = match sigil {
            "~" => inspect_timer(line, pos),
            _ => inspect_entity(line, pos),
        };
        if let Some((kind, span)) = kind {
            push(kind, span);
        }
    }

    found
}

fn inspect_entity(line: &str, pos: usize) -> Option<(DiagnosticKind, Range<usize>)> {
    let start = pos + 1;
    let open = start + tokens::find_open_brace(&line[start..])?;

    if tokens::brace_group(line, open, false).is_none() {
        return Some((DiagnosticKind::UnclosedBrace, pos..line.len()));
    }
    if line[start..open].trim().is_empty() {
        let end = tokens::brace_group(line, open, false).map_or(line.len(), |g| g.end);
        return Some((DiagnosticKind::EmptyName, pos..end));
    }
    None
}

fn inspect_timer(line: &str, pos: usize) -> Option<(DiagnosticKind, Range<usize>)> {
    let start = pos + 1;
    match tokens::find_open_brace(&line[start..]) {
        Some(open) if tokens::brace_group(line, start + open, true).is_none() => {
            Some((DiagnosticKind::UnclosedBrace, pos..line.len()))
        }
        Some(_) => None,
        None => tokens::single_word(line, start)
            .map(|word| (DiagnosticKind::TimerWithoutBraces, pos..start + word.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::tokenize;

    fn kinds(line: &str) -> Vec<DiagnosticKind> {
        inspect_line(1, line, &tokenize(line))
            .into_iter()
            .map(|d| d.kind)
            .collect()
    }

    #[test]
    fn test_well_formed_line_is_clean() {
        assert!(kinds("Mix @eggs{3} in a #bowl with @salt for ~{2%min}").is_empty());
    }

    #[test]
    fn test_empty_name() {
        let line = "Add @{2%cups} now";
        let found = inspect_line(4, line, &tokenize(line));
        assert_eq!(
            found,
            vec![Diagnostic {
                kind: DiagnosticKind::EmptyName,
                line: 4,
                span: 4..13,
            }]
        );
    }

    #[test]
    fn test_unclosed_brace_after_single_word() {
        assert_eq!(kinds("@flour{2 cups"), vec![DiagnosticKind::UnclosedBrace]);
    }

    #[test]
    fn test_timer_without_braces() {
        assert_eq!(kinds("wait ~ten minutes"), vec![DiagnosticKind::TimerWithoutBraces]);
    }

    #[test]
    fn test_malformed_metadata() {
        assert_eq!(kinds(">> just a note"), vec![DiagnosticKind::MalformedMetadata]);
    }

    #[test]
    fn test_sigils_inside_metadata_are_ignored() {
        assert!(kinds(">> contact: chef@example.com").is_empty());
    }

    #[test]
    fn test_loose_sigils_are_not_reported() {
        assert!(kinds("Serves 2 @ home, 5 # per tray, ~ approx").is_empty());
    }
}
