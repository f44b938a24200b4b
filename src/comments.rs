use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// `-- comment` through the end of the line
static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"--.*").expect("line comment pattern is valid"));

/// `[- comment -]` on a single line, with the blanks around it
static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]*\[-.*?-\][ \t]*").expect("block comment pattern is valid"));

/// Remove line comments and collapse block comments to a single space.
///
/// Line breaks are left untouched so line numbers stay stable for the scanner.
pub fn strip_comments(source: &str) -> String {
    let without_lines = LINE_COMMENT.replace_all(source, "");
    match BLOCK_COMMENT.replace_all(&without_lines, " ") {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}
