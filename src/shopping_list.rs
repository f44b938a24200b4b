use indexmap::IndexMap;
use log::trace;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// A `[category]` header line followed by its non-blank item lines.
///
/// The block ends at the first blank line or at the end of the input.
static SHOPPING_LIST_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]*\[(?P<name>[^\n]+)\][ \t\r]*(?:\n|\z)(?P<items>(?:[ \t\r]*[^ \t\r\n][^\n]*(?:\n|\z))*)",
    )
    .expect("shopping list pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingListItem {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synonym: Option<String>,
}

impl ShoppingListItem {
    pub fn new(name: impl Into<String>, synonym: Option<String>) -> Self {
        Self {
            name: name.into(),
            synonym,
        }
    }

    fn matches(&self, name: &str) -> bool {
        self.name == name || self.synonym.as_deref() == Some(name)
    }
}

/// Shopping list categories in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ShoppingList(IndexMap<String, Vec<ShoppingListItem>>);

impl ShoppingList {
    pub fn get(&self, category: &str) -> Option<&[ShoppingListItem]> {
        self.0.get(category).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ShoppingListItem])> {
        self.0
            .iter()
            .map(|(category, items)| (category.as_str(), items.as_slice()))
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A repeated category replaces the earlier items but keeps its position.
    pub fn insert(&mut self, category: impl Into<String>, items: Vec<ShoppingListItem>) {
        self.0.insert(category.into(), items);
    }

    /// Find the category an ingredient is shopped under, by item name or synonym.
    ///
    /// ```
    /// use cooklang_parser::parse;
    ///
    /// let recipe = parse("[dairy]\negg|eggs\nbutter\n");
    /// assert_eq!(recipe.shopping_list.category_for("eggs"), Some("dairy"));
    /// assert_eq!(recipe.shopping_list.category_for("flour"), None);
    /// ```
    pub fn category_for(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(_, items)| items.iter().any(|item| item.matches(name)))
            .map(|(category, _)| category.as_str())
    }
}

impl FromIterator<(String, Vec<ShoppingListItem>)> for ShoppingList {
    fn from_iter<T: IntoIterator<Item = (String, Vec<ShoppingListItem>)>>(iter: T) -> Self {
        let mut list = ShoppingList::default();
        for (category, items) in iter {
            list.insert(category, items);
        }
        list
    }
}

/// Pull every shopping list block out of `source`.
///
/// Returns the text with each block replaced by the same number of line
/// breaks, so later line numbers still point at the original source, along
/// with the collected categories.
pub fn extract_shopping_lists(source: &str) -> (String, ShoppingList) {
    let mut list = ShoppingList::default();
    let mut remaining = String::with_capacity(source.len());
    let mut last = 0;

    for caps in SHOPPING_LIST_BLOCK.captures_iter(source) {
        let (Some(block), Some(name)) = (caps.get(0), caps.name("name")) else {
            continue;
        };
        let items = caps.name("items").map_or("", |m| m.as_str());
        let category = parse_category(items);

        trace!(
            "Extracted shopping list category '{}' with {} item(s)",
            name.as_str(),
            category.len()
        );
        list.insert(name.as_str(), category);

        remaining.push_str(&source[last..block.start()]);
        remaining.push_str(&"\n".repeat(block.as_str().matches('\n').count()));
        last = block.end();
    }

    remaining.push_str(&source[last..]);
    (remaining, list)
}

/// `name` or `name|synonym` per line; anything after a second `|` is ignored.
fn parse_category(body: &str) -> Vec<ShoppingListItem> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let mut parts = line.split('|');
            let name = parts.next().unwrap_or_default().trim();
            let synonym = parts
                .next()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from);
            ShoppingListItem::new(name, synonym)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_category() {
        let (rest, list) = extract_shopping_lists("[produce]\napple|Granny Smith\nbanana");

        assert_eq!(rest.trim(), "");
        assert_eq!(
            list.get("produce").unwrap(),
            &[
                ShoppingListItem::new("apple", Some("Granny Smith".to_string())),
                ShoppingListItem::new("banana", None),
            ]
        );
    }

    #[test]
    fn test_block_ends_at_blank_line() {
        let source = "Mix it\n[dairy]\nmilk\n\nBake it";
        let (rest, list) = extract_shopping_lists(source);

        assert_eq!(rest, "Mix it\n\n\n\nBake it");
        assert_eq!(list.get("dairy").unwrap().len(), 1);
    }

    #[test]
    fn test_multiple_categories_in_order() {
        let source = "[fruit and veg]\napple gala | apples\naubergine\n\n[milk and dairy]\nbutter\negg | eggs\n";
        let (_, list) = extract_shopping_lists(source);

        let categories: Vec<&str> = list.categories().collect();
        assert_eq!(categories, vec!["fruit and veg", "milk and dairy"]);
        assert_eq!(list.category_for("apples"), Some("fruit and veg"));
        assert_eq!(list.category_for("egg"), Some("milk and dairy"));
        assert_eq!(list.category_for("cheese"), None);
    }

    #[test]
    fn test_empty_body_keeps_category() {
        let (_, list) = extract_shopping_lists("[empty]\n\nStir");
        assert_eq!(list.get("empty"), Some(&[][..]));
    }

    #[test]
    fn test_category_name_not_trimmed() {
        let (_, list) = extract_shopping_lists("[ spices ]\npepper\n");
        assert!(list.get(" spices ").is_some());
    }

    #[test]
    fn test_inline_brackets_are_not_headers() {
        let source = "Use the [big] bowl\nthen stir";
        let (rest, list) = extract_shopping_lists(source);
        assert!(list.is_empty());
        assert_eq!(rest, source);
    }

    #[test]
    fn test_extra_separators_ignored() {
        let items = parse_category("pepper | black pepper | peppercorns\n");
        assert_eq!(
            items,
            vec![ShoppingListItem::new(
                "pepper",
                Some("black pepper".to_string())
            )]
        );
    }
}
