use std::fmt::{self, Write};

use crate::model::{Node, Recipe};
use crate::quantity::Quantity;
use crate::shopping_list::ShoppingListItem;

impl Recipe {
    /// Render the recipe back to Cooklang markup.
    ///
    /// Comments and the original whitespace between sections are not kept,
    /// but parsing the output again gives back the same metadata, steps and
    /// shopping list.
    ///
    /// ```
    /// use cooklang_parser::parse;
    ///
    /// let recipe = parse(">> servings: 2\nWhisk @eggs{2} in a #bowl");
    /// assert_eq!(
    ///     recipe.to_cooklang(),
    ///     ">> servings: 2\n\nWhisk @eggs{2} in a #bowl{1}\n"
    /// );
    /// ```
    pub fn to_cooklang(&self) -> String {
        let metadata: Vec<String> = self
            .metadata
            .iter()
            .map(|(key, value)| format!(">> {}: {}", key, value))
            .collect();
        let steps: Vec<String> = self
            .steps
            .iter()
            .map(Vec::as_slice)
            .map(render_step)
            .collect();
        let categories: Vec<String> = self
            .shopping_list
            .iter()
            .map(|(category, items)| render_category(category, items))
            .collect();

        let sections: Vec<String> = [
            metadata.join("\n"),
            steps.join("\n\n"),
            categories.join("\n\n"),
        ]
        .into_iter()
        .filter(|section| !section.is_empty())
        .collect();

        if sections.is_empty() {
            return String::new();
        }
        let mut out = sections.join("\n\n");
        out.push('\n');
        out
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_cooklang())
    }
}

fn render_step(step: &[Node]) -> String {
    let mut out = String::new();
    for node in step {
        match node {
            Node::Text { value } => out.push_str(value),
            Node::Ingredient(ingredient) => render_entity(
                &mut out,
                '@',
                &ingredient.name,
                Some(&ingredient.quantity),
                &ingredient.units,
            ),
            Node::Cookware(cookware) => {
                render_entity(&mut out, '#', &cookware.name, Some(&cookware.quantity), "")
            }
            Node::Timer(timer) => {
                render_entity(&mut out, '~', &timer.name, timer.quantity.as_ref(), &timer.units)
            }
        }
    }
    out
}

/// `sigil name {quantity%units}`; the brace group is always written.
fn render_entity(
    out: &mut String,
    sigil: char,
    name: &str,
    quantity: Option<&Quantity>,
    units: &str,
) {
    out.push(sigil);
    out.push_str(name);
    out.push('{');
    if let Some(quantity) = quantity.filter(|q| !q.is_blank()) {
        let _ = write!(out, "{}", quantity);
    }
    if !units.is_empty() {
        out.push('%');
        out.push_str(units);
    }
    out.push('}');
}

fn render_category(category: &str, items: &[ShoppingListItem]) -> String {
    let mut out = format!("[{}]", category);
    for item in items {
        out.push('\n');
        out.push_str(&item.name);
        if let Some(synonym) = &item.synonym {
            out.push('|');
            out.push_str(synonym);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Ingredient, Timer};

    #[test]
    fn test_render_entities() {
        let step = vec![
            Node::text("Boil "),
            Node::Ingredient(Ingredient {
                name: "rice".to_string(),
                quantity: Quantity::Number(0.5),
                units: "cup".to_string(),
            }),
            Node::text(" for "),
            Node::Timer(Timer {
                name: String::new(),
                quantity: Some(Quantity::Number(15.0)),
                units: "minutes".to_string(),
            }),
        ];
        assert_eq!(render_step(&step), "Boil @rice{0.5%cup} for ~{15%minutes}");
    }

    #[test]
    fn test_bare_timer_renders_empty_braces() {
        let step = vec![Node::Timer(Timer {
            name: "rest".to_string(),
            quantity: None,
            units: String::new(),
        })];
        assert_eq!(render_step(&step), "~rest{}");
    }

    #[test]
    fn test_render_category() {
        let items = vec![
            ShoppingListItem::new("apple", Some("Granny Smith".to_string())),
            ShoppingListItem::new("banana", None),
        ];
        assert_eq!(
            render_category("produce", &items),
            "[produce]\napple|Granny Smith\nbanana"
        );
    }

    #[test]
    fn test_empty_recipe_renders_nothing() {
        assert_eq!(Recipe::default().to_cooklang(), "");
    }
}
