use indexmap::IndexMap;
use serde::Serialize;

use crate::quantity::Quantity;
use crate::shopping_list::ShoppingList;

/// Recipe-level `>> key: value` declarations, in first-seen order.
pub type Metadata = IndexMap<String, String>;

/// One non-blank source line, broken into nodes in source order.
pub type Step = Vec<Node>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: Quantity,
    pub units: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cookware {
    pub name: String,
    pub quantity: Quantity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timer {
    /// Empty for anonymous timers such as `~{10%minutes}`
    pub name: String,
    /// `None` when the brace group is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,
    pub units: String,
}

/// A single piece of a step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Text { value: String },
    Ingredient(Ingredient),
    Cookware(Cookware),
    Timer(Timer),
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text {
            value: value.into(),
        }
    }
}

/// A fully parsed recipe document.
///
/// `ingredients` and `cookware` hold one entry per occurrence in the steps,
/// duplicates included, in the order they appear.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub metadata: Metadata,
    pub steps: Vec<Step>,
    pub shopping_list: ShoppingList,
    pub ingredients: Vec<Ingredient>,
    #[serde(rename = "cookwares")]
    pub cookware: Vec<Cookware>,
}

impl Recipe {
    /// Iterate over every timer in step order.
    pub fn timers(&self) -> impl Iterator<Item = &Timer> {
        self.steps.iter().flatten().filter_map(|node| match node {
            Node::Timer(timer) => Some(timer),
            _ => None,
        })
    }
}
