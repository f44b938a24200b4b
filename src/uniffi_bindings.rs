//! UniFFI bindings for cooklang-parser
//!
//! This module provides FFI-compatible types and functions for use with iOS and Android.
//! Parsing is synchronous and infallible, so every export is a plain function.

use crate::{
    Cookware, Diagnostic, DiagnosticKind, Ingredient, Node, ParseReport, Parser, ParserOptions,
    Quantity, Recipe, ShoppingListItem, Timer,
};

// Re-export UniFFI macro
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible quantity
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum FfiQuantity {
    Number { value: f64 },
    Literal { value: String },
}

impl From<Quantity> for FfiQuantity {
    fn from(quantity: Quantity) -> Self {
        match quantity {
            Quantity::Number(value) => FfiQuantity::Number { value },
            Quantity::Literal(value) => FfiQuantity::Literal { value },
        }
    }
}

impl From<FfiQuantity> for Quantity {
    fn from(quantity: FfiQuantity) -> Self {
        match quantity {
            FfiQuantity::Number { value } => Quantity::Number(value),
            FfiQuantity::Literal { value } => Quantity::from(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiIngredient {
    pub name: String,
    pub quantity: FfiQuantity,
    pub units: String,
}

impl From<Ingredient> for FfiIngredient {
    fn from(ingredient: Ingredient) -> Self {
        FfiIngredient {
            name: ingredient.name,
            quantity: ingredient.quantity.into(),
            units: ingredient.units,
        }
    }
}

impl From<FfiIngredient> for Ingredient {
    fn from(ffi: FfiIngredient) -> Self {
        Ingredient {
            name: ffi.name,
            quantity: ffi.quantity.into(),
            units: ffi.units,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiCookware {
    pub name: String,
    pub quantity: FfiQuantity,
}

impl From<Cookware> for FfiCookware {
    fn from(cookware: Cookware) -> Self {
        FfiCookware {
            name: cookware.name,
            quantity: cookware.quantity.into(),
        }
    }
}

impl From<FfiCookware> for Cookware {
    fn from(ffi: FfiCookware) -> Self {
        Cookware {
            name: ffi.name,
            quantity: ffi.quantity.into(),
        }
    }
}

/// FFI-compatible step node
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum FfiNode {
    Text {
        value: String,
    },
    Ingredient {
        ingredient: FfiIngredient,
    },
    Cookware {
        cookware: FfiCookware,
    },
    Timer {
        name: String,
        quantity: Option<FfiQuantity>,
        units: String,
    },
}

impl From<Node> for FfiNode {
    fn from(node: Node) -> Self {
        match node {
            Node::Text { value } => FfiNode::Text { value },
            Node::Ingredient(ingredient) => FfiNode::Ingredient {
                ingredient: ingredient.into(),
            },
            Node::Cookware(cookware) => FfiNode::Cookware {
                cookware: cookware.into(),
            },
            Node::Timer(timer) => FfiNode::Timer {
                name: timer.name,
                quantity: timer.quantity.map(Into::into),
                units: timer.units,
            },
        }
    }
}

impl From<FfiNode> for Node {
    fn from(ffi: FfiNode) -> Self {
        match ffi {
            FfiNode::Text { value } => Node::Text { value },
            FfiNode::Ingredient { ingredient } => Node::Ingredient(ingredient.into()),
            FfiNode::Cookware { cookware } => Node::Cookware(cookware.into()),
            FfiNode::Timer {
                name,
                quantity,
                units,
            } => Node::Timer(Timer {
                name,
                quantity: quantity.map(Into::into),
                units,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiStep {
    pub nodes: Vec<FfiNode>,
}

/// Key-value pair for metadata (since ordered maps aren't directly supported in UniFFI)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiKeyValue {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiShoppingItem {
    pub name: String,
    pub synonym: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiShoppingCategory {
    pub name: String,
    pub items: Vec<FfiShoppingItem>,
}

/// FFI-compatible recipe structure
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipe {
    /// Metadata in declaration order
    pub metadata: Vec<FfiKeyValue>,
    pub steps: Vec<FfiStep>,
    /// Shopping list categories in declaration order
    pub shopping_list: Vec<FfiShoppingCategory>,
    /// Every ingredient occurrence, in step order
    pub ingredients: Vec<FfiIngredient>,
    /// Every cookware occurrence, in step order
    pub cookware: Vec<FfiCookware>,
}

impl From<Recipe> for FfiRecipe {
    fn from(recipe: Recipe) -> Self {
        FfiRecipe {
            metadata: recipe
                .metadata
                .into_iter()
                .map(|(key, value)| FfiKeyValue { key, value })
                .collect(),
            steps: recipe
                .steps
                .into_iter()
                .map(|step| FfiStep {
                    nodes: step.into_iter().map(Into::into).collect(),
                })
                .collect(),
            shopping_list: recipe
                .shopping_list
                .iter()
                .map(|(name, items)| FfiShoppingCategory {
                    name: name.to_string(),
                    items: items
                        .iter()
                        .map(|item| FfiShoppingItem {
                            name: item.name.clone(),
                            synonym: item.synonym.clone(),
                        })
                        .collect(),
                })
                .collect(),
            ingredients: recipe.ingredients.into_iter().map(Into::into).collect(),
            cookware: recipe.cookware.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<FfiRecipe> for Recipe {
    fn from(ffi: FfiRecipe) -> Self {
        Recipe {
            metadata: ffi
                .metadata
                .into_iter()
                .map(|kv| (kv.key, kv.value))
                .collect(),
            steps: ffi
                .steps
                .into_iter()
                .map(|step| step.nodes.into_iter().map(Into::into).collect())
                .collect(),
            shopping_list: ffi
                .shopping_list
                .into_iter()
                .map(|category| {
                    let items: Vec<ShoppingListItem> = category
                        .items
                        .into_iter()
                        .map(|item| ShoppingListItem::new(item.name, item.synonym))
                        .collect();
                    (category.name, items)
                })
                .collect(),
            ingredients: ffi.ingredients.into_iter().map(Into::into).collect(),
            cookware: ffi.cookware.into_iter().map(Into::into).collect(),
        }
    }
}

/// FFI-compatible parser options
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiParserOptions {
    pub default_ingredient_quantity: FfiQuantity,
    pub default_cookware_quantity: FfiQuantity,
    pub default_units: String,
}

impl Default for FfiParserOptions {
    fn default() -> Self {
        ParserOptions::default().into()
    }
}

impl From<ParserOptions> for FfiParserOptions {
    fn from(options: ParserOptions) -> Self {
        FfiParserOptions {
            default_ingredient_quantity: options.default_ingredient_quantity.into(),
            default_cookware_quantity: options.default_cookware_quantity.into(),
            default_units: options.default_units,
        }
    }
}

impl From<FfiParserOptions> for ParserOptions {
    fn from(ffi: FfiParserOptions) -> Self {
        ParserOptions {
            default_ingredient_quantity: ffi.default_ingredient_quantity.into(),
            default_cookware_quantity: ffi.default_cookware_quantity.into(),
            default_units: ffi.default_units,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum FfiDiagnosticKind {
    EmptyName,
    UnclosedBrace,
    TimerWithoutBraces,
    MalformedMetadata,
}

impl From<DiagnosticKind> for FfiDiagnosticKind {
    fn from(kind: DiagnosticKind) -> Self {
        match kind {
            DiagnosticKind::EmptyName => FfiDiagnosticKind::EmptyName,
            DiagnosticKind::UnclosedBrace => FfiDiagnosticKind::UnclosedBrace,
            DiagnosticKind::TimerWithoutBraces => FfiDiagnosticKind::TimerWithoutBraces,
            DiagnosticKind::MalformedMetadata => FfiDiagnosticKind::MalformedMetadata,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiDiagnostic {
    pub kind: FfiDiagnosticKind,
    pub message: String,
    /// 1-based line number
    pub line: u64,
    /// Byte offsets within the line
    pub start: u64,
    pub end: u64,
}

impl From<Diagnostic> for FfiDiagnostic {
    fn from(diagnostic: Diagnostic) -> Self {
        FfiDiagnostic {
            kind: diagnostic.kind.into(),
            message: diagnostic.kind.to_string(),
            line: diagnostic.line as u64,
            start: diagnostic.span.start as u64,
            end: diagnostic.span.end as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiParseReport {
    pub recipe: FfiRecipe,
    pub diagnostics: Vec<FfiDiagnostic>,
}

impl From<ParseReport> for FfiParseReport {
    fn from(report: ParseReport) -> Self {
        FfiParseReport {
            recipe: report.recipe.into(),
            diagnostics: report.diagnostics.into_iter().map(Into::into).collect(),
        }
    }
}

/// Parse a recipe with the default options
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn parse_recipe(source: String) -> FfiRecipe {
    Parser::default().parse(&source).into()
}

/// Parse a recipe with custom default quantities and units
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn parse_recipe_with_options(source: String, options: FfiParserOptions) -> FfiRecipe {
    Parser::new(options.into()).parse(&source).into()
}

/// Parse a recipe and report spans that looked like malformed markup
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn parse_recipe_diagnostics(
    source: String,
    options: Option<FfiParserOptions>,
) -> FfiParseReport {
    let options = options.map(Into::into).unwrap_or_default();
    Parser::new(options).parse_with_report(&source).into()
}

/// Render a recipe back to Cooklang markup
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn recipe_to_cooklang(recipe: FfiRecipe) -> String {
    Recipe::from(recipe).to_cooklang()
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ffi_recipe_conversion() {
        let recipe = Parser::default().parse(
            ">> servings: 2\nBeat @eggs{2} in a #bowl for ~{1%min}\n\n[dairy]\negg|eggs\n",
        );

        let ffi_recipe: FfiRecipe = recipe.clone().into();
        assert_eq!(ffi_recipe.metadata.len(), 1);
        assert_eq!(ffi_recipe.steps.len(), 1);
        assert_eq!(ffi_recipe.steps[0].nodes.len(), 6);
        assert_eq!(ffi_recipe.ingredients.len(), 1);
        assert_eq!(ffi_recipe.cookware.len(), 1);
        assert_eq!(ffi_recipe.shopping_list[0].name, "dairy");

        let back: Recipe = ffi_recipe.into();
        assert_eq!(back, recipe);
    }

    #[test]
    fn test_parse_with_options() {
        let options = FfiParserOptions {
            default_ingredient_quantity: FfiQuantity::Number { value: 1.0 },
            ..Default::default()
        };
        let recipe = parse_recipe_with_options("Add @salt".to_string(), options);
        assert_eq!(
            recipe.ingredients[0].quantity,
            FfiQuantity::Number { value: 1.0 }
        );
    }

    #[test]
    fn test_diagnostics_export() {
        let report = parse_recipe_diagnostics("Add @{2}".to_string(), None);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].kind, FfiDiagnosticKind::EmptyName);
        assert_eq!(report.diagnostics[0].line, 1);
    }

    #[test]
    fn test_recipe_to_cooklang_ffi() {
        let recipe = parse_recipe("Add @milk{1%cup}".to_string());
        assert_eq!(recipe_to_cooklang(recipe), "Add @milk{1%cup}\n");
    }

    #[test]
    fn test_get_version() {
        let version = get_version();
        assert!(!version.is_empty());
    }
}
