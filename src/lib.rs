//! A lenient parser for [Cooklang](https://cooklang.org/) recipes.
//!
//! Source text is turned into a [`Recipe`]: `>>` metadata, steps made of
//! text, ingredient, cookware and timer nodes, and an optional shopping list.
//! Parsing never fails; markup that does not match is kept as text, and
//! [`Parser::parse_with_report`] lists the spans that looked malformed.
//!
//! ```
//! use cooklang_parser::{parse, Node, Quantity};
//!
//! let recipe = parse("Mix @eggs{3} and @flour{1/2%cup}");
//! assert_eq!(recipe.ingredients[1].quantity, Quantity::Number(0.5));
//! assert_eq!(recipe.steps[0][0], Node::text("Mix "));
//! ```

pub mod builder;
pub mod comments;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod parser;
pub mod quantity;
pub mod serializer;
pub mod shopping_list;
pub mod tokens;
pub mod uniffi_bindings;

pub use builder::ParserBuilder;
pub use config::{load_config, load_config_from, ParserOptions};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use error::CooklangError;
pub use model::{Cookware, Ingredient, Metadata, Node, Recipe, Step, Timer};
pub use parser::{ParseReport, Parser};
pub use quantity::Quantity;
pub use shopping_list::{ShoppingList, ShoppingListItem};

/// Parse a recipe with the default options (`"some"` ingredients, one of each cookware).
pub fn parse(source: &str) -> Recipe {
    Parser::default().parse(source)
}
