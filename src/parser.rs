use log::{debug, trace};
use serde::Serialize;
use std::convert::Infallible;
use std::str::FromStr;

use crate::builder::ParserBuilder;
use crate::comments::strip_comments;
use crate::config::ParserOptions;
use crate::diagnostics::{inspect_line, Diagnostic};
use crate::model::{Cookware, Ingredient, Metadata, Node, Recipe, Step, Timer};
use crate::quantity::{normalize_quantity, normalize_units, parse_quantity};
use crate::shopping_list::extract_shopping_lists;
use crate::tokens::{tokenize, Match, Token};

/// Parses Cooklang source into a [`Recipe`].
///
/// A parser only holds its default-value policy, so one instance can be
/// shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParserOptions,
}

/// A recipe together with the spans that looked like malformed markup.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseReport {
    pub recipe: Recipe,
    pub diagnostics: Vec<Diagnostic>,
}

impl Parser {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    /// Creates a new builder for configuring a parser
    ///
    /// # Example
    /// ```
    /// use cooklang_parser::Parser;
    ///
    /// let parser = Parser::builder().default_units("pcs").build();
    /// ```
    pub fn builder() -> ParserBuilder {
        ParserBuilder::default()
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse a recipe. Never fails: anything that is not valid markup is kept as text.
    ///
    /// # Example
    /// ```
    /// use cooklang_parser::{Node, Parser, Quantity};
    ///
    /// let recipe = Parser::default().parse("Crack @eggs{3} into a #bowl");
    /// assert_eq!(recipe.steps.len(), 1);
    /// assert_eq!(recipe.ingredients[0].quantity, Quantity::Number(3.0));
    /// assert_eq!(recipe.cookware[0].name, "bowl");
    /// ```
    pub fn parse(&self, source: &str) -> Recipe {
        self.run(source, None)
    }

    /// Parse a recipe and also report suspicious spans.
    ///
    /// The recipe is identical to what [`Parser::parse`] returns.
    pub fn parse_with_report(&self, source: &str) -> ParseReport {
        let mut diagnostics = Vec::new();
        let recipe = self.run(source, Some(&mut diagnostics));
        ParseReport {
            recipe,
            diagnostics,
        }
    }

    /// Only the `>> key: value` declarations of a recipe.
    pub fn parse_metadata(&self, source: &str) -> Metadata {
        self.parse(source).metadata
    }

    fn run(&self, source: &str, mut diagnostics: Option<&mut Vec<Diagnostic>>) -> Recipe {
        let stripped = strip_comments(source);
        let (body, shopping_list) = extract_shopping_lists(&stripped);

        let mut recipe = Recipe {
            shopping_list,
            ..Default::default()
        };

        for (index, line) in body.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let matches = tokenize(line);
            if let Some(found) = diagnostics.as_deref_mut() {
                for diagnostic in inspect_line(index + 1, line, &matches) {
                    trace!("{}", diagnostic);
                    found.push(diagnostic);
                }
            }

            let step = self.build_step(line, &matches, &mut recipe);
            if !step.is_empty() {
                recipe.steps.push(step);
            }
        }

        debug!(
            "Parsed recipe: {} step(s), {} ingredient(s), {} cookware, {} shopping list categories",
            recipe.steps.len(),
            recipe.ingredients.len(),
            recipe.cookware.len(),
            recipe.shopping_list.len()
        );

        recipe
    }

    /// Turn one tokenized line into a step, recording metadata and the
    /// flattened ingredient and cookware lists on the way.
    fn build_step(&self, line: &str, matches: &[Match<'_>], recipe: &mut Recipe) -> Step {
        let options = &self.options;
        let mut step = Step::new();
        let mut pos = 0;

        for found in matches {
            if pos < found.span.start {
                step.push(Node::text(&line[pos..found.span.start]));
            }
            pos = found.span.end;

            match found.token {
                Token::Metadata { key, value } => {
                    recipe.metadata.insert(key.to_string(), value.to_string());
                }
                Token::Ingredient {
                    name,
                    quantity,
                    units,
                } => {
                    let ingredient = Ingredient {
                        name: name.to_string(),
                        quantity: normalize_quantity(
                            quantity,
                            &options.default_ingredient_quantity,
                        ),
                        units: normalize_units(units, &options.default_units),
                    };
                    recipe.ingredients.push(ingredient.clone());
                    step.push(Node::Ingredient(ingredient));
                }
                Token::Cookware { name, quantity } => {
                    let cookware = Cookware {
                        name: name.to_string(),
                        quantity: normalize_quantity(quantity, &options.default_cookware_quantity),
                    };
                    recipe.cookware.push(cookware.clone());
                    step.push(Node::Cookware(cookware));
                }
                Token::Timer {
                    name,
                    quantity,
                    units,
                } => {
                    step.push(Node::Timer(Timer {
                        name: name.to_string(),
                        quantity: parse_quantity(quantity),
                        units: normalize_units(units, &options.default_units),
                    }));
                }
            }
        }

        if pos < line.len() {
            step.push(Node::text(&line[pos..]));
        }

        step
    }
}

impl FromStr for Recipe {
    type Err = Infallible;

    /// Parse with the default options.
    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Ok(Parser::default().parse(source))
    }
}
