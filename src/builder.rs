use crate::{Parser, ParserOptions, Quantity};

/// Builder for configuring a [`Parser`]
#[derive(Debug, Default)]
pub struct ParserBuilder {
    options: ParserOptions,
}

impl ParserBuilder {
    /// Start from a complete set of options, e.g. one loaded from `cooklang.toml`
    ///
    /// # Example
    /// ```
    /// use cooklang_parser::{Parser, ParserOptions};
    ///
    /// let parser = Parser::builder()
    ///     .options(ParserOptions::default())
    ///     .build();
    /// ```
    pub fn options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the quantity used for ingredients written without one
    ///
    /// # Example
    /// ```
    /// use cooklang_parser::{Parser, Quantity};
    ///
    /// let parser = Parser::builder()
    ///     .default_ingredient_quantity("to taste")
    ///     .build();
    /// let recipe = parser.parse("Season with @salt");
    /// assert_eq!(recipe.ingredients[0].quantity, Quantity::from("to taste"));
    /// ```
    pub fn default_ingredient_quantity(mut self, quantity: impl Into<Quantity>) -> Self {
        self.options.default_ingredient_quantity = quantity.into();
        self
    }

    /// Set the quantity used for cookware written without one
    ///
    /// # Example
    /// ```
    /// use cooklang_parser::{Parser, Quantity};
    ///
    /// let parser = Parser::builder()
    ///     .default_cookware_quantity(2.0)
    ///     .build();
    /// let recipe = parser.parse("Heat two #pans");
    /// assert_eq!(recipe.cookware[0].quantity, Quantity::Number(2.0));
    /// ```
    pub fn default_cookware_quantity(mut self, quantity: impl Into<Quantity>) -> Self {
        self.options.default_cookware_quantity = quantity.into();
        self
    }

    /// Set the units used for ingredients and timers written without any
    pub fn default_units(mut self, units: impl Into<String>) -> Self {
        self.options.default_units = units.into();
        self
    }

    pub fn build(self) -> Parser {
        Parser::new(self.options)
    }
}
