use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

use crate::error::CooklangError;
use crate::quantity::Quantity;

/// Default-value policy applied when markup leaves an amount out
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ParserOptions {
    /// Quantity for ingredients without one, e.g. `@salt` or `@salt{}`
    #[serde(
        default = "default_ingredient_quantity",
        deserialize_with = "deserialize_quantity"
    )]
    pub default_ingredient_quantity: Quantity,
    /// Quantity for cookware without one, e.g. `#pot`
    #[serde(
        default = "default_cookware_quantity",
        deserialize_with = "deserialize_quantity"
    )]
    pub default_cookware_quantity: Quantity,
    /// Units for ingredients and timers without any
    #[serde(default)]
    pub default_units: String,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            default_ingredient_quantity: default_ingredient_quantity(),
            default_cookware_quantity: default_cookware_quantity(),
            default_units: String::new(),
        }
    }
}

impl ParserOptions {
    /// Load options from `cooklang.toml` and `COOKLANG__*` environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with COOKLANG__ prefix
    /// 2. cooklang.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: COOKLANG__DEFAULT_INGREDIENT_QUANTITY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Numeric defaults must be usable numbers.
    pub fn validate(&self) -> Result<(), CooklangError> {
        for (field, quantity) in [
            ("default_ingredient_quantity", &self.default_ingredient_quantity),
            ("default_cookware_quantity", &self.default_cookware_quantity),
        ] {
            if let Some(n) = quantity.as_number() {
                if !n.is_finite() {
                    return Err(CooklangError::InvalidOptions(format!(
                        "{} must be a finite number, got {}",
                        field, n
                    )));
                }
            }
        }
        Ok(())
    }
}

fn default_ingredient_quantity() -> Quantity {
    Quantity::Literal("some".to_string())
}

fn default_cookware_quantity() -> Quantity {
    Quantity::Number(1.0)
}

/// `"2"` in a config file means the same as `2`.
fn deserialize_quantity<'de, D>(deserializer: D) -> Result<Quantity, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Quantity::deserialize(deserializer)? {
        Quantity::Literal(text) => Quantity::from(text),
        number => number,
    })
}

/// Load parser options from file and environment variables
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. Environment variables with COOKLANG__ prefix
/// 2. cooklang.toml file in current directory
/// 3. Default values
pub fn load_config() -> Result<ParserOptions, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("cooklang").required(false))
        .add_source(environment())
        .build()?;

    settings.try_deserialize()
}

/// Load parser options from an explicit file, still honoring the environment.
pub fn load_config_from(path: &Path) -> Result<ParserOptions, ConfigError> {
    let settings = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(environment())
        .build()?;

    settings.try_deserialize()
}

fn environment() -> Environment {
    Environment::with_prefix("COOKLANG")
        .separator("__")
        .try_parsing(true)
}
