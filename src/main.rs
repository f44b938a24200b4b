use clap::{Parser as ClapParser, ValueEnum};
use log::{debug, warn};
use std::io::Read;
use std::path::{Path, PathBuf};

use cooklang_parser::{load_config_from, CooklangError, Parser, ParserOptions, Quantity};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Format {
    /// The parsed document as JSON
    #[default]
    Json,
    /// The document rendered back to Cooklang
    Cooklang,
}

/// Parse a Cooklang recipe and print the result
#[derive(Debug, ClapParser)]
#[command(name = "cooklang-parser", version, about)]
struct Cli {
    /// Recipe file to parse, or `-` for stdin
    file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Print spans that look like malformed markup to stderr
    #[arg(long)]
    diagnostics: bool,

    /// Options file to use instead of ./cooklang.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Quantity for ingredients written without one
    #[arg(long, value_name = "QUANTITY")]
    default_ingredient_quantity: Option<String>,

    /// Quantity for cookware written without one
    #[arg(long, value_name = "QUANTITY")]
    default_cookware_quantity: Option<String>,

    /// Units for ingredients and timers written without any
    #[arg(long, value_name = "UNITS")]
    default_units: Option<String>,
}

fn main() -> Result<(), CooklangError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut options = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => ParserOptions::load()?,
    };
    if let Some(quantity) = &cli.default_ingredient_quantity {
        options.default_ingredient_quantity = Quantity::from(quantity.as_str());
    }
    if let Some(quantity) = &cli.default_cookware_quantity {
        options.default_cookware_quantity = Quantity::from(quantity.as_str());
    }
    if let Some(units) = cli.default_units {
        options.default_units = units;
    }
    options.validate()?;

    let parser = Parser::new(options);
    debug!("Parser options: {:?}", parser.options());

    let source = read_source(&cli.file)?;
    let report = parser.parse_with_report(&source);

    if cli.diagnostics {
        for diagnostic in &report.diagnostics {
            eprintln!("{}: {}", cli.file.display(), diagnostic);
        }
    } else if !report.diagnostics.is_empty() {
        warn!(
            "{} suspicious span(s) kept as text; rerun with --diagnostics to list them",
            report.diagnostics.len()
        );
    }

    match cli.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report.recipe)?),
        Format::Cooklang => print!("{}", report.recipe.to_cooklang()),
    }

    Ok(())
}

fn read_source(path: &Path) -> Result<String, CooklangError> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}
