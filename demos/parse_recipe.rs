//! Parse a recipe, inspect it and render it back
//!
//! Run with `cargo run --example parse_recipe`.

use cooklang_parser::{Parser, Quantity};

const SOURCE: &str = r#"
>> source: https://www.dinneratthezoo.com/wprm_print/6796
>> total time: 6 minutes
>> servings: 2

Place the @apple juice{1,5%cups}, @banana{one sliced}, @frozen mixed berries{1,5%cups} and @vanilla greek yogurt{3/4%cup} in a #blender{}; blend until smooth. -- add ice if you like

Taste and add @honey{} if desired. Rest for ~{2%minutes} before serving.

[fruit]
banana|bananas
frozen mixed berries
"#;

fn main() {
    let parser = Parser::builder().default_ingredient_quantity("to taste").build();
    let report = parser.parse_with_report(SOURCE);
    let recipe = &report.recipe;

    println!("=== Metadata ===");
    for (key, value) in &recipe.metadata {
        println!("{}: {}", key, value);
    }

    println!("\n=== Ingredients ===");
    for ingredient in &recipe.ingredients {
        match &ingredient.quantity {
            Quantity::Number(n) => println!("{} {} {}", n, ingredient.units, ingredient.name),
            Quantity::Literal(s) => println!("{} ({})", ingredient.name, s),
        }
    }

    println!("\n=== Timers ===");
    for timer in recipe.timers() {
        let amount = timer.quantity.as_ref().map(Quantity::to_string);
        println!("{} {}", amount.unwrap_or_default(), timer.units);
    }

    println!("\n=== Shopping list ===");
    if let Some(category) = recipe.shopping_list.category_for("bananas") {
        println!("bananas are in '{}'", category);
    }

    println!("\n=== Diagnostics ===");
    println!("{} suspicious span(s)", report.diagnostics.len());

    println!("\n=== Round trip ===");
    print!("{}", recipe.to_cooklang());
}
